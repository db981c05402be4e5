pub mod transient;

use crate::prelude::*;
use virta_parser::analyses::IntegrationMethod;
use virta_parser::circuit::Circuit;
use virta_result::Trajectory;

/// The main solver facade: owns the circuit and the configuration and runs
/// the requested analysis.
pub struct Solver {
    circuit: Circuit,
    config: SolverConfig,
}

impl Solver {
    pub const fn new(circuit: Circuit, config: SolverConfig) -> Self {
        Self { circuit, config }
    }

    /// Runs the transient analysis the circuit's netlist requested.
    ///
    /// Only Backward Euler is implemented; the FE and TRAP methods parse but
    /// are rejected here.
    pub fn solve(&self) -> Result<Trajectory> {
        match self.circuit.analysis.method {
            IntegrationMethod::BackwardEuler => transient::solve(&self.circuit, &self.config),
            method => Err(Error::UnsupportedMethod(method)),
        }
    }
}
