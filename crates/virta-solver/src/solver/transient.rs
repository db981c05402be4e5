//! Backward Euler transient analysis: the outer time loop and the inner
//! Newton-Raphson driver with bounded random restarts.

use crate::bind::bind;
use crate::prelude::*;
use log::{info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use virta_matrix::MnaMatrix;
use virta_parser::circuit::Circuit;
use virta_result::Trajectory;

/// Solves the time-domain response of a circuit on a fixed step grid.
pub fn solve(circuit: &Circuit, config: &SolverConfig) -> Result<Trajectory> {
    let table = bind(circuit)?;
    let size = table.size();
    let nonlinear = circuit.is_nonlinear();

    let spec = &circuit.analysis;
    info!(
        "transient analysis from t=0 to t={}s, step {}s, {} variables{}",
        spec.stop_time,
        spec.time_step,
        size,
        if nonlinear { ", nonlinear" } else { "" }
    );

    // One generator for the whole run keeps trajectories bit-identical
    // across runs of the same circuit.
    let mut rng = StdRng::seed_from_u64(config.rng_seed);
    let mut trajectory = Trajectory::new(table.names.clone());

    let mut state = NewtonState {
        previous: vec![0.0; size],
        first_iteration: true,
    };

    let mut time = 0.0;
    while time < spec.stop_time {
        let first_step = time == 0.0;
        // The t=0 step is shortened drastically so the reactive elements
        // absorb their initial conditions in a single short sub-step.
        let (time_step, inner_steps) = if first_step {
            (spec.time_step / config.first_step_shrink, 1)
        } else {
            (spec.time_step, spec.inner_steps.max(1))
        };

        let mut guess: Vec<f64> = (0..size).map(|_| rng.r#gen::<f64>()).collect();
        let mut solution = state.previous.clone();
        for _ in 0..inner_steps {
            solution = newton_solve(
                circuit, &table, config, &mut rng, &mut state, nonlinear, time, time_step,
                first_step, &mut guess,
            )?;
            // History advances only once a sub-step is accepted.
            state.previous.clone_from(&solution);
            guess.clone_from(&solution);
        }

        trajectory.append(time, solution);
        time += spec.time_step;
    }

    info!("simulation finished with {} samples", trajectory.len());
    Ok(trajectory)
}

struct NewtonState {
    /// Accepted solution of the previous sub-step; the history source for
    /// every reactive element.
    previous: Vec<f64>,
    /// Whether the very first Newton iteration of the run is still ahead.
    first_iteration: bool,
}

#[allow(clippy::too_many_arguments)]
fn newton_solve(
    circuit: &Circuit,
    table: &VariableTable,
    config: &SolverConfig,
    rng: &mut StdRng,
    state: &mut NewtonState,
    nonlinear: bool,
    time: f64,
    time_step: f64,
    first_step: bool,
    guess: &mut Vec<f64>,
) -> Result<Vec<f64>> {
    let size = table.size();
    let mut iterations = 0;
    let mut guesses = 0;

    loop {
        let ctx = StampContext {
            time,
            time_step,
            first_step,
            first_iteration: state.first_iteration,
            guess: guess.as_slice(),
            previous: state.previous.as_slice(),
        };

        let mut conductance_stamps = Vec::new();
        let mut excitation_stamps = Vec::new();
        for (element, binding) in circuit.elements.iter().zip(&table.bindings) {
            conductance_stamps.extend(element.conductance_stamps(binding, &ctx));
            excitation_stamps.extend(element.excitation_stamps(binding, &ctx));
        }
        state.first_iteration = false;

        let system = MnaMatrix::from_stamps(size, &conductance_stamps, &excitation_stamps)
            .map_err(|_| Error::MatrixBuild)?;
        let solution = system
            .solve()
            .map_err(|_| Error::SingularSystem { time })?;

        // For purely linear circuits a single solve is exact.
        if !nonlinear {
            return Ok(solution);
        }

        let delta = solution
            .iter()
            .zip(guess.iter())
            .map(|(x, g)| (x - g).abs())
            .fold(0.0_f64, f64::max);
        if delta <= config.tolerance {
            return Ok(solution);
        }

        *guess = solution;
        iterations += 1;
        if iterations == config.max_iterations {
            if guesses >= config.max_guesses {
                return Err(Error::NewtonDiverged { time, guesses });
            }
            guesses += 1;
            warn!(
                "no convergence after {} iterations at t={time}s; random restart {guesses}/{}",
                config.max_iterations, config.max_guesses
            );
            *guess = (0..size).map(|_| rng.r#gen::<f64>()).collect();
            iterations = 0;
        }
    }
}
