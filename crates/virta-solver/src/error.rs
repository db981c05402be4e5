use thiserror::Error;
use virta_parser::analyses::IntegrationMethod;

#[derive(Error, Debug)]
pub enum Error {
    /// The netlist requested an integration method the solver does not
    /// implement (only Backward Euler is).
    #[error("Integration method {0} is not implemented")]
    UnsupportedMethod(IntegrationMethod),

    /// The reduced conductance matrix was singular at some step.
    #[error("Singular system at t={time}s")]
    SingularSystem { time: f64 },

    /// Newton-Raphson exhausted every random restart at some step.
    #[error("Newton-Raphson failed to converge at t={time}s after {guesses} random guesses")]
    NewtonDiverged { time: f64, guesses: usize },

    /// The stamped contributions do not form a valid system.
    #[error("Failed to assemble the MNA system")]
    MatrixBuild,

    /// Index binding or circuit validation failed.
    #[error(transparent)]
    Circuit(#[from] virta_parser::Error),
}
