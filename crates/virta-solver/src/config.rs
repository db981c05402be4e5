/// Configuration for the Newton-Raphson driver and the transient stepper.
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Maximum absolute change between successive Newton iterates that
    /// counts as converged.
    pub tolerance: f64,

    /// Newton iterations allowed per guess before a random restart.
    pub max_iterations: usize,

    /// Random restarts allowed per step before giving up.
    pub max_guesses: usize,

    /// Divisor applied to the nominal time step on the t=0 step, absorbing
    /// initial conditions into one short sub-step.
    pub first_step_shrink: f64,

    /// Seed of the random-guess generator, fixed per run for reproducible
    /// trajectories.
    pub rng_seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: 1e-5,
            max_iterations: 20,
            max_guesses: 100,
            first_step_shrink: 1e9,
            rng_seed: 512,
        }
    }
}
