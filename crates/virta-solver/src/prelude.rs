pub use crate::error::Error;
pub type Result<T> = core::result::Result<T, Error>;

pub use crate::bind::{Binding, VariableTable};
pub use crate::config::SolverConfig;
pub use crate::stampable::{StampContext, Stampable};
pub use faer::sparse::Triplet;
