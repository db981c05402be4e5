pub mod mna_matrix;

pub use crate::mna_matrix::{MnaMatrix, sum_triplets};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The stamped triplets do not form a valid matrix (e.g. an index is out
    /// of bounds).
    #[error("Failed to build the MNA matrix from stamps")]
    Build,

    /// The conductance matrix could not be factorized or produced a
    /// non-finite solution.
    #[error("The conductance matrix is singular")]
    Singular,
}

pub type Result<T> = core::result::Result<T, Error>;
