use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Error indicating that the format of an element line is invalid.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Error indicating that a numeric value in the input string is invalid.
    #[error("Invalid numeric value: {0}")]
    InvalidValue(String),

    /// Error indicating a parsing failure on a specific line of the netlist.
    #[error("Malformed netlist at line {line}: {message}")]
    MalformedNetlist { line: usize, message: String },

    /// Error indicating that the netlist contains no components.
    #[error("The netlist is empty")]
    EmptyNetlist,

    /// Error indicating that no component references the ground node "0".
    #[error("Circuit has no ground node")]
    MissingGround,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
