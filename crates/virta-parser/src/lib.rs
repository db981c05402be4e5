pub mod analyses;
pub mod circuit;
pub mod constants;
pub mod elements;
pub mod error;
pub mod netlist;
pub mod prelude;
pub mod utils;
pub mod waveform;

pub use crate::error::Error;
pub type Result<T> = core::result::Result<T, Error>;

pub use crate::circuit::{Circuit, GROUND};
pub use crate::elements::Element;
pub use crate::elements::Identifiable;
pub use crate::waveform::Waveform;
