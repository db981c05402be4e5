pub use crate::error::Error;
pub type Result<T> = core::result::Result<T, Error>;

pub use crate::elements::Identifiable;
pub use crate::utils::{alphanumeric_or_underscore1, parse_value, value_parser};
pub use nom::{
    IResult, Parser,
    bytes::complete::tag_no_case,
    character::complete::space1,
    combinator::{all_consuming, opt},
    sequence::preceded,
};
pub use std::fmt;
pub use std::str::FromStr;
