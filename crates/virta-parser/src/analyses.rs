use crate::prelude::*;
use nom::{branch::alt, combinator::map_res};

/// Numerical integration method requested by the netlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationMethod {
    BackwardEuler,
    ForwardEuler,
    Trapezoidal,
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationMethod::BackwardEuler => write!(f, "BE"),
            IntegrationMethod::ForwardEuler => write!(f, "FE"),
            IntegrationMethod::Trapezoidal => write!(f, "TRAP"),
        }
    }
}

impl FromStr for IntegrationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "BE" => Ok(IntegrationMethod::BackwardEuler),
            "FE" => Ok(IntegrationMethod::ForwardEuler),
            "TRAP" => Ok(IntegrationMethod::Trapezoidal),
            other => Err(Error::InvalidFormat(format!(
                "unknown integration method '{other}'"
            ))),
        }
    }
}

/// Transient analysis window: `.TRAN t_total step method inner_steps`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransientSpec {
    pub stop_time: f64,
    pub time_step: f64,
    pub method: IntegrationMethod,
    /// Sub-solves executed per recorded sample (after the first step).
    pub inner_steps: usize,
}

impl fmt::Display for TransientSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            ".TRAN {} {} {} {}",
            self.stop_time, self.time_step, self.method, self.inner_steps
        )
    }
}

fn parse_method(input: &str) -> IResult<&str, IntegrationMethod> {
    map_res(
        alt((tag_no_case("BE"), tag_no_case("FE"), tag_no_case("TRAP"))),
        IntegrationMethod::from_str,
    )
    .parse(input)
}

fn parse_transient_spec(input: &str) -> IResult<&str, TransientSpec> {
    let (input, _) = tag_no_case(".TRAN").parse(input)?;
    let (input, stop_time) = preceded(space1, value_parser).parse(input)?;
    let (input, time_step) = preceded(space1, value_parser).parse(input)?;
    let (input, method) = preceded(space1, parse_method).parse(input)?;
    let (input, inner_steps) = preceded(
        space1,
        map_res(nom::character::complete::digit1, str::parse::<usize>),
    )
    .parse(input)?;

    Ok((
        input,
        TransientSpec {
            stop_time,
            time_step,
            method,
            inner_steps,
        },
    ))
}

impl FromStr for TransientSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, spec) = all_consuming(parse_transient_spec)
            .parse(s.trim())
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(spec)
    }
}
