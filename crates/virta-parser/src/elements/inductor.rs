use crate::prelude::*;

#[derive(Debug, Clone)]
/// Represents an inductor in a circuit.
///
/// The inductor carries one auxiliary MNA variable for its branch current.
pub struct Inductor {
    /// Name of the inductor.
    pub name: String,
    /// Positive node of the inductor.
    pub plus: String,
    /// Negative node of the inductor.
    pub minus: String,
    /// Inductance in henries.
    pub value: f64,
    /// Initial branch current, consumed on the first step.
    pub ic: f64,
}

impl Identifiable for Inductor {
    fn identifier(&self) -> String {
        format!("L{}", self.name)
    }
}

impl fmt::Display for Inductor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L{} {} {} {}",
            self.name, self.plus, self.minus, self.value,
        )?;
        if self.ic != 0.0 {
            write!(f, " IC={}", self.ic)?;
        }
        Ok(())
    }
}

pub fn parse_inductor(input: &str) -> IResult<&str, Inductor> {
    let (input, _) = tag_no_case("L").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, value) = preceded(space1, value_parser).parse(input)?;
    let (input, ic) = opt(preceded(
        space1,
        preceded(tag_no_case("IC="), value_parser),
    ))
    .parse(input)?;

    let inductor = Inductor {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        value,
        ic: ic.unwrap_or(0.0),
    };

    Ok((input, inductor))
}

impl FromStr for Inductor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split(['%', '*']).next().unwrap_or("").trim();
        let (_, inductor) = all_consuming(parse_inductor)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(inductor)
    }
}
