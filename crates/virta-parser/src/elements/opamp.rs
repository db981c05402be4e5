use crate::prelude::*;

#[derive(Debug, Clone)]
/// Ideal operational amplifier.
///
/// Forces its two inputs to the same voltage and supplies whatever output
/// current the rest of the circuit demands, which costs one auxiliary MNA
/// variable.
pub struct OpAmp {
    /// Name of the op-amp.
    pub name: String,
    /// Non-inverting input.
    pub plus: String,
    /// Inverting input.
    pub minus: String,
    /// Output node.
    pub output: String,
}

impl Identifiable for OpAmp {
    fn identifier(&self) -> String {
        format!("O{}", self.name)
    }
}

impl fmt::Display for OpAmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{} {} {} {}", self.name, self.plus, self.minus, self.output)
    }
}

pub fn parse_opamp(input: &str) -> IResult<&str, OpAmp> {
    let (input, _) = tag_no_case("O").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, output) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;

    let opamp = OpAmp {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        output: output.to_string(),
    };

    Ok((input, opamp))
}

impl FromStr for OpAmp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split(['%', '*']).next().unwrap_or("").trim();
        let (_, opamp) = all_consuming(parse_opamp)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(opamp)
    }
}
