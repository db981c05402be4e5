use crate::prelude::*;

#[derive(Debug, Clone)]
/// Represents a linear resistor in a circuit.
pub struct Resistor {
    /// Name of the resistor.
    pub name: String,
    /// Positive node of the resistor.
    pub plus: String,
    /// Negative node of the resistor.
    pub minus: String,
    /// Resistance in ohms.
    pub value: f64,
}

impl Identifiable for Resistor {
    fn identifier(&self) -> String {
        format!("R{}", self.name)
    }
}

impl fmt::Display for Resistor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R{} {} {} {}",
            self.name, self.plus, self.minus, self.value,
        )
    }
}

pub fn parse_resistor(input: &str) -> IResult<&str, Resistor> {
    let (input, _) = tag_no_case("R").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, value) = preceded(space1, value_parser).parse(input)?;

    let resistor = Resistor {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        value,
    };

    Ok((input, resistor))
}

impl FromStr for Resistor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split(['%', '*']).next().unwrap_or("").trim();
        let (_, resistor) = all_consuming(parse_resistor)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;

        if resistor.value <= 0.0 {
            return Err(Error::InvalidValue(format!(
                "resistor value must be positive: '{s}'"
            )));
        }

        Ok(resistor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resistor() {
        let resistor = "R1 1 0 1000".parse::<Resistor>().unwrap();
        assert_eq!(resistor.name, "1");
        assert_eq!(resistor.plus, "1");
        assert_eq!(resistor.minus, "0");
        assert_eq!(resistor.value, 1000.0);
    }

    #[test]
    fn test_parse_resistor_with_suffix() {
        let resistor = "R5 2 3 1.5k".parse::<Resistor>().unwrap();
        assert_eq!(resistor.value, 1500.0);
    }

    #[test]
    fn test_parse_resistor_named_nodes() {
        let resistor = "Rin in neg 1000".parse::<Resistor>().unwrap();
        assert_eq!(resistor.name, "in");
        assert_eq!(resistor.plus, "in");
        assert_eq!(resistor.minus, "neg");
    }

    #[test]
    fn test_display() {
        let resistor = "R1004 1 2 1.9".parse::<Resistor>().unwrap();
        assert_eq!(resistor.to_string(), "R1004 1 2 1.9");
    }

    #[test]
    fn test_invalid_resistor_format() {
        assert!("R1 1 0".parse::<Resistor>().is_err());
        assert!("R1 1 0 abc".parse::<Resistor>().is_err());
        assert!("R 1 0 1000".parse::<Resistor>().is_err());
    }

    #[test]
    fn test_error_on_zero_value() {
        assert!("R1 1 0 0".parse::<Resistor>().is_err());
    }
}
