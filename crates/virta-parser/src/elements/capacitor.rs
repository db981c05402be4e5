use crate::prelude::*;

#[derive(Debug, Clone)]
/// Represents a capacitor in a circuit.
pub struct Capacitor {
    /// Name of the capacitor.
    pub name: String,
    /// Positive node of the capacitor.
    pub plus: String,
    /// Negative node of the capacitor.
    pub minus: String,
    /// Capacitance in farads.
    pub value: f64,
    /// Initial voltage across the capacitor, consumed on the first step.
    pub ic: f64,
}

impl Identifiable for Capacitor {
    fn identifier(&self) -> String {
        format!("C{}", self.name)
    }
}

impl fmt::Display for Capacitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C{} {} {} {}",
            self.name, self.plus, self.minus, self.value,
        )?;
        if self.ic != 0.0 {
            write!(f, " IC={}", self.ic)?;
        }
        Ok(())
    }
}

pub fn parse_capacitor(input: &str) -> IResult<&str, Capacitor> {
    let (input, _) = tag_no_case("C").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, value) = preceded(space1, value_parser).parse(input)?;
    let (input, ic) = opt(preceded(
        space1,
        preceded(tag_no_case("IC="), value_parser),
    ))
    .parse(input)?;

    let capacitor = Capacitor {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        value,
        ic: ic.unwrap_or(0.0),
    };

    Ok((input, capacitor))
}

impl FromStr for Capacitor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split(['%', '*']).next().unwrap_or("").trim();
        let (_, capacitor) = all_consuming(parse_capacitor)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(capacitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capacitor() {
        let capacitor = "C1 1 0 0.000001".parse::<Capacitor>().unwrap();
        assert_eq!(capacitor.name, "1");
        assert_eq!(capacitor.plus, "1");
        assert_eq!(capacitor.minus, "0");
        assert_eq!(capacitor.value, 1e-6);
        assert_eq!(capacitor.ic, 0.0);
    }

    #[test]
    fn test_parse_capacitor_with_ic() {
        let capacitor = "C2000 2 0 0.31 IC=1".parse::<Capacitor>().unwrap();
        assert_eq!(capacitor.value, 0.31);
        assert_eq!(capacitor.ic, 1.0);
    }

    #[test]
    fn test_parse_capacitor_with_suffix() {
        let capacitor = "C2005 2 0 50u".parse::<Capacitor>().unwrap();
        assert!((capacitor.value - 50e-6).abs() < 1e-18);
    }

    #[test]
    fn test_display_includes_ic_only_when_set() {
        assert_eq!(
            "C1 1 0 0.5".parse::<Capacitor>().unwrap().to_string(),
            "C1 1 0 0.5"
        );
        assert_eq!(
            "C1 1 0 0.5 IC=2".parse::<Capacitor>().unwrap().to_string(),
            "C1 1 0 0.5 IC=2"
        );
    }

    #[test]
    fn test_invalid_capacitor_format() {
        assert!("C1 1 0".parse::<Capacitor>().is_err());
        assert!("C1 1 0 1e-6 G2".parse::<Capacitor>().is_err());
        assert!("C1 1 0 abc".parse::<Capacitor>().is_err());
    }
}
