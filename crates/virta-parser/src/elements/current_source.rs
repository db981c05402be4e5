use crate::prelude::*;
use crate::waveform::{Waveform, parse_waveform};

#[derive(Debug, Clone)]
/// Represents an independent current source in a circuit.
///
/// The source drives its current from `plus` to `minus`; it needs no
/// auxiliary MNA variable.
pub struct CurrentSource {
    /// Name of the source.
    pub name: String,
    /// Positive node.
    pub plus: String,
    /// Negative node.
    pub minus: String,
    /// Time-dependent source value.
    pub waveform: Waveform,
}

impl Identifiable for CurrentSource {
    fn identifier(&self) -> String {
        format!("I{}", self.name)
    }
}

impl fmt::Display for CurrentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "I{} {} {} {}",
            self.name, self.plus, self.minus, self.waveform,
        )
    }
}

pub fn parse_current_source(input: &str) -> IResult<&str, CurrentSource> {
    let (input, _) = tag_no_case("I").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, waveform) = preceded(space1, parse_waveform).parse(input)?;

    let source = CurrentSource {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        waveform,
    };

    Ok((input, source))
}

impl FromStr for CurrentSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split(['%', '*']).next().unwrap_or("").trim();
        let (_, source) = all_consuming(parse_current_source)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dc_current_source() {
        let source = "I1 2 0 DC 0.001".parse::<CurrentSource>().unwrap();
        assert_eq!(source.name, "1");
        assert_eq!(source.waveform, Waveform::Dc { level: 0.001 });
    }

    #[test]
    fn test_parse_pulse_current_source() {
        let source = "IC_C2 2 0 PULSE 0 3.1 0 1e-9 1e-9 0.1 1001 1"
            .parse::<CurrentSource>()
            .unwrap();
        assert_eq!(source.name, "C_C2");
        match source.waveform {
            Waveform::Pulse { v2, .. } => assert_eq!(v2, 3.1),
            other => panic!("expected PULSE waveform, got {other:?}"),
        }
    }

    #[test]
    fn test_display_round_trip() {
        let line = "I1 2 0 DC 0.001";
        assert_eq!(line.parse::<CurrentSource>().unwrap().to_string(), line);
    }

    #[test]
    fn test_invalid_current_source() {
        assert!("I1 2 0".parse::<CurrentSource>().is_err());
        assert!("I1 2 0 DC".parse::<CurrentSource>().is_err());
    }
}
