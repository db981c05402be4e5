use crate::prelude::*;
use crate::waveform::{Waveform, parse_waveform};

#[derive(Debug, Clone)]
/// Represents an independent voltage source in a circuit.
///
/// Carries one auxiliary MNA variable for its branch current.
pub struct VoltageSource {
    /// Name of the source.
    pub name: String,
    /// Positive node.
    pub plus: String,
    /// Negative node.
    pub minus: String,
    /// Time-dependent source value.
    pub waveform: Waveform,
}

impl Identifiable for VoltageSource {
    fn identifier(&self) -> String {
        format!("V{}", self.name)
    }
}

impl fmt::Display for VoltageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "V{} {} {} {}",
            self.name, self.plus, self.minus, self.waveform,
        )
    }
}

pub fn parse_voltage_source(input: &str) -> IResult<&str, VoltageSource> {
    let (input, _) = tag_no_case("V").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, waveform) = preceded(space1, parse_waveform).parse(input)?;

    let source = VoltageSource {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        waveform,
    };

    Ok((input, source))
}

impl FromStr for VoltageSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split(['%', '*']).next().unwrap_or("").trim();
        let (_, source) = all_consuming(parse_voltage_source)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dc_source() {
        let source = "V1 1 0 DC 5".parse::<VoltageSource>().unwrap();
        assert_eq!(source.name, "1");
        assert_eq!(source.plus, "1");
        assert_eq!(source.minus, "0");
        assert_eq!(source.waveform, Waveform::Dc { level: 5.0 });
    }

    #[test]
    fn test_parse_sin_source() {
        let source = "V4000 1 0 SIN 1 5 1000 0.002 80 90 5"
            .parse::<VoltageSource>()
            .unwrap();
        match source.waveform {
            Waveform::Sin {
                offset,
                amplitude,
                frequency,
                delay,
                damping,
                phase_deg,
                cycles,
            } => {
                assert_eq!(offset, 1.0);
                assert_eq!(amplitude, 5.0);
                assert_eq!(frequency, 1000.0);
                assert_eq!(delay, 0.002);
                assert_eq!(damping, 80.0);
                assert_eq!(phase_deg, 90.0);
                assert_eq!(cycles, 5.0);
            }
            other => panic!("expected SIN waveform, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_pulse_source() {
        let source = "V1 1 0 PULSE 0 5 0.001 1e-9 1e-9 0.01 0.02 1"
            .parse::<VoltageSource>()
            .unwrap();
        match source.waveform {
            Waveform::Pulse { v2, period, .. } => {
                assert_eq!(v2, 5.0);
                assert_eq!(period, 0.02);
            }
            other => panic!("expected PULSE waveform, got {other:?}"),
        }
    }

    #[test]
    fn test_display_round_trip() {
        let line = "V1 in 0 SIN 0 1 100 0 0 0 5";
        assert_eq!(line.parse::<VoltageSource>().unwrap().to_string(), line);
    }

    #[test]
    fn test_invalid_source() {
        assert!("V1 1 0".parse::<VoltageSource>().is_err());
        assert!("V1 1 0 RAMP 1 2".parse::<VoltageSource>().is_err());
        assert!("V1 1 0 SIN 1 2 3".parse::<VoltageSource>().is_err());
    }
}
