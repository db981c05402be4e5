use crate::constants::{DIODE_VOLTAGE_LIMIT, SATURATION_CURRENT, THERMAL_VOLTAGE};
use crate::prelude::*;

#[derive(Debug, Clone)]
/// Represents a junction diode in a circuit.
pub struct Diode {
    /// Name of the diode.
    pub name: String,
    /// Anode.
    pub plus: String,
    /// Cathode.
    pub minus: String,
}

impl Identifiable for Diode {
    fn identifier(&self) -> String {
        format!("D{}", self.name)
    }
}

impl Diode {
    /// Companion model linearized around the guessed junction voltage:
    /// `(conductance, source current)`.
    ///
    /// The voltage is limited to [`DIODE_VOLTAGE_LIMIT`] before entering the
    /// exponential so the conductance stays finite.
    pub fn companion(&self, v_ab: f64) -> (f64, f64) {
        let v = v_ab.min(DIODE_VOLTAGE_LIMIT);
        let exp = (v / THERMAL_VOLTAGE).exp();
        let g0 = SATURATION_CURRENT * exp / THERMAL_VOLTAGE;
        let i0 = SATURATION_CURRENT * (exp - 1.0) - g0 * v;
        (g0, i0)
    }
}

impl fmt::Display for Diode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{} {} {}", self.name, self.plus, self.minus)
    }
}

pub fn parse_diode(input: &str) -> IResult<&str, Diode> {
    let (input, _) = tag_no_case("D").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;

    let diode = Diode {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
    };

    Ok((input, diode))
}

impl FromStr for Diode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split(['%', '*']).next().unwrap_or("").trim();
        let (_, diode) = all_consuming(parse_diode)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(diode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_diode() {
        let diode = "D1200 1 2".parse::<Diode>().unwrap();
        assert_eq!(diode.name, "1200");
        assert_eq!(diode.plus, "1");
        assert_eq!(diode.minus, "2");
        assert_eq!(diode.to_string(), "D1200 1 2");
    }

    #[test]
    fn test_invalid_diode_format() {
        assert!("D1 1".parse::<Diode>().is_err());
        assert!("D1 1 2 extra".parse::<Diode>().is_err());
    }

    #[test]
    fn test_companion_reproduces_diode_current() {
        let diode = "D1 1 0".parse::<Diode>().unwrap();
        // g0*v + i0 must equal the Shockley current at the guess voltage.
        for v in [0.0, 0.3, 0.6, 0.8] {
            let (g0, i0) = diode.companion(v);
            let shockley = SATURATION_CURRENT * ((v / THERMAL_VOLTAGE).exp() - 1.0);
            assert!((g0 * v + i0 - shockley).abs() < 1e-12 * shockley.abs().max(1.0));
        }
    }

    #[test]
    fn test_companion_clamps_forward_voltage() {
        let diode = "D1 1 0".parse::<Diode>().unwrap();
        let clamped = diode.companion(0.9);
        assert_eq!(diode.companion(5.0), clamped);
        assert!(clamped.0.is_finite());
    }

    #[test]
    fn test_companion_underflows_to_pure_source() {
        let diode = "D1 1 0".parse::<Diode>().unwrap();
        let (g0, i0) = diode.companion(-100.0);
        assert_eq!(g0, 0.0);
        // A deeply reverse-biased junction leaks the saturation current.
        assert!((i0 + SATURATION_CURRENT).abs() < 1e-20);
    }
}
