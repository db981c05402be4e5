use crate::prelude::*;

#[derive(Debug, Clone)]
/// Piecewise-linear resistor described by four voltage/current breakpoints.
///
/// The breakpoints must be ordered by increasing voltage; the device follows
/// the segment containing the present branch voltage and is linearized as a
/// conductance in parallel with a current source.
pub struct NonlinearResistor {
    /// Name of the resistor.
    pub name: String,
    /// Positive node of the resistor.
    pub plus: String,
    /// Negative node of the resistor.
    pub minus: String,
    /// The four (voltage, current) breakpoints, in increasing voltage order.
    pub points: [(f64, f64); 4],
}

impl Identifiable for NonlinearResistor {
    fn identifier(&self) -> String {
        format!("N{}", self.name)
    }
}

impl NonlinearResistor {
    /// Companion model for the segment containing `v_ab`: the segment slope
    /// as a conductance and the zero-voltage intercept as a source current.
    pub fn companion(&self, v_ab: f64) -> (f64, f64) {
        let [(v1, i1), (v2, i2), (v3, i3), (v4, i4)] = self.points;
        let ((v_lo, i_lo), (v_hi, i_hi)) = if v_ab > v3 {
            ((v3, i3), (v4, i4))
        } else if v_ab > v2 {
            ((v2, i2), (v3, i3))
        } else {
            ((v1, i1), (v2, i2))
        };
        let g = (i_hi - i_lo) / (v_hi - v_lo);
        (g, i_hi - g * v_hi)
    }
}

impl fmt::Display for NonlinearResistor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{} {} {}", self.name, self.plus, self.minus)?;
        for (v, i) in &self.points {
            write!(f, " {v} {i}")?;
        }
        Ok(())
    }
}

pub fn parse_nonlinear_resistor(input: &str) -> IResult<&str, NonlinearResistor> {
    let (input, _) = tag_no_case("N").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;

    let mut points = [(0.0, 0.0); 4];
    let mut input = input;
    for point in &mut points {
        let (rest, v) = preceded(space1, value_parser).parse(input)?;
        let (rest, i) = preceded(space1, value_parser).parse(rest)?;
        *point = (v, i);
        input = rest;
    }

    let resistor = NonlinearResistor {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        points,
    };

    Ok((input, resistor))
}

impl FromStr for NonlinearResistor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split(['%', '*']).next().unwrap_or("").trim();
        let (_, resistor) = all_consuming(parse_nonlinear_resistor)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(resistor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chua_resistor() -> NonlinearResistor {
        "N9900 2 0 -2 1.1 -1 0.7 1 -0.7 2 -1.1"
            .parse::<NonlinearResistor>()
            .unwrap()
    }

    #[test]
    fn test_parse_breakpoints() {
        let resistor = chua_resistor();
        assert_eq!(resistor.name, "9900");
        assert_eq!(resistor.points[0], (-2.0, 1.1));
        assert_eq!(resistor.points[3], (2.0, -1.1));
    }

    #[test]
    fn test_display_round_trip() {
        let line = "N9900 2 0 -2 1.1 -1 0.7 1 -0.7 2 -1.1";
        assert_eq!(line.parse::<NonlinearResistor>().unwrap().to_string(), line);
    }

    #[test]
    fn test_companion_segment_selection() {
        let resistor = chua_resistor();

        // Middle segment between (-1, 0.7) and (1, -0.7): slope -0.7, no offset.
        let (g, i0) = resistor.companion(0.0);
        assert!((g + 0.7).abs() < 1e-12);
        assert!(i0.abs() < 1e-12);

        // Upper segment between (1, -0.7) and (2, -1.1): slope -0.4.
        let (g, i0) = resistor.companion(1.5);
        assert!((g + 0.4).abs() < 1e-12);
        assert!((i0 - (-1.1 + 0.4 * 2.0)).abs() < 1e-12);

        // Anything at or below v2 takes the lowest segment.
        let (g, _) = resistor.companion(-5.0);
        assert!((g + 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_arity() {
        assert!("N1 1 0 -2 1.1 -1 0.7 1 -0.7".parse::<NonlinearResistor>().is_err());
    }
}
