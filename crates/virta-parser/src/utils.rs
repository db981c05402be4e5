use nom::{
    IResult, Parser,
    bytes::complete::{take_till1, take_while1},
    combinator::map_res,
};

use crate::prelude::*;

/// Scale factor of a SPICE magnitude suffix, case-insensitive. An empty
/// suffix scales by one; anything unrecognized is rejected.
fn suffix_scale(suffix: &str) -> Option<f64> {
    let scale = match suffix.to_ascii_uppercase().as_str() {
        "" => 1.0,
        "T" => 1e12,
        "G" => 1e9,
        "MEG" => 1e6,
        "K" => 1e3,
        "M" => 1e-3,
        "U" => 1e-6,
        "N" => 1e-9,
        "P" => 1e-12,
        "F" => 1e-15,
        _ => return None,
    };
    Some(scale)
}

/// Parses a SPICE numeric token: a float in any standard notation, with an
/// optional trailing magnitude suffix (`4.7k`, `100n`, `3meg`).
///
/// The suffix is whatever follows the last digit, dot or sign, so
/// scientific notation such as `2.2E-12` is left to the float parser.
pub fn parse_value(token: &str) -> Result<f64> {
    let number_end = token
        .rfind(|c: char| !c.is_ascii_alphabetic())
        .map_or(0, |index| index + 1);
    let (number, suffix) = token.split_at(number_end);

    let scale = suffix_scale(suffix)
        .ok_or_else(|| Error::InvalidValue(format!("unknown magnitude suffix in '{token}'")))?;
    let base: f64 = number
        .parse()
        .map_err(|_| Error::InvalidValue(format!("invalid numeric value '{token}'")))?;

    Ok(base * scale)
}

/// Matches one or more alphanumeric or underscore characters, the shape of
/// element names and node labels.
pub fn alphanumeric_or_underscore1(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_').parse(input)
}

/// Recognizes one whitespace-delimited token and runs it through
/// [`parse_value`].
pub fn value_parser(input: &str) -> IResult<&str, f64> {
    map_res(take_till1(char::is_whitespace), parse_value).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(value: f64, expected: f64) -> bool {
        (value - expected).abs() <= 1e-12 * expected.abs().max(1.0)
    }

    #[test]
    fn test_magnitude_suffixes() {
        assert!(close(parse_value("4.7k").unwrap(), 4700.0));
        assert!(close(parse_value("2.2u").unwrap(), 2.2e-6));
        assert!(close(parse_value("100n").unwrap(), 1e-7));
        assert!(close(parse_value("33p").unwrap(), 33e-12));
        assert!(close(parse_value("1meg").unwrap(), 1e6));
        assert!(close(parse_value("10G").unwrap(), 1e10));
        assert!(close(parse_value("-3m").unwrap(), -3e-3));
    }

    #[test]
    fn test_plain_and_scientific_notation() {
        assert!(close(parse_value("0.5").unwrap(), 0.5));
        assert!(close(parse_value("-15").unwrap(), -15.0));
        assert!(close(parse_value("3e8").unwrap(), 3e8));
        assert!(close(parse_value("2.2E-12").unwrap(), 2.2e-12));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_value("").is_err());
        assert!(parse_value("k").is_err());
        assert!(parse_value("12q").is_err());
        assert!(parse_value("volts").is_err());
    }

    #[test]
    fn test_value_parser_stops_at_whitespace() {
        let (rest, value) = value_parser("1.5k 42").unwrap();
        assert!(close(value, 1500.0));
        assert_eq!(rest, " 42");
    }
}
