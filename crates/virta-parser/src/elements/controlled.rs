//! The four linear controlled sources (E, F, G, H).
//!
//! All share the same netlist shape (two output nodes, two controlling
//! nodes and a gain) and differ only in which electrical quantities the
//! gain relates.

use crate::prelude::*;

macro_rules! controlled_source {
    ($struct_name:ident, $letter:literal, $parse_fn:ident, $gain_doc:literal) => {
        #[derive(Debug, Clone)]
        #[doc = concat!("Controlled source with ", $gain_doc, ".")]
        pub struct $struct_name {
            /// Name of the source.
            pub name: String,
            /// Positive output node.
            pub plus: String,
            /// Negative output node.
            pub minus: String,
            /// Positive controlling node.
            pub ctrl_plus: String,
            /// Negative controlling node.
            pub ctrl_minus: String,
            #[doc = concat!("The ", $gain_doc, ".")]
            pub gain: f64,
        }

        impl Identifiable for $struct_name {
            fn identifier(&self) -> String {
                format!(concat!($letter, "{}"), self.name)
            }
        }

        impl fmt::Display for $struct_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    concat!($letter, "{} {} {} {} {} {}"),
                    self.name, self.plus, self.minus, self.ctrl_plus, self.ctrl_minus, self.gain,
                )
            }
        }

        pub fn $parse_fn(input: &str) -> IResult<&str, $struct_name> {
            let (input, _) = tag_no_case($letter).parse(input)?;
            let (input, name) = alphanumeric_or_underscore1(input)?;
            let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
            let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
            let (input, ctrl_plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
            let (input, ctrl_minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
            let (input, gain) = preceded(space1, value_parser).parse(input)?;

            let source = $struct_name {
                name: name.to_string(),
                plus: plus.to_string(),
                minus: minus.to_string(),
                ctrl_plus: ctrl_plus.to_string(),
                ctrl_minus: ctrl_minus.to_string(),
                gain,
            };

            Ok((input, source))
        }

        impl FromStr for $struct_name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let s_without_comment = s.split(['%', '*']).next().unwrap_or("").trim();
                let (_, source) = all_consuming($parse_fn)
                    .parse(s_without_comment)
                    .map_err(|e| Error::InvalidFormat(e.to_string()))?;
                Ok(source)
            }
        }
    };
}

controlled_source!(Vcvs, "E", parse_vcvs, "voltage gain of a voltage-controlled voltage source");
controlled_source!(Cccs, "F", parse_cccs, "current gain of a current-controlled current source");
controlled_source!(Vccs, "G", parse_vccs, "transconductance of a voltage-controlled current source");
controlled_source!(Ccvs, "H", parse_ccvs, "transresistance of a current-controlled voltage source");
