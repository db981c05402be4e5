use crate::prelude::*;
use nom::branch::alt;

/// Channel polarity of a MOSFET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    N,
    P,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::N => write!(f, "N"),
            Channel::P => write!(f, "P"),
        }
    }
}

#[derive(Debug, Clone)]
/// Level-1 MOSFET with channel-length modulation.
///
/// Nonlinear three-terminal device. Each Newton iteration it is linearized
/// into a transconductance, an output conductance and an equivalent drain
/// current source around the guessed terminal voltages.
pub struct Mosfet {
    /// Name of the transistor.
    pub name: String,
    /// Drain node.
    pub drain: String,
    /// Gate node.
    pub gate: String,
    /// Source node.
    pub source: String,
    /// Channel polarity.
    pub channel: Channel,
    /// Channel width in meters.
    pub width: f64,
    /// Channel length in meters.
    pub length: f64,
    /// Channel-length modulation coefficient (1/V).
    pub lambda: f64,
    /// Process transconductance K (A/V^2).
    pub k: f64,
    /// Threshold voltage in volts.
    pub vth: f64,
}

/// Linearized companion model of a MOSFET for one Newton iteration.
///
/// All quantities live in the polarity-adjusted frame: `swapped` records
/// whether drain and source exchanged roles for this evaluation, and
/// `source_current` is the equivalent current injected from the (effective)
/// drain to the (effective) source with the independent-source convention.
#[derive(Debug, Clone, Copy)]
pub struct MosfetCompanion {
    pub gm: f64,
    pub gds: f64,
    pub source_current: f64,
    pub swapped: bool,
}

impl Identifiable for Mosfet {
    fn identifier(&self) -> String {
        format!("M{}", self.name)
    }
}

impl Mosfet {
    /// Gain constant `beta = K * W / L`.
    pub fn beta(&self) -> f64 {
        self.k * self.width / self.length
    }

    /// Linearizes the device around the guessed terminal voltages
    /// `(vd, vg, vs)`. On the very first Newton iteration of a run the
    /// gate-source voltage is not read from the guess but seeded at a fixed
    /// bias: +2 V for an n-channel device, -2 V for a p-channel one.
    pub fn companion(&self, vd: f64, vg: f64, vs: f64, seed_bias: bool) -> MosfetCompanion {
        // Exchange drain and source when the applied polarity is reversed;
        // the level-1 equations assume vds >= 0 (N) / vsd >= 0 (P).
        let swapped = match self.channel {
            Channel::N => vd < vs,
            Channel::P => vd > vs,
        };
        let (vd, vs) = if swapped { (vs, vd) } else { (vd, vs) };

        let vgs = if seed_bias {
            match self.channel {
                Channel::N => 2.0,
                Channel::P => -2.0,
            }
        } else {
            match self.channel {
                Channel::N => vg - vs,
                Channel::P => vs - vg,
            }
        };
        let vds = match self.channel {
            Channel::N => vd - vs,
            Channel::P => vs - vd,
        };

        let vth = match self.channel {
            Channel::N => self.vth,
            Channel::P => self.vth.abs(),
        };
        let beta = self.beta();
        let vov = vgs - vth;
        let klambda = 1.0 + self.lambda * vds;

        let (id, gm, gds) = if vgs <= vth {
            // Cut-off.
            (0.0, 0.0, 0.0)
        } else if vds > vov {
            // Saturation.
            (
                beta * vov * vov * klambda,
                2.0 * beta * vov * klambda,
                beta * vov * vov * self.lambda,
            )
        } else {
            // Triode.
            (
                beta * (2.0 * vov * vds - vds * vds) * klambda,
                2.0 * beta * vds * klambda,
                beta * (2.0 * vov - 2.0 * vds + 4.0 * self.lambda * vov * vds
                    - 3.0 * self.lambda * vds * vds),
            )
        };

        let i_eq = id - gm * vgs - gds * vds;
        let source_current = match self.channel {
            Channel::N => i_eq,
            Channel::P => -i_eq,
        };

        MosfetCompanion {
            gm,
            gds,
            source_current,
            swapped,
        }
    }
}

impl fmt::Display for Mosfet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M{} {} {} {} {} {} {} {} {} {}",
            self.name,
            self.drain,
            self.gate,
            self.source,
            self.channel,
            self.width,
            self.length,
            self.lambda,
            self.k,
            self.vth,
        )
    }
}

fn parse_channel(input: &str) -> IResult<&str, Channel> {
    alt((
        nom::combinator::value(Channel::N, tag_no_case("N")),
        nom::combinator::value(Channel::P, tag_no_case("P")),
    ))
    .parse(input)
}

pub fn parse_mosfet(input: &str) -> IResult<&str, Mosfet> {
    let (input, _) = tag_no_case("M").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, drain) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, gate) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, source) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, channel) = preceded(space1, parse_channel).parse(input)?;
    let (input, width) = preceded(space1, value_parser).parse(input)?;
    let (input, length) = preceded(space1, value_parser).parse(input)?;
    let (input, lambda) = preceded(space1, value_parser).parse(input)?;
    let (input, k) = preceded(space1, value_parser).parse(input)?;
    let (input, vth) = preceded(space1, value_parser).parse(input)?;

    let mosfet = Mosfet {
        name: name.to_string(),
        drain: drain.to_string(),
        gate: gate.to_string(),
        source: source.to_string(),
        channel,
        width,
        length,
        lambda,
        k,
        vth,
    };

    Ok((input, mosfet))
}

impl FromStr for Mosfet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split(['%', '*']).next().unwrap_or("").trim();
        let (_, mosfet) = all_consuming(parse_mosfet)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(mosfet)
    }
}
