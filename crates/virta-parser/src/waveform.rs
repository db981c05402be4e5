use crate::prelude::*;
use nom::branch::alt;
use std::f64::consts::PI;

/// Time-dependent value of an independent source.
///
/// Evaluation is a pure function of the waveform parameters, the simulation
/// time and the current integration step (the step only matters for PULSE
/// edges declared with zero rise or fall time).
#[derive(Debug, Clone, PartialEq)]
pub enum Waveform {
    /// Constant level.
    Dc { level: f64 },
    /// Damped sinusoid, held at its last value once `cycles` are exhausted.
    Sin {
        offset: f64,
        amplitude: f64,
        frequency: f64,
        delay: f64,
        damping: f64,
        phase_deg: f64,
        cycles: f64,
    },
    /// Periodic trapezoidal pulse train.
    Pulse {
        v1: f64,
        v2: f64,
        delay: f64,
        rise_time: f64,
        fall_time: f64,
        on_time: f64,
        period: f64,
        cycles: f64,
    },
}

impl Waveform {
    /// Instantaneous value at `time`, with `time_step` substituted for
    /// degenerate zero-length pulse edges.
    pub fn value_at(&self, time: f64, time_step: f64) -> f64 {
        match *self {
            Waveform::Dc { level } => level,
            Waveform::Sin {
                offset,
                amplitude,
                frequency,
                delay,
                damping,
                phase_deg,
                cycles,
            } => {
                let phase = PI * phase_deg / 180.0;
                if time < delay {
                    return offset + amplitude * phase.sin();
                }
                // Past the last cycle the source holds the value it had there.
                let t_end = delay + cycles / frequency;
                let t = time.min(t_end);
                offset
                    + amplitude
                        * (-damping * (t - delay)).exp()
                        * (2.0 * PI * frequency * (t - delay) + phase).sin()
            }
            Waveform::Pulse {
                v1,
                v2,
                delay,
                rise_time,
                fall_time,
                on_time,
                period,
                cycles,
            } => {
                let rise = if rise_time > 0.0 { rise_time } else { time_step };
                let fall = if fall_time > 0.0 { fall_time } else { time_step };

                if time < delay {
                    return v1;
                }
                if cycles > 0.0 && time >= delay + cycles * period {
                    return v1;
                }

                let tau = (time - delay) % period;
                if tau < rise {
                    v1 + (v2 - v1) * tau / rise
                } else if tau < rise + on_time {
                    v2
                } else if tau < rise + on_time + fall {
                    v2 + (v1 - v2) * (tau - rise - on_time) / fall
                } else {
                    v1
                }
            }
        }
    }
}

/// Parses a whitespace-separated waveform specification:
/// `DC level`, `SIN offset amp freq delay damping phase cycles` or
/// `PULSE v1 v2 delay t_rise t_fall t_on period cycles`.
pub fn parse_waveform(input: &str) -> IResult<&str, Waveform> {
    alt((parse_sin, parse_pulse, parse_dc)).parse(input)
}

fn parse_dc(input: &str) -> IResult<&str, Waveform> {
    let (input, _) = tag_no_case("DC").parse(input)?;
    let (input, level) = preceded(space1, value_parser).parse(input)?;
    Ok((input, Waveform::Dc { level }))
}

fn parse_sin(input: &str) -> IResult<&str, Waveform> {
    let (input, _) = tag_no_case("SIN").parse(input)?;
    let (input, (offset, amplitude, frequency, delay, damping, phase_deg, cycles)) = (
        preceded(space1, value_parser),
        preceded(space1, value_parser),
        preceded(space1, value_parser),
        preceded(space1, value_parser),
        preceded(space1, value_parser),
        preceded(space1, value_parser),
        preceded(space1, value_parser),
    )
        .parse(input)?;

    Ok((
        input,
        Waveform::Sin {
            offset,
            amplitude,
            frequency,
            delay,
            damping,
            phase_deg,
            cycles,
        },
    ))
}

fn parse_pulse(input: &str) -> IResult<&str, Waveform> {
    let (input, _) = tag_no_case("PULSE").parse(input)?;
    let (input, (v1, v2, delay, rise_time, fall_time, on_time, period, cycles)) = (
        preceded(space1, value_parser),
        preceded(space1, value_parser),
        preceded(space1, value_parser),
        preceded(space1, value_parser),
        preceded(space1, value_parser),
        preceded(space1, value_parser),
        preceded(space1, value_parser),
        preceded(space1, value_parser),
    )
        .parse(input)?;

    Ok((
        input,
        Waveform::Pulse {
            v1,
            v2,
            delay,
            rise_time,
            fall_time,
            on_time,
            period,
            cycles,
        },
    ))
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Waveform::Dc { level } => write!(f, "DC {level}"),
            Waveform::Sin {
                offset,
                amplitude,
                frequency,
                delay,
                damping,
                phase_deg,
                cycles,
            } => write!(
                f,
                "SIN {offset} {amplitude} {frequency} {delay} {damping} {phase_deg} {cycles}"
            ),
            Waveform::Pulse {
                v1,
                v2,
                delay,
                rise_time,
                fall_time,
                on_time,
                period,
                cycles,
            } => write!(
                f,
                "PULSE {v1} {v2} {delay} {rise_time} {fall_time} {on_time} {period} {cycles}"
            ),
        }
    }
}
