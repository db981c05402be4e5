/// Diode saturation current in amperes.
pub const SATURATION_CURRENT: f64 = 3.7751345e-14;
/// Thermal voltage in volts.
pub const THERMAL_VOLTAGE: f64 = 25e-3;
/// Forward-voltage ceiling applied before the diode exponential to keep it
/// from overflowing.
pub const DIODE_VOLTAGE_LIMIT: f64 = 0.9;
