//! Signal decoding helpers
//!
//! Pure per-field transforms shared by every topology. Only the signal names
//! differ between networks; the arithmetic is the same.
//!
//! Units follow the source convention: wheel speeds are converted to m/s and
//! yaw rate to rad/s, while steering angle and rate stay in degrees and
//! degrees per second.

/// km/h to m/s
pub const KPH_TO_MS: f64 = 1.0 / 3.6;

/// Degrees to radians
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Raw accelerator pedal value per unit of pedal travel
pub const GAS_SCALE: f64 = 100.0;

/// Raw brake pressure per unit of brake fraction
pub const BRAKE_SCALE: f64 = 250.0;

/// Recombine a magnitude with its separately transmitted sign flag
///
/// A sign of 0 keeps the magnitude, any other value negates it.
pub fn apply_sign(magnitude: f64, sign: f64) -> f64 {
    if sign == 0.0 {
        magnitude
    } else {
        -magnitude
    }
}

pub fn kph_to_ms(kph: f64) -> f64 {
    kph * KPH_TO_MS
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * DEG_TO_RAD
}

/// Accelerator pedal position as a fraction (not clamped)
pub fn gas_fraction(raw: f64) -> f64 {
    raw / GAS_SCALE
}

/// Brake pressure as a fraction (not clamped)
pub fn brake_fraction(raw: f64) -> f64 {
    raw / BRAKE_SCALE
}

/// Arithmetic mean, zero for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Integer code carried by an enumerated signal
///
/// Returns `None` for values that are not whole numbers.
pub fn as_code(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_law() {
        for magnitude in [0.0, 0.5, 12.25, 540.0] {
            assert_eq!(apply_sign(magnitude, 0.0), magnitude);
            assert_eq!(apply_sign(magnitude, 1.0), -magnitude);
        }
    }

    #[test]
    fn test_unit_conversions() {
        assert!((kph_to_ms(36.0) - 10.0).abs() < 1e-12);
        assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_fractions_are_not_clamped() {
        assert_eq!(gas_fraction(50.0), 0.5);
        assert_eq!(gas_fraction(150.0), 1.5);
        assert_eq!(brake_fraction(125.0), 0.5);
        assert_eq!(brake_fraction(500.0), 2.0);
        assert_eq!(brake_fraction(-25.0), -0.1);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), 3.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_as_code() {
        assert_eq!(as_code(3.0), Some(3));
        assert_eq!(as_code(-1.0), Some(-1));
        assert_eq!(as_code(3.5), None);
        assert_eq!(as_code(f64::NAN), None);
    }
}
