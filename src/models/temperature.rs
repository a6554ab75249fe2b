use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::constants::{MAX_TEMPERATURE_TENTHS, MIN_TEMPERATURE_TENTHS};

/// Temperature in tenths of a degree Celsius.
///
/// Measurements are kept as integers from parsing through aggregation so that
/// sums are exact; conversion to `f64` only happens when results are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Temperature(i16);

impl Temperature {
    pub const MIN: Temperature = Temperature(MIN_TEMPERATURE_TENTHS);
    pub const MAX: Temperature = Temperature(MAX_TEMPERATURE_TENTHS);

    /// Returns `None` outside [-99.9, 99.9]
    pub fn from_tenths(tenths: i16) -> Option<Self> {
        if (MIN_TEMPERATURE_TENTHS..=MAX_TEMPERATURE_TENTHS).contains(&tenths) {
            Some(Self(tenths))
        } else {
            None
        }
    }

    /// Nearest temperature to a value in degrees, `None` if out of range or not finite
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }
        let tenths = (degrees * 10.0).round();
        if tenths < MIN_TEMPERATURE_TENTHS as f64 || tenths > MAX_TEMPERATURE_TENTHS as f64 {
            return None;
        }
        Some(Self(tenths as i16))
    }

    pub fn tenths(self) -> i16 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl fmt::Display for Temperature {
    /// Fixed-point rendering with exactly one fractional digit
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tenths = self.0 as i32;
        let sign = if tenths < 0 { "-" } else { "" };
        let magnitude = tenths.unsigned_abs();
        write!(f, "{}{}.{}", sign, magnitude / 10, magnitude % 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_limits() {
        assert_eq!(Temperature::from_tenths(999), Some(Temperature::MAX));
        assert_eq!(Temperature::from_tenths(-999), Some(Temperature::MIN));
        assert!(Temperature::from_tenths(1000).is_none());
        assert!(Temperature::from_tenths(-1000).is_none());
    }

    #[test]
    fn test_fixed_point_display() {
        let render = |tenths| Temperature::from_tenths(tenths).unwrap().to_string();

        assert_eq!(render(89), "8.9");
        assert_eq!(render(0), "0.0");
        assert_eq!(render(-5), "-0.5");
        assert_eq!(render(-999), "-99.9");
        assert_eq!(render(999), "99.9");
        assert_eq!(render(120), "12.0");
    }

    #[test]
    fn test_from_degrees() {
        assert_eq!(Temperature::from_degrees(8.9).unwrap().tenths(), 89);
        assert_eq!(Temperature::from_degrees(-18.3).unwrap().tenths(), -183);
        assert_eq!(Temperature::from_degrees(0.1 + 0.2).unwrap().tenths(), 3);
        assert!(Temperature::from_degrees(100.0).is_none());
        assert!(Temperature::from_degrees(f64::NAN).is_none());
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Temperature::from_tenths(-183).unwrap().as_f64(), -18.3);
    }
}
