use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Temperature;

/// Final statistics for one station, as handed to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub name: String,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    pub count: u64,
}

impl ResultEntry {
    pub fn new(name: String, min: Temperature, mean: Temperature, max: Temperature, count: u64) -> Self {
        Self {
            name,
            min: min.as_f64(),
            mean: mean.as_f64(),
            max: max.as_f64(),
            count,
        }
    }

    /// `name;min;mean;max` with one fractional digit per field
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ResultEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{}",
            self.name,
            FixedPoint(self.min),
            FixedPoint(self.mean),
            FixedPoint(self.max)
        )
    }
}

/// Renders a degree value through `Temperature` so binary float artifacts never show
struct FixedPoint(f64);

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Temperature::from_degrees(self.0) {
            Some(temp) => write!(f, "{}", temp),
            None => write!(f, "{:.1}", self.0),
        }
    }
}
