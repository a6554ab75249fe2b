use crate::models::Temperature;

/// Running aggregate for one station.
///
/// Only created from an observed value, so `count` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accumulator {
    pub min: Temperature,
    pub max: Temperature,
    pub sum: i64,
    pub count: u64,
}

impl Accumulator {
    pub fn new(value: Temperature) -> Self {
        Self {
            min: value,
            max: value,
            sum: value.tenths() as i64,
            count: 1,
        }
    }

    #[inline]
    pub fn record(&mut self, value: Temperature) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value.tenths() as i64;
        self.count += 1;
    }

    pub fn merge(&mut self, other: &Accumulator) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Mean rounded to one decimal, ties toward positive infinity.
    ///
    /// Computed as `floor((2 * sum + count) / (2 * count))` on integers, so
    /// 18.35 becomes 18.4 and -18.35 becomes -18.3.
    pub fn mean(&self) -> Temperature {
        let sum = self.sum as i128;
        let count = self.count as i128;
        let tenths = (2 * sum + count).div_euclid(2 * count);

        // A mean always lies between min and max
        Temperature::from_tenths(tenths as i16).unwrap_or(if tenths < 0 {
            Temperature::MIN
        } else {
            Temperature::MAX
        })
    }
}
