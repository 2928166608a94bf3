//! Running accumulators used for every grouped statistic.
//!
//! Group-by is done by keying these accumulators on the group value
//! (weekday, weekend flag, user id) and reading the means at the end.

/// Count and sum of a group, for computing its mean
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanAccumulator {
    pub count: usize,
    pub sum: f64,
}

impl MeanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
    }

    /// Mean of the pushed values, `None` for an empty group
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

impl FromIterator<f64> for MeanAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        for value in iter {
            acc.push(value);
        }
        acc
    }
}

/// Streaming Pearson correlation (Welford co-moment update)
///
/// **Public** - used for the steps/calories finding in the report
///
/// Pairs with a non-finite component are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PearsonAccumulator {
    count: usize,
    mean_x: f64,
    mean_y: f64,
    m2_x: f64,
    m2_y: f64,
    co_moment: f64,
}

impl PearsonAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }

        self.count += 1;
        let n = self.count as f64;
        let dx = x - self.mean_x;
        let dy = y - self.mean_y;
        self.mean_x += dx / n;
        self.mean_y += dy / n;
        self.m2_x += dx * (x - self.mean_x);
        self.m2_y += dy * (y - self.mean_y);
        self.co_moment += dx * (y - self.mean_y);
    }

    /// Correlation coefficient in [-1, 1]
    ///
    /// `None` with fewer than two pairs or when either side has zero variance.
    pub fn correlation(&self) -> Option<f64> {
        if self.count < 2 || self.m2_x == 0.0 || self.m2_y == 0.0 {
            return None;
        }
        let r = self.co_moment / (self.m2_x * self.m2_y).sqrt();
        Some(r.clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_accumulator() {
        let acc: MeanAccumulator = [3000.0, 8000.0].into_iter().collect();
        assert_eq!(acc.count, 2);
        assert_eq!(acc.mean(), Some(5500.0));
    }

    #[test]
    fn test_mean_accumulator_empty() {
        assert_eq!(MeanAccumulator::new().mean(), None);
    }

    #[test]
    fn test_pearson_perfect_positive() {
        let mut acc = PearsonAccumulator::new();
        for x in 1..=5 {
            acc.push(x as f64, 2.0 * x as f64 + 1.0);
        }
        let r = acc.correlation().unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_negative() {
        let mut acc = PearsonAccumulator::new();
        acc.push(1.0, 10.0);
        acc.push(2.0, 8.0);
        acc.push(3.0, 3.0);
        assert!(acc.correlation().unwrap() < -0.9);
    }

    #[test]
    fn test_pearson_degenerate() {
        let mut acc = PearsonAccumulator::new();
        acc.push(1.0, 1.0);
        assert_eq!(acc.correlation(), None);

        acc.push(1.0, 5.0);
        assert_eq!(acc.correlation(), None);
    }

    #[test]
    fn test_pearson_skips_nan() {
        let mut acc = PearsonAccumulator::new();
        acc.push(1.0, 2.0);
        acc.push(f64::NAN, 3.0);
        acc.push(2.0, 4.0);
        acc.push(3.0, 6.0);
        assert!((acc.correlation().unwrap() - 1.0).abs() < 1e-12);
    }
}
