//! Simple Moving Average (SMA).
//!
//! Rolling mean over a trailing window of `period` observations.
//! Lookback: period - 1 (first defined value at index period-1).
//! Undefined positions are NaN, including any window that contains a NaN.

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    /// Rolling mean aligned by index with `values`.
    pub fn compute(&self, values: &[f64]) -> Vec<f64> {
        let n = values.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        let mut sum = 0.0;
        let mut nan_in_window = false;
        let mut non_finite_in_window = false;
        for &v in values.iter().take(self.period) {
            nan_in_window |= v.is_nan();
            non_finite_in_window |= !v.is_finite();
            sum += v;
        }

        if !nan_in_window {
            result[self.period - 1] = sum / self.period as f64;
        }

        for i in self.period..n {
            let leaving = values[i - self.period];
            let entering = values[i];
            sum = sum - leaving + entering;

            // A non-finite value poisons the running sum; rescan the window until it has left.
            if !entering.is_finite() || !leaving.is_finite() || non_finite_in_window {
                nan_in_window = false;
                non_finite_in_window = false;
                sum = 0.0;
                for &v in &values[(i + 1 - self.period)..=i] {
                    nan_in_window |= v.is_nan();
                    non_finite_in_window |= !v.is_finite();
                    sum += v;
                }
                if nan_in_window {
                    continue;
                }
            }

            result[i] = sum / self.period as f64;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_5_basic() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0];
        let result = Sma::new(5).compute(&values);

        assert_eq!(result.len(), 7);
        for (i, v) in result.iter().enumerate().take(4) {
            assert!(v.is_nan(), "expected NaN at index {i}");
        }
        // SMA[4] = mean(10,11,12,13,14) = 12.0
        assert_approx(result[4], 12.0, DEFAULT_EPSILON);
        assert_approx(result[5], 13.0, DEFAULT_EPSILON);
        assert_approx(result[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_identity() {
        let result = Sma::new(1).compute(&[100.0, 200.0, 300.0]);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 200.0, DEFAULT_EPSILON);
        assert_approx(result[2], 300.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_nan_propagation() {
        let values = [10.0, 11.0, f64::NAN, 13.0, 14.0, 15.0];
        let result = Sma::new(3).compute(&values);
        // Index 2 window [10,11,NaN] → NaN
        assert!(result[2].is_nan());
        // Index 3 window [11,NaN,13] → NaN
        assert!(result[3].is_nan());
        // Index 4 window [NaN,13,14] → NaN
        assert!(result[4].is_nan());
        // Index 5 window [13,14,15] → 14.0
        assert_approx(result[5], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_recovers_after_infinity_leaves() {
        let values = [1.0, f64::INFINITY, 2.0, 3.0, 4.0];
        let result = Sma::new(2).compute(&values);
        assert_eq!(result[1], f64::INFINITY);
        assert_eq!(result[2], f64::INFINITY);
        // inf - inf would leave NaN in a running sum
        assert_approx(result[3], 2.5, DEFAULT_EPSILON);
        assert_approx(result[4], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_opposite_infinities_are_undefined() {
        let values = [f64::INFINITY, f64::NEG_INFINITY, 5.0, 7.0];
        let result = Sma::new(2).compute(&values);
        assert!(result[1].is_nan());
        assert_eq!(result[2], f64::NEG_INFINITY);
        assert_approx(result[3], 6.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_lookback() {
        assert_eq!(Sma::new(20).lookback(), 19);
        assert_eq!(Sma::new(1).lookback(), 0);
    }

    #[test]
    fn sma_too_few_values() {
        let result = Sma::new(5).compute(&[10.0, 11.0]);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn sma_window_equal_to_length() {
        let result = Sma::new(4).compute(&[1.0, 2.0, 3.0, 4.0]);
        assert!(result[..3].iter().all(|v| v.is_nan()));
        assert_approx(result[3], 2.5, DEFAULT_EPSILON);
    }

    #[test]
    #[should_panic(expected = "SMA period must be >= 1")]
    fn sma_zero_period_panics() {
        Sma::new(0);
    }
}
