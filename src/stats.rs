//! Summary statistics.
//!
//! Decision objects keep a [`RunningStats`] per tracked quantity and
//! update it as decisions are made. [`Summary::of`] computes the same
//! snapshot from scratch with a two-pass algorithm; both must agree up to
//! floating-point rounding.

use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of a value distribution.
///
/// All fields are `0.0` for an empty distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of observations.
    pub count: usize,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl Summary {
    /// Computes a summary by scanning every value.
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return Self::default();
        }

        let count = values.len();
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Self {
            count,
            sum,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Whether two summaries agree within `epsilon` on every field.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.count == other.count
            && (self.sum - other.sum).abs() <= epsilon
            && (self.min - other.min).abs() <= epsilon
            && (self.max - other.max).abs() <= epsilon
            && (self.mean - other.mean).abs() <= epsilon
            && (self.std_dev - other.std_dev).abs() <= epsilon
    }
}

/// Incremental accumulator behind a [`Summary`].
///
/// Only supports insertion; decision objects never retract a decision
/// except through a full reset. The spread uses Welford's update, which
/// stays accurate when values are large relative to their deviation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningStats {
    count: usize,
    sum: f64,
    /// Welford mean; the reported mean is `sum / count`.
    mean: f64,
    /// Sum of squared deviations from `mean`.
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observation.
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.count += 1;
        self.sum += value;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Drops every observation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Current snapshot.
    pub fn summary(&self) -> Summary {
        if self.count == 0 {
            return Summary::default();
        }
        let n = self.count as f64;
        let variance = (self.m2 / n).max(0.0);
        Summary {
            count: self.count,
            sum: self.sum,
            min: self.min,
            max: self.max,
            mean: self.sum / n,
            std_dev: variance.sqrt(),
        }
    }
}
