//! Descriptive statistics of each metric across the participants.
//!
//! For every centrality-family metric: count, mean, sample standard
//! deviation (`n − 1` denominator), min, median, max, coefficient of
//! variation, Gini coefficient, skewness, excess kurtosis and the lower and
//! upper quartiles.
//!
//! Skewness is the adjusted Fisher–Pearson `G1` and kurtosis the
//! bias-corrected excess `G2`, both over central moment sums `S_k = Σ dᵏ`:
//!
//! ```text
//! G1 = √(n(n−1)) / (n−2) · (S3/n) / (S2/n)^1.5                  n ≥ 3
//! G2 = n(n+1)(n−1) S4 / ((n−2)(n−3) S2²) − 3(n−1)² / ((n−2)(n−3))   n ≥ 4
//! ```
//!
//! Both are 0 below their minimum sample size or when every value is equal.
//! Quartiles interpolate linearly between the two closest order statistics.
//!
//! The Gini coefficient is computed on values shifted so the minimum is 0,
//! which keeps it defined for any range:
//!
//! ```text
//! G = 2 Σ i·x(i) / (n Σ x) − (n + 1) / n      x sorted ascending, i = 1..n
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::metrics::{Metric, node_stats::NodeStatsRow, round_to};

/// Summary of one metric's distribution, rounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Descriptives {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
    pub cv: f64,
    pub gini: f64,
    pub skew: f64,
    pub kurtosis: f64,
    pub p25: f64,
    pub p75: f64,
}

impl Descriptives {
    /// Describe a sample. An empty sample yields all zeros.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n_f64 = n as f64;
        let mean = sorted.iter().sum::<f64>() / n_f64;
        let std = if n < 2 {
            0.0
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n_f64 - 1.0)).sqrt()
        };
        let median = quantile(&sorted, 0.5);
        let cv = if mean.abs() < f64::EPSILON { 0.0 } else { std / mean };

        Self {
            count: n,
            mean,
            std,
            min: sorted[0],
            median,
            max: sorted[n - 1],
            cv,
            gini: gini(&sorted),
            skew: skew(&sorted, mean),
            kurtosis: kurtosis(&sorted, mean),
            p25: quantile(&sorted, 0.25),
            p75: quantile(&sorted, 0.75),
        }
    }

    /// Copy with every float rounded to `precision` places.
    #[must_use]
    pub fn rounded(self, precision: u32) -> Self {
        Self {
            count: self.count,
            mean: round_to(self.mean, precision),
            std: round_to(self.std, precision),
            min: round_to(self.min, precision),
            median: round_to(self.median, precision),
            max: round_to(self.max, precision),
            cv: round_to(self.cv, precision),
            gini: round_to(self.gini, precision),
            skew: round_to(self.skew, precision),
            kurtosis: round_to(self.kurtosis, precision),
            p25: round_to(self.p25, precision),
            p75: round_to(self.p75, precision),
        }
    }
}

/// Gini coefficient of an ascending-sorted sample, shifted to start at 0.
#[allow(clippy::cast_precision_loss)]
fn gini(sorted: &[f64]) -> f64 {
    let Some(&min) = sorted.first() else {
        return 0.0;
    };
    let n = sorted.len() as f64;
    let total: f64 = sorted.iter().map(|v| v - min).sum();
    if total.abs() < f64::EPSILON {
        return 0.0;
    }
    let weighted: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, v)| (i + 1) as f64 * (v - min))
        .sum();
    (2.0 * weighted) / (n * total) - (n + 1.0) / n
}

/// The `q`-quantile of an ascending-sorted sample, interpolating linearly
/// between neighbouring values. An empty sample yields 0.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return 0.0;
    };
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - pos.floor();
    (sorted[hi] - sorted[lo]).mul_add(frac, sorted[lo])
}

/// Sum of `(x − mean)^k` over the sample.
fn moment_sum(values: &[f64], mean: f64, k: i32) -> f64 {
    values.iter().map(|v| (v - mean).powi(k)).sum()
}

#[allow(clippy::cast_precision_loss)]
fn skew(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;
    if values.len() < 3 {
        return 0.0;
    }
    let m2 = moment_sum(values, mean, 2) / n;
    if m2 <= f64::EPSILON {
        return 0.0;
    }
    let m3 = moment_sum(values, mean, 3) / n;
    (n * (n - 1.0)).sqrt() / (n - 2.0) * m3 / m2.powf(1.5)
}

#[allow(clippy::cast_precision_loss)]
fn kurtosis(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;
    if values.len() < 4 {
        return 0.0;
    }
    let s2 = moment_sum(values, mean, 2);
    if s2 <= f64::EPSILON {
        return 0.0;
    }
    let s4 = moment_sum(values, mean, 4);
    let denom = (n - 2.0) * (n - 3.0);
    n * (n + 1.0) * (n - 1.0) * s4 / (denom * s2 * s2) - 3.0 * (n - 1.0).powi(2) / denom
}

/// Descriptives of every metric over a node table.
#[must_use]
pub fn describe(
    rows: &BTreeMap<String, NodeStatsRow>,
    precision: u32,
) -> BTreeMap<Metric, Descriptives> {
    Metric::ALL
        .iter()
        .map(|&metric| {
            let values: Vec<f64> = rows.values().map(|row| row.value(metric)).collect();
            (metric, Descriptives::from_values(&values).rounded(precision))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_sample() {
        let d = Descriptives::from_values(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(d.count, 4);
        assert!((d.mean - 2.5).abs() < 1e-12);
        assert!((d.median - 2.5).abs() < 1e-12);
        assert!((d.min - 1.0).abs() < 1e-12);
        assert!((d.max - 4.0).abs() < 1e-12);
        // Sample variance = 5 / 3.
        assert!((d.std - (5.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((d.cv - d.std / 2.5).abs() < 1e-12);
    }

    #[test]
    fn symmetric_sample_shape() {
        // [1, 2, 3, 4]: no skew, G2 = 615 / 50 − 13.5 = −1.2
        let d = Descriptives::from_values(&[4.0, 1.0, 3.0, 2.0]);
        assert!(d.skew.abs() < 1e-12);
        assert!((d.kurtosis + 1.2).abs() < 1e-12, "kurtosis = {}", d.kurtosis);
        assert!((d.p25 - 1.75).abs() < 1e-12);
        assert!((d.p75 - 3.25).abs() < 1e-12);
    }

    #[test]
    fn right_tailed_sample_shape() {
        // [1, 2, 3, 4, 10]: mean 4, deviations −3 −2 −1 0 6,
        // S2 = 50, S3 = 180, S4 = 1394.
        // G1 = √20 / 3 · 36 / 10^1.5 = 12 / √50
        // G2 = 5·6·4·1394 / (3·2·2500) − 3·16 / 6 = 11.152 − 8
        let d = Descriptives::from_values(&[10.0, 1.0, 2.0, 3.0, 4.0]);
        assert!((d.skew - 12.0 / 50.0_f64.sqrt()).abs() < 1e-12, "skew = {}", d.skew);
        assert!((d.kurtosis - 3.152).abs() < 1e-12, "kurtosis = {}", d.kurtosis);
        assert!((d.p25 - 2.0).abs() < 1e-12);
        assert!((d.p75 - 4.0).abs() < 1e-12);
    }

    #[test]
    fn shape_needs_enough_values() {
        let d = Descriptives::from_values(&[1.0, 5.0]);
        assert!((d.skew - 0.0).abs() < f64::EPSILON);
        assert!((d.kurtosis - 0.0).abs() < f64::EPSILON);
        let d = Descriptives::from_values(&[1.0, 2.0, 6.0]);
        assert!(d.skew > 0.0);
        assert!((d.kurtosis - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn quantile_interpolates() {
        let sorted = [1.0, 2.0, 4.0, 8.0];
        assert!((quantile(&sorted, 0.0) - 1.0).abs() < 1e-12);
        assert!((quantile(&sorted, 0.5) - 3.0).abs() < 1e-12);
        assert!((quantile(&sorted, 1.0) - 8.0).abs() < 1e-12);
        assert!((quantile(&sorted, 0.05) - 1.15).abs() < 1e-12);
        assert!((quantile(&[], 0.5) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn odd_median() {
        let d = Descriptives::from_values(&[5.0, 1.0, 3.0]);
        assert!((d.median - 3.0).abs() < 1e-12);
    }

    #[test]
    fn equal_values_have_zero_gini_and_std() {
        let d = Descriptives::from_values(&[0.5, 0.5, 0.5]);
        assert!((d.gini - 0.0).abs() < 1e-12);
        assert!((d.std - 0.0).abs() < 1e-12);
    }

    #[test]
    fn maximal_inequality() {
        // Shifted to [0, 0, 0, 1]: G = 2·4 / 4 − 5/4 = 0.75
        let d = Descriptives::from_values(&[0.0, 0.0, 0.0, 1.0]);
        assert!((d.gini - 0.75).abs() < 1e-12, "gini = {}", d.gini);
    }

    #[test]
    fn zero_mean_has_zero_cv() {
        let d = Descriptives::from_values(&[0.0, 0.0]);
        assert!((d.cv - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_value_has_zero_std() {
        let d = Descriptives::from_values(&[0.7]);
        assert_eq!(d.count, 1);
        assert!((d.std - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_sample_is_zeroed() {
        assert_eq!(Descriptives::from_values(&[]), Descriptives::default());
    }
}
