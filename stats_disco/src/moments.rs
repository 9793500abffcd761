/*
* Licensed to Elasticsearch B.V. under one or more contributor
* license agreements. See the NOTICE file distributed with
* this work for additional information regarding copyright
* ownership. Elasticsearch B.V. licenses this file to you under
* the Apache License, Version 2.0 (the "License"); you may
* not use this file except in compliance with the License.
* You may obtain a copy of the License at
*
*  http://www.apache.org/licenses/LICENSE-2.0
*
* Unless required by applicable law or agreed to in writing,
* software distributed under the License is distributed on an
* "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
* KIND, either express or implied.  See the License for the
* specific language governing permissions and limitations
* under the License.
*/

//! # Moment statistics
//!
//! Raw moments `E[X^k]` for `k = 1..5` are computed on a fixed rounding schedule: each
//! `values[i]^k` is rounded before it is weighted, and each sum is rounded again. The central
//! moments are then derived from the rounded raw moments with the binomial expansion identities
//! rather than recomputed from the data, so the reported numbers reproduce the same rounding
//! everywhere they are shown.
use core_disco::{round4, DECIMALS};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptive statistics of a single discrete variable. Every field is rounded to 4 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentStatistics {
    /// Name used when displaying, `X`, `Y*C` and so on.
    pub label: String,
    /// Exponent the caller associates with these statistics. Carried for display only; it never
    /// changes the moments.
    pub power: f64,
    /// Raw moments, `alpha[0] = E[X]` through `alpha[4] = E[X^5]`.
    pub alpha: [f64; 5],
    /// Central moments, `mu[0]` is the variance through `mu[3]` the fifth central moment.
    pub mu: [f64; 4],
    /// Standard deviation
    pub sigma: f64,
    /// Skewness, 0 when `sigma` is 0.
    pub skewness: f64,
    /// Excess kurtosis, 0 when `sigma` is 0.
    pub excess_kurtosis: f64,
}

impl MomentStatistics {
    /// Sets the display label.
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the carried exponent.
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// `E[X^k]` for `k` in `1..=5`.
    pub fn raw_moment(&self, k: usize) -> Option<f64> {
        if (1..=5).contains(&k) {
            Some(self.alpha[k - 1])
        } else {
            None
        }
    }

    /// `E[(X - E[X])^k]` for `k` in `2..=5`.
    pub fn central_moment(&self, k: usize) -> Option<f64> {
        if (2..=5).contains(&k) {
            Some(self.mu[k - 2])
        } else {
            None
        }
    }

    pub fn mean(&self) -> f64 {
        self.alpha[0]
    }

    pub fn variance(&self) -> f64 {
        self.mu[0]
    }

    pub fn std_dev(&self) -> f64 {
        self.sigma
    }
}

impl fmt::Display for MomentStatistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = &self.label;
        writeln!(f, "Statistics for {}", name)?;
        writeln!(f, "Mean: M({}) = {:.*}", name, DECIMALS, self.mean())?;
        writeln!(f, "Variance: D({}) = {:.*}", name, DECIMALS, self.variance())?;
        writeln!(f, "Standard deviation: {:.*}", DECIMALS, self.sigma)?;
        writeln!(f, "Raw moments:")?;
        for (k, a) in self.alpha.iter().enumerate() {
            writeln!(f, "  a{k} = M({}^{k}) = {:.*}", name, DECIMALS, a, k = k + 1)?;
        }
        writeln!(f, "Central moments:")?;
        for (k, m) in self.mu.iter().enumerate() {
            writeln!(f, "  m{} = {:.*}", k + 2, DECIMALS, m)?;
        }
        writeln!(f, "Skewness: A = {:.*}", DECIMALS, self.skewness)?;
        write!(f, "Excess kurtosis: E = {:.*}", DECIMALS, self.excess_kurtosis)
    }
}

fn raw_moment(values: &[f64], probs: &[f64], k: i32) -> f64 {
    let weighted: f64 = values
        .iter()
        .zip(probs)
        .map(|(v, p)| round4(v.powi(k)) * p)
        .sum();
    round4(weighted)
}

/// Computes raw moments 1 to 5, central moments 2 to 5, standard deviation, skewness and excess
/// kurtosis of the variable taking `values[i]` with probability `probs[i]`.
///
/// The fifth central moment uses `mu5 = a5 - 5 m a4 + 10 m^2 a3 - 10 m^3 a2 + 4 m^5`, the
/// reduced form of the binomial expansion (`5 m^5 - m^5`).
///
/// A variable whose probability mass sits on a single value (every value with a nonzero
/// probability is equal) has no spread. Its raw moments are still computed on the rounding
/// schedule, but the central moments, standard deviation, skewness and kurtosis are set to 0
/// directly, since the rounded raw moments would otherwise leave a few units of noise in the
/// last decimal.
///
/// Otherwise a negative variance from rounding is clamped to 0. A variance that rounds to 0
/// gives a standard deviation of 0, and a standard deviation of 0 zeroes skewness and kurtosis.
///
/// The result is labeled `X` with power 1; see [`MomentStatistics::with_label`].
///
/// # Panics
/// If `values` and `probs` have different lengths.
pub fn compute_statistics(values: &[f64], probs: &[f64]) -> MomentStatistics {
    assert_eq!(
        values.len(),
        probs.len(),
        "every value needs exactly one probability"
    );
    let mut alpha = [0.0; 5];
    for (k, a) in alpha.iter_mut().enumerate() {
        *a = raw_moment(values, probs, k as i32 + 1);
    }
    let mut stats = MomentStatistics {
        label: "X".to_string(),
        power: 1.0,
        alpha,
        mu: [0.0; 4],
        sigma: 0.0,
        skewness: 0.0,
        excess_kurtosis: 0.0,
    };
    if is_single_point(values, probs) {
        return stats;
    }

    let [a1, a2, a3, a4, a5] = alpha;
    let m1 = a1;
    let mut mu2 = a2 - m1.powi(2);
    let mu3 = a3 - 3.0 * m1 * a2 + 2.0 * m1.powi(3);
    let mu4 = a4 - 4.0 * m1 * a3 + 6.0 * m1.powi(2) * a2 - 3.0 * m1.powi(4);
    let mu5 = a5 - 5.0 * m1 * a4 + 10.0 * m1.powi(2) * a3 - 10.0 * m1.powi(3) * a2
        + 4.0 * m1.powi(5);

    if mu2 < 0.0 {
        debug!("Clamping negative variance {} to 0", mu2);
        mu2 = 0.0;
    }
    stats.mu = [round4(mu2), round4(mu3), round4(mu4), round4(mu5)];
    if stats.mu[0] == 0.0 {
        return stats;
    }
    let exact_sigma = mu2.sqrt();
    stats.sigma = round4(exact_sigma);
    if stats.sigma != 0.0 {
        stats.skewness = round4(mu3 / exact_sigma.powi(3));
        stats.excess_kurtosis = round4(mu4 / exact_sigma.powi(4) - 3.0);
    }
    stats
}

/// True when all of the probability sits on one value. An empty variable counts too.
fn is_single_point(values: &[f64], probs: &[f64]) -> bool {
    let mut support = values.iter().zip(probs).filter(|(_, p)| **p != 0.0);
    match support.next() {
        Some((first, _)) => support.all(|(v, _)| v == first),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn three_point_distribution() {
        let stats = compute_statistics(&[1.0, 2.0, 3.0], &[0.2, 0.5, 0.3]);
        assert_approx_eq!(stats.mean(), 2.1);
        assert_approx_eq!(stats.raw_moment(2).unwrap(), 4.9);
        assert_approx_eq!(stats.raw_moment(3).unwrap(), 12.3);
        assert_approx_eq!(stats.raw_moment(4).unwrap(), 32.5);
        assert_approx_eq!(stats.raw_moment(5).unwrap(), 89.1);
        assert_approx_eq!(stats.variance(), 0.49);
        assert_approx_eq!(stats.sigma, 0.7);
        assert_approx_eq!(stats.central_moment(3).unwrap(), -0.048);
        assert_approx_eq!(stats.central_moment(4).unwrap(), 0.4897);
        assert_approx_eq!(stats.central_moment(5).unwrap(), -0.145);
        assert_approx_eq!(stats.skewness, -0.1399);
        assert_approx_eq!(stats.excess_kurtosis, -0.9604);
    }

    #[test]
    fn fifth_central_moment_matches_direct_expansion() {
        let values = [-1.0, 0.5, 2.0, 4.0];
        let probs = [0.1, 0.4, 0.3, 0.2];
        let stats = compute_statistics(&values, &probs);
        let mean: f64 = values.iter().zip(&probs).map(|(v, p)| v * p).sum();
        let direct: f64 = values
            .iter()
            .zip(&probs)
            .map(|(v, p)| (v - mean).powi(5) * p)
            .sum();
        assert_approx_eq!(stats.central_moment(5).unwrap(), direct, 1e-3);
    }

    #[test]
    fn one_point_distribution() {
        let points = [2.5, -4.0, 0.0, 1.5, 1.2346, 1.2347, 3.1416, 0.7071, 12.3456, -98.7654];
        for v in points.iter() {
            let stats = compute_statistics(&[*v], &[1.0]);
            assert_eq!(stats.mean(), *v);
            assert_eq!(stats.mu, [0.0; 4], "spread for {}", v);
            assert_eq!(stats.sigma, 0.0, "sigma for {}", v);
            assert_eq!(stats.skewness, 0.0, "skewness for {}", v);
            assert_eq!(stats.excess_kurtosis, 0.0, "kurtosis for {}", v);
        }
    }

    #[test]
    fn single_point_with_zero_probability_neighbours() {
        let stats = compute_statistics(&[3.1416, 7.0, 3.1416], &[0.4, 0.0, 0.6]);
        assert_eq!(stats.mean(), 3.1416);
        assert_eq!(stats.mu, [0.0; 4]);
        assert_eq!(stats.sigma, 0.0);
        assert_eq!(stats.skewness, 0.0);
        assert_eq!(stats.excess_kurtosis, 0.0);
    }

    #[test]
    fn empty_variable_has_no_moments() {
        let stats = compute_statistics(&[], &[]);
        assert_eq!(stats.alpha, [0.0; 5]);
        assert_eq!(stats.mu, [0.0; 4]);
        assert_eq!(stats.sigma, 0.0);
    }

    #[test]
    fn variance_rounding_to_zero_zeroes_sigma() {
        // The spread is below the fourth decimal, so the rounded raw moments cancel.
        let stats = compute_statistics(&[1.0, 1.0001], &[0.9999, 0.0001]);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.sigma, 0.0);
        assert_eq!(stats.skewness, 0.0);
        assert_eq!(stats.excess_kurtosis, 0.0);
    }

    #[test]
    fn reported_variance_and_sigma_agree() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..200 {
            let len = rng.gen_range(1..6);
            let base: f64 = rng.gen_range(-20.0..20.0);
            let values: Vec<f64> = (0..len)
                .map(|_| round4(base + rng.gen_range(0.0..0.001)))
                .collect();
            let weights: Vec<f64> = (0..len).map(|_| rng.gen_range(0.1..1.0)).collect();
            let total: f64 = weights.iter().sum();
            let probs: Vec<f64> = weights.iter().map(|w| w / total).collect();
            let stats = compute_statistics(&values, &probs);
            assert!(stats.variance() >= 0.0);
            if stats.variance() == 0.0 {
                assert_eq!(stats.sigma, 0.0, "{:?} {:?}", values, probs);
                assert_eq!(stats.skewness, 0.0);
                assert_eq!(stats.excess_kurtosis, 0.0);
            } else {
                assert!(stats.sigma > 0.0);
            }
            assert!(stats.skewness.is_finite() && stats.excess_kurtosis.is_finite());
        }
    }

    #[test]
    fn raw_moments_round_every_power() {
        // 0.33333^k is rounded before weighting, so a1 == 0.3333 exactly.
        let stats = compute_statistics(&[0.33333, 0.33333], &[0.5, 0.5]);
        assert_eq!(stats.mean(), 0.3333);
        assert_eq!(stats.raw_moment(2), Some(0.1111));
        assert_eq!(stats.raw_moment(0), None);
        assert_eq!(stats.raw_moment(6), None);
        assert_eq!(stats.central_moment(1), None);
    }

    #[test]
    fn symmetric_distribution_has_no_skew() {
        let stats = compute_statistics(&[-1.0, 0.0, 1.0], &[0.25, 0.5, 0.25]);
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.variance(), 0.5);
        assert_eq!(stats.skewness, 0.0);
        // mu4 = 0.5, sigma^4 = 0.25
        assert_approx_eq!(stats.excess_kurtosis, -1.0);
    }

    #[test]
    fn labels_are_carried() {
        let stats = compute_statistics(&[1.0, 3.0], &[0.5, 0.5])
            .with_label("Y*C")
            .with_power(3.0);
        assert_eq!(stats.label, "Y*C");
        assert_eq!(stats.power, 3.0);
        assert_eq!(stats.mean(), 2.0);
    }

    #[test]
    fn display_lists_every_moment() {
        let stats = compute_statistics(&[1.0, 3.0], &[0.5, 0.5]);
        let shown = format!("{}", stats);
        assert!(shown.starts_with("Statistics for X\n"));
        assert!(shown.contains("Mean: M(X) = 2.0000"));
        assert!(shown.contains("Variance: D(X) = 1.0000"));
        assert!(shown.contains("  a5 = M(X^5) = 122.0000"));
        assert!(shown.contains("  m4 = 1.0000"));
        assert!(shown.ends_with("Excess kurtosis: E = -2.0000"));
    }

    #[test]
    #[should_panic]
    fn length_mismatch_panics() {
        compute_statistics(&[1.0, 2.0], &[1.0]);
    }
}
