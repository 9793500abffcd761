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

//! Runs the tables and statistics for a validated request.

use crate::config::DiscoConfig;
use crate::errors::DiscoResult;
use crate::request::{validate, AnalysisRequest, Mode, ValidatedInput};
use core_disco::NumericVector;
use log::debug;
use serde::{Deserialize, Serialize};
use stats_disco::{compute_statistics, power_vector, scale_vector, JointTables, MomentStatistics};

/// Everything computed for one request.
///
/// `x` and `y` are the vectors the tables were built from, so in scaled and power mode they
/// are the transformed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub mode: Mode,
    pub x: NumericVector,
    pub y: NumericVector,
    pub px: NumericVector,
    pub py: NumericVector,
    #[serde(flatten)]
    pub tables: JointTables,
    pub stats_x: MomentStatistics,
    pub stats_y: MomentStatistics,
}

/// Tables and statistics of X and Y as entered.
///
/// The statistics carry power 2, the value the plain calculation has always labeled them with.
/// It is a label only, the moments are those of X and Y.
pub fn analyze_pair(
    x: &NumericVector,
    y: &NumericVector,
    px: &NumericVector,
    py: &NumericVector,
) -> AnalysisResult {
    AnalysisResult {
        mode: Mode::Plain,
        tables: JointTables::new(x, y, px, py),
        stats_x: compute_statistics(x, px).with_label("X").with_power(2.0),
        stats_y: compute_statistics(y, py).with_label("Y").with_power(2.0),
        x: x.clone(),
        y: y.clone(),
        px: px.clone(),
        py: py.clone(),
    }
}

/// Scales X by `cx` and Y by `cy`, then builds tables and statistics from the scaled vectors.
pub fn analyze_scaled(
    x: &NumericVector,
    y: &NumericVector,
    px: &NumericVector,
    py: &NumericVector,
    cx: f64,
    cy: f64,
) -> AnalysisResult {
    let xs = scale_vector(x, cx);
    let ys = scale_vector(y, cy);
    debug!("Scaled X by {} to [{}], Y by {} to [{}]", cx, xs, cy, ys);
    AnalysisResult {
        mode: Mode::Scaled { cx, cy },
        tables: JointTables::new(&xs, &ys, px, py),
        stats_x: compute_statistics(&xs, px).with_label("X*C"),
        stats_y: compute_statistics(&ys, py).with_label("Y*C"),
        x: xs,
        y: ys,
        px: px.clone(),
        py: py.clone(),
    }
}

/// Raises X and Y to `exponent` for the tables.
///
/// The statistics are those of the untransformed X and Y. The exponent is only attached to
/// them as their label and `power`, it does not make them moments of `X^exponent`.
pub fn analyze_power(
    x: &NumericVector,
    y: &NumericVector,
    px: &NumericVector,
    py: &NumericVector,
    exponent: f64,
) -> AnalysisResult {
    let xp = power_vector(x, exponent);
    let yp = power_vector(y, exponent);
    debug!("Raised X to [{}], Y to [{}] with exponent {}", xp, yp, exponent);
    AnalysisResult {
        mode: Mode::Power { exponent },
        tables: JointTables::new(&xp, &yp, px, py),
        stats_x: compute_statistics(x, px)
            .with_label(format!("X (power {})", exponent))
            .with_power(exponent),
        stats_y: compute_statistics(y, py)
            .with_label(format!("Y (power {})", exponent))
            .with_power(exponent),
        x: xp,
        y: yp,
        px: px.clone(),
        py: py.clone(),
    }
}

/// Dispatches on the mode of an already validated request.
pub fn analyze(input: &ValidatedInput) -> AnalysisResult {
    let (x, y, px, py) = (input.x(), input.y(), input.px(), input.py());
    match input.mode() {
        Mode::Plain => analyze_pair(x, y, px, py),
        Mode::Scaled { cx, cy } => analyze_scaled(x, y, px, py, cx, cy),
        Mode::Power { exponent } => analyze_power(x, y, px, py, exponent),
    }
}

/// [`validate`] followed by [`analyze`].
pub fn evaluate(config: &DiscoConfig, request: &AnalysisRequest) -> DiscoResult<AnalysisResult> {
    let input = validate(config, request)?;
    debug!(
        "Analyzing {}x{} request in {:?} mode",
        input.x().len(),
        input.y().len(),
        input.mode()
    );
    Ok(analyze(&input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DiscoError;

    fn vectors() -> (NumericVector, NumericVector, NumericVector, NumericVector) {
        (
            NumericVector::from(vec![1.0, 2.0, 3.0]),
            NumericVector::from(vec![10.0, 20.0]),
            NumericVector::from(vec![0.2, 0.5, 0.3]),
            NumericVector::from(vec![0.4, 0.6]),
        )
    }

    #[test]
    fn plain_pair() {
        let (x, y, px, py) = vectors();
        let result = analyze_pair(&x, &y, &px, &py);
        assert_eq!(result.tables.sums.shape(), (3, 2));
        assert_eq!(result.tables.sums.get(0, 0), Some(11.0));
        assert_eq!(result.tables.sorted_sum.len(), 6);
        assert_approx_eq!(result.stats_x.mean(), 2.1);
        assert_approx_eq!(result.stats_x.variance(), 0.49);
        assert_approx_eq!(result.stats_x.sigma, 0.7);
        assert_approx_eq!(result.stats_y.mean(), 16.0);
        assert_eq!(result.stats_x.label, "X");
        assert_eq!(result.stats_y.label, "Y");
        assert_eq!(result.stats_x.power, 2.0);
        assert_eq!(result.stats_y.power, 2.0);
    }

    #[test]
    fn scaled_pair() {
        let (x, y, px, py) = vectors();
        let result = analyze_scaled(&x, &y, &px, &py, 2.0, 0.1);
        assert_eq!(result.x.as_slice(), &[2.0, 4.0, 6.0]);
        assert_eq!(result.y.as_slice(), &[1.0, 2.0]);
        assert_eq!(result.tables.products.get(2, 1), Some(12.0));
        assert_approx_eq!(result.stats_x.mean(), 4.2);
        assert_approx_eq!(result.stats_x.sigma, 1.4);
        assert_eq!(result.stats_x.power, 1.0);
        assert_eq!(result.stats_y.label, "Y*C");
    }

    #[test]
    fn power_tables_use_powers_but_stats_do_not() {
        let (x, y, px, py) = vectors();
        let result = analyze_power(&x, &y, &px, &py, 2.0);
        assert_eq!(result.x.as_slice(), &[1.0, 4.0, 9.0]);
        assert_eq!(result.y.as_slice(), &[100.0, 400.0]);
        assert_eq!(result.tables.sums.get(2, 1), Some(409.0));
        // E[X], not E[X^2] = 4.9
        assert_approx_eq!(result.stats_x.mean(), 2.1);
        assert_eq!(result.stats_x.power, 2.0);
        assert_eq!(result.stats_x.label, "X (power 2)");
        assert_eq!(result.stats_y.label, "Y (power 2)");
    }

    #[test]
    fn evaluate_dispatches_on_mode() {
        let request = AnalysisRequest::new("1 2", "3 4", "0.5 0.5", "0.25 0.75")
            .with_sizes(2, 2)
            .with_mode(Mode::Scaled { cx: 2.0, cy: 1.0 });
        let result = evaluate(&DiscoConfig::default(), &request).unwrap();
        assert_eq!(result.mode, Mode::Scaled { cx: 2.0, cy: 1.0 });
        assert_eq!(result.x.as_slice(), &[2.0, 4.0]);
    }

    #[test]
    fn evaluate_surfaces_validation_errors() {
        let request = AnalysisRequest::new("1 2", "3 4", "0.5 0.6", "0.25 0.75");
        match evaluate(&DiscoConfig::default(), &request) {
            Err(DiscoError::Validation(e)) => assert_eq!(e.kind(), "probability_normalization"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn result_serializes_flat() {
        let (x, y, px, py) = vectors();
        let result = analyze_pair(&x, &y, &px, &py);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mode"]["type"], "plain");
        assert_eq!(json["sums"]["cells"][0][1], 21.0);
        assert_eq!(json["sorted_product"].as_array().unwrap().len(), 6);
        assert_eq!(json["stats_x"]["label"], "X");
        let back: AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.tables.sums.shape(), (3, 2));
        assert_eq!(back.mode, Mode::Plain);
    }
}
