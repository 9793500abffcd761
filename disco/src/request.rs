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

//! Requests as they arrive from a form, and the checks that gate them.

use crate::config::{DiscoConfig, ExponentPolicy};
use crate::errors::{ExponentRejection, ValidationError, VectorName};
use core_disco::{normalize, NumericVector};
use serde::{Deserialize, Serialize};
use stats_disco::{power_vector, scale_vector};

/// Largest absolute value X or Y may hold, before or after its transform. Fifth powers of it,
/// and products of two of them, are still finite.
pub const MAX_MAGNITUDE: f64 = 1e60;

/// How X and Y are transformed before the tables are built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mode {
    /// X and Y as entered.
    Plain,
    /// `X * cx` and `Y * cy`.
    Scaled { cx: f64, cy: f64 },
    /// `X ^ exponent` and `Y ^ exponent` in the tables. Statistics stay those of X and Y.
    Power { exponent: f64 },
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Plain
    }
}

/// Raw, whitespace separated input for both variables.
///
/// The sizes are optional. When given, each value vector and its probability vector must have
/// exactly that many entries; otherwise they only have to match each other.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub size_x: Option<usize>,
    #[serde(default)]
    pub size_y: Option<usize>,
    pub x: String,
    pub y: String,
    pub px: String,
    pub py: String,
    #[serde(default)]
    pub mode: Mode,
}

impl AnalysisRequest {
    /// A plain request with no declared sizes.
    pub fn new<S: Into<String>>(x: S, y: S, px: S, py: S) -> AnalysisRequest {
        AnalysisRequest {
            size_x: None,
            size_y: None,
            x: x.into(),
            y: y.into(),
            px: px.into(),
            py: py.into(),
            mode: Mode::Plain,
        }
    }

    pub fn with_sizes(mut self, size_x: usize, size_y: usize) -> Self {
        self.size_x = Some(size_x);
        self.size_y = Some(size_y);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

/// Normalized vectors that passed every check in [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    x: NumericVector,
    y: NumericVector,
    px: NumericVector,
    py: NumericVector,
    mode: Mode,
}

impl ValidatedInput {
    pub fn x(&self) -> &NumericVector {
        &self.x
    }
    pub fn y(&self) -> &NumericVector {
        &self.y
    }
    pub fn px(&self) -> &NumericVector {
        &self.px
    }
    pub fn py(&self) -> &NumericVector {
        &self.py
    }
    pub fn mode(&self) -> Mode {
        self.mode
    }
}

fn check_length(
    vector: VectorName,
    values: &NumericVector,
    expected: usize,
) -> Result<(), ValidationError> {
    if values.len() != expected {
        return Err(ValidationError::LengthMismatch {
            vector,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

fn check_sum(
    vector: VectorName,
    probs: &NumericVector,
    tolerance: f64,
) -> Result<(), ValidationError> {
    let sum = probs.sum();
    if (sum - 1.0).abs() > tolerance {
        return Err(ValidationError::ProbabilityNormalization { vector, sum });
    }
    Ok(())
}

/// Index of the first entry that is NaN or beyond [`MAX_MAGNITUDE`].
fn first_out_of_range(values: &NumericVector) -> Option<usize> {
    values.iter().position(|v| !(v.abs() <= MAX_MAGNITUDE))
}

fn check_magnitude(vector: VectorName, values: &NumericVector) -> Result<(), ValidationError> {
    match first_out_of_range(values) {
        Some(i) => Err(ValidationError::ValueOutOfRange {
            vector,
            value: values[i],
        }),
        None => Ok(()),
    }
}

fn check_constant(
    vector: VectorName,
    constant: f64,
    values: &NumericVector,
) -> Result<(), ValidationError> {
    if !constant.is_finite() || first_out_of_range(&scale_vector(values, constant)).is_some() {
        return Err(ValidationError::InvalidConstant { vector, constant });
    }
    Ok(())
}

fn check_exponent(
    policy: ExponentPolicy,
    exponent: f64,
    x: &NumericVector,
    y: &NumericVector,
) -> Result<(), ValidationError> {
    let reject = |reason| ValidationError::InvalidExponent { exponent, reason };
    if !exponent.is_finite() {
        return Err(reject(ExponentRejection::NotFinite));
    }
    if exponent == 0.0 {
        return Err(reject(ExponentRejection::Zero));
    }
    if let ExponentPolicy::IntegerRange { min, max } = policy {
        if exponent.fract() != 0.0 || exponent < min as f64 || exponent > max as f64 {
            return Err(reject(ExponentRejection::OutOfRange { min, max }));
        }
    }
    if exponent.fract() != 0.0 {
        if let Some(v) = x.iter().chain(y.iter()).find(|v| **v < 0.0) {
            return Err(reject(ExponentRejection::NegativeBase(*v)));
        }
    }
    if exponent < 0.0 && x.iter().chain(y.iter()).any(|v| *v == 0.0) {
        return Err(reject(ExponentRejection::ZeroBase));
    }
    for values in [x, y].iter() {
        if let Some(i) = first_out_of_range(&power_vector(values, exponent)) {
            return Err(reject(ExponentRejection::Overflow(values[i])));
        }
    }
    Ok(())
}

/// Normalizes the four input strings and checks them, in order: lengths of X, P_X, Y, P_Y, then
/// the sums of P_X and P_Y, then the magnitudes of X and Y, then the parameters of the mode.
/// The first failure is returned.
///
/// Every vector that reaches the tables or the moments of an accepted request is within
/// [`MAX_MAGNITUDE`], so the analysis never sees an infinity or a NaN.
pub fn validate(
    config: &DiscoConfig,
    request: &AnalysisRequest,
) -> Result<ValidatedInput, ValidationError> {
    let x = normalize(&request.x);
    let y = normalize(&request.y);
    let px = normalize(&request.px);
    let py = normalize(&request.py);

    let size_x = request.size_x.unwrap_or_else(|| x.len());
    let size_y = request.size_y.unwrap_or_else(|| y.len());
    check_length(VectorName::X, &x, size_x)?;
    check_length(VectorName::PX, &px, size_x)?;
    check_length(VectorName::Y, &y, size_y)?;
    check_length(VectorName::PY, &py, size_y)?;

    check_sum(VectorName::PX, &px, config.probability_tolerance)?;
    check_sum(VectorName::PY, &py, config.probability_tolerance)?;

    check_magnitude(VectorName::X, &x)?;
    check_magnitude(VectorName::Y, &y)?;

    match request.mode {
        Mode::Plain => {}
        Mode::Scaled { cx, cy } => {
            check_constant(VectorName::X, cx, &x)?;
            check_constant(VectorName::Y, cy, &y)?;
        }
        Mode::Power { exponent } => check_exponent(config.exponent_policy, exponent, &x, &y)?,
    }

    Ok(ValidatedInput {
        x,
        y,
        px,
        py,
        mode: request.mode,
    })
}
