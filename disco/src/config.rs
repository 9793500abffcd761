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

//! Validation policy, loadable from yaml.

use crate::errors::{DiscoError, DiscoResult};
use std::fs::read_to_string;
use std::path::Path;
use yaml_rust::{Yaml, YamlLoader};

/// Which exponents power mode accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExponentPolicy {
    /// Any finite, nonzero exponent.
    AnyNonZero,
    /// Integers from `min` to `max`, inclusive.
    IntegerRange { min: i32, max: i32 },
}

impl Default for ExponentPolicy {
    fn default() -> Self {
        ExponentPolicy::IntegerRange { min: 2, max: 5 }
    }
}

/// How strict request validation is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscoConfig {
    /// How far from 1 a probability vector may sum.
    pub probability_tolerance: f64,
    /// Exponents power mode accepts.
    pub exponent_policy: ExponentPolicy,
}

impl Default for DiscoConfig {
    fn default() -> Self {
        DiscoConfig {
            probability_tolerance: 1e-4,
            exponent_policy: ExponentPolicy::default(),
        }
    }
}

fn as_number(value: &Yaml) -> Option<f64> {
    value.as_f64().or_else(|| value.as_i64().map(|i| i as f64))
}

impl DiscoConfig {
    /// Reads the config from a yaml file on disk. Missing keys keep their defaults.
    ///
    /// ```yaml
    /// ---
    /// probability_tolerance: 0.0001
    /// exponent_policy: range
    /// exponent_min: 2
    /// exponent_max: 5
    /// ```
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> DiscoResult<Self> {
        let config = read_to_string(&path)?;
        DiscoConfig::from_yaml_str(&config)
    }

    /// Same as [`DiscoConfig::from_yaml`], from a string.
    pub fn from_yaml_str(config: &str) -> DiscoResult<Self> {
        let params_files = YamlLoader::load_from_str(config)?;
        match params_files.get(0) {
            Some(params) => DiscoConfig::from_yaml_doc(params),
            None => Ok(DiscoConfig::default()),
        }
    }

    /// Reads the keys this config cares about out of an already parsed document. Unknown keys
    /// are ignored, so the same file can carry settings for other layers.
    pub fn from_yaml_doc(params: &Yaml) -> DiscoResult<Self> {
        let mut config = DiscoConfig::default();

        if let Some(tolerance) = as_number(&params["probability_tolerance"]) {
            config.set_probability_tolerance(tolerance)?;
        }

        let (default_min, default_max) = match config.exponent_policy {
            ExponentPolicy::IntegerRange { min, max } => (min, max),
            ExponentPolicy::AnyNonZero => (2, 5),
        };
        let min = params["exponent_min"]
            .as_i64()
            .map(|i| i as i32)
            .unwrap_or(default_min);
        let max = params["exponent_max"]
            .as_i64()
            .map(|i| i as i32)
            .unwrap_or(default_max);
        let policy = match params["exponent_policy"].as_str().unwrap_or("range") {
            "range" => ExponentPolicy::IntegerRange { min, max },
            "any" => ExponentPolicy::AnyNonZero,
            other => {
                return Err(DiscoError::config(
                    "exponent_policy",
                    format!("expected 'range' or 'any', got '{}'", other),
                ))
            }
        };
        config.set_exponent_policy(policy)?;
        Ok(config)
    }

    /// Must be finite and positive.
    pub fn set_probability_tolerance(&mut self, x: f64) -> DiscoResult<&mut Self> {
        if !x.is_finite() || x <= 0.0 {
            return Err(DiscoError::config(
                "probability_tolerance",
                format!("must be a positive number, got {}", x),
            ));
        }
        self.probability_tolerance = x;
        Ok(self)
    }

    /// A range policy must have `min <= max`, and can not contain 0.
    pub fn set_exponent_policy(&mut self, x: ExponentPolicy) -> DiscoResult<&mut Self> {
        if let ExponentPolicy::IntegerRange { min, max } = x {
            if min > max {
                return Err(DiscoError::config(
                    "exponent_min",
                    format!("{} is larger than exponent_max {}", min, max),
                ));
            }
            if min <= 0 && 0 <= max {
                return Err(DiscoError::config(
                    "exponent_min",
                    format!("the range [{}, {}] contains 0", min, max),
                ));
            }
        }
        self.exponent_policy = x;
        Ok(self)
    }
}
