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

//! # Disco
//! Distribution algebra for two independent discrete random variables. Enter values and
//! probabilities for X and Y as whitespace separated text and get back the `X+Y`, `X-Y` and
//! `X*Y` tables, the joint probability table, each of those flattened into a sorted
//! distribution, and the raw moments, central moments, standard deviation, skewness and excess
//! kurtosis of X and Y.
//!
//! ## Request modes
//! A request is either plain, scaled, or raised to a power. Scaling multiplies X and Y by
//! constants before anything else is computed. Power mode raises X and Y to an exponent for the
//! tables only: the statistics reported in power mode are those of the untransformed X and Y,
//! with the exponent attached as a label.
//!
//! ## Rounding
//! Every number is kept at 4 decimal places, and rounding happens at each step rather than only
//! at the end. Raw moments round each `x^k` before weighting it. Results will not match a
//! computation that only rounds the final answer.
//!
//! ```
//! use disco::{evaluate, AnalysisRequest, DiscoConfig};
//!
//! let request = AnalysisRequest::new("1 2 3", "10 20", "0.2 0.5 0.3", "0.4 0.6").with_sizes(3, 2);
//! let result = evaluate(&DiscoConfig::default(), &request).unwrap();
//! assert_eq!(result.tables.sums.get(0, 0), Some(11.0));
//! assert_eq!(result.stats_x.sigma, 0.7);
//! ```

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

pub mod errors;
pub use errors::{DiscoError, DiscoResult, ValidationError};

mod analysis;
mod config;
mod request;

pub use analysis::{analyze, analyze_pair, analyze_power, analyze_scaled, evaluate, AnalysisResult};
pub use config::{DiscoConfig, ExponentPolicy};
pub use request::{validate, AnalysisRequest, Mode, ValidatedInput, MAX_MAGNITUDE};

pub use core_disco::{normalize, round4, CombinationTable, NumericVector};
pub use stats_disco::{
    combine, compute_statistics, joint_probability, sorted_distribution, BinaryOp, JointTables,
    MomentStatistics, Outcome, SortedDistribution,
};
