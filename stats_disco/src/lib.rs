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

//! # Distribution algebra
//!
//! The numerical half of disco. Given two independent discrete random variables, as value
//! vectors with matching probability vectors, this crate builds the `X+Y`, `X-Y` and `X*Y`
//! tables along with the joint probability table, flattens them into sorted distributions, and
//! computes raw and central moments of each variable.
//!
//! Everything here is a pure function of its inputs. Callers are expected to have validated
//! lengths and probability sums already; shape mismatches are programming errors and panic.

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

mod combinator;
mod joint;
mod moments;
mod sorted;
mod transform;

pub use combinator::{combine, joint_probability, BinaryOp};
pub use joint::JointTables;
pub use moments::{compute_statistics, MomentStatistics};
pub use sorted::{sorted_distribution, Outcome, SortedDistribution};
pub use transform::{power_vector, scale_vector};

pub use core_disco::{normalize, round4, CombinationTable, NumericVector};
