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

//! # Sorted joint distributions
//!
//! Flattens a value table against the joint probability table and orders the outcomes by value.
//! Equal values are deliberately kept as separate outcomes so that every `(i, j)` pair shows up
//! in the output; nothing is merged.
use core_disco::{CombinationTable, DECIMALS};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One cell of a joint distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub value: f64,
    pub probability: f64,
}

/// Outcomes sorted ascending by value, ties left in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortedDistribution {
    outcomes: Vec<Outcome>,
}

impl SortedDistribution {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Outcome> {
        self.outcomes.iter()
    }

    pub fn as_slice(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Plain sum of the outcome probabilities. Matches the sum of the joint table it came from.
    pub fn total_probability(&self) -> f64 {
        self.outcomes.iter().map(|o| o.probability).sum()
    }
}

impl<'a> IntoIterator for &'a SortedDistribution {
    type Item = &'a Outcome;
    type IntoIter = std::slice::Iter<'a, Outcome>;
    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

impl fmt::Display for SortedDistribution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, o) in self.outcomes.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(
                f,
                "{:.*}\t{:.*}",
                DECIMALS, o.value, DECIMALS, o.probability
            )?;
        }
        Ok(())
    }
}

/// Pairs `values[i][j]` with `probs[i][j]` in row-major order, then stable sorts by value.
///
/// # Panics
/// If the two tables don't have the same shape, there is no cell correspondence.
pub fn sorted_distribution(
    values: &CombinationTable,
    probs: &CombinationTable,
) -> SortedDistribution {
    assert_eq!(
        values.shape(),
        probs.shape(),
        "value and probability tables must have the same shape"
    );
    let mut outcomes: Vec<Outcome> = values
        .iter()
        .zip(probs.iter())
        .map(|(value, probability)| Outcome { value, probability })
        .collect();
    // `sort_by` is stable. Cells are finite, so the fallback only matters for NaN.
    outcomes.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
    SortedDistribution { outcomes }
}
