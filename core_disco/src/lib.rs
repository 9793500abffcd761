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

//! Primitive types for discrete random variables entered as text.
//!
//! Every number that leaves this crate is rounded to 4 decimal places with [`round4`], so
//! downstream consumers can print with `{:.4}` and never have to re-round. A [`NumericVector`]
//! is the rounded, parsed form of a whitespace separated list. A [`CombinationTable`] is the
//! `|X| x |Y|` matrix built from two of them, rows indexed by X and columns by Y.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;

/// Number of decimal places every value is kept at.
pub const DECIMALS: usize = 4;
const SCALE: f64 = 10000.0;

/// Rounds to 4 decimal places, halves away from zero.
///
/// A result of zero is always `+0.0`, so `-0.00001` and `0 * -1` print as `0.0000`.
/// Non-finite input is returned unchanged.
#[inline]
pub fn round4(value: f64) -> f64 {
    (value * SCALE).round() / SCALE + 0.0
}

/// Splits on runs of whitespace and parses each token to a rounded `f64`.
///
/// Tokens that don't parse, or that are not finite once rounded, are dropped without an error.
/// The result may therefore be shorter than the number of tokens; checking the length against
/// a declared size is up to the caller.
pub fn normalize(text: &str) -> NumericVector {
    text.split_whitespace()
        .filter_map(|token| token.parse::<f64>().ok())
        .collect()
}

/// An ordered, immutable sequence of finite numbers, each rounded with [`round4`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct NumericVector {
    values: Vec<f64>,
}

impl NumericVector {
    /// The empty vector.
    pub fn new() -> NumericVector {
        NumericVector { values: Vec::new() }
    }

    /// Rounds every value, dropping anything that isn't finite.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> NumericVector {
        let values = values
            .into_iter()
            .map(round4)
            .filter(|v| v.is_finite())
            .collect();
        NumericVector { values }
    }

    /// Applies `f` to every entry and rounds the result.
    ///
    /// Results that are not finite are kept, so the length always matches `self`. Callers that
    /// can overflow or produce NaN must rule it out first, or check [`NumericVector::all_finite`]
    /// afterwards.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> NumericVector {
        NumericVector {
            values: self.values.iter().map(|v| round4(f(*v))).collect(),
        }
    }

    /// True when no entry is infinite or NaN. Only [`NumericVector::map`] can break this.
    pub fn all_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// The plain sum of the entries, not rounded.
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

impl Deref for NumericVector {
    type Target = [f64];
    fn deref(&self) -> &[f64] {
        &self.values
    }
}

impl FromIterator<f64> for NumericVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        NumericVector::from_values(iter)
    }
}

impl From<Vec<f64>> for NumericVector {
    fn from(values: Vec<f64>) -> NumericVector {
        NumericVector::from_values(values)
    }
}

impl From<&[f64]> for NumericVector {
    fn from(values: &[f64]) -> NumericVector {
        NumericVector::from_values(values.iter().copied())
    }
}

impl From<NumericVector> for Vec<f64> {
    fn from(v: NumericVector) -> Vec<f64> {
        v.values
    }
}

impl fmt::Display for NumericVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

/// A `rows x columns` matrix of rounded cells. Row `i` belongs to `X[i]`, column `j` to `Y[j]`.
///
/// The column count is stored separately so a table with no rows still knows its width.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinationTable {
    columns: usize,
    cells: Vec<Vec<f64>>,
}

impl CombinationTable {
    /// Builds the table cell by cell, rounding each `f(i, j)`.
    pub fn from_fn<F: Fn(usize, usize) -> f64>(rows: usize, columns: usize, f: F) -> Self {
        let cells = (0..rows)
            .map(|i| (0..columns).map(|j| round4(f(i, j))).collect())
            .collect();
        CombinationTable { columns, cells }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.columns)
    }

    /// True when there is no cell at all, which happens if either side is empty.
    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.columns == 0
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(column)).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        self.cells.get(row).map(|r| &r[..])
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().flat_map(|r| r.iter().copied())
    }

    /// The plain sum of every cell, not rounded.
    pub fn sum(&self) -> f64 {
        self.iter().sum()
    }

    pub fn to_vecs(&self) -> Vec<Vec<f64>> {
        self.cells.clone()
    }
}

impl fmt::Display for CombinationTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        for j in 0..self.columns {
            write!(f, "\tY[{}]", j + 1)?;
        }
        for (i, row) in self.cells.iter().enumerate() {
            write!(f, "\nX[{}]", i + 1)?;
            for v in row {
                write!(f, "\t{:.*}", DECIMALS, v)?;
            }
        }
        Ok(())
    }
}
