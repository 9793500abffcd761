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

//! Pairwise tables over two vectors.
use core_disco::CombinationTable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The cellwise operation used to combine `X[i]` with `Y[j]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
}

impl BinaryOp {
    /// Every operation, in the order results are reported.
    pub const ALL: [BinaryOp; 3] = [BinaryOp::Add, BinaryOp::Subtract, BinaryOp::Multiply];

    #[inline]
    pub fn apply(self, x: f64, y: f64) -> f64 {
        match self {
            BinaryOp::Add => x + y,
            BinaryOp::Subtract => x - y,
            BinaryOp::Multiply => x * y,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '*',
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BinaryOp::Add => f.pad("sum"),
            BinaryOp::Subtract => f.pad("difference"),
            BinaryOp::Multiply => f.pad("product"),
        }
    }
}

/// Builds the `|x| x |y|` table with cell `(i, j) = round4(op(x[i], y[j]))`.
///
/// An empty side gives an empty table, not an error.
pub fn combine(x: &[f64], y: &[f64], op: BinaryOp) -> CombinationTable {
    CombinationTable::from_fn(x.len(), y.len(), |i, j| op.apply(x[i], y[j]))
}

/// The joint probability table of two independent variables, `px[i] * py[j]`.
pub fn joint_probability(px: &[f64], py: &[f64]) -> CombinationTable {
    combine(px, py, BinaryOp::Multiply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_table() {
        let table = combine(&[1.0, 2.0], &[10.0, 20.0], BinaryOp::Add);
        assert_eq!(table.to_vecs(), vec![vec![11.0, 21.0], vec![12.0, 22.0]]);
    }

    #[test]
    fn difference_is_row_minus_column() {
        let table = combine(&[1.0, 2.0, 3.0], &[0.5], BinaryOp::Subtract);
        assert_eq!(table.shape(), (3, 1));
        assert_eq!(table.to_vecs(), vec![vec![0.5], vec![1.5], vec![2.5]]);
    }

    #[test]
    fn product_cells_are_rounded() {
        let table = combine(&[0.3333], &[0.3333], BinaryOp::Multiply);
        assert_eq!(table.get(0, 0), Some(0.1111));
    }

    #[test]
    fn joint_probability_shape() {
        let table = joint_probability(&[0.2, 0.5, 0.3], &[0.4, 0.6]);
        assert_eq!(table.shape(), (3, 2));
        assert_approx_eq!(table.sum(), 1.0);
        assert_eq!(table.get(1, 1), Some(0.3));
    }

    #[test]
    fn empty_sides() {
        let table = combine(&[], &[1.0, 2.0], BinaryOp::Add);
        assert_eq!(table.shape(), (0, 2));
        assert!(table.is_empty());
        let table = combine(&[1.0, 2.0], &[], BinaryOp::Add);
        assert_eq!(table.shape(), (2, 0));
        assert!(table.is_empty());
    }
}
