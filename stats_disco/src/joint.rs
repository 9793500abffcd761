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

//! The full set of tables for one pair of variables.
use crate::combinator::{combine, joint_probability, BinaryOp};
use crate::sorted::{sorted_distribution, SortedDistribution};
use core_disco::CombinationTable;
use log::debug;
use serde::{Deserialize, Serialize};

/// `X+Y`, `X-Y`, `X*Y`, the joint probabilities and the three sorted distributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointTables {
    pub sums: CombinationTable,
    pub differences: CombinationTable,
    pub products: CombinationTable,
    pub joint_probabilities: CombinationTable,
    pub sorted_sum: SortedDistribution,
    pub sorted_difference: SortedDistribution,
    pub sorted_product: SortedDistribution,
}

impl JointTables {
    /// # Panics
    /// If `x` and `px`, or `y` and `py`, differ in length.
    pub fn new(x: &[f64], y: &[f64], px: &[f64], py: &[f64]) -> JointTables {
        assert_eq!(x.len(), px.len(), "X and P_X differ in length");
        assert_eq!(y.len(), py.len(), "Y and P_Y differ in length");
        debug!("Building {}x{} joint tables", x.len(), y.len());
        let joint_probabilities = joint_probability(px, py);
        let sums = combine(x, y, BinaryOp::Add);
        let differences = combine(x, y, BinaryOp::Subtract);
        let products = combine(x, y, BinaryOp::Multiply);
        JointTables {
            sorted_sum: sorted_distribution(&sums, &joint_probabilities),
            sorted_difference: sorted_distribution(&differences, &joint_probabilities),
            sorted_product: sorted_distribution(&products, &joint_probabilities),
            sums,
            differences,
            products,
            joint_probabilities,
        }
    }

    /// The value table for `op`.
    pub fn table(&self, op: BinaryOp) -> &CombinationTable {
        match op {
            BinaryOp::Add => &self.sums,
            BinaryOp::Subtract => &self.differences,
            BinaryOp::Multiply => &self.products,
        }
    }

    /// The sorted distribution for `op`.
    pub fn sorted(&self, op: BinaryOp) -> &SortedDistribution {
        match op {
            BinaryOp::Add => &self.sorted_sum,
            BinaryOp::Subtract => &self.sorted_difference,
            BinaryOp::Multiply => &self.sorted_product,
        }
    }
}
