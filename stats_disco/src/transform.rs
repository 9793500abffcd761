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

//! Pre-transforms applied to a variable before its tables are rebuilt.
use core_disco::NumericVector;

/// `round4(v * constant)` for every entry.
pub fn scale_vector(values: &NumericVector, constant: f64) -> NumericVector {
    values.map(|v| v * constant)
}

/// `round4(v ^ exponent)` for every entry.
///
/// Integral exponents use repeated multiplication. A fractional exponent of a negative entry is
/// NaN; the request boundary rejects that combination before it gets here.
pub fn power_vector(values: &NumericVector, exponent: f64) -> NumericVector {
    if exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as f64 {
        let n = exponent as i32;
        values.map(|v| v.powi(n))
    } else {
        values.map(|v| v.powf(exponent))
    }
}
