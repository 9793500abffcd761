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

//! The errors that can occur when a request is validated or a configuration is loaded.
//! The numerical crates never fail; everything that can go wrong is caught here, before any
//! table is built.

use std::error::Error;
use std::fmt;
use std::io;
use yaml_rust::ScanError;

/// Helper type for a call that could go wrong.
pub type DiscoResult<T> = Result<T, DiscoError>;

/// Which of the four input vectors a problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorName {
    X,
    Y,
    PX,
    PY,
}

impl fmt::Display for VectorName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VectorName::X => f.pad("X"),
            VectorName::Y => f.pad("Y"),
            VectorName::PX => f.pad("P_X"),
            VectorName::PY => f.pad("P_Y"),
        }
    }
}

/// Why an exponent was refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExponentRejection {
    Zero,
    NotFinite,
    /// The policy only allows integers in `[min, max]`.
    OutOfRange { min: i32, max: i32 },
    /// A fractional exponent of this negative value has no real result.
    NegativeBase(f64),
    /// A negative exponent with a 0 in X or Y.
    ZeroBase,
    /// This value raised to the exponent is beyond [`MAX_MAGNITUDE`](crate::MAX_MAGNITUDE).
    Overflow(f64),
}

/// A request that can't be analyzed. Reported to the caller before any computation runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A vector doesn't have its declared size, or a probability vector doesn't match the length
    /// of its value vector.
    LengthMismatch {
        vector: VectorName,
        expected: usize,
        actual: usize,
    },
    /// The probabilities don't sum to 1 within the configured tolerance.
    ProbabilityNormalization { vector: VectorName, sum: f64 },
    /// Power mode was asked for an exponent the policy doesn't allow.
    InvalidExponent {
        exponent: f64,
        reason: ExponentRejection,
    },
    /// A scale constant that isn't a finite number, or that scales some value beyond
    /// [`MAX_MAGNITUDE`](crate::MAX_MAGNITUDE).
    InvalidConstant { vector: VectorName, constant: f64 },
    /// X or Y holds a value too large for its fifth power to be represented.
    ValueOutOfRange { vector: VectorName, value: f64 },
}

impl ValidationError {
    /// Short machine readable name of the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::LengthMismatch { .. } => "length_mismatch",
            ValidationError::ProbabilityNormalization { .. } => "probability_normalization",
            ValidationError::InvalidExponent { .. } => "invalid_exponent",
            ValidationError::InvalidConstant { .. } => "invalid_constant",
            ValidationError::ValueOutOfRange { .. } => "value_out_of_range",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ValidationError::LengthMismatch {
                vector,
                expected,
                actual,
            } => write!(
                f,
                "{} has {} elements but {} were expected",
                vector, actual, expected
            ),
            ValidationError::ProbabilityNormalization { vector, sum } => write!(
                f,
                "the probabilities in {} must sum to 1, they sum to {:.4}",
                vector, sum
            ),
            ValidationError::InvalidExponent { exponent, reason } => match reason {
                ExponentRejection::Zero => f.pad("the exponent can not be 0"),
                ExponentRejection::NotFinite => {
                    write!(f, "the exponent {} is not a finite number", exponent)
                }
                ExponentRejection::OutOfRange { min, max } => write!(
                    f,
                    "the exponent must be an integer from {} to {}, got {}",
                    min, max, exponent
                ),
                ExponentRejection::NegativeBase(value) => write!(
                    f,
                    "{} raised to the fractional exponent {} is not a real number",
                    value, exponent
                ),
                ExponentRejection::ZeroBase => write!(
                    f,
                    "0 can not be raised to the negative exponent {}",
                    exponent
                ),
                ExponentRejection::Overflow(value) => write!(
                    f,
                    "{} raised to {} is beyond the largest supported magnitude {:e}",
                    value,
                    exponent,
                    crate::MAX_MAGNITUDE
                ),
            },
            ValidationError::InvalidConstant { vector, constant } if !constant.is_finite() => {
                write!(
                    f,
                    "the constant for {} is not a finite number: {}",
                    vector, constant
                )
            }
            ValidationError::InvalidConstant { vector, constant } => write!(
                f,
                "the constant {} scales {} beyond the largest supported magnitude {:e}",
                constant,
                vector,
                crate::MAX_MAGNITUDE
            ),
            ValidationError::ValueOutOfRange { vector, value } => write!(
                f,
                "{} contains {}, beyond the largest supported magnitude {:e}",
                vector,
                value,
                crate::MAX_MAGNITUDE
            ),
        }
    }
}

impl Error for ValidationError {}

/// Error type for disco. Validation problems plus whatever can go wrong reading a config file.
#[derive(Debug)]
pub enum DiscoError {
    /// The request was refused
    Validation(ValidationError),
    /// IO error when opening files
    IoError(io::Error),
    /// The yaml could not be scanned
    YamlError(ScanError),
    /// A config field is present but unusable
    ConfigError {
        /// The offending key
        field: String,
        /// What is wrong with it
        message: String,
    },
}

impl DiscoError {
    /// A config key that exists but has an unusable value.
    pub fn config<F: Into<String>, M: Into<String>>(field: F, message: M) -> DiscoError {
        DiscoError::ConfigError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DiscoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DiscoError::Validation(ref e) => fmt::Display::fmt(e, f),
            DiscoError::IoError(ref e) => fmt::Display::fmt(e, f),
            DiscoError::YamlError(ref e) => fmt::Display::fmt(e, f),
            DiscoError::ConfigError {
                ref field,
                ref message,
            } => write!(f, "bad config value for '{}': {}", field, message),
        }
    }
}

impl Error for DiscoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            DiscoError::Validation(ref e) => Some(e),
            DiscoError::IoError(ref e) => Some(e),
            DiscoError::YamlError(ref e) => Some(e),
            DiscoError::ConfigError { .. } => None,
        }
    }
}

impl From<ValidationError> for DiscoError {
    fn from(err: ValidationError) -> Self {
        DiscoError::Validation(err)
    }
}

impl From<io::Error> for DiscoError {
    fn from(err: io::Error) -> Self {
        DiscoError::IoError(err)
    }
}

impl From<ScanError> for DiscoError {
    fn from(err: ScanError) -> Self {
        DiscoError::YamlError(err)
    }
}

impl From<DiscoError> for io::Error {
    fn from(err: DiscoError) -> Self {
        match err {
            DiscoError::IoError(e) => e,
            e => io::Error::new(io::ErrorKind::Other, Box::new(e)),
        }
    }
}
