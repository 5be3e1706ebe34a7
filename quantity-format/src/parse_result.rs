//! Parse outcomes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use quantity_core::number::within_tolerance;
use quantity_core::{QuantityError, QuantityResult};

/// Why a string could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum ParseError {
    #[error("No value or unit found in string")]
    NoValueOrUnitFoundInString,

    #[error("Unknown unit: {0}")]
    UnknownUnitToken(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

impl From<ParseError> for QuantityError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::NoValueOrUnitFoundInString => QuantityError::NoValueOrUnitFoundInString,
            ParseError::UnknownUnitToken(token) => QuantityError::UnknownUnitToken(token),
            ParseError::InvalidNumber(text) => QuantityError::InvalidNumber(text),
        }
    }
}

/// Magnitude in the parser's output unit, or the reason there is none
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ParseResult {
    Success { value: f64 },
    Failure { error: ParseError },
}

impl ParseResult {
    pub fn success(value: f64) -> Self {
        ParseResult::Success { value }
    }

    pub fn failure(error: ParseError) -> Self {
        ParseResult::Failure { error }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            ParseResult::Success { value } => Some(*value),
            ParseResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ParseError> {
        match self {
            ParseResult::Success { .. } => None,
            ParseResult::Failure { error } => Some(error),
        }
    }

    pub fn into_result(self) -> QuantityResult<f64> {
        match self {
            ParseResult::Success { value } => Ok(value),
            ParseResult::Failure { error } => Err(error.into()),
        }
    }

    /// Both succeeded and agree within `tolerance`
    pub fn approx_eq(&self, other: &ParseResult, tolerance: f64) -> bool {
        match (self.value(), other.value()) {
            (Some(a), Some(b)) => within_tolerance(a, b, tolerance),
            _ => false,
        }
    }
}

impl From<Result<f64, ParseError>> for ParseResult {
    fn from(result: Result<f64, ParseError>) -> Self {
        match result {
            Ok(value) => ParseResult::success(value),
            Err(error) => ParseResult::failure(error),
        }
    }
}
