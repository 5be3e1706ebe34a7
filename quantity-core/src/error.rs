//! Structured errors for spec construction and parsing
//!
//! Configuration problems (unknown types, unknown units, malformed format
//! definitions) are returned as `Err`. Malformed user input is reported by the
//! parser as a value, and converts into this type only on request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_QUANTITY_TYPE: &str = "UNKNOWN_QUANTITY_TYPE";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INCOMPATIBLE_PHENOMENON: &str = "INCOMPATIBLE_PHENOMENON";
    pub const INVALID_FORMAT_DEFINITION: &str = "INVALID_FORMAT_DEFINITION";
    pub const NO_VALUE_OR_UNIT_FOUND: &str = "NO_VALUE_OR_UNIT_FOUND";
    pub const UNKNOWN_UNIT_TOKEN: &str = "UNKNOWN_UNIT_TOKEN";
    pub const INVALID_NUMBER: &str = "INVALID_NUMBER";
    pub const FORMATTER_NOT_FOUND: &str = "FORMATTER_NOT_FOUND";
    pub const PARSER_NOT_FOUND: &str = "PARSER_NOT_FOUND";
    pub const BUILD_INTERRUPTED: &str = "BUILD_INTERRUPTED";
    pub const JSON_ERROR: &str = "JSON_ERROR";
}

pub type QuantityResult<T> = Result<T, QuantityError>;

/// Error taxonomy of the quantity engine
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum QuantityError {
    #[error("Unknown quantity type: {0}")]
    UnknownQuantityType(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Cannot convert {from} ({from_phenomenon}) to {to} ({to_phenomenon}): incompatible phenomena")]
    IncompatiblePhenomenon {
        from: String,
        to: String,
        from_phenomenon: String,
        to_phenomenon: String,
    },

    #[error("Invalid format definition: {0}")]
    InvalidFormatDefinition(String),

    #[error("No value or unit found in string")]
    NoValueOrUnitFoundInString,

    #[error("Unknown unit token: {0}")]
    UnknownUnitToken(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("No formatter spec for quantity type: {0}")]
    FormatterNotFound(String),

    #[error("No parser spec for quantity type: {0}")]
    ParserNotFound(String),

    #[error("Spec build for {0} was interrupted")]
    BuildInterrupted(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl QuantityError {
    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            QuantityError::UnknownQuantityType(_) => codes::UNKNOWN_QUANTITY_TYPE,
            QuantityError::UnknownUnit(_) => codes::UNKNOWN_UNIT,
            QuantityError::IncompatiblePhenomenon { .. } => codes::INCOMPATIBLE_PHENOMENON,
            QuantityError::InvalidFormatDefinition(_) => codes::INVALID_FORMAT_DEFINITION,
            QuantityError::NoValueOrUnitFoundInString => codes::NO_VALUE_OR_UNIT_FOUND,
            QuantityError::UnknownUnitToken(_) => codes::UNKNOWN_UNIT_TOKEN,
            QuantityError::InvalidNumber(_) => codes::INVALID_NUMBER,
            QuantityError::FormatterNotFound(_) => codes::FORMATTER_NOT_FOUND,
            QuantityError::ParserNotFound(_) => codes::PARSER_NOT_FOUND,
            QuantityError::BuildInterrupted(_) => codes::BUILD_INTERRUPTED,
            QuantityError::Json(_) => codes::JSON_ERROR,
        }
    }

    /// Suggestion for fixing the error, where one is obvious
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            QuantityError::UnknownQuantityType(_) => {
                Some("Use a built-in quantity type or register a specs provider first")
            }
            QuantityError::UnknownUnit(_) => Some("Check the unit name, e.g. \"Units.M\""),
            QuantityError::IncompatiblePhenomenon { .. } => {
                Some("All units of a format must measure the same phenomenon")
            }
            QuantityError::InvalidFormatDefinition(_) => {
                Some("Composite units must be listed from largest to smallest")
            }
            QuantityError::UnknownUnitToken(_) => Some("Use a unit label or alias known to the parser"),
            QuantityError::FormatterNotFound(_) | QuantityError::ParserNotFound(_) => {
                Some("Request the spec by quantity type, or load the format and parsing maps first")
            }
            _ => None,
        }
    }

    pub fn invalid_format(details: impl Into<String>) -> Self {
        QuantityError::InvalidFormatDefinition(details.into())
    }
}

impl From<serde_json::Error> for QuantityError {
    fn from(err: serde_json::Error) -> Self {
        QuantityError::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(QuantityError::UnknownUnit("Units.X".into()).code(), "UNKNOWN_UNIT");
        assert_eq!(QuantityError::NoValueOrUnitFoundInString.code(), "NO_VALUE_OR_UNIT_FOUND");
        assert_eq!(QuantityError::UnknownUnitToken("flurgs".into()).code(), "UNKNOWN_UNIT_TOKEN");
    }

    #[test]
    fn test_display() {
        let err = QuantityError::IncompatiblePhenomenon {
            from: "Units.M".into(),
            to: "Units.SQ_M".into(),
            from_phenomenon: "length".into(),
            to_phenomenon: "area".into(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot convert Units.M (length) to Units.SQ_M (area): incompatible phenomena"
        );
    }

    #[test]
    fn test_suggestions() {
        assert!(QuantityError::UnknownUnitToken("x".into()).suggestion().is_some());
        assert!(QuantityError::NoValueOrUnitFoundInString.suggestion().is_none());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: QuantityError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), codes::JSON_ERROR);
    }
}
