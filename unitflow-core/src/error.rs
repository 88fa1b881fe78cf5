//! Conversion errors
//!
//! Every failure is surfaced to the caller at the offending call; nothing is
//! retried or recovered internally.

use crate::NumberError;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNIT_NOT_SPECIFIED: &str = "UNIT_NOT_SPECIFIED";
    pub const UNIT_NOT_RECOGNIZED: &str = "UNIT_NOT_RECOGNIZED";
    pub const DUPLICATE_UNIT: &str = "DUPLICATE_UNIT";
    pub const INCOMPATIBLE_GROUPS: &str = "INCOMPATIBLE_GROUPS";
    pub const SOURCE_NOT_SPECIFIED: &str = "SOURCE_NOT_SPECIFIED";
    pub const VALUE_NOT_SPECIFIED: &str = "VALUE_NOT_SPECIFIED";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const UNKNOWN_GROUP: &str = "UNKNOWN_GROUP";
    pub const INVALID_TABLE: &str = "INVALID_TABLE";
    pub const NUMBER_ERROR: &str = "NUMBER_ERROR";
}

/// Errors raised by the unit registry and conversion sessions
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    #[error("No unit was specified.")]
    UnitNotSpecified,

    #[error("Unit \"{0}\" is not recognized.")]
    UnitNotRecognized(String),

    #[error("Convert unit \"{0}\" is already defined.")]
    DuplicateUnit(String),

    /// Reads target first: "Unit W cannot be converted to Wh."
    #[error("Unit {to} cannot be converted to {from}.")]
    IncompatibleGroups {
        from: String,
        to: String,
        from_group: String,
        to_group: String,
    },

    /// `to` before `from`
    #[error("Source unit or value are not specified.")]
    SourceNotSpecified,

    /// Arithmetic or `value` before `from`
    #[error("Source value is not specified.")]
    ValueNotSpecified,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Unit group \"{0}\" is not part of the unit library.")]
    UnknownGroup(String),

    #[error("Invalid unit table: {0}")]
    InvalidTable(String),

    #[error(transparent)]
    Number(NumberError),
}

impl ConvertError {
    /// Machine-readable code, stable across message wording changes
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::UnitNotSpecified => codes::UNIT_NOT_SPECIFIED,
            ConvertError::UnitNotRecognized(_) => codes::UNIT_NOT_RECOGNIZED,
            ConvertError::DuplicateUnit(_) => codes::DUPLICATE_UNIT,
            ConvertError::IncompatibleGroups { .. } => codes::INCOMPATIBLE_GROUPS,
            ConvertError::SourceNotSpecified => codes::SOURCE_NOT_SPECIFIED,
            ConvertError::ValueNotSpecified => codes::VALUE_NOT_SPECIFIED,
            ConvertError::DivisionByZero => codes::DIV_ZERO,
            ConvertError::UnknownGroup(_) => codes::UNKNOWN_GROUP,
            ConvertError::InvalidTable(_) => codes::INVALID_TABLE,
            ConvertError::Number(_) => codes::NUMBER_ERROR,
        }
    }

    pub fn unit_not_recognized(unit: impl Into<String>) -> Self {
        Self::UnitNotRecognized(unit.into())
    }

    pub fn duplicate_unit(unit: impl Into<String>) -> Self {
        Self::DuplicateUnit(unit.into())
    }

    pub fn unknown_group(group: impl Into<String>) -> Self {
        Self::UnknownGroup(group.into())
    }

    pub fn invalid_table(details: impl Into<String>) -> Self {
        Self::InvalidTable(details.into())
    }
}

impl From<NumberError> for ConvertError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::DivisionByZero => Self::DivisionByZero,
            other => Self::Number(other),
        }
    }
}

/// Result alias used across unitflow
pub type Result<T> = std::result::Result<T, ConvertError>;
