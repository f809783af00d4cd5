//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Coarse failure category of a business rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or malformed input.
    InvalidArgument,
    /// Unknown location or business-unit code.
    NotFound,
    /// The request contradicts current state (duplicates, limits, replacement rules).
    Conflict,
}

impl ErrorKind {
    /// HTTP status a front end renders for this kind.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::InvalidArgument => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
        }
    }
}

/// Every business rule the warehouse lifecycle can reject a request with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorRule {
    MissingBody,
    MissingField,
    InvalidField,
    WarehouseNotLocated,
    LocationNotFound,
    BusinessUnitCodeAlreadyExists,
    MaxWarehousesLimitReached,
    BusinessUnitCodeMismatch,
    LocationCapacityExceeded,
    WarehousePreviouslyArchived,
    InsufficientWarehouseCapacity,
    WarehouseStockMismatch,
}

impl ErrorRule {
    pub fn kind(self) -> ErrorKind {
        match self {
            ErrorRule::MissingBody | ErrorRule::MissingField | ErrorRule::InvalidField => {
                ErrorKind::InvalidArgument
            }
            ErrorRule::WarehouseNotLocated | ErrorRule::LocationNotFound => ErrorKind::NotFound,
            ErrorRule::BusinessUnitCodeAlreadyExists
            | ErrorRule::MaxWarehousesLimitReached
            | ErrorRule::BusinessUnitCodeMismatch
            | ErrorRule::LocationCapacityExceeded
            | ErrorRule::WarehousePreviouslyArchived
            | ErrorRule::InsufficientWarehouseCapacity
            | ErrorRule::WarehouseStockMismatch => ErrorKind::Conflict,
        }
    }

    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorRule::MissingBody => "BODY_MISSING",
            ErrorRule::MissingField => "FIELD_IS_REQUIRED",
            ErrorRule::InvalidField => "FIELD_IS_INVALID",
            ErrorRule::WarehouseNotLocated => "WAREHOUSE_NOT_FOUND",
            ErrorRule::LocationNotFound => "LOCATION_NOT_FOUND",
            ErrorRule::BusinessUnitCodeAlreadyExists => "BUSINESS_UNIT_CODE_EXISTS",
            ErrorRule::MaxWarehousesLimitReached => "MAX_WAREHOUSE_NUMBER_REACHED",
            ErrorRule::BusinessUnitCodeMismatch => "BUSINESS_UNIT_CODE_NOT_MATCH",
            ErrorRule::LocationCapacityExceeded => "WAREHOUSE_LOCATION_EXCEEDED_MAX_CAPACITY",
            ErrorRule::WarehousePreviouslyArchived => "WAREHOUSE_PREVIOUSLY_ARCHIVED",
            ErrorRule::InsufficientWarehouseCapacity => "INSUFFICIENT_WAREHOUSE_CAPACITY",
            ErrorRule::WarehouseStockMismatch => "WAREHOUSE_STOCK_MISMATCH",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ErrorRule::MissingBody => "request body is not provided",
            ErrorRule::MissingField => "required field is missing or empty",
            ErrorRule::InvalidField => "field value is out of range",
            ErrorRule::WarehouseNotLocated => "no warehouse found with the given business unit code",
            ErrorRule::LocationNotFound => "no location found with the given identifier",
            ErrorRule::BusinessUnitCodeAlreadyExists => "business unit code is already in use",
            ErrorRule::MaxWarehousesLimitReached => {
                "the maximum number of warehouses for the location has been reached"
            }
            ErrorRule::BusinessUnitCodeMismatch => {
                "the provided business unit code does not match the expected value"
            }
            ErrorRule::LocationCapacityExceeded => {
                "the warehouse capacity exceeds the maximum capacity of its location"
            }
            ErrorRule::WarehousePreviouslyArchived => {
                "the warehouse with the provided business unit code was archived earlier"
            }
            ErrorRule::InsufficientWarehouseCapacity => {
                "the capacity of the new warehouse cannot hold the stock of the previous warehouse"
            }
            ErrorRule::WarehouseStockMismatch => {
                "the stock of the new warehouse does not match the stock of the previous warehouse"
            }
        }
    }
}

impl core::fmt::Display for ErrorRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// Domain-level error.
///
/// Business failures always carry the [`ErrorRule`] that rejected the request
/// plus a message naming the offending value. `Storage` is the only variant
/// that does not originate from a rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument ({rule}): {message}")]
    InvalidArgument { rule: ErrorRule, message: String },

    #[error("not found ({rule}): {message}")]
    NotFound { rule: ErrorRule, message: String },

    #[error("conflict ({rule}): {message}")]
    Conflict { rule: ErrorRule, message: String },

    /// The backing store failed (e.g. poisoned lock).
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    /// Build the error variant matching the rule's kind.
    pub fn rule(rule: ErrorRule, message: impl Into<String>) -> Self {
        let message = message.into();
        match rule.kind() {
            ErrorKind::InvalidArgument => Self::InvalidArgument { rule, message },
            ErrorKind::NotFound => Self::NotFound { rule, message },
            ErrorKind::Conflict => Self::Conflict { rule, message },
        }
    }

    pub fn invalid_argument(rule: ErrorRule, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            rule,
            message: message.into(),
        }
    }

    pub fn not_found(rule: ErrorRule, message: impl Into<String>) -> Self {
        Self::NotFound {
            rule,
            message: message.into(),
        }
    }

    pub fn conflict(rule: ErrorRule, message: impl Into<String>) -> Self {
        Self::Conflict {
            rule,
            message: message.into(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// The rule that produced this error, if any.
    pub fn error_rule(&self) -> Option<ErrorRule> {
        match self {
            Self::InvalidArgument { rule, .. }
            | Self::NotFound { rule, .. }
            | Self::Conflict { rule, .. } => Some(*rule),
            Self::Storage(_) => None,
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        self.error_rule().map(ErrorRule::kind)
    }

    pub fn is_rule(&self, rule: ErrorRule) -> bool {
        self.error_rule() == Some(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_constructor_picks_variant_from_kind() {
        let err = DomainError::rule(ErrorRule::WarehouseStockMismatch, "WH1");
        assert!(matches!(err, DomainError::Conflict { .. }));

        let err = DomainError::rule(ErrorRule::LocationNotFound, "NOWHERE-001");
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = DomainError::rule(ErrorRule::MissingField, "capacity");
        assert!(matches!(err, DomainError::InvalidArgument { .. }));
    }

    #[test]
    fn kinds_map_to_http_statuses() {
        assert_eq!(ErrorRule::MissingBody.kind().status_code(), 400);
        assert_eq!(ErrorRule::WarehouseNotLocated.kind().status_code(), 404);
        assert_eq!(ErrorRule::MaxWarehousesLimitReached.kind().status_code(), 409);
    }

    #[test]
    fn storage_errors_carry_no_rule() {
        let err = DomainError::storage("lock poisoned");
        assert_eq!(err.error_rule(), None);
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn display_includes_rule_code_and_context() {
        let err = DomainError::conflict(ErrorRule::BusinessUnitCodeAlreadyExists, "MWH.001");
        assert_eq!(
            err.to_string(),
            "conflict (BUSINESS_UNIT_CODE_EXISTS): MWH.001"
        );
    }

    #[test]
    fn rules_serialize_by_name() {
        let json = serde_json::to_string(&ErrorRule::WarehousePreviouslyArchived).unwrap();
        assert_eq!(json, "\"WAREHOUSE_PREVIOUSLY_ARCHIVED\"");
    }
}
