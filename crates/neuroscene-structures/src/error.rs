// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Validation error shared by every runtime validator.

Validation failure is never fatal: the error is returned to the caller, who
decides whether to abort the stage, skip the element or surface it.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use thiserror::Error;

/// Aggregate message reported when any element of a collection fails validation
pub const NON_CONFORMING_ITEMS: &str = "One or more items do not conform";

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Structural validation errors (shape, primitive type, allow-list)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Input is null, a primitive or an array where an object was required
    #[error("{what} must be an object")]
    NotAnObject { what: String },

    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    #[error("Field '{field}' must be {expected}")]
    WrongType { field: String, expected: String },

    #[error("Field '{field}' must be a finite number")]
    NotFinite { field: String },

    /// Enumerated string outside its allow-list
    #[error("Field '{field}' has invalid value '{value}' (expected one of: {allowed})")]
    InvalidEnum {
        field: String,
        value: String,
        allowed: String,
    },

    /// At least one collection element failed its own validator.
    ///
    /// Per-element detail is intentionally not carried; re-validate the
    /// elements individually when it is needed.
    #[error("{field}: One or more items do not conform")]
    InvalidItems { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    pub fn not_an_object(what: impl Into<String>) -> Self {
        ValidationError::NotAnObject { what: what.into() }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        ValidationError::MissingField {
            field: field.into(),
        }
    }

    pub fn wrong_type(field: impl Into<String>, expected: impl Into<String>) -> Self {
        ValidationError::WrongType {
            field: field.into(),
            expected: expected.into(),
        }
    }

    pub fn invalid_enum(field: impl Into<String>, value: impl Into<String>, allowed: &[&str]) -> Self {
        ValidationError::InvalidEnum {
            field: field.into(),
            value: value.into(),
            allowed: allowed.join(", "),
        }
    }

    pub fn invalid_items(field: impl Into<String>) -> Self {
        ValidationError::InvalidItems {
            field: field.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
