// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Field-level checks shared by every entity validator.
//!
//! Required fields must be present and of the right primitive type; `null`
//! counts as the wrong type. Optional fields may be absent or `null`, but a
//! present value must still type-check.

use serde_json::{Map, Value};

use neuroscene_structures::{ValidationError, ValidationResult, WireEnum};

/// Borrowed view over a JSON object being validated
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Fails with `NotAnObject` for null, primitives and arrays
    pub fn of(raw: &'a Value, what: &str) -> ValidationResult<Self> {
        raw.as_object()
            .map(|map| Fields { map })
            .ok_or_else(|| ValidationError::not_an_object(what))
    }

    fn required(&self, field: &str) -> ValidationResult<&'a Value> {
        self.map.get(field).ok_or_else(|| ValidationError::missing(field))
    }

    fn optional(&self, field: &str) -> Option<&'a Value> {
        match self.map.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    /// Raw access for fields validated by a nested validator
    pub fn value(&self, field: &str) -> ValidationResult<&'a Value> {
        self.required(field)
    }

    pub fn string(&self, field: &str) -> ValidationResult<String> {
        as_string(self.required(field)?, field)
    }

    pub fn number(&self, field: &str) -> ValidationResult<f64> {
        as_number(self.required(field)?, field)
    }

    pub fn boolean(&self, field: &str) -> ValidationResult<bool> {
        self.required(field)?
            .as_bool()
            .ok_or_else(|| ValidationError::wrong_type(field, "a boolean"))
    }

    pub fn enumeration<E: WireEnum>(&self, field: &str) -> ValidationResult<E> {
        as_enum(self.required(field)?, field)
    }

    /// Array of strings; a single non-string element fails the whole field
    pub fn string_list(&self, field: &str) -> ValidationResult<Vec<String>> {
        as_string_list(self.required(field)?, field)
    }

    pub fn optional_string(&self, field: &str) -> ValidationResult<Option<String>> {
        self.optional(field).map(|v| as_string(v, field)).transpose()
    }

    pub fn optional_number(&self, field: &str) -> ValidationResult<Option<f64>> {
        self.optional(field).map(|v| as_number(v, field)).transpose()
    }

    pub fn optional_count(&self, field: &str) -> ValidationResult<Option<u64>> {
        self.optional(field)
            .map(|v| {
                v.as_u64()
                    .ok_or_else(|| ValidationError::wrong_type(field, "a non-negative integer"))
            })
            .transpose()
    }

    pub fn optional_enumeration<E: WireEnum>(&self, field: &str) -> ValidationResult<Option<E>> {
        self.optional(field).map(|v| as_enum(v, field)).transpose()
    }
}

pub(crate) fn as_string(value: &Value, field: &str) -> ValidationResult<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ValidationError::wrong_type(field, "a string"))
}

pub(crate) fn as_number(value: &Value, field: &str) -> ValidationResult<f64> {
    let number = value
        .as_f64()
        .ok_or_else(|| ValidationError::wrong_type(field, "a number"))?;
    if !number.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    Ok(number)
}

pub(crate) fn as_enum<E: WireEnum>(value: &Value, field: &str) -> ValidationResult<E> {
    let text = value
        .as_str()
        .ok_or_else(|| ValidationError::wrong_type(field, "a string"))?;
    E::from_wire(text).ok_or_else(|| ValidationError::invalid_enum(field, text, E::ALLOWED))
}

pub(crate) fn as_string_list(value: &Value, field: &str) -> ValidationResult<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| ValidationError::wrong_type(field, "an array"))?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_owned))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ValidationError::invalid_items(field))
}
