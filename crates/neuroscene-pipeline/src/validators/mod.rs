// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Runtime validators for untrusted brain model payloads.

Every validator is a pure function `&Value -> ValidationResult<T>` that either
builds an owned, strongly-typed value or reports what is wrong. Validation is
structural and shallow-strict:

- required fields must be present with the right primitive type
- enumerated strings are checked against explicit allow-lists
- arrays are validated element by element with the element's own validator;
  a single bad element fails the whole array with an aggregate error
- optional fields may be absent, but must type-check when present

Higher-level validators delegate to the lower-level ones instead of
re-implementing their checks.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

mod entities;
mod fields;
mod model;
mod settings;

pub use entities::{
    validate_connection, validate_connections, validate_region, validate_regions,
    validate_vector3,
};
pub use fields::Fields;
pub use model::{validate_brain_model, validate_scan_metadata};
pub use settings::{
    validate_id_list, validate_render_mode, validate_theme_settings,
    validate_visualization_settings,
};

use serde_json::Value;

use neuroscene_structures::{ValidationError, ValidationResult};

/// Validate every element of an array with `validate_item`.
///
/// Non-arrays fail with `WrongType`; any failing element fails the whole
/// collection with `InvalidItems` (no per-element detail). An empty array is
/// valid.
pub fn validate_array_of<T, F>(raw: &Value, field: &str, validate_item: F) -> ValidationResult<Vec<T>>
where
    F: Fn(&Value) -> ValidationResult<T>,
{
    let items = raw
        .as_array()
        .ok_or_else(|| ValidationError::wrong_type(field, "an array"))?;

    items
        .iter()
        .map(|item| validate_item(item))
        .collect::<ValidationResult<Vec<T>>>()
        .map_err(|_| ValidationError::invalid_items(field))
}
