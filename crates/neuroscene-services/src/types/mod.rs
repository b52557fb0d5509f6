// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Service layer types (DTOs and errors).

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

pub mod dtos;
pub mod errors;

pub use dtos::*;
pub use errors::*;
