// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Defines a closed string enumeration as it appears on the wire.
///
/// This macro generates:
/// - The enum definition with serde renames for every variant
/// - `ALLOWED`, the explicit allow-list used by the validators
/// - `as_str()` and `from_wire()` (exact, case-sensitive matching)
/// - `Display` and `FromStr` implementations
/// - A `WireEnum` implementation so validators can treat every enum alike
///
/// # Usage
/// ```ignore
/// define_wire_enum! {
///     /// Documentation for the enum
///     pub enum Directionality {
///         Unidirectional => "unidirectional",
///         Bidirectional => "bidirectional",
///     }
/// }
/// ```
macro_rules! define_wire_enum {
    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $wire)]
                $variant,
            )*
        }

        impl $name {
            /// Every accepted wire spelling, in declaration order
            pub const ALLOWED: &'static [&'static str] = &[$($wire),*];

            /// Wire spelling of this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)*
                }
            }

            /// Parse the exact wire spelling; anything outside `ALLOWED` is `None`
            pub fn from_wire(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl $crate::WireEnum for $name {
            const ALLOWED: &'static [&'static str] = $name::ALLOWED;

            fn from_wire(value: &str) -> Option<Self> {
                $name::from_wire(value)
            }

            fn as_str(&self) -> &'static str {
                $name::as_str(self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_wire(s).ok_or_else(|| {
                    format!("Invalid {}: '{}' (expected one of {:?})", stringify!($name), s, Self::ALLOWED)
                })
            }
        }
    };
}

/// Closed string enumeration with an explicit allow-list
pub trait WireEnum: Sized + Copy {
    /// Every accepted wire spelling
    const ALLOWED: &'static [&'static str];

    fn from_wire(value: &str) -> Option<Self>;

    fn as_str(&self) -> &'static str;
}
