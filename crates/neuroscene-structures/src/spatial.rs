// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Visualization-space coordinates

use serde::{Deserialize, Serialize};

/// Half-extent of the visualization space; every axis is clamped into
/// `[-POSITION_BOUND, POSITION_BOUND]` before reaching the renderer.
pub const POSITION_BOUND: f64 = 10.0;

/// 3D position in visualization space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ORIGIN: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Clamp every axis independently into `[-bound, bound]`.
    ///
    /// Non-finite input has no meaningful clamp and yields `None`.
    pub fn clamped(&self, bound: f64) -> Option<Vector3> {
        if !self.is_finite() {
            return None;
        }
        Some(Vector3 {
            x: self.x.clamp(-bound, bound),
            y: self.y.clamp(-bound, bound),
            z: self.z.clamp(-bound, bound),
        })
    }

    /// True when every axis lies within `[-bound, bound]`
    pub fn within(&self, bound: f64) -> bool {
        self.is_finite() && [self.x, self.y, self.z].iter().all(|c| c.abs() <= bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_each_axis_independently() {
        let clamped = Vector3::new(25.0, -3.5, -40.0).clamped(POSITION_BOUND).unwrap();
        assert_eq!(clamped, Vector3::new(10.0, -3.5, -10.0));
    }

    #[test]
    fn test_non_finite_has_no_clamp() {
        assert!(Vector3::new(f64::NAN, 0.0, 0.0).clamped(POSITION_BOUND).is_none());
        assert!(Vector3::new(0.0, f64::INFINITY, 0.0).clamped(POSITION_BOUND).is_none());
    }

    proptest! {
        #[test]
        fn prop_clamped_is_within_bound(x in -1e6f64..1e6, y in -1e6f64..1e6, z in -1e6f64..1e6) {
            let clamped = Vector3::new(x, y, z).clamped(POSITION_BOUND).unwrap();
            prop_assert!(clamped.within(POSITION_BOUND));
            // Clamping twice changes nothing
            prop_assert_eq!(clamped.clamped(POSITION_BOUND).unwrap(), clamped);
        }
    }
}
