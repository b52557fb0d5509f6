// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Controller construction from `neuroscene.toml` `[detail]` settings.

use std::time::Duration;

use neuroscene_config::DetailSettings;

use crate::adaptation::AdaptationPolicy;
use crate::controller::{DetailController, DetailOptions};
use crate::error::DetailResult;

impl DetailOptions {
    /// Parse the string-typed TOML settings into options
    pub fn from_settings(settings: &DetailSettings) -> DetailResult<Self> {
        Ok(Self {
            default_level: settings.default_level.parse()?,
            forced_level: settings
                .forced_level
                .as_deref()
                .map(str::parse)
                .transpose()?,
            device_class: settings
                .device_class
                .as_deref()
                .map(str::parse)
                .transpose()?,
            adaptive: settings.adaptive,
            policy: AdaptationPolicy {
                high_fps_threshold: settings.high_fps_threshold,
                medium_fps_threshold: settings.medium_fps_threshold,
                recovery_delay: Duration::from_millis(settings.recovery_delay_ms),
                sample_window: settings.sample_window,
            },
            ..Self::default()
        })
    }
}

impl DetailController {
    pub fn from_config(settings: &DetailSettings) -> DetailResult<Self> {
        Self::new(DetailOptions::from_settings(settings)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetailError;
    use crate::level::{DetailLevel, DeviceClass};

    #[test]
    fn test_defaults_build_a_controller() {
        let controller = DetailController::from_config(&DetailSettings::default()).unwrap();
        assert_eq!(controller.level(), DetailLevel::Medium);
        assert!(!controller.is_pinned());
    }

    #[test]
    fn test_settings_are_parsed() {
        let settings = DetailSettings {
            forced_level: Some("low".to_string()),
            device_class: Some("high".to_string()),
            recovery_delay_ms: 500,
            ..DetailSettings::default()
        };
        let options = DetailOptions::from_settings(&settings).unwrap();
        assert_eq!(options.forced_level, Some(DetailLevel::Low));
        assert_eq!(options.device_class, Some(DeviceClass::High));
        assert_eq!(options.policy.recovery_delay, Duration::from_millis(500));

        let controller = DetailController::new(options).unwrap();
        assert!(controller.is_pinned());
        // The high-device bonus still applies to the inactive bundles
        assert_eq!(controller.bundle(DetailLevel::High).max_visible_regions, 3000);
    }

    #[test]
    fn test_unknown_names_rejected() {
        let settings = DetailSettings {
            device_class: Some("potato".to_string()),
            ..DetailSettings::default()
        };
        assert_eq!(
            DetailOptions::from_settings(&settings).unwrap_err(),
            DetailError::UnknownDeviceClass("potato".to_string())
        );
    }
}
