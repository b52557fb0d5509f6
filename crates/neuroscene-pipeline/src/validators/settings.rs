// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Visualization settings, theme and id-list validators

use serde_json::Value;

use neuroscene_structures::{
    RenderMode, ThemeSettings, ValidationResult, VisualizationSettings,
};

use super::fields::{as_enum, as_string_list, Fields};

pub fn validate_render_mode(raw: &Value) -> ValidationResult<RenderMode> {
    as_enum(raw, "renderMode")
}

pub fn validate_visualization_settings(raw: &Value) -> ValidationResult<VisualizationSettings> {
    let fields = Fields::of(raw, "VisualizationSettings")?;

    Ok(VisualizationSettings {
        render_mode: fields.enumeration::<RenderMode>("renderMode")?,
        show_labels: fields.boolean("showLabels")?,
        show_connections: fields.boolean("showConnections")?,
        connection_threshold: fields.number("connectionThreshold")?,
        region_opacity: fields.number("regionOpacity")?,
        highlight_active_regions: fields.boolean("highlightActiveRegions")?,
        max_visible_regions: fields.optional_count("maxVisibleRegions")?,
    })
}

pub fn validate_theme_settings(raw: &Value) -> ValidationResult<ThemeSettings> {
    let fields = Fields::of(raw, "ThemeSettings")?;

    Ok(ThemeSettings {
        name: fields.string("name")?,
        background: fields.string("background")?,
        region_base: fields.string("regionBase")?,
        region_active: fields.string("regionActive")?,
        connection_excitatory: fields.string("connectionExcitatory")?,
        connection_inhibitory: fields.string("connectionInhibitory")?,
        highlight: fields.string("highlight")?,
        glow_intensity: fields.optional_number("glowIntensity")?,
    })
}

/// Id allow-list used by the filters.
///
/// Non-string entries are an error rather than being silently dropped.
pub fn validate_id_list(raw: &Value) -> ValidationResult<Vec<String>> {
    as_string_list(raw, "ids")
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroscene_structures::ValidationError;
    use serde_json::json;

    #[test]
    fn test_visualization_settings() {
        let raw = json!({
            "renderMode": "connectivity",
            "showLabels": true,
            "showConnections": false,
            "connectionThreshold": 0.25,
            "regionOpacity": 0.8,
            "highlightActiveRegions": true,
            "maxVisibleRegions": 400
        });
        let settings = validate_visualization_settings(&raw).unwrap();
        assert_eq!(settings.render_mode, RenderMode::Connectivity);
        assert_eq!(settings.max_visible_regions, Some(400));

        let mut bad = raw.clone();
        bad["maxVisibleRegions"] = json!(-3);
        assert!(validate_visualization_settings(&bad).is_err());
    }

    #[test]
    fn test_render_mode_allow_list() {
        assert_eq!(validate_render_mode(&json!("risk")), Ok(RenderMode::Risk));
        assert!(validate_render_mode(&json!("xray")).is_err());
        assert!(validate_render_mode(&json!(null)).is_err());
    }

    #[test]
    fn test_theme_requires_every_color() {
        let raw = json!({
            "name": "clinical",
            "background": "#000000",
            "regionBase": "#444444",
            "regionActive": "#ff5500",
            "connectionExcitatory": "#00ff00",
            "connectionInhibitory": "#0000ff"
        });
        assert_eq!(
            validate_theme_settings(&raw),
            Err(ValidationError::missing("highlight"))
        );
    }

    #[test]
    fn test_id_list_rejects_non_strings() {
        assert_eq!(
            validate_id_list(&json!(["a", "b"])),
            Ok(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            validate_id_list(&json!(["a", 2])),
            Err(ValidationError::invalid_items("ids"))
        );
    }
}
