//! Runtime configuration for the overlay.
//!
//! Every field has a default, so an empty JSON object (or no configuration at
//! all) yields a fully working overlay. The web binding reads optional
//! overrides from the page before mounting.

use serde::Deserialize;

use crate::{InspectorError, Point};

/// Storage key the panel position has always been persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "i_position";

/// Where the panel appears when no position has been persisted yet.
pub const DEFAULT_POSITION: Point = Point::new(32.0, 32.0);

/// Delay before a hovered element is committed to the readout.
pub const DEFAULT_HOVER_DELAY_MS: u32 = 20;

/// Tunables for an [`Overlay`](crate::Overlay) instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct InspectorConfig {
    /// Key the panel position record is stored under
    pub storage_key: String,
    /// Fallback panel position when nothing usable is stored
    pub default_position: Point,
    /// Hover debounce in milliseconds; `0` commits every hover immediately
    pub hover_delay_ms: u32,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_position: DEFAULT_POSITION,
            hover_delay_ms: DEFAULT_HOVER_DELAY_MS,
        }
    }
}

impl InspectorConfig {
    /// Parse configuration overrides from a JSON object. Missing fields keep
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, InspectorError> {
        serde_json::from_str(json).map_err(|e| InspectorError::Configuration(format!("{e}")))
    }

    /// Same configuration with the hover debounce switched off.
    pub fn immediate(self) -> Self {
        Self {
            hover_delay_ms: 0,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[test]
    fn it_defaults_every_field_from_an_empty_object() -> TestResult {
        assert_eq!(InspectorConfig::from_json("{}")?, InspectorConfig::default());
        Ok(())
    }

    #[test]
    fn it_overrides_only_the_given_fields() -> TestResult {
        let config = InspectorConfig::from_json(
            r#"{ "hoverDelayMs": 0, "defaultPosition": { "x": 10, "y": 12.5 } }"#,
        )?;

        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.hover_delay_ms, 0);
        assert_eq!(config.default_position, Point::new(10.0, 12.5));
        Ok(())
    }

    #[test]
    fn it_reports_malformed_overrides() {
        let result = InspectorConfig::from_json(r#"{ "hoverDelayMs": "soon" }"#);
        assert!(matches!(result, Err(InspectorError::Configuration(_))));

        let result = InspectorConfig::from_json(r#"{ "storagekey": "typo" }"#);
        assert!(matches!(result, Err(InspectorError::Configuration(_))));
    }
}
