use js_sys::{JSON, Reflect};
use tracing::warn;
use type_inspector::{InspectorConfig, InspectorError};
use wasm_bindgen::JsValue;

use crate::error::host_error;

/// Global the page may set to override [`InspectorConfig`] defaults
pub const CONFIG_GLOBAL: &str = "__typeInspectorConfig";

/// The configuration for this page: defaults, overridden by whatever the
/// page put in `window.__typeInspectorConfig`. Malformed overrides are logged
/// and ignored.
pub(crate) fn page_config() -> InspectorConfig {
    match read_overrides() {
        Ok(Some(config)) => config,
        Ok(None) => InspectorConfig::default(),
        Err(error) => {
            warn!(%error, "Ignoring page configuration");
            InspectorConfig::default()
        }
    }
}

fn read_overrides() -> Result<Option<InspectorConfig>, InspectorError> {
    let value =
        Reflect::get(&js_sys::global(), &JsValue::from_str(CONFIG_GLOBAL)).map_err(host_error)?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }

    let json = JSON::stringify(&value)
        .map_err(|_| InspectorError::Configuration(format!("{CONFIG_GLOBAL} is not JSON")))?;
    let json = json
        .as_string()
        .ok_or_else(|| InspectorError::Configuration(format!("{CONFIG_GLOBAL} is not JSON")))?;

    InspectorConfig::from_json(&json).map(Some)
}
