use type_inspector::InspectorError;
use wasm_bindgen::{JsCast, JsValue};

/// Best-effort text for a thrown JS value
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => format!("{value:?}"),
    }
}

pub(crate) fn host_error(value: JsValue) -> InspectorError {
    InspectorError::Host(describe(&value))
}

pub(crate) fn storage_error(value: JsValue) -> InspectorError {
    InspectorError::Storage(describe(&value))
}
