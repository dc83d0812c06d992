//! The panel markup and stylesheets, embedded at build time.
//!
//! The markup must contain every id in [`REQUIRED_IDS`]; mounting fails with
//! [`type_inspector::InspectorError::MissingElement`] otherwise.

use type_inspector::{Assets, ReadoutField};

/// Id of the element that hosts the panel's shadow root
pub const HOST_ELEMENT_ID: &str = "type-inspector-host";

/// Id of the `<style>` element injected into the page head
pub const HOST_STYLE_ID: &str = "type-inspector-style";

/// The positioned panel
pub const PANEL_ID: &str = "i_modal";

/// The drag handle
pub const HEADER_ID: &str = "i_header";

/// The picker toggle control
pub const TOGGLE_ID: &str = "i_pickerToggleButton";

/// The close control
pub const CLOSE_ID: &str = "i_close";

/// Ids the markup must define, readout fields included
pub const REQUIRED_IDS: [&str; 11] = [
    PANEL_ID,
    HEADER_ID,
    TOGGLE_ID,
    CLOSE_ID,
    ReadoutField::Tag.element_id(),
    ReadoutField::FontFamily.element_id(),
    ReadoutField::FontSize.element_id(),
    ReadoutField::FontWeight.element_id(),
    ReadoutField::LineHeight.element_id(),
    ReadoutField::LetterSpacing.element_id(),
    ReadoutField::FontFeatures.element_id(),
];

/// The shipped assets
pub const ASSETS: Assets = Assets {
    markup: include_str!("../assets/overlay.html"),
    overlay_css: include_str!("../assets/overlay.css"),
    host_css: include_str!("../assets/host.css"),
};

#[cfg(test)]
mod tests {
    use super::*;
    use type_inspector::{ACTIVE_CLASS, HIGHLIGHT_CLASS, NO_SELECT_CLASS};

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    use wasm_bindgen_test::wasm_bindgen_test;

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_defines_every_required_id_once() {
        for id in REQUIRED_IDS {
            let attribute = format!("id=\"{id}\"");
            assert_eq!(
                ASSETS.markup.matches(&attribute).count(),
                1,
                "markup should define {id} exactly once"
            );
        }
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_marks_both_header_controls_as_buttons() {
        for id in [TOGGLE_ID, CLOSE_ID] {
            let control = format!("id=\"{id}\" class=\"i_button\"");
            assert!(ASSETS.markup.contains(&control), "{id} should be an i_button");
        }
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_styles_the_classes_the_overlay_toggles() {
        assert!(ASSETS.host_css.contains(&format!(".{HIGHLIGHT_CLASS}")));
        assert!(ASSETS.host_css.contains(&format!("body.{NO_SELECT_CLASS}")));
        assert!(ASSETS.overlay_css.contains(&format!(".{ACTIVE_CLASS}")));
    }
}
