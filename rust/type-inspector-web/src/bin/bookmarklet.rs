//! Bookmarklet entry point for the type inspector.
//!
//! This binary is compiled to WASM and loaded into the page by a small
//! bookmarklet shell. Running it attaches the overlay once; loading it again
//! on the same page is a no-op, so the bookmarklet can be clicked repeatedly.
//!
//! The page can set `window.__typeInspectorConfig` beforehand, e.g.
//!
//! ```js
//! window.__typeInspectorConfig = { hoverDelayMs: 0, defaultPosition: { x: 16, y: 16 } };
//! ```

fn main() {
    // Nothing to attach to outside the browser.
    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    type_inspector_web::mount();
}
