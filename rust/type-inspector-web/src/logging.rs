use std::sync::Once;

use tracing::Level;
use tracing_wasm::WASMLayerConfigBuilder;

static INIT: Once = Once::new();

/// Route panics and `tracing` events to the browser console. Safe to call
/// more than once.
pub(crate) fn init() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default_with_config(
            WASMLayerConfigBuilder::new()
                .set_max_level(Level::INFO)
                .build(),
        );
    });
}
