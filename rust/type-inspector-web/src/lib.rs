#![warn(missing_docs)]

//! Browser binding for the type inspector overlay.
//!
//! [`type_inspector::Overlay`] is driven here by a real page: `WebHost`
//! implements [`type_inspector::Host`] on top of `web-sys`, renders the panel
//! inside an open shadow root and registers its listeners with `gloo`.
//! `LocalStorageStore` persists the panel position in `localStorage`.
//!
//! # Entry points
//!
//! - **`mount()`**: exported to JS. Creates the single overlay for the page;
//!   a second call while one is attached is a logged no-op.
//! - **`unmount()`**: removes the overlay and every listener it owns.
//! - **`isMounted()`**: reports whether an overlay is attached.
//! - **`bookmarklet`** binary: calls `mount()` once when loaded.
//!
//! The page may set `window.__typeInspectorConfig` to an object with any of
//! `storageKey`, `defaultPosition` and `hoverDelayMs` before mounting.
//!
//! # Dispatch
//!
//! ```text
//! DOM event ──▸ gloo listener ──▸ Weak<RefCell<Overlay>> ──▸ Overlay::handle
//!                     ▲                                             │
//!                     └────── preventDefault / stopPropagation ◂────┘
//! ```
//!
//! Listeners hold a `Weak` and borrow with `try_borrow_mut`, so an event that
//! arrives while the overlay is busy or after it is gone is dropped.

pub mod assets;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
mod config;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
mod error;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
mod host;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub use host::*;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
mod logging;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
mod registry;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub use registry::{active_handles, is_mounted, mount, try_mount, unmount};

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
mod storage;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub use storage::*;
