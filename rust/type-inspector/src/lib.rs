#![warn(missing_docs)]

//! Interaction core of the type inspector: a draggable floating panel that
//! reads the computed typography of whatever page element the pointer is
//! over.
//!
//! The crate is platform agnostic. [`Overlay`] is a state machine over three
//! interaction modes that share document-level listeners:
//!
//! - **Drag** ([`drag`]): pressing the panel header and moving the pointer
//!   moves the panel; releasing persists the position.
//! - **Picker** ([`picker`]): hovering page elements highlights them and
//!   renders their readout; `Escape`, `Enter` or a click turns it off.
//! - **Readout** ([`readout`]): normalizes resolved styles for display.
//!
//! Everything page-specific goes through the [`Host`] trait and the panel
//! position through [`PositionStore`]. The browser implementations of both
//! live in `type-inspector-web`.
//!
//! ```text
//! mount ──▸ attach panel ──▸ bind HeaderPress/ToggleClick/CloseClick ──▸ enable picker
//!                                        │                                  │
//!                 press header ◂─────────┘            PickerOver/Out/KeyDown/Click
//!                      │                                                    │
//!           DragMove/DragRelease/DragSelectStart          Escape / Enter / click ──▸ disable
//! destroy ──▸ cancel drag ──▸ disable picker ──▸ unbind panel ──▸ detach
//! ```

mod config;
pub use config::*;

mod error;
pub use error::*;

mod event;
pub use event::*;

mod geometry;
pub use geometry::*;

mod host;
pub use host::*;

mod overlay;
pub use overlay::*;

pub mod drag;
pub mod picker;

pub mod position;
pub use position::{MemoryPositionStore, PositionStore};

pub mod readout;
pub use readout::{Readout, ReadoutField};

#[cfg(any(test, feature = "helpers"))]
pub mod helpers;
