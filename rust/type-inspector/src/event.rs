use crate::{Point, TaskId};

/// An input the overlay reacts to, already translated out of the host's event
/// model. `E` is the host's element handle.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent<E> {
    /// A press on the panel header
    HeaderPress {
        /// Pointer position
        at: Point,
        /// Whether the primary button was pressed
        primary: bool,
        /// Whether the press landed on one of the header's controls
        on_control: bool,
    },
    /// Pointer moved anywhere in the document
    PointerMove {
        /// Pointer position
        at: Point,
    },
    /// Pointer button released anywhere in the document
    PointerRelease,
    /// The page is about to start a text selection
    SelectStart,
    /// Pointer entered `E`
    PointerOver(E),
    /// Pointer left `E`
    PointerOut(E),
    /// A key was pressed
    KeyDown {
        /// Element the key event is aimed at
        target: E,
        /// The `KeyboardEvent.key` value
        key: String,
    },
    /// A click is about to reach `E` (captured before page handlers run)
    Click(E),
    /// The picker toggle was clicked
    ToggleClick,
    /// The close control was clicked
    CloseClick,
    /// A task scheduled through [`Host::schedule`](crate::Host::schedule) is due
    Deferred(TaskId),
}

/// What the host should do with the native event after the overlay handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposition {
    /// Let the event continue untouched
    #[default]
    Pass,
    /// Cancel the default action only
    PreventDefault,
    /// Cancel the default action and stop propagation
    Suppress,
}

impl Disposition {
    /// Whether the default action should be cancelled
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Disposition::Pass)
    }

    /// Whether propagation should be stopped
    pub fn stops_propagation(&self) -> bool {
        matches!(self, Disposition::Suppress)
    }
}
