//! The seam between the overlay controller and the page it runs in.
//!
//! The controller never touches the DOM directly. Everything it needs from the
//! page (attaching the panel, binding listeners, toggling classes, reading
//! resolved styles, scheduling the hover debounce) goes through [`Host`]. The
//! browser implementation lives in `type-inspector-web`; tests use the
//! recording host from [`crate::helpers`].

use crate::{Point, readout::ReadoutField};

/// Class added to the page element currently under inspection.
pub const HIGHLIGHT_CLASS: &str = "i_pickerHover";

/// Class added to the picker toggle while the picker is active.
pub const ACTIVE_CLASS: &str = "isActive";

/// Class added to the page `<body>` while the panel is being dragged.
pub const NO_SELECT_CLASS: &str = "inspector-noselect";

/// The static text assets supplied by the build step. They are injected
/// verbatim; the controller never parses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assets {
    /// Panel markup, rendered inside the isolated scope
    pub markup: &'static str,
    /// Stylesheet scoped to the isolated panel
    pub overlay_css: &'static str,
    /// Stylesheet injected into the page head (highlight outline, drag cursor
    /// and selection suppression)
    pub host_css: &'static str,
}

/// Every listener registration the controller can own.
///
/// Each state transition names the bindings it adds and removes, so the set of
/// live bindings is always one of a handful of well known unions of
/// [`Binding::PANEL`], [`Binding::DRAG`] and [`Binding::PICKER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Binding {
    /// `mousedown` on the panel header
    HeaderPress,
    /// `click` on the picker toggle
    ToggleClick,
    /// `click` on the close control
    CloseClick,
    /// Document `mousemove` while dragging
    DragMove,
    /// Document `mouseup` while dragging
    DragRelease,
    /// Document `selectstart` while dragging
    DragSelectStart,
    /// Document `mouseover` while picking
    PickerOver,
    /// Document `mouseout` while picking
    PickerOut,
    /// Document `keydown` while picking
    PickerKeyDown,
    /// Document `click`, capture phase, while picking
    PickerClick,
}

/// Where a [`Binding`] is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingTarget {
    /// The panel header
    Header,
    /// The picker toggle control
    Toggle,
    /// The close control
    Close,
    /// The page document
    Document,
}

impl Binding {
    /// Bindings held for as long as the panel is mounted
    pub const PANEL: [Binding; 3] = [
        Binding::HeaderPress,
        Binding::ToggleClick,
        Binding::CloseClick,
    ];

    /// Bindings held while a drag is in progress
    pub const DRAG: [Binding; 3] = [
        Binding::DragMove,
        Binding::DragRelease,
        Binding::DragSelectStart,
    ];

    /// Bindings held while the picker is active
    pub const PICKER: [Binding; 4] = [
        Binding::PickerOver,
        Binding::PickerOut,
        Binding::PickerKeyDown,
        Binding::PickerClick,
    ];

    /// The DOM event type this binding listens for
    pub fn event_type(&self) -> &'static str {
        match self {
            Binding::HeaderPress => "mousedown",
            Binding::ToggleClick | Binding::CloseClick | Binding::PickerClick => "click",
            Binding::DragMove => "mousemove",
            Binding::DragRelease => "mouseup",
            Binding::DragSelectStart => "selectstart",
            Binding::PickerOver => "mouseover",
            Binding::PickerOut => "mouseout",
            Binding::PickerKeyDown => "keydown",
        }
    }

    /// The node this binding is registered on
    pub fn target(&self) -> BindingTarget {
        match self {
            Binding::HeaderPress => BindingTarget::Header,
            Binding::ToggleClick => BindingTarget::Toggle,
            Binding::CloseClick => BindingTarget::Close,
            _ => BindingTarget::Document,
        }
    }

    /// Whether the listener runs in the capture phase, ahead of page handlers
    pub fn capture(&self) -> bool {
        matches!(self, Binding::PickerClick)
    }
}

/// Handle for a deferred callback scheduled through [`Host::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// The resolved (post-cascade) typography of a page element, as raw CSS text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSnapshot {
    /// Element tag name, in whatever case the document reports it
    pub tag_name: String,
    /// `font-family`
    pub font_family: String,
    /// `font-size`
    pub font_size: String,
    /// `font-weight`
    pub font_weight: String,
    /// `line-height`
    pub line_height: String,
    /// `letter-spacing`
    pub letter_spacing: String,
    /// `font-feature-settings`
    pub font_feature_settings: String,
}

/// Everything the controller needs from the page.
///
/// Implementations must be infallible wherever the operation can be treated
/// as best effort; only attaching the panel can fail, because a panel with
/// missing parts cannot be driven at all.
pub trait Host {
    /// A handle to a page element. Handles never own the element.
    type Element: Clone + PartialEq + std::fmt::Debug;

    /// Build the panel inside its isolated scope, inject both stylesheets and
    /// append the panel to the page. Fails with
    /// [`InspectorError::MissingElement`](crate::InspectorError::MissingElement)
    /// when the markup lacks a required part.
    fn attach(&mut self, assets: &Assets) -> Result<(), crate::InspectorError>;

    /// Remove the panel and both stylesheets. Safe to call when nothing (or
    /// only part of the panel) is attached.
    fn detach(&mut self);

    /// Register the listener for `binding`
    fn bind(&mut self, binding: Binding);

    /// Remove the listener for `binding`; a no-op when it is not registered
    fn unbind(&mut self, binding: Binding);

    /// Current top-left corner of the panel
    fn panel_origin(&self) -> Point;

    /// Move the panel's top-left corner to `position`
    fn move_panel(&mut self, position: Point);

    /// True when `element` is the panel's scope root or lies inside it
    fn is_self(&self, element: &Self::Element) -> bool;

    /// True when `element` carries [`HIGHLIGHT_CLASS`]
    fn is_highlighted(&self, element: &Self::Element) -> bool;

    /// Add or remove [`HIGHLIGHT_CLASS`] on `element`
    fn set_highlight(&mut self, element: &Self::Element, on: bool);

    /// Resolved style of `element`, or `None` when it is no longer part of
    /// the document
    fn resolved_style(&self, element: &Self::Element) -> Option<StyleSnapshot>;

    /// Write one readout value into the panel
    fn write_field(&mut self, field: ReadoutField, value: &str);

    /// Toggle [`ACTIVE_CLASS`] on the picker toggle
    fn set_toggle_active(&mut self, active: bool);

    /// Toggle [`NO_SELECT_CLASS`] on the page body
    fn set_no_select(&mut self, on: bool);

    /// Deliver [`OverlayEvent::Deferred`](crate::OverlayEvent::Deferred) with
    /// the returned id after `delay_ms`
    fn schedule(&mut self, delay_ms: u32) -> TaskId;

    /// Cancel a scheduled task, or release it once it has fired
    fn cancel(&mut self, task: TaskId);
}
