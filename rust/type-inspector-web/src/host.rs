use std::{cell::RefCell, collections::HashMap, rc::Weak};

use gloo::{
    events::{EventListener, EventListenerOptions, EventListenerPhase},
    timers::callback::Timeout,
};
use tracing::{debug, warn};
use type_inspector::{
    ACTIVE_CLASS, Assets, Binding, BindingTarget, Disposition, HIGHLIGHT_CLASS, Host,
    InspectorError, NO_SELECT_CLASS, Overlay, OverlayEvent, Point, ReadoutField, StyleSnapshot,
    TaskId,
};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, Node,
    ShadowRoot, ShadowRootInit, ShadowRootMode,
};

use crate::{
    LocalStorageStore,
    assets::{CLOSE_ID, HEADER_ID, HOST_ELEMENT_ID, HOST_STYLE_ID, PANEL_ID, TOGGLE_ID},
    error::host_error,
    registry,
};

/// The overlay as mounted in a browser page
pub type WebOverlay = Overlay<WebHost, LocalStorageStore>;

/// Selector matching the header controls that must not start a drag
const CONTROL_SELECTOR: &str = ".i_button";

/// The panel's nodes, looked up once when it is attached.
struct Parts {
    host: Element,
    page_style: Element,
    panel: HtmlElement,
    header: Element,
    toggle: Element,
    close: Element,
    fields: HashMap<ReadoutField, Element>,
}

impl Parts {
    /// Build the panel detached from the page. Nothing touches the document
    /// until every required part has been found.
    fn build(document: &Document, assets: &Assets) -> Result<Self, InspectorError> {
        let host = document.create_element("div").map_err(host_error)?;
        host.set_id(HOST_ELEMENT_ID);

        let root = host
            .attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
            .map_err(host_error)?;
        root.set_inner_html(assets.markup);

        let overlay_style = document.create_element("style").map_err(host_error)?;
        overlay_style.set_text_content(Some(assets.overlay_css));
        root.append_child(&overlay_style).map_err(host_error)?;

        let page_style = document.create_element("style").map_err(host_error)?;
        page_style.set_id(HOST_STYLE_ID);
        page_style.set_text_content(Some(assets.host_css));

        let panel = find(&root, PANEL_ID)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| InspectorError::MissingElement(PANEL_ID.into()))?;

        let mut fields = HashMap::new();
        for field in ReadoutField::ALL {
            fields.insert(field, find(&root, field.element_id())?);
        }

        Ok(Self {
            header: find(&root, HEADER_ID)?,
            toggle: find(&root, TOGGLE_ID)?,
            close: find(&root, CLOSE_ID)?,
            host,
            page_style,
            panel,
            fields,
        })
    }
}

fn find(root: &ShadowRoot, id: &str) -> Result<Element, InspectorError> {
    root.get_element_by_id(id)
        .ok_or_else(|| InspectorError::MissingElement(id.into()))
}

/// [`Host`] implementation for a real page.
///
/// The panel lives in an open shadow root under a `<div>` appended to
/// `<body>`; the highlight and no-select rules go into a `<style>` in
/// `<head>`. Listeners and timers are owned here and removed by dropping them.
pub struct WebHost {
    document: Document,
    overlay: Weak<RefCell<WebOverlay>>,
    parts: Option<Parts>,
    listeners: HashMap<Binding, EventListener>,
    timers: HashMap<TaskId, Timeout>,
    next_task: u64,
}

impl WebHost {
    /// A host for `document` that delivers events to `overlay`
    pub fn new(document: Document, overlay: Weak<RefCell<WebOverlay>>) -> Self {
        Self {
            document,
            overlay,
            parts: None,
            listeners: HashMap::new(),
            timers: HashMap::new(),
            next_task: 1,
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of scheduled, unfired timers
    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    fn event_target(&self, binding: Binding) -> Option<EventTarget> {
        let element = match binding.target() {
            BindingTarget::Document => return Some(self.document.clone().into()),
            BindingTarget::Header => &self.parts.as_ref()?.header,
            BindingTarget::Toggle => &self.parts.as_ref()?.toggle,
            BindingTarget::Close => &self.parts.as_ref()?.close,
        };
        Some(element.clone().into())
    }
}

impl Host for WebHost {
    type Element = Element;

    fn attach(&mut self, assets: &Assets) -> Result<(), InspectorError> {
        let parts = Parts::build(&self.document, assets)?;
        let head: Element = match self.document.head() {
            Some(head) => head.into(),
            None => self
                .document
                .document_element()
                .ok_or_else(|| InspectorError::Host("document has no root element".into()))?,
        };
        let body = self
            .document
            .body()
            .ok_or_else(|| InspectorError::Host("document has no body".into()))?;

        // Stored before appending so a failed append is still rolled back
        let (page_style, host) = (parts.page_style.clone(), parts.host.clone());
        self.parts = Some(parts);
        head.append_child(&page_style).map_err(host_error)?;
        body.append_child(&host).map_err(host_error)?;
        Ok(())
    }

    fn detach(&mut self) {
        if let Some(parts) = self.parts.take() {
            parts.host.remove();
            parts.page_style.remove();
        }
    }

    fn bind(&mut self, binding: Binding) {
        if self.listeners.contains_key(&binding) {
            return;
        }
        let Some(target) = self.event_target(binding) else {
            warn!(?binding, "No panel to bind to");
            return;
        };

        let overlay = self.overlay.clone();
        let options = EventListenerOptions {
            phase: if binding.capture() {
                EventListenerPhase::Capture
            } else {
                EventListenerPhase::Bubble
            },
            passive: false,
        };
        let listener = EventListener::new_with_options(
            &target,
            binding.event_type(),
            options,
            move |event: &Event| {
                let Some(input) = translate(binding, event) else {
                    return;
                };
                if let Some(disposition) = registry::dispatch(&overlay, input) {
                    apply(disposition, event);
                }
                if binding == Binding::ToggleClick {
                    release_focus(event);
                }
            },
        );
        self.listeners.insert(binding, listener);
    }

    fn unbind(&mut self, binding: Binding) {
        self.listeners.remove(&binding);
    }

    fn panel_origin(&self) -> Point {
        match &self.parts {
            Some(parts) => Point::new(
                parts.panel.offset_left() as f64,
                parts.panel.offset_top() as f64,
            ),
            None => Point::default(),
        }
    }

    fn move_panel(&mut self, position: Point) {
        let Some(parts) = &self.parts else {
            return;
        };
        let style = parts.panel.style();
        let moved = style
            .set_property("left", &format!("{}px", position.x))
            .and_then(|_| style.set_property("top", &format!("{}px", position.y)));
        if let Err(error) = moved {
            warn!(error = %crate::error::describe(&error), "Could not move panel");
        }
    }

    fn is_self(&self, element: &Element) -> bool {
        let Some(parts) = &self.parts else {
            return false;
        };
        let node: &Node = element;
        parts.host.contains(Some(node))
    }

    fn is_highlighted(&self, element: &Element) -> bool {
        element.class_list().contains(HIGHLIGHT_CLASS)
    }

    fn set_highlight(&mut self, element: &Element, on: bool) {
        toggle_class(element, HIGHLIGHT_CLASS, on);
    }

    fn resolved_style(&self, element: &Element) -> Option<StyleSnapshot> {
        if !element.is_connected() {
            return None;
        }
        let style = self
            .document
            .default_view()?
            .get_computed_style(element)
            .ok()
            .flatten()?;
        let property = |name: &str| style.get_property_value(name).unwrap_or_default();

        Some(StyleSnapshot {
            tag_name: element.tag_name(),
            font_family: property("font-family"),
            font_size: property("font-size"),
            font_weight: property("font-weight"),
            line_height: property("line-height"),
            letter_spacing: property("letter-spacing"),
            font_feature_settings: property("font-feature-settings"),
        })
    }

    fn write_field(&mut self, field: ReadoutField, value: &str) {
        if let Some(element) = self.parts.as_ref().and_then(|parts| parts.fields.get(&field)) {
            element.set_text_content(Some(value));
        }
    }

    fn set_toggle_active(&mut self, active: bool) {
        if let Some(parts) = &self.parts {
            toggle_class(&parts.toggle, ACTIVE_CLASS, active);
        }
    }

    fn set_no_select(&mut self, on: bool) {
        if let Some(body) = self.document.body() {
            toggle_class(&body, NO_SELECT_CLASS, on);
        }
    }

    fn schedule(&mut self, delay_ms: u32) -> TaskId {
        let task = TaskId(self.next_task);
        self.next_task += 1;

        let overlay = self.overlay.clone();
        let timeout = Timeout::new(delay_ms, move || {
            registry::dispatch(&overlay, OverlayEvent::Deferred(task));
        });
        self.timers.insert(task, timeout);
        task
    }

    fn cancel(&mut self, task: TaskId) {
        self.timers.remove(&task);
    }
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let result = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
    if let Err(error) = result {
        warn!(class, error = %crate::error::describe(&error), "Could not update class list");
    }
}

/// The element an event was aimed at. Events that target the document itself
/// count as targeting its root element.
fn target_element(event: &Event) -> Option<Element> {
    match event.target().and_then(|target| target.dyn_into::<Element>().ok()) {
        Some(element) => Some(element),
        None => web_sys::window()?.document()?.document_element(),
    }
}

fn pointer(event: &Event) -> Option<(Point, &MouseEvent)> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some((
        Point::new(mouse.client_x() as f64, mouse.client_y() as f64),
        mouse,
    ))
}

fn translate(binding: Binding, event: &Event) -> Option<OverlayEvent<Element>> {
    let input = match binding {
        Binding::HeaderPress => {
            let (at, mouse) = pointer(event)?;
            let on_control = target_element(event)
                .and_then(|target| target.closest(CONTROL_SELECTOR).ok().flatten())
                .is_some();
            OverlayEvent::HeaderPress {
                at,
                primary: mouse.button() == 0,
                on_control,
            }
        }
        Binding::ToggleClick => OverlayEvent::ToggleClick,
        Binding::CloseClick => OverlayEvent::CloseClick,
        Binding::DragMove => OverlayEvent::PointerMove {
            at: pointer(event)?.0,
        },
        Binding::DragRelease => OverlayEvent::PointerRelease,
        Binding::DragSelectStart => OverlayEvent::SelectStart,
        Binding::PickerOver => OverlayEvent::PointerOver(target_element(event)?),
        Binding::PickerOut => OverlayEvent::PointerOut(target_element(event)?),
        Binding::PickerKeyDown => OverlayEvent::KeyDown {
            target: target_element(event)?,
            key: event.dyn_ref::<KeyboardEvent>()?.key(),
        },
        Binding::PickerClick => OverlayEvent::Click(target_element(event)?),
    };
    Some(input)
}

/// Move focus off the control that received `event`, so Escape and Enter
/// typed afterwards target the page rather than the panel.
fn release_focus(event: &Event) {
    let control = event
        .current_target()
        .and_then(|target| target.dyn_into::<HtmlElement>().ok());
    if let Some(control) = control {
        if let Err(error) = control.blur() {
            debug!(error = %crate::error::describe(&error), "Could not release focus");
        }
    }
}

fn apply(disposition: Disposition, event: &Event) {
    if disposition.prevents_default() {
        event.prevent_default();
    }
    if disposition.stops_propagation() {
        event.stop_propagation();
        event.stop_immediate_propagation();
    }
    if disposition != Disposition::Pass {
        debug!(?disposition, kind = %event.type_(), "Applied disposition");
    }
}
