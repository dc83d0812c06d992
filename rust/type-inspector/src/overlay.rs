//! The overlay controller.
//!
//! [`Overlay`] owns the single [`OverlayState`] and is the only thing that
//! mutates it. The host forwards every input as an [`OverlayEvent`] through
//! [`Overlay::handle`] and applies the returned [`Disposition`] to the native
//! event. Drag handling lives in [`crate::drag`], picking in
//! [`crate::picker`].

use tracing::{debug, info};

use crate::{
    Assets, Binding, Disposition, Host, InspectorConfig, InspectorError, OverlayEvent, Point,
    PositionStore, Readout, ReadoutField, TaskId, drag::DragState, position::load_position,
};

/// Result of a successful [`Overlay::mount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// The panel was attached
    Mounted,
    /// The panel was already attached; nothing changed
    AlreadyMounted,
}

/// A hover waiting out the debounce delay before it is committed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingHover<E> {
    pub(crate) task: TaskId,
    pub(crate) element: E,
}

/// Interaction state for one attached overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState<E> {
    pub(crate) mounted: bool,
    pub(crate) drag: DragState,
    pub(crate) picker_active: bool,
    pub(crate) hovered: Option<E>,
    pub(crate) pending: Option<PendingHover<E>>,
    pub(crate) panel_position: Point,
    pub(crate) readout: Readout,
}

impl<E> OverlayState<E> {
    fn new(panel_position: Point) -> Self {
        Self {
            mounted: false,
            drag: DragState::Idle,
            picker_active: false,
            hovered: None,
            pending: None,
            panel_position,
            readout: Readout::blank(),
        }
    }

    /// True between mount and destroy
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True while a drag gesture is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Pointer-to-panel offset captured when the current drag started
    pub fn drag_offset(&self) -> Option<Point> {
        self.drag.offset()
    }

    /// True while hover-to-inspect is enabled
    pub fn picker_active(&self) -> bool {
        self.picker_active
    }

    /// The highlighted page element, if any
    pub fn hovered_element(&self) -> Option<&E> {
        self.hovered.as_ref()
    }

    /// True while a hover is waiting out the debounce delay
    pub fn has_pending_hover(&self) -> bool {
        self.pending.is_some()
    }

    /// Last committed panel position
    pub fn panel_position(&self) -> Point {
        self.panel_position
    }

    /// The values last written to the panel
    pub fn readout(&self) -> &Readout {
        &self.readout
    }
}

/// The overlay controller: panel lifecycle, drag, picker and readout.
pub struct Overlay<H, S>
where
    H: Host,
    S: PositionStore,
{
    pub(crate) host: H,
    pub(crate) store: S,
    pub(crate) config: InspectorConfig,
    assets: Assets,
    pub(crate) state: OverlayState<H::Element>,
}

impl<H, S> Overlay<H, S>
where
    H: Host,
    S: PositionStore,
{
    /// Create an unmounted overlay
    pub fn new(host: H, store: S, config: InspectorConfig, assets: Assets) -> Self {
        let state = OverlayState::new(config.default_position);
        Self {
            host,
            store,
            config,
            assets,
            state,
        }
    }

    /// The host this overlay drives
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The store the panel position is persisted in
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Active configuration
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Current interaction state
    pub fn state(&self) -> &OverlayState<H::Element> {
        &self.state
    }

    /// True between mount and destroy
    pub fn is_mounted(&self) -> bool {
        self.state.mounted
    }

    /// Attach the panel to the page and start picking.
    ///
    /// Mounting an overlay that is already mounted changes nothing. When the
    /// host cannot attach the panel, anything partially attached is removed
    /// again and the error is returned; no listener is left behind.
    pub fn mount(&mut self) -> Result<MountOutcome, InspectorError> {
        if self.state.mounted {
            debug!("Overlay already mounted");
            return Ok(MountOutcome::AlreadyMounted);
        }

        let position = load_position(
            &self.store,
            &self.config.storage_key,
            self.config.default_position,
        );
        self.state = OverlayState::new(position);

        if let Err(error) = self.host.attach(&self.assets) {
            self.host.detach();
            return Err(error);
        }

        self.host.move_panel(position);
        for binding in Binding::PANEL {
            self.host.bind(binding);
        }
        self.state.mounted = true;
        self.enable_picker();

        info!(x = position.x, y = position.y, "Type inspector mounted");
        Ok(MountOutcome::Mounted)
    }

    /// Detach the panel and release every listener and pending task.
    ///
    /// An in-progress drag is abandoned without persisting and the picker is
    /// disabled (clearing any highlight) before the panel itself goes away.
    pub fn destroy(&mut self) {
        if !self.state.mounted {
            return;
        }

        self.cancel_drag();
        self.disable_picker();
        for binding in Binding::PANEL {
            self.host.unbind(binding);
        }
        self.host.detach();

        self.state.mounted = false;
        info!("Type inspector destroyed");
    }

    /// React to one input. Events arriving after [`Overlay::destroy`] are
    /// ignored.
    pub fn handle(&mut self, event: OverlayEvent<H::Element>) -> Disposition {
        if !self.state.mounted {
            if let OverlayEvent::Deferred(task) = event {
                self.host.cancel(task);
            }
            return Disposition::Pass;
        }

        match event {
            OverlayEvent::HeaderPress {
                at,
                primary,
                on_control,
            } => self.start_drag(at, primary, on_control),
            OverlayEvent::PointerMove { at } => self.drag_to(at),
            OverlayEvent::PointerRelease => self.end_drag(),
            OverlayEvent::SelectStart => {
                if self.state.is_dragging() {
                    Disposition::PreventDefault
                } else {
                    Disposition::Pass
                }
            }
            OverlayEvent::PointerOver(element) => self.hover_enter(element),
            OverlayEvent::PointerOut(element) => self.hover_leave(element),
            OverlayEvent::KeyDown { target, key } => self.key_down(&target, &key),
            OverlayEvent::Click(element) => self.capture_click(&element),
            OverlayEvent::ToggleClick => {
                self.toggle_picker();
                Disposition::Pass
            }
            OverlayEvent::CloseClick => {
                self.destroy();
                Disposition::Pass
            }
            OverlayEvent::Deferred(task) => {
                self.commit_deferred(task);
                Disposition::Pass
            }
        }
    }

    /// Render the readout for `target` and make it the hovered element.
    ///
    /// Reads only; a target that has left the document yields a blank
    /// readout.
    pub(crate) fn update(&mut self, target: H::Element) {
        let readout = match self.host.resolved_style(&target) {
            Some(snapshot) => Readout::from_snapshot(&snapshot),
            None => {
                debug!(?target, "Inspected element is no longer in the document");
                Readout::blank()
            }
        };

        for field in ReadoutField::ALL {
            self.host.write_field(field, readout.value(field));
        }

        self.state.readout = readout;
        self.state.hovered = Some(target);
    }
}

impl<H, S> Drop for Overlay<H, S>
where
    H: Host,
    S: PositionStore,
{
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{PageNode, RecordingHost, overlay_with};
    use crate::{MemoryPositionStore, StyleSnapshot};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use testresult::TestResult;

    #[test]
    fn it_binds_panel_and_picker_listeners_on_mount() -> TestResult {
        let mut overlay = overlay_with(RecordingHost::default(), InspectorConfig::default());

        assert_eq!(overlay.mount()?, MountOutcome::Mounted);

        let expected: BTreeSet<Binding> =
            Binding::PANEL.into_iter().chain(Binding::PICKER).collect();
        assert_eq!(overlay.host().bindings, expected);
        assert!(overlay.host().attached);
        assert!(overlay.host().toggle_active);
        assert_eq!(overlay.host().panel_origin, Point::new(32.0, 32.0));
        Ok(())
    }

    #[test]
    fn it_ignores_a_second_mount() -> TestResult {
        let mut overlay = overlay_with(RecordingHost::default(), InspectorConfig::default());
        overlay.mount()?;

        assert_eq!(overlay.mount()?, MountOutcome::AlreadyMounted);
        assert_eq!(overlay.host().attach_count, 1);
        Ok(())
    }

    #[test]
    fn it_ignores_events_after_destroy() -> TestResult {
        let mut overlay = overlay_with(RecordingHost::default(), InspectorConfig::default());
        overlay.mount()?;
        overlay.destroy();

        let disposition = overlay.handle(OverlayEvent::Click(PageNode(3)));

        assert_eq!(disposition, Disposition::Pass);
        assert!(overlay.host().bindings.is_empty());
        assert!(!overlay.host().attached);
        Ok(())
    }

    #[test]
    fn it_renders_a_blank_readout_for_a_stale_target() -> TestResult {
        let host = RecordingHost::default().with_style(
            PageNode(1),
            StyleSnapshot {
                tag_name: "P".into(),
                font_size: "16px".into(),
                ..Default::default()
            },
        );
        let mut overlay = Overlay::new(
            host,
            MemoryPositionStore::default(),
            InspectorConfig::default().immediate(),
            crate::helpers::ASSETS,
        );
        overlay.mount()?;

        overlay.update(PageNode(1));
        assert_eq!(overlay.host().fields[&ReadoutField::FontSize], "16px");

        overlay.update(PageNode(2));
        assert_eq!(overlay.state().readout(), &Readout::blank());
        assert_eq!(overlay.host().fields[&ReadoutField::FontSize], "");
        assert_eq!(overlay.state().hovered_element(), Some(&PageNode(2)));
        Ok(())
    }

    #[test]
    fn it_tears_down_when_dropped_while_mounted() -> TestResult {
        let log = {
            let mut overlay = overlay_with(RecordingHost::default(), InspectorConfig::default());
            overlay.mount()?;
            overlay.host().log.clone()
        };

        assert!(log.borrow().ends_with(&["detach".to_string()]));
        Ok(())
    }
}
