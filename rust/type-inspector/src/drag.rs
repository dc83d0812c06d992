//! Moving the panel by its header.
//!
//! | from | input | to | bindings |
//! | --- | --- | --- | --- |
//! | `Idle` | primary press on the header (not a control) | `Dragging` | + [`Binding::DRAG`] |
//! | `Dragging` | move | `Dragging` | |
//! | `Dragging` | release | `Idle` | − [`Binding::DRAG`], position persisted |
//! | `Dragging` | destroy | `Idle` | − [`Binding::DRAG`] |

use tracing::{debug, warn};

use crate::{Binding, Disposition, Host, Overlay, Point, PositionStore, position::save_position};

/// Drag gesture state. The offset only exists while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress
    #[default]
    Idle,
    /// The header is pressed and the panel follows the pointer
    Dragging {
        /// Pointer position minus panel origin at the moment the drag began
        offset: Point,
    },
}

impl DragState {
    /// True while dragging
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// The captured offset, while dragging
    pub fn offset(&self) -> Option<Point> {
        match self {
            DragState::Dragging { offset } => Some(*offset),
            DragState::Idle => None,
        }
    }
}

impl<H, S> Overlay<H, S>
where
    H: Host,
    S: PositionStore,
{
    pub(crate) fn start_drag(&mut self, at: Point, primary: bool, on_control: bool) -> Disposition {
        if !primary || on_control || self.state.drag.is_dragging() {
            return Disposition::Pass;
        }

        let offset = at - self.host.panel_origin();
        self.state.drag = DragState::Dragging { offset };
        self.host.set_no_select(true);
        for binding in Binding::DRAG {
            self.host.bind(binding);
        }

        debug!(x = offset.x, y = offset.y, "Drag started");
        Disposition::PreventDefault
    }

    pub(crate) fn drag_to(&mut self, at: Point) -> Disposition {
        let Some(offset) = self.state.drag.offset() else {
            return Disposition::Pass;
        };

        let position = at - offset;
        self.host.move_panel(position);
        self.state.panel_position = position;
        Disposition::PreventDefault
    }

    pub(crate) fn end_drag(&mut self) -> Disposition {
        if !self.leave_drag() {
            return Disposition::Pass;
        }

        let position = self.state.panel_position;
        if let Err(error) = save_position(&mut self.store, &self.config.storage_key, position) {
            warn!(%error, "Unable to persist panel position");
        }

        debug!(x = position.x, y = position.y, "Drag ended");
        Disposition::Pass
    }

    pub(crate) fn cancel_drag(&mut self) {
        if self.leave_drag() {
            debug!("Drag abandoned");
        }
    }

    fn leave_drag(&mut self) -> bool {
        if !self.state.drag.is_dragging() {
            return false;
        }

        for binding in Binding::DRAG {
            self.host.unbind(binding);
        }
        self.host.set_no_select(false);
        self.state.drag = DragState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{RecordingHost, overlay_with};
    use crate::{InspectorConfig, OverlayEvent, PositionStore};
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    fn press(x: f64, y: f64) -> OverlayEvent<crate::helpers::PageNode> {
        OverlayEvent::HeaderPress {
            at: Point::new(x, y),
            primary: true,
            on_control: false,
        }
    }

    #[test]
    fn it_captures_the_offset_and_follows_the_pointer() -> TestResult {
        let mut overlay = overlay_with(RecordingHost::default(), InspectorConfig::default());
        overlay.mount()?;

        assert_eq!(overlay.handle(press(100.0, 100.0)), Disposition::PreventDefault);
        assert_eq!(overlay.state().drag_offset(), Some(Point::new(68.0, 68.0)));

        overlay.handle(OverlayEvent::PointerMove {
            at: Point::new(150.0, 130.0),
        });
        assert_eq!(overlay.host().panel_origin, Point::new(82.0, 62.0));
        assert_eq!(overlay.state().panel_position(), Point::new(82.0, 62.0));
        Ok(())
    }

    #[test]
    fn it_ignores_presses_on_controls_and_secondary_buttons() -> TestResult {
        let mut overlay = overlay_with(RecordingHost::default(), InspectorConfig::default());
        overlay.mount()?;

        overlay.handle(OverlayEvent::HeaderPress {
            at: Point::new(40.0, 40.0),
            primary: true,
            on_control: true,
        });
        overlay.handle(OverlayEvent::HeaderPress {
            at: Point::new(40.0, 40.0),
            primary: false,
            on_control: false,
        });

        assert!(!overlay.state().is_dragging());
        assert!(!overlay.host().no_select);
        Ok(())
    }

    #[test]
    fn it_ignores_moves_outside_a_drag() -> TestResult {
        let mut overlay = overlay_with(RecordingHost::default(), InspectorConfig::default());
        overlay.mount()?;

        let disposition = overlay.handle(OverlayEvent::PointerMove {
            at: Point::new(500.0, 500.0),
        });

        assert_eq!(disposition, Disposition::Pass);
        assert_eq!(overlay.host().panel_origin, Point::new(32.0, 32.0));
        Ok(())
    }

    #[test]
    fn it_persists_once_on_repeated_release() -> TestResult {
        let mut overlay = overlay_with(RecordingHost::default(), InspectorConfig::default());
        overlay.mount()?;

        overlay.handle(press(100.0, 100.0));
        overlay.handle(OverlayEvent::PointerMove {
            at: Point::new(110.0, 90.0),
        });
        overlay.handle(OverlayEvent::PointerRelease);
        assert_eq!(
            overlay.store().get("i_position")?,
            Some(r#"{"x":42.0,"y":22.0}"#.to_string())
        );

        let mut shared = overlay.store().clone();
        shared.set("i_position", "untouched".into())?;
        overlay.handle(OverlayEvent::PointerRelease);
        overlay.handle(OverlayEvent::PointerRelease);

        assert_eq!(overlay.store().get("i_position")?, Some("untouched".into()));
        assert_eq!(
            overlay.host().count("bind DragMove"),
            overlay.host().count("unbind DragMove")
        );
        Ok(())
    }

    #[test]
    fn it_suppresses_selection_only_while_dragging() -> TestResult {
        let mut overlay = overlay_with(RecordingHost::default(), InspectorConfig::default());
        overlay.mount()?;

        assert_eq!(overlay.handle(OverlayEvent::SelectStart), Disposition::Pass);
        overlay.handle(press(50.0, 50.0));
        assert!(overlay.host().no_select);
        assert_eq!(
            overlay.handle(OverlayEvent::SelectStart),
            Disposition::PreventDefault
        );
        overlay.handle(OverlayEvent::PointerRelease);
        assert!(!overlay.host().no_select);
        Ok(())
    }
}
