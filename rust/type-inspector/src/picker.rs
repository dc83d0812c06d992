//! Hover-to-inspect.
//!
//! While active the picker holds exactly the four [`Binding::PICKER`]
//! listeners. Pointer-over highlights the element under the pointer (after
//! the configured debounce) and renders its readout; pointer-out clears the
//! highlight. `Escape`, `Enter` or a click outside the panel turns the picker
//! off again. Cancelling never selects anything: the readout simply keeps the
//! last inspected values.
//!
//! Nothing the panel itself contains can be inspected; every handler ignores
//! targets for which [`Host::is_self`] holds.

use tracing::debug;

use crate::{
    Binding, Disposition, Host, Overlay, PositionStore, TaskId, overlay::PendingHover,
};

impl<H, S> Overlay<H, S>
where
    H: Host,
    S: PositionStore,
{
    /// Start hover-to-inspect. Does nothing if already active or unmounted.
    pub fn enable_picker(&mut self) {
        if !self.state.mounted || self.state.picker_active {
            return;
        }

        self.state.picker_active = true;
        self.host.set_toggle_active(true);
        for binding in Binding::PICKER {
            self.host.bind(binding);
        }
        debug!("Picker enabled");
    }

    /// Stop hover-to-inspect and clear any highlight. Does nothing if the
    /// picker is not active.
    pub fn disable_picker(&mut self) {
        if !self.state.picker_active {
            return;
        }

        for binding in Binding::PICKER {
            self.host.unbind(binding);
        }
        self.host.set_toggle_active(false);
        self.state.picker_active = false;

        self.cancel_pending_hover();
        if let Some(element) = self.state.hovered.take() {
            self.host.set_highlight(&element, false);
        }
        debug!("Picker disabled");
    }

    /// Flip the picker between active and inactive
    pub fn toggle_picker(&mut self) {
        if self.state.picker_active {
            self.disable_picker();
        } else {
            self.enable_picker();
        }
    }

    /// True when `target` is part of the panel
    pub fn is_self(&self, target: &H::Element) -> bool {
        self.host.is_self(target)
    }

    pub(crate) fn hover_enter(&mut self, element: H::Element) -> Disposition {
        if !self.state.picker_active
            || self.is_self(&element)
            || self.host.is_highlighted(&element)
        {
            return Disposition::Pass;
        }

        match self.config.hover_delay_ms {
            0 => self.commit_hover(element),
            delay => {
                self.cancel_pending_hover();
                let task = self.host.schedule(delay);
                self.state.pending = Some(PendingHover { task, element });
            }
        }
        Disposition::Pass
    }

    pub(crate) fn hover_leave(&mut self, element: H::Element) -> Disposition {
        if self
            .state
            .pending
            .as_ref()
            .is_some_and(|pending| pending.element == element)
        {
            self.cancel_pending_hover();
        }

        if self.host.is_highlighted(&element) {
            self.host.set_highlight(&element, false);
        }
        if self.state.hovered.as_ref() == Some(&element) {
            self.state.hovered = None;
        }
        Disposition::Pass
    }

    pub(crate) fn key_down(&mut self, target: &H::Element, key: &str) -> Disposition {
        if self.is_self(target) {
            return Disposition::Pass;
        }

        if matches!(key, "Escape" | "Enter") {
            self.disable_picker();
        }
        Disposition::Pass
    }

    pub(crate) fn capture_click(&mut self, target: &H::Element) -> Disposition {
        if !self.state.picker_active || self.is_self(target) {
            return Disposition::Pass;
        }

        self.disable_picker();
        Disposition::Suppress
    }

    pub(crate) fn commit_deferred(&mut self, task: TaskId) {
        self.host.cancel(task);
        match self.state.pending.take() {
            Some(pending) if pending.task == task => self.commit_hover(pending.element),
            other => self.state.pending = other,
        }
    }

    fn commit_hover(&mut self, element: H::Element) {
        if !self.state.picker_active || self.is_self(&element) {
            return;
        }

        if let Some(previous) = self.state.hovered.take() {
            if previous != element {
                self.host.set_highlight(&previous, false);
            }
        }
        self.host.set_highlight(&element, true);
        self.update(element);
    }

    fn cancel_pending_hover(&mut self) {
        if let Some(pending) = self.state.pending.take() {
            self.host.cancel(pending.task);
        }
    }
}
