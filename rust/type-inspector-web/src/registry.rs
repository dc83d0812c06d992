//! The single overlay a page can hold, and the exported entry points that
//! create and remove it.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use tracing::{debug, error, info, warn};
use type_inspector::{Disposition, InspectorError, MountOutcome, Overlay, OverlayEvent};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::{
    LocalStorageStore, WebHost, WebOverlay,
    assets::{ASSETS, HOST_ELEMENT_ID},
    config::page_config,
    logging,
};

thread_local! {
    static INSTANCE: RefCell<Option<Rc<RefCell<WebOverlay>>>> = const { RefCell::new(None) };
}

/// Attach the type inspector to the current page.
///
/// Does nothing when an overlay is already attached. Failures are logged to
/// the console and never thrown into the page.
#[wasm_bindgen]
pub fn mount() {
    match try_mount() {
        Ok(MountOutcome::Mounted) => {}
        Ok(MountOutcome::AlreadyMounted) => info!("Type inspector is already mounted"),
        Err(error) => error!(%error, "Type inspector failed to mount"),
    }
}

/// Remove the type inspector from the current page, if it is attached
#[wasm_bindgen]
pub fn unmount() {
    let Some(overlay) = INSTANCE.with(|instance| instance.borrow_mut().take()) else {
        return;
    };
    match overlay.try_borrow_mut() {
        Ok(mut overlay) => overlay.destroy(),
        // Torn down by Drop once the handler that holds it returns
        Err(_) => debug!("Unmount requested while the overlay is busy"),
    };
}

/// True while an overlay is attached to the current page
#[wasm_bindgen(js_name = isMounted)]
pub fn is_mounted() -> bool {
    INSTANCE.with(|instance| {
        instance.borrow().as_ref().is_some_and(|overlay| {
            overlay
                .try_borrow()
                .map_or(true, |overlay| overlay.is_mounted())
        })
    })
}

/// Listener and scheduled timer counts of the attached overlay, or `None`
/// when nothing is attached
pub fn active_handles() -> Option<(usize, usize)> {
    INSTANCE.with(|instance| {
        let instance = instance.borrow();
        let overlay = instance.as_ref()?.try_borrow().ok()?;
        Some((overlay.host().listener_count(), overlay.host().timer_count()))
    })
}

/// [`mount`], reporting the outcome instead of logging it
pub fn try_mount() -> Result<MountOutcome, InspectorError> {
    logging::init();

    if is_mounted() {
        return Ok(MountOutcome::AlreadyMounted);
    }

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| InspectorError::Host("no document to mount into".into()))?;
    if document.get_element_by_id(HOST_ELEMENT_ID).is_some() {
        warn!("Another type inspector is attached to this page");
        return Ok(MountOutcome::AlreadyMounted);
    }

    let config = page_config();
    let overlay = Rc::new_cyclic(|overlay: &Weak<RefCell<WebOverlay>>| {
        RefCell::new(Overlay::new(
            WebHost::new(document, overlay.clone()),
            LocalStorageStore::open(),
            config,
            ASSETS,
        ))
    });
    let outcome = overlay.borrow_mut().mount()?;

    INSTANCE.with(|instance| instance.replace(Some(overlay)));
    Ok(outcome)
}

/// Deliver `event` to the overlay behind `overlay`.
///
/// Returns `None` when the overlay is gone or already handling an event. An
/// overlay that unmounted itself (the close control) is released here.
pub(crate) fn dispatch(
    overlay: &Weak<RefCell<WebOverlay>>,
    event: OverlayEvent<Element>,
) -> Option<Disposition> {
    let overlay = overlay.upgrade()?;

    let (disposition, mounted) = {
        let Ok(mut inner) = overlay.try_borrow_mut() else {
            debug!("Dropped an event delivered while the overlay was busy");
            return None;
        };
        let disposition = inner.handle(event);
        (disposition, inner.is_mounted())
    };

    if !mounted {
        release(&overlay);
    }
    Some(disposition)
}

fn release(overlay: &Rc<RefCell<WebOverlay>>) {
    let released = INSTANCE.with(|instance| {
        let mut instance = instance.borrow_mut();
        match instance.as_ref() {
            Some(current) if Rc::ptr_eq(current, overlay) => instance.take(),
            _ => None,
        }
    });
    drop(released);
}
