//! Binds the preview session to the portfolio grid and the overlay element.

use super::{body, query_all, query_within, set_class, set_style, targets};
use crate::config::EnhanceConfig;
use crate::error::EnhanceError;
use crate::log::{log_event, LogLevel};
use crate::preview::{DeviceMode, ItemId, PreviewEffect, PreviewImage, PreviewSession};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use js_sys::Reflect;
use serde_json::json;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, KeyboardEvent, Window};

const OVERLAY_ID: &str = "portfolioPreview";
const ITEM_SELECTOR: &str = ".portfolio-grid .portfolio-item";
const VISIBLE_CLASS: &str = "visible";

type SharedOverlay = Rc<RefCell<PreviewOverlay>>;

struct PreviewOverlay {
    session: PreviewSession,
    overlay: HtmlElement,
    image: HtmlImageElement,
    body: HtmlElement,
    hide_timer: Option<Timeout>,
}

impl PreviewOverlay {
    fn apply(&mut self, effect: PreviewEffect, weak: &Weak<RefCell<PreviewOverlay>>) {
        match effect {
            PreviewEffect::Display(image) => {
                self.image.set_src(&image.src);
                self.image.set_alt(&image.alt);
                set_class(&self.overlay, VISIBLE_CLASS, true);
                let _ = self.overlay.set_attribute("aria-hidden", "false");
            }
            PreviewEffect::Clear => {
                set_class(&self.overlay, VISIBLE_CLASS, false);
                let _ = self.overlay.set_attribute("aria-hidden", "true");
                let _ = self.image.remove_attribute("src");
                self.image.set_alt("");
            }
            PreviewEffect::LockScroll => set_style(&self.body, "overflow", "hidden"),
            PreviewEffect::UnlockScroll => {
                let _ = self.body.style().remove_property("overflow");
            }
            PreviewEffect::ScheduleHide { ticket, delay_ms } => {
                let weak = weak.clone();
                self.hide_timer = Some(Timeout::new(delay_ms, move || {
                    if let Some(shared) = weak.upgrade() {
                        dispatch(&shared, |session| session.hide_elapsed(ticket));
                    }
                }));
            }
            PreviewEffect::CancelHide(_) => {
                self.hide_timer.take();
            }
        }
    }
}

fn dispatch(
    shared: &SharedOverlay,
    transition: impl FnOnce(&mut PreviewSession) -> Vec<PreviewEffect>,
) {
    let weak = Rc::downgrade(shared);
    let mut overlay = shared.borrow_mut();
    let effects = transition(&mut overlay.session);
    for effect in effects {
        overlay.apply(effect, &weak);
    }
}

fn detect_device_mode(window: &Window) -> DeviceMode {
    let has_touch_events =
        Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false);
    DeviceMode::detect(has_touch_events, window.navigator().max_touch_points())
}

fn item_image(image: &HtmlImageElement) -> PreviewImage {
    PreviewImage::resolve(
        image.get_attribute("data-full"),
        Some(image.src()),
        Some(image.alt()),
    )
}

/// Pointer strategy: hover shows, leaving defers the hide so the pointer can
/// travel onto the overlay.
fn bind_pointer_item(shared: &SharedOverlay, item: &Element, index: ItemId, image: HtmlImageElement) {
    {
        let shared = shared.clone();
        EventListener::new(item, "mouseenter", move |_| {
            dispatch(&shared, |session| session.pointer_enter_item(index, item_image(&image)));
        })
        .forget();
    }

    let shared = shared.clone();
    EventListener::new(item, "mouseleave", move |_| {
        dispatch(&shared, PreviewSession::pointer_leave_item);
    })
    .forget();
}

fn bind_touch_item(shared: &SharedOverlay, item: &Element, index: ItemId, image: HtmlImageElement) {
    {
        let shared = shared.clone();
        let image = image.clone();
        EventListener::new_with_options(
            item,
            "touchstart",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                dispatch(&shared, |session| session.touch_start_item(index, item_image(&image)));
            },
        )
        .forget();
    }

    let shared = shared.clone();
    EventListener::new_with_options(
        item,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let mut prevent_default = false;
            dispatch(&shared, |session| {
                let outcome = session.tap_item(index, item_image(&image));
                prevent_default = outcome.prevent_default;
                outcome.effects
            });
            if prevent_default {
                event.prevent_default();
            }
        },
    )
    .forget();
}

fn bind_pointer_overlay(shared: &SharedOverlay, overlay: &HtmlElement) {
    {
        let shared = shared.clone();
        EventListener::new(overlay, "mouseenter", move |_| {
            dispatch(&shared, PreviewSession::pointer_enter_overlay);
        })
        .forget();
    }

    let shared = shared.clone();
    EventListener::new(overlay, "mouseleave", move |_| {
        dispatch(&shared, PreviewSession::pointer_leave_overlay);
    })
    .forget();
}

fn bind_touch_overlay(shared: &SharedOverlay, overlay: &HtmlElement) {
    let shared = shared.clone();
    let backdrop = overlay.clone();
    EventListener::new(overlay, "touchstart", move |event| {
        if targets(event, &backdrop) {
            dispatch(&shared, PreviewSession::backdrop_activated);
        }
    })
    .forget();
}

fn bind_dismissal(shared: &SharedOverlay, document: &Document, window: &Window, overlay: &HtmlElement) {
    {
        let shared = shared.clone();
        let backdrop = overlay.clone();
        EventListener::new(overlay, "click", move |event| {
            if targets(event, &backdrop) {
                dispatch(&shared, PreviewSession::backdrop_activated);
            }
        })
        .forget();
    }

    {
        let shared = shared.clone();
        EventListener::new(document, "keydown", move |event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .map(|event| event.key() == "Escape")
                .unwrap_or(false);
            if is_escape {
                dispatch(&shared, PreviewSession::escape_pressed);
            }
        })
        .forget();
    }

    let shared = shared.clone();
    EventListener::new(window, "scroll", move |_| {
        dispatch(&shared, PreviewSession::page_scrolled);
    })
    .forget();
}

/// Blanks the overlay image and re-assigns it after `reassign_delay_ms` so
/// the browser redraws it. The re-assign is dropped when another item took
/// over or the overlay closed in between.
fn refresh_image(shared: &SharedOverlay, reassign_delay_ms: u32) {
    let (image, active) = {
        let overlay = shared.borrow();
        if !overlay.session.is_visible() {
            return;
        }
        (overlay.image.clone(), overlay.session.active_item())
    };

    let current_src = image.src();
    if current_src.is_empty() {
        return;
    }
    image.set_src("");

    let shared = shared.clone();
    Timeout::new(reassign_delay_ms, move || {
        let unchanged = {
            let overlay = shared.borrow();
            overlay.session.is_visible() && overlay.session.active_item() == active
        };
        if unchanged && image.get_attribute("src").as_deref() == Some("") {
            image.set_src(&current_src);
        }
    })
    .forget();
}

fn bind_orientation_refresh(shared: &SharedOverlay, window: &Window, config: &EnhanceConfig) {
    let shared = shared.clone();
    let refresh_delay_ms = config.orientation_refresh_delay_ms;
    let reassign_delay_ms = config.orientation_reassign_delay_ms;

    EventListener::new(window, "orientationchange", move |_| {
        let shared = shared.clone();
        Timeout::new(refresh_delay_ms, move || refresh_image(&shared, reassign_delay_ms)).forget();
    })
    .forget();
}

pub(super) fn init(document: &Document, window: &Window, config: &EnhanceConfig) -> Result<(), EnhanceError> {
    let overlay = document
        .get_element_by_id(OVERLAY_ID)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or(EnhanceError::MissingElement("#portfolioPreview"))?;
    let image = query_within(&overlay, "img")
        .and_then(|element| element.dyn_into::<HtmlImageElement>().ok())
        .ok_or(EnhanceError::MissingElement("#portfolioPreview img"))?;

    let mode = detect_device_mode(window);
    let shared: SharedOverlay = Rc::new(RefCell::new(PreviewOverlay {
        session: PreviewSession::new(mode, config.preview_hide_delay_ms),
        overlay: overlay.clone(),
        image,
        body: body(document)?,
        hide_timer: None,
    }));

    let mut bound = 0usize;
    for (index, item) in query_all(document, ITEM_SELECTOR).into_iter().enumerate() {
        let Some(item_image) = query_within(&item, "img")
            .and_then(|element| element.dyn_into::<HtmlImageElement>().ok())
        else {
            continue;
        };

        match mode {
            DeviceMode::Pointer => bind_pointer_item(&shared, &item, index, item_image),
            DeviceMode::Touch => bind_touch_item(&shared, &item, index, item_image),
        }
        bound += 1;
    }

    match mode {
        DeviceMode::Pointer => bind_pointer_overlay(&shared, &overlay),
        DeviceMode::Touch => bind_touch_overlay(&shared, &overlay),
    }
    bind_dismissal(&shared, document, window, &overlay);
    bind_orientation_refresh(&shared, window, config);

    log_event(
        LogLevel::Debug,
        "preview_bound",
        json!({ "mode": mode.as_str(), "items": bound }),
    );

    Ok(())
}
