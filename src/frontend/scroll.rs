use super::{query, query_all, query_all_html, require_any, scroll_y, set_class, set_style};
use crate::config::EnhanceConfig;
use crate::error::EnhanceError;
use crate::scroll::{navbar_is_scrolled, parallax_transform, FrameThrottle, ScrollAnimation, NAVBAR_SCROLLED_CLASS};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement, Window};

pub(super) fn init_navbar(document: &Document, window: &Window, config: &EnhanceConfig) -> Result<(), EnhanceError> {
    let navbar = query(document, "#navbar")?;
    let threshold = config.navbar_scroll_threshold;

    let scroll_window = window.clone();
    EventListener::new(window, "scroll", move |_| {
        set_class(
            &navbar,
            NAVBAR_SCROLLED_CLASS,
            navbar_is_scrolled(scroll_y(&scroll_window), threshold),
        );
    })
    .forget();

    Ok(())
}

#[derive(Default)]
struct ParallaxFrame {
    throttle: FrameThrottle,
    handle: Option<AnimationFrame>,
}

pub(super) fn init_parallax(document: &Document, window: &Window, config: &EnhanceConfig) -> Result<(), EnhanceError> {
    let elements = Rc::new(require_any(
        query_all_html(document, ".parallax-element"),
        ".parallax-element",
    )?);
    let speed = config.parallax_speed;
    let frame = Rc::new(RefCell::new(ParallaxFrame::default()));

    let scroll_window = window.clone();
    EventListener::new(window, "scroll", move |_| {
        if !frame.borrow_mut().throttle.request() {
            return;
        }

        let pending = frame.clone();
        let elements = elements.clone();
        let window = scroll_window.clone();
        let handle = request_animation_frame(move |_timestamp| {
            let transform = parallax_transform(scroll_y(&window), speed);
            for element in elements.iter() {
                set_style(element, "transform", &transform);
            }
            pending.borrow_mut().throttle.frame_ran();
        });
        frame.borrow_mut().handle = Some(handle);
    })
    .forget();

    Ok(())
}

type ActiveScroll = Rc<RefCell<Option<AnimationFrame>>>;

fn animate_scroll(
    active: ActiveScroll,
    window: Window,
    animation: ScrollAnimation,
    started_at: Option<f64>,
    hash: String,
) {
    let next = active.clone();
    let handle = request_animation_frame(move |timestamp| {
        let started_at = started_at.unwrap_or(timestamp);
        let elapsed = timestamp - started_at;
        window.scroll_to_with_x_and_y(0.0, animation.position_at(elapsed));

        if animation.is_done(elapsed) {
            let _ = window.location().set_hash(&hash);
            return;
        }
        animate_scroll(next, window, animation, Some(started_at), hash);
    });
    *active.borrow_mut() = Some(handle);
}

pub(super) fn init_smooth_scroll(document: &Document, window: &Window, config: &EnhanceConfig) -> Result<(), EnhanceError> {
    let links = require_any(query_all(document, "a.smooth-scroll"), "a.smooth-scroll")?;
    let active: ActiveScroll = Rc::new(RefCell::new(None));
    let header_offset = config.header_offset;
    let duration_ms = config.smooth_scroll_duration_ms;

    for link in links {
        let Ok(anchor) = link.dyn_into::<HtmlAnchorElement>() else {
            continue;
        };
        let document = document.clone();
        let window = window.clone();
        let active = active.clone();
        let target = anchor.clone();

        EventListener::new_with_options(
            &target,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let hash = anchor.hash();
                if hash.is_empty() {
                    return;
                }
                event.prevent_default();

                let Some(destination) = document.query_selector(&hash).ok().flatten() else {
                    return;
                };
                let animation = ScrollAnimation::to_anchor(
                    scroll_y(&window),
                    destination.get_bounding_client_rect().top(),
                    header_offset,
                    duration_ms,
                );
                animate_scroll(active.clone(), window.clone(), animation, None, hash);
            },
        )
        .forget();
    }

    Ok(())
}
