use super::{body, query_all, query_all_html, ready_state, require_any, set_class, set_style};
use crate::config::EnhanceConfig;
use crate::error::EnhanceError;
use crate::reveal::{
    hero_fade_delay_ms, progress_width, stagger_transition, RevealLatch, RevealRule, RevealStyle,
    EXPERIENCE_HIDDEN, EXPERIENCE_ITEM, EXPERIENCE_SHOWN, FADE_IN, LOADED_CLASS, PROGRESS_BAR,
    SECTION, SECTION_HIDDEN, SECTION_SHOWN, SECTION_TRANSITION, VISIBLE_CLASS,
};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use js_sys::Array;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

const HERO_FADE_START_DELAY_MS: u32 = 100;

/// Observes `elements` and calls `on_reveal` for every intersecting entry.
fn observe<E: AsRef<Element>>(
    elements: &[E],
    rule: RevealRule,
    mut on_reveal: impl FnMut(&Element) + 'static,
) -> Result<IntersectionObserver, EnhanceError> {
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }

                let target = entry.target();
                on_reveal(&target);
                if rule.unobserve_after_reveal {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(rule.threshold));
    options.set_root_margin(rule.root_margin);

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for element in elements {
        observer.observe(element.as_ref());
    }

    Ok(observer)
}

fn apply_reveal_style(element: &HtmlElement, style: RevealStyle) {
    set_style(element, "opacity", style.opacity);
    set_style(element, "transform", style.transform);
}

pub(super) fn init_fade_in(document: &Document) -> Result<(), EnhanceError> {
    let elements = require_any(query_all(document, FADE_IN.selector), FADE_IN.selector)?;
    observe(&elements, FADE_IN, |target| set_class(target, VISIBLE_CLASS, true))?;
    Ok(())
}

pub(super) fn init_progress_bars(document: &Document) -> Result<(), EnhanceError> {
    let bars = Rc::new(require_any(
        query_all_html(document, PROGRESS_BAR.selector),
        PROGRESS_BAR.selector,
    )?);
    let latch = RefCell::new(RevealLatch::default());

    let tracked = bars.clone();
    observe(bars.as_slice(), PROGRESS_BAR, move |target| {
        let Some(index) = tracked.iter().position(|bar| {
            let bar: &Element = bar;
            bar == target
        }) else {
            return;
        };
        if !latch.borrow_mut().fire(index) {
            return;
        }

        if let Some(width) = progress_width(target.get_attribute("aria-valuenow").as_deref()) {
            set_style(&tracked[index], "width", &width);
        }
    })?;

    Ok(())
}

pub(super) fn init_sections(document: &Document) -> Result<(), EnhanceError> {
    let sections = require_any(query_all_html(document, SECTION.selector), SECTION.selector)?;

    for section in &sections {
        apply_reveal_style(section, SECTION_HIDDEN);
        set_style(section, "transition", SECTION_TRANSITION);
    }

    observe(&sections, SECTION, |target| {
        if let Some(section) = target.dyn_ref::<HtmlElement>() {
            apply_reveal_style(section, SECTION_SHOWN);
        }
    })?;

    Ok(())
}

pub(super) fn init_experience(document: &Document, config: &EnhanceConfig) -> Result<(), EnhanceError> {
    let items = require_any(
        query_all_html(document, EXPERIENCE_ITEM.selector),
        EXPERIENCE_ITEM.selector,
    )?;

    for (index, item) in items.iter().enumerate() {
        apply_reveal_style(item, EXPERIENCE_HIDDEN);
        set_style(item, "transition", &stagger_transition(index, config.stagger_step_seconds));
    }

    observe(&items, EXPERIENCE_ITEM, |target| {
        if let Some(item) = target.dyn_ref::<HtmlElement>() {
            apply_reveal_style(item, EXPERIENCE_SHOWN);
        }
    })?;

    Ok(())
}

/// After the window `load` event the body is marked loaded and hero
/// fade-ins cascade in.
pub(super) fn init_hero_fade(document: &Document, window: &Window, config: &EnhanceConfig) -> Result<(), EnhanceError> {
    let body = body(document)?;
    let hero_elements = query_all(document, ".hero-content .fade-in");
    let step_ms = config.hero_fade_step_ms;

    let reveal = move || {
        set_class(&body, LOADED_CLASS, true);
        Timeout::new(HERO_FADE_START_DELAY_MS, move || {
            for (index, element) in hero_elements.into_iter().enumerate() {
                Timeout::new(hero_fade_delay_ms(index, step_ms), move || {
                    set_class(&element, VISIBLE_CLASS, true);
                })
                .forget();
            }
        })
        .forget();
    };

    if ready_state(document) == "complete" {
        reveal();
    } else {
        EventListener::once(window, "load", move |_| reveal()).forget();
    }

    Ok(())
}
