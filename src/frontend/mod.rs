use crate::config::{EnhanceConfig, CONFIG_ELEMENT_ID};
use crate::error::EnhanceError;
use crate::log::{self, log_event, LogLevel};
use gloo::events::EventListener;
use js_sys::Reflect;
use serde_json::json;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

mod preview;
mod reveal;
mod scroll;
mod theme;
mod typewriter;
mod widgets;

fn browser_window() -> Result<Window, EnhanceError> {
    window().ok_or(EnhanceError::MissingElement("window"))
}

fn body(document: &Document) -> Result<HtmlElement, EnhanceError> {
    document.body().ok_or(EnhanceError::MissingElement("body"))
}

fn query(root: &Document, selector: &'static str) -> Result<Element, EnhanceError> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .ok_or(EnhanceError::MissingElement(selector))
}

fn query_within(root: &Element, selector: &'static str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn elements_of(nodes: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(nodes) = nodes else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    elements_of(root.query_selector_all(selector))
}

fn query_all_within(root: &Element, selector: &str) -> Vec<Element> {
    elements_of(root.query_selector_all(selector))
}

fn query_all_html(root: &Document, selector: &str) -> Vec<HtmlElement> {
    query_all(root, selector)
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn require_any<T>(elements: Vec<T>, selector: &'static str) -> Result<Vec<T>, EnhanceError> {
    if elements.is_empty() {
        Err(EnhanceError::MissingElement(selector))
    } else {
        Ok(elements)
    }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

fn set_class(element: &Element, class: &str, enabled: bool) {
    let _ = element.class_list().toggle_with_force(class, enabled);
}

fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Whether the event was dispatched on `element` itself rather than a child.
fn targets(event: &Event, element: &Element) -> bool {
    let element: &EventTarget = element.as_ref();
    event.target().as_ref() == Some(element)
}

/// `document.readyState`, read reflectively.
fn ready_state(document: &Document) -> String {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default()
}

fn load_config(document: &Document) -> EnhanceConfig {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return EnhanceConfig::default();
    };

    let raw = element.text_content().unwrap_or_default();
    match EnhanceConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            log_event(
                LogLevel::Warn,
                "config_invalid",
                json!({ "error": err.to_string() }),
            );
            EnhanceConfig::default()
        }
    }
}

fn report(feature: &'static str, absent_level: LogLevel, result: Result<(), EnhanceError>) {
    match result {
        Ok(()) => log_event(LogLevel::Debug, "feature_ready", json!({ "feature": feature })),
        Err(err) => {
            let level = if err.is_absent_feature() {
                absent_level
            } else {
                LogLevel::Warn
            };
            log_event(
                level,
                "feature_skipped",
                json!({ "feature": feature, "reason": err.to_string() }),
            );
        }
    }
}

fn enhance(document: &Document, window: &Window) {
    let config = load_config(document);
    log::set_level(config.log_level);

    report("theme", LogLevel::Warn, theme::init(document, window));
    report("typewriter", LogLevel::Debug, typewriter::init(document, &config));
    report("preview", LogLevel::Debug, preview::init(document, window, &config));
    report("navbar", LogLevel::Debug, scroll::init_navbar(document, window, &config));
    report("smooth_scroll", LogLevel::Debug, scroll::init_smooth_scroll(document, window, &config));
    report("fade_in", LogLevel::Debug, reveal::init_fade_in(document));
    report("parallax", LogLevel::Debug, scroll::init_parallax(document, window, &config));
    report("progress", LogLevel::Debug, reveal::init_progress_bars(document));
    report("hover_effects", LogLevel::Debug, widgets::init_hover_effects(document));
    report("ripple", LogLevel::Debug, widgets::init_ripple(document, &config));
    report("sections", LogLevel::Debug, reveal::init_sections(document));
    report("experience", LogLevel::Debug, reveal::init_experience(document, &config));
    report("carousel", LogLevel::Debug, widgets::init_carousel(document, &config));
    report("nav_menu", LogLevel::Debug, widgets::init_nav_menu(document, window, &config));
    report("landscape", LogLevel::Debug, widgets::init_landscape(document, window, &config));
    report("hero_fade", LogLevel::Debug, reveal::init_hero_fade(document, window, &config));
    report("transitions", LogLevel::Debug, widgets::init_interactive_transitions(document));

    log_event(LogLevel::Info, "enhancements_ready", json!({}));
}

pub fn run() {
    console_error_panic_hook::set_once();

    let Ok(window) = browser_window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if ready_state(&document) != "loading" {
        enhance(&document, &window);
        return;
    }

    let ready_document = document.clone();
    EventListener::once(&document, "DOMContentLoaded", move |_| {
        enhance(&ready_document, &window);
    })
    .forget();
}
