use super::{body, query_within};
use crate::error::EnhanceError;
use crate::log::{log_event, LogLevel};
use crate::theme::{persist_theme, resolve_theme, PreferenceStore, Theme, THEME_ATTRIBUTE};
use gloo::events::EventListener;
use js_sys::{Function, Reflect};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Storage, Window};

const TOGGLE_ID: &str = "themeToggle";

struct LocalStorage(Option<Storage>);

impl LocalStorage {
    fn open(window: &Window) -> Self {
        Self(window.local_storage().ok().flatten())
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = self.0.as_ref() {
            let _ = storage.set_item(key, value);
        }
    }
}

fn apply_theme(root: &Element, icon: &Element, theme: Theme) {
    let _ = root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    icon.set_class_name(theme.icon_class());
    let _ = icon.set_attribute("aria-label", &theme.toggle_label());
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Swaps the theme inside a view transition when the browser has one.
fn apply_theme_with_transition(window: &Window, document: &Document, root: &Element, icon: &Element, theme: Theme) {
    if prefers_reduced_motion(window) {
        apply_theme(root, icon, theme);
        return;
    }

    let document_js: &JsValue = document.as_ref();
    let Ok(start_view_transition) =
        Reflect::get(document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(root, icon, theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(root, icon, theme);
        return;
    };

    let callback = {
        let root = root.clone();
        let icon = icon.clone();
        Closure::once_into_js(move || apply_theme(&root, &icon, theme))
    };

    if start_view_transition.call1(document_js, &callback).is_err() {
        apply_theme(root, icon, theme);
    }
}

pub(super) fn init(document: &Document, window: &Window) -> Result<(), EnhanceError> {
    let root: Element = body(document)?.into();
    let toggle = document
        .get_element_by_id(TOGGLE_ID)
        .ok_or(EnhanceError::MissingElement("#themeToggle"))?;
    let icon = query_within(&toggle, "i").ok_or(EnhanceError::MissingElement("#themeToggle i"))?;

    let store = LocalStorage::open(window);
    let initial = resolve_theme(&store);
    apply_theme(&root, &icon, initial);

    // Source of truth for clicks; the transition writes the attribute later.
    let mut current = initial;
    let window = window.clone();
    let document = document.clone();
    EventListener::new(&toggle, "click", move |_| {
        let next = current.toggled();
        current = next;
        persist_theme(&store, next);
        apply_theme_with_transition(&window, &document, &root, &icon, next);
        log_event(LogLevel::Debug, "theme_toggled", json!({ "theme": next.as_str() }));
    })
    .forget();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_toggle(document: &Document) -> Element {
        let toggle = document.create_element("button").expect("create toggle");
        toggle.set_id(TOGGLE_ID);
        let icon = document.create_element("i").expect("create icon");
        toggle.append_child(&icon).expect("append icon");
        document
            .body()
            .expect("body available")
            .append_child(&toggle)
            .expect("mount toggle");
        toggle
    }

    #[wasm_bindgen_test]
    fn init_applies_stored_theme_and_icon() {
        let window = web_sys::window().expect("window available");
        let document = window.document().expect("document available");
        LocalStorage::open(&window).set(crate::theme::THEME_KEY, "light");
        let toggle = mount_toggle(&document);

        init(&document, &window).expect("theme wired");

        let body = document.body().expect("body available");
        assert_eq!(body.get_attribute(THEME_ATTRIBUTE).as_deref(), Some("light"));
        let icon = query_within(&toggle, "i").expect("icon present");
        assert_eq!(icon.class_name(), "fa fa-sun-o");
        assert_eq!(icon.get_attribute("aria-label").as_deref(), Some("Switch to dark mode"));

        toggle.remove();
    }

    #[wasm_bindgen_test]
    async fn back_to_back_toggles_restore_attribute_and_storage() {
        let window = web_sys::window().expect("window available");
        let document = window.document().expect("document available");
        let store = LocalStorage::open(&window);
        store.set(crate::theme::THEME_KEY, "dark");
        let toggle = mount_toggle(&document);

        init(&document, &window).expect("theme wired");
        let button = toggle.dyn_ref::<HtmlElement>().expect("toggle is html");
        button.click();
        button.click();

        assert_eq!(store.get(crate::theme::THEME_KEY).as_deref(), Some("dark"));

        TimeoutFuture::new(300).await;

        let body = document.body().expect("body available");
        assert_eq!(body.get_attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
        let icon = query_within(&toggle, "i").expect("icon present");
        assert_eq!(icon.class_name(), "fa fa-moon-o");

        toggle.remove();
    }

    #[wasm_bindgen_test]
    fn missing_icon_is_reported_not_thrown() {
        let window = web_sys::window().expect("window available");
        let document = window.document().expect("document available");
        let toggle = document.create_element("button").expect("create toggle");
        toggle.set_id(TOGGLE_ID);
        document
            .body()
            .expect("body available")
            .append_child(&toggle)
            .expect("mount toggle");

        let result = init(&document, &window);
        assert_eq!(result, Err(EnhanceError::MissingElement("#themeToggle i")));

        toggle.remove();
    }
}
