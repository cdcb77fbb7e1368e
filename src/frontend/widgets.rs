use super::{
    body, query, query_all, query_all_html, query_all_within, require_any, set_class, set_style,
    viewport_size,
};
use crate::config::EnhanceConfig;
use crate::error::EnhanceError;
use crate::widgets::{
    is_landscape, Carousel, NavMenu, RippleGeometry, SlideDirection, BODY_MENU_OPEN_CLASS,
    CAROUSEL_ACTIVE_CLASS, LANDSCAPE_CLASS, PANEL_SHOWN_CLASS, RIPPLE_CLASS, RIPPLE_STYLES,
    RIPPLE_STYLE_ID, TOGGLER_ACTIVE_CLASS,
};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::{Interval, Timeout};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent, Window};

const INTERACTIVE_TRANSITION: &str = "all 0.3s cubic-bezier(0.25, 0.46, 0.45, 0.94)";
const GLASS_SHADOW_RAISED: &str = "0 12px 48px 0 rgba(31, 38, 135, 0.2)";
const GLASS_SHADOW_RESTING: &str = "0 8px 32px 0 rgba(31, 38, 135, 0.1)";

fn on_hover(element: &Element, mut enter: impl FnMut() + 'static, mut leave: impl FnMut() + 'static) {
    EventListener::new(element, "mouseenter", move |_| enter()).forget();
    EventListener::new(element, "mouseleave", move |_| leave()).forget();
}

pub(super) fn init_hover_effects(document: &Document) -> Result<(), EnhanceError> {
    let items = query_all(document, ".portfolio-item");
    let panels = query_all_html(document, ".liquid-glass");
    if items.is_empty() && panels.is_empty() {
        return Err(EnhanceError::MissingElement(".portfolio-item, .liquid-glass"));
    }

    for item in &items {
        let images: Vec<HtmlElement> = query_all_within(item, "img")
            .into_iter()
            .filter_map(|image| image.dyn_into::<HtmlElement>().ok())
            .collect();
        let zoomed = images.clone();
        on_hover(
            item,
            move || zoomed.iter().for_each(|image| set_style(image, "transform", "scale(1.1)")),
            move || images.iter().for_each(|image| set_style(image, "transform", "scale(1)")),
        );
    }

    for panel in panels {
        let raised = panel.clone();
        let resting = panel.clone();
        on_hover(
            &panel,
            move || {
                set_style(&raised, "transform", "translateY(-4px)");
                set_style(&raised, "box-shadow", GLASS_SHADOW_RAISED);
            },
            move || {
                set_style(&resting, "transform", "translateY(0)");
                set_style(&resting, "box-shadow", GLASS_SHADOW_RESTING);
            },
        );
    }

    Ok(())
}

pub(super) fn init_interactive_transitions(document: &Document) -> Result<(), EnhanceError> {
    let elements = require_any(
        query_all_html(document, "a, button, .card, .portfolio-item"),
        "a, button, .card, .portfolio-item",
    )?;
    for element in &elements {
        set_style(element, "transition", INTERACTIVE_TRANSITION);
    }
    Ok(())
}

/// Injects the ripple keyframes once per document.
fn ensure_ripple_styles(document: &Document) -> Result<(), EnhanceError> {
    if document.get_element_by_id(RIPPLE_STYLE_ID).is_some() {
        return Ok(());
    }

    let head = document.head().ok_or(EnhanceError::MissingElement("head"))?;
    let style = document.create_element("style")?;
    style.set_id(RIPPLE_STYLE_ID);
    style.set_text_content(Some(RIPPLE_STYLES));
    head.append_child(&style)?;
    Ok(())
}

pub(super) fn init_ripple(document: &Document, config: &EnhanceConfig) -> Result<(), EnhanceError> {
    ensure_ripple_styles(document)?;

    let buttons = require_any(
        query_all(document, ".btn-primary, .btn-secondary"),
        ".btn-primary, .btn-secondary",
    )?;
    let lifetime_ms = config.ripple_lifetime_ms;

    for button in buttons {
        let document = document.clone();
        let host = button.clone();
        EventListener::new(&button, "click", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let Ok(ripple) = document.create_element("span") else {
                return;
            };

            let rect = host.get_bounding_client_rect();
            let geometry = RippleGeometry::from_click(
                rect.left(),
                rect.top(),
                rect.width(),
                rect.height(),
                f64::from(event.client_x()),
                f64::from(event.client_y()),
            );
            ripple.set_class_name(RIPPLE_CLASS);
            let _ = ripple.set_attribute("style", &geometry.style());
            if host.append_child(&ripple).is_err() {
                return;
            }

            Timeout::new(lifetime_ms, move || ripple.remove()).forget();
        })
        .forget();
    }

    Ok(())
}

struct CarouselView {
    carousel: Carousel,
    slides: Vec<Element>,
    indicators: Vec<Element>,
}

impl CarouselView {
    fn render(&self) {
        let active = self.carousel.index();
        for (index, slide) in self.slides.iter().enumerate() {
            set_class(slide, CAROUSEL_ACTIVE_CLASS, index == active);
        }
        for indicator in &self.indicators {
            let target = indicator
                .get_attribute("data-slide-to")
                .and_then(|value| value.trim().parse::<usize>().ok());
            set_class(indicator, CAROUSEL_ACTIVE_CLASS, target == Some(active));
        }
    }
}

pub(super) fn init_carousel(document: &Document, config: &EnhanceConfig) -> Result<(), EnhanceError> {
    let root = document
        .get_element_by_id("referenceCarousel")
        .ok_or(EnhanceError::MissingElement("#referenceCarousel"))?;
    let slides = query_all_within(&root, ".carousel-item");
    let initial = slides
        .iter()
        .position(|slide| slide.class_list().contains(CAROUSEL_ACTIVE_CLASS))
        .unwrap_or(0);
    let carousel = Carousel::new(slides.len(), initial)
        .ok_or(EnhanceError::MissingElement("#referenceCarousel .carousel-item"))?;

    let view = Rc::new(RefCell::new(CarouselView {
        carousel,
        indicators: query_all_within(&root, "[data-slide-to]"),
        slides,
    }));
    view.borrow().render();

    {
        let view = view.clone();
        Interval::new(config.carousel_interval_ms, move || {
            let mut view = view.borrow_mut();
            if view.carousel.auto_advance().is_some() {
                view.render();
            }
        })
        .forget();
    }

    {
        let paused = view.clone();
        let resumed = view.clone();
        on_hover(
            &root,
            move || paused.borrow_mut().carousel.set_paused(true),
            move || resumed.borrow_mut().carousel.set_paused(false),
        );
    }

    for control in query_all_within(&root, "[data-slide]") {
        let Some(direction) = control
            .get_attribute("data-slide")
            .and_then(|value| SlideDirection::from_attribute(&value))
        else {
            continue;
        };
        let view = view.clone();
        EventListener::new_with_options(
            &control,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                let mut view = view.borrow_mut();
                view.carousel.step(direction);
                view.render();
            },
        )
        .forget();
    }

    let indicators = view.borrow().indicators.clone();
    for indicator in indicators {
        let Some(target) = indicator
            .get_attribute("data-slide-to")
            .and_then(|value| value.trim().parse::<usize>().ok())
        else {
            continue;
        };
        let view = view.clone();
        EventListener::new(&indicator, "click", move |_| {
            let mut view = view.borrow_mut();
            if view.carousel.go_to(target).is_some() {
                view.render();
            }
        })
        .forget();
    }

    Ok(())
}

#[derive(Clone)]
struct NavElements {
    toggler: Element,
    panel: Element,
    body: HtmlElement,
}

impl NavElements {
    fn render(&self, open: bool) {
        set_class(&self.toggler, TOGGLER_ACTIVE_CLASS, open);
        set_class(&self.panel, PANEL_SHOWN_CLASS, open);
        set_class(&self.body, BODY_MENU_OPEN_CLASS, open);
    }
}

pub(super) fn init_nav_menu(document: &Document, window: &Window, config: &EnhanceConfig) -> Result<(), EnhanceError> {
    let elements = NavElements {
        toggler: query(document, ".navbar-toggler")?,
        panel: document
            .get_element_by_id("navigation")
            .ok_or(EnhanceError::MissingElement("#navigation"))?,
        body: body(document)?,
    };
    let links = query_all(document, ".nav-link");
    let window = window.clone();
    bind_nav_menu(document, elements, &links, config.nav_breakpoint, move || {
        viewport_size(&window).0
    });
    Ok(())
}

fn bind_nav_menu(
    document: &Document,
    elements: NavElements,
    links: &[Element],
    breakpoint: f64,
    viewport_width: impl Fn() -> f64 + 'static,
) {
    let elements = Rc::new(elements);
    let menu = Rc::new(RefCell::new(NavMenu::default()));
    menu.borrow_mut()
        .sync(elements.panel.class_list().contains(PANEL_SHOWN_CLASS));

    {
        let toggler = elements.toggler.clone();
        let elements = elements.clone();
        let menu = menu.clone();
        EventListener::new_with_options(
            &toggler,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                event.stop_propagation();
                let open = menu.borrow_mut().toggle();
                elements.render(open);
            },
        )
        .forget();
    }

    let collapse = Rc::new(move || {
        if menu.borrow_mut().collapse_if_narrow(viewport_width(), breakpoint) {
            elements.render(false);
        }
    });

    for link in links {
        let collapse = collapse.clone();
        EventListener::new(link, "click", move |_| collapse()).forget();
    }

    EventListener::new(document, "click", move |event| {
        let inside_navbar = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|target| target.closest(".navbar").ok().flatten())
            .is_some();
        if !inside_navbar {
            collapse();
        }
    })
    .forget();
}

pub(super) fn init_landscape(document: &Document, window: &Window, config: &EnhanceConfig) -> Result<(), EnhanceError> {
    let body = body(document)?;
    let min_width = config.landscape_min_width;

    let adjust = {
        let window = window.clone();
        Rc::new(move || {
            let (width, height) = viewport_size(&window);
            set_class(&body, LANDSCAPE_CLASS, is_landscape(width, height, min_width));
        })
    };
    adjust();

    for event_type in ["resize", "orientationchange"] {
        let adjust = adjust.clone();
        EventListener::new(window, event_type, move |_| adjust()).forget();
    }

    Ok(())
}
