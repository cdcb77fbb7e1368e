use super::{query, query_within};
use crate::config::EnhanceConfig;
use crate::error::EnhanceError;
use crate::typewriter::{resolve_text, Typewriter, TypewriterTick, CURSOR_COMPLETE_CLASS};
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Document, Element};

struct TypewriterRun {
    typewriter: Typewriter,
    surface: Element,
    cursor: Option<Element>,
}

fn schedule(run: Rc<RefCell<TypewriterRun>>, delay_ms: u32) {
    Timeout::new(delay_ms, move || tick(run)).forget();
}

fn tick(run: Rc<RefCell<TypewriterRun>>) {
    let next_delay = {
        let mut guard = run.borrow_mut();
        let state = &mut *guard;
        let step_ms = state.typewriter.step_ms();

        match state.typewriter.tick() {
            TypewriterTick::Render(prefix) => {
                state.surface.set_text_content(Some(prefix));
                Some(step_ms)
            }
            TypewriterTick::Finished => {
                if let Some(cursor) = state.cursor.as_ref() {
                    let _ = cursor.class_list().add_1(CURSOR_COMPLETE_CLASS);
                }
                None
            }
            TypewriterTick::Idle => None,
        }
    };

    if let Some(delay_ms) = next_delay {
        schedule(run, delay_ms);
    }
}

pub(super) fn init(document: &Document, config: &EnhanceConfig) -> Result<(), EnhanceError> {
    let surface = document
        .get_element_by_id("heroTypewriter")
        .ok_or(EnhanceError::MissingElement("#heroTypewriter"))?;
    let tagline = query(document, ".hero-tagline")?;
    let cursor = query_within(&tagline, ".typewriter-cursor");

    let text = resolve_text(tagline.get_attribute("data-text"), tagline.text_content())
        .ok_or(EnhanceError::MissingValue("hero tagline text"))?;
    let typewriter = Typewriter::new(
        text,
        config.typewriter_start_delay_ms,
        config.typewriter_step_ms,
    )
    .ok_or(EnhanceError::MissingValue("hero tagline text"))?;

    let _ = tagline.set_attribute("aria-live", "polite");
    surface.set_text_content(Some(""));

    let start_delay_ms = typewriter.start_delay_ms();
    schedule(
        Rc::new(RefCell::new(TypewriterRun {
            typewriter,
            surface,
            cursor,
        })),
        start_delay_ms,
    );

    Ok(())
}
