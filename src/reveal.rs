use std::collections::HashSet;

pub const VISIBLE_CLASS: &str = "visible";
pub const LOADED_CLASS: &str = "loaded";

/// How an intersection observer group is configured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealRule {
    pub selector: &'static str,
    pub threshold: f64,
    pub root_margin: &'static str,
    /// Stop observing an element once it has been revealed.
    pub unobserve_after_reveal: bool,
}

pub const FADE_IN: RevealRule = RevealRule {
    selector: ".fade-in",
    threshold: 0.1,
    root_margin: "0px 0px -50px 0px",
    unobserve_after_reveal: false,
};

pub const PROGRESS_BAR: RevealRule = RevealRule {
    selector: ".progress-bar",
    threshold: 0.3,
    root_margin: "0px",
    unobserve_after_reveal: true,
};

pub const SECTION: RevealRule = RevealRule {
    selector: ".section",
    threshold: 0.1,
    root_margin: "0px 0px -100px 0px",
    unobserve_after_reveal: false,
};

pub const EXPERIENCE_ITEM: RevealRule = RevealRule {
    selector: ".experience-item",
    threshold: 0.2,
    root_margin: "0px",
    unobserve_after_reveal: false,
};

/// Inline style triple applied before and after a reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
}

pub const SECTION_HIDDEN: RevealStyle = RevealStyle {
    opacity: "0",
    transform: "translateY(30px)",
};
pub const SECTION_SHOWN: RevealStyle = RevealStyle {
    opacity: "1",
    transform: "translateY(0)",
};
pub const SECTION_TRANSITION: &str = "opacity 0.4s ease-out, transform 0.4s ease-out";

pub const EXPERIENCE_HIDDEN: RevealStyle = RevealStyle {
    opacity: "0",
    transform: "translateX(-30px)",
};
pub const EXPERIENCE_SHOWN: RevealStyle = RevealStyle {
    opacity: "1",
    transform: "translateX(0)",
};

/// Stagger delay in seconds, rounded to the millisecond.
pub fn stagger_delay_seconds(index: usize, step_seconds: f64) -> f64 {
    (index as f64 * step_seconds * 1_000.0).round() / 1_000.0
}

pub fn stagger_transition(index: usize, step_seconds: f64) -> String {
    let delay = stagger_delay_seconds(index, step_seconds);
    format!("opacity 0.4s ease-out {delay}s, transform 0.4s ease-out {delay}s")
}

pub fn hero_fade_delay_ms(index: usize, step_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(step_ms)
}

/// Target width for a progress bar, from its `aria-valuenow`.
pub fn progress_width(value_now: Option<&str>) -> Option<String> {
    let raw = value_now?.trim();
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|_| format!("{raw}%"))
}

/// Remembers which elements already fired a one-shot reveal.
#[derive(Debug, Default)]
pub struct RevealLatch {
    fired: HashSet<usize>,
}

impl RevealLatch {
    /// `true` only the first time `id` fires.
    pub fn fire(&mut self, id: usize) -> bool {
        self.fired.insert(id)
    }

    #[cfg(test)]
    pub fn has_fired(&self, id: usize) -> bool {
        self.fired.contains(&id)
    }
}
