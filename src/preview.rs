//! Hover/touch preview overlay for the portfolio grid.
//!
//! `PreviewSession` is a two-state machine (`Hidden`, `Visible(item)`) that
//! never touches the DOM. Every transition returns the effects the caller
//! must apply, including scheduling and cancelling the deferred hide. The
//! session hands out a fresh `HideTicket` per scheduled hide and ignores any
//! ticket that is not the one currently pending, so a superseded timer that
//! fires late cannot hide a preview that was re-shown.

pub const DEFAULT_PREVIEW_ALT: &str = "Portfolio preview";

pub type ItemId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceMode {
    Pointer,
    Touch,
}

impl DeviceMode {
    pub fn detect(has_touch_events: bool, max_touch_points: i32) -> Self {
        if has_touch_events || max_touch_points > 0 {
            Self::Touch
        } else {
            Self::Pointer
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Touch => "touch",
        }
    }

    fn locks_scroll(self) -> bool {
        matches!(self, Self::Touch)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HideTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewState {
    Hidden,
    Visible(ItemId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewImage {
    pub src: String,
    pub alt: String,
}

impl PreviewImage {
    /// Full-resolution source wins over the rendered one; alt falls back to
    /// a generic label.
    pub fn resolve(full_src: Option<String>, rendered_src: Option<String>, alt: Option<String>) -> Self {
        let src = full_src
            .filter(|value| !value.is_empty())
            .or(rendered_src)
            .unwrap_or_default();
        let alt = alt
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_PREVIEW_ALT.to_string());

        Self { src, alt }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewEffect {
    Display(PreviewImage),
    Clear,
    LockScroll,
    UnlockScroll,
    ScheduleHide { ticket: HideTicket, delay_ms: u32 },
    CancelHide(HideTicket),
}

#[derive(Debug, PartialEq, Eq)]
pub struct TapOutcome {
    pub prevent_default: bool,
    pub effects: Vec<PreviewEffect>,
}

#[derive(Debug)]
pub struct PreviewSession {
    mode: DeviceMode,
    hide_delay_ms: u32,
    state: PreviewState,
    pending_hide: Option<HideTicket>,
    scroll_locked: bool,
    next_ticket: u64,
}

impl PreviewSession {
    pub fn new(mode: DeviceMode, hide_delay_ms: u32) -> Self {
        Self {
            mode,
            hide_delay_ms,
            state: PreviewState::Hidden,
            pending_hide: None,
            scroll_locked: false,
            next_ticket: 1,
        }
    }

    pub fn active_item(&self) -> Option<ItemId> {
        match self.state {
            PreviewState::Visible(item) => Some(item),
            PreviewState::Hidden => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, PreviewState::Visible(_))
    }

    #[cfg(test)]
    pub fn pending_hide(&self) -> Option<HideTicket> {
        self.pending_hide
    }

    #[cfg(test)]
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn show(&mut self, item: ItemId, image: PreviewImage) -> Vec<PreviewEffect> {
        let mut effects = self.cancel_pending_hide();

        if image.src.is_empty() {
            return effects;
        }

        effects.push(PreviewEffect::Display(image));
        if self.mode.locks_scroll() && !self.scroll_locked {
            self.scroll_locked = true;
            effects.push(PreviewEffect::LockScroll);
        }
        self.state = PreviewState::Visible(item);

        effects
    }

    pub fn hide(&mut self) -> Vec<PreviewEffect> {
        let mut effects = self.cancel_pending_hide();

        if self.is_visible() {
            effects.push(PreviewEffect::Clear);
            self.state = PreviewState::Hidden;
        }
        if self.scroll_locked {
            self.scroll_locked = false;
            effects.push(PreviewEffect::UnlockScroll);
        }

        effects
    }

    /// Replaces any outstanding hide with a fresh one.
    pub fn schedule_hide(&mut self) -> Vec<PreviewEffect> {
        let mut effects = self.cancel_pending_hide();

        if self.is_visible() {
            let ticket = HideTicket(self.next_ticket);
            self.next_ticket += 1;
            self.pending_hide = Some(ticket);
            effects.push(PreviewEffect::ScheduleHide {
                ticket,
                delay_ms: self.hide_delay_ms,
            });
        }

        effects
    }

    pub fn cancel_pending_hide(&mut self) -> Vec<PreviewEffect> {
        self.pending_hide
            .take()
            .map(PreviewEffect::CancelHide)
            .into_iter()
            .collect()
    }

    /// Called when a scheduled hide timer fires.
    pub fn hide_elapsed(&mut self, ticket: HideTicket) -> Vec<PreviewEffect> {
        if self.pending_hide != Some(ticket) {
            return Vec::new();
        }

        self.pending_hide = None;
        self.hide()
    }

    pub fn pointer_enter_item(&mut self, item: ItemId, image: PreviewImage) -> Vec<PreviewEffect> {
        self.show(item, image)
    }

    pub fn pointer_leave_item(&mut self) -> Vec<PreviewEffect> {
        self.schedule_hide()
    }

    pub fn pointer_enter_overlay(&mut self) -> Vec<PreviewEffect> {
        self.cancel_pending_hide()
    }

    pub fn pointer_leave_overlay(&mut self) -> Vec<PreviewEffect> {
        self.hide()
    }

    pub fn touch_start_item(&mut self, item: ItemId, image: PreviewImage) -> Vec<PreviewEffect> {
        self.show(item, image)
    }

    /// Tapping the already-active item lets its default action run.
    pub fn tap_item(&mut self, item: ItemId, image: PreviewImage) -> TapOutcome {
        if self.active_item() == Some(item) {
            return TapOutcome {
                prevent_default: false,
                effects: Vec::new(),
            };
        }

        TapOutcome {
            prevent_default: true,
            effects: self.show(item, image),
        }
    }

    pub fn backdrop_activated(&mut self) -> Vec<PreviewEffect> {
        self.hide()
    }

    pub fn escape_pressed(&mut self) -> Vec<PreviewEffect> {
        self.hide()
    }

    pub fn page_scrolled(&mut self) -> Vec<PreviewEffect> {
        self.hide()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(src: &str, alt: &str) -> PreviewImage {
        PreviewImage {
            src: src.to_string(),
            alt: alt.to_string(),
        }
    }

    /// Applies effects against a virtual clock and records what the overlay
    /// would have shown.
    struct Harness {
        session: PreviewSession,
        now_ms: u64,
        timers: Vec<(u64, HideTicket)>,
        displayed: Option<PreviewImage>,
        body_locked: bool,
        clears: usize,
    }

    impl Harness {
        fn new(mode: DeviceMode) -> Self {
            Self {
                session: PreviewSession::new(mode, 120),
                now_ms: 0,
                timers: Vec::new(),
                displayed: None,
                body_locked: false,
                clears: 0,
            }
        }

        fn apply(&mut self, effects: Vec<PreviewEffect>) {
            for effect in effects {
                match effect {
                    PreviewEffect::Display(image) => self.displayed = Some(image),
                    PreviewEffect::Clear => {
                        self.displayed = None;
                        self.clears += 1;
                    }
                    PreviewEffect::LockScroll => {
                        assert!(!self.body_locked, "scroll locked twice");
                        self.body_locked = true;
                    }
                    PreviewEffect::UnlockScroll => {
                        assert!(self.body_locked, "unlock without lock");
                        self.body_locked = false;
                    }
                    PreviewEffect::ScheduleHide { ticket, delay_ms } => {
                        self.timers.push((self.now_ms + u64::from(delay_ms), ticket));
                    }
                    PreviewEffect::CancelHide(ticket) => {
                        self.timers.retain(|(_, pending)| *pending != ticket);
                    }
                }
            }
        }

        fn advance(&mut self, ms: u64) {
            let target = self.now_ms + ms;
            loop {
                self.timers.sort_by_key(|(due, _)| *due);
                let Some(&(due, ticket)) = self.timers.first() else {
                    break;
                };
                if due > target {
                    break;
                }
                self.timers.remove(0);
                self.now_ms = due;
                let effects = self.session.hide_elapsed(ticket);
                self.apply(effects);
            }
            self.now_ms = target;
        }

        fn run(&mut self, step: impl FnOnce(&mut PreviewSession) -> Vec<PreviewEffect>) {
            let effects = step(&mut self.session);
            self.apply(effects);
        }
    }

    #[test]
    fn device_mode_is_touch_when_any_touch_signal_is_present() {
        assert_eq!(DeviceMode::detect(false, 0), DeviceMode::Pointer);
        assert_eq!(DeviceMode::detect(true, 0), DeviceMode::Touch);
        assert_eq!(DeviceMode::detect(false, 5), DeviceMode::Touch);
    }

    #[test]
    fn image_prefers_full_resolution_source() {
        let resolved = PreviewImage::resolve(
            Some("big.jpg".to_string()),
            Some("thumb.jpg".to_string()),
            Some("Portfolio A".to_string()),
        );
        assert_eq!(resolved, image("big.jpg", "Portfolio A"));

        let fallback = PreviewImage::resolve(None, Some("thumb.jpg".to_string()), Some(String::new()));
        assert_eq!(fallback, image("thumb.jpg", DEFAULT_PREVIEW_ALT));
    }

    #[test]
    fn hover_shows_then_leave_hides_after_delay() {
        let mut harness = Harness::new(DeviceMode::Pointer);

        harness.run(|session| session.pointer_enter_item(0, image("big.jpg", "Portfolio A")));
        assert_eq!(harness.displayed, Some(image("big.jpg", "Portfolio A")));
        assert_eq!(harness.session.active_item(), Some(0));

        harness.run(PreviewSession::pointer_leave_item);
        harness.advance(119);
        assert!(harness.session.is_visible());

        harness.advance(1);
        assert!(!harness.session.is_visible());
        assert_eq!(harness.displayed, None);
        assert_eq!(harness.session.active_item(), None);
    }

    #[test]
    fn reenter_within_grace_period_never_flickers() {
        let mut harness = Harness::new(DeviceMode::Pointer);

        harness.run(|session| session.pointer_enter_item(0, image("big.jpg", "Portfolio A")));
        harness.advance(10);
        harness.run(PreviewSession::pointer_leave_item);
        harness.advance(60);
        harness.run(|session| session.pointer_enter_item(0, image("big.jpg", "Portfolio A")));
        harness.advance(1_000);

        assert_eq!(harness.clears, 0);
        assert!(harness.session.is_visible());
        assert_eq!(harness.displayed, Some(image("big.jpg", "Portfolio A")));
        assert!(harness.timers.is_empty());
    }

    #[test]
    fn moving_onto_overlay_cancels_pending_hide() {
        let mut harness = Harness::new(DeviceMode::Pointer);

        harness.run(|session| session.pointer_enter_item(2, image("c.jpg", "C")));
        harness.run(PreviewSession::pointer_leave_item);
        harness.advance(50);
        harness.run(PreviewSession::pointer_enter_overlay);
        harness.advance(500);
        assert!(harness.session.is_visible());

        harness.run(PreviewSession::pointer_leave_overlay);
        assert!(!harness.session.is_visible());
    }

    #[test]
    fn rapid_leave_events_keep_a_single_timer() {
        let mut harness = Harness::new(DeviceMode::Pointer);

        harness.run(|session| session.pointer_enter_item(0, image("a.jpg", "A")));
        for _ in 0..5 {
            harness.run(PreviewSession::pointer_leave_item);
            harness.advance(30);
        }

        assert_eq!(harness.timers.len(), 1);
        assert!(harness.session.pending_hide().is_some());
        harness.advance(120);
        assert!(!harness.session.is_visible());
        assert_eq!(harness.clears, 1);
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut session = PreviewSession::new(DeviceMode::Pointer, 120);
        session.show(0, image("a.jpg", "A"));

        let first = match session.schedule_hide().as_slice() {
            [PreviewEffect::ScheduleHide { ticket, delay_ms: 120 }] => *ticket,
            other => panic!("unexpected effects {other:?}"),
        };
        let effects = session.show(1, image("b.jpg", "B"));
        assert_eq!(effects.first(), Some(&PreviewEffect::CancelHide(first)));

        assert!(session.hide_elapsed(first).is_empty());
        assert_eq!(session.active_item(), Some(1));
    }

    #[test]
    fn show_without_source_only_cancels_pending_hide() {
        let mut session = PreviewSession::new(DeviceMode::Pointer, 120);
        session.show(0, image("a.jpg", "A"));
        session.schedule_hide();

        let effects = session.show(1, image("", "B"));
        assert!(matches!(effects.as_slice(), [PreviewEffect::CancelHide(_)]));
        assert_eq!(session.active_item(), Some(0));
    }

    #[test]
    fn touch_show_locks_scroll_and_every_hide_path_unlocks() {
        let hide_paths: [fn(&mut PreviewSession) -> Vec<PreviewEffect>; 4] = [
            PreviewSession::backdrop_activated,
            PreviewSession::escape_pressed,
            PreviewSession::page_scrolled,
            PreviewSession::hide,
        ];

        for hide in hide_paths {
            let mut harness = Harness::new(DeviceMode::Touch);
            harness.run(|session| session.touch_start_item(0, image("a.jpg", "A")));
            assert!(harness.body_locked);

            harness.run(|session| session.touch_start_item(1, image("b.jpg", "B")));
            assert!(harness.body_locked);

            harness.run(hide);
            assert!(!harness.body_locked);
            assert!(!harness.session.scroll_locked());
            assert!(!harness.session.is_visible());
        }
    }

    #[test]
    fn pointer_mode_never_locks_scroll() {
        let mut session = PreviewSession::new(DeviceMode::Pointer, 120);
        let effects = session.show(0, image("a.jpg", "A"));

        assert!(!effects.contains(&PreviewEffect::LockScroll));
        assert!(!session.hide().contains(&PreviewEffect::UnlockScroll));
    }

    #[test]
    fn tap_on_other_item_switches_and_suppresses_default() {
        let mut session = PreviewSession::new(DeviceMode::Touch, 120);
        session.touch_start_item(0, image("a.jpg", "A"));

        let same = session.tap_item(0, image("a.jpg", "A"));
        assert!(!same.prevent_default);
        assert!(same.effects.is_empty());

        let other = session.tap_item(3, image("d.jpg", "D"));
        assert!(other.prevent_default);
        assert!(other.effects.contains(&PreviewEffect::Display(image("d.jpg", "D"))));
        assert_eq!(session.active_item(), Some(3));
    }

    #[test]
    fn hide_when_already_hidden_is_silent() {
        let mut session = PreviewSession::new(DeviceMode::Touch, 120);
        assert!(session.page_scrolled().is_empty());
        assert!(session.escape_pressed().is_empty());
    }

    #[test]
    fn arbitrary_interleavings_keep_session_invariants() {
        for seed in 1..=64u64 {
            let mode = if seed % 2 == 0 { DeviceMode::Touch } else { DeviceMode::Pointer };
            let mut harness = Harness::new(mode);
            let mut state = seed;

            for _ in 0..200 {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                let roll = (state >> 33) % 9;
                let item = ((state >> 40) % 4) as ItemId;
                let shown = image(&format!("{item}.jpg"), "item");

                match roll {
                    0 => harness.run(|session| session.pointer_enter_item(item, shown)),
                    1 => harness.run(PreviewSession::pointer_leave_item),
                    2 => harness.run(PreviewSession::pointer_enter_overlay),
                    3 => harness.run(PreviewSession::pointer_leave_overlay),
                    4 => harness.run(|session| session.tap_item(item, shown).effects),
                    5 => harness.run(PreviewSession::escape_pressed),
                    6 => harness.run(PreviewSession::page_scrolled),
                    7 => harness.run(|session| session.touch_start_item(item, shown)),
                    _ => harness.advance((state >> 20) % 200),
                }

                assert!(harness.timers.len() <= 1);
                assert_eq!(harness.timers.len(), usize::from(harness.session.pending_hide().is_some()));
                assert_eq!(harness.displayed.is_some(), harness.session.is_visible());
                assert_eq!(harness.body_locked, harness.session.scroll_locked());
                if mode == DeviceMode::Touch {
                    assert_eq!(harness.body_locked, harness.session.is_visible());
                } else {
                    assert!(!harness.body_locked);
                }
            }
        }
    }
}
