use std::f64::consts::PI;

pub const NAVBAR_SCROLLED_CLASS: &str = "scrolled";

pub fn navbar_is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn parallax_offset(scroll_y: f64, speed: f64) -> f64 {
    -(scroll_y * speed)
}

pub fn parallax_transform(scroll_y: f64, speed: f64) -> String {
    let offset = parallax_offset(scroll_y, speed);
    // -0 renders as "-0px"
    let offset = if offset == 0.0 { 0.0 } else { offset };
    format!("translate3d(0, {offset}px, 0)")
}

/// Coalesces bursts of scroll events into one update per animation frame.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: bool,
}

impl FrameThrottle {
    /// Returns `true` when the caller must request a frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn frame_ran(&mut self) {
        self.pending = false;
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// jQuery's default `swing` easing.
pub fn swing(progress: f64) -> f64 {
    let progress = progress.clamp(0.0, 1.0);
    0.5 - (progress * PI).cos() / 2.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    duration_ms: f64,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms: f64::from(duration_ms),
        }
    }

    /// Anchor target `top` is relative to the viewport; the fixed header
    /// height is kept clear above it.
    pub fn to_anchor(current_scroll: f64, target_top: f64, header_offset: f64, duration_ms: u32) -> Self {
        Self::new(current_scroll, current_scroll + target_top - header_offset, duration_ms)
    }

    #[cfg(test)]
    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn position_at(&self, elapsed_ms: f64) -> f64 {
        if self.is_done(elapsed_ms) {
            return self.to;
        }
        let progress = elapsed_ms.max(0.0) / self.duration_ms;
        self.from + (self.to - self.from) * swing(progress)
    }

    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        self.duration_ms <= 0.0 || elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9,
            "expected {expected} got {actual}"
        );
    }

    #[test]
    fn navbar_toggles_both_ways_around_threshold() {
        assert!(!navbar_is_scrolled(0.0, 50.0));
        assert!(!navbar_is_scrolled(50.0, 50.0));
        assert!(navbar_is_scrolled(50.5, 50.0));
        assert!(navbar_is_scrolled(800.0, 50.0));
        assert!(!navbar_is_scrolled(20.0, 50.0));
    }

    #[test]
    fn parallax_moves_at_half_scroll_speed() {
        assert_close(parallax_offset(0.0, 0.5), 0.0);
        assert_close(parallax_offset(300.0, 0.5), -150.0);
        assert_eq!(parallax_transform(300.0, 0.5), "translate3d(0, -150px, 0)");
        assert_eq!(parallax_transform(45.0, 0.5), "translate3d(0, -22.5px, 0)");
        assert_eq!(parallax_transform(0.0, 0.5), "translate3d(0, 0px, 0)");
    }

    #[test]
    fn throttle_requests_one_frame_per_burst() {
        let mut throttle = FrameThrottle::default();
        let requested = (0..10).filter(|_| throttle.request()).count();

        assert_eq!(requested, 1);
        assert!(throttle.is_pending());

        throttle.frame_ran();
        assert!(!throttle.is_pending());
        assert!(throttle.request());
    }

    #[test]
    fn swing_is_eased_and_clamped() {
        assert_close(swing(0.0), 0.0);
        assert_close(swing(0.5), 0.5);
        assert_close(swing(1.0), 1.0);
        assert_close(swing(2.0), 1.0);
        assert!(swing(0.25) < 0.25);
    }

    #[test]
    fn anchor_animation_stops_short_of_the_header() {
        let animation = ScrollAnimation::to_anchor(100.0, 600.0, 80.0, 800);

        assert_close(animation.target(), 620.0);
        assert_close(animation.position_at(0.0), 100.0);
        assert_close(animation.position_at(400.0), 360.0);
        assert_close(animation.position_at(800.0), 620.0);
        assert!(animation.is_done(800.0));
        assert!(!animation.is_done(799.0));
    }

    #[test]
    fn zero_duration_jumps_immediately() {
        let animation = ScrollAnimation::new(0.0, 500.0, 0);
        assert!(animation.is_done(0.0));
        assert_close(animation.position_at(0.0), 500.0);
    }
}
