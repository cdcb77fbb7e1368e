//! Navigation menu, carousel, ripple and landscape helpers.

pub const TOGGLER_ACTIVE_CLASS: &str = "active";
pub const PANEL_SHOWN_CLASS: &str = "show";
pub const BODY_MENU_OPEN_CLASS: &str = "menu-open";
pub const LANDSCAPE_CLASS: &str = "landscape-mode";
pub const CAROUSEL_ACTIVE_CLASS: &str = "active";
pub const RIPPLE_CLASS: &str = "ripple";
pub const RIPPLE_STYLE_ID: &str = "ripple-styles";

pub const RIPPLE_STYLES: &str = "
.btn {
  position: relative;
  overflow: hidden;
}
.ripple {
  position: absolute;
  border-radius: 50%;
  background: rgba(255, 255, 255, 0.6);
  transform: scale(0);
  animation: ripple-animation 0.6s ease-out;
  pointer-events: none;
}
@keyframes ripple-animation {
  to {
    transform: scale(4);
    opacity: 0;
  }
}
";

/// Mobile navigation: toggler, panel and body classes move in lockstep.
#[derive(Debug, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Collapses on narrow viewports. Returns `true` when the classes must
    /// be cleared.
    pub fn collapse_if_narrow(&mut self, viewport_width: f64, breakpoint: f64) -> bool {
        if viewport_width >= breakpoint {
            return false;
        }
        self.open = false;
        true
    }

    /// Re-syncs after another script flipped the classes.
    pub fn sync(&mut self, open: bool) {
        self.open = open;
    }
}

pub fn is_landscape(width: f64, height: f64, min_width: f64) -> bool {
    width >= min_width && height < width
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    /// Centres a square ripple on the click point inside the button rect.
    pub fn from_click(
        rect_left: f64,
        rect_top: f64,
        rect_width: f64,
        rect_height: f64,
        client_x: f64,
        client_y: f64,
    ) -> Self {
        let size = rect_width.max(rect_height);
        Self {
            size,
            left: client_x - rect_left - size / 2.0,
            top: client_y - rect_top - size / 2.0,
        }
    }

    pub fn style(&self) -> String {
        format!(
            "width: {}px; height: {}px; left: {}px; top: {}px;",
            self.size, self.size, self.left, self.top
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideDirection {
    Prev,
    Next,
}

impl SlideDirection {
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "prev" => Some(Self::Prev),
            "next" => Some(Self::Next),
            _ => None,
        }
    }
}

/// Auto-advancing slide index with hover pause.
#[derive(Debug)]
pub struct Carousel {
    len: usize,
    index: usize,
    paused: bool,
}

impl Carousel {
    pub fn new(len: usize, initial: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            len,
            index: initial.min(len - 1),
            paused: false,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Interval tick; `None` while paused.
    pub fn auto_advance(&mut self) -> Option<usize> {
        if self.paused {
            return None;
        }
        Some(self.step(SlideDirection::Next))
    }

    pub fn step(&mut self, direction: SlideDirection) -> usize {
        self.index = match direction {
            SlideDirection::Next => (self.index + 1) % self.len,
            SlideDirection::Prev => (self.index + self.len - 1) % self.len,
        };
        self.index
    }

    /// Out-of-range targets are ignored.
    pub fn go_to(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        self.index = index;
        Some(index)
    }
}
