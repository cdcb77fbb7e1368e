//! Character-by-character reveal of the hero tagline.
//!
//! The schedule is fixed: frame `k` (the `k`-character prefix, `k` from 0
//! through the character count) is due at `start_delay + k * step`, and the
//! cursor completes one step after the full text.

pub const CURSOR_COMPLETE_CLASS: &str = "typewriter-cursor--complete";

#[derive(Debug, PartialEq, Eq)]
pub enum TypewriterTick<'a> {
    Render(&'a str),
    Finished,
    Idle,
}

#[derive(Debug)]
pub struct Typewriter {
    text: String,
    boundaries: Vec<usize>,
    next_frame: usize,
    finished: bool,
    start_delay_ms: u32,
    step_ms: u32,
}

impl Typewriter {
    /// Returns `None` for empty text; there is nothing to animate.
    pub fn new(text: impl Into<String>, start_delay_ms: u32, step_ms: u32) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            return None;
        }

        let boundaries = std::iter::once(0)
            .chain(text.char_indices().map(|(index, ch)| index + ch.len_utf8()))
            .collect();

        Some(Self {
            text,
            boundaries,
            next_frame: 0,
            finished: false,
            start_delay_ms,
            step_ms,
        })
    }

    pub fn start_delay_ms(&self) -> u32 {
        self.start_delay_ms
    }

    pub fn step_ms(&self) -> u32 {
        self.step_ms
    }

    #[cfg(test)]
    pub fn frame_count(&self) -> usize {
        self.boundaries.len()
    }

    #[cfg(test)]
    pub fn frame_due_ms(&self, frame: usize) -> u64 {
        u64::from(self.start_delay_ms) + u64::from(self.step_ms) * frame as u64
    }

    /// When the cursor is marked complete.
    #[cfg(test)]
    pub fn total_duration_ms(&self) -> u64 {
        self.frame_due_ms(self.frame_count())
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tick(&mut self) -> TypewriterTick<'_> {
        if let Some(&end) = self.boundaries.get(self.next_frame) {
            self.next_frame += 1;
            return TypewriterTick::Render(&self.text[..end]);
        }

        if self.finished {
            return TypewriterTick::Idle;
        }

        self.finished = true;
        TypewriterTick::Finished
    }
}

/// A non-empty `data-text` wins; otherwise the trimmed visible text.
pub fn resolve_text(data_text: Option<String>, text_content: Option<String>) -> Option<String> {
    data_text
        .filter(|value| !value.is_empty())
        .or_else(|| text_content.map(|value| value.trim().to_string()))
        .filter(|value| !value.is_empty())
}
