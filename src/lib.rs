//! Browser enhancements for the portfolio page.
//!
//! Everything outside `frontend` is plain logic and builds on every target;
//! `frontend` binds it to the DOM and only exists on wasm32.

pub mod config;
pub mod error;
pub mod log;
pub mod preview;
pub mod reveal;
pub mod scroll;
pub mod theme;
pub mod typewriter;
pub mod widgets;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
