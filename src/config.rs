use crate::log::LogLevel;
use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "enhance-config";

const DEFAULT_TYPEWRITER_START_DELAY_MS: u32 = 200;
const DEFAULT_TYPEWRITER_STEP_MS: u32 = 45;
const DEFAULT_PREVIEW_HIDE_DELAY_MS: u32 = 120;
const DEFAULT_ORIENTATION_REFRESH_DELAY_MS: u32 = 100;
const DEFAULT_ORIENTATION_REASSIGN_DELAY_MS: u32 = 50;
const DEFAULT_NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;
const DEFAULT_PARALLAX_SPEED: f64 = 0.5;
const DEFAULT_HEADER_OFFSET: f64 = 80.0;
const DEFAULT_SMOOTH_SCROLL_DURATION_MS: u32 = 800;
const DEFAULT_NAV_BREAKPOINT: f64 = 992.0;
const DEFAULT_LANDSCAPE_MIN_WIDTH: f64 = 1024.0;
const DEFAULT_RIPPLE_LIFETIME_MS: u32 = 600;
const DEFAULT_CAROUSEL_INTERVAL_MS: u32 = 5_000;
const DEFAULT_STAGGER_STEP_SECONDS: f64 = 0.08;
const DEFAULT_HERO_FADE_STEP_MS: u32 = 100;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const TYPEWRITER_START_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const TYPEWRITER_STEP_MS_BOUNDS: (u32, u32) = (1, 1_000);
const PREVIEW_HIDE_DELAY_MS_BOUNDS: (u32, u32) = (0, 2_000);
const ORIENTATION_DELAY_MS_BOUNDS: (u32, u32) = (0, 2_000);
const NAVBAR_SCROLL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const PARALLAX_SPEED_BOUNDS: (f64, f64) = (0.0, 2.0);
const HEADER_OFFSET_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const SMOOTH_SCROLL_DURATION_MS_BOUNDS: (u32, u32) = (0, 5_000);
const NAV_BREAKPOINT_BOUNDS: (f64, f64) = (0.0, 4_096.0);
const LANDSCAPE_MIN_WIDTH_BOUNDS: (f64, f64) = (0.0, 8_192.0);
const RIPPLE_LIFETIME_MS_BOUNDS: (u32, u32) = (50, 5_000);
const CAROUSEL_INTERVAL_MS_BOUNDS: (u32, u32) = (500, 60_000);
const STAGGER_STEP_SECONDS_BOUNDS: (f64, f64) = (0.0, 2.0);
const HERO_FADE_STEP_MS_BOUNDS: (u32, u32) = (0, 2_000);

/// Timing and threshold knobs for every page enhancement.
#[derive(Clone, Debug, PartialEq)]
pub struct EnhanceConfig {
    pub typewriter_start_delay_ms: u32,
    pub typewriter_step_ms: u32,
    pub preview_hide_delay_ms: u32,
    pub orientation_refresh_delay_ms: u32,
    pub orientation_reassign_delay_ms: u32,
    pub navbar_scroll_threshold: f64,
    pub parallax_speed: f64,
    pub header_offset: f64,
    pub smooth_scroll_duration_ms: u32,
    pub nav_breakpoint: f64,
    pub landscape_min_width: f64,
    pub ripple_lifetime_ms: u32,
    pub carousel_interval_ms: u32,
    pub stagger_step_seconds: f64,
    pub hero_fade_step_ms: u32,
    pub log_level: LogLevel,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self::from_raw(RawConfig::default())
    }
}

/// Page-supplied overrides; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawConfig {
    typewriter_start_delay_ms: Option<u32>,
    typewriter_step_ms: Option<u32>,
    preview_hide_delay_ms: Option<u32>,
    orientation_refresh_delay_ms: Option<u32>,
    orientation_reassign_delay_ms: Option<u32>,
    navbar_scroll_threshold: Option<f64>,
    parallax_speed: Option<f64>,
    header_offset: Option<f64>,
    smooth_scroll_duration_ms: Option<u32>,
    nav_breakpoint: Option<f64>,
    landscape_min_width: Option<f64>,
    ripple_lifetime_ms: Option<u32>,
    carousel_interval_ms: Option<u32>,
    stagger_step_seconds: Option<f64>,
    hero_fade_step_ms: Option<u32>,
    log_level: Option<String>,
}

impl EnhanceConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed = serde_json::from_str::<RawConfig>(raw)?;
        Ok(Self::from_raw(parsed))
    }

    fn from_raw(raw: RawConfig) -> Self {
        Self {
            typewriter_start_delay_ms: u32_with_bounds(
                raw.typewriter_start_delay_ms,
                DEFAULT_TYPEWRITER_START_DELAY_MS,
                TYPEWRITER_START_DELAY_MS_BOUNDS,
            ),
            typewriter_step_ms: u32_with_bounds(
                raw.typewriter_step_ms,
                DEFAULT_TYPEWRITER_STEP_MS,
                TYPEWRITER_STEP_MS_BOUNDS,
            ),
            preview_hide_delay_ms: u32_with_bounds(
                raw.preview_hide_delay_ms,
                DEFAULT_PREVIEW_HIDE_DELAY_MS,
                PREVIEW_HIDE_DELAY_MS_BOUNDS,
            ),
            orientation_refresh_delay_ms: u32_with_bounds(
                raw.orientation_refresh_delay_ms,
                DEFAULT_ORIENTATION_REFRESH_DELAY_MS,
                ORIENTATION_DELAY_MS_BOUNDS,
            ),
            orientation_reassign_delay_ms: u32_with_bounds(
                raw.orientation_reassign_delay_ms,
                DEFAULT_ORIENTATION_REASSIGN_DELAY_MS,
                ORIENTATION_DELAY_MS_BOUNDS,
            ),
            navbar_scroll_threshold: f64_with_bounds(
                raw.navbar_scroll_threshold,
                DEFAULT_NAVBAR_SCROLL_THRESHOLD,
                NAVBAR_SCROLL_THRESHOLD_BOUNDS,
            ),
            parallax_speed: f64_with_bounds(
                raw.parallax_speed,
                DEFAULT_PARALLAX_SPEED,
                PARALLAX_SPEED_BOUNDS,
            ),
            header_offset: f64_with_bounds(
                raw.header_offset,
                DEFAULT_HEADER_OFFSET,
                HEADER_OFFSET_BOUNDS,
            ),
            smooth_scroll_duration_ms: u32_with_bounds(
                raw.smooth_scroll_duration_ms,
                DEFAULT_SMOOTH_SCROLL_DURATION_MS,
                SMOOTH_SCROLL_DURATION_MS_BOUNDS,
            ),
            nav_breakpoint: f64_with_bounds(
                raw.nav_breakpoint,
                DEFAULT_NAV_BREAKPOINT,
                NAV_BREAKPOINT_BOUNDS,
            ),
            landscape_min_width: f64_with_bounds(
                raw.landscape_min_width,
                DEFAULT_LANDSCAPE_MIN_WIDTH,
                LANDSCAPE_MIN_WIDTH_BOUNDS,
            ),
            ripple_lifetime_ms: u32_with_bounds(
                raw.ripple_lifetime_ms,
                DEFAULT_RIPPLE_LIFETIME_MS,
                RIPPLE_LIFETIME_MS_BOUNDS,
            ),
            carousel_interval_ms: u32_with_bounds(
                raw.carousel_interval_ms,
                DEFAULT_CAROUSEL_INTERVAL_MS,
                CAROUSEL_INTERVAL_MS_BOUNDS,
            ),
            stagger_step_seconds: f64_with_bounds(
                raw.stagger_step_seconds,
                DEFAULT_STAGGER_STEP_SECONDS,
                STAGGER_STEP_SECONDS_BOUNDS,
            ),
            hero_fade_step_ms: u32_with_bounds(
                raw.hero_fade_step_ms,
                DEFAULT_HERO_FADE_STEP_MS,
                HERO_FADE_STEP_MS_BOUNDS,
            ),
            log_level: parse_log_level(raw.log_level.as_deref(), DEFAULT_LOG_LEVEL),
        }
    }
}

fn u32_with_bounds(value: Option<u32>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn f64_with_bounds(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(value: Option<&str>, default: LogLevel) -> LogLevel {
    match value
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" => LogLevel::Warn,
        _ => default,
    }
}
