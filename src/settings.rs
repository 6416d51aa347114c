//! Host control settings
//!
//! Layout and slider ranges of the browser controls. Tuning that affects the
//! duel itself lives in `tuning`; nothing here is persisted between sessions.

use serde::{Deserialize, Serialize};

use crate::consts::STATUS_BAR_HEIGHT;

/// Range and granularity of one `<input type="range">`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Clamp to the range and snap to the nearest step, the way the browser
    /// does for a slider value typed in by hand
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }

    /// Attribute pairs for the DOM element
    pub fn attributes(&self) -> [(&'static str, String); 3] {
        [
            ("min", self.min.to_string()),
            ("max", self.max.to_string()),
            ("step", self.step.to_string()),
        ]
    }
}

/// Log verbosity for the browser console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Browser host settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Height reserved under the canvas for the controls (pixels)
    pub status_bar_height: f32,
    /// Hero speed slider (pixels per tick)
    pub speed_slider: SliderRange,
    /// Fire-rate slider (milliseconds)
    pub fire_rate_slider: SliderRange,
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            status_bar_height: STATUS_BAR_HEIGHT,
            speed_slider: SliderRange::new(0.0, 5.0, 0.1),
            fire_rate_slider: SliderRange::new(1000.0, 5000.0, 1000.0),
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    /// Canvas size for a window of the given inner size
    pub fn playfield_size(&self, window_width: f32, window_height: f32) -> (f32, f32) {
        (window_width, (window_height - self.status_bar_height).max(0.0))
    }

    /// Settings from the page URL query (`?log=debug`), defaults otherwise
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let mut settings = Self::default();
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(level) = query_value(&search, "log").and_then(LogLevel::from_str) {
            settings.log_level = level;
        }
        settings
    }

    /// Native runs configure logging through `RUST_LOG`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

/// Value of `key` in a `?a=1&b=2` query string
pub fn query_value<'a>(search: &'a str, key: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap() {
        let fire_rate = SliderRange::new(1000.0, 5000.0, 1000.0);
        assert_eq!(fire_rate.snap(2400.0), 2000.0);
        assert_eq!(fire_rate.snap(2600.0), 3000.0);
        assert_eq!(fire_rate.snap(-5.0), 1000.0);
        assert_eq!(fire_rate.snap(9000.0), 5000.0);
    }

    #[test]
    fn test_attributes() {
        let speed = Settings::default().speed_slider;
        assert_eq!(
            speed.attributes(),
            [
                ("min", "0".to_string()),
                ("max", "5".to_string()),
                ("step", "0.1".to_string()),
            ]
        );
    }

    #[test]
    fn test_playfield_size() {
        let settings = Settings::default();
        assert_eq!(settings.playfield_size(1280.0, 800.0), (1280.0, 720.0));
        assert_eq!(settings.playfield_size(100.0, 50.0), (100.0, 0.0));
    }

    #[test]
    fn test_query_value() {
        assert_eq!(query_value("?log=debug&x=1", "log"), Some("debug"));
        assert_eq!(query_value("?x=1", "log"), None);
        assert_eq!(query_value("", "log"), None);
        assert_eq!(LogLevel::from_str("WARNING"), Some(LogLevel::Warn));
    }
}
