//! Spell Duel - a two-hero arcade duel on a 2D canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (heroes, spells, collisions, scoring)
//! - `renderer`: Drawing sink abstraction and canvas backend
//! - `platform`: Clock, frame scheduling and the frame loop driver
//! - `tuning`: Data-driven game balance
//! - `settings`: Host control settings

pub mod color;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use color::Color;
pub use settings::{Settings, SliderRange};
pub use tuning::{DuelTuning, HeroTuning, SpellTuning};

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions (headless runs)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Hero defaults
    pub const HERO_RADIUS: f32 = 20.0;
    /// Horizontal distance of each hero from its edge of the playfield
    pub const HERO_EDGE_OFFSET: f32 = 30.0;
    pub const FIRST_HERO_SPEED: f32 = 2.0;
    pub const SECOND_HERO_SPEED: f32 = 3.0;
    /// Minimum milliseconds between two spells of one hero
    pub const DEFAULT_FIRE_RATE_MS: f64 = 1000.0;

    /// Spell defaults
    pub const SPELL_RADIUS: f32 = 10.0;
    pub const SPELL_SPEED: f32 = 10.0;

    /// Height of the host status bar under the canvas (pixels)
    pub const STATUS_BAR_HEIGHT: f32 = 80.0;
}
