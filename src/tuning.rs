//! Data-driven game balance
//!
//! Everything that distinguishes the two heroes is a construction parameter
//! here rather than a property of the side they play on. Tuning files are
//! JSON; any field left out keeps its default.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::*;
use crate::sim::Direction;

/// Spell (projectile) balance, shared by both heroes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellTuning {
    /// Collision and draw radius (pixels)
    pub radius: f32,
    /// Horizontal distance travelled per tick (pixels)
    pub speed: f32,
}

impl Default for SpellTuning {
    fn default() -> Self {
        Self {
            radius: SPELL_RADIUS,
            speed: SPELL_SPEED,
        }
    }
}

/// Per-hero construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroTuning {
    /// Starting position (pixels, canvas space)
    pub position: Vec2,
    /// Vertical distance travelled per tick (pixels)
    pub speed: f32,
    /// Minimum milliseconds between spells
    pub fire_rate_ms: f64,
    /// Initial vertical direction (phase of the patrol)
    pub direction: Direction,
    /// Horizontal direction of fired spells
    pub fire_direction: Direction,
    /// Whether the cursor deflects this hero
    pub cursor_controlled: bool,
    pub color: Color,
    pub spell_color: Color,
}

impl Default for HeroTuning {
    fn default() -> Self {
        Self {
            position: Vec2::new(HERO_EDGE_OFFSET, DEFAULT_HEIGHT / 2.0),
            speed: FIRST_HERO_SPEED,
            fire_rate_ms: DEFAULT_FIRE_RATE_MS,
            direction: Direction::Positive,
            fire_direction: Direction::Positive,
            cursor_controlled: true,
            color: Color::BLUE,
            spell_color: Color::BLUE,
        }
    }
}

/// Complete duel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelTuning {
    /// Playfield width (pixels)
    pub width: f32,
    /// Playfield height (pixels)
    pub height: f32,
    /// Radius shared by both heroes, fixed for their lifetime
    pub hero_radius: f32,
    pub spell: SpellTuning,
    pub first: HeroTuning,
    pub second: HeroTuning,
    /// Drop spells that leave the playfield without hitting anything
    pub prune_out_of_bounds: bool,
}

impl Default for DuelTuning {
    fn default() -> Self {
        Self::for_playfield(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl DuelTuning {
    /// Classic layout: blue hero on the left wall moving down, red hero on
    /// the right wall moving up and firing leftward
    pub fn for_playfield(width: f32, height: f32) -> Self {
        let mid = height / 2.0;
        Self {
            width,
            height,
            hero_radius: HERO_RADIUS,
            spell: SpellTuning::default(),
            first: HeroTuning {
                position: Vec2::new(HERO_EDGE_OFFSET, mid),
                ..HeroTuning::default()
            },
            second: HeroTuning {
                position: Vec2::new(width - HERO_EDGE_OFFSET, mid),
                speed: SECOND_HERO_SPEED,
                fire_rate_ms: DEFAULT_FIRE_RATE_MS,
                direction: Direction::Negative,
                fire_direction: Direction::Negative,
                cursor_controlled: false,
                color: Color::RED,
                spell_color: Color::RED,
            },
            prune_out_of_bounds: true,
        }
    }

    /// Parse a tuning file; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
