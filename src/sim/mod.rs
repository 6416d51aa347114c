//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same tuning and the same sequence
//! of tick inputs the outcome is identical:
//! - Fixed step per tick, no delta-time scaling
//! - Stable iteration order (first hero, then second; spells oldest first)
//! - Drawing only through the `DrawSink` trait, no platform dependencies

pub mod collision;
pub mod game;
pub mod hero;
pub mod spell;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, within_square};
pub use game::{Duel, Game, HeroCommand};
pub use hero::{Hero, ScoreObserver};
pub use spell::Spell;
pub use state::{Direction, DuelEvent, GamePhase, Side, SpellId};
pub use tick::{TickInput, tick};
