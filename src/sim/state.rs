//! Shared simulation types
//!
//! Sides, directions, lifecycle phase and the per-tick event log.

use serde::{Deserialize, Serialize};

/// Which of the two heroes something belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left hero, cursor-controlled in the classic layout
    First,
    /// Right hero
    Second,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::First => "first",
            Side::Second => "second",
        }
    }
}

/// Sign of movement along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// +1: down for heroes, right for spells
    #[default]
    Positive,
    /// -1: up for heroes, left for spells
    Negative,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

/// Lifecycle of a game instance
///
/// `Stopped` is terminal: a stopped game never runs again, a new instance is
/// needed instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, loop not started yet
    #[default]
    Idle,
    /// Frames are being ticked and drawn
    Running,
    /// Loop cancelled
    Stopped,
}

/// Identity of a spell within its owner's collection
pub type SpellId = u32;

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DuelEvent {
    /// A hero cast a new spell
    SpellFired { side: Side, spell: SpellId },
    /// A spell hit the opposing hero; `score` is the owner's new score
    Hit { side: Side, spell: SpellId, score: u32 },
    /// A spell left the playfield and was dropped
    SpellExpired { side: Side, spell: SpellId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_flip() {
        assert_eq!(Direction::Positive.flipped(), Direction::Negative);
        assert_eq!(Direction::Negative.flipped().sign(), 1.0);
    }
}
