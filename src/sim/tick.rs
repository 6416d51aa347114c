//! Per-frame simulation tick
//!
//! Motion is a fixed step per tick; there is no delta-time scaling. The only
//! use of wall-clock time is the fire-rate gate.

use glam::Vec2;

use super::game::Game;
use super::hero::Hero;
use super::state::{DuelEvent, Side};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Current clock reading (milliseconds, monotonic)
    pub now_ms: f64,
    /// Pointer position in canvas space, if known
    pub cursor: Option<Vec2>,
}

impl TickInput {
    pub fn at(now_ms: f64) -> Self {
        Self { now_ms, cursor: None }
    }

    pub fn with_cursor(mut self, cursor: Vec2) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

/// Advance the duel by one frame
///
/// 1. Each hero (first, then second) moves and maybe fires, then its spells move.
/// 2. First's spells are checked against second, then second's against first.
///    A spell is never checked against its own caster.
/// 3. Spells that left the playfield are dropped (when pruning is enabled).
pub fn tick(game: &mut Game, input: &TickInput) {
    game.events.clear();
    game.frames += 1;

    for side in Side::BOTH {
        let hero = game.heroes.get_mut(side);
        if let Some(spell) = hero.tick(input.cursor, game.height, input.now_ms) {
            game.events.push(DuelEvent::SpellFired { side, spell });
        }
        for spell in hero.spells_mut() {
            spell.tick();
        }
    }

    let heroes = &mut game.heroes;
    resolve_hits(&mut heroes.first, &heroes.second, &mut game.events);
    resolve_hits(&mut heroes.second, &heroes.first, &mut game.events);

    if game.prune_out_of_bounds {
        for side in Side::BOTH {
            for spell in game.heroes.get_mut(side).prune_spells(game.width) {
                log::trace!("{} spell {} left the playfield", side.as_str(), spell);
                game.events.push(DuelEvent::SpellExpired { side, spell });
            }
        }
    }
}

/// Score and remove every spell of `attacker` that overlaps `target`
fn resolve_hits(attacker: &mut Hero, target: &Hero, events: &mut Vec<DuelEvent>) {
    let hits: Vec<_> = attacker
        .spells()
        .iter()
        .filter(|spell| spell.hits(target))
        .map(|spell| spell.id())
        .collect();

    for spell in hits {
        let score = attacker.increment_score();
        attacker.remove_spell(spell);
        log::debug!(
            "{} spell {} hit {} hero, score now {}",
            attacker.side().as_str(),
            spell,
            target.side().as_str(),
            score
        );
        events.push(DuelEvent::Hit {
            side: attacker.side(),
            spell,
            score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Direction;
    use crate::tuning::DuelTuning;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Heroes facing each other at the same height, standing still
    fn close_quarters(gap: f32) -> DuelTuning {
        let mut tuning = DuelTuning::default();
        tuning.first.position = Vec2::new(100.0, 300.0);
        tuning.second.position = Vec2::new(100.0 + gap, 300.0);
        tuning.first.speed = 0.0;
        tuning.second.speed = 0.0;
        tuning
    }

    #[test]
    fn test_tick_moves_heroes_in_order() {
        let mut game = Game::new(&DuelTuning::default(), 0.0);
        tick(&mut game, &TickInput::at(16.0));
        assert_eq!(game.player().y(), 302.0);
        assert_eq!(game.enemy().y(), 297.0);
        assert_eq!(game.frames(), 1);
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_spell_scores_against_opponent() {
        // Spell is cast at x=100 and steps to 110, 25 from the second hero
        let mut game = Game::new(&close_quarters(35.0), 0.0);
        let scores = Rc::new(RefCell::new(Vec::new()));
        let seen = scores.clone();
        game = game.observe(Side::First, move |side: Side, score: u32| {
            seen.borrow_mut().push((side, score))
        });
        game.set_fire_rate(Side::Second, f64::INFINITY);

        tick(&mut game, &TickInput::at(1000.0));
        assert_eq!(game.scores(), (1, 0));
        assert!(game.player().spells().is_empty());
        assert_eq!(*scores.borrow(), vec![(Side::First, 1)]);
        assert!(matches!(
            game.events(),
            [
                DuelEvent::SpellFired { side: Side::First, .. },
                DuelEvent::Hit { side: Side::First, score: 1, .. },
            ]
        ));
    }

    #[test]
    fn test_both_sides_can_score_in_one_tick() {
        let mut game = Game::new(&close_quarters(35.0), 0.0);
        tick(&mut game, &TickInput::at(1000.0));
        assert_eq!(game.scores(), (1, 1));
        assert!(game.player().spells().is_empty());
        assert!(game.enemy().spells().is_empty());
    }

    #[test]
    fn test_own_spell_never_scores() {
        // Opponent far away; the fresh spell sits on top of its own caster
        let mut tuning = close_quarters(600.0);
        tuning.spell.speed = 0.0;
        let mut game = Game::new(&tuning, 0.0);
        game.set_fire_rate(Side::Second, f64::INFINITY);

        tick(&mut game, &TickInput::at(1000.0));
        assert_eq!(game.player().spells().len(), 1);
        assert!(game.player().spells()[0].hits(game.player()));
        assert_eq!(game.scores(), (0, 0));
    }

    /// Second hero parked in the top corner, out of the first hero's line of fire
    fn open_lane(prune: bool) -> Game {
        let mut tuning = DuelTuning::default();
        tuning.second.position = Vec2::new(770.0, 20.0);
        tuning.first.speed = 0.0;
        tuning.second.speed = 0.0;
        tuning.prune_out_of_bounds = prune;
        let mut game = Game::new(&tuning, 0.0);
        game.set_fire_rate(Side::Second, f64::INFINITY);
        game
    }

    #[test]
    fn test_pruning_drops_missed_spells() {
        let mut game = open_lane(true);
        tick(&mut game, &TickInput::at(1000.0));
        assert_eq!(game.player().spells().len(), 1);

        let mut expired = false;
        for i in 1..100 {
            tick(&mut game, &TickInput::at(1000.0 + i as f64));
            if game
                .events()
                .iter()
                .any(|e| matches!(e, DuelEvent::SpellExpired { side: Side::First, .. }))
            {
                expired = true;
                break;
            }
        }
        assert!(expired);
        assert!(game.player().spells().is_empty());
        assert_eq!(game.scores(), (0, 0));
    }

    #[test]
    fn test_pruning_can_be_disabled() {
        let mut game = open_lane(false);
        tick(&mut game, &TickInput::at(1000.0));
        for i in 1..200 {
            tick(&mut game, &TickInput::at(1000.0 + i as f64));
        }
        let spell = &game.player().spells()[0];
        assert!(spell.is_out_of_bounds(game.width()));
        assert_eq!(spell.direction(), Direction::Positive);
    }

    #[test]
    fn test_speed_change_applies_next_tick() {
        let mut game = Game::new(&DuelTuning::default(), 0.0);
        tick(&mut game, &TickInput::at(16.0));
        let before = game.player().y();
        game.set_speed(Side::First, 0.0);
        tick(&mut game, &TickInput::at(32.0));
        assert_eq!(game.player().y(), before);
    }

    #[test]
    fn test_cursor_deflects_first_hero_only() {
        let mut game = Game::new(&DuelTuning::default(), 0.0);
        let input = TickInput::at(16.0).with_cursor(Vec2::new(30.0, 300.0));
        tick(&mut game, &input);
        assert_eq!(game.player().direction(), Direction::Negative);
        // The second hero is not under the cursor and not cursor-controlled
        assert_eq!(game.enemy().direction(), Direction::Negative);
    }

    #[test]
    fn test_end_to_end_scenario() {
        const TICKS: u64 = 1000;
        const STEP_MS: f64 = 16.0;

        let tuning = DuelTuning::for_playfield(800.0, 600.0);
        assert_eq!(tuning.first.position, Vec2::new(30.0, 300.0));
        assert_eq!(tuning.second.position, Vec2::new(770.0, 300.0));

        for prune in [true, false] {
            let mut tuning = tuning.clone();
            tuning.prune_out_of_bounds = prune;
            let mut game = Game::new(&tuning, 0.0);
            let cap = (TICKS as f64 * STEP_MS / 1000.0) as usize + 1;

            let mut now = 0.0;
            for _ in 0..TICKS {
                now += STEP_MS;
                tick(&mut game, &TickInput::at(now));
                assert!(game.player().spells().len() <= cap);
                assert!(game.enemy().spells().len() <= cap);
            }

            // Spells that scored or are still alive were all cast under the cap
            let (first, second) = game.scores();
            assert!(first as usize + game.player().spells().len() <= cap);
            assert!(second as usize + game.enemy().spells().len() <= cap);
            assert_eq!(game.frames(), TICKS);
        }
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut game = Game::new(&DuelTuning::default(), 0.0);
            for i in 1..=600 {
                let cursor = Vec2::new(30.0, (i * 7 % 600) as f32);
                tick(&mut game, &TickInput::at(i as f64 * 16.0).with_cursor(cursor));
            }
            (game.scores(), game.player().y(), game.enemy().y())
        };
        assert_eq!(run(), run());
    }
}
