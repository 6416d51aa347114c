//! Heroes: vertical patrollers that cast spells across the playfield

use std::fmt;

use glam::Vec2;

use super::collision::within_square;
use super::spell::Spell;
use super::state::{Direction, Side, SpellId};
use crate::color::Color;
use crate::renderer::DrawSink;
use crate::tuning::{HeroTuning, SpellTuning};

/// Receives a hero's score every time it changes
///
/// Called synchronously from inside the tick, so implementations must not
/// expect the frame to be finished when they run.
pub trait ScoreObserver {
    fn score_changed(&mut self, side: Side, score: u32);
}

impl<F> ScoreObserver for F
where
    F: FnMut(Side, u32),
{
    fn score_changed(&mut self, side: Side, score: u32) {
        self(side, score)
    }
}

/// One of the two duelling heroes
pub struct Hero {
    side: Side,
    pos: Vec2,
    radius: f32,
    speed: f32,
    direction: Direction,
    fire_direction: Direction,
    fire_rate_ms: f64,
    last_fire_ms: f64,
    color: Color,
    spell_color: Color,
    spell_tuning: SpellTuning,
    score: u32,
    /// Live spells, oldest first
    spells: Vec<Spell>,
    cursor_controlled: bool,
    observer: Option<Box<dyn ScoreObserver>>,
    next_spell_id: SpellId,
}

impl fmt::Debug for Hero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hero")
            .field("side", &self.side)
            .field("pos", &self.pos)
            .field("speed", &self.speed)
            .field("direction", &self.direction)
            .field("fire_rate_ms", &self.fire_rate_ms)
            .field("score", &self.score)
            .field("spells", &self.spells.len())
            .finish_non_exhaustive()
    }
}

impl Hero {
    /// Create a hero; its fire-rate clock starts at `now_ms`
    pub fn new(
        side: Side,
        tuning: &HeroTuning,
        radius: f32,
        spell_tuning: SpellTuning,
        now_ms: f64,
    ) -> Self {
        Self {
            side,
            pos: tuning.position,
            radius,
            speed: tuning.speed,
            direction: tuning.direction,
            fire_direction: tuning.fire_direction,
            fire_rate_ms: tuning.fire_rate_ms,
            last_fire_ms: now_ms,
            color: tuning.color,
            spell_color: tuning.spell_color,
            spell_tuning,
            score: 0,
            spells: Vec::new(),
            cursor_controlled: tuning.cursor_controlled,
            observer: None,
            next_spell_id: 1,
        }
    }

    /// Register the score observer (replaces any previous one)
    pub fn set_observer(&mut self, observer: Box<dyn ScoreObserver>) {
        self.observer = Some(observer);
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn fire_rate_ms(&self) -> f64 {
        self.fire_rate_ms
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn spell_color(&self) -> Color {
        self.spell_color
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn spells_mut(&mut self) -> &mut [Spell] {
        &mut self.spells
    }

    // Tuning setters: no validation, a negative speed simply patrols backwards
    // and a non-positive fire rate fires every tick.

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn set_fire_rate(&mut self, fire_rate_ms: f64) {
        self.fire_rate_ms = fire_rate_ms;
    }

    pub fn set_spell_color(&mut self, color: Color) {
        self.spell_color = color;
    }

    /// True iff `point` is inside this hero's square pointer region
    pub fn contains_point(&self, point: Vec2) -> bool {
        within_square(self.pos, self.radius, point)
    }

    /// Move one step, bounce off the top/bottom edges, dodge the cursor, then
    /// try to fire. Returns the id of a newly cast spell.
    ///
    /// The bounce reverses direction instead of clamping, so `y` can end up
    /// one step past the edge before the next tick brings it back.
    pub fn tick(
        &mut self,
        cursor: Option<Vec2>,
        playfield_height: f32,
        now_ms: f64,
    ) -> Option<SpellId> {
        self.pos.y += self.speed * self.direction.sign();

        if self.pos.y < self.radius || self.pos.y > playfield_height - self.radius {
            self.direction = self.direction.flipped();
        }

        if self.cursor_controlled && cursor.is_some_and(|c| self.contains_point(c)) {
            self.direction = self.direction.flipped();
        }

        self.fire(now_ms)
    }

    /// Cast a spell if at least `fire_rate_ms` has passed since the last one
    pub fn fire(&mut self, now_ms: f64) -> Option<SpellId> {
        if now_ms - self.last_fire_ms < self.fire_rate_ms {
            return None;
        }
        self.last_fire_ms = now_ms;

        let id = self.next_spell_id;
        self.next_spell_id = self.next_spell_id.wrapping_add(1);
        self.spells.push(Spell::new(
            id,
            self.side,
            self.pos,
            self.fire_direction,
            self.spell_color,
            &self.spell_tuning,
        ));
        log::trace!("{} hero cast spell {} at {:?}", self.side.as_str(), id, self.pos);
        Some(id)
    }

    /// Remove a spell by id; `None` if it is not (or no longer) ours
    pub fn remove_spell(&mut self, id: SpellId) -> Option<Spell> {
        let index = self.spells.iter().position(|s| s.id() == id)?;
        Some(self.spells.remove(index))
    }

    /// Drop spells that left the playfield, returning their ids
    pub fn prune_spells(&mut self, playfield_width: f32) -> Vec<SpellId> {
        let mut expired = Vec::new();
        self.spells.retain(|spell| {
            let out = spell.is_out_of_bounds(playfield_width);
            if out {
                expired.push(spell.id());
            }
            !out
        });
        expired
    }

    /// Add one point and notify the observer
    pub fn increment_score(&mut self) -> u32 {
        self.score += 1;
        if let Some(observer) = self.observer.as_mut() {
            observer.score_changed(self.side, self.score);
        }
        self.score
    }

    /// Draw the hero, then its spells in casting order
    pub fn draw(&self, sink: &mut dyn DrawSink) {
        sink.draw_circle(self.pos, self.radius, self.color);
        for spell in &self.spells {
            spell.draw(sink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HERO_RADIUS;
    use crate::renderer::{DrawCall, RecordingSink};
    use std::cell::RefCell;
    use std::rc::Rc;

    const HEIGHT: f32 = 600.0;

    fn hero(y: f32, direction: Direction) -> Hero {
        let tuning = HeroTuning {
            position: Vec2::new(30.0, y),
            direction,
            ..HeroTuning::default()
        };
        Hero::new(Side::First, &tuning, HERO_RADIUS, SpellTuning::default(), 0.0)
    }

    #[test]
    fn test_bounces_off_top() {
        let mut h = hero(HERO_RADIUS - 1.0, Direction::Negative);
        h.tick(None, HEIGHT, 0.0);
        assert_eq!(h.direction(), Direction::Positive);
        // Overshoot is allowed, but only by one step
        assert_eq!(h.y(), HERO_RADIUS - 3.0);
        h.tick(None, HEIGHT, 0.0);
        assert_eq!(h.y(), HERO_RADIUS - 1.0);
    }

    #[test]
    fn test_bounces_off_bottom() {
        let mut h = hero(HEIGHT - HERO_RADIUS, Direction::Positive);
        h.tick(None, HEIGHT, 0.0);
        assert_eq!(h.direction(), Direction::Negative);
    }

    #[test]
    fn test_patrol_stays_near_playfield() {
        let mut h = hero(300.0, Direction::Positive);
        h.set_speed(7.0);
        for _ in 0..2000 {
            h.tick(None, HEIGHT, 0.0);
            assert!(h.y() >= HERO_RADIUS - 7.0);
            assert!(h.y() <= HEIGHT - HERO_RADIUS + 7.0);
        }
    }

    #[test]
    fn test_cursor_deflects_with_square_region() {
        let mut h = hero(300.0, Direction::Positive);
        // After the move the hero is at y=302; the cursor sits on the box corner
        h.tick(Some(Vec2::new(50.0, 322.0)), HEIGHT, 0.0);
        assert_eq!(h.direction(), Direction::Negative);

        h.tick(Some(Vec2::new(50.5, 300.0)), HEIGHT, 0.0);
        assert_eq!(h.direction(), Direction::Negative);
    }

    #[test]
    fn test_cursor_ignored_when_not_controlled() {
        let tuning = HeroTuning {
            position: Vec2::new(30.0, 300.0),
            cursor_controlled: false,
            ..HeroTuning::default()
        };
        let mut h = Hero::new(Side::Second, &tuning, HERO_RADIUS, SpellTuning::default(), 0.0);
        h.tick(Some(Vec2::new(30.0, 302.0)), HEIGHT, 0.0);
        assert_eq!(h.direction(), Direction::Positive);
    }

    #[test]
    fn test_fire_rate_gating() {
        let mut h = hero(300.0, Direction::Positive);
        assert_eq!(h.fire(999.0), None);
        assert!(h.fire(1000.0).is_some());
        assert_eq!(h.spells().len(), 1);
        assert_eq!(h.fire(1500.0), None);
        assert_eq!(h.spells().len(), 1);
        assert!(h.fire(2000.0).is_some());
        assert_eq!(h.spells().len(), 2);
    }

    #[test]
    fn test_spell_inherits_hero_state() {
        let mut h = hero(300.0, Direction::Positive);
        h.set_spell_color(Color::GREEN);
        h.fire(1000.0);
        let spell = &h.spells()[0];
        assert_eq!(spell.pos(), h.pos());
        assert_eq!(spell.color(), Color::GREEN);
        assert_eq!(spell.direction(), Direction::Positive);
        assert_eq!(spell.owner(), Side::First);
    }

    #[test]
    fn test_zero_speed_holds_position() {
        let mut h = hero(300.0, Direction::Positive);
        h.set_speed(0.0);
        h.tick(None, HEIGHT, 0.0);
        assert_eq!(h.y(), 300.0);
    }

    #[test]
    fn test_remove_spell_by_identity() {
        let mut h = hero(300.0, Direction::Positive);
        let a = h.fire(1000.0).unwrap();
        let b = h.fire(2000.0).unwrap();
        assert!(h.remove_spell(a).is_some());
        assert!(h.remove_spell(a).is_none());
        assert_eq!(h.spells().len(), 1);
        assert_eq!(h.spells()[0].id(), b);
    }

    #[test]
    fn test_score_observer_is_called() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut h = hero(300.0, Direction::Positive);
        h.set_observer(Box::new(move |side: Side, score: u32| log.borrow_mut().push((side, score))));
        h.increment_score();
        h.increment_score();
        assert_eq!(h.score(), 2);
        assert_eq!(*seen.borrow(), vec![(Side::First, 1), (Side::First, 2)]);
    }

    #[test]
    fn test_draw_order() {
        let mut h = hero(300.0, Direction::Positive);
        h.fire(1000.0);
        let mut sink = RecordingSink::default();
        h.draw(&mut sink);
        assert_eq!(sink.calls.len(), 2);
        assert!(matches!(sink.calls[0], DrawCall::Circle { radius, .. } if radius == HERO_RADIUS));
    }
}
