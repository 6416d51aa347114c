//! Spells: horizontal projectiles cast by heroes

use glam::Vec2;

use super::collision::circles_overlap;
use super::hero::Hero;
use super::state::{Direction, Side, SpellId};
use crate::color::Color;
use crate::renderer::DrawSink;
use crate::tuning::SpellTuning;

/// A spell in flight
///
/// Direction is fixed when the spell is cast; it only ever moves along x.
#[derive(Debug, Clone, PartialEq)]
pub struct Spell {
    id: SpellId,
    pos: Vec2,
    radius: f32,
    speed: f32,
    direction: Direction,
    color: Color,
    owner: Side,
}

impl Spell {
    pub fn new(
        id: SpellId,
        owner: Side,
        pos: Vec2,
        direction: Direction,
        color: Color,
        tuning: &SpellTuning,
    ) -> Self {
        Self {
            id,
            pos,
            radius: tuning.radius,
            speed: tuning.speed,
            direction,
            color,
            owner,
        }
    }

    pub fn id(&self) -> SpellId {
        self.id
    }

    pub fn owner(&self) -> Side {
        self.owner
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

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Advance one step along x
    pub fn tick(&mut self) {
        self.pos.x += self.speed * self.direction.sign();
    }

    /// True iff this spell overlaps `hero`
    pub fn hits(&self, hero: &Hero) -> bool {
        circles_overlap(self.pos, self.radius, hero.pos(), hero.radius())
    }

    /// True once the center is within one radius of the left or right edge
    pub fn is_out_of_bounds(&self, playfield_width: f32) -> bool {
        self.pos.x < self.radius || self.pos.x > playfield_width - self.radius
    }

    pub fn draw(&self, sink: &mut dyn DrawSink) {
        sink.draw_circle(self.pos, self.radius, self.color);
    }
}
