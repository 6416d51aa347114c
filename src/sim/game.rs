//! The duel: two heroes, their lifecycle, and the host command surface

use glam::Vec2;

use super::hero::{Hero, ScoreObserver};
use super::state::{DuelEvent, GamePhase, Side};
use super::tick::{TickInput, tick};
use crate::color::Color;
use crate::renderer::DrawSink;
use crate::tuning::{DuelTuning, HeroTuning};

/// The fixed roster: exactly one hero per side
#[derive(Debug)]
pub struct Duel {
    pub first: Hero,
    pub second: Hero,
}

impl Duel {
    pub fn get(&self, side: Side) -> &Hero {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Hero {
        match side {
            Side::First => &mut self.first,
            Side::Second => &mut self.second,
        }
    }
}

/// A tuning change pushed by the host between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeroCommand {
    SetSpeed { side: Side, speed: f32 },
    SetFireRate { side: Side, fire_rate_ms: f64 },
    SetSpellColor { side: Side, color: Color },
}

/// Complete simulation state
#[derive(Debug)]
pub struct Game {
    pub(super) width: f32,
    pub(super) height: f32,
    pub(super) heroes: Duel,
    pub(super) prune_out_of_bounds: bool,
    /// Events produced by the most recent tick
    pub(super) events: Vec<DuelEvent>,
    pub(super) frames: u64,
    phase: GamePhase,
}

impl Game {
    /// Build both heroes from `tuning`; their fire-rate clocks start at `now_ms`
    pub fn new(tuning: &DuelTuning, now_ms: f64) -> Self {
        let hero = |side: Side, hero_tuning: &HeroTuning| {
            Hero::new(side, hero_tuning, tuning.hero_radius, tuning.spell, now_ms)
        };
        Self {
            width: tuning.width,
            height: tuning.height,
            heroes: Duel {
                first: hero(Side::First, &tuning.first),
                second: hero(Side::Second, &tuning.second),
            },
            prune_out_of_bounds: tuning.prune_out_of_bounds,
            events: Vec::new(),
            frames: 0,
            phase: GamePhase::Idle,
        }
    }

    /// Register the score observer for one side
    pub fn observe(mut self, side: Side, observer: impl ScoreObserver + 'static) -> Self {
        self.heroes.get_mut(side).set_observer(Box::new(observer));
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Idle -> Running. Returns whether the phase changed.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Idle => {
                self.phase = GamePhase::Running;
                log::info!("Duel started ({}x{})", self.width, self.height);
                true
            }
            GamePhase::Running => false,
            GamePhase::Stopped => {
                log::warn!("Ignoring start on a stopped duel");
                false
            }
        }
    }

    /// Running -> Stopped. Anything else is a no-op; returns whether the
    /// phase changed.
    pub fn stop(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::Stopped;
        log::info!(
            "Duel stopped after {} frames, score {}:{}",
            self.frames,
            self.heroes.first.score(),
            self.heroes.second.score()
        );
        true
    }

    /// Tick and redraw one frame. Does nothing unless running.
    pub fn frame(&mut self, input: &TickInput, sink: &mut dyn DrawSink) -> bool {
        if !self.is_running() {
            return false;
        }
        tick(self, input);
        sink.clear(self.width, self.height);
        self.draw(sink);
        true
    }

    /// Draw the first hero and its spells, then the second
    pub fn draw(&self, sink: &mut dyn DrawSink) {
        self.heroes.first.draw(sink);
        self.heroes.second.draw(sink);
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of ticks run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn events(&self) -> &[DuelEvent] {
        &self.events
    }

    pub fn hero(&self, side: Side) -> &Hero {
        self.heroes.get(side)
    }

    pub fn player(&self) -> &Hero {
        &self.heroes.first
    }

    pub fn enemy(&self) -> &Hero {
        &self.heroes.second
    }

    /// `(first, second)` scores
    pub fn scores(&self) -> (u32, u32) {
        (self.heroes.first.score(), self.heroes.second.score())
    }

    /// Which hero's pointer region contains `point`, first hero wins ties
    pub fn hero_at(&self, point: Vec2) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|&side| self.heroes.get(side).contains_point(point))
    }

    pub fn apply(&mut self, command: HeroCommand) {
        log::debug!("Applying {:?}", command);
        match command {
            HeroCommand::SetSpeed { side, speed } => self.heroes.get_mut(side).set_speed(speed),
            HeroCommand::SetFireRate { side, fire_rate_ms } => {
                self.heroes.get_mut(side).set_fire_rate(fire_rate_ms)
            }
            HeroCommand::SetSpellColor { side, color } => {
                self.heroes.get_mut(side).set_spell_color(color)
            }
        }
    }

    pub fn set_speed(&mut self, side: Side, speed: f32) {
        self.apply(HeroCommand::SetSpeed { side, speed });
    }

    pub fn set_fire_rate(&mut self, side: Side, fire_rate_ms: f64) {
        self.apply(HeroCommand::SetFireRate { side, fire_rate_ms });
    }

    pub fn set_spell_color(&mut self, side: Side, color: Color) {
        self.apply(HeroCommand::SetSpellColor { side, color });
    }
}
