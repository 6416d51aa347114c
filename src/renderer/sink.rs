//! Drawing sink trait and a recording implementation

use glam::Vec2;

use crate::color::Color;

/// Immediate-mode 2D drawing surface
///
/// No retained state is required; every frame clears and redraws everything.
pub trait DrawSink {
    /// Erase the whole `width` x `height` surface
    fn clear(&mut self, width: f32, height: f32);
    /// Fill a circle
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// One recorded drawing operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Clear { width: f32, height: f32 },
    Circle { center: Vec2, radius: f32, color: Color },
}

/// Sink that keeps the calls of the current frame (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub calls: Vec<DrawCall>,
    /// Number of `clear` calls seen, i.e. frames drawn
    pub frames: u64,
}

impl RecordingSink {
    /// Circles drawn since the last clear
    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Color)> + '_ {
        self.calls.iter().filter_map(|call| match *call {
            DrawCall::Circle { center, radius, color } => Some((center, radius, color)),
            DrawCall::Clear { .. } => None,
        })
    }
}

impl DrawSink for RecordingSink {
    fn clear(&mut self, width: f32, height: f32) {
        // Only the latest frame is kept, like a real surface
        self.calls.clear();
        self.frames += 1;
        self.calls.push(DrawCall::Clear { width, height });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.calls.push(DrawCall::Circle { center, radius, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_starts_a_new_frame() {
        let mut sink = RecordingSink::default();
        sink.clear(10.0, 10.0);
        sink.draw_circle(Vec2::ONE, 1.0, Color::RED);
        sink.clear(10.0, 10.0);
        sink.draw_circle(Vec2::ZERO, 2.0, Color::BLUE);

        assert_eq!(sink.frames, 2);
        assert_eq!(sink.calls.len(), 2);
        assert_eq!(
            sink.circles().collect::<Vec<_>>(),
            vec![(Vec2::ZERO, 2.0, Color::BLUE)]
        );
    }
}
