use super::{Point, Rect, Surface};
use crate::color::Rgb;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Fill { color: Rgb, alpha: f32 },
    Stroke { points: Vec<Point>, color: Rgb, width: f32, alpha: f32 },
    Circle { center: Point, radius: f32, color: Rgb, alpha: f32 },
    Clip(Rect),
    Save,
    Restore,
}

/// Surface double that records draw calls along with the alpha in effect.
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub calls: Vec<Call>,
    alpha: f32,
    stack: Vec<f32>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, calls: Vec::new(), alpha: 1.0, stack: Vec::new() }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn circles(&self) -> impl Iterator<Item = &Call> {
        self.calls.iter().filter(|c| matches!(c, Call::Circle { .. }))
    }

    pub fn strokes(&self) -> impl Iterator<Item = &Call> {
        self.calls.iter().filter(|c| matches!(c, Call::Stroke { .. }))
    }

    pub fn fills(&self) -> impl Iterator<Item = &Call> {
        self.calls.iter().filter(|c| matches!(c, Call::Fill { .. }))
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill(&mut self, color: Rgb, alpha: f32) {
        self.calls.push(Call::Fill { color, alpha });
    }

    fn stroke_path(&mut self, points: &[Point], color: Rgb, width: f32) {
        self.calls.push(Call::Stroke { points: points.to_vec(), color, width, alpha: self.alpha });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb) {
        self.calls.push(Call::Circle { center, radius, color, alpha: self.alpha });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn clip(&mut self, rect: Rect) {
        self.calls.push(Call::Clip(rect));
    }

    fn save(&mut self) {
        self.stack.push(self.alpha);
        self.calls.push(Call::Save);
    }

    fn restore(&mut self) {
        if let Some(alpha) = self.stack.pop() {
            self.alpha = alpha;
        }
        self.calls.push(Call::Restore);
    }
}
