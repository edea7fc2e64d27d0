use crate::color::Rgb;

pub mod canvas;
pub mod terminal;

#[cfg(test)]
pub mod recording;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    pub fn intersect(&self, other: &Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);
        Rect::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
    }
}

/// A 2D drawing target measured in logical pixels, origin at the top left.
///
/// Paint state (global alpha and clip) persists across calls until changed,
/// so callers that touch it bracket their drawing with `save`/`restore`.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Blend `color` over the whole surface at `alpha`. This is an overwrite
    /// with a translucent colour, never a clear to transparent.
    fn fill(&mut self, color: Rgb, alpha: f32);

    /// Stroke one connected path through `points`.
    fn stroke_path(&mut self, points: &[Point], color: Rgb, width: f32);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb);

    /// Global alpha applied to every subsequent draw.
    fn set_alpha(&mut self, alpha: f32);

    /// Narrow the drawable area to `rect`, intersected with any current clip.
    fn clip(&mut self, rect: Rect);

    fn save(&mut self);
    fn restore(&mut self);
}
