use super::{Point, Rect, Surface};
use crate::color::{Rgb, blend};

#[derive(Clone, Copy, Debug)]
struct PaintState {
    alpha: f32,
    clip: Option<Rect>,
}

impl Default for PaintState {
    fn default() -> Self {
        Self { alpha: 1.0, clip: None }
    }
}

/// In-memory raster behind the terminal. Each raster pixel covers
/// `scale` x `scale` logical pixels, so the simulation works in roughly
/// browser-sized coordinates while the terminal shows a coarse image.
pub struct Canvas {
    cols: usize,
    rows: usize,
    scale: f32,
    background: Rgb,
    pixels: Vec<[f32; 3]>,
    state: PaintState,
    stack: Vec<PaintState>,
    scratch: Vec<usize>,
}

impl Canvas {
    pub fn new(cols: usize, rows: usize, scale: f32, background: Rgb) -> Self {
        let bg = [background.0 as f32, background.1 as f32, background.2 as f32];
        Self {
            cols,
            rows,
            scale: scale.max(f32::EPSILON),
            background,
            pixels: vec![bg; cols * rows],
            state: PaintState::default(),
            stack: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Change the raster size. Overlapping content is kept, new area starts
    /// as background.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        let bg = [self.background.0 as f32, self.background.1 as f32, self.background.2 as f32];
        let mut pixels = vec![bg; cols * rows];
        for y in 0..rows.min(self.rows) {
            for x in 0..cols.min(self.cols) {
                pixels[y * cols + x] = self.pixels[y * self.cols + x];
            }
        }
        self.cols = cols;
        self.rows = rows;
        self.pixels = pixels;
    }

    pub fn raster_size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let p = self.pixels[y * self.cols + x];
        (p[0].round() as u8, p[1].round() as u8, p[2].round() as u8)
    }

    fn visible(&self, px: usize, py: usize) -> bool {
        match self.state.clip {
            Some(clip) => clip.contains(Point::new(
                (px as f32 + 0.5) * self.scale,
                (py as f32 + 0.5) * self.scale,
            )),
            None => true,
        }
    }

    /// Collect raster indices covered by a disc into `scratch`. Discs smaller
    /// than a raster pixel still mark the pixel holding their centre.
    fn cover_disc(&mut self, center: Point, radius: f32) {
        let cx = center.x / self.scale;
        let cy = center.y / self.scale;
        let r = radius / self.scale;

        let x0 = (cx - r).floor().max(0.0) as usize;
        let y0 = (cy - r).floor().max(0.0) as usize;
        let x1 = ((cx + r).ceil().max(0.0) as usize).min(self.cols);
        let y1 = ((cy + r).ceil().max(0.0) as usize).min(self.rows);

        let mut hit = false;
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.scratch.push(py * self.cols + px);
                    hit = true;
                }
            }
        }

        if !hit && cx >= 0.0 && cy >= 0.0 {
            let (px, py) = (cx as usize, cy as usize);
            if px < self.cols && py < self.rows {
                self.scratch.push(py * self.cols + px);
            }
        }
    }

    /// Blend every covered pixel exactly once.
    fn paint_scratch(&mut self, color: Rgb) {
        let mut covered = std::mem::take(&mut self.scratch);
        covered.sort_unstable();
        covered.dedup();
        let alpha = self.state.alpha;
        for &idx in &covered {
            if self.visible(idx % self.cols, idx / self.cols) {
                self.pixels[idx] = blend(self.pixels[idx], color, alpha);
            }
        }
        covered.clear();
        self.scratch = covered;
    }
}

impl Surface for Canvas {
    fn width(&self) -> f32 {
        self.cols as f32 * self.scale
    }

    fn height(&self) -> f32 {
        self.rows as f32 * self.scale
    }

    fn fill(&mut self, color: Rgb, alpha: f32) {
        let alpha = alpha * self.state.alpha;
        for py in 0..self.rows {
            for px in 0..self.cols {
                if self.visible(px, py) {
                    let idx = py * self.cols + px;
                    self.pixels[idx] = blend(self.pixels[idx], color, alpha);
                }
            }
        }
    }

    fn stroke_path(&mut self, points: &[Point], color: Rgb, width: f32) {
        if points.len() < 2 {
            return;
        }
        let radius = width / 2.0;
        // Stamp discs along each segment at most half a raster pixel apart
        let step = self.scale * 0.5;
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let steps = (a.distance(b) / step).ceil().max(1.0) as usize;
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                let p = Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
                self.cover_disc(p, radius);
            }
        }
        self.paint_scratch(color);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb) {
        self.cover_disc(center, radius);
        self.paint_scratch(color);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn clip(&mut self, rect: Rect) {
        self.state.clip = Some(match self.state.clip {
            Some(current) => current.intersect(&rect),
            None => rect,
        });
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = (0, 0, 0);
    const WHITE: Rgb = (255, 255, 255);

    #[test]
    fn logical_size_scales_raster() {
        let canvas = Canvas::new(20, 10, 4.0, BLACK);
        assert_eq!(canvas.width(), 80.0);
        assert_eq!(canvas.height(), 40.0);
        assert_eq!(canvas.raster_size(), (20, 10));
    }

    #[test]
    fn translucent_fill_fades_toward_color() {
        let mut canvas = Canvas::new(4, 4, 1.0, WHITE);
        canvas.fill(BLACK, 0.5);
        assert_eq!(canvas.pixel(0, 0), (128, 128, 128));
        canvas.fill(BLACK, 0.5);
        assert_eq!(canvas.pixel(3, 3), (64, 64, 64));
    }

    #[test]
    fn circle_covers_center_only_within_radius() {
        let mut canvas = Canvas::new(10, 10, 1.0, BLACK);
        canvas.fill_circle(Point::new(5.0, 5.0), 2.0, WHITE);
        assert_eq!(canvas.pixel(5, 5), WHITE);
        assert_eq!(canvas.pixel(4, 4), WHITE);
        assert_eq!(canvas.pixel(0, 0), BLACK);
        assert_eq!(canvas.pixel(9, 9), BLACK);
    }

    #[test]
    fn tiny_circle_marks_one_pixel() {
        let mut canvas = Canvas::new(10, 10, 4.0, BLACK);
        canvas.fill_circle(Point::new(13.0, 21.0), 0.5, WHITE);
        assert_eq!(canvas.pixel(3, 5), WHITE);
        let lit = (0..10)
            .flat_map(|y| (0..10).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == WHITE)
            .count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn off_surface_circle_is_ignored() {
        let mut canvas = Canvas::new(4, 4, 1.0, BLACK);
        canvas.fill_circle(Point::new(-50.0, -50.0), 1.0, WHITE);
        canvas.fill_circle(Point::new(50.0, 50.0), 1.0, WHITE);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(canvas.pixel(x, y), BLACK);
            }
        }
    }

    #[test]
    fn stroke_blends_each_pixel_once() {
        let mut canvas = Canvas::new(10, 3, 1.0, BLACK);
        canvas.set_alpha(0.5);
        let path = [Point::new(0.5, 1.5), Point::new(5.5, 1.5), Point::new(9.5, 1.5)];
        canvas.stroke_path(&path, WHITE, 1.0);
        for x in 0..10 {
            assert_eq!(canvas.pixel(x, 1), (128, 128, 128), "pixel {x}");
        }
        assert_eq!(canvas.pixel(4, 0), BLACK);
    }

    #[test]
    fn single_point_path_draws_nothing() {
        let mut canvas = Canvas::new(4, 4, 1.0, BLACK);
        canvas.stroke_path(&[Point::new(2.0, 2.0)], WHITE, 3.0);
        assert_eq!(canvas.pixel(2, 2), BLACK);
    }

    #[test]
    fn clip_limits_drawing() {
        let mut canvas = Canvas::new(10, 2, 1.0, BLACK);
        canvas.clip(Rect::new(0.0, 0.0, 5.0, 2.0));
        canvas.fill(WHITE, 1.0);
        assert_eq!(canvas.pixel(4, 0), WHITE);
        assert_eq!(canvas.pixel(5, 0), BLACK);
    }

    #[test]
    fn restore_isolates_paint_state() {
        let mut canvas = Canvas::new(10, 2, 1.0, BLACK);
        canvas.save();
        canvas.set_alpha(0.0);
        canvas.clip(Rect::new(0.0, 0.0, 1.0, 1.0));
        canvas.restore();
        canvas.fill(WHITE, 1.0);
        assert_eq!(canvas.pixel(9, 1), WHITE);
    }

    #[test]
    fn resize_keeps_overlap() {
        let mut canvas = Canvas::new(4, 4, 1.0, BLACK);
        canvas.fill_circle(Point::new(0.5, 0.5), 0.4, WHITE);
        canvas.resize(2, 6);
        assert_eq!(canvas.raster_size(), (2, 6));
        assert_eq!(canvas.pixel(0, 0), WHITE);
        assert_eq!(canvas.pixel(1, 5), BLACK);
        assert_eq!(canvas.width(), 2.0);
    }
}
