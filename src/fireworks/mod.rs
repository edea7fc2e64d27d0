use fastrand::Rng;

pub mod particle;
pub mod population;
pub mod projectile;
pub mod show;
pub mod trail;

/// Horizontal strip of the surface, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub min_x: f32,
    pub max_x: f32,
}

impl Band {
    pub const fn new(min_x: f32, max_x: f32) -> Self {
        Self { min_x, max_x }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.min_x && x <= self.max_x
    }

    pub fn sample(&self, rng: &mut Rng) -> f32 {
        self.min_x + rng.f32() * self.width().max(0.0)
    }
}
