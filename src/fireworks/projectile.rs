use super::Band;
use super::particle::Particle;
use super::trail::Trail;
use crate::color::Hsl;
use crate::config::{BurstConfig, ProjectileConfig, RocketStyle};
use crate::surface::{Point, Surface};
use fastrand::Rng;
use tracing::debug;

#[derive(Clone, Debug)]
pub enum Stage {
    Ascending { position: Point, speed: f32, trail: Trail },
    Exploded { particles: Vec<Particle> },
}

/// A rocket rising from its launch point toward a target, then the burst it
/// becomes once it has covered the launch-to-target distance.
#[derive(Clone, Debug)]
pub struct Projectile {
    launch: Point,
    target: Point,
    distance_to_target: f32,
    distance_traveled: f32,
    angle: f32,
    acceleration: f32,
    style: RocketStyle,
    color: Hsl,
    band: Option<Band>,
    burst: BurstConfig,
    stage: Stage,
}

impl Projectile {
    pub fn new(
        launch: Point,
        target: Point,
        color: Hsl,
        band: Option<Band>,
        config: &ProjectileConfig,
        burst: &BurstConfig,
    ) -> Self {
        Self {
            launch,
            target,
            distance_to_target: launch.distance(target),
            distance_traveled: 0.0,
            angle: (target.y - launch.y).atan2(target.x - launch.x),
            acceleration: config.acceleration,
            style: config.style,
            color,
            band,
            burst: *burst,
            stage: Stage::Ascending {
                position: launch,
                speed: config.initial_speed,
                trail: Trail::new(config.trail_capacity),
            },
        }
    }

    pub fn update(&mut self, rng: &mut Rng) {
        let detonation = match &mut self.stage {
            Stage::Ascending { position, speed, trail } => {
                trail.push(*position);
                *speed *= self.acceleration;
                let vx = self.angle.cos() * *speed;
                let vy = self.angle.sin() * *speed;
                self.distance_traveled = position.distance(self.launch);

                if self.distance_traveled >= self.distance_to_target {
                    Some(*position)
                } else {
                    position.x += vx;
                    position.y += vy;
                    None
                }
            }
            Stage::Exploded { particles } => {
                particles.retain_mut(|p| p.update());
                None
            }
        };

        if let Some(origin) = detonation {
            self.detonate(origin, rng);
        }
    }

    fn detonate(&mut self, origin: Point, rng: &mut Rng) {
        let particles = Particle::burst(origin, self.color, &self.burst, self.band, rng);
        debug!(
            x = origin.x,
            y = origin.y,
            particles = particles.len(),
            "detonated"
        );
        self.stage = Stage::Exploded { particles };
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match &self.stage {
            Stage::Ascending { position, trail, .. } => match self.style {
                RocketStyle::Streak { width } => {
                    let mut points: Vec<Point> = trail.iter().copied().collect();
                    points.push(*position);
                    surface.stroke_path(&points, self.color.to_rgb(), width);
                }
                RocketStyle::Glow { radius, halo_scale, halo_alpha } => {
                    let rgb = self.color.to_rgb();
                    surface.save();
                    surface.set_alpha(halo_alpha);
                    surface.fill_circle(*position, radius * halo_scale, rgb);
                    surface.set_alpha(1.0);
                    surface.fill_circle(*position, radius, rgb);
                    surface.restore();
                }
            },
            Stage::Exploded { particles } => {
                for particle in particles {
                    particle.draw(surface);
                }
            }
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn is_exploded(&self) -> bool {
        matches!(self.stage, Stage::Exploded { .. })
    }

    /// Exploded and every particle has died.
    pub fn is_spent(&self) -> bool {
        matches!(&self.stage, Stage::Exploded { particles } if particles.is_empty())
    }

    pub fn particles(&self) -> &[Particle] {
        match &self.stage {
            Stage::Exploded { particles } => particles,
            Stage::Ascending { .. } => &[],
        }
    }

    /// Current head position while ascending.
    pub fn position(&self) -> Option<Point> {
        match &self.stage {
            Stage::Ascending { position, .. } => Some(*position),
            Stage::Exploded { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f32> {
        match &self.stage {
            Stage::Ascending { speed, .. } => Some(*speed),
            Stage::Exploded { .. } => None,
        }
    }

    pub fn launch(&self) -> Point {
        self.launch
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn band(&self) -> Option<Band> {
        self.band
    }

    pub fn distance_to_target(&self) -> f32 {
        self.distance_to_target
    }

    pub fn distance_traveled(&self) -> f32 {
        self.distance_traveled
    }
}
