use super::Band;
use super::projectile::Projectile;
use crate::color::Hsl;
use crate::config::{BurstConfig, ProjectileConfig, SpawnConfig, SpawnPolicy};
use crate::surface::{Point, Surface};
use fastrand::Rng;
use tracing::debug;

/// Where rockets may launch: one of `bands`, from the bottom edge of a
/// surface `height` pixels tall.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnArea {
    pub bands: Vec<Band>,
    pub height: f32,
    /// Particles die when they leave the band their rocket launched from.
    pub confine: bool,
}

pub struct Population {
    projectiles: Vec<Projectile>,
    area: SpawnArea,
    spawn: SpawnConfig,
    projectile: ProjectileConfig,
    burst: BurstConfig,
    last_spawn: Option<f64>,
}

impl Population {
    pub fn new(area: SpawnArea, spawn: SpawnConfig, projectile: ProjectileConfig, burst: BurstConfig) -> Self {
        Self {
            projectiles: Vec::with_capacity(spawn.max_active),
            area,
            spawn,
            projectile,
            burst,
            last_spawn: None,
        }
    }

    /// Launch one rocket from a random band toward a random height.
    /// Does nothing when the population is already at its cap.
    pub fn spawn(&mut self, rng: &mut Rng) -> bool {
        if self.is_full() || self.area.bands.is_empty() {
            return false;
        }

        let band = self.area.bands[rng.usize(0..self.area.bands.len())];
        let launch_x = band.sample(rng);
        let target_x = if self.spawn.vertical { launch_x } else { band.sample(rng) };
        let target_y = self.spawn.target_height.sample(rng) * self.area.height;
        let color = self.spawn.colors.pick(rng);
        let confine = self.area.confine.then_some(band);

        self.launch(
            Point::new(launch_x, self.area.height),
            Point::new(target_x, target_y),
            color,
            confine,
        )
    }

    /// Launch a rocket along an explicit path, subject to the cap.
    pub fn launch(&mut self, launch: Point, target: Point, color: Hsl, band: Option<Band>) -> bool {
        if self.is_full() {
            return false;
        }
        debug!(
            from_x = launch.x,
            from_y = launch.y,
            to_x = target.x,
            to_y = target.y,
            active = self.projectiles.len() + 1,
            "launch"
        );
        self.projectiles
            .push(Projectile::new(launch, target, color, band, &self.projectile, &self.burst));
        true
    }

    /// Apply the spawn policy for a frame at `timestamp` milliseconds.
    pub fn maybe_spawn(&mut self, timestamp: f64, rng: &mut Rng) -> bool {
        match self.spawn.policy {
            SpawnPolicy::Interval { every_ms } => {
                let last = *self.last_spawn.get_or_insert(timestamp);
                if timestamp - last < every_ms {
                    return false;
                }
                self.last_spawn = Some(timestamp);
                self.spawn(rng)
            }
            SpawnPolicy::Chance { probability } => rng.f32() < probability && self.spawn(rng),
        }
    }

    /// Advance every rocket one tick. A rocket already spent when the tick
    /// starts is dropped instead of updated, so its last frame with dead
    /// particles is the tick in which they died.
    pub fn tick(&mut self, rng: &mut Rng) {
        self.projectiles.retain_mut(|projectile| {
            if projectile.is_spent() {
                return false;
            }
            projectile.update(rng);
            true
        });
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for projectile in &self.projectiles {
            projectile.draw(surface);
        }
    }

    /// Swap in new launch bounds. Rockets already in flight are untouched.
    pub fn set_area(&mut self, area: SpawnArea) {
        self.area = area;
    }

    pub fn area(&self) -> &SpawnArea {
        &self.area
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    fn is_full(&self) -> bool {
        self.projectiles.len() >= self.spawn.max_active
    }
}
