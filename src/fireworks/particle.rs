use super::Band;
use crate::color::Hsl;
use crate::config::BurstConfig;
use crate::surface::{Point, Surface};
use fastrand::Rng;

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Hsl,
    pub opacity: f32,
    pub size: f32,
    drag: f32,
    gravity: f32,
    decay: f32,
    band: Option<Band>, // particle dies once it drifts out of this strip
}

impl Particle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        origin: Point,
        velocity: (f32, f32),
        color: Hsl,
        size: f32,
        drag: f32,
        gravity: f32,
        decay: f32,
        band: Option<Band>,
    ) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            vx: velocity.0,
            vy: velocity.1,
            color,
            opacity: 1.0,
            size,
            drag,
            gravity,
            decay,
            band,
        }
    }

    /// Every particle of one detonation, all starting at `origin`.
    pub fn burst(
        origin: Point,
        base: Hsl,
        config: &BurstConfig,
        band: Option<Band>,
        rng: &mut Rng,
    ) -> Vec<Particle> {
        let physics = &config.particle;
        (0..config.count)
            .map(|_| {
                let velocity = config.spread.sample(rng);
                let lightness = physics.lightness.sample(rng);
                let color = config.palette.pick(base, physics.saturation, lightness, rng);
                Particle::new(
                    origin,
                    velocity,
                    color,
                    physics.size.sample(rng),
                    physics.drag,
                    physics.gravity,
                    physics.decay.sample(rng),
                    band,
                )
            })
            .collect()
    }

    /// Advance one tick. Returns `false` once the particle is dead.
    pub fn update(&mut self) -> bool {
        // Drag, then gravity, then move. Swapping these changes the arc.
        self.vx *= self.drag;
        self.vy *= self.drag;
        self.vy += self.gravity;
        self.x += self.vx;
        self.y += self.vy;
        self.opacity -= self.decay;

        if self.opacity <= 0.0 {
            return false;
        }
        match self.band {
            Some(band) => band.contains(self.x),
            None => true,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.set_alpha(self.opacity);
        surface.fill_circle(Point::new(self.x, self.y), self.size, self.color.to_rgb());
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Preset};
    use crate::surface::recording::{Call, RecordingSurface};

    fn still(decay: f32) -> Particle {
        Particle::new(Point::new(0.0, 0.0), (0.0, 0.0), Hsl::new(0.0, 100.0, 50.0), 1.0, 1.0, 0.0, decay, None)
    }

    #[test]
    fn opacity_never_increases_and_death_is_reported_on_the_same_call() {
        let mut p = still(0.3);
        let mut last = p.opacity;
        let mut alive = true;
        let mut calls = 0;
        while alive {
            alive = p.update();
            calls += 1;
            assert!(p.opacity <= last);
            last = p.opacity;
            assert_eq!(alive, p.opacity > 0.0);
        }
        assert_eq!(calls, 4);
    }

    #[test]
    fn drag_applies_before_gravity() {
        let mut p = Particle::new(Point::new(0.0, 0.0), (10.0, -10.0), Hsl::new(0.0, 100.0, 50.0), 1.0, 0.5, 1.0, 0.0, None);
        p.update();
        assert_eq!(p.vx, 5.0);
        // -10 * 0.5 + 1, not (-10 + 1) * 0.5
        assert_eq!(p.vy, -4.0);
        assert_eq!((p.x, p.y), (5.0, -4.0));
    }

    #[test]
    fn leaving_the_band_kills_the_particle() {
        let band = Some(Band::new(0.0, 10.0));
        let mut p = Particle::new(Point::new(9.0, 0.0), (4.0, 0.0), Hsl::new(0.0, 100.0, 50.0), 1.0, 1.0, 0.0, 0.01, band);
        assert!(!p.update());
        assert!(p.opacity > 0.0);

        let mut inside = Particle::new(Point::new(5.0, 0.0), (1.0, 0.0), Hsl::new(0.0, 100.0, 50.0), 1.0, 1.0, 0.0, 0.01, band);
        assert!(inside.update());
    }

    #[test]
    fn burst_has_configured_size_and_starts_opaque() {
        let mut rng = Rng::with_seed(5);
        let config = Config::preset(Preset::Columns).burst;
        let origin = Point::new(50.0, 60.0);
        let particles = Particle::burst(origin, Hsl::new(200.0, 100.0, 50.0), &config, None, &mut rng);
        assert_eq!(particles.len(), 150);
        for p in &particles {
            assert_eq!((p.x, p.y), (50.0, 60.0));
            assert_eq!(p.opacity, 1.0);
            assert!((0.01..=0.02).contains(&p.decay));
            assert!((0.5..=2.5).contains(&p.size));
            assert!((p.color.h - 200.0).abs() <= 20.0);
        }
    }

    #[test]
    fn draw_isolates_alpha() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut p = still(0.25);
        p.update();
        p.draw(&mut surface);
        assert_eq!(surface.alpha(), 1.0);
        assert_eq!(surface.depth(), 0);
        match surface.circles().next() {
            Some(Call::Circle { alpha, radius, color, .. }) => {
                assert_eq!(*alpha, 0.75);
                assert_eq!(*radius, 1.0);
                assert_eq!(*color, (255, 0, 0));
            }
            other => panic!("expected a circle, got {other:?}"),
        }
    }
}
