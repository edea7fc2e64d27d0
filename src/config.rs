use crate::color::{Hsl, Rgb, SHELL_PALETTE};
use fastrand::Rng;

/// Closed range sampled uniformly. A range with `max <= min` always yields `min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    pub fn sample(&self, rng: &mut Rng) -> f32 {
        if self.max <= self.min {
            self.min
        } else {
            self.min + rng.f32() * (self.max - self.min)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Two narrow launch columns at the screen edges, particles stay in their column.
    Columns,
    /// Two side-by-side panels, each running its own independent show.
    Panels,
}

impl Preset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "columns" => Some(Preset::Columns),
            "panels" => Some(Preset::Panels),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Columns => "columns",
            Preset::Panels => "panels",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleConfig {
    /// Velocity multiplier applied every tick (air resistance).
    pub drag: f32,
    pub gravity: f32,
    /// Opacity lost per tick, sampled once per particle.
    pub decay: Span,
    pub size: Span,
    pub saturation: f32,
    pub lightness: Span,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Spread {
    /// Uniform direction over the full circle with a uniform speed.
    Radial { speed: Span },
    /// Each velocity component uniform in `-extent/2..extent/2`.
    Square { extent: f32 },
}

impl Spread {
    pub fn sample(&self, rng: &mut Rng) -> (f32, f32) {
        match *self {
            Spread::Radial { speed } => {
                let angle = rng.f32() * std::f32::consts::TAU;
                let speed = speed.sample(rng);
                (angle.cos() * speed, angle.sin() * speed)
            }
            Spread::Square { extent } => (
                (rng.f32() - 0.5) * extent,
                (rng.f32() - 0.5) * extent,
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Palette {
    /// Shell hue nudged by up to `degrees` either way.
    Jitter { degrees: f32 },
    /// Shell hue, its neighbours at ±30°, its complement, or a warm white-yellow.
    Complementary,
}

impl Palette {
    pub fn pick(&self, base: Hsl, saturation: f32, lightness: f32, rng: &mut Rng) -> Hsl {
        match *self {
            Palette::Jitter { degrees } => {
                let offset = (rng.f32() * 2.0 - 1.0) * degrees;
                Hsl::new(base.h + offset, saturation, lightness)
            }
            Palette::Complementary => {
                let hue = match rng.usize(0..5) {
                    0 => base.h,
                    1 => base.h + 30.0,
                    2 => base.h - 30.0,
                    3 => base.h + 180.0,
                    _ => return Hsl::new(60.0, 100.0, 80.0),
                };
                Hsl::new(hue, saturation, lightness)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstConfig {
    pub count: usize,
    pub spread: Spread,
    pub palette: Palette,
    pub particle: ParticleConfig,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RocketStyle {
    /// Line through the recent positions.
    Streak { width: f32 },
    /// Bright head with a soft halo around it.
    Glow { radius: f32, halo_scale: f32, halo_alpha: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileConfig {
    pub initial_speed: f32,
    /// Speed multiplier per ascending tick, must be above 1.
    pub acceleration: f32,
    pub trail_capacity: usize,
    pub style: RocketStyle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnPolicy {
    Interval { every_ms: f64 },
    Chance { probability: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShellColors {
    Palette(&'static [Hsl]),
    RandomHue { saturation: f32, lightness: f32 },
}

impl ShellColors {
    pub fn pick(&self, rng: &mut Rng) -> Hsl {
        match *self {
            ShellColors::Palette(colors) if !colors.is_empty() => colors[rng.usize(0..colors.len())],
            ShellColors::Palette(_) => Hsl::new(0.0, 0.0, 100.0),
            ShellColors::RandomHue { saturation, lightness } => {
                Hsl::new(rng.f32() * 360.0, saturation, lightness)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnConfig {
    pub policy: SpawnPolicy,
    pub max_active: usize,
    /// Target height as a fraction of the surface height, measured from the top.
    pub target_height: Span,
    /// Rockets rise straight up instead of heading for a random point in their band.
    pub vertical: bool,
    pub colors: ShellColors,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layout {
    Columns { max_band_width: f32, band_fraction: f32 },
    Panels { count: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    pub color: Rgb,
    pub alpha: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub preset: Preset,
    pub layout: Layout,
    pub spawn: SpawnConfig,
    pub projectile: ProjectileConfig,
    pub burst: BurstConfig,
    pub fade: Fade,
    /// Logical pixels per rendered terminal pixel.
    pub pixel_scale: f32,
    /// Display refresh cadence driving the scheduler.
    pub fps: u32,
    /// Simulation ticks closer together than this are skipped.
    pub min_tick_interval_ms: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Config::preset(Preset::Columns)
    }
}

impl Config {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Columns => Config {
                preset,
                layout: Layout::Columns { max_band_width: 300.0, band_fraction: 0.2 },
                spawn: SpawnConfig {
                    policy: SpawnPolicy::Interval { every_ms: 300.0 },
                    max_active: 8,
                    target_height: Span::new(0.1, 0.5),
                    vertical: false,
                    colors: ShellColors::Palette(&SHELL_PALETTE),
                },
                projectile: ProjectileConfig {
                    initial_speed: 10.0,
                    acceleration: 1.05,
                    trail_capacity: 7,
                    style: RocketStyle::Streak { width: 3.0 },
                },
                burst: BurstConfig {
                    count: 150,
                    spread: Spread::Radial { speed: Span::new(2.0, 8.0) },
                    palette: Palette::Jitter { degrees: 20.0 },
                    particle: ParticleConfig {
                        drag: 0.95,
                        gravity: 0.3,
                        decay: Span::new(0.01, 0.02),
                        size: Span::new(0.5, 2.5),
                        saturation: 100.0,
                        lightness: Span::new(50.0, 90.0),
                    },
                },
                fade: Fade { color: (30, 60, 114), alpha: 0.2 },
                pixel_scale: 4.0,
                fps: 60,
                min_tick_interval_ms: None,
            },
            Preset::Panels => Config {
                preset,
                layout: Layout::Panels { count: 2 },
                spawn: SpawnConfig {
                    policy: SpawnPolicy::Chance { probability: 0.12 },
                    max_active: 4,
                    target_height: Span::new(0.1, 0.35),
                    vertical: true,
                    colors: ShellColors::RandomHue { saturation: 100.0, lightness: 70.0 },
                },
                projectile: ProjectileConfig {
                    initial_speed: 16.0,
                    acceleration: 1.02,
                    trail_capacity: 7,
                    style: RocketStyle::Glow { radius: 2.0, halo_scale: 3.0, halo_alpha: 0.3 },
                },
                burst: BurstConfig {
                    count: 80,
                    spread: Spread::Square { extent: 12.0 },
                    palette: Palette::Complementary,
                    particle: ParticleConfig {
                        drag: 0.96,
                        gravity: 0.2,
                        decay: Span::fixed(0.006),
                        size: Span::new(1.0, 3.0),
                        saturation: 100.0,
                        lightness: Span::fixed(70.0),
                    },
                },
                fade: Fade { color: (245, 245, 245), alpha: 0.15 },
                pixel_scale: 4.0,
                fps: 60,
                min_tick_interval_ms: Some(1000.0 / 90.0),
            },
        }
    }
}
