use super::Band;
use super::population::{Population, SpawnArea};
use crate::config::{Config, Layout};
use crate::scheduler::{FrameClock, Scheduler};
use crate::surface::{Rect, Surface};
use fastrand::Rng;
use tracing::{info, trace};

struct Panel {
    clip: Option<Rect>,
    population: Population,
}

/// Top-level owner of the simulation: every population, the random source
/// and the frame throttle live here and nowhere else.
pub struct Show {
    config: Config,
    panels: Vec<Panel>,
    rng: Rng,
    clock: FrameClock,
    running: bool,
    frames: u64,
}

impl Show {
    pub fn new(config: Config, width: f32, height: f32, rng: Rng) -> Self {
        let panels = layout(&config.layout, width, height)
            .into_iter()
            .map(|(clip, area)| Panel {
                clip,
                population: Population::new(area, config.spawn, config.projectile, config.burst),
            })
            .collect();

        Self {
            clock: FrameClock::new(config.min_tick_interval_ms),
            config,
            panels,
            rng,
            running: false,
            frames: 0,
        }
    }

    pub fn start(&mut self, scheduler: &mut Scheduler) {
        if !self.running {
            info!(preset = self.config.preset.name(), "show started");
        }
        self.running = true;
        scheduler.request_frame();
    }

    /// Stop scheduling frames. Rockets and particles stay where they are.
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if self.running {
            info!(frames = self.frames, "show stopped");
        }
        self.running = false;
        scheduler.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one frame callback. Returns whether the simulation advanced.
    pub fn frame(&mut self, timestamp: f64, surface: &mut dyn Surface, scheduler: &mut Scheduler) -> bool {
        if !self.running {
            return false;
        }
        scheduler.request_frame();

        if !self.clock.accept(timestamp) {
            trace!(timestamp, "frame throttled");
            return false;
        }

        // Translucent overwrite so earlier frames fade into trails
        surface.fill(self.config.fade.color, self.config.fade.alpha);

        for panel in &mut self.panels {
            panel.population.maybe_spawn(timestamp, &mut self.rng);
            panel.population.tick(&mut self.rng);

            surface.save();
            if let Some(clip) = panel.clip {
                surface.clip(clip);
            }
            panel.population.draw(surface);
            surface.restore();
        }

        self.frames += 1;
        true
    }

    /// Recompute launch regions for a new surface size. Rockets in flight
    /// keep their absolute positions.
    pub fn resize(&mut self, width: f32, height: f32) {
        info!(width, height, "surface resized");
        for (panel, (clip, area)) in self.panels.iter_mut().zip(layout(&self.config.layout, width, height)) {
            panel.clip = clip;
            panel.population.set_area(area);
        }
    }

    pub fn populations(&self) -> impl Iterator<Item = &Population> {
        self.panels.iter().map(|panel| &panel.population)
    }

    pub fn active(&self) -> usize {
        self.populations().map(Population::len).sum()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

fn layout(layout: &Layout, width: f32, height: f32) -> Vec<(Option<Rect>, SpawnArea)> {
    match *layout {
        Layout::Columns { max_band_width, band_fraction } => {
            let band = max_band_width.min(width * band_fraction);
            let area = SpawnArea {
                bands: vec![Band::new(0.0, band), Band::new(width - band, width)],
                height,
                confine: true,
            };
            vec![(None, area)]
        }
        Layout::Panels { count } => {
            let count = count.max(1);
            let panel_width = width / count as f32;
            (0..count)
                .map(|i| {
                    let x = panel_width * i as f32;
                    let area = SpawnArea {
                        bands: vec![Band::new(x, x + panel_width)],
                        height,
                        confine: false,
                    };
                    (Some(Rect::new(x, 0.0, panel_width, height)), area)
                })
                .collect()
        }
    }
}
