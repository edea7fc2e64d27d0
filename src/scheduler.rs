use std::time::{Duration, Instant};

/// Hands out frame callbacks at the display cadence. Nothing runs on its own:
/// every frame has to be requested, and the frame handler requests the next.
pub struct Scheduler {
    origin: Instant,
    frame_interval: Duration,
    next_deadline: Instant,
    pending: bool,
}

impl Scheduler {
    pub fn new(fps: u32) -> Self {
        let origin = Instant::now();
        Self {
            origin,
            frame_interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            next_deadline: origin,
            pending: false,
        }
    }

    pub fn request_frame(&mut self) {
        self.pending = true;
    }

    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// How long until a requested frame is due, or `None` when nothing was requested.
    pub fn time_until_frame(&self) -> Option<Duration> {
        self.time_until_frame_at(Instant::now())
    }

    /// Consume the pending request once it is due, returning the frame
    /// timestamp in milliseconds since the scheduler was created.
    pub fn take_frame(&mut self) -> Option<f64> {
        self.take_frame_at(Instant::now())
    }

    fn time_until_frame_at(&self, now: Instant) -> Option<Duration> {
        self.pending.then(|| self.next_deadline.saturating_duration_since(now))
    }

    fn take_frame_at(&mut self, now: Instant) -> Option<f64> {
        if !self.pending || now < self.next_deadline {
            return None;
        }
        self.pending = false;
        self.next_deadline += self.frame_interval;
        // After a stall, resume the cadence from now instead of bursting to catch up
        if self.next_deadline <= now {
            self.next_deadline = now + self.frame_interval;
        }
        Some(now.duration_since(self.origin).as_secs_f64() * 1000.0)
    }
}

/// Optional fixed-rate throttle on top of the display cadence.
pub struct FrameClock {
    min_interval_ms: Option<f64>,
    last_tick: Option<f64>,
}

impl FrameClock {
    pub fn new(min_interval_ms: Option<f64>) -> Self {
        Self { min_interval_ms, last_tick: None }
    }

    /// Whether a frame at `timestamp` should run the simulation. Accepted
    /// frames become the reference point for the next check.
    pub fn accept(&mut self, timestamp: f64) -> bool {
        if let (Some(min), Some(last)) = (self.min_interval_ms, self.last_tick) {
            if timestamp - last < min {
                return false;
            }
        }
        self.last_tick = Some(timestamp);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_need_a_request() {
        let mut scheduler = Scheduler::new(60);
        let later = scheduler.origin + Duration::from_secs(1);
        assert_eq!(scheduler.time_until_frame_at(later), None);
        assert_eq!(scheduler.take_frame_at(later), None);

        scheduler.request_frame();
        assert_eq!(scheduler.time_until_frame_at(later), Some(Duration::ZERO));
        let ts = scheduler.take_frame_at(later).unwrap();
        assert!((ts - 1000.0).abs() < 1e-6);
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.take_frame_at(later), None);
    }

    #[test]
    fn frames_wait_for_the_next_deadline() {
        let mut scheduler = Scheduler::new(10);
        let start = scheduler.origin;
        scheduler.request_frame();
        assert!(scheduler.take_frame_at(start).is_some());

        scheduler.request_frame();
        let early = start + Duration::from_millis(40);
        assert_eq!(scheduler.time_until_frame_at(early), Some(Duration::from_millis(60)));
        assert_eq!(scheduler.take_frame_at(early), None);
        assert!(scheduler.is_pending());

        let due = start + Duration::from_millis(100);
        assert!(scheduler.take_frame_at(due).is_some());
    }

    #[test]
    fn timestamps_are_monotonic() {
        let mut scheduler = Scheduler::new(60);
        let mut last = -1.0;
        for i in 0..10 {
            scheduler.request_frame();
            let now = scheduler.origin + Duration::from_millis(20 * i);
            let ts = scheduler.take_frame_at(now).unwrap();
            assert!(ts > last);
            last = ts;
        }
    }

    #[test]
    fn cancel_drops_the_request() {
        let mut scheduler = Scheduler::new(60);
        scheduler.request_frame();
        scheduler.cancel();
        assert_eq!(scheduler.take_frame_at(scheduler.origin + Duration::from_secs(1)), None);
    }

    #[test]
    fn clock_without_limit_accepts_everything() {
        let mut clock = FrameClock::new(None);
        assert!(clock.accept(0.0));
        assert!(clock.accept(0.1));
        assert!(clock.accept(0.2));
    }

    #[test]
    fn clock_skips_frames_inside_the_interval() {
        let mut clock = FrameClock::new(Some(1000.0 / 90.0));
        assert!(clock.accept(0.0));
        assert!(!clock.accept(8.0));
        assert!(clock.accept(16.7));
        assert!(!clock.accept(20.0));
        assert!(clock.accept(33.4));
    }
}
