//! Frame timing

use std::time::Instant;

use crate::consts::MAX_FRAME_DT;

/// Supplies the elapsed time of the current frame
pub trait TimeService {
    /// Seconds since the previous frame
    fn delta_time(&self) -> f32;
}

/// Constant delta, for tests and deterministic headless runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep(pub f32);

impl TimeService for FixedTimestep {
    fn delta_time(&self) -> f32 {
        self.0
    }
}

/// Wall clock timer
///
/// Call [`FrameClock::tick`] once at the top of every frame. The reported
/// delta is clamped to `max_dt` so a stalled frame (debugger, window drag)
/// cannot teleport entities.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    delta: f32,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last: Instant::now(),
            delta: 0.0,
            max_dt,
        }
    }

    /// Measure the time since the last tick
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now
            .duration_since(self.last)
            .as_secs_f32()
            .min(self.max_dt);
        self.last = now;
    }
}

impl TimeService for FrameClock {
    fn delta_time(&self) -> f32 {
        self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_timestep_reports_its_value() {
        assert_eq!(FixedTimestep(0.25).delta_time(), 0.25);
    }

    #[test]
    fn frame_clock_starts_at_zero_and_clamps() {
        let mut clock = FrameClock::new(0.0);
        assert_eq!(clock.delta_time(), 0.0);
        std::thread::sleep(std::time::Duration::from_millis(2));
        clock.tick();
        assert_eq!(clock.delta_time(), 0.0);
    }
}
