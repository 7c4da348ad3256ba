//! Running flag plus the spawn interval, both advanced from engine ticks.

use tether_engine::IntervalTimer;

#[derive(Debug, Clone)]
pub struct FrameScheduler {
    running: bool,
    spawn_timer: IntervalTimer,
    ticks: u64,
}

/// Work due on one running tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPlan {
    /// Spawn intervals that elapsed during this tick.
    pub spawns: u32,
}

impl FrameScheduler {
    /// Stopped scheduler spawning every `spawn_period` seconds once started.
    pub fn new(spawn_period: f32) -> Self {
        Self {
            running: false,
            spawn_timer: IntervalTimer::new(spawn_period),
            ticks: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Running ticks since the last start.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seconds between spawns.
    pub fn spawn_period(&self) -> f32 {
        self.spawn_timer.period()
    }

    pub fn set_spawn_period(&mut self, period: f32) {
        self.spawn_timer.set_period(period);
    }

    /// Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.ticks = 0;
        self.spawn_timer.start();
        true
    }

    /// Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.spawn_timer.cancel();
        true
    }

    /// Advance one fixed tick of `dt` seconds. `None` while stopped.
    pub fn tick(&mut self, dt: f32) -> Option<TickPlan> {
        if !self.running {
            return None;
        }
        self.ticks += 1;
        Some(TickPlan { spawns: self.spawn_timer.advance(dt) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn stopped_scheduler_does_nothing() {
        let mut s = FrameScheduler::new(1.4);
        assert!(s.tick(DT).is_none());
        assert!(s.tick(10.0).is_none());
        assert_eq!(s.ticks(), 0);
    }

    #[test]
    fn spawns_every_interval() {
        let mut s = FrameScheduler::new(1.4);
        assert!(s.start());
        let mut spawns = 0;
        // 7 seconds of running time, a hair over to absorb float drift
        for _ in 0..421 {
            spawns += s.tick(DT).unwrap().spawns;
        }
        assert_eq!(spawns, 5);
    }

    #[test]
    fn no_spawns_after_stop() {
        let mut s = FrameScheduler::new(1.4);
        s.start();
        for _ in 0..60 {
            s.tick(DT);
        }
        assert!(s.stop());
        assert!(!s.is_running());
        for _ in 0..600 {
            assert!(s.tick(DT).is_none());
        }
    }

    #[test]
    fn period_can_change_while_running() {
        let mut s = FrameScheduler::new(1.4);
        s.start();
        s.set_spawn_period(0.5);
        assert_eq!(s.spawn_period(), 0.5);
        let mut spawns = 0;
        for _ in 0..61 {
            spawns += s.tick(DT).unwrap().spawns;
        }
        assert_eq!(spawns, 2);
    }

    #[test]
    fn restart_resets_interval() {
        let mut s = FrameScheduler::new(1.4);
        s.start();
        for _ in 0..80 {
            s.tick(DT);
        }
        s.stop();
        s.start();
        let mut spawns = 0;
        for _ in 0..80 {
            spawns += s.tick(DT).unwrap().spawns;
        }
        assert_eq!(spawns, 0);
    }

    #[test]
    fn double_start_is_ignored() {
        let mut s = FrameScheduler::new(1.4);
        assert!(s.start());
        s.tick(DT);
        assert!(!s.start());
        assert_eq!(s.ticks(), 1);
        assert!(s.stop());
        assert!(!s.stop());
    }
}
