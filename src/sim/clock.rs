/// Fixed-timestep driver: ~30 logical ticks per second regardless of the
/// host's frame rate. Excess elapsed time is dropped modulo the period
/// (frame-skipping, not multi-step catch-up), so a stalled frame never
/// produces a burst of ticks. All layer timing is expressed in tick
/// counts, never wall-clock time.

use std::time::{Duration, Instant};

pub const TICKS_PER_SEC: u64 = 30;
pub const DEFAULT_TICK_MS: u64 = 1000 / TICKS_PER_SEC;

pub struct FrameClock {
    period: Duration,
    last: Instant,
    tick: u64,
    running: bool,
}

impl FrameClock {
    pub fn new(tick_ms: u64) -> Self {
        FrameClock {
            period: Duration::from_millis(tick_ms.max(1)),
            last: Instant::now(),
            tick: 0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.last = Instant::now();
        self.tick = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Returns the next tick number when at least one period has elapsed
    /// since the previous tick; otherwise `None`. Advances by exactly one
    /// tick per call no matter how much time passed.
    pub fn poll_tick(&mut self) -> Option<u64> {
        if !self.running {
            return None;
        }
        let elapsed = self.last.elapsed();
        if elapsed < self.period {
            return None;
        }
        let excess_nanos = elapsed.as_nanos() % self.period.as_nanos();
        self.last = Instant::now() - Duration::from_nanos(excess_nanos as u64);
        self.tick += 1;
        Some(self.tick)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn not_running_yields_nothing() {
        let mut clock = FrameClock::new(1);
        sleep(Duration::from_millis(3));
        assert_eq!(clock.poll_tick(), None);
    }

    #[test]
    fn long_stall_advances_a_single_tick() {
        let mut clock = FrameClock::new(1);
        clock.start();
        sleep(Duration::from_millis(10));
        // 10 periods elapsed, but frame-skip yields exactly one tick.
        assert_eq!(clock.poll_tick(), Some(1));
    }

    #[test]
    fn ticks_are_monotonic() {
        let mut clock = FrameClock::new(1);
        clock.start();
        let mut seen = 0;
        for _ in 0..5 {
            sleep(Duration::from_millis(2));
            if let Some(t) = clock.poll_tick() {
                assert!(t > seen);
                seen = t;
            }
        }
        assert!(seen >= 1);
    }

    #[test]
    fn stop_halts_the_stream() {
        let mut clock = FrameClock::new(1);
        clock.start();
        sleep(Duration::from_millis(3));
        assert!(clock.poll_tick().is_some());
        clock.stop();
        sleep(Duration::from_millis(3));
        assert_eq!(clock.poll_tick(), None);
    }
}
