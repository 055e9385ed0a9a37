use std::time::Duration;

/// Repeating wall-clock timer driven by elapsed time supplied by the host loop.
///
/// The same sequence of `advance` calls always fires at the same points.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: Duration,
    elapsed: Duration,
    fired: u64,
    cancelled: bool,
}

impl IntervalTimer {
    /// `interval` must be non-zero; `SceneConfig::validate` rejects zero.
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero(), "interval timer needs a non-zero interval");
        Self {
            interval,
            elapsed: Duration::ZERO,
            fired: 0,
            cancelled: false,
        }
    }

    /// Total number of firings since creation.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Time left until the next firing.
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.elapsed)
    }

    /// Add `dt` to the clock and return how many intervals completed.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.cancelled {
            return 0;
        }
        self.elapsed += dt;
        let mut count = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            count += 1;
        }
        self.fired += u64::from(count);
        count
    }

    /// Stop the timer for good.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(3000);

    #[test]
    fn fires_once_per_interval() {
        let mut t = IntervalTimer::new(INTERVAL);
        assert_eq!(t.advance(Duration::from_millis(2999)), 0);
        assert_eq!(t.advance(Duration::from_millis(1)), 1);
        assert_eq!(t.remaining(), INTERVAL);
        assert_eq!(t.fired(), 1);
    }

    #[test]
    fn long_stall_fires_repeatedly() {
        let mut t = IntervalTimer::new(INTERVAL);
        assert_eq!(t.advance(Duration::from_millis(9500)), 3);
        assert_eq!(t.remaining(), Duration::from_millis(2500));
    }

    #[test]
    fn frame_sized_steps_accumulate() {
        let mut t = IntervalTimer::new(INTERVAL);
        let frame = Duration::from_micros(16_667);
        let fired: u32 = (0..180).map(|_| t.advance(frame)).sum();
        assert_eq!(fired, 1);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut t = IntervalTimer::new(INTERVAL);
        t.advance(Duration::from_millis(2000));
        t.cancel();
        assert_eq!(t.advance(Duration::from_secs(60)), 0);
        assert_eq!(t.fired(), 0);
        assert!(t.is_cancelled());
    }
}
