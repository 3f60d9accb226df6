//! Blocking delay backed by the OS scheduler

use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// Delay that puts the calling thread to sleep
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_delay_sleeps_at_least_requested() {
        let start = Instant::now();
        StdDelay.delay_us(2_000);
        assert!(start.elapsed() >= Duration::from_micros(2_000));
    }
}
