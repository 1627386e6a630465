//! Frame clock
//!
//! Turns animation-frame timestamps (milliseconds) into per-frame deltas
//! (seconds). The first frame only primes the clock so there is never a delta
//! measured from an unknown starting point.

/// Clock state across animation frames
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FrameClock {
    /// No frame seen yet
    #[default]
    Priming,
    /// At least one frame seen
    Running { start: f64, previous: f64 },
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp. Returns the elapsed seconds since the previous
    /// frame, or `None` for the priming frame.
    ///
    /// A timestamp earlier than the previous one yields a zero delta and does
    /// not move the clock backwards.
    pub fn tick(&mut self, timestamp: f64) -> Option<f64> {
        match *self {
            FrameClock::Priming => {
                *self = FrameClock::Running {
                    start: timestamp,
                    previous: timestamp,
                };
                None
            }
            FrameClock::Running { start, previous } => {
                let now = timestamp.max(previous);
                *self = FrameClock::Running {
                    start,
                    previous: now,
                };
                Some((now - previous) / 1000.0)
            }
        }
    }

    pub fn is_priming(&self) -> bool {
        matches!(self, FrameClock::Priming)
    }

    /// Seconds between the priming frame and the latest frame
    pub fn elapsed(&self) -> f64 {
        match *self {
            FrameClock::Priming => 0.0,
            FrameClock::Running { start, previous } => (previous - start) / 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_primes() {
        let mut clock = FrameClock::new();
        assert!(clock.is_priming());
        assert_eq!(clock.tick(1234.0), None);
        assert_eq!(
            clock,
            FrameClock::Running {
                start: 1234.0,
                previous: 1234.0
            }
        );
    }

    #[test]
    fn test_delta_in_seconds() {
        let mut clock = FrameClock::new();
        clock.tick(1000.0);
        assert_eq!(clock.tick(1016.0), Some(0.016));
        assert_eq!(clock.tick(1050.0), Some(0.034));
        assert_eq!(clock.elapsed(), 0.05);
    }

    #[test]
    fn test_zero_timestamp_still_primes_once() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(0.0), None);
        assert_eq!(clock.tick(0.0), Some(0.0));
        assert_eq!(clock.tick(20.0), Some(0.02));
    }

    #[test]
    fn test_backwards_timestamp_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        assert_eq!(clock.tick(400.0), Some(0.0));
        assert_eq!(clock.tick(600.0), Some(0.1));
    }
}
