//! Elapsed-time timers.
//!
//! Nothing in the core ever sleeps or suspends. Every wait is one of these
//! two types, advanced by the elapsed milliseconds of the current tick and
//! checked once per tick.

/// Repeating timer that fires once each time its period has accumulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timer {
    period_ms: u32,
    accumulated_ms: u32,
}

impl Timer {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            accumulated_ms: 0,
        }
    }

    /// Timer that fires on the very first tick.
    pub const fn primed(period_ms: u32) -> Self {
        Self {
            period_ms,
            accumulated_ms: period_ms,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Advances the timer. Returns true (and restarts from zero) when the period is reached.
    ///
    /// A single call fires at most once, however large `elapsed_ms` is.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        if self.accumulated_ms >= self.period_ms {
            self.accumulated_ms = 0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }
}

/// One-shot countdown toward zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Countdown {
    remaining_ms: u32,
}

impl Countdown {
    pub const fn new(remaining_ms: u32) -> Self {
        Self { remaining_ms }
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.remaining_ms > 0
    }

    pub fn start(&mut self, duration_ms: u32) {
        self.remaining_ms = duration_ms;
    }

    /// Advances the countdown. Returns true on the tick it reaches zero.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.remaining_ms == 0 {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_fires_once_per_period_and_restarts() {
        let mut timer = Timer::new(100);
        assert!(!timer.tick(60));
        assert!(timer.tick(60));
        assert!(!timer.tick(60));
        assert!(timer.tick(1000));
        assert!(!timer.tick(0));
    }

    #[test]
    fn primed_timer_fires_immediately() {
        let mut timer = Timer::primed(900);
        assert!(timer.tick(0));
        assert!(!timer.tick(16));
    }

    #[test]
    fn countdown_reports_completion_once() {
        let mut countdown = Countdown::new(50);
        assert!(!countdown.tick(20));
        assert!(countdown.tick(40));
        assert!(!countdown.is_running());
        assert!(!countdown.tick(40));
    }
}
