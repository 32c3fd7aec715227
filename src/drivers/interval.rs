//! Repeating interval timer for the non-blocking polling idiom.
//!
//! Owns its own next-fire timestamp instead of hiding one in static state
//! at every call site; construct one per periodic job and poll it from the
//! main loop.

use crate::hal::clock::{elapsed, Clock};

pub struct IntervalTimer<C> {
    period_ms: u32,
    last_fire: u32,
    clock: C,
}

impl<C: Clock> IntervalTimer<C> {
    /// Timer that fires on its first poll.
    pub fn new(period_ms: u32, clock: C) -> Self {
        let last_fire = clock.millis().wrapping_sub(period_ms);
        Self {
            period_ms,
            last_fire,
            clock,
        }
    }

    /// Timer that first fires one full period after construction.
    pub fn delayed(period_ms: u32, clock: C) -> Self {
        let last_fire = clock.millis();
        Self {
            period_ms,
            last_fire,
            clock,
        }
    }

    /// True at most once per period. Reschedules from the current instant,
    /// so a late poll slips the cadence.
    pub fn poll(&mut self) -> bool {
        if self.due() {
            self.last_fire = self.clock.millis();
            true
        } else {
            false
        }
    }

    /// Like [`poll`](Self::poll), but advances the deadline by exactly one
    /// period, preserving the long-run cadence when polls arrive late.
    /// A timer that has fallen behind fires on consecutive polls until it
    /// has caught up.
    pub fn poll_aligned(&mut self) -> bool {
        if self.due() {
            self.last_fire = self.last_fire.wrapping_add(self.period_ms);
            true
        } else {
            false
        }
    }

    /// Re-arms the timer: the next fire is one full period from now.
    pub fn reset(&mut self) {
        self.last_fire = self.clock.millis();
    }

    /// Takes effect from the next fire.
    pub fn set_period_ms(&mut self, period_ms: u32) {
        self.period_ms = period_ms;
    }

    fn due(&self) -> bool {
        elapsed(self.clock.millis(), self.last_fire) >= self.period_ms
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::hal::clock::TestClock;

    #[test]
    fn fires_immediately_then_once_per_period() {
        let time = Cell::new(0);
        let mut timer = IntervalTimer::new(100, TestClock(&time));

        assert!(timer.poll());
        assert!(!timer.poll());

        time.set(99);
        assert!(!timer.poll());
        time.set(100);
        assert!(timer.poll());
        assert!(!timer.poll());
    }

    #[test]
    fn delayed_timer_waits_one_full_period() {
        let time = Cell::new(0);
        let mut timer = IntervalTimer::delayed(100, TestClock(&time));

        assert!(!timer.poll());
        time.set(99);
        assert!(!timer.poll());
        time.set(100);
        assert!(timer.poll());
    }

    #[test]
    fn late_poll_slips_the_cadence() {
        let time = Cell::new(0);
        let mut timer = IntervalTimer::delayed(100, TestClock(&time));

        // polled 50 ms late; next fire is rescheduled from now
        time.set(150);
        assert!(timer.poll());
        time.set(249);
        assert!(!timer.poll());
        time.set(250);
        assert!(timer.poll());
    }

    #[test]
    fn aligned_poll_keeps_the_cadence() {
        let time = Cell::new(0);
        let mut timer = IntervalTimer::delayed(100, TestClock(&time));

        // polled 50 ms late; the deadline still advances in exact periods
        time.set(150);
        assert!(timer.poll_aligned());
        time.set(200);
        assert!(timer.poll_aligned());
        assert!(!timer.poll_aligned());
    }

    #[test]
    fn reset_rearms_from_now() {
        let time = Cell::new(0);
        let mut timer = IntervalTimer::new(100, TestClock(&time));
        assert!(timer.poll());

        time.set(90);
        timer.reset();
        time.set(100);
        assert!(!timer.poll());
        time.set(190);
        assert!(timer.poll());
    }

    #[test]
    fn period_change_takes_effect_on_next_fire() {
        let time = Cell::new(0);
        let mut timer = IntervalTimer::new(100, TestClock(&time));
        assert!(timer.poll());

        timer.set_period_ms(50);
        time.set(50);
        assert!(timer.poll());
    }

    #[test]
    fn schedule_survives_counter_overflow() {
        let time = Cell::new(u32::MAX - 10);
        let mut timer = IntervalTimer::delayed(100, TestClock(&time));

        time.set(88);
        assert!(!timer.poll());
        time.set(89);
        assert!(timer.poll());
    }
}
