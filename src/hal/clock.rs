/// Monotonic millisecond counter, wrapping at 32 bits.
///
/// On hardware this is typically backed by a timer-overflow tick count; in
/// tests it can be a `Cell<u32>` the test advances by hand. Drivers never
/// assume a particular polling cadence, only that the counter advances.
pub trait Clock {
    fn millis(&self) -> u32;
}

// Lets several drivers share one clock by reference.
impl<T: Clock> Clock for &T {
    fn millis(&self) -> u32 {
        (*self).millis()
    }
}

/// Wrap-safe duration between two counter readings.
///
/// Correct across the 32-bit overflow boundary as long as the real elapsed
/// time is below the counter period (~49.7 days).
#[inline]
pub fn elapsed(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Cell-backed clock the tests advance by hand.
#[cfg(test)]
pub(crate) struct TestClock<'a>(pub &'a core::cell::Cell<u32>);

#[cfg(test)]
impl Clock for TestClock<'_> {
    fn millis(&self) -> u32 {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_counts_forward() {
        assert_eq!(elapsed(150, 100), 50);
        assert_eq!(elapsed(100, 100), 0);
    }

    #[test]
    fn elapsed_survives_counter_overflow() {
        assert_eq!(elapsed(29, u32::MAX - 20), 50);
        assert_eq!(elapsed(0, u32::MAX), 1);
    }
}
