//! Rate-limited driver for a relay (or any boolean output line).
//!
//! State changes are committed immediately when allowed, otherwise parked as
//! a pending state and committed by [`poll`](Relay::poll) once the minimum
//! dwell time since the last commit has elapsed. Rapid request flapping thus
//! never chatters the physical contacts.

use embedded_hal::digital::v2::OutputPin;
use ufmt::derive::uDebug;

use crate::hal::clock::{elapsed, Clock};

/// Which physical line level energizes the output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, uDebug)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Physical line level that represents the given logical state.
    pub fn line_level(self, on: bool) -> bool {
        match self {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        }
    }
}

/// Two-state output with deferred-transition semantics.
///
/// All state is kept in logical terms (`true` = energized); [`Polarity`]
/// translates to the physical line level only at the moment the pin is
/// driven. Whenever no request is outstanding, `state() == next_state()`
/// and the line reflects `state()`.
pub struct Relay<P, C> {
    pin: P,
    polarity: Polarity,
    min_dwell_ms: u32,
    state: bool,
    next_state: bool,
    last_commit_at: u32,
    clock: C,
}

impl<P, C> Relay<P, C>
where
    P: OutputPin,
    C: Clock,
{
    /// Creates the driver and drives the line to its de-energized level.
    ///
    /// The dwell timer starts expired, so the first transition after
    /// construction is never dwell-constrained.
    pub fn new(pin: P, polarity: Polarity, min_dwell_ms: u32, clock: C) -> Result<Self, P::Error> {
        let mut relay = Self {
            pin,
            polarity,
            min_dwell_ms,
            state: false,
            next_state: false,
            last_commit_at: 0,
            clock,
        };
        relay.drive()?;
        relay.reset_timer();
        Ok(relay)
    }

    /// Requests a state change. Returns false without touching the line if
    /// the output is already in that state; otherwise the change commits
    /// now or, if the dwell constraint is unmet, is parked for
    /// [`poll`](Self::poll).
    pub fn set(&mut self, on: bool) -> Result<bool, P::Error> {
        if on == self.state {
            return Ok(false);
        }
        self.transition(on, false)?;
        Ok(true)
    }

    /// Like [`set`](Self::set) but bypasses the dwell constraint.
    /// For safety overrides that must take effect immediately.
    pub fn set_now(&mut self, on: bool) -> Result<bool, P::Error> {
        if on == self.state {
            return Ok(false);
        }
        self.transition(on, true)?;
        Ok(true)
    }

    pub fn on(&mut self) -> Result<bool, P::Error> {
        self.set(true)
    }

    pub fn off(&mut self) -> Result<bool, P::Error> {
        self.set(false)
    }

    pub fn toggle(&mut self) -> Result<bool, P::Error> {
        self.set(!self.state)
    }

    /// Commits a parked state change once the dwell constraint allows it.
    /// Returns whether a deferred commit happened. Call this from the main
    /// loop; a deferred request takes effect through here without any
    /// further caller action.
    pub fn poll(&mut self) -> Result<bool, P::Error> {
        if self.ready() && self.state != self.next_state {
            self.state = self.next_state;
            self.drive()?;
            self.last_commit_at = self.clock.millis();
            return Ok(true);
        }
        Ok(false)
    }

    /// Whether the dwell constraint currently permits a commit.
    pub fn ready(&self) -> bool {
        self.min_dwell_ms == 0
            || elapsed(self.clock.millis(), self.last_commit_at) >= self.min_dwell_ms
    }

    /// Logical state the line is currently driven to.
    pub fn state(&self) -> bool {
        self.state
    }

    /// Logical state the output will settle to once the dwell constraint
    /// allows; equals [`state`](Self::state) when nothing is pending.
    pub fn next_state(&self) -> bool {
        self.next_state
    }

    /// Applies to subsequent transitions; an already-committed state is
    /// unaffected.
    pub fn set_min_dwell_ms(&mut self, t: u32) {
        self.min_dwell_ms = t;
    }

    /// Backdates the last commit by exactly the dwell time, so the next
    /// [`ready`](Self::ready) check passes.
    pub fn reset_timer(&mut self) {
        self.last_commit_at = self.clock.millis().wrapping_sub(self.min_dwell_ms);
    }

    /// Releases the pin and the clock. The line keeps its last driven level.
    pub fn free(self) -> (P, C) {
        (self.pin, self.clock)
    }

    fn transition(&mut self, on: bool, force: bool) -> Result<(), P::Error> {
        if force || self.ready() {
            self.state = on;
            self.next_state = on;
            self.drive()?;
            self.last_commit_at = self.clock.millis();
        } else {
            self.next_state = on;
        }
        Ok(())
    }

    fn drive(&mut self) -> Result<(), P::Error> {
        if self.polarity.line_level(self.state) {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        }
    }
}
