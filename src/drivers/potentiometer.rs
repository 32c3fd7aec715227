//! Debounced analog reader for a potentiometer on an ADC channel.
//!
//! Raw readings are oversampled, then run through a small debounce state
//! machine: a delta above the noise threshold is a confirmed change, and for
//! a short settle window afterwards smaller deltas are still tracked as
//! continued knob movement. The accepted raw value is kept in sync with its
//! linearly mapped form at all times.

use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};
use nb::block;
use ufmt::derive::uDebug;

use crate::config;
use crate::hal::clock::{elapsed, Clock};

/// Which way the mapped value grows as the raw reading grows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, uDebug)]
pub enum Direction {
    Forward,
    Reversed,
}

impl Direction {
    fn map_raw(self, raw: u16, low: i32, high: i32) -> i32 {
        let full_scale = i32::from(config::ADC_FULL_SCALE);
        match self {
            Direction::Forward => map_range(i32::from(raw), 0, full_scale, low, high),
            Direction::Reversed => map_range(i32::from(raw), 0, full_scale, high, low),
        }
    }
}

/// Linear interpolation with integer truncation, after Arduino `map()`.
fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Tuning parameters for a [`Potentiometer`].
///
/// Range bounds are taken as given; an inverted `map_low > map_high` range
/// is mapped literally, not rejected.
#[derive(Copy, Clone, Debug)]
pub struct Config {
    pub direction: Direction,
    /// Samples averaged per reading, at least 1
    pub oversample: u16,
    pub map_low: i32,
    pub map_high: i32,
    /// Raw delta that must be exceeded (strictly) to confirm a change
    pub noise_threshold: u16,
    /// How long after a confirmed change fine movement is still tracked
    pub settle_window_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            oversample: config::DEFAULT_OVERSAMPLE,
            map_low: 0,
            map_high: i32::from(config::ADC_FULL_SCALE),
            noise_threshold: config::DEFAULT_NOISE_THRESHOLD,
            settle_window_ms: config::DEFAULT_SETTLE_WINDOW_MS,
        }
    }
}

/// Debounced reader for one ADC channel.
///
/// The converter itself is borrowed per call so several readers can share
/// it. The channel pin is expected to be configured as an analog input
/// (high impedance, pulled up where the board needs it) by the HAL before
/// the reader is constructed.
pub struct Potentiometer<ADC, CH, C> {
    channel: CH,
    cfg: Config,
    last_raw: u16,
    last_mapped: i32,
    last_change_at: u32,
    clock: C,
    _adc: PhantomData<ADC>,
}

impl<ADC, CH, C> Potentiometer<ADC, CH, C>
where
    CH: Channel<ADC>,
    C: Clock,
{
    /// Creates the reader and takes an initial oversampled reading so the
    /// first [`poll`](Self::poll) has a defined baseline.
    ///
    /// The settle window starts expired: startup jitter of a couple of
    /// counts is not accepted until a real threshold crossing arms it.
    pub fn new<A>(adc: &mut A, channel: CH, clock: C, cfg: Config) -> Result<Self, A::Error>
    where
        A: OneShot<ADC, u16, CH>,
    {
        let mut pot = Self {
            channel,
            cfg: Config {
                oversample: cfg.oversample.max(1),
                ..cfg
            },
            last_raw: 0,
            last_mapped: 0,
            last_change_at: 0,
            clock,
            _adc: PhantomData,
        };
        let raw = pot.sample_raw(adc)?;
        pot.last_raw = raw;
        pot.last_mapped = pot.cfg.direction.map_raw(raw, pot.cfg.map_low, pot.cfg.map_high);
        pot.last_change_at = pot
            .clock
            .millis()
            .wrapping_sub(pot.cfg.settle_window_ms)
            .wrapping_sub(1);
        Ok(pot)
    }

    /// Takes `oversample` readings and returns their truncated mean.
    /// Does not touch the debounce state.
    pub fn sample_raw<A>(&mut self, adc: &mut A) -> Result<u16, A::Error>
    where
        A: OneShot<ADC, u16, CH>,
    {
        let mut sum: u32 = 0;
        for _ in 0..self.cfg.oversample {
            sum += u32::from(block!(adc.read(&mut self.channel))?);
        }
        Ok((sum / u32::from(self.cfg.oversample)) as u16)
    }

    /// Runs the debounce state machine once. Returns whether a new reading
    /// was accepted.
    ///
    /// A delta strictly above the noise threshold is always accepted.
    /// Within the settle window of the last accepted change, a delta
    /// strictly above one count is accepted as continued movement; a
    /// single-count delta never is, so ADC jitter cannot keep re-arming
    /// the window.
    pub fn poll<A>(&mut self, adc: &mut A) -> Result<bool, A::Error>
    where
        A: OneShot<ADC, u16, CH>,
    {
        let raw = self.sample_raw(adc)?;
        let delta = (i32::from(raw) - i32::from(self.last_raw)).unsigned_abs();

        if delta > u32::from(self.cfg.noise_threshold) {
            self.accept(raw);
            return Ok(true);
        }

        let since_change = elapsed(self.clock.millis(), self.last_change_at);
        if since_change <= self.cfg.settle_window_ms && delta > 1 {
            self.accept(raw);
            return Ok(true);
        }

        Ok(false)
    }

    fn accept(&mut self, raw: u16) {
        self.last_raw = raw;
        self.last_mapped = self.cfg.direction.map_raw(raw, self.cfg.map_low, self.cfg.map_high);
        self.last_change_at = self.clock.millis();
    }

    /// Last accepted reading, mapped to the configured range.
    pub fn value(&self) -> i32 {
        self.last_mapped
    }

    /// Last accepted raw reading.
    pub fn raw_value(&self) -> u16 {
        self.last_raw
    }

    /// Releases the channel and the clock.
    pub fn free(self) -> (CH, C) {
        (self.channel, self.clock)
    }
}
