#![cfg_attr(not(test), no_std)]

//! Reusable polled-I/O helpers for microcontroller firmware: a debounced
//! potentiometer reader, a rate-limited relay driver and non-blocking
//! interval timers.
//!
//! Every component is driven from the firmware's main loop. Nothing blocks,
//! nothing owns a scheduler; each helper only compares a monotonic
//! millisecond counter (the [`Clock`] seam) against its own timestamps.
//! Hardware is reached through `embedded-hal` traits so the drivers stay
//! chip-agnostic and testable off-target.

pub mod config;
pub mod drivers;
pub mod hal;

pub use drivers::potentiometer::{Direction, Potentiometer};
pub use drivers::relay::{Polarity, Relay};
pub use drivers::IntervalTimer;
pub use hal::clock::Clock;
