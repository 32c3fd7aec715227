pub mod interval;
pub mod potentiometer;
pub mod relay;

pub use interval::IntervalTimer;
pub use potentiometer::{Direction, Potentiometer};
pub use relay::{Polarity, Relay};
