//! Default tuning constants for the polled drivers

/// Full-scale raw reading of a 10-bit ADC
pub const ADC_FULL_SCALE: u16 = 1023;

/// Samples averaged per potentiometer reading
pub const DEFAULT_OVERSAMPLE: u16 = 20;

/// Raw-count delta below which a potentiometer reading is treated as noise
pub const DEFAULT_NOISE_THRESHOLD: u16 = 5;

/// Window after an accepted change during which fine movement is still tracked, in milliseconds
pub const DEFAULT_SETTLE_WINDOW_MS: u32 = 200;

/// Minimum time between relay state commits, in milliseconds (0 = unconstrained)
pub const DEFAULT_MIN_DWELL_MS: u32 = 0;
