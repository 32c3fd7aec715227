pub mod clock;

// Re-export commonly used items
pub use clock::{elapsed, Clock};
