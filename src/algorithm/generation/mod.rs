//! Synthetic ED visit generation
//!
//! A seeded, single-pass simulation: arrival time drives crowding, crowding
//! drives waiting, and waiting plus acuity drive the disposition.

pub mod generator;
pub mod model;
pub mod sampling;

// Re-export commonly used items
pub use generator::{VisitGenerator, generate, generate_to_file};
pub use model::{FLU_WAVE_WINDOW, FluWaveWindow, decide_disposition};
pub use sampling::Categorical;
