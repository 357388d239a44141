//! Tolerance constants for panning tests.
//!
//! Different checks require different precision levels.

/// Floating point rounding errors (unity gain, passthrough).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// Gains that went through trigonometry or a 2x2 inverse.
pub const GAIN_EPSILON: f32 = 1e-4;

/// Largest jump in total output power allowed between two neighbouring
/// elevations of a sweep.
pub const CONTINUITY_EPSILON: f32 = 0.05;

/// Silence threshold (~-80dB).
/// Values below this are considered silent.
pub const SILENCE_THRESHOLD: f32 = 0.0001;
