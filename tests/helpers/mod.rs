//! Test helpers and fixtures for Strata integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (unity gain, passthrough)
//! - `GAIN_EPSILON` (1e-4): Solved panning gains
//! - `CONTINUITY_EPSILON` (0.05): Power change between sweep steps
//! - `SILENCE_THRESHOLD` (0.0001): Silence detection (-80dB)

pub mod tolerances;

use strata::prelude::*;

/// Standard block size for deterministic testing
pub const TEST_BLOCK_SIZE: usize = 256;

/// Three rings of four speakers at +60, 0 and -60 degrees.
///
/// Channels 0-3 are the top ring, 4-7 the ear-level ring and 8-11 the
/// bottom ring.
pub fn three_ring_layout() -> SpeakerLayout {
    let mut layout = SpeakerLayout::ring(2, 60.0, 4, 0, 45.0);
    layout.extend(&SpeakerLayout::ring(1, 0.0, 4, 4, 45.0));
    layout.extend(&SpeakerLayout::ring(0, -60.0, 4, 8, 45.0));
    layout
}

/// Compiled and prepared panner over `layout`.
pub fn test_panner(layout: SpeakerLayout) -> LayerPanner {
    PannerBuilder::new()
        .layout(layout)
        .block_size(TEST_BLOCK_SIZE)
        .build()
        .expect("Failed to build test panner")
}

/// Output buffer sized for `panner`'s layout.
pub fn test_io(panner: &LayerPanner) -> AudioIo {
    AudioIo::new(panner.layout().num_channels(), TEST_BLOCK_SIZE)
}

/// Generate a DC signal (constant value).
pub fn generate_dc(value: f32, num_samples: usize) -> Vec<f32> {
    vec![value; num_samples]
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// First-frame value of every channel.
pub fn first_frame(io: &AudioIo) -> Vec<f32> {
    (0..io.channels())
        .map(|ch| io.channel(ch).map_or(0.0, |samples| samples[0]))
        .collect()
}

/// Sum of squared first-frame values across all channels.
pub fn frame_power(io: &AudioIo) -> f32 {
    first_frame(io).iter().map(|s| s * s).sum()
}

/// Assert that a channel is approximately silent.
pub fn assert_channel_silent(io: &AudioIo, channel: usize, context: &str) {
    let max = io.channel(channel).map_or(0.0, peak);
    assert!(
        max <= tolerances::SILENCE_THRESHOLD,
        "{}: expected channel {} silent, peak was {}",
        context,
        channel,
        max
    );
}
