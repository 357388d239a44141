//! Core types for layer-based amplitude panning.
//!
//! # Primary API
//!
//! - [`SpeakerLayout`] / [`Speaker`]: loudspeaker positions and ring groups
//! - [`Pose`] / [`Direction`]: source placement relative to the listener
//! - [`AudioIo`]: multichannel output block panners write into
//! - [`PannerConfig`]: block size and diagnostics settings
//!
//! # Feature-gated APIs
//!
//! - `"layout-files"`: [`SetupFile`] for TOML speaker setups (enabled by default)

pub mod error;
pub use error::{Error, Result};

mod audio;
pub use audio::AudioIo;

mod config;
pub use config::{PannerConfig, MAX_BLOCK_SIZE};

mod lockfree;
pub use lockfree::{AtomicCounter, AtomicFloat};

pub mod math;
pub use math::{Direction, Pose, Quat, Vec3};

mod speaker;
pub use speaker::{wrap_degrees, Speaker, SpeakerLayout};

#[cfg(feature = "layout-files")]
mod setup;
#[cfg(feature = "layout-files")]
pub use setup::SetupFile;
