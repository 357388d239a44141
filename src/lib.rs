//! # Strata - Layer-Based Amplitude Panning
//!
//! Pans a mono source over full-sphere loudspeaker arrays built from
//! horizontal rings.
//!
//! ## Architecture
//!
//! Strata is an umbrella crate that coordinates:
//! - **strata-core** - Speaker layouts, poses and directions, output buffers, configuration
//! - **strata-spatial** - Ring panners (VBAP), the layer panner, render monitoring
//!
//! ## Quick Start
//!
//! ```ignore
//! use strata::prelude::*;
//!
//! // Compile rings and allocate scratch buffers for 256-frame blocks
//! let mut panner = PannerBuilder::new()
//!     .layout(SpeakerLayout::dome_7_4())
//!     .block_size(256)
//!     .build()?;
//!
//! // Per audio block
//! let mut io = AudioIo::new(panner.layout().num_channels(), 256);
//! let pose = Direction::new(30.0, 20.0).to_pose(2.0);
//! io.zero_out();
//! panner.render_buffer(&mut io, &pose, &block)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - `layout-files`
//! - `layout-files` - TOML speaker setups ([`core::SetupFile`])

/// Re-export of strata-core for direct access
pub use strata_core as core;

/// Re-export of strata-spatial for direct access
pub use strata_spatial as spatial;

pub use strata_core::{
    AudioIo, Direction, PannerConfig, Pose, Quat, Speaker, SpeakerLayout, Vec3,
};

#[cfg(feature = "layout-files")]
pub use strata_core::SetupFile;

pub use strata_spatial::{
    crossfade_gains, ElevationRing, LayerPanner, MonitorSnapshot, PanMonitor, RingGains,
    RingPanner, RingSelection, VbapRing,
};

mod error;
pub use error::{Error, Result};

mod builder;
pub use builder::PannerBuilder;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::PannerBuilder;

    // Layout and placement
    pub use crate::core::{AudioIo, Direction, Pose, Quat, Speaker, SpeakerLayout, Vec3};

    // Panning
    pub use crate::spatial::{LayerPanner, PanMonitor, RingPanner, RingSelection};
}
