//! Builder for configuring and constructing a ready-to-render `LayerPanner`.

use crate::core::{PannerConfig, SpeakerLayout};
use crate::spatial::{LayerPanner, RingPanner, VbapRing};
use crate::{Error, Result};

#[cfg(feature = "layout-files")]
use crate::core::SetupFile;
#[cfg(feature = "layout-files")]
use std::path::Path;

/// `build()` validates the configuration, compiles the rings and allocates the
/// scratch buffers, so the returned panner can render immediately.
///
/// # Example
///
/// ```ignore
/// use strata::prelude::*;
///
/// let mut panner = PannerBuilder::new()
///     .layout(SpeakerLayout::dome_7_4())
///     .block_size(256)
///     .build()?;
///
/// let monitor = panner.monitor(); // hand to the control thread
/// ```
#[derive(Debug, Clone, Default)]
pub struct PannerBuilder {
    layout: Option<SpeakerLayout>,
    config: PannerConfig,
}

impl PannerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(mut self, layout: SpeakerLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Replaces block size and report interval set earlier.
    pub fn config(mut self, config: PannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Default: 512
    pub fn block_size(mut self, frames: usize) -> Self {
        self.config.block_size = frames;
        self
    }

    /// Default: 1000 blocks
    pub fn report_interval(mut self, blocks: u32) -> Self {
        self.config.report_interval = blocks;
        self
    }

    /// Take the speakers and panner settings from a TOML setup document.
    #[cfg(feature = "layout-files")]
    pub fn setup_str(self, source: &str) -> Result<Self> {
        Ok(self.setup(SetupFile::from_toml_str(source)?))
    }

    /// Take the speakers and panner settings from a TOML setup file.
    #[cfg(feature = "layout-files")]
    pub fn setup_file(self, path: impl AsRef<Path>) -> Result<Self> {
        Ok(self.setup(SetupFile::from_path(path)?))
    }

    #[cfg(feature = "layout-files")]
    fn setup(mut self, setup: SetupFile) -> Self {
        self.layout = Some(setup.layout());
        self.config = setup.panner;
        self
    }

    /// Build a panner using VBAP within each ring.
    pub fn build(self) -> Result<LayerPanner> {
        self.build_with::<VbapRing>()
    }

    /// Build a panner using a custom ring panner.
    pub fn build_with<P: RingPanner>(self) -> Result<LayerPanner<P>> {
        let layout = self.layout.ok_or(Error::MissingLayout)?;
        let panner = LayerPanner::<P>::with_config(layout, &self.config)?;
        tracing::debug!(
            rings = panner.num_rings(),
            block_size = panner.capacity(),
            "layer panner ready"
        );
        Ok(panner)
    }
}
