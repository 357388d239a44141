//! TOML speaker setup files.
//!
//! ```toml
//! [panner]
//! block_size = 256
//!
//! [[speaker]]
//! channel = 0
//! azimuth = 30.0
//! elevation = 0.0
//! group = 0
//! ```
//!
//! The `[panner]` table is optional and falls back to [`PannerConfig::default`].
//! Speaker order in the file is the layout order.

use crate::{PannerConfig, Result, Speaker, SpeakerLayout};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parsed contents of a setup file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetupFile {
    #[serde(default)]
    pub panner: PannerConfig,
    #[serde(default, rename = "speaker")]
    pub speakers: Vec<Speaker>,
}

impl SetupFile {
    /// Parse and validate a setup document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let setup: SetupFile = toml::from_str(source)?;
        setup.panner.validate()?;
        setup.layout().validate()?;
        tracing::debug!(
            speakers = setup.speakers.len(),
            block_size = setup.panner.block_size,
            "parsed speaker setup"
        );
        Ok(setup)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!("loading speaker setup from {}", path.display());
        Self::from_toml_str(&source)
    }

    pub fn layout(&self) -> SpeakerLayout {
        SpeakerLayout::from_speakers(self.speakers.clone())
    }
}

impl SpeakerLayout {
    /// Load only the speakers of a setup document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        SetupFile::from_toml_str(source).map(|setup| setup.layout())
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        SetupFile::from_path(path).map(|setup| setup.layout())
    }
}
