//! Panner configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Largest block size a panner can be prepared for (covers all common audio interfaces).
pub const MAX_BLOCK_SIZE: usize = 8192;

/// Configuration for a layer panner.
///
/// `block_size` is the frame count the audio device delivers per callback and
/// sizes the render scratch buffers. `report_interval` is the minimum number of
/// rendered blocks between two diagnostic warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PannerConfig {
    pub block_size: usize,
    pub max_block_size: usize,
    pub report_interval: u32,
}

impl Default for PannerConfig {
    fn default() -> Self {
        Self {
            block_size: 512,
            max_block_size: MAX_BLOCK_SIZE,
            report_interval: 1000,
        }
    }
}

impl PannerConfig {
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_block_size > MAX_BLOCK_SIZE {
            return Err(Error::InvalidConfig(format!(
                "max_block_size {} exceeds {}",
                self.max_block_size, MAX_BLOCK_SIZE
            )));
        }
        if self.block_size == 0 || self.block_size > self.max_block_size {
            return Err(Error::InvalidConfig(format!(
                "block_size {} out of range (1-{})",
                self.block_size, self.max_block_size
            )));
        }
        if self.report_interval == 0 {
            return Err(Error::InvalidConfig(
                "report_interval must be at least 1 block".into(),
            ));
        }
        Ok(())
    }
}
