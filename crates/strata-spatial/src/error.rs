//! Error types for strata-spatial

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Setup problem detected at compile or prepare time.
    #[error("Invalid panner configuration: {0}")]
    Configuration(String),

    /// Render block larger than the prepared scratch size (0 = never prepared).
    #[error("Block of {requested} frames exceeds prepared capacity of {capacity}")]
    Capacity { requested: usize, capacity: usize },

    #[error("Panner has no rings; call compile() before rendering")]
    NotCompiled,

    /// A ring's speakers cannot form a panning base.
    #[error("Degenerate ring geometry: {0}")]
    DegenerateGeometry(String),

    /// The VBAP solver could not form a panning base for a ring.
    #[error("VBAP setup failed: {0}")]
    Vbap(#[from] vbap::VBAPError),

    #[error(transparent)]
    Core(#[from] strata_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
