//! Centralized error type for the strata umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] strata_core::Error),

    #[error("Spatial: {0}")]
    Spatial(#[from] strata_spatial::Error),

    #[error("No speaker layout given; call .layout() or .setup_file()")]
    MissingLayout,
}

pub type Result<T> = std::result::Result<T, Error>;
