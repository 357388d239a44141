//! RT-safe layer-based amplitude panning (LBAP).
//!
//! A [`LayerPanner`] groups a speaker layout into elevation rings, pans within
//! each ring with a [`RingPanner`] (pairwise VBAP by default), and crossfades
//! between the two rings that bracket the source elevation with an
//! equal-power law. Render statistics are published lock-free through
//! [`PanMonitor`].

mod error;
pub use error::{Error, Result};

mod lbap;
pub use lbap::{blend_fraction, crossfade_gains, LayerPanner, RingSelection};

mod monitor;
pub use monitor::{MonitorSnapshot, PanMonitor};

mod ring;
pub use ring::{ElevationRing, RingPanner};

mod vbap;
pub use vbap::{RingGains, VbapRing};
