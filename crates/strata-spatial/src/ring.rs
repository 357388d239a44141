//! Elevation rings and the per-ring panner seam.

use crate::{Error, Result};
use core::fmt;
use strata_core::{AudioIo, Direction, Pose, Speaker, SpeakerLayout};

/// Panner restricted to the speakers of one elevation ring.
///
/// The layer panner decides how much of a block each ring receives; the ring
/// panner decides how that share is spread over the ring's speakers.
/// Implementations must not allocate in [`render_buffer`](RingPanner::render_buffer).
pub trait RingPanner: Send {
    /// Build a panner over `speakers` and solve whatever it needs up front.
    ///
    /// Fails on speaker sets that cannot form a panning base.
    fn compile(speakers: &[Speaker]) -> Result<Self>
    where
        Self: Sized;

    fn num_speakers(&self) -> usize;

    /// Add `scale * gain` for every speaker into `out[device_channel]`.
    ///
    /// Channels beyond `out.len()` are skipped.
    fn accumulate_gains(&self, direction: Direction, scale: f32, out: &mut [f32]);

    /// Pan `samples` toward the pose's direction, adding into `io`.
    fn render_buffer(&mut self, io: &mut AudioIo, pose: &Pose, samples: &[f32]);

    /// Diagnostic dump.
    fn print(&self, w: &mut dyn fmt::Write) -> fmt::Result;
}

/// One horizontal layer of speakers and the panner that serves it.
pub struct ElevationRing<P> {
    group: i32,
    elevation: f32,
    panner: P,
}

impl<P: RingPanner> ElevationRing<P> {
    /// Build a ring over every speaker in `layout`.
    ///
    /// The ring elevation is the mean of its speakers' elevations.
    pub fn new(group: i32, layout: &SpeakerLayout) -> Result<Self> {
        if layout.is_empty() {
            return Err(Error::Configuration(format!(
                "ring for group {} has no speakers",
                group
            )));
        }

        let sum: f64 = layout.iter().map(|s| f64::from(s.elevation)).sum();
        let elevation = (sum / layout.num_speakers() as f64) as f32;
        let panner = P::compile(layout.speakers())?;

        Ok(Self {
            group,
            elevation,
            panner,
        })
    }

    pub fn group(&self) -> i32 {
        self.group
    }

    /// Mean speaker elevation in degrees.
    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    pub fn panner(&self) -> &P {
        &self.panner
    }

    pub fn panner_mut(&mut self) -> &mut P {
        &mut self.panner
    }
}

impl<P> fmt::Debug for ElevationRing<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElevationRing")
            .field("group", &self.group)
            .field("elevation", &self.elevation)
            .finish_non_exhaustive()
    }
}
