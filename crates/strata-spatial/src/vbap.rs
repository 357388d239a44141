//! Pairwise 2D VBAP over the speakers of one ring.
//!
//! Pair selection and gain solving come from the `vbap` crate in
//! [`Dimension::Force2D`] mode: adjacent speakers in azimuth order (including
//! the pair that wraps around 360 degrees) form the bases. Elevation is
//! ignored here, since the layer panner has already decided how much of the
//! signal this ring receives.
//!
//! Arcs no pair can span (a stereo ring's rear, for instance) leave the solved
//! gains partly clamped; they are renormalized to unit power, and a direction
//! with no positive gain at all snaps to the nearest speaker.

use crate::ring::RingPanner;
use crate::{Error, Result};
use core::fmt;
use strata_core::{wrap_degrees, AudioIo, Direction, Pose, Speaker};
use vbap::{Dimension, VBAPanner};

/// Speakers closer than this (degrees) share a direction.
const DUPLICATE_TOLERANCE: f32 = 0.01;

/// Below this total power the solved gains are treated as silent.
const SILENT_POWER: f64 = 1e-12;

/// Active speakers and their gains for one direction.
///
/// At most two speakers are active. When a single speaker carries the signal
/// the second slot has gain 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RingGains {
    channels: [usize; 2],
    gains: [f32; 2],
}

impl RingGains {
    fn single(channel: usize) -> Self {
        Self {
            channels: [channel, channel],
            gains: [1.0, 0.0],
        }
    }

    /// `(device_channel, gain)` for each speaker with a non-zero gain.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.channels
            .iter()
            .copied()
            .zip(self.gains.iter().copied())
            .filter(|&(_, g)| g > 0.0)
    }

    /// Gain on `channel`, 0 if the speaker is inactive.
    pub fn gain(&self, channel: usize) -> f32 {
        self.iter()
            .filter(|&(c, _)| c == channel)
            .map(|(_, g)| g)
            .sum()
    }

    pub fn power(&self) -> f32 {
        self.iter().map(|(_, g)| g * g).sum()
    }
}

/// Ring panner using pairwise vector-base amplitude panning.
#[derive(Debug, Clone)]
pub struct VbapRing {
    /// Layout order; index `i` is speaker `i` of the VBAP panner
    speakers: Vec<Speaker>,
    /// `None` for a one-speaker ring, which needs no solving
    panner: Option<VBAPanner>,
    /// Per-speaker gains for the render path, sized at compile time
    scratch: Vec<f64>,
    last: RingGains,
}

#[inline]
fn angular_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

impl VbapRing {
    pub fn new(speakers: &[Speaker]) -> Result<Self> {
        let Some(first) = speakers.first() else {
            return Err(Error::Configuration(
                "VBAP ring needs at least one speaker".into(),
            ));
        };

        for (i, a) in speakers.iter().enumerate() {
            if let Some(b) = speakers[i + 1..]
                .iter()
                .find(|b| angular_distance(a.azimuth, b.azimuth) < DUPLICATE_TOLERANCE)
            {
                return Err(Error::DegenerateGeometry(format!(
                    "speakers on channels {} and {} share azimuth {}",
                    a.device_channel, b.device_channel, a.azimuth
                )));
            }
        }

        let panner = if speakers.len() > 1 {
            let builder = speakers.iter().fold(
                VBAPanner::builder().dimension(Dimension::Force2D),
                |builder, s| builder.add_speaker(f64::from(wrap_degrees(s.azimuth)), 0.0),
            );
            Some(builder.build()?)
        } else {
            None
        };

        Ok(Self {
            speakers: speakers.to_vec(),
            panner,
            scratch: vec![0.0; speakers.len()],
            last: RingGains::single(first.device_channel),
        })
    }

    /// Speakers in layout order.
    pub fn speakers(&self) -> &[Speaker] {
        &self.speakers
    }

    pub fn num_pairs(&self) -> usize {
        self.panner
            .as_ref()
            .map_or(0, |panner| panner.config().tuples().len())
    }

    /// Gains used by the most recent render.
    pub fn last_gains(&self) -> RingGains {
        self.last
    }

    /// Solve the speaker gains for a source azimuth in degrees.
    ///
    /// Allocates a gain buffer; the render path reuses one sized at compile
    /// time instead.
    pub fn gains_for(&self, azimuth: f32) -> RingGains {
        let mut gains = vec![0.0; self.speakers.len()];
        self.solve(azimuth, &mut gains)
    }

    fn solve(&self, azimuth: f32, gains: &mut [f64]) -> RingGains {
        let Some(panner) = &self.panner else {
            return RingGains::single(self.speakers[0].device_channel);
        };
        if !azimuth.is_finite() {
            return RingGains::single(self.speakers[0].device_channel);
        }

        panner.compute_gains_into(f64::from(azimuth), 0.0, gains);
        let power: f64 = gains.iter().map(|g| g * g).sum();
        if power < SILENT_POWER {
            return RingGains::single(self.nearest(azimuth));
        }

        let norm = power.sqrt().recip();
        let mut out = RingGains::default();
        let active = self
            .speakers
            .iter()
            .zip(gains.iter())
            .filter(|&(_, &g)| g > 0.0)
            .take(2);
        for (slot, (speaker, &g)) in active.enumerate() {
            out.channels[slot] = speaker.device_channel;
            out.gains[slot] = (g * norm) as f32;
        }
        out
    }

    fn nearest(&self, azimuth: f32) -> usize {
        self.speakers
            .iter()
            .min_by(|a, b| {
                angular_distance(a.azimuth, azimuth).total_cmp(&angular_distance(b.azimuth, azimuth))
            })
            .map_or(self.speakers[0].device_channel, |s| s.device_channel)
    }
}

impl RingPanner for VbapRing {
    fn compile(speakers: &[Speaker]) -> Result<Self> {
        Self::new(speakers)
    }

    fn num_speakers(&self) -> usize {
        self.speakers.len()
    }

    fn accumulate_gains(&self, direction: Direction, scale: f32, out: &mut [f32]) {
        for (channel, gain) in self.gains_for(direction.azimuth).iter() {
            if let Some(slot) = out.get_mut(channel) {
                *slot += scale * gain;
            }
        }
    }

    fn render_buffer(&mut self, io: &mut AudioIo, pose: &Pose, samples: &[f32]) {
        let direction = Direction::from_pose(pose);
        let mut scratch = std::mem::take(&mut self.scratch);
        self.last = self.solve(direction.azimuth, &mut scratch);
        self.scratch = scratch;
        for (channel, gain) in self.last.iter() {
            io.accumulate(channel, samples, gain);
        }
    }

    fn print(&self, w: &mut dyn fmt::Write) -> fmt::Result {
        writeln!(
            w,
            "VBAP ring: {} speakers, {} pairs",
            self.speakers.len(),
            self.num_pairs()
        )?;
        for speaker in &self.speakers {
            writeln!(
                w,
                "  speaker ch {:>3}  az {:>7.2}  el {:>6.2}",
                speaker.device_channel, speaker.azimuth, speaker.elevation
            )?;
        }
        if let Some(panner) = &self.panner {
            for tuple in panner.config().tuples() {
                let channels: Vec<String> = tuple
                    .speaker_indices
                    .iter()
                    .map(|&i| format!("ch {}", self.speakers[i].device_channel))
                    .collect();
                writeln!(w, "  pair {}", channels.join(" - "))?;
            }
        }
        Ok(())
    }
}
