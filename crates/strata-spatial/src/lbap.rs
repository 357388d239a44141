//! Layer-based amplitude panning.
//!
//! Speakers are grouped into elevation rings by their `group` id, and each ring
//! gets its own [`RingPanner`]. For every block the source elevation is located
//! between the two rings that bracket it, and the block is split between them
//! with an equal-power crossfade:
//!
//! ```text
//! fraction   = (elevation - lower) / (upper - lower)     clamped to [0, 1]
//! gain_upper = sin(pi/2 * fraction)
//! gain_lower = cos(pi/2 * fraction)
//! ```
//!
//! A source at or above the top ring, or below the bottom ring, is rendered
//! through that ring alone.
//!
//! ## Lifecycle
//!
//! ```rust,ignore
//! let mut panner = LayerPanner::new(SpeakerLayout::dome_7_4());
//! panner.compile()?;          // control thread
//! panner.prepare(512)?;       // control thread, whenever the block size changes
//!
//! // audio thread, once per block
//! io.zero_out();
//! panner.render_buffer(&mut io, &pose, &block)?;
//! ```

use crate::monitor::PanMonitor;
use crate::ring::{ElevationRing, RingPanner};
use crate::vbap::VbapRing;
use crate::{Error, Result};
use core::f32::consts::FRAC_PI_2;
use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;
use strata_core::{AudioIo, Direction, PannerConfig, Pose, SpeakerLayout, MAX_BLOCK_SIZE};

/// How a block is distributed over the rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingSelection {
    /// The whole block goes through one ring at unity gain.
    Single { ring: usize },
    /// The block is split between two adjacent rings.
    Blend {
        upper: usize,
        lower: usize,
        gain_upper: f32,
        gain_lower: f32,
    },
}

impl RingSelection {
    /// Gain applied to `ring` (0 when the ring is not used).
    pub fn ring_gain(&self, ring: usize) -> f32 {
        match *self {
            RingSelection::Single { ring: r } if r == ring => 1.0,
            RingSelection::Blend {
                upper, gain_upper, ..
            } if upper == ring => gain_upper,
            RingSelection::Blend {
                lower, gain_lower, ..
            } if lower == ring => gain_lower,
            _ => 0.0,
        }
    }
}

/// Equal-power crossfade gains `(upper, lower)` for a fraction in [0, 1].
///
/// Fractions outside the range are clamped; NaN is treated as 0.
#[inline]
pub fn crossfade_gains(fraction: f32) -> (f32, f32) {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let (sin, cos) = (FRAC_PI_2 * fraction).sin_cos();
    (sin, cos)
}

/// Position of `elevation` between two ring elevations, clamped to [0, 1].
///
/// `None` when the span is zero, inverted, or not finite.
#[inline]
pub fn blend_fraction(elevation: f32, upper: f32, lower: f32) -> Option<f32> {
    let span = upper - lower;
    if !(span.is_finite() && span > 0.0) {
        return None;
    }
    let fraction = (elevation - lower) / span;
    if fraction.is_nan() {
        return None;
    }
    Some(fraction.clamp(0.0, 1.0))
}

/// Layer-based amplitude panner for one source.
///
/// Owns its scratch buffers, so each concurrently panned source needs its own
/// instance. `compile` and `prepare` run on a control thread;
/// `render_buffer` runs on the audio thread and never allocates.
pub struct LayerPanner<P: RingPanner = VbapRing> {
    layout: SpeakerLayout,
    /// Sorted by elevation, highest first
    rings: Vec<ElevationRing<P>>,
    upper_buffer: Vec<f32>,
    lower_buffer: Vec<f32>,
    capacity: usize,
    monitor: Arc<PanMonitor>,
}

impl LayerPanner<VbapRing> {
    /// Panner over `layout` using VBAP within each ring.
    ///
    /// No rings exist until [`compile`](LayerPanner::compile) is called.
    pub fn new(layout: SpeakerLayout) -> Self {
        Self::from_layout(layout)
    }
}

impl<P: RingPanner> LayerPanner<P> {
    /// Panner over `layout` using a custom ring panner.
    pub fn from_layout(layout: SpeakerLayout) -> Self {
        Self {
            layout,
            rings: Vec::new(),
            upper_buffer: Vec::new(),
            lower_buffer: Vec::new(),
            capacity: 0,
            monitor: Arc::new(PanMonitor::default()),
        }
    }

    /// Build, compile and prepare a panner from a configuration.
    pub fn with_config(layout: SpeakerLayout, config: &PannerConfig) -> Result<Self> {
        config.validate()?;
        let mut panner = Self::from_layout(layout);
        panner.monitor = Arc::new(PanMonitor::new(config.report_interval));
        panner.compile()?;
        panner.prepare(config.block_size)?;
        Ok(panner)
    }

    pub fn layout(&self) -> &SpeakerLayout {
        &self.layout
    }

    /// Replace the layout. Existing rings stay until the next `compile`.
    pub fn set_layout(&mut self, layout: SpeakerLayout) {
        self.layout = layout;
    }

    /// Rings in descending elevation order.
    pub fn rings(&self) -> &[ElevationRing<P>] {
        &self.rings
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn is_compiled(&self) -> bool {
        !self.rings.is_empty()
    }

    /// Frames per block the scratch buffers can hold (0 before `prepare`).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Shared handle to this panner's render statistics.
    pub fn monitor(&self) -> Arc<PanMonitor> {
        Arc::clone(&self.monitor)
    }

    /// Split the layout into elevation rings, sorted highest first.
    ///
    /// Replaces any previously compiled rings. On error the previous rings are
    /// kept.
    pub fn compile(&mut self) -> Result<()> {
        if self.layout.is_empty() {
            return Err(Error::Configuration(
                "speaker layout contains no speakers".into(),
            ));
        }
        self.layout.validate()?;

        let mut groups: BTreeMap<i32, SpeakerLayout> = BTreeMap::new();
        for speaker in &self.layout {
            groups
                .entry(speaker.group)
                .or_default()
                .add_speaker(*speaker);
        }

        let mut rings: Vec<ElevationRing<P>> = Vec::with_capacity(groups.len());
        for (group, speakers) in &groups {
            if speakers.is_empty() {
                return Err(Error::Configuration(format!(
                    "group {} maps to no speakers",
                    group
                )));
            }
            rings.push(ElevationRing::new(*group, speakers)?);
        }

        // Stable: rings with equal elevation keep ascending group order
        rings.sort_by(|a, b| b.elevation().total_cmp(&a.elevation()));
        if rings.windows(2).any(|w| w[0].elevation() < w[1].elevation()) {
            return Err(Error::Configuration(
                "rings are not in descending elevation order".into(),
            ));
        }

        tracing::info!(
            rings = rings.len(),
            speakers = self.layout.num_speakers(),
            "compiled layer panner"
        );
        for ring in &rings {
            tracing::debug!(
                group = ring.group(),
                elevation = ring.elevation(),
                speakers = ring.panner().num_speakers(),
                "ring"
            );
        }

        self.rings = rings;
        Ok(())
    }

    /// Allocate scratch buffers for blocks of up to `frames` frames.
    ///
    /// `frames` must lie in `1..=MAX_BLOCK_SIZE`.
    ///
    /// Call before the first render and again whenever the device block size
    /// changes. Never call from the audio thread.
    pub fn prepare(&mut self, frames: usize) -> Result<()> {
        if frames == 0 {
            return Err(Error::Configuration(
                "cannot prepare for a block of 0 frames".into(),
            ));
        }
        if frames > MAX_BLOCK_SIZE {
            return Err(Error::Configuration(format!(
                "block of {} frames exceeds the maximum of {}",
                frames, MAX_BLOCK_SIZE
            )));
        }
        self.upper_buffer = vec![0.0; frames];
        self.lower_buffer = vec![0.0; frames];
        self.capacity = frames;
        tracing::debug!(frames, "prepared layer panner scratch buffers");
        Ok(())
    }

    /// Find the rings bracketing `elevation` and their crossfade gains.
    ///
    /// Returns `None` only when the panner has no rings.
    pub fn select_rings(&self, elevation: f32) -> Option<RingSelection> {
        let last = self.rings.len().checked_sub(1)?;

        // First ring at or below the source
        let found = self
            .rings
            .iter()
            .position(|ring| ring.elevation() <= elevation);

        let selection = match found {
            Some(0) => RingSelection::Single { ring: 0 },
            None => RingSelection::Single { ring: last },
            Some(lower) => {
                let upper = lower - 1;
                match blend_fraction(
                    elevation,
                    self.rings[upper].elevation(),
                    self.rings[lower].elevation(),
                ) {
                    Some(fraction) if fraction <= 0.0 => RingSelection::Single { ring: lower },
                    Some(fraction) if fraction >= 1.0 => RingSelection::Single { ring: upper },
                    Some(fraction) => {
                        let (gain_upper, gain_lower) = crossfade_gains(fraction);
                        RingSelection::Blend {
                            upper,
                            lower,
                            gain_upper,
                            gain_lower,
                        }
                    }
                    // Sorted rings keep the span positive; guard anyway
                    None => RingSelection::Single { ring: lower },
                }
            }
        };
        Some(selection)
    }

    /// Per-channel gains for a direction, without rendering.
    ///
    /// `out` is cleared first; channels beyond its length are skipped.
    pub fn speaker_gains(&self, direction: Direction, out: &mut [f32]) -> Option<RingSelection> {
        out.fill(0.0);
        let selection = self.select_rings(direction.elevation)?;
        match selection {
            RingSelection::Single { ring } => {
                self.rings[ring]
                    .panner()
                    .accumulate_gains(direction, 1.0, out);
            }
            RingSelection::Blend {
                upper,
                lower,
                gain_upper,
                gain_lower,
            } => {
                self.rings[upper]
                    .panner()
                    .accumulate_gains(direction, gain_upper, out);
                self.rings[lower]
                    .panner()
                    .accumulate_gains(direction, gain_lower, out);
            }
        }
        Some(selection)
    }

    /// Pan one mono block onto the speakers, adding into `io`.
    ///
    /// `samples.len()` is the block length and must not exceed the prepared
    /// capacity. Failures leave `io` untouched.
    pub fn render_buffer(
        &mut self,
        io: &mut AudioIo,
        pose: &Pose,
        samples: &[f32],
    ) -> Result<RingSelection> {
        let frames = samples.len();
        if self.rings.is_empty() {
            self.monitor.record_error();
            return Err(Error::NotCompiled);
        }
        if self.capacity == 0 || frames > self.capacity {
            self.monitor.record_error();
            return Err(Error::Capacity {
                requested: frames,
                capacity: self.capacity,
            });
        }

        let direction = Direction::from_pose(pose);
        let Some(selection) = self.select_rings(direction.elevation) else {
            self.monitor.record_error();
            return Err(Error::NotCompiled);
        };

        match selection {
            RingSelection::Single { ring } => {
                self.rings[ring]
                    .panner_mut()
                    .render_buffer(io, pose, samples);
                self.monitor.record_block(direction.elevation, 1.0, 0.0);
            }
            RingSelection::Blend {
                upper,
                lower,
                gain_upper,
                gain_lower,
            } => {
                let upper_block = &mut self.upper_buffer[..frames];
                let lower_block = &mut self.lower_buffer[..frames];
                for ((u, l), &s) in upper_block
                    .iter_mut()
                    .zip(lower_block.iter_mut())
                    .zip(samples)
                {
                    *u = s * gain_upper;
                    *l = s * gain_lower;
                }

                self.rings[upper]
                    .panner_mut()
                    .render_buffer(io, pose, &self.upper_buffer[..frames]);
                self.rings[lower]
                    .panner_mut()
                    .render_buffer(io, pose, &self.lower_buffer[..frames]);
                self.monitor
                    .record_block(direction.elevation, gain_upper, gain_lower);
            }
        }
        Ok(selection)
    }

    /// Write each ring's elevation followed by its panner's dump.
    pub fn print(&self, w: &mut dyn fmt::Write) -> fmt::Result {
        for ring in &self.rings {
            writeln!(
                w,
                " ---- Ring at elevation: {:.2} (group {})",
                ring.elevation(),
                ring.group()
            )?;
            ring.panner().print(w)?;
        }
        Ok(())
    }
}

impl<P: RingPanner> fmt::Display for LayerPanner<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print(f)
    }
}

impl<P: RingPanner> fmt::Debug for LayerPanner<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerPanner")
            .field("speakers", &self.layout.num_speakers())
            .field("rings", &self.rings)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use strata_core::Speaker;

    /// Sends everything to the ring's first speaker at unity gain.
    struct MarkerRing {
        channel: usize,
        renders: usize,
    }

    impl RingPanner for MarkerRing {
        fn compile(speakers: &[Speaker]) -> Result<Self> {
            Ok(Self {
                channel: speakers[0].device_channel,
                renders: 0,
            })
        }

        fn num_speakers(&self) -> usize {
            1
        }

        fn accumulate_gains(&self, _direction: Direction, scale: f32, out: &mut [f32]) {
            if let Some(slot) = out.get_mut(self.channel) {
                *slot += scale;
            }
        }

        fn render_buffer(&mut self, io: &mut AudioIo, _pose: &Pose, samples: &[f32]) {
            self.renders += 1;
            io.accumulate(self.channel, samples, 1.0);
        }

        fn print(&self, w: &mut dyn fmt::Write) -> fmt::Result {
            writeln!(w, "marker ch {}", self.channel)
        }
    }

    /// One marker speaker per elevation; speaker `i` is on channel `i`.
    fn marker_panner(elevations: &[f32]) -> LayerPanner<MarkerRing> {
        let layout = elevations
            .iter()
            .enumerate()
            .map(|(i, &el)| Speaker::new(i, 0.0, el, i as i32))
            .collect();
        let mut panner = LayerPanner::<MarkerRing>::from_layout(layout);
        panner.compile().unwrap();
        panner.prepare(64).unwrap();
        panner
    }

    #[test]
    fn test_crossfade_endpoints() {
        let (u, l) = crossfade_gains(0.0);
        assert_abs_diff_eq!(u, 0.0);
        assert_abs_diff_eq!(l, 1.0);
        let (u, l) = crossfade_gains(1.0);
        assert_abs_diff_eq!(u, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(l, 0.0, epsilon = 1e-6);
        assert_eq!(crossfade_gains(f32::NAN), crossfade_gains(0.0));
        assert_eq!(crossfade_gains(-3.0), crossfade_gains(0.0));
    }

    #[test]
    fn test_blend_fraction_rejects_bad_spans() {
        assert_eq!(blend_fraction(10.0, 0.0, 0.0), None);
        assert_eq!(blend_fraction(10.0, -5.0, 5.0), None);
        assert_eq!(blend_fraction(10.0, f32::INFINITY, 0.0), None);
        assert_eq!(blend_fraction(30.0, 60.0, 0.0), Some(0.5));
        assert_eq!(blend_fraction(90.0, 60.0, 0.0), Some(1.0));
    }

    #[test]
    fn test_rings_sorted_descending() {
        let panner = marker_panner(&[-60.0, 60.0, 0.0]);
        let elevations: Vec<f32> = panner.rings().iter().map(|r| r.elevation()).collect();
        assert_eq!(elevations, vec![60.0, 0.0, -60.0]);
    }

    #[test]
    fn test_equal_elevations_keep_group_order() {
        let layout: SpeakerLayout = [
            Speaker::new(0, 0.0, 0.0, 5),
            Speaker::new(1, 0.0, 0.0, 2),
        ]
        .into_iter()
        .collect();
        let mut panner = LayerPanner::<MarkerRing>::from_layout(layout);
        panner.compile().unwrap();
        let groups: Vec<i32> = panner.rings().iter().map(|r| r.group()).collect();
        assert_eq!(groups, vec![2, 5]);
    }

    #[test]
    fn test_recompile_replaces_rings() {
        let mut panner = marker_panner(&[60.0, 0.0, -60.0]);
        assert_eq!(panner.num_rings(), 3);
        panner.compile().unwrap();
        assert_eq!(panner.num_rings(), 3);

        panner.set_layout(SpeakerLayout::stereo());
        panner.compile().unwrap();
        assert_eq!(panner.num_rings(), 1);
    }

    #[test]
    fn test_compile_empty_layout_fails() {
        let mut panner = LayerPanner::new(SpeakerLayout::new());
        assert!(matches!(panner.compile(), Err(Error::Configuration(_))));
        assert!(!panner.is_compiled());
    }

    #[test]
    fn test_three_ring_midpoint() {
        let panner = marker_panner(&[60.0, 0.0, -60.0]);
        match panner.select_rings(30.0).unwrap() {
            RingSelection::Blend {
                upper,
                lower,
                gain_upper,
                gain_lower,
            } => {
                assert_eq!((upper, lower), (0, 1));
                assert_abs_diff_eq!(gain_upper, 0.70710677, epsilon = 1e-5);
                assert_abs_diff_eq!(gain_lower, 0.70710677, epsilon = 1e-5);
            }
            other => panic!("expected blend, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_ring_elevation_is_single() {
        let panner = marker_panner(&[60.0, 0.0, -60.0]);
        assert_eq!(
            panner.select_rings(0.0),
            Some(RingSelection::Single { ring: 1 })
        );
        assert_eq!(
            panner.select_rings(60.0),
            Some(RingSelection::Single { ring: 0 })
        );
        assert_eq!(
            panner.select_rings(-60.0),
            Some(RingSelection::Single { ring: 2 })
        );
    }

    #[test]
    fn test_top_and_bottom_degenerate() {
        let panner = marker_panner(&[60.0, 0.0, -60.0]);
        assert_eq!(
            panner.select_rings(85.0),
            Some(RingSelection::Single { ring: 0 })
        );
        assert_eq!(
            panner.select_rings(-85.0),
            Some(RingSelection::Single { ring: 2 })
        );
    }

    #[test]
    fn test_single_ring_always_selected() {
        let panner = marker_panner(&[20.0]);
        for elevation in [-90.0, -10.0, 20.0, 45.0, 90.0] {
            assert_eq!(
                panner.select_rings(elevation),
                Some(RingSelection::Single { ring: 0 })
            );
        }
    }

    #[test]
    fn test_render_blend_writes_both_rings() {
        let mut panner = marker_panner(&[60.0, 0.0, -60.0]);
        let mut io = AudioIo::new(3, 16);
        let pose = Direction::new(0.0, 30.0).to_pose(2.0);
        let block = [1.0f32; 16];

        let selection = panner.render_buffer(&mut io, &pose, &block).unwrap();
        assert!(matches!(selection, RingSelection::Blend { .. }));

        let top = io.channel(0).unwrap()[0];
        let middle = io.channel(1).unwrap()[0];
        assert_abs_diff_eq!(top * top + middle * middle, 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(io.channel_energy(2), 0.0);
    }

    #[test]
    fn test_render_single_uses_input_directly() {
        let mut panner = marker_panner(&[60.0, 0.0, -60.0]);
        let mut io = AudioIo::new(3, 8);
        let pose = Direction::new(0.0, 80.0).to_pose(1.0);
        let block: Vec<f32> = (0..8).map(|i| i as f32).collect();

        panner.render_buffer(&mut io, &pose, &block).unwrap();
        assert_eq!(io.channel(0).unwrap(), block.as_slice());
        assert_eq!(panner.rings()[0].panner().renders, 1);
        assert_eq!(panner.rings()[1].panner().renders, 0);
    }

    #[test]
    fn test_render_shorter_block_than_capacity() {
        let mut panner = marker_panner(&[60.0, 0.0]);
        let mut io = AudioIo::new(2, 64);
        let pose = Direction::new(0.0, 30.0).to_pose(1.0);
        panner.render_buffer(&mut io, &pose, &[1.0; 10]).unwrap();

        let top = io.channel(0).unwrap();
        assert!(top[9] > 0.0);
        assert_eq!(top[10], 0.0);
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut panner = marker_panner(&[60.0, 0.0]);
        let mut io = AudioIo::new(2, 128);
        let pose = Direction::new(0.0, 30.0).to_pose(1.0);

        let result = panner.render_buffer(&mut io, &pose, &[1.0; 65]);
        assert!(matches!(
            result,
            Err(Error::Capacity {
                requested: 65,
                capacity: 64
            })
        ));
        assert_eq!(io.channel_energy(0) + io.channel_energy(1), 0.0);
        assert_eq!(panner.monitor().snapshot().render_errors, 1);
    }

    #[test]
    fn test_render_before_prepare_fails() {
        let mut panner = LayerPanner::<MarkerRing>::from_layout(SpeakerLayout::stereo());
        panner.compile().unwrap();
        let mut io = AudioIo::new(2, 4);
        let result = panner.render_buffer(&mut io, &Pose::default(), &[1.0; 4]);
        assert!(matches!(result, Err(Error::Capacity { capacity: 0, .. })));
    }

    #[test]
    fn test_render_before_compile_fails() {
        let mut panner = LayerPanner::new(SpeakerLayout::stereo());
        panner.prepare(4).unwrap();
        let mut io = AudioIo::new(2, 4);
        let result = panner.render_buffer(&mut io, &Pose::default(), &[1.0; 4]);
        assert!(matches!(result, Err(Error::NotCompiled)));
    }

    #[test]
    fn test_prepare_oversized_rejected() {
        let mut panner = LayerPanner::new(SpeakerLayout::stereo());
        panner.prepare(64).unwrap();
        assert!(matches!(
            panner.prepare(usize::MAX),
            Err(Error::Configuration(_))
        ));
        assert!(panner.prepare(MAX_BLOCK_SIZE + 1).is_err());
        assert_eq!(panner.capacity(), 64);
        panner.prepare(MAX_BLOCK_SIZE).unwrap();
        assert_eq!(panner.capacity(), MAX_BLOCK_SIZE);
    }

    #[test]
    fn test_equal_elevation_rings_never_blend() {
        let layout: SpeakerLayout = [
            Speaker::new(0, 0.0, 0.0, 0),
            Speaker::new(1, 0.0, 0.0, 1),
        ]
        .into_iter()
        .collect();
        let mut panner = LayerPanner::<MarkerRing>::from_layout(layout);
        panner.compile().unwrap();
        for elevation in [-45.0, -0.5, 0.0, 0.5, 45.0, f32::NAN] {
            let selection = panner.select_rings(elevation).unwrap();
            assert!(matches!(selection, RingSelection::Single { .. }));
        }
    }

    #[test]
    fn test_prepare_zero_rejected() {
        let mut panner = LayerPanner::new(SpeakerLayout::stereo());
        assert!(panner.prepare(0).is_err());
        panner.prepare(32).unwrap();
        panner.prepare(16).unwrap();
        assert_eq!(panner.capacity(), 16);
    }

    #[test]
    fn test_speaker_gains_blend() {
        let panner = marker_panner(&[60.0, 0.0, -60.0]);
        let mut gains = [9.0f32; 3];
        panner.speaker_gains(Direction::new(0.0, -30.0), &mut gains);
        assert_eq!(gains[0], 0.0);
        assert_abs_diff_eq!(gains[1], 0.70710677, epsilon = 1e-5);
        assert_abs_diff_eq!(gains[2], 0.70710677, epsilon = 1e-5);
    }

    #[test]
    fn test_print_lists_rings_in_order() {
        let panner = marker_panner(&[-60.0, 60.0]);
        let text = panner.to_string();
        let top = text.find("elevation: 60.00").unwrap();
        let bottom = text.find("elevation: -60.00").unwrap();
        assert!(top < bottom);
        assert_eq!(text.matches("marker ch").count(), 2);
    }

    proptest! {
        #[test]
        fn prop_equal_power(fraction in 0.0f32..=1.0) {
            let (u, l) = crossfade_gains(fraction);
            prop_assert!((u * u + l * l - 1.0).abs() < 1e-5);
            prop_assert!(u >= 0.0 && l >= 0.0);
        }

        #[test]
        fn prop_rings_descending(elevations in proptest::collection::vec(-90.0f32..=90.0, 1..8)) {
            let panner = marker_panner(&elevations);
            for pair in panner.rings().windows(2) {
                prop_assert!(pair[0].elevation() >= pair[1].elevation());
            }
        }

        #[test]
        fn prop_selection_power_is_unity(elevation in -90.0f32..=90.0) {
            let panner = marker_panner(&[70.0, 25.0, -10.0, -45.0]);
            let selection = panner.select_rings(elevation).unwrap();
            let power: f32 = (0..4).map(|r| selection.ring_gain(r).powi(2)).sum();
            prop_assert!((power - 1.0).abs() < 1e-5);
        }
    }
}
