//! Non-interleaved multichannel output block.

/// Output buffer that panners accumulate into.
///
/// Storage is allocated once, at configuration time. Render paths only call
/// [`accumulate`](AudioIo::accumulate) and [`add`](AudioIo::add), which never
/// allocate. Several panners (rings, voices) may write into the same block, so
/// writes are additive; the host clears the block with
/// [`zero_out`](AudioIo::zero_out) before each cycle.
///
/// Writes to channels the buffer does not have are dropped: a speaker layout
/// may address more channels than the device exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioIo {
    channels: usize,
    frames: usize,
    data: Vec<f32>,
}

impl AudioIo {
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            channels,
            frames,
            data: vec![0.0; channels * frames],
        }
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Frames per channel.
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn zero_out(&mut self) {
        self.data.fill(0.0);
    }

    pub fn channel(&self, channel: usize) -> Option<&[f32]> {
        if channel >= self.channels {
            return None;
        }
        let start = channel * self.frames;
        Some(&self.data[start..start + self.frames])
    }

    pub fn channel_mut(&mut self, channel: usize) -> Option<&mut [f32]> {
        if channel >= self.channels {
            return None;
        }
        let start = channel * self.frames;
        Some(&mut self.data[start..start + self.frames])
    }

    /// Add one sample to `channel` at `frame`. Out-of-range writes are ignored.
    #[inline]
    pub fn add(&mut self, channel: usize, frame: usize, value: f32) {
        if channel < self.channels && frame < self.frames {
            self.data[channel * self.frames + frame] += value;
        }
    }

    /// Add `samples * gain` into `channel`, starting at frame 0.
    ///
    /// Samples beyond the buffer length are ignored.
    #[inline]
    pub fn accumulate(&mut self, channel: usize, samples: &[f32], gain: f32) {
        if let Some(out) = self.channel_mut(channel) {
            for (o, &s) in out.iter_mut().zip(samples) {
                *o += s * gain;
            }
        }
    }

    /// Sum of squares of a channel (zero for a missing channel).
    pub fn channel_energy(&self, channel: usize) -> f32 {
        self.channel(channel)
            .map(|c| c.iter().map(|s| s * s).sum())
            .unwrap_or(0.0)
    }
}
