//! Loudspeaker descriptors and layouts.
//!
//! A [`SpeakerLayout`] is an ordered list of [`Speaker`]s. Each speaker names
//! the device channel it is wired to, its direction in degrees (same
//! convention as [`Direction`](crate::Direction)), and the group id of the
//! elevation ring it belongs to.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A single loudspeaker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    /// Output channel this speaker is wired to
    #[serde(rename = "channel")]
    pub device_channel: usize,
    /// Horizontal angle in degrees (0 = front, 90 = left)
    pub azimuth: f32,
    /// Vertical angle in degrees (0 = ear level, positive = up)
    #[serde(default)]
    pub elevation: f32,
    /// Ring id; speakers sharing a group are panned as one layer
    #[serde(default)]
    pub group: i32,
}

impl Speaker {
    pub fn new(device_channel: usize, azimuth: f32, elevation: f32, group: i32) -> Self {
        Self {
            device_channel,
            azimuth,
            elevation,
            group,
        }
    }
}

/// Ordered set of speakers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeakerLayout {
    speakers: Vec<Speaker>,
}

impl SpeakerLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_speakers(speakers: Vec<Speaker>) -> Self {
        Self { speakers }
    }

    /// Two speakers at +/-30 degrees, ear level.
    pub fn stereo() -> Self {
        Self::from_speakers(vec![
            Speaker::new(0, 30.0, 0.0, 0),
            Speaker::new(1, -30.0, 0.0, 0),
        ])
    }

    /// Eight speakers at 45 degree spacing, ear level, starting front-left.
    pub fn octal() -> Self {
        Self::ring(0, 0.0, 8, 0, 22.5)
    }

    /// Seven ear-level speakers plus four height speakers at 45 degrees.
    ///
    /// Channel order is L, R, C, SL, SR, RL, RR, then the height pairs
    /// front-left, front-right, rear-left, rear-right. There is no LFE channel.
    pub fn dome_7_4() -> Self {
        let ear = [30.0, -30.0, 0.0, 90.0, -90.0, 150.0, -150.0];
        let height = [45.0, -45.0, 135.0, -135.0];

        let mut layout = Self::new();
        for (channel, &azimuth) in ear.iter().enumerate() {
            layout.add_speaker(Speaker::new(channel, azimuth, 0.0, 0));
        }
        for (i, &azimuth) in height.iter().enumerate() {
            layout.add_speaker(Speaker::new(ear.len() + i, azimuth, 45.0, 1));
        }
        layout
    }

    /// `count` equally spaced speakers at one elevation.
    ///
    /// Channels are assigned consecutively from `first_channel`; the first
    /// speaker sits at `azimuth_offset` and the rest follow clockwise
    /// (decreasing azimuth).
    pub fn ring(
        group: i32,
        elevation: f32,
        count: usize,
        first_channel: usize,
        azimuth_offset: f32,
    ) -> Self {
        let spacing = if count == 0 { 0.0 } else { 360.0 / count as f32 };
        let speakers = (0..count)
            .map(|i| {
                let azimuth = wrap_degrees(azimuth_offset - spacing * i as f32);
                Speaker::new(first_channel + i, azimuth, elevation, group)
            })
            .collect();
        Self::from_speakers(speakers)
    }

    pub fn add_speaker(&mut self, speaker: Speaker) {
        self.speakers.push(speaker);
    }

    pub fn with_speaker(mut self, speaker: Speaker) -> Self {
        self.add_speaker(speaker);
        self
    }

    /// Append every speaker of `other`, keeping its channels.
    pub fn extend(&mut self, other: &SpeakerLayout) {
        self.speakers.extend_from_slice(&other.speakers);
    }

    pub fn speakers(&self) -> &[Speaker] {
        &self.speakers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Speaker> {
        self.speakers.iter()
    }

    pub fn num_speakers(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }

    /// Output buffer width needed to address every speaker.
    pub fn num_channels(&self) -> usize {
        self.speakers
            .iter()
            .map(|s| s.device_channel + 1)
            .max()
            .unwrap_or(0)
    }

    /// Check that the layout is non-empty, every angle is finite and in range,
    /// and no two speakers share a device channel.
    pub fn validate(&self) -> Result<()> {
        if self.speakers.is_empty() {
            return Err(Error::InvalidLayout("layout contains no speakers".into()));
        }

        for (index, speaker) in self.speakers.iter().enumerate() {
            if !speaker.azimuth.is_finite() || !speaker.elevation.is_finite() {
                return Err(Error::InvalidSpeaker {
                    index,
                    reason: "angles must be finite".into(),
                });
            }
            if !(-90.0..=90.0).contains(&speaker.elevation) {
                return Err(Error::InvalidSpeaker {
                    index,
                    reason: format!("elevation {} outside -90..=90", speaker.elevation),
                });
            }
            if let Some(other) = self.speakers[..index]
                .iter()
                .position(|s| s.device_channel == speaker.device_channel)
            {
                return Err(Error::InvalidSpeaker {
                    index,
                    reason: format!(
                        "device channel {} already used by speaker {}",
                        speaker.device_channel, other
                    ),
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SpeakerLayout {
    type Item = &'a Speaker;
    type IntoIter = core::slice::Iter<'a, Speaker>;

    fn into_iter(self) -> Self::IntoIter {
        self.speakers.iter()
    }
}

impl FromIterator<Speaker> for SpeakerLayout {
    fn from_iter<I: IntoIterator<Item = Speaker>>(iter: I) -> Self {
        Self::from_speakers(iter.into_iter().collect())
    }
}

/// Wrap an angle in degrees into (-180, 180].
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
