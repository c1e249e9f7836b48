use std::{fmt, ops::Range, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{RestyleError, Result};

/// Largest channel count whose 16-bit frame size still fits a WAV `block_align`.
pub const MAX_CHANNELS: u16 = 32_767;

/// Planar floating-point audio: one `Vec<f32>` per channel, all of equal length.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioData {
    channels: Vec<Vec<f32>>,
    pub sample_rate: u32,
}

impl AudioData {
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        match u16::try_from(channels.len()) {
            Ok(n) if (1..=MAX_CHANNELS).contains(&n) => {}
            Ok(n) => return Err(RestyleError::InvalidChannelCount(n)),
            Err(_) => return Err(RestyleError::InvalidChannelCount(u16::MAX)),
        }
        let expected = channels[0].len();
        if let Some(bad) = channels.iter().find(|c| c.len() != expected) {
            return Err(RestyleError::ChannelLengthMismatch {
                expected,
                got: bad.len(),
            });
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    pub fn silent(channels: u16, frames: usize, sample_rate: u32) -> Result<Self> {
        Self::new(vec![vec![0.0; frames]; channels as usize], sample_rate)
    }

    /// Split interleaved samples into channels. A trailing partial frame is dropped.
    pub fn from_interleaved(samples: &[f32], channels: u16, sample_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(RestyleError::InvalidChannelCount(channels));
        }
        let ch = channels as usize;
        let frames = samples.len() / ch;
        let mut planar = vec![Vec::with_capacity(frames); ch];
        for frame in samples.chunks_exact(ch) {
            for (c, &s) in frame.iter().enumerate() {
                planar[c].push(s);
            }
        }
        Self::new(planar, sample_rate)
    }

    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.frame_count() * self.channels.len());
        for i in 0..self.frame_count() {
            for ch in &self.channels {
                out.push(ch[i]);
            }
        }
        out
    }

    pub fn channel_count(&self) -> u16 {
        // bounded by MAX_CHANNELS in `new`
        u16::try_from(self.channels.len()).unwrap_or(MAX_CHANNELS)
    }

    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }
}

/// Active sub-range of a track as normalized fractions, `0 <= start < end <= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrimWindow {
    start: f32,
    end: f32,
}

impl TrimWindow {
    pub fn new(start: f32, end: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) || start >= end {
            return Err(RestyleError::InvalidTrim { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
        }
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    /// Move the start handle. Values that would cross the end handle are ignored.
    pub fn set_start(&mut self, value: f32) -> bool {
        if value >= 0.0 && value < self.end {
            self.start = value;
            return true;
        }
        false
    }

    /// Move the end handle. Values that would cross the start handle are ignored.
    pub fn set_end(&mut self, value: f32) -> bool {
        if value > self.start && value <= 1.0 {
            self.end = value;
            return true;
        }
        false
    }

    pub fn is_full(&self) -> bool {
        self.start <= 0.0 && self.end >= 1.0
    }

    pub fn contains(&self, position: f32) -> bool {
        position >= self.start && position <= self.end
    }

    pub fn frame_range(&self, frame_count: usize) -> Range<usize> {
        let n = frame_count as f64;
        let lo = ((self.start as f64) * n).round() as usize;
        let hi = (((self.end as f64) * n).round() as usize).min(frame_count);
        lo.min(hi)..hi
    }

    /// Copy of the trimmed region of `audio`.
    pub fn apply(&self, audio: &AudioData) -> AudioData {
        let range = self.frame_range(audio.frame_count());
        AudioData {
            channels: audio
                .channels
                .iter()
                .map(|c| c[range.clone()].to_vec())
                .collect(),
            sample_rate: audio.sample_rate,
        }
    }
}

impl Default for TrimWindow {
    fn default() -> Self {
        Self::full()
    }
}

/// 8-bit RGB color with a float alpha, as used by canvas fill styles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemKind {
    Drums,
    Bass,
    Vocals,
    Other,
}

impl StemKind {
    pub fn label(&self) -> &'static str {
        match self {
            StemKind::Drums => "drums",
            StemKind::Bass => "bass",
            StemKind::Vocals => "vocals",
            StemKind::Other => "other",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stem {
    pub id: String,
    pub name: String,
    pub kind: StemKind,
    pub color: Rgba,
    pub audio: AudioData,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicStyle {
    Lofi,
    Techno,
    #[serde(rename = "Live Recorded")]
    LiveRecorded,
    Orchestral,
    #[serde(rename = "8-Bit")]
    EightBit,
    Jazz,
}

impl MusicStyle {
    pub const ALL: [MusicStyle; 6] = [
        MusicStyle::Lofi,
        MusicStyle::Techno,
        MusicStyle::LiveRecorded,
        MusicStyle::Orchestral,
        MusicStyle::EightBit,
        MusicStyle::Jazz,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MusicStyle::Lofi => "Lofi",
            MusicStyle::Techno => "Techno",
            MusicStyle::LiveRecorded => "Live Recorded",
            MusicStyle::Orchestral => "Orchestral",
            MusicStyle::EightBit => "8-Bit",
            MusicStyle::Jazz => "Jazz",
        }
    }
}

impl fmt::Display for MusicStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MusicStyle {
    type Err = RestyleError;

    /// Case-insensitive; spaces, dashes and underscores are ignored ("live-recorded", "8bit").
    fn from_str(s: &str) -> Result<Self> {
        let key = |v: &str| -> String {
            v.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect()
        };
        let wanted = key(s);
        MusicStyle::ALL
            .into_iter()
            .find(|style| key(style.label()) == wanted)
            .ok_or_else(|| RestyleError::UnknownStyle(s.to_string()))
    }
}
