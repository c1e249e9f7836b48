use crate::{
    core::envelope::{layout_waveform, WaveformLayout, WaveformStyle},
    error::{RestyleError, Result},
    separation::StemSeparator,
    transform::{restyle, AudioTransformer},
    types::{AudioData, MusicStyle, Stem, TrimWindow},
};

/// Message recorded when a transformation fails.
pub const TRANSFORM_FAILED: &str = "Transformation failed. Try again.";

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub name: String,
    pub audio: AudioData,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum TransformStatus {
    #[default]
    Idle,
    Generating,
    Done(AudioData),
    Failed(String),
}

/// Editing state for one track: trim, stems, the stem picked for restyling and the chosen styles.
#[derive(Clone, Debug, Default)]
pub struct EditorSession {
    track: Option<Track>,
    trim: TrimWindow,
    stems: Vec<Stem>,
    dropped: Option<usize>,
    styles: Vec<MusicStyle>,
    status: TransformStatus,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded track. Trim, stems, dropped stem and any result are reset.
    pub fn load_track(&mut self, name: impl Into<String>, audio: AudioData) {
        let name = name.into();
        log::info!(
            "loaded track {name}: {:.2}s, {} channels @ {} Hz",
            audio.duration_secs(),
            audio.channel_count(),
            audio.sample_rate
        );
        self.track = Some(Track { name, audio });
        self.trim = TrimWindow::full();
        self.stems.clear();
        self.dropped = None;
        self.status = TransformStatus::Idle;
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    pub fn trim(&self) -> TrimWindow {
        self.trim
    }

    pub fn set_trim_start(&mut self, value: f32) -> bool {
        self.trim.set_start(value)
    }

    pub fn set_trim_end(&mut self, value: f32) -> bool {
        self.trim.set_end(value)
    }

    pub fn separate(&mut self, separator: &dyn StemSeparator) -> Result<&[Stem]> {
        let track = self.track.as_ref().ok_or(RestyleError::EmptyAudio)?;
        self.stems = separator.separate(&track.audio)?;
        self.dropped = None;
        Ok(&self.stems)
    }

    pub fn stems(&self) -> &[Stem] {
        &self.stems
    }

    pub fn drop_stem(&mut self, index: usize) -> Result<&Stem> {
        let stem = self
            .stems
            .get(index)
            .ok_or(RestyleError::StemIndex(index))?;
        self.dropped = Some(index);
        self.status = TransformStatus::Idle;
        Ok(stem)
    }

    pub fn dropped_stem(&self) -> Option<&Stem> {
        self.dropped.and_then(|i| self.stems.get(i))
    }

    /// Add `style` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_style(&mut self, style: MusicStyle) -> bool {
        if let Some(pos) = self.styles.iter().position(|s| *s == style) {
            self.styles.remove(pos);
            false
        } else {
            self.styles.push(style);
            true
        }
    }

    pub fn styles(&self) -> &[MusicStyle] {
        &self.styles
    }

    pub fn status(&self) -> &TransformStatus {
        &self.status
    }

    /// Restyle the dropped stem with the selected styles.
    pub fn transform(&mut self, transformer: &dyn AudioTransformer) -> Result<()> {
        let stem = self.dropped_stem().ok_or(RestyleError::NoStemDropped)?;
        let audio = stem.audio.clone();

        self.status = TransformStatus::Generating;
        let out = restyle(transformer, &audio, &self.styles).map_err(|e| {
            log::warn!("transformation failed: {e}");
            self.status = TransformStatus::Failed(TRANSFORM_FAILED.into());
            e
        })?;
        self.status = TransformStatus::Done(out);
        Ok(())
    }

    pub fn result(&self) -> Option<&AudioData> {
        match &self.status {
            TransformStatus::Done(audio) => Some(audio),
            _ => None,
        }
    }

    /// Waveform of the loaded track's first channel, dimmed outside the trim window.
    pub fn track_waveform(&self, style: &WaveformStyle) -> Option<WaveformLayout> {
        let track = self.track.as_ref()?;
        let samples = track.audio.channel(0)?;
        Some(layout_waveform(samples, style, &self.trim))
    }

    /// Stem waveforms are always drawn untrimmed.
    pub fn stem_waveform(&self, index: usize, style: &WaveformStyle) -> Option<WaveformLayout> {
        let samples = self.stems.get(index)?.audio.channel(0)?;
        Some(layout_waveform(samples, style, &TrimWindow::full()))
    }
}
