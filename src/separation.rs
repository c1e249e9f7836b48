use crate::{
    error::{RestyleError, Result},
    types::{AudioData, Rgba, Stem, StemKind},
};

pub trait StemSeparator {
    /// Split `input` into labelled stems, in display order.
    fn separate(&self, input: &AudioData) -> Result<Vec<Stem>>;
}

/// Stand-in separator: every stem is an unmodified copy of the input.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockSeparator;

const MOCK_STEMS: [(StemKind, &str, Rgba); 4] = [
    (
        StemKind::Drums,
        "Drums_Main_Loop_120bpm.wav",
        Rgba::rgb(0x3b, 0x82, 0xf6),
    ),
    (StemKind::Bass, "Bass_Sub_Fmin.wav", Rgba::rgb(0x8b, 0x5c, 0xf6)),
    (
        StemKind::Vocals,
        "Vocals_Dry_Lead.wav",
        Rgba::rgb(0xec, 0x48, 0x99),
    ),
    (
        StemKind::Other,
        "Atmosphere_Synth_Pad.wav",
        Rgba::rgb(0x10, 0xb9, 0x81),
    ),
];

impl StemSeparator for MockSeparator {
    fn separate(&self, input: &AudioData) -> Result<Vec<Stem>> {
        if input.is_empty() {
            return Err(RestyleError::EmptyAudio);
        }

        log::info!(
            "mock separation: {} frames x {} channels",
            input.frame_count(),
            input.channel_count()
        );

        Ok(MOCK_STEMS
            .iter()
            .enumerate()
            .map(|(i, (kind, name, color))| Stem {
                id: (i + 1).to_string(),
                name: (*name).to_string(),
                kind: *kind,
                color: *color,
                audio: input.clone(),
            })
            .collect())
    }
}
