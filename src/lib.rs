//! # stem-restyle-core
//!
//! Core of the stem restyling workflow: peak envelopes for waveform display,
//! a 16-bit PCM/WAV codec for shipping audio to a generative model, mock stem
//! separation and the editor session that ties them together.

mod audio;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod separation;
pub mod session;
pub mod transform;
mod types;

pub use crate::{
    audio::{read_audio, write_audio},
    config::RemoteConfig,
    core::{
        envelope::{extract_envelope, layout_waveform, WaveformLayout, WaveformStyle},
        wav::{decode_pcm, encode_wav},
    },
    error::{RestyleError, Result},
    io::{
        progress::{set_restyle_progress_callback, RestyleProgress},
        transfer::{from_base64, to_base64},
    },
    separation::{MockSeparator, StemSeparator},
    session::{EditorSession, TransformStatus},
    transform::{restyle, restyle_prompt, AudioTransformer, GeminiTransformer},
    types::{AudioData, MAX_CHANNELS, MusicStyle, Rgba, Stem, StemKind, TrimWindow},
};
