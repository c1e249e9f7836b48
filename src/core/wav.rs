//! 16-bit PCM WAV encoding, raw PCM decoding and WAV read-back through hound.
//!
//! Encoding scales negative samples by 32768 and non-negative samples by
//! 32767; decoding always divides by 32768. The two directions are therefore
//! not exact inverses, and values near full scale come back slightly smaller
//! than they went in.

use std::io::Cursor;

use hound::{SampleFormat, WavReader, WavSpec};

use crate::{
    error::{RestyleError, Result},
    types::AudioData,
};

pub const WAV_HEADER_LEN: usize = 44;
pub const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: usize = 2;
const PCM_FORMAT: u16 = 1;

/// Sample rate of the PCM returned by the remote transformation service.
pub const REMOTE_SAMPLE_RATE: u32 = 24_000;
pub const REMOTE_CHANNELS: u16 = 1;

const ENCODE_NEG_SCALE: f32 = 32768.0;
const ENCODE_POS_SCALE: f32 = 32767.0;
const DECODE_SCALE: f32 = 32768.0;

/// Quantize one sample to 16-bit: clamp to [-1, 1], scale, truncate toward zero.
pub fn quantize(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    let scaled = if s < 0.0 {
        s * ENCODE_NEG_SCALE
    } else {
        s * ENCODE_POS_SCALE
    };
    scaled as i16
}

/// Encode planar audio into a canonical 44-byte-header 16-bit PCM WAV stream.
pub fn encode_wav(audio: &AudioData) -> Vec<u8> {
    let channels = audio.channel_count();
    let frames = audio.frame_count();
    let sample_rate = audio.sample_rate;

    let data_len = frames * channels as usize * BYTES_PER_SAMPLE;
    let block_align = channels * BYTES_PER_SAMPLE as u16;
    let byte_rate = sample_rate
        .wrapping_mul(BYTES_PER_SAMPLE as u32)
        .wrapping_mul(channels as u32);
    let total_len = WAV_HEADER_LEN + data_len;

    let mut buf = Vec::with_capacity(total_len);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&((total_len - 8) as u32).to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt sub-chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data sub-chunk, interleaved frame by frame
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&(data_len as u32).to_le_bytes());
    for i in 0..frames {
        for ch in audio.channels() {
            buf.extend_from_slice(&quantize(ch[i]).to_le_bytes());
        }
    }

    log::debug!(
        "encoded wav: {} frames x {} channels @ {} Hz -> {} bytes",
        frames,
        channels,
        sample_rate,
        buf.len()
    );

    buf
}

/// Decode headerless little-endian 16-bit PCM into planar audio.
///
/// A trailing partial frame is dropped.
pub fn decode_pcm(bytes: &[u8], sample_rate: u32, channels: u16) -> Result<AudioData> {
    if channels < 1 {
        return Err(RestyleError::InvalidChannelCount(channels));
    }
    if bytes.is_empty() {
        return Err(RestyleError::EmptyPayload);
    }

    let ch = channels as usize;
    let frame_bytes = BYTES_PER_SAMPLE * ch;
    let frames = bytes.len() / frame_bytes;

    let mut planar = vec![Vec::with_capacity(frames); ch];
    for frame in bytes.chunks_exact(frame_bytes) {
        for (c, sample) in frame.chunks_exact(BYTES_PER_SAMPLE).enumerate() {
            let v = i16::from_le_bytes([sample[0], sample[1]]);
            planar[c].push(v as f32 / DECODE_SCALE);
        }
    }

    if bytes.len() % frame_bytes != 0 {
        log::debug!(
            "dropped {} trailing bytes of partial frame",
            bytes.len() % frame_bytes
        );
    }

    AudioData::new(planar, sample_rate)
}

fn read_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

/// Walk the chunks of a RIFF/WAVE stream, yielding `(id, body)` pairs.
fn chunks(wav: &[u8]) -> Option<Vec<(&[u8], &[u8])>> {
    if wav.len() < 12 || &wav[0..4] != b"RIFF" || &wav[8..12] != b"WAVE" {
        return None;
    }

    let mut out = Vec::new();
    let mut pos = 12;
    while pos + 8 <= wav.len() {
        let id = &wav[pos..pos + 4];
        let size = read_u32(wav, pos + 4) as usize;
        let start = pos + 8;
        // tolerate a data chunk that claims more than was actually sent
        let end = start.saturating_add(size).min(wav.len());
        out.push((id, &wav[start..end]));

        pos = start.saturating_add(size);
        // chunks are word aligned
        if size % 2 == 1 {
            pos = pos.saturating_add(1);
        }
    }
    Some(out)
}

/// Borrow the `data` chunk payload of a WAV stream.
pub fn pcm_payload(wav: &[u8]) -> Option<&[u8]> {
    chunks(wav)?
        .into_iter()
        .find(|(id, _)| *id == b"data")
        .map(|(_, body)| body)
}

/// Header of a WAV stream, or `None` when hound cannot parse one.
pub fn wav_format(wav: &[u8]) -> Option<WavSpec> {
    WavReader::new(Cursor::new(wav)).ok().map(|r| r.spec())
}

/// Decode a 16-bit PCM WAV stream, taking rate and channel count from its header.
pub fn decode_wav(wav: &[u8]) -> Result<AudioData> {
    let reader = WavReader::new(Cursor::new(wav))?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(anyhow::anyhow!(
            "Unsupported WAV format: {:?}, bits={}",
            spec.sample_format,
            spec.bits_per_sample
        )
        .into());
    }

    let samples = reader
        .into_samples::<i16>()
        .map(|s| s.map(|v| v as f32 / DECODE_SCALE))
        .collect::<std::result::Result<Vec<f32>, _>>()?;
    if samples.is_empty() {
        return Err(RestyleError::EmptyPayload);
    }
    AudioData::from_interleaved(&samples, spec.channels, spec.sample_rate)
}

/// Decode a remote response: a parseable WAV container is read with its own
/// header, anything else is raw PCM at the remote rate.
pub fn decode_remote_audio(bytes: &[u8]) -> Result<AudioData> {
    match wav_format(bytes) {
        Some(_) => decode_wav(bytes),
        None => decode_pcm(bytes, REMOTE_SAMPLE_RATE, REMOTE_CHANNELS),
    }
}
