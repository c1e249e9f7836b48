use std::io::Cursor;

use approx::assert_abs_diff_eq;
use stem_restyle_core::core::wav::{
    decode_pcm, decode_remote_audio, decode_wav, encode_wav, pcm_payload, quantize, wav_format,
    REMOTE_CHANNELS, REMOTE_SAMPLE_RATE, WAV_HEADER_LEN,
};
use stem_restyle_core::{AudioData, MAX_CHANNELS, RestyleError};

fn le_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

fn le_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

fn pcm_bytes(values: &[i16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

#[test]
fn header_fields_for_stereo() {
    let audio = AudioData::new(vec![vec![0.0; 3], vec![0.0; 3]], 44_100).unwrap();
    let wav = encode_wav(&audio);

    assert_eq!(wav.len(), 44 + 3 * 2 * 2);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(le_u32(&wav, 4), (wav.len() - 8) as u32);
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(le_u32(&wav, 16), 16);
    assert_eq!(le_u16(&wav, 20), 1);
    assert_eq!(le_u16(&wav, 22), 2);
    assert_eq!(le_u32(&wav, 24), 44_100);
    assert_eq!(le_u32(&wav, 28), 44_100 * 2 * 2);
    assert_eq!(le_u16(&wav, 32), 4);
    assert_eq!(le_u16(&wav, 34), 16);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(le_u32(&wav, 40), 12);
}

#[test]
fn full_scale_mono_payload() {
    let audio = AudioData::new(vec![vec![1.0, -1.0]], 8_000).unwrap();
    let wav = encode_wav(&audio);
    let tail = &wav[wav.len() - 4..];
    assert_eq!(i16::from_le_bytes([tail[0], tail[1]]), 32767);
    assert_eq!(i16::from_le_bytes([tail[2], tail[3]]), -32768);
}

#[test]
fn empty_buffer_is_header_only() {
    let audio = AudioData::silent(2, 0, 48_000).unwrap();
    let wav = encode_wav(&audio);
    assert_eq!(wav.len(), WAV_HEADER_LEN);
    assert_eq!(le_u32(&wav, 40), 0);
    assert_eq!(le_u32(&wav, 4), 36);
}

#[test]
fn length_matches_frames_and_channels() {
    for (channels, frames) in [(1u16, 1usize), (1, 777), (2, 100), (6, 33)] {
        let audio = AudioData::silent(channels, frames, 22_050).unwrap();
        let wav = encode_wav(&audio);
        assert_eq!(wav.len(), 44 + frames * channels as usize * 2);
    }
}

#[test]
fn header_holds_the_widest_frame() {
    let audio = AudioData::silent(MAX_CHANNELS, 2, 8_000).unwrap();
    let wav = encode_wav(&audio);
    assert_eq!(le_u16(&wav, 22), MAX_CHANNELS);
    assert_eq!(le_u16(&wav, 32), MAX_CHANNELS * 2);
    assert_eq!(le_u32(&wav, 40), 2 * MAX_CHANNELS as u32 * 2);
    assert_eq!(wav.len(), 44 + 2 * MAX_CHANNELS as usize * 2);
}

#[test]
fn quantization_is_asymmetric_and_truncates() {
    assert_eq!(quantize(1.0), 32767);
    assert_eq!(quantize(-1.0), -32768);
    assert_eq!(quantize(0.5), 16383);
    assert_eq!(quantize(-0.5), -16384);
    assert_eq!(quantize(0.0), 0);
    assert_eq!(quantize(-0.0), 0);
    // clamped
    assert_eq!(quantize(2.5), 32767);
    assert_eq!(quantize(-3.0), -32768);
}

#[test]
fn channels_interleave_frame_by_frame() {
    let audio = AudioData::new(vec![vec![0.0, 1.0], vec![-1.0, 0.0]], 44_100).unwrap();
    let wav = encode_wav(&audio);
    let data = &wav[WAV_HEADER_LEN..];
    let values: Vec<i16> = data
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect();
    assert_eq!(values, vec![0, -32768, 32767, 0]);
}

#[test]
fn hound_reads_encoded_stream() {
    let left: Vec<f32> = (0..64).map(|i| (i as f32 / 64.0) - 0.5).collect();
    let right: Vec<f32> = left.iter().map(|s| -s).collect();
    let audio = AudioData::new(vec![left.clone(), right], 16_000).unwrap();

    let reader = hound::WavReader::new(Cursor::new(encode_wav(&audio))).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 16_000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.duration(), 64);

    let samples: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples[0], quantize(left[0]));
    assert_eq!(samples[1], quantize(-left[0]));
}

#[test]
fn decode_rejects_zero_channels() {
    match decode_pcm(&[0, 0], 24_000, 0) {
        Err(RestyleError::InvalidChannelCount(0)) => {}
        other => panic!("expected InvalidChannelCount, got {other:?}"),
    }
}

#[test]
fn decode_rejects_empty_payload() {
    match decode_pcm(&[], 24_000, 1) {
        Err(RestyleError::EmptyPayload) => {}
        other => panic!("expected EmptyPayload, got {other:?}"),
    }
}

#[test]
fn decode_drops_partial_frame() {
    // 7 bytes of stereo: one full frame (4 bytes) plus 3 stray bytes
    let mut bytes = pcm_bytes(&[16384, -16384]);
    bytes.extend_from_slice(&[1, 2, 3]);
    let audio = decode_pcm(&bytes, 24_000, 2).unwrap();
    assert_eq!(audio.frame_count(), 1);
    assert_eq!(audio.channel_count(), 2);
    assert_eq!(audio.channel(0).unwrap(), &[0.5f32]);
    assert_eq!(audio.channel(1).unwrap(), &[-0.5f32]);
}

#[test]
fn decode_divides_by_32768() {
    let audio = decode_pcm(&pcm_bytes(&[32767, -32768, 0, 1]), 24_000, 1).unwrap();
    let ch = audio.channel(0).unwrap();
    assert_abs_diff_eq!(ch[0], 32767.0 / 32768.0);
    assert_eq!(ch[1], -1.0);
    assert_eq!(ch[2], 0.0);
    assert_abs_diff_eq!(ch[3], 1.0 / 32768.0);
    assert_eq!(audio.sample_rate, 24_000);
}

#[test]
fn encode_then_decode_is_bounded() {
    let left: Vec<f32> = (0..1000).map(|i| ((i as f32) * 0.05).sin()).collect();
    let right: Vec<f32> = left.iter().map(|s| s * -0.3).collect();
    let audio = AudioData::new(vec![left, right], 44_100).unwrap();

    let wav = encode_wav(&audio);
    let back = decode_pcm(&wav[WAV_HEADER_LEN..], 44_100, 2).unwrap();
    assert_eq!(back.frame_count(), audio.frame_count());

    // positive samples lose up to one step to truncation and one to the 32767/32768 mismatch
    let tolerance = 2.0 / 32768.0;
    for (orig, got) in audio.channels().iter().zip(back.channels()) {
        for (&a, &b) in orig.iter().zip(got) {
            assert_abs_diff_eq!(a, b, epsilon = tolerance);
            if a < 0.0 {
                assert_abs_diff_eq!(a, b, epsilon = 1.0 / 32768.0);
            }
        }
    }
}

#[test]
fn negative_full_scale_survives_exactly() {
    let audio = AudioData::new(vec![vec![-1.0, -0.5, -0.25]], 24_000).unwrap();
    let back = decode_pcm(&encode_wav(&audio)[WAV_HEADER_LEN..], 24_000, 1).unwrap();
    assert_eq!(back.channel(0).unwrap(), &[-1.0f32, -0.5, -0.25]);
}

#[test]
fn header_can_be_read_back() {
    let audio = AudioData::new(vec![vec![0.25; 10], vec![-0.25; 10]], 32_000).unwrap();
    let wav = encode_wav(&audio);

    let fmt = wav_format(&wav).unwrap();
    assert_eq!(fmt.sample_format, hound::SampleFormat::Int);
    assert_eq!(fmt.channels, 2);
    assert_eq!(fmt.sample_rate, 32_000);
    assert_eq!(fmt.bits_per_sample, 16);
    assert_eq!(pcm_payload(&wav).unwrap().len(), 40);

    let back = decode_wav(&wav).unwrap();
    assert_eq!(back.sample_rate, 32_000);
    assert_eq!(back.channel_count(), 2);
    assert_eq!(back.frame_count(), 10);
}

#[test]
fn payload_lookup_rejects_non_wav() {
    assert!(pcm_payload(b"not a wav file at all").is_none());
    assert!(wav_format(&[0u8; 4]).is_none());
    assert!(decode_wav(b"RIFF....WAVE").is_err());
}

#[test]
fn remote_audio_defaults_to_raw_pcm() {
    let audio = decode_remote_audio(&pcm_bytes(&[0, 8192, -8192])).unwrap();
    assert_eq!(audio.sample_rate, REMOTE_SAMPLE_RATE);
    assert_eq!(audio.channel_count(), REMOTE_CHANNELS);
    assert_eq!(audio.channel(0).unwrap(), &[0.0f32, 0.25, -0.25]);
}

#[test]
fn remote_audio_accepts_wav_container() {
    let src = AudioData::new(vec![vec![0.5; 4], vec![-0.5; 4]], 48_000).unwrap();
    let audio = decode_remote_audio(&encode_wav(&src)).unwrap();
    assert_eq!(audio.sample_rate, 48_000);
    assert_eq!(audio.channel_count(), 2);
    assert_eq!(audio.frame_count(), 4);
}

#[test]
fn remote_pcm_starting_with_riff_bytes_stays_raw() {
    // "RIFF" read as two little-endian samples
    let mut bytes = pcm_bytes(&[18_770, 17_990]);
    bytes.extend_from_slice(&pcm_bytes(&[0, -16_384]));
    assert!(wav_format(&bytes).is_none());

    let audio = decode_remote_audio(&bytes).unwrap();
    assert_eq!(audio.sample_rate, REMOTE_SAMPLE_RATE);
    assert_eq!(audio.channel_count(), REMOTE_CHANNELS);
    assert_eq!(audio.frame_count(), 4);
    assert_eq!(audio.channel(0).unwrap()[3], -0.5);

    let short = decode_remote_audio(b"RIFF\0\0d\0").unwrap();
    assert_eq!(short.frame_count(), 4);
}

#[test]
fn wav_container_without_samples_is_empty_payload() {
    let wav = encode_wav(&AudioData::silent(1, 0, 24_000).unwrap());
    assert!(matches!(decode_wav(&wav), Err(RestyleError::EmptyPayload)));
}
