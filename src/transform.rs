use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{
    config::RemoteConfig,
    core::wav::{decode_remote_audio, encode_wav},
    error::{RestyleError, Result},
    io::{
        net::http_client,
        progress::{emit_restyle_progress, RestyleProgress},
        transfer::{from_base64, to_base64},
    },
    types::{AudioData, MusicStyle},
};

pub trait AudioTransformer {
    /// Send a WAV clip with the requested styles; returns the generated audio bytes
    /// (raw 16-bit PCM at the remote rate, or a WAV container).
    fn transform(&self, wav: &[u8], styles: &[MusicStyle]) -> Result<Vec<u8>>;
}

pub fn restyle_prompt(styles: &[MusicStyle]) -> String {
    let list = styles
        .iter()
        .map(MusicStyle::label)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Transform this audio track.\n\
         Apply the following styles/effects strictly: {list}.\n\
         Maintain the original rhythm but change the instrumentation and texture."
    )
}

/// Encode `audio`, run it through `transformer` and decode the result.
pub fn restyle<T>(transformer: &T, audio: &AudioData, styles: &[MusicStyle]) -> Result<AudioData>
where
    T: AudioTransformer + ?Sized,
{
    if styles.is_empty() {
        return Err(RestyleError::NoStyles);
    }

    let wav = encode_wav(audio);
    emit_restyle_progress(RestyleProgress::Encode { bytes: wav.len() });

    emit_restyle_progress(RestyleProgress::Upload);
    let pcm = transformer.transform(&wav, styles)?;

    emit_restyle_progress(RestyleProgress::Decode { bytes: pcm.len() });
    let out = decode_remote_audio(&pcm)?;

    emit_restyle_progress(RestyleProgress::Finished {
        frames: out.frame_count(),
    });
    Ok(out)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    data: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Gemini `generateContent` client asking for an audio response.
pub struct GeminiTransformer {
    cfg: RemoteConfig,
    client: Client,
}

impl GeminiTransformer {
    pub fn new(cfg: RemoteConfig) -> Result<Self> {
        let client = http_client(&cfg)?;
        Ok(Self { cfg, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.cfg.endpoint_base(),
            self.cfg.model
        )
    }

    fn request_body(wav: &[u8], styles: &[MusicStyle]) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: Some(restyle_prompt(styles)),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: "audio/wav".into(),
                            data: to_base64(wav),
                        }),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO".into()],
            },
        }
    }
}

impl AudioTransformer for GeminiTransformer {
    fn transform(&self, wav: &[u8], styles: &[MusicStyle]) -> Result<Vec<u8>> {
        let api_key = self
            .cfg
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(RestyleError::MissingApiKey)?;

        let body = Self::request_body(wav, styles);
        let started = Instant::now();

        log::info!(
            "remote transform: model={} styles=[{}] wav_bytes={}",
            self.cfg.model,
            styles
                .iter()
                .map(MusicStyle::label)
                .collect::<Vec<_>>()
                .join(", "),
            wav.len()
        );

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        log::info!(
            "remote transform: status={} latency_ms={}",
            status,
            started.elapsed().as_millis()
        );

        if !status.is_success() {
            log::warn!("remote transform failed: {status}");
            return Err(RestyleError::Remote(format!("API error ({status}): {text}")));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| RestyleError::Remote(format!("Failed to parse response: {e}")))?;

        let data = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| {
                content
                    .parts
                    .into_iter()
                    .find_map(|p| p.inline_data.map(|d| d.data))
            })
            .filter(|d| !d.is_empty())
            .ok_or_else(|| RestyleError::Remote("No audio data received from the model".into()))?;

        from_base64(&data)
    }
}
