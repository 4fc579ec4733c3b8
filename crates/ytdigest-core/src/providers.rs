//! HTTP implementations of the collaborator traits: YouTube caption fetch,
//! OpenAI-compatible chat completions, Google Translate text and TTS
//! endpoints.

use async_trait::async_trait;
use serde_json::Value;
use yt_transcript_rs::api::YouTubeTranscriptApi;

use crate::{
    error::{DigestError, Result},
    services::{SpeechSynthesizer, TextModel, Translator, TranscriptSource},
    types::{Segment, Transcript},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Provider {
    Grok,
    Openai,
    #[default]
    Gemini,
}

pub struct ProviderConfig {
    pub api_url: &'static str,
    pub model: &'static str,
    pub env_var: &'static str,
}

impl Provider {
    pub fn config(&self) -> ProviderConfig {
        match self {
            Provider::Grok => ProviderConfig {
                api_url: "https://api.x.ai/v1/chat/completions",
                model: "grok-4-fast",
                env_var: "XAI_API_KEY",
            },
            Provider::Openai => ProviderConfig {
                api_url: "https://api.openai.com/v1/chat/completions",
                model: "gpt-5.1",
                env_var: "OPENAI_API_KEY",
            },
            Provider::Gemini => ProviderConfig {
                api_url: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
                model: "gemini-3-pro",
                env_var: "GEMINI_API_KEY",
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Grok => "Grok",
            Provider::Openai => "OpenAI",
            Provider::Gemini => "Gemini",
        }
    }

    /// Validate that the API key is set for this provider
    pub fn validate_api_key(&self) -> Result<String> {
        let config = self.config();
        std::env::var(config.env_var).map_err(|_| DigestError::MissingApiKey {
            env_var: config.env_var.to_string(),
        })
    }
}

/// Caption language preference, most preferred first. The fetch falls
/// through the list, so videos with only non-English tracks still resolve.
const CAPTION_LANGS: &[&str] = &[
    "en", "en-US", "en-GB", "hi", "es", "pt", "fr", "de", "ru", "ja",
];

/// Transcript source backed by YouTube's caption endpoint.
#[derive(Default)]
pub struct YouTubeCaptions;

#[async_trait]
impl TranscriptSource for YouTubeCaptions {
    async fn fetch(&self, video_id: &str) -> Result<Transcript> {
        let unavailable = |reason: String| DigestError::TranscriptUnavailable {
            video_id: video_id.to_string(),
            reason,
        };

        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| unavailable(e.to_string()))?;
        let fetched = api
            .fetch_transcript(video_id, CAPTION_LANGS, false)
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let segments: Vec<Segment> = fetched
            .snippets
            .iter()
            .map(|s| Segment {
                start: s.start,
                duration: s.duration,
                text: s.text.trim().to_string(),
            })
            .collect();

        if segments.is_empty() {
            return Err(unavailable("no caption segments returned".to_string()));
        }

        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Transcript { text, segments })
    }
}

/// Prompt-driven text service over an OpenAI-compatible chat-completions API.
pub struct ChatModel {
    provider: Provider,
    client: reqwest::Client,
}

impl ChatModel {
    pub fn new(provider: Provider) -> Self {
        ChatModel {
            provider,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TextModel for ChatModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let config = self.provider.config();
        let api_key = self.provider.validate_api_key()?;

        let response = self
            .client
            .post(config.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&serde_json::json!({
                "model": config.model,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt,
                    },
                ],
                "temperature": 0.3,
            }))
            .send()
            .await?
            .json::<Value>()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| DigestError::StageFailed {
                stage: "chat completion".to_string(),
                reason: format!("Invalid API response: {:?}", response),
            })?;

        Ok(content.to_string())
    }
}

const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
// The translate endpoint rejects payloads over 5000 characters.
const TRANSLATE_CHUNK_CHARS: usize = 4900;

/// Translator backed by the Google Translate web endpoint. Long input is
/// translated in chunks and re-joined.
pub struct WebTranslator {
    client: reqwest::Client,
}

impl Default for WebTranslator {
    fn default() -> Self {
        WebTranslator {
            client: reqwest::Client::new(),
        }
    }
}

impl WebTranslator {
    async fn translate_chunk(&self, chunk: &str, target_lang: &str) -> Result<String> {
        let response = self
            .client
            .get(TRANSLATE_URL)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", chunk),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        // Answer shape: [[["translated", "original", ...], ...], ...]
        let parts = response
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| DigestError::StageFailed {
                stage: "translation".to_string(),
                reason: "unexpected translate response shape".to_string(),
            })?;

        let mut translated = String::new();
        for part in parts {
            if let Some(text) = part.get(0).and_then(|v| v.as_str()) {
                translated.push_str(text);
            }
        }
        Ok(translated)
    }
}

#[async_trait]
impl Translator for WebTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let mut translated = String::new();
        for chunk in chunk_by_chars(text, TRANSLATE_CHUNK_CHARS) {
            translated.push_str(&self.translate_chunk(chunk, target_lang).await?);
        }
        Ok(translated)
    }
}

const TTS_URL: &str = "https://translate.google.com/translate_tts";
const TTS_CHUNK_CHARS: usize = 180;

/// Text-to-speech via the Google Translate TTS endpoint. Text is synthesized
/// in word-boundary chunks and the MP3 frames concatenated.
pub struct WebSpeech {
    client: reqwest::Client,
}

impl Default for WebSpeech {
    fn default() -> Self {
        WebSpeech {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for WebSpeech {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>> {
        let mut audio = Vec::new();
        for chunk in chunk_by_words(text, TTS_CHUNK_CHARS) {
            let bytes = self
                .client
                .get(TTS_URL)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", lang),
                    ("q", chunk.as_str()),
                ])
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            audio.extend_from_slice(&bytes);
        }
        Ok(audio)
    }
}

/// Split into chunks of at most `max_chars` characters, on char boundaries.
fn chunk_by_chars(text: &str, max_chars: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let mut cut = rest.len().min(max_chars);
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        let (chunk, tail) = rest.split_at(cut);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

/// Split into chunks of at most `max_chars` characters on word boundaries.
/// A single word longer than the limit becomes its own chunk.
fn chunk_by_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
