//! Interfaces to the external collaborators the pipeline depends on. Each is
//! a dyn-compatible trait so runs can be driven by the real HTTP clients in
//! [`crate::providers`] or by test doubles.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::{error::Result, types::Transcript};

/// Maximum characters handed to the text model in one call. Longer input is
/// cut and marked.
pub const MAX_MODEL_INPUT_CHARS: usize = 100_000;

pub const TRUNCATION_MARKER: &str = "... (truncated due to length)";

#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(&self, video_id: &str) -> Result<Transcript>;

    /// Best-effort title lookup; never fails the run.
    async fn title(&self, video_id: &str) -> String {
        format!("YouTube Video (ID: {video_id})")
    }
}

/// Prompt-driven generative text service (summarization, diarization,
/// insight extraction).
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>>;
}

/// Cut model input down to [`MAX_MODEL_INPUT_CHARS`] characters, appending
/// the truncation marker when anything was dropped.
pub fn truncate_model_input(text: &str) -> String {
    match text.char_indices().nth(MAX_MODEL_INPUT_CHARS) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
    }
}

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").unwrap());

/// Models tend to wrap their structured answers in markdown code fences.
/// Returns the fenced payload when present, otherwise the trimmed input.
pub fn strip_code_fences(content: &str) -> &str {
    match CODE_FENCE.captures(content) {
        Some(captures) => captures.get(1).map(|m| m.as_str()).unwrap_or(content),
        None => content.trim(),
    }
}
