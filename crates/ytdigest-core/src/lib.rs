//! ytdigest Core Library
//!
//! Core functionality for fetching YouTube transcripts and producing analysis
//! digests: bilingual summaries, speaker attribution, insights, sentiment,
//! rendered documents and audio previews, plus a durable run history.

pub mod artifacts;
pub mod error;
pub mod format;
pub mod history;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod reference;
pub mod sentiment;
pub mod services;
pub mod types;

// Re-export commonly used items at crate root
pub use artifacts::{preview_text, regenerate_documents, synthesize_audio};
pub use error::{DigestError, Result};
pub use format::{format_digest_readable, format_timestamp, format_transcript_with_timestamps};
pub use history::{HistoryStore, default_history_path};
pub use pipeline::{PipelineOptions, PipelineServices, TRANSLATION_FAILED_SENTINEL, run};
pub use providers::{ChatModel, Provider, ProviderConfig, WebSpeech, WebTranslator, YouTubeCaptions};
pub use reference::extract_video_id;
pub use sentiment::score_sentiment;
pub use services::{SpeechSynthesizer, TextModel, Translator, TranscriptSource};
pub use types::{
    Analysis, Artifacts, FALLBACK_SPEAKER_ID, HistoryEntry, InsightBundle, QaPair, Quote, Segment,
    Sentiment, SentimentLabel, Speaker, SpeakerSet, StageWarning, Theme, Transcript,
};
