//! Derived artifacts: exportable documents and narrated audio previews.
//! Everything here is regenerable from the durable analysis fields, so a
//! history reload can rebuild artifacts idempotently.

use log::warn;

use crate::{
    format::{
        bilingual_summary_document, insights_document, speaker_document, summary_document,
        transcript_document,
    },
    services::SpeechSynthesizer,
    types::{Analysis, StageWarning},
};

/// Narrating a full transcript is slow and the TTS endpoint times out on long
/// input, so the transcript audio is a preview of the opening words only.
pub const TRANSCRIPT_PREVIEW_WORDS: usize = 500;

pub fn preview_text(text: &str) -> String {
    text.split_whitespace()
        .take(TRANSCRIPT_PREVIEW_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build (or rebuild) all document artifacts from the durable fields.
/// Idempotent: calling twice with the same analysis yields the same bytes.
pub fn regenerate_documents(analysis: &mut Analysis) {
    let title = analysis.video_title.clone();
    analysis.artifacts.transcript_doc =
        Some(transcript_document(&title, &analysis.transcript).into_bytes());
    analysis.artifacts.summary_doc = Some(summary_document(&title, &analysis.summary).into_bytes());
    analysis.artifacts.bilingual_summary_doc = Some(
        bilingual_summary_document(&title, &analysis.summary, &analysis.translated_summary)
            .into_bytes(),
    );
    analysis.artifacts.speaker_doc = Some(speaker_document(&title, analysis).into_bytes());
    analysis.artifacts.insights_doc =
        Some(insights_document(&title, &analysis.insights).into_bytes());
}

/// Synthesize the transcript preview and summary narrations. A failed
/// synthesis leaves that artifact absent and records a warning; it never
/// fails the caller.
pub async fn synthesize_audio(
    analysis: &mut Analysis,
    speech: &dyn SpeechSynthesizer,
    lang: &str,
) -> Vec<StageWarning> {
    let mut warnings = Vec::new();

    let preview = preview_text(&analysis.transcript.text);
    match speech.synthesize(&preview, lang).await {
        Ok(audio) => analysis.artifacts.transcript_audio = Some(audio),
        Err(e) => {
            warn!("transcript audio synthesis failed: {e}");
            warnings.push(StageWarning {
                stage: "transcript audio".to_string(),
                message: e.to_string(),
            });
        }
    }

    match speech.synthesize(&analysis.summary, lang).await {
        Ok(audio) => analysis.artifacts.summary_audio = Some(audio),
        Err(e) => {
            warn!("summary audio synthesis failed: {e}");
            warnings.push(StageWarning {
                stage: "summary audio".to_string(),
                message: e.to_string(),
            });
        }
    }

    warnings
}
