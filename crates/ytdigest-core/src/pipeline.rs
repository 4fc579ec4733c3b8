//! Pipeline orchestrator: one run takes a video reference and produces a
//! best-effort [`Analysis`], degrading per stage. Reference parsing,
//! transcript fetch and summarization are fatal; every later stage failure
//! substitutes a visibly-empty default and records a warning instead of
//! aborting the run.

use std::collections::BTreeMap;

use futures_util::future::join_all;
use log::warn;

use crate::{
    artifacts::{regenerate_documents, synthesize_audio},
    error::{DigestError, Result},
    history::HistoryStore,
    prompts::{DIARIZATION_PROMPT, InsightKind, SPEAKER_SUMMARY_PROMPT, SUMMARY_PROMPT},
    reference::extract_video_id,
    sentiment::score_sentiment,
    services::{
        SpeechSynthesizer, TextModel, Translator, TranscriptSource, strip_code_fences,
        truncate_model_input,
    },
    types::{Analysis, Artifacts, HistoryEntry, InsightBundle, SpeakerSet, StageWarning},
};

/// Sentinel stored as the translated summary when translation fails. Never
/// fabricated content; visibly a failure marker.
pub const TRANSLATION_FAILED_SENTINEL: &str = "Translation failed";

/// The external collaborators one run depends on.
pub struct PipelineServices<'a> {
    pub transcripts: &'a dyn TranscriptSource,
    pub model: &'a dyn TextModel,
    pub translator: &'a dyn Translator,
    pub speech: &'a dyn SpeechSynthesizer,
}

pub struct PipelineOptions {
    /// Target language for the translated summary.
    pub translate_lang: String,
    /// Narration language for audio previews.
    pub audio_lang: String,
    pub skip_audio: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            translate_lang: "hi".to_string(),
            audio_lang: "en".to_string(),
            skip_audio: false,
        }
    }
}

fn record(stage: &str, message: String, warnings: &mut Vec<StageWarning>) {
    warn!("{stage} degraded: {message}");
    warnings.push(StageWarning {
        stage: stage.to_string(),
        message,
    });
}

fn decode_speaker_set(content: &str) -> Result<SpeakerSet> {
    let set: SpeakerSet = serde_json::from_str(strip_code_fences(content))?;
    if set.speakers.is_empty() {
        return Err(DigestError::StageFailed {
            stage: "diarization".to_string(),
            reason: "no speakers in model reply".to_string(),
        });
    }
    Ok(set)
}

/// Run the full pipeline for a user-supplied video reference.
///
/// Returns the assembled analysis, or a fatal error from reference parsing,
/// transcript fetch or summarization. Non-fatal stage failures end up in
/// `analysis.warnings` with the documented default substituted.
pub async fn run(
    video_ref: &str,
    services: &PipelineServices<'_>,
    options: &PipelineOptions,
    history: &mut HistoryStore,
) -> Result<Analysis> {
    let mut warnings: Vec<StageWarning> = Vec::new();

    // Stage 1: resolve the reference and fetch the transcript. Both fatal.
    let video_id = extract_video_id(video_ref).ok_or_else(|| DigestError::InvalidReference {
        input: video_ref.to_string(),
    })?;
    let transcript =
        services
            .transcripts
            .fetch(&video_id)
            .await
            .map_err(|e| match e {
                fatal @ DigestError::TranscriptUnavailable { .. } => fatal,
                other => DigestError::TranscriptUnavailable {
                    video_id: video_id.clone(),
                    reason: other.to_string(),
                },
            })?;
    let video_title = services.transcripts.title(&video_id).await;
    let model_input = truncate_model_input(&transcript.text);

    // Stage 2: summarize. The summary is essential: failure here aborts the
    // run, unlike every stage after it.
    let summary = services
        .model
        .complete(&format!("{SUMMARY_PROMPT}{model_input}"))
        .await
        .map_err(|e| DigestError::SummaryFailed {
            reason: e.to_string(),
        })?;

    // Stage 3: translate the summary.
    let translated_summary = match services
        .translator
        .translate(&summary, &options.translate_lang)
        .await
    {
        Ok(translated) => translated,
        Err(e) => {
            record("translation", e.to_string(), &mut warnings);
            TRANSLATION_FAILED_SENTINEL.to_string()
        }
    };

    // Stage 4: diarize. On any failure the whole transcript is attributed to
    // the fallback speaker.
    let speakers = match services
        .model
        .complete(&format!("{DIARIZATION_PROMPT}{model_input}"))
        .await
        .and_then(|reply| decode_speaker_set(&reply))
    {
        Ok(set) => set,
        Err(e) => {
            record("diarization", e.to_string(), &mut warnings);
            SpeakerSet::fallback(&transcript.text)
        }
    };

    // Stage 5: per-speaker summaries. Independent calls fanned out together;
    // composition stays in speaker-list order. A failed speaker keeps an
    // inline error string as its summary.
    let speaker_texts: Vec<(String, String)> = speakers
        .speakers
        .iter()
        .map(|s| (s.id.clone(), s.joined_text()))
        .filter(|(_, text)| !text.trim().is_empty())
        .collect();

    let speaker_prompts: Vec<String> = speaker_texts
        .iter()
        .map(|(_, text)| format!("{SPEAKER_SUMMARY_PROMPT}{text}"))
        .collect();
    let summary_futures = speaker_prompts.iter().map(|p| services.model.complete(p));
    let mut speaker_summaries = BTreeMap::new();
    for ((speaker_id, _), result) in speaker_texts.iter().zip(join_all(summary_futures).await) {
        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                record(
                    "speaker summary",
                    format!("{speaker_id}: {e}"),
                    &mut warnings,
                );
                format!("Could not generate summary: {e}")
            }
        };
        speaker_summaries.insert(speaker_id.clone(), summary);
    }

    // Stage 6: insight extraction. Four independent calls, each failure
    // leaves that collection empty without touching the other three.
    let insight_prompts: Vec<String> = InsightKind::ALL
        .iter()
        .map(|kind| format!("{}{model_input}", kind.prompt()))
        .collect();
    let insight_futures = insight_prompts.iter().map(|p| services.model.complete(p));
    let mut insights = InsightBundle::default();
    for (kind, result) in InsightKind::ALL.iter().zip(join_all(insight_futures).await) {
        let decoded = result.and_then(|reply| {
            serde_json::from_str::<InsightBundle>(strip_code_fences(&reply)).map_err(Into::into)
        });
        match decoded {
            Ok(bundle) => match kind {
                InsightKind::KeyPoints => insights.key_points = bundle.key_points,
                InsightKind::Quotes => insights.quotes = bundle.quotes,
                InsightKind::Qa => insights.qa_pairs = bundle.qa_pairs,
                InsightKind::Themes => insights.themes = bundle.themes,
            },
            Err(e) => record(kind.stage_name(), e.to_string(), &mut warnings),
        }
    }

    // Stage 7: sentiment, locally computed.
    let sentiment = score_sentiment(&transcript.text);
    let speaker_sentiment: BTreeMap<_, _> = speaker_texts
        .iter()
        .map(|(id, text)| (id.clone(), score_sentiment(text)))
        .collect();

    let mut analysis = Analysis {
        video_id,
        video_title,
        transcript,
        summary,
        translated_summary,
        speakers,
        speaker_summaries,
        speaker_sentiment,
        sentiment,
        insights,
        artifacts: Artifacts::default(),
        warnings,
    };

    // Stage 8: derived artifacts. Documents are plain string building;
    // audio synthesis may degrade.
    regenerate_documents(&mut analysis);
    if !options.skip_audio {
        let audio_warnings =
            synthesize_audio(&mut analysis, services.speech, &options.audio_lang).await;
        analysis.warnings.extend(audio_warnings);
    }

    // Stage 9: persist the durable fields. Failure degrades to a warning;
    // the in-memory result is still returned.
    if let Err(e) = history.put(HistoryEntry::from_analysis(&analysis)) {
        warn!("history persistence degraded: {e}");
        analysis.warnings.push(StageWarning {
            stage: "history".to_string(),
            message: e.to_string(),
        });
    }

    Ok(analysis)
}
