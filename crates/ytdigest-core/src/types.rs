use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub duration: f64,
    pub text: String,
}

/// Label used when diarization fails and the whole transcript is attributed
/// to a single synthetic speaker. Must never collide with the "Speaker N"
/// labels the diarizer produces.
pub const FALLBACK_SPEAKER_ID: &str = "Speaker (All)";

/// Speaker-attributed view of a transcript, in the diarizer's answer shape.
/// Speaker order and per-speaker segment order are authoritative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakerSet {
    pub speakers: Vec<Speaker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Speaker {
    pub id: String,
    pub segments: Vec<SpeakerSegment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerSegment {
    pub text: String,
}

impl SpeakerSet {
    /// Single-speaker set holding the entire transcript as one segment.
    pub fn fallback(transcript_text: &str) -> Self {
        SpeakerSet {
            speakers: vec![Speaker {
                id: FALLBACK_SPEAKER_ID.to_string(),
                segments: vec![SpeakerSegment {
                    text: transcript_text.to_string(),
                }],
            }],
        }
    }
}

impl Speaker {
    pub fn joined_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
            SentimentLabel::Negative => write!(f, "Negative"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sentiment {
    /// -1.0 (negative) to 1.0 (positive).
    pub polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective).
    pub subjectivity: f64,
    pub label: SentimentLabel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default = "unknown")]
    pub speaker: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    #[serde(default = "unknown")]
    pub asker: String,
    pub answer: String,
    #[serde(default = "unknown")]
    pub answerer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub description: String,
}

fn unknown() -> String {
    "Unknown".to_string()
}

/// The four extracted-content collections. Each one defaults to empty when
/// its extraction stage fails; absence is not an error for the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightBundle {
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub qa_pairs: Vec<QaPair>,
    #[serde(default)]
    pub themes: Vec<Theme>,
}

/// Rendered documents and audio previews. Derived from the durable fields,
/// regenerable at any time, excluded from history persistence.
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    pub transcript_doc: Option<Vec<u8>>,
    pub summary_doc: Option<Vec<u8>>,
    pub bilingual_summary_doc: Option<Vec<u8>>,
    pub speaker_doc: Option<Vec<u8>>,
    pub insights_doc: Option<Vec<u8>>,
    pub transcript_audio: Option<Vec<u8>>,
    pub summary_audio: Option<Vec<u8>>,
}

/// A non-fatal stage failure recorded on the run outcome. The corresponding
/// analysis field holds its documented default instead of invented content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageWarning {
    pub stage: String,
    pub message: String,
}

/// The full output bundle of one pipeline run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub video_id: String,
    pub video_title: String,
    pub transcript: Transcript,
    pub summary: String,
    pub translated_summary: String,
    pub speakers: SpeakerSet,
    pub speaker_summaries: BTreeMap<String, String>,
    pub speaker_sentiment: BTreeMap<String, Sentiment>,
    pub sentiment: Sentiment,
    pub insights: InsightBundle,
    pub artifacts: Artifacts,
    pub warnings: Vec<StageWarning>,
}

/// Durable fields of an analysis, as stored in the history snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisData {
    pub summary: String,
    pub translated_summary: String,
    pub transcript: Transcript,
    pub speaker_set: SpeakerSet,
    pub speaker_summaries: BTreeMap<String, String>,
    pub sentiment: Sentiment,
    pub speaker_sentiment: BTreeMap<String, Sentiment>,
    pub key_points: Vec<String>,
    pub quotes: Vec<Quote>,
    pub qa_pairs: Vec<QaPair>,
    pub themes: Vec<Theme>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub video_id: String,
    pub video_title: String,
    /// "%Y-%m-%d %H:%M:%S" local time. Lexicographic order matches
    /// chronological order.
    pub timestamp: String,
    pub data: AnalysisData,
}

impl HistoryEntry {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        HistoryEntry {
            video_id: analysis.video_id.clone(),
            video_title: analysis.video_title.clone(),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            data: AnalysisData {
                summary: analysis.summary.clone(),
                translated_summary: analysis.translated_summary.clone(),
                transcript: analysis.transcript.clone(),
                speaker_set: analysis.speakers.clone(),
                speaker_summaries: analysis.speaker_summaries.clone(),
                sentiment: analysis.sentiment,
                speaker_sentiment: analysis.speaker_sentiment.clone(),
                key_points: analysis.insights.key_points.clone(),
                quotes: analysis.insights.quotes.clone(),
                qa_pairs: analysis.insights.qa_pairs.clone(),
                themes: analysis.insights.themes.clone(),
            },
        }
    }

    /// Restore an active analysis from the durable fields. Rendered artifacts
    /// are not stored; the caller regenerates them.
    pub fn into_analysis(self) -> Analysis {
        Analysis {
            video_id: self.video_id,
            video_title: self.video_title,
            transcript: self.data.transcript,
            summary: self.data.summary,
            translated_summary: self.data.translated_summary,
            speakers: self.data.speaker_set,
            speaker_summaries: self.data.speaker_summaries,
            speaker_sentiment: self.data.speaker_sentiment,
            sentiment: self.data.sentiment,
            insights: InsightBundle {
                key_points: self.data.key_points,
                quotes: self.data.quotes,
                qa_pairs: self.data.qa_pairs,
                themes: self.data.themes,
            },
            artifacts: Artifacts::default(),
            warnings: Vec::new(),
        }
    }
}
