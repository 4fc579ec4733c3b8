//! Instruction templates sent to the text model. Each structured prompt pins
//! the exact JSON shape the corresponding type decodes.

pub const SUMMARY_PROMPT: &str = "You are a YouTube video summarizer. You will take the transcript text
and summarize the entire video, providing the important points in under 250 words.
Please provide the summary of the text given here: ";

pub const DIARIZATION_PROMPT: &str = r#"You're analyzing a transcript from a YouTube video to identify different speakers.
Please identify distinct speakers in this transcript and label each segment with the appropriate speaker.
Each speaker should be labeled as Speaker 1, Speaker 2, etc.
Return your response as a JSON object with this format:
{
    "speakers": [
        {
            "id": "Speaker 1",
            "segments": [
                {"text": "First segment text by Speaker 1"},
                {"text": "Another segment by Speaker 1"}
            ]
        },
        {
            "id": "Speaker 2",
            "segments": [
                {"text": "First segment text by Speaker 2"}
            ]
        }
    ]
}
Here's the transcript: "#;

pub const SPEAKER_SUMMARY_PROMPT: &str = "You're analyzing a transcript segment from a specific speaker in a YouTube video.
Please provide a concise summary (50-100 words) of this speaker's key points and contributions.
Focus on their main arguments, insights, or information they shared.
Here's the transcript segment for this speaker: ";

pub const KEY_POINTS_PROMPT: &str = r#"Extract the 5-7 most valuable and important points from this YouTube video transcript.
Focus on insights, takeaways, or information that would be most useful to someone who hasn't watched the video.
Format your response as a JSON object with this structure:
{
    "key_points": [
        "First important point in a concise sentence",
        "Second important point in a concise sentence"
    ]
}
Here's the transcript: "#;

pub const QUOTES_PROMPT: &str = r#"Extract 3-5 of the most impactful, insightful, or memorable quotes from this YouTube video transcript.
Choose quotes that represent significant ideas, are well-articulated, or capture key moments in the discussion.
Format your response as a JSON object with this structure:
{
    "quotes": [
        {
            "text": "The exact quote text",
            "speaker": "Speaker name/number if available, otherwise 'Unknown'"
        }
    ]
}
Here's the transcript: "#;

pub const QA_PROMPT: &str = r#"Identify any questions and their corresponding answers from this YouTube video transcript.
Look for explicit questions asked and the responses given to them.
Format your response as a JSON object with this structure:
{
    "qa_pairs": [
        {
            "question": "The exact question text",
            "asker": "Speaker who asked the question (if known, otherwise 'Unknown')",
            "answer": "The answer provided in response to the question",
            "answerer": "Speaker who provided the answer (if known, otherwise 'Unknown')"
        }
    ]
}
Here's the transcript: "#;

pub const THEMES_PROMPT: &str = r#"Identify 3-5 main themes or topics discussed in this YouTube video transcript.
For each theme, provide a brief description and explanation of how it relates to the video content.
Format your response as a JSON object with this structure:
{
    "themes": [
        {
            "name": "Name of the theme/topic",
            "description": "Brief explanation of this theme and its importance in the video"
        }
    ]
}
Here's the transcript: "#;

/// The four insight-extraction kinds, in their fixed composition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    KeyPoints,
    Quotes,
    Qa,
    Themes,
}

impl InsightKind {
    pub const ALL: [InsightKind; 4] = [
        InsightKind::KeyPoints,
        InsightKind::Quotes,
        InsightKind::Qa,
        InsightKind::Themes,
    ];

    pub fn prompt(&self) -> &'static str {
        match self {
            InsightKind::KeyPoints => KEY_POINTS_PROMPT,
            InsightKind::Quotes => QUOTES_PROMPT,
            InsightKind::Qa => QA_PROMPT,
            InsightKind::Themes => THEMES_PROMPT,
        }
    }

    pub fn stage_name(&self) -> &'static str {
        match self {
            InsightKind::KeyPoints => "key points extraction",
            InsightKind::Quotes => "quotes extraction",
            InsightKind::Qa => "Q&A extraction",
            InsightKind::Themes => "themes extraction",
        }
    }
}
