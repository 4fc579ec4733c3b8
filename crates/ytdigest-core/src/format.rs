use crate::types::{Analysis, InsightBundle, Sentiment, Transcript};

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    format!("{:02}:{:02}", mins, secs)
}

/// Format transcript segments with timestamps
pub fn format_transcript_with_timestamps(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .map(|seg| format!("[{}] {}", format_timestamp(seg.start), seg.text.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn sentiment_line(sentiment: &Sentiment) -> String {
    format!(
        "**Sentiment:** {} (polarity {:+.2}, subjectivity {:.2})",
        sentiment.label, sentiment.polarity, sentiment.subjectivity
    )
}

/// Plain transcript document with per-segment timestamps.
pub fn transcript_document(title: &str, transcript: &Transcript) -> String {
    format!(
        "# Transcript: {}\n\n{}\n",
        title,
        format_transcript_with_timestamps(transcript)
    )
}

/// Plain summary document.
pub fn summary_document(title: &str, summary: &str) -> String {
    format!("# Summary: {}\n\n{}\n", title, summary)
}

/// Summary in both languages, English first.
pub fn bilingual_summary_document(title: &str, summary: &str, translated_summary: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Video Summary: {}\n\n", title));
    output.push_str("## English\n\n");
    output.push_str(summary);
    output.push_str("\n\n## Translation\n\n");
    output.push_str(translated_summary);
    output.push('\n');
    output
}

/// Speaker-segmented transcript, with each speaker's summary and sentiment
/// when available.
pub fn speaker_document(title: &str, analysis: &Analysis) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Speaker Transcript: {}\n\n", title));

    for speaker in &analysis.speakers.speakers {
        output.push_str(&format!("## {}\n\n", speaker.id));
        if let Some(summary) = analysis.speaker_summaries.get(&speaker.id) {
            output.push_str(&format!("**Summary:** {}\n\n", summary));
        }
        if let Some(sentiment) = analysis.speaker_sentiment.get(&speaker.id) {
            output.push_str(&sentiment_line(sentiment));
            output.push_str("\n\n");
        }
        for segment in &speaker.segments {
            output.push_str(&format!("> {}\n\n", segment.text.trim()));
        }
    }
    output
}

/// Insights digest: key points, quotes, Q&A and themes.
pub fn insights_document(title: &str, insights: &InsightBundle) -> String {
    format!(
        "# Video Insights: {}\n\n{}",
        title,
        insights_sections(insights)
    )
}

fn insights_sections(insights: &InsightBundle) -> String {
    let mut output = String::new();

    output.push_str("## Key Points\n\n");
    if insights.key_points.is_empty() {
        output.push_str("_None extracted._\n");
    }
    for (i, point) in insights.key_points.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, point));
    }
    output.push('\n');

    output.push_str("## Impactful Quotes\n\n");
    if insights.quotes.is_empty() {
        output.push_str("_None extracted._\n");
    }
    for quote in &insights.quotes {
        output.push_str(&format!("> \"{}\"\n> — {}\n\n", quote.text, quote.speaker));
    }

    output.push_str("## Questions & Answers\n\n");
    if insights.qa_pairs.is_empty() {
        output.push_str("_None extracted._\n");
    }
    for qa in &insights.qa_pairs {
        output.push_str(&format!("**Q ({}):** {}\n\n", qa.asker, qa.question));
        output.push_str(&format!("**A ({}):** {}\n\n", qa.answerer, qa.answer));
    }

    output.push_str("## Key Themes\n\n");
    if insights.themes.is_empty() {
        output.push_str("_None extracted._\n");
    }
    for theme in &insights.themes {
        output.push_str(&format!("### {}\n\n{}\n\n", theme.name, theme.description));
    }

    output
}

/// Format a full analysis as human-readable markdown for terminal output.
pub fn format_digest_readable(analysis: &Analysis) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", analysis.video_title));
    output.push_str(&format!(
        "**Video:** {} | **Speakers:** {}\n\n",
        analysis.video_id,
        analysis.speakers.speakers.len()
    ));

    output.push_str("## Summary\n\n");
    output.push_str(&analysis.summary);
    output.push_str("\n\n");

    output.push_str("## Translated Summary\n\n");
    output.push_str(&analysis.translated_summary);
    output.push_str("\n\n");

    output.push_str("## Overall Sentiment\n\n");
    output.push_str(&sentiment_line(&analysis.sentiment));
    output.push_str("\n\n");

    if !analysis.speaker_summaries.is_empty() {
        output.push_str("## Speakers\n\n");
        for speaker in &analysis.speakers.speakers {
            let Some(summary) = analysis.speaker_summaries.get(&speaker.id) else {
                continue;
            };
            output.push_str(&format!("### {}\n\n{}\n\n", speaker.id, summary));
            if let Some(sentiment) = analysis.speaker_sentiment.get(&speaker.id) {
                output.push_str(&sentiment_line(sentiment));
                output.push_str("\n\n");
            }
        }
    }

    output.push_str(&insights_sections(&analysis.insights));

    if !analysis.warnings.is_empty() {
        output.push_str("## Warnings\n\n");
        for warning in &analysis.warnings {
            output.push_str(&format!("- {}: {}\n", warning.stage, warning.message));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Quote, Segment};

    #[test]
    fn timestamps_are_mm_ss() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.4), "01:05");
        assert_eq!(format_timestamp(600.0), "10:00");
    }

    #[test]
    fn transcript_lines_carry_timestamps() {
        let transcript = Transcript {
            text: "hello world".to_string(),
            segments: vec![
                Segment {
                    start: 0.0,
                    duration: 1.5,
                    text: "hello".to_string(),
                },
                Segment {
                    start: 61.0,
                    duration: 1.5,
                    text: "world".to_string(),
                },
            ],
        };
        let formatted = format_transcript_with_timestamps(&transcript);
        assert_eq!(formatted, "[00:00] hello\n[01:01] world");
    }

    #[test]
    fn insights_document_marks_empty_sections() {
        let insights = InsightBundle {
            quotes: vec![Quote {
                text: "quote".to_string(),
                speaker: "Speaker 1".to_string(),
            }],
            ..Default::default()
        };
        let doc = insights_document("t", &insights);
        assert!(doc.contains("_None extracted._"));
        assert!(doc.contains("Speaker 1"));
    }
}
