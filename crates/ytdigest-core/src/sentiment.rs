//! Local lexicon-based sentiment scoring. Deterministic, no external calls:
//! polarity and subjectivity are averaged over lexicon hits, with a simple
//! negation rule for "not"/"never"/"no" before a scored word.

use crate::types::{Sentiment, SentimentLabel};

/// Polarity threshold separating Positive/Negative from Neutral.
pub const POLARITY_THRESHOLD: f64 = 0.1;

// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.7),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("boring", -1.0, 1.0),
    ("brilliant", 0.9, 0.9),
    ("broken", -0.4, 0.4),
    ("confusing", -0.4, 0.7),
    ("dangerous", -0.6, 0.9),
    ("difficult", -0.5, 1.0),
    ("disappointing", -0.6, 0.7),
    ("dreadful", -1.0, 1.0),
    ("easy", 0.43, 0.83),
    ("excellent", 1.0, 1.0),
    ("exciting", 0.45, 0.8),
    ("fail", -0.5, 0.5),
    ("fantastic", 0.4, 0.9),
    ("fascinating", 0.7, 0.9),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("hate", -0.8, 0.9),
    ("helpful", 0.4, 0.3),
    ("horrible", -1.0, 1.0),
    ("important", 0.4, 1.0),
    ("impressive", 0.9, 1.0),
    ("insightful", 0.6, 0.8),
    ("interesting", 0.5, 0.5),
    ("love", 0.5, 0.6),
    ("nice", 0.6, 1.0),
    ("painful", -0.7, 0.8),
    ("perfect", 1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("powerful", 0.5, 0.7),
    ("problem", -0.3, 0.4),
    ("sad", -0.5, 1.0),
    ("simple", 0.2, 0.4),
    ("slow", -0.3, 0.4),
    ("strong", 0.45, 0.6),
    ("stupid", -0.8, 0.9),
    ("terrible", -1.0, 1.0),
    ("useful", 0.3, 0.3),
    ("useless", -0.5, 0.6),
    ("valuable", 0.5, 0.6),
    ("weak", -0.4, 0.6),
    ("wonderful", 1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.5),
];

const NEGATIONS: &[&str] = &["not", "never", "no", "nothing", "cannot"];

fn lookup(word: &str) -> Option<(f64, f64)> {
    LEXICON
        .binary_search_by(|(w, _, _)| w.cmp(&word))
        .ok()
        .map(|i| (LEXICON[i].1, LEXICON[i].2))
}

/// Score a text's sentiment. Texts with no lexicon hits come out exactly
/// neutral (polarity 0.0, subjectivity 0.0).
pub fn score_sentiment(text: &str) -> Sentiment {
    let mut polarity_sum = 0.0;
    let mut subjectivity_sum = 0.0;
    let mut hits = 0usize;
    let mut negated = false;

    for raw in text.split_whitespace() {
        let word: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '\'')
            .collect::<String>()
            .to_lowercase();
        if word.is_empty() {
            continue;
        }
        if NEGATIONS.contains(&word.as_str()) || word.ends_with("n't") {
            negated = true;
            continue;
        }
        if let Some((polarity, subjectivity)) = lookup(&word) {
            // Negation flips and damps, "not good" reads mildly negative
            // rather than fully inverted.
            let polarity = if negated { polarity * -0.5 } else { polarity };
            polarity_sum += polarity;
            subjectivity_sum += subjectivity;
            hits += 1;
        }
        negated = false;
    }

    let (polarity, subjectivity) = if hits == 0 {
        (0.0, 0.0)
    } else {
        (polarity_sum / hits as f64, subjectivity_sum / hits as f64)
    };

    Sentiment {
        polarity,
        subjectivity,
        label: label_for(polarity),
    }
}

pub fn label_for(polarity: f64) -> SentimentLabel {
    if polarity > POLARITY_THRESHOLD {
        SentimentLabel::Positive
    } else if polarity < -POLARITY_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicon_is_sorted_for_binary_search() {
        for pair in LEXICON.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn plain_text_is_neutral() {
        let s = score_sentiment("Hello world. This is a test.");
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.polarity, 0.0);
        assert_eq!(s.subjectivity, 0.0);
    }

    #[test]
    fn positive_words_score_positive() {
        let s = score_sentiment("This was a great and insightful talk, excellent work.");
        assert_eq!(s.label, SentimentLabel::Positive);
        assert!(s.polarity > POLARITY_THRESHOLD);
        assert!(s.subjectivity > 0.0);
    }

    #[test]
    fn negative_words_score_negative() {
        let s = score_sentiment("A terrible, boring and disappointing episode.");
        assert_eq!(s.label, SentimentLabel::Negative);
        assert!(s.polarity < -POLARITY_THRESHOLD);
    }

    #[test]
    fn negation_flips_polarity() {
        let positive = score_sentiment("good");
        let negated = score_sentiment("not good");
        assert!(positive.polarity > 0.0);
        assert!(negated.polarity < 0.0);
        assert!(negated.polarity.abs() < positive.polarity.abs());
    }

    #[test]
    fn labels_follow_thresholds() {
        assert_eq!(label_for(0.2), SentimentLabel::Positive);
        assert_eq!(label_for(0.1), SentimentLabel::Neutral);
        assert_eq!(label_for(-0.1), SentimentLabel::Neutral);
        assert_eq!(label_for(-0.2), SentimentLabel::Negative);
        assert_eq!(label_for(0.0), SentimentLabel::Neutral);
    }
}
