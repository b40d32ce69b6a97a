//! General-purpose lexicon scorer.

use mentionbot_core::{Sentiment, SentimentLabel};

use crate::clean::clean_for_sentiment;

/// Word weights: `(word, polarity, subjectivity)`.
///
/// Polarity is in `[-1.0, 1.0]`, subjectivity in `[0.0, 1.0]`. Document
/// scores are the arithmetic mean over matched words.
const LEXICON: &[(&str, f64, f64)] = &[
    // Positive
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("brilliant", 0.9, 0.9),
    ("clean", 0.4, 0.6),
    ("delicious", 1.0, 1.0),
    ("easy", 0.4, 0.8),
    ("excellent", 1.0, 1.0),
    ("fantastic", 0.9, 0.9),
    ("fast", 0.2, 0.6),
    ("favorite", 0.5, 1.0),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("helpful", 0.5, 0.6),
    ("impressive", 0.9, 1.0),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("nice", 0.6, 1.0),
    ("perfect", 1.0, 1.0),
    ("pleased", 0.6, 0.8),
    ("powerful", 0.5, 0.7),
    ("recommend", 0.4, 0.5),
    ("reliable", 0.6, 0.5),
    ("simple", 0.3, 0.4),
    ("smooth", 0.4, 0.6),
    ("solid", 0.4, 0.5),
    ("stable", 0.3, 0.4),
    ("useful", 0.3, 0.3),
    ("wonderful", 1.0, 1.0),
    // Negative
    ("annoying", -0.6, 0.9),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("broken", -0.4, 0.5),
    ("buggy", -0.6, 0.8),
    ("confusing", -0.5, 0.8),
    ("crash", -0.6, 0.5),
    ("crashes", -0.6, 0.5),
    ("difficult", -0.5, 0.8),
    ("disappointing", -0.6, 0.7),
    ("fail", -0.5, 0.5),
    ("failed", -0.5, 0.5),
    ("failure", -0.5, 0.5),
    ("frustrating", -0.6, 0.8),
    ("hate", -0.8, 0.9),
    ("horrible", -1.0, 1.0),
    ("painful", -0.7, 0.8),
    ("poor", -0.4, 0.6),
    ("problem", -0.3, 0.4),
    ("sad", -0.5, 1.0),
    ("slow", -0.3, 0.4),
    ("terrible", -1.0, 1.0),
    ("unreliable", -0.6, 0.5),
    ("unusable", -0.8, 0.9),
    ("useless", -0.5, 0.4),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.5),
];

/// Words that dampen and invert the polarity of the word right after them.
const NEGATORS: &[&str] = &[
    "not", "never", "no", "nothing", "neither", "nor", "cannot", "can't", "don't", "doesn't",
    "didn't", "isn't", "aren't", "wasn't", "weren't", "won't", "wouldn't", "shouldn't", "couldn't",
];

/// Derive the three-way label from polarity.
///
/// Exact thresholds: `> 0.1` positive, `< -0.1` negative, neutral otherwise.
#[must_use]
pub fn label_for_polarity(polarity: f64) -> SentimentLabel {
    if polarity > 0.1 {
        SentimentLabel::Positive
    } else if polarity < -0.1 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Score `text` for sentiment.
///
/// Empty or whitespace-only input short-circuits to the neutral zero result
/// without cleaning or scoring. Otherwise the text is cleaned (see
/// [`clean_for_sentiment`]) and scored word-by-word against the lexicon: a
/// negator immediately before a lexicon word multiplies that word's polarity
/// by `-0.5`, and the document polarity/subjectivity is the mean over all
/// matched words. Text with no lexicon matches scores neutral.
#[must_use]
pub fn analyze(text: &str) -> Sentiment {
    if text.trim().is_empty() {
        return Sentiment::neutral();
    }
    score_words(&clean_for_sentiment(text))
}

fn score_words(text: &str) -> Sentiment {
    let mut polarity_sum = 0.0_f64;
    let mut subjectivity_sum = 0.0_f64;
    let mut matched = 0_usize;
    let mut negated = false;

    for token in text.split_whitespace() {
        let word = token
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if word.is_empty() {
            continue;
        }
        if NEGATORS.contains(&word.as_str()) {
            negated = true;
            continue;
        }
        if let Some(&(_, polarity, subjectivity)) =
            LEXICON.iter().find(|(entry, _, _)| *entry == word)
        {
            polarity_sum += if negated { polarity * -0.5 } else { polarity };
            subjectivity_sum += subjectivity;
            matched += 1;
        }
        negated = false;
    }

    if matched == 0 {
        return Sentiment::neutral();
    }

    #[allow(clippy::cast_precision_loss)]
    let count = matched as f64;
    let polarity = (polarity_sum / count).clamp(-1.0, 1.0);
    let subjectivity = (subjectivity_sum / count).clamp(0.0, 1.0);
    Sentiment {
        polarity,
        subjectivity,
        label: label_for_polarity(polarity),
    }
}
