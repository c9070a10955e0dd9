//! Extractive fallback synthesis.
//!
//! When the generation service is unavailable, the answer is built
//! deterministically from the retrieved passages: lexical scoring
//! against the question's keywords, selection of the best passages,
//! sentence-aware truncation, and a fixed lead-in.

use crate::answer::postprocess::post_process;
use crate::types::{Answer, AnswerSource};
use std::collections::HashSet;

/// Returned when no passages were available to score.
pub const NO_INFORMATION_MESSAGE: &str =
    "I couldn't find any relevant information in the uploaded documents to answer your question.";

/// Returned when no passage scored above zero.
pub const NOTHING_SPECIFIC_MESSAGE: &str =
    "I couldn't find specific information related to your question in the uploaded documents.";

/// Lead-in prefixed to every extractive answer.
const ANSWER_LEAD_IN: &str = "Based on the available information: ";

/// Marker appended when the answer is hard-cut mid-sentence.
const ELLIPSIS: &str = "...";

/// Maximum number of passages combined into one answer.
const MAX_COMBINED_PASSAGES: usize = 4;

/// A sentence break inside the truncation window is only used when it
/// falls past this fraction of the length limit.
const SENTENCE_BREAK_RATIO: f64 = 0.7;

/// Words carrying no lexical signal for relevance scoring: articles,
/// interrogatives, auxiliaries, and common prepositions/conjunctions.
const STOPWORDS: [&str; 27] = [
    "the", "a", "an", "what", "how", "why", "when", "where", "who", "which", "is", "are", "was",
    "were", "do", "does", "did", "of", "in", "on", "at", "to", "for", "from", "with", "and", "or",
];

/// Build an extractive answer from normalized passages.
///
/// Deterministic: the same question and passage list always produce the
/// same answer. Ties in passage score preserve retrieval order.
pub fn synthesize(question: &str, passages: &[String], max_answer_length: usize) -> Answer {
    if passages.is_empty() {
        return Answer {
            text: NO_INFORMATION_MESSAGE.to_string(),
            source: AnswerSource::Canned,
        };
    }

    let keywords = question_keywords(question);
    tracing::debug!("Scoring {} passages against {} keywords", passages.len(), keywords.len());

    let mut scored: Vec<(f64, &String)> = passages
        .iter()
        .map(|passage| (score_passage(&keywords, passage), passage))
        .collect();

    // Stable sort: equal scores keep retrieval order.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let kept: Vec<&str> = scored
        .iter()
        .filter(|(score, _)| *score > 0.0)
        .take(MAX_COMBINED_PASSAGES)
        .map(|(_, passage)| passage.as_str())
        .collect();

    if kept.is_empty() {
        return Answer {
            text: NOTHING_SPECIFIC_MESSAGE.to_string(),
            source: AnswerSource::Canned,
        };
    }

    let combined = kept
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let truncated = truncate_answer(&combined, max_answer_length);

    Answer {
        text: post_process(&format!("{}{}", ANSWER_LEAD_IN, truncated)),
        source: AnswerSource::Extractive,
    }
}

/// Derive the question's keyword list: lower-cased alphanumeric tokens
/// minus stopwords, de-duplicated in first-occurrence order. That order
/// is also the one the phrase-window bonus is computed over.
pub fn question_keywords(question: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(question)
        .into_iter()
        .filter(|token| !STOPWORDS.contains(&token.as_str()))
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// Lower-cased alphanumeric word tokens.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .collect()
}

/// Lexical relevance of one passage to the question keywords.
///
/// - whole-word overlap, weight 1
/// - substring matches, weight 0.5 (counts keywords already counted as
///   whole words again — substring vs. whole-word match)
/// - contiguous keyword windows (length >= 2) found verbatim in the
///   passage, weight 2
pub(crate) fn score_passage(keywords: &[String], passage: &str) -> f64 {
    let passage_lower = passage.to_lowercase();
    let passage_words: HashSet<String> = tokenize(passage).into_iter().collect();

    let word_overlap = keywords
        .iter()
        .filter(|keyword| passage_words.contains(*keyword))
        .count();

    let phrase_matches = keywords
        .iter()
        .filter(|keyword| passage_lower.contains(keyword.as_str()))
        .count();

    let mut window_matches = 0usize;
    for start in 0..keywords.len() {
        for end in (start + 1)..keywords.len() {
            let phrase = keywords[start..=end].join(" ");
            if passage_lower.contains(&phrase) {
                window_matches += 1;
            }
        }
    }

    word_overlap as f64 + 0.5 * phrase_matches as f64 + 2.0 * window_matches as f64
}

/// Truncate to `max_len` characters, preferring a sentence break when
/// one falls late enough in the window.
fn truncate_answer(text: &str, max_len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_len {
        return text.to_string();
    }

    let window = &chars[..max_len];
    let last_break = window
        .iter()
        .rposition(|c| matches!(c, '.' | '!' | '?'));

    match last_break {
        Some(idx) if idx as f64 > max_len as f64 * SENTENCE_BREAK_RATIO => {
            window[..=idx].iter().collect()
        }
        _ => {
            let mut cut: String = window.iter().collect();
            cut.push_str(ELLIPSIS);
            cut
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_keywords_drop_stopwords_and_punctuation() {
        assert_eq!(
            question_keywords("What is machine learning?"),
            vec!["machine", "learning"]
        );
    }

    #[test]
    fn test_keywords_deduplicate_in_first_occurrence_order() {
        assert_eq!(
            question_keywords("sorting networks and sorting algorithms"),
            vec!["sorting", "networks", "algorithms"]
        );
    }

    #[test]
    fn test_score_counts_all_three_signals() {
        let keywords = question_keywords("What is machine learning?");
        // "machine" and "learning" as words (2), as substrings (2 * 0.5),
        // and the window "machine learning" verbatim (1 * 2).
        let score = score_passage(&keywords, "machine learning is everywhere");
        assert_eq!(score, 5.0);
    }

    #[test]
    fn test_score_substring_without_word_match() {
        let keywords = vec!["learn".to_string()];
        // "learn" is a substring of "learning" but not a whole word.
        let score = score_passage(&keywords, "learning never stops");
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_score_zero_for_unrelated_passage() {
        let keywords = question_keywords("What is machine learning?");
        assert_eq!(score_passage(&keywords, "Cooking pasta requires water"), 0.0);
    }

    #[test]
    fn test_window_bonus_counts_every_matching_span() {
        let keywords = strings(&["deep", "neural", "network"]);
        // Windows: "deep neural" (hit), "deep neural network" (hit),
        // "neural network" (hit) -> 3 * 2.0; plus 3 word hits and 3
        // substring hits.
        let score = score_passage(&keywords, "a deep neural network design");
        assert_eq!(score, 3.0 + 1.5 + 6.0);
    }

    #[test]
    fn test_synthesize_selects_relevant_passage() {
        let passages = strings(&[
            "Machine learning is a subset of AI that enables systems to learn from data.",
            "Cooking pasta requires boiling water.",
        ]);

        let answer = synthesize("What is machine learning?", &passages, 800);
        assert!(answer
            .text
            .starts_with("Based on the available information: Machine learning is a subset of AI"));
        assert!(answer.text.ends_with('.'));
        assert!(!answer.text.contains("pasta"));
        assert_eq!(answer.source, AnswerSource::Extractive);
    }

    #[test]
    fn test_synthesize_empty_passages() {
        let answer = synthesize("anything?", &[], 800);
        assert_eq!(answer.text, NO_INFORMATION_MESSAGE);
        assert_eq!(answer.source, AnswerSource::Canned);
    }

    #[test]
    fn test_synthesize_no_positive_scores() {
        let passages = strings(&["Cooking pasta requires boiling water."]);
        let answer = synthesize("What is machine learning?", &passages, 800);
        assert_eq!(answer.text, NOTHING_SPECIFIC_MESSAGE);
        assert_eq!(answer.source, AnswerSource::Canned);
    }

    #[test]
    fn test_synthesize_keeps_at_most_four_passages() {
        let passages = strings(&[
            "machine learning note one",
            "machine learning note two",
            "machine learning note three",
            "machine learning note four",
            "machine learning note five",
        ]);

        let answer = synthesize("What is machine learning?", &passages, 800);
        assert!(answer.text.contains("note four"));
        assert!(!answer.text.contains("note five"));
    }

    #[test]
    fn test_synthesize_ties_preserve_retrieval_order() {
        let passages = strings(&[
            "machine learning mention alpha",
            "machine learning mention beta",
        ]);

        let answer = synthesize("What is machine learning?", &passages, 800);
        let alpha = answer.text.find("alpha").unwrap();
        let beta = answer.text.find("beta").unwrap();
        assert!(alpha < beta);
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        let passages = strings(&[
            "machine learning is used for predictions",
            "a machine can also be mechanical",
        ]);

        let first = synthesize("What is machine learning?", &passages, 800);
        let second = synthesize("What is machine learning?", &passages, 800);
        assert_eq!(first, second);
    }

    #[test]
    fn test_truncate_fits_unchanged() {
        assert_eq!(truncate_answer("short text.", 50), "short text.");
    }

    #[test]
    fn test_truncate_cuts_at_late_sentence_break() {
        // 80-char text with a sentence break at character 42 (84% of a
        // 50-char limit): cut there inclusive, no ellipsis.
        let head = format!("{}.", "x".repeat(41));
        let text = format!("{}{}", head, "y".repeat(38));
        assert_eq!(text.chars().count(), 80);

        let result = truncate_answer(&text, 50);
        assert_eq!(result, head);
        assert_eq!(result.chars().count(), 42);
        assert!(!result.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_truncate_hard_cuts_with_ellipsis() {
        // Sentence break at character 10 (20% of the limit): too early,
        // hard cut at the limit with the ellipsis marker.
        let text = "Short one. Then a very long run of words without any break at all whatsoever";
        let result = truncate_answer(text, 50);
        assert_eq!(result.chars().count(), 53);
        assert!(result.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_truncate_never_exceeds_limit_plus_ellipsis() {
        let text = "word ".repeat(400);
        for limit in [10, 50, 333, 800] {
            let result = truncate_answer(&text, limit);
            assert!(result.chars().count() <= limit + ELLIPSIS.len());
        }
    }

    #[test]
    fn test_truncated_answer_still_capped_after_lead_in() {
        let passages = vec![format!(
            "machine learning {}",
            "detail after detail without punctuation ".repeat(40)
        )];

        let answer = synthesize("What is machine learning?", &passages, 100);
        let body = answer.text.strip_prefix(ANSWER_LEAD_IN).unwrap();
        assert!(body.chars().count() <= 100 + ELLIPSIS.len());
        assert!(body.ends_with(ELLIPSIS));
    }
}
