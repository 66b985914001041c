//! Keyword extraction — mines salient terms from free text for personalization.
//!
//! Used by the quality assessor and the strategy synthesizer to pull
//! learner-facing themes out of SME answers and uploaded content.

use std::collections::HashSet;

/// Maximum number of keywords returned per text.
const MAX_KEYWORDS: usize = 5;

/// Tokens at or below this length are discarded.
const MIN_TOKEN_CHARS: usize = 4;

/// Common English filler words excluded from keyword extraction.
const STOP_WORDS: &[&str] = &[
    "about", "after", "again", "also", "been", "before", "being", "between",
    "both", "could", "does", "doing", "each", "from", "have", "having",
    "into", "just", "more", "most", "only", "other", "over", "same", "should",
    "some", "such", "than", "that", "their", "them", "then", "there", "these",
    "they", "this", "those", "through", "under", "very", "was", "were",
    "what", "when", "where", "which", "while", "will", "with", "would",
    "your",
];

/// Extracts up to 5 distinct lowercase keywords from `text`.
///
/// Tokens are split on non-alphanumeric boundaries, lowercased, and kept in
/// first-occurrence order (not frequency order). Stop words and tokens of
/// 3 characters or fewer are discarded. Empty input yields an empty vector.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut keywords = Vec::new();

    for raw in text.split(|c: char| !c.is_alphanumeric()) {
        if raw.chars().count() < MIN_TOKEN_CHARS {
            continue;
        }
        let token = raw.to_lowercase();
        if STOP_WORDS.contains(&token.as_str()) {
            continue;
        }
        if seen.insert(token.clone()) {
            keywords.push(token);
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_empty_keywords() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \n\t").is_empty());
    }

    #[test]
    fn test_short_tokens_are_discarded() {
        // every token here is 3 chars or fewer
        assert!(extract_keywords("a an the cat dog web").is_empty());
    }

    #[test]
    fn test_stop_words_are_discarded() {
        let keywords = extract_keywords("they should have been doing onboarding");
        assert_eq!(keywords, vec!["onboarding"]);
    }

    #[test]
    fn test_order_is_first_occurrence_not_frequency() {
        let keywords = extract_keywords("nurses onboarding onboarding onboarding nurses");
        assert_eq!(keywords, vec!["nurses", "onboarding"]);
    }

    #[test]
    fn test_at_most_five_keywords() {
        let keywords = extract_keywords(
            "compliance training modules require detailed documentation, quarterly audits, \
             certification tracking, and escalation procedures",
        );
        assert_eq!(keywords.len(), 5);
        assert_eq!(keywords[0], "compliance");
    }

    #[test]
    fn test_keywords_are_lowercased_and_distinct() {
        let keywords = extract_keywords("Onboarding ONBOARDING onboarding Nurses");
        assert_eq!(keywords, vec!["onboarding", "nurses"]);
    }

    #[test]
    fn test_punctuation_splits_tokens() {
        let keywords = extract_keywords("clinical-skills,assessment;rubric");
        assert_eq!(keywords, vec!["clinical", "skills", "assessment", "rubric"]);
    }
}
