// Keyword extraction — capitalized-phrase matching over topic bodies.
//
// This is a heuristic, not an NLP system: it exists to scatter plausible
// hotspots over auto-generated content. Capitalized words ("Calvin",
// "Cycle") are candidates; consecutive whitespace-separated candidates
// merge into one phrase ("Calvin Cycle"). Stopwords never join a phrase,
// so "The Calvin Cycle" yields "Calvin Cycle". All-caps tokens like "ATP"
// never match because the pattern requires lowercase after the capital.

use std::sync::OnceLock;

use regex_lite::Regex;

/// Capitalized words that never count as keywords.
const STOPWORDS: [&str; 10] = [
    "The", "This", "That", "These", "Those", "When", "Where", "What", "How", "Why",
];

/// Cap on extracted keywords per text.
pub const MAX_KEYWORDS: usize = 10;

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // A single capitalized word: uppercase letter, then lowercase letters
    PATTERN.get_or_init(|| Regex::new(r"\b[A-Z][a-z]+\b").expect("word pattern is valid"))
}

/// Extract candidate keywords from text: every maximal whitespace-separated
/// run of capitalized non-stopword words, deduplicated preserving first
/// occurrence, capped at [`MAX_KEYWORDS`].
pub fn extract_keywords(text: &str) -> Vec<String> {
    // Spans of capitalized words that survive the stopword filter
    let words: Vec<(usize, usize)> = word_pattern()
        .find_iter(text)
        .filter(|found| !STOPWORDS.contains(&found.as_str()))
        .map(|found| (found.start(), found.end()))
        .collect();

    let mut keywords: Vec<String> = Vec::new();
    let mut run: Option<(usize, usize)> = None;

    for (start, end) in words {
        match run {
            // Extend the run when only whitespace separates the words
            Some((run_start, run_end))
                if text[run_end..start].chars().all(char::is_whitespace) =>
            {
                run = Some((run_start, end));
            }
            Some(span) => {
                push_unique(&mut keywords, &text[span.0..span.1]);
                run = Some((start, end));
            }
            None => {
                run = Some((start, end));
            }
        }
    }
    if let Some(span) = run {
        push_unique(&mut keywords, &text[span.0..span.1]);
    }

    keywords.truncate(MAX_KEYWORDS);
    keywords
}

fn push_unique(keywords: &mut Vec<String>, keyword: &str) {
    if !keywords.iter().any(|k| k == keyword) {
        keywords.push(keyword.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_stopword_is_excluded_from_the_phrase() {
        let keywords = extract_keywords("The Calvin Cycle uses ATP and NADPH.");
        assert_eq!(keywords, vec!["Calvin Cycle"]);
    }

    #[test]
    fn test_all_caps_tokens_never_match() {
        let keywords = extract_keywords("ATP and NADPH power the cell.");
        assert!(keywords.is_empty());
    }

    #[test]
    fn test_stopwords_alone_are_dropped() {
        let keywords = extract_keywords("This is about Chlorophyll. That is about Glucose.");
        assert_eq!(keywords, vec!["Chlorophyll", "Glucose"]);
    }

    #[test]
    fn test_stopword_breaks_a_run_in_two() {
        let keywords = extract_keywords("Granite Cliffs When Rivers Flood");
        assert_eq!(keywords, vec!["Granite Cliffs", "Rivers Flood"]);
    }

    #[test]
    fn test_punctuation_breaks_a_run() {
        let keywords = extract_keywords("Alpha Bravo. Charlie Delta");
        assert_eq!(keywords, vec!["Alpha Bravo", "Charlie Delta"]);
    }

    #[test]
    fn test_dedup_preserves_first_occurrence_order() {
        let keywords = extract_keywords("Glucose feeds cells. Starch stores Glucose for later.");
        assert_eq!(keywords, vec!["Glucose", "Starch"]);
    }

    #[test]
    fn test_capped_at_ten() {
        let text = "Alpha x. Bravo x. Cedar x. Delta x. Ember x. Falcon x. \
                    Grove x. Harbor x. Island x. Juniper x. Kestrel x. Lagoon x.";
        let keywords = extract_keywords(text);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0], "Alpha");
        assert_eq!(keywords[9], "Juniper");
    }

    #[test]
    fn test_single_capital_letter_does_not_match() {
        // "A" has no lowercase run after the capital
        let keywords = extract_keywords("A Plant grows.");
        assert_eq!(keywords, vec!["Plant"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_keywords("").is_empty());
    }
}
