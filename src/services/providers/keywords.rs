use std::collections::HashSet;

use regex::Regex;

use crate::services::providers::KeywordExtractor;

/// Tokens shorter than this carry too little meaning to count as keywords
const MIN_KEYWORD_LEN: usize = 3;

const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "and", "any", "are",
    "around", "because", "been", "before", "being", "below", "between", "both", "but",
    "can", "could", "did", "does", "doing", "down", "during", "each", "even", "ever",
    "every", "few", "for", "from", "further", "get", "gets", "had", "has", "have",
    "having", "her", "here", "hers", "herself", "him", "himself", "his", "how", "into",
    "its", "itself", "just", "like", "many", "may", "more", "most", "much", "must",
    "myself", "never", "nor", "not", "now", "off", "once", "one", "only", "other",
    "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should", "some",
    "still", "such", "than", "that", "the", "their", "theirs", "them", "themselves",
    "then", "there", "these", "they", "this", "those", "through", "too", "under",
    "until", "upon", "very", "want", "was", "were", "what", "when", "where", "which",
    "while", "who", "whom", "whose", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves", "movie", "movies",
    "film", "films", "story", "something", "someone",
];

/// Lower-cases text, splits it into words and drops stop words, short tokens and numbers
pub struct StopwordExtractor {
    word: Regex,
    stop_words: HashSet<&'static str>,
}

impl Default for StopwordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl StopwordExtractor {
    pub fn new() -> Self {
        Self {
            // Letters and digits, with apostrophes allowed inside a word
            word: Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}\p{N}]+)*").expect("valid word pattern"),
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    fn is_keyword(&self, token: &str) -> bool {
        token.chars().count() >= MIN_KEYWORD_LEN
            && !token.chars().all(|c| c.is_ascii_digit())
            && !self.stop_words.contains(token)
    }
}

impl KeywordExtractor for StopwordExtractor {
    fn extract_keywords(&self, text: &str) -> HashSet<String> {
        let lowered = text.to_lowercase();
        self.word
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| self.is_keyword(token))
            .map(str::to_string)
            .collect()
    }
}
