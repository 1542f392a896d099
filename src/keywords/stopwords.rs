//! Stopword list
//!
//! A closed list of common English function words that are never reported as
//! keywords, however often they occur.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Common English words excluded from keyword candidacy
pub const STOPWORDS: &[&str] = &[
    "the", "and", "for", "that", "with", "this", "from", "which", "your", "have", "will", "are",
    "not", "you", "but", "can", "all", "about", "their", "there", "when", "what", "where", "who",
    "why", "been", "here", "such", "into", "they", "them", "then", "were", "also", "more", "most",
    "some", "does", "than", "other", "these", "those", "like", "just", "make", "made", "each",
    "many", "much", "because", "could", "would", "should", "very", "within", "without", "still",
    "over", "under", "again", "after", "before", "while", "being", "else", "ever", "every",
    "upon", "once", "said", "tell", "told", "good", "bad", "another", "few", "own", "use",
    "used", "using", "uses",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Returns true if `word` (already lowercase) is a stopword
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}
