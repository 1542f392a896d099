//! Keyword extraction module
//!
//! Ranks the most frequent non-trivial words of a block of text. The ranking
//! is plain term frequency over lowercase ASCII alphanumeric tokens, with a
//! fixed English stopword list filtered out.

mod extractor;
mod stopwords;

pub use extractor::{extract_keywords, DEFAULT_TOP_N, MIN_KEYWORD_LEN};
pub use stopwords::{is_stopword, STOPWORDS};
