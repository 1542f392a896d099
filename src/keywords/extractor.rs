use crate::keywords::stopwords::is_stopword;
use crate::InputError;
use std::collections::HashMap;

/// Number of keywords reported per page when the caller does not choose
pub const DEFAULT_TOP_N: usize = 10;

/// Tokens must be strictly longer than this to count as keywords
pub const MIN_KEYWORD_LEN: usize = 3;

/// Extracts the `top_n` most frequent keywords from a block of text
///
/// # Algorithm
///
/// 1. Lowercase the text
/// 2. Split on every run of characters outside `[a-z0-9]`
/// 3. Drop tokens of length <= 3 and stopwords
/// 4. Count occurrences and rank by count, highest first
///
/// Words with equal counts keep the order in which they first appear in the
/// text, so the result is the same on every run.
///
/// # Arguments
///
/// * `text` - The text to rank
/// * `top_n` - Maximum number of keywords to return (must be >= 1)
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Up to `top_n` keywords, most frequent first
/// * `Err(InputError::TopN)` - `top_n` was zero
///
/// # Example
///
/// ```
/// use keyword_crawler::keywords::extract_keywords;
///
/// let keywords = extract_keywords("Rust crawler. The crawler is written in Rust, rust!", 2).unwrap();
/// assert_eq!(keywords, vec!["rust".to_string(), "crawler".to_string()]);
/// ```
pub fn extract_keywords(text: &str, top_n: usize) -> Result<Vec<String>, InputError> {
    if top_n == 0 {
        return Err(InputError::TopN(top_n));
    }

    let lowered = text.to_lowercase();

    // (word, count) in first-occurrence order, with an index for lookups
    let mut ranked: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for token in tokenize(&lowered) {
        if token.len() <= MIN_KEYWORD_LEN || is_stopword(token) {
            continue;
        }

        match positions.get(token) {
            Some(&idx) => ranked[idx].1 += 1,
            None => {
                positions.insert(token, ranked.len());
                ranked.push((token, 1));
            }
        }
    }

    // sort_by is stable, so ties stay in first-occurrence order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(ranked
        .into_iter()
        .take(top_n)
        .map(|(word, _)| word.to_string())
        .collect())
}

/// Splits lowercase text into `[a-z0-9]+` tokens
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|token| !token.is_empty())
}
