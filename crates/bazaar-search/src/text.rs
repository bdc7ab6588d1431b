//! Query/text matching and snippet helpers.

use regex::Regex;

/// Case-folded match predicates for one query, compiled once and applied to
/// many candidate names.
#[derive(Debug)]
pub struct QueryMatcher {
    query_folded: String,
    word_prefix: Option<Regex>,
}

impl QueryMatcher {
    /// Build a matcher for a query. Regex metacharacters in the query are
    /// escaped, never interpreted.
    pub fn new(query: &str) -> Self {
        let word_prefix = Regex::new(&format!(r"(?i)\b{}", regex::escape(query))).ok();
        Self {
            query_folded: query.to_lowercase(),
            word_prefix,
        }
    }

    /// Name starts exactly with the query, case-folded.
    pub fn is_prefix(&self, name: &str) -> bool {
        name.to_lowercase().starts_with(&self.query_folded)
    }

    /// Query occurs at a word boundary inside the name.
    pub fn is_word_prefix(&self, name: &str) -> bool {
        self.word_prefix.as_ref().is_some_and(|re| re.is_match(name))
    }

    /// Query occurs anywhere in the name, case-folded.
    pub fn is_substring(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.query_folded)
    }
}

/// Char index of the first case-folded occurrence of `needle` in `text`,
/// or `None`.
fn find_fold(text: &str, needle: &str) -> Option<usize> {
    let haystack: Vec<char> = text.to_lowercase().chars().collect();
    // Case folding can change the char count for exotic codepoints; fall
    // back to no match rather than misaligning snippet boundaries.
    if haystack.len() != text.chars().count() {
        return None;
    }
    let needle: Vec<char> = needle.to_lowercase().chars().collect();
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
}

/// Description excerpt centered on the first query occurrence, `radius`
/// chars either side, ellipsized at truncation boundaries. Falls back to a
/// leading excerpt when the query does not occur.
pub fn snippet_centered(text: &str, query: &str, radius: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let pos = find_fold(text, query).unwrap_or(0);
    let query_len = query.chars().count();

    let start = pos.saturating_sub(radius);
    let end = (pos + query_len + radius).min(chars.len());

    let mut snippet = String::new();
    if start > 0 {
        snippet.push('…');
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push('…');
    }
    snippet
}

/// Plain prefix truncation to `max` chars, ellipsized when cut.
pub fn snippet_prefix(text: &str, max: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max {
        return text.to_string();
    }
    let mut snippet: String = chars[..max].iter().collect();
    snippet.push('…');
    snippet
}
