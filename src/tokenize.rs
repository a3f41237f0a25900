use once_cell::sync::Lazy;
use regex::Regex;

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").unwrap());

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Compile `pattern` with `\b` and `\w` limited to ASCII word characters,
/// matching the `[A-Za-z0-9_]` word definition used everywhere else.
pub(crate) fn ascii_word_regex(pattern: &str) -> Regex {
    let ascii = pattern
        .replace(r"\b", r"(?-u:\b)")
        .replace(r"\w", r"(?-u:\w)");
    Regex::new(&ascii).unwrap()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Every returned sentence is trimmed and non-empty.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_SPLIT_RE
        .split(text)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercased alphanumeric runs. Punctuation and apostrophes act as separators,
/// so "it's" yields `["it", "s"]`.
pub fn split_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Whitespace-delimited tokens, punctuation attached.
pub fn whitespace_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

// Untrimmed: leading or trailing whitespace each add an empty token, and
// empty text counts as one.
pub(crate) fn whitespace_token_count(text: &str) -> usize {
    WHITESPACE_RE.split(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentences_split_on_punctuation_runs() {
        let sentences = split_sentences("First one. Second?! Third...   Fourth");
        assert_eq!(sentences, vec!["First one", "Second", "Third", "Fourth"]);
    }

    #[test]
    fn sentences_drop_whitespace_only_fragments() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("  ...  !!  ").is_empty());
        assert_eq!(split_sentences(" . a . "), vec!["a"]);
    }

    #[test]
    fn words_are_lowercased_alphanumeric_runs() {
        let words = split_words("Hello, World! It's 2024_final.");
        assert_eq!(words, vec!["hello", "world", "it", "s", "2024_final"]);
    }

    #[test]
    fn words_empty_without_alphanumerics() {
        assert!(split_words("").is_empty());
        assert!(split_words("--- ... !!!").is_empty());
    }

    #[test]
    fn whitespace_tokens_keep_punctuation() {
        assert_eq!(whitespace_tokens("  don't   stop,  now "), vec!["don't", "stop,", "now"]);
        assert_eq!(whitespace_token_count("a\tb\nc"), 3);
    }

    #[test]
    fn whole_text_count_keeps_edge_pieces() {
        assert_eq!(whitespace_token_count("one two\n"), 3);
        assert_eq!(whitespace_token_count("  one two"), 3);
        assert_eq!(whitespace_token_count(" one \n"), 3);
        assert_eq!(whitespace_token_count(""), 1);
    }

    #[test]
    fn ascii_word_boundaries_ignore_accents() {
        let re = ascii_word_regex(r"(?i)\bleverage\b");
        assert_eq!(re.find_iter("éleverage Leverageé leverage").count(), 3);
        assert!(!re.is_match("leverages"));

        let gerund = ascii_word_regex(r"\b\w+ing\b");
        assert_eq!(gerund.find("éating").map(|m| m.as_str()), Some("ating"));
    }
}
