use std::collections::BTreeSet;

use regex::Regex;

/// Splits raw text into the distinct words to be indexed.
///
/// Implementations must only emit words whose characters fit a single byte
/// slot: trie edges are labeled with one byte each.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> BTreeSet<String>;

    fn name(&self) -> &str;
}

/// Delimiter-class tokenizer: splits on a fixed set of punctuation and
/// whitespace bytes and keeps everything between unchanged (no case folding,
/// no stemming).
pub struct DelimiterTokenizer {
    delimiters: Regex,
    max_token_len: usize,
}

// One class, applied per byte: ! ? ' tab newline space , . : -
const DELIMITER_CLASS: &str = r"[!?'\t\n ,.:-]";

impl DelimiterTokenizer {
    pub fn new(max_token_len: usize) -> Self {
        DelimiterTokenizer {
            delimiters: Regex::new(DELIMITER_CLASS).expect("delimiter class compiles"),
            max_token_len,
        }
    }
}

impl Default for DelimiterTokenizer {
    fn default() -> Self {
        DelimiterTokenizer::new(255)
    }
}

impl Tokenizer for DelimiterTokenizer {
    fn tokenize(&self, text: &str) -> BTreeSet<String> {
        self.delimiters
            .split(text)
            .filter(|token| !token.is_empty())
            // Words with multi-byte characters cannot be trie labels.
            .filter(|token| token.is_ascii())
            .filter(|token| token.len() <= self.max_token_len)
            .map(str::to_owned)
            .collect()
    }

    fn name(&self) -> &str {
        "delimiter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        DelimiterTokenizer::default()
            .tokenize(text)
            .into_iter()
            .collect()
    }

    #[test]
    fn splits_on_the_delimiter_class() {
        assert_eq!(
            words("hello, world: this-is fine.\nnew!line?'quote'"),
            vec!["fine", "hello", "is", "line", "new", "quote", "this", "world"]
        );
    }

    #[test]
    fn duplicates_collapse_to_distinct_words() {
        assert_eq!(words("the cat and the dog and the cat"), vec!["and", "cat", "dog", "the"]);
    }

    #[test]
    fn empty_tokens_are_dropped() {
        assert!(words("...,,,   \n\n").is_empty());
        assert_eq!(words("  spaced  out  "), vec!["out", "spaced"]);
    }

    #[test]
    fn non_ascii_tokens_are_dropped() {
        assert_eq!(words("naïve plain café"), vec!["plain"]);
    }

    #[test]
    fn overlong_tokens_are_dropped() {
        let tokenizer = DelimiterTokenizer::new(5);
        let tokens = tokenizer.tokenize("short toolongtoken ok");
        assert_eq!(
            tokens.into_iter().collect::<Vec<_>>(),
            vec!["ok", "short"]
        );
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(words("Cat cat"), vec!["Cat", "cat"]);
    }
}
