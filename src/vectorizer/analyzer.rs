use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::vectorizer::token::TokenFrequency;

/// word tokens: runs of two or more word characters
static WORD_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("word token pattern"));

/// How a document string is cut into terms before counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Analyzer {
    /// Character n-grams inside word boundaries.
    /// Every word is padded with one space on each side, so edge n-grams
    /// (" th", "he ") are distinct from mid-word ones.
    CharWb { min_n: usize, max_n: usize },
    /// Word n-grams over `\b\w\w+\b` tokens, joined by a single space.
    Word { min_n: usize, max_n: usize },
}

impl Analyzer {
    /// Cut `doc` into its terms, in emission order.
    pub fn analyze(&self, doc: &str) -> Vec<String> {
        match *self {
            Analyzer::CharWb { min_n, max_n } => char_wb_ngrams(doc, min_n, max_n),
            Analyzer::Word { min_n, max_n } => {
                let tokens: Vec<&str> = WORD_TOKEN_RE.find_iter(doc).map(|m| m.as_str()).collect();
                word_ngrams(&tokens, min_n, max_n)
            }
        }
    }

    /// Term counts of `doc`.
    pub fn term_frequency(&self, doc: &str) -> TokenFrequency {
        self.analyze(doc).into_iter().collect()
    }
}

impl fmt::Display for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Analyzer::CharWb { min_n, max_n } => write!(f, "char_wb({min_n}..={max_n})"),
            Analyzer::Word { min_n, max_n } => write!(f, "word({min_n}..={max_n})"),
        }
    }
}

fn char_wb_ngrams(doc: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let mut grams = Vec::new();
    for word in doc.split_whitespace() {
        let padded: Vec<char> = std::iter::once(' ')
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();
        let w_len = padded.len();
        for n in min_n..=max_n {
            let mut offset = 0;
            grams.push(padded[offset..(offset + n).min(w_len)].iter().collect());
            while offset + n < w_len {
                offset += 1;
                grams.push(padded[offset..offset + n].iter().collect());
            }
            // a word shorter than n was emitted whole once; longer n adds nothing new
            if offset == 0 {
                break;
            }
        }
    }
    grams
}

fn word_ngrams(tokens: &[&str], min_n: usize, max_n: usize) -> Vec<String> {
    let mut grams = Vec::new();
    for n in min_n..=max_n {
        if n == 0 || n > tokens.len() {
            continue;
        }
        for window in tokens.windows(n) {
            grams.push(window.join(" "));
        }
    }
    grams
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_wb_pads_word_edges() {
        let a = Analyzer::CharWb { min_n: 3, max_n: 3 };
        assert_eq!(a.analyze("cat"), vec![" ca", "cat", "at "]);
    }

    #[test]
    fn char_wb_short_word_emitted_once() {
        let a = Analyzer::CharWb { min_n: 3, max_n: 5 };
        // " ab " has length 4: n=3 gives two windows, n=4 the whole word, then stop
        assert_eq!(a.analyze("ab"), vec![" ab", "ab ", " ab "]);
        assert_eq!(a.analyze("a"), vec![" a "]);
    }

    #[test]
    fn char_wb_range_over_words() {
        let a = Analyzer::CharWb { min_n: 3, max_n: 4 };
        let grams = a.analyze("hi you");
        assert_eq!(grams, vec![" hi", "hi ", " hi ", " yo", "you", "ou ", " you", "you "]);
    }

    #[test]
    fn word_analyzer_drops_single_chars_and_builds_bigrams() {
        let a = Analyzer::Word { min_n: 1, max_n: 2 };
        let grams = a.analyze("i saw a big cat");
        assert_eq!(grams, vec!["saw", "big", "cat", "saw big", "big cat"]);
    }

    #[test]
    fn word_analyzer_reads_placeholder_inner_word() {
        let a = Analyzer::Word { min_n: 1, max_n: 1 };
        assert_eq!(a.analyze("[mention] hey"), vec!["mention", "hey"]);
    }

    #[test]
    fn empty_document_has_no_terms() {
        assert!(Analyzer::CharWb { min_n: 3, max_n: 5 }.analyze("").is_empty());
        assert!(Analyzer::Word { min_n: 1, max_n: 2 }.analyze("").is_empty());
    }

    #[test]
    fn term_frequency_counts_repeats() {
        let a = Analyzer::Word { min_n: 1, max_n: 1 };
        let freq = a.term_frequency("go go go home");
        assert_eq!(freq.token_count("go"), 3);
        assert_eq!(freq.token_count("home"), 1);
    }
}
