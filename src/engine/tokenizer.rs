use std::collections::HashSet;
use std::fmt;

use rayon::prelude::*;
use rust_stemmers::{Algorithm, Stemmer};
use stop_words::LANGUAGE;

use crate::utils::normalizer::is_placeholder;

/// Text-to-tokens capability consumed by the pipeline.
///
/// Implementations map one cleaned string to its ordered lemma sequence with
/// whitespace-only and punctuation-only tokens removed, and expose the closed
/// stop-word vocabulary of their language model.
///
/// The same input must always produce the same output, and documents must be
/// processed independently of each other.
pub trait Tokenizer: Send + Sync {
    /// Ordered lemmas of one cleaned document.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Closed stop-word set of the underlying language model (any order).
    fn stop_words(&self) -> Vec<String>;

    /// Tokenize a batch. Output is aligned positionally with `texts`.
    ///
    /// Documents are independent, so the default runs them on the rayon pool.
    fn tokenize_batch(&self, texts: &[String]) -> Vec<Vec<String>> {
        texts.par_iter().map(|text| self.tokenize(text)).collect()
    }
}

/// Split one whitespace chunk into word pieces.
/// Placeholders stay whole; anything else splits on non-letters and
/// punctuation-only leftovers vanish.
fn split_chunk(chunk: &str, out: &mut Vec<String>, mut lemma: impl FnMut(&str) -> String) {
    if is_placeholder(chunk) {
        out.push(chunk.to_string());
        return;
    }
    for piece in chunk.split(|c: char| !c.is_alphabetic()) {
        if !piece.is_empty() {
            out.push(lemma(piece));
        }
    }
}

/// English tokenizer backed by the Snowball stemmer.
///
/// Stop words are kept verbatim (they are the function-word vocabulary and
/// must match it exactly); every other word is reduced to its base form.
pub struct SnowballLemmatizer {
    stemmer: Stemmer,
    stop_words: HashSet<String>,
}

impl SnowballLemmatizer {
    /// English model with the Stopwords ISO English list.
    pub fn english() -> Self {
        let stop_words = stop_words::get(LANGUAGE::English)
            .iter()
            .map(|w| w.to_string().to_lowercase())
            .collect();
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            stop_words,
        }
    }

    fn lemma(&self, word: &str) -> String {
        if self.stop_words.contains(word) {
            word.to_string()
        } else {
            self.stemmer.stem(word).into_owned()
        }
    }
}

impl Default for SnowballLemmatizer {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Debug for SnowballLemmatizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballLemmatizer")
            .field("stop_words", &self.stop_words.len())
            .finish()
    }
}

impl Tokenizer for SnowballLemmatizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            split_chunk(chunk, &mut tokens, |w| self.lemma(w));
        }
        tokens
    }

    fn stop_words(&self) -> Vec<String> {
        self.stop_words.iter().cloned().collect()
    }
}

/// Lightweight tokenizer: whitespace split, no lemmatization.
///
/// Useful when text is already lemmatized upstream, and as a deterministic
/// stand-in for the full model in tests.
#[derive(Debug, Clone, Default)]
pub struct WhitespaceTokenizer {
    stop_words: Vec<String>,
}

impl WhitespaceTokenizer {
    pub fn new<T>(stop_words: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        Self {
            stop_words: stop_words.iter().map(|w| w.as_ref().to_string()).collect(),
        }
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            split_chunk(chunk, &mut tokens, str::to_string);
        }
        tokens
    }

    fn stop_words(&self) -> Vec<String> {
        self.stop_words.clone()
    }
}
