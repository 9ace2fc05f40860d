use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::token::TokenFrequency;

/// Document-frequency statistics of one fitting run.
///
/// Keeps only
/// - the number of documents added
/// - for every term, the number of documents it appears in
///
/// Base data for IDF and for min-df vocabulary pruning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    doc_num: u64,
    #[serde(with = "indexmap::map::serde_seq")]
    term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Add one document given its distinct terms.
    pub fn add_set<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.doc_num += 1;
        for term in terms {
            match self.term_counts.get_mut(term.as_ref()) {
                Some(count) => *count += 1,
                None => {
                    self.term_counts.insert(term.as_ref().into(), 1);
                }
            }
        }
    }

    /// Add one document from its term counts.
    pub fn add_freq(&mut self, freq: &TokenFrequency) {
        self.add_set(&freq.token_set_ref_str());
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing `term`.
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms seen.
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// Terms appearing in at least `min_df` documents, sorted lexicographically.
    pub fn terms_with_min_df(&self, min_df: u64) -> Vec<Box<str>> {
        let mut terms: Vec<Box<str>> = self
            .term_counts
            .iter()
            .filter(|(_, &count)| count >= min_df)
            .map(|(term, _)| term.clone())
            .collect();
        terms.sort_unstable();
        terms
    }
}

impl FromIterator<TokenFrequency> for Corpus {
    fn from_iter<I: IntoIterator<Item = TokenFrequency>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for freq in iter {
            corpus.add_freq(&freq);
        }
        corpus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_documents_not_occurrences() {
        let mut corpus = Corpus::new();
        corpus.add_set(&["a", "b"]);
        corpus.add_set(&["a"]);
        corpus.add_set(&["a", "c"]);
        assert_eq!(corpus.get_doc_num(), 3);
        assert_eq!(corpus.get_term_count("a"), 3);
        assert_eq!(corpus.get_term_count("b"), 1);
        assert_eq!(corpus.get_term_count("zz"), 0);
        assert_eq!(corpus.vocab_size(), 3);
    }

    #[test]
    fn min_df_filter_is_sorted() {
        let mut corpus = Corpus::new();
        corpus.add_set(&["z", "b", "a"]);
        corpus.add_set(&["z", "a"]);
        corpus.add_set(&["b"]);
        let kept = corpus.terms_with_min_df(2);
        let kept: Vec<&str> = kept.iter().map(|t| &**t).collect();
        assert_eq!(kept, vec!["a", "b", "z"]);
        assert!(corpus.terms_with_min_df(4).is_empty());
    }
}
