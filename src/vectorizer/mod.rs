pub mod analyzer;
pub mod corpus;
pub mod evaluate;
pub mod tfidf;
pub mod token;

use std::marker::PhantomData;

use indexmap::IndexSet;
use num::Num;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::{analyzer::Analyzer, corpus::Corpus, tfidf::{DefaultTFIDFEngine, TFIDFEngine}, token::TokenFrequency};

/// Unfitted n-gram TF-IDF vectorizer: how to cut documents into terms and
/// how many documents a term needs to keep a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramVectorizer {
    pub analyzer: Analyzer,
    /// minimum number of documents a term must appear in
    pub min_df: usize,
}

impl NgramVectorizer {
    pub fn new(analyzer: Analyzer, min_df: usize) -> Self {
        Self { analyzer, min_df }
    }

    /// Character n-grams inside word boundaries.
    pub fn char_wb(min_n: usize, max_n: usize, min_df: usize) -> Self {
        Self::new(Analyzer::CharWb { min_n, max_n }, min_df)
    }

    /// Word n-grams.
    pub fn word(min_n: usize, max_n: usize, min_df: usize) -> Self {
        Self::new(Analyzer::Word { min_n, max_n }, min_df)
    }

    /// Fit vocabulary and IDF jointly over `docs` and project every document.
    ///
    /// Rows come back in the order of `docs`. With an empty vocabulary every
    /// row has zero width.
    pub fn fit_transform<N, E, T>(&self, docs: &[T]) -> (FittedVectorizer<N, E>, Vec<ZeroSpVec<N>>)
    where
        N: Num + Copy + Send + Sync,
        E: TFIDFEngine<N> + Send + Sync,
        T: AsRef<str> + Sync,
    {
        let freqs: Vec<TokenFrequency> = docs
            .par_iter()
            .map(|doc| self.analyzer.term_frequency(doc.as_ref()))
            .collect();
        let fitted = FittedVectorizer::from_frequencies(*self, &freqs);
        let rows = freqs.par_iter().map(|freq| fitted.transform_freq(freq)).collect();
        (fitted, rows)
    }
}

/// Fitted vectorizer: vocabulary and IDF frozen by one fitting run.
///
/// Column i means `vocabulary[i]` for every row produced by this value, and
/// for nothing else; rows from different fitted vectorizers are not
/// comparable.
#[derive(Debug, Clone)]
pub struct FittedVectorizer<N = f64, E = DefaultTFIDFEngine>
where
    N: Num + Copy,
    E: TFIDFEngine<N>,
{
    params: NgramVectorizer,
    vocabulary: IndexSet<Box<str>>,
    idf: Vec<N>,
    _marker: PhantomData<E>,
}

impl<N, E> FittedVectorizer<N, E>
where
    N: Num + Copy + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
{
    fn from_frequencies(params: NgramVectorizer, freqs: &[TokenFrequency]) -> Self {
        let corpus: Corpus = freqs.iter().cloned().collect();
        let vocabulary: IndexSet<Box<str>> = corpus
            .terms_with_min_df(params.min_df as u64)
            .into_iter()
            .collect();
        debug!(
            analyzer = %params.analyzer,
            documents = corpus.get_doc_num(),
            seen = corpus.vocab_size(),
            kept = vocabulary.len(),
            "fitted n-gram vocabulary"
        );
        let idf = E::idf_vec(&corpus, &vocabulary);
        Self {
            params,
            vocabulary,
            idf,
            _marker: PhantomData,
        }
    }

    /// Project a document of this run onto the fitted columns.
    pub fn transform(&self, doc: &str) -> ZeroSpVec<N> {
        self.transform_freq(&self.params.analyzer.term_frequency(doc))
    }

    fn transform_freq(&self, freq: &TokenFrequency) -> ZeroSpVec<N> {
        E::tf_idf_vec(freq, &self.vocabulary, &self.idf)
    }

    /// number of columns
    #[inline]
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    #[inline]
    pub fn is_empty_vocabulary(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Column terms in column order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> + '_ {
        self.vocabulary.iter().map(|t| &**t)
    }
}
