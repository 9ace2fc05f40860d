use indexmap::IndexSet;
use num::Num;

use crate::utils::math::vector::ZeroSpVec;
use crate::utils::sort::sort_columns;
use crate::vectorizer::{corpus::Corpus, token::TokenFrequency};

pub trait TFIDFEngine<N>
where
    N: Num,
{
    /// Build the IDF vector over a fixed vocabulary.
    /// # Arguments
    /// * `corpus` - document frequencies of the fitting run
    /// * `vocabulary` - column order; position i is column i
    /// # Returns
    /// * `Vec<N>` - one IDF weight per column
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<Box<str>>) -> Vec<N>;

    /// Project one document onto the vocabulary.
    /// Terms outside the vocabulary are ignored.
    /// # Returns
    /// * `ZeroSpVec<N>` - row of length `vocabulary.len()`
    fn tf_idf_vec(freq: &TokenFrequency, vocabulary: &IndexSet<Box<str>>, idf: &[N]) -> ZeroSpVec<N>;
}

/// Default TF-IDF engine
///
/// - TF: raw term count
/// - IDF: smoothed, `ln((1 + n) / (1 + df)) + 1`, so no term gets a zero weight
/// - each row is scaled to unit L2 norm (zero rows stay zero)
///
/// Implemented for `f32` and `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    pub fn new() -> Self {
        DefaultTFIDFEngine
    }

    #[inline]
    fn smooth_idf(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }

    /// (column, weight) pairs of the in-vocabulary terms, sorted by column
    fn weighted_columns(freq: &TokenFrequency, vocabulary: &IndexSet<Box<str>>, idf: &[f64]) -> (Vec<u32>, Vec<f64>) {
        let mut cols: Vec<u32> = Vec::with_capacity(freq.token_num());
        let mut vals: Vec<f64> = Vec::with_capacity(freq.token_num());
        for (token, count) in freq.iter() {
            if let Some(col) = vocabulary.get_index_of(token) {
                cols.push(col as u32);
                vals.push(count as f64 * idf[col]);
            }
        }
        sort_columns(&mut cols, &mut vals);
        let norm = vals.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            vals.iter_mut().for_each(|v| *v /= norm);
        }
        (cols, vals)
    }
}

impl TFIDFEngine<f64> for DefaultTFIDFEngine {
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<Box<str>>) -> Vec<f64> {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .iter()
            .map(|term| Self::smooth_idf(doc_num, corpus.get_term_count(term)))
            .collect()
    }

    fn tf_idf_vec(freq: &TokenFrequency, vocabulary: &IndexSet<Box<str>>, idf: &[f64]) -> ZeroSpVec<f64> {
        let (cols, vals) = Self::weighted_columns(freq, vocabulary, idf);
        ZeroSpVec::from_sorted_parts(vocabulary.len(), cols.into_iter().map(|c| c as usize).collect(), vals)
    }
}

impl TFIDFEngine<f32> for DefaultTFIDFEngine {
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<Box<str>>) -> Vec<f32> {
        <Self as TFIDFEngine<f64>>::idf_vec(corpus, vocabulary)
            .into_iter()
            .map(|idf| idf as f32)
            .collect()
    }

    fn tf_idf_vec(freq: &TokenFrequency, vocabulary: &IndexSet<Box<str>>, idf: &[f32]) -> ZeroSpVec<f32> {
        let idf: Vec<f64> = idf.iter().map(|&v| v as f64).collect();
        let (cols, vals) = Self::weighted_columns(freq, vocabulary, &idf);
        ZeroSpVec::from_sorted_parts(
            vocabulary.len(),
            cols.into_iter().map(|c| c as usize).collect(),
            vals.into_iter().map(|v| v as f32).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> IndexSet<Box<str>> {
        terms.iter().map(|t| Box::<str>::from(*t)).collect()
    }

    #[test]
    fn smoothed_idf_values() {
        let mut corpus = Corpus::new();
        corpus.add_set(&["a", "b"]);
        corpus.add_set(&["a"]);
        corpus.add_set(&["a"]);
        let idf = <DefaultTFIDFEngine as TFIDFEngine<f64>>::idf_vec(&corpus, &vocab(&["a", "b"]));
        assert!((idf[0] - 1.0).abs() < 1e-12);
        assert!((idf[1] - ((4.0_f64 / 2.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn rows_are_unit_length_and_ignore_oov_terms() {
        let v = vocab(&["a", "b"]);
        let idf = vec![1.0_f64, 2.0];
        let freq: TokenFrequency = ["b", "a", "zzz", "a"].into_iter().collect();
        let row = <DefaultTFIDFEngine as TFIDFEngine<f64>>::tf_idf_vec(&freq, &v, &idf);
        assert_eq!(row.len(), 2);
        let dense = row.to_dense();
        // raw weights (2, 2) -> normalized (1/√2, 1/√2)
        assert!((dense[0] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((dense[1] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn out_of_vocabulary_document_is_zero_row() {
        let v = vocab(&["a"]);
        let freq: TokenFrequency = ["q"].into_iter().collect();
        let row = <DefaultTFIDFEngine as TFIDFEngine<f64>>::tf_idf_vec(&freq, &v, &[1.0]);
        assert_eq!(row.len(), 1);
        assert!(row.is_all_zero());
    }
}
