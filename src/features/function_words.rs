use indexmap::IndexMap;

use crate::engine::tokenizer::Tokenizer;
use crate::utils::math::vector::ZeroSpVec;
use crate::utils::normalizer::is_placeholder;

/// Relative frequencies of a closed function-word vocabulary.
///
/// The vocabulary is sorted once at construction, so column i names the same
/// word for every document extracted by this value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionWordExtractor {
    /// word -> column
    vocabulary: IndexMap<Box<str>, usize>,
}

impl FunctionWordExtractor {
    /// Vocabulary taken from the tokenizer's stop-word set.
    pub fn from_tokenizer<T>(tokenizer: &T) -> Self
    where
        T: Tokenizer + ?Sized,
    {
        Self::with_vocabulary(&tokenizer.stop_words())
    }

    /// Explicit vocabulary; duplicates are dropped and order is lexicographic.
    pub fn with_vocabulary<S>(words: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        let mut sorted: Vec<&str> = words.iter().map(|w| w.as_ref()).collect();
        sorted.sort_unstable();
        sorted.dedup();
        let vocabulary = sorted
            .into_iter()
            .enumerate()
            .map(|(col, word)| (Box::<str>::from(word), col))
            .collect();
        Self { vocabulary }
    }

    /// number of columns
    #[inline]
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Words in column order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> + '_ {
        self.vocabulary.keys().map(|w| &**w)
    }

    /// Frequency vector of one token sequence.
    ///
    /// Each vocabulary word's count is divided by the number of tokens that
    /// are not structural placeholders. With no such token the result is the
    /// zero vector; its length is always `self.len()`.
    pub fn extract<S>(&self, tokens: &[S]) -> ZeroSpVec<f64>
    where
        S: AsRef<str>,
    {
        let total = tokens.iter().filter(|t| !is_placeholder(t.as_ref())).count();
        if total == 0 {
            return ZeroSpVec::zeros(self.len());
        }

        let mut counts: Vec<u32> = vec![0; self.len()];
        for token in tokens {
            if let Some(&col) = self.vocabulary.get(token.as_ref()) {
                counts[col] += 1;
            }
        }

        let mut inds = Vec::new();
        let mut vals = Vec::new();
        for (col, &count) in counts.iter().enumerate() {
            if count > 0 {
                inds.push(col);
                vals.push(count as f64 / total as f64);
            }
        }
        ZeroSpVec::from_sorted_parts(self.len(), inds, vals)
    }
}
