use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TokenFrequency
/// Occurrence counts of the terms (n-grams) of one document.
/// Base data for the TF part of TF-IDF.
///
/// # Examples
/// ```
/// use authorship_vectorizer::TokenFrequency;
/// let mut freq = TokenFrequency::new();
/// freq.add_tokens(&["the cat", "cat", "the cat"]);
/// assert_eq!(freq.token_count("the cat"), 2);
/// assert_eq!(freq.token_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// add one occurrence of `token`
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        match self.token_count.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.token_count.insert(token.to_string(), 1);
            }
        }
        self.total_token_count += 1;
        self
    }

    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Count of `token`, 0 when absent.
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Total number of occurrences added.
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// Number of distinct tokens.
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    /// Distinct tokens in first-seen order.
    #[inline]
    pub fn token_set_ref_str(&self) -> Vec<&str> {
        self.token_count.keys().map(|s| s.as_str()).collect()
    }

    /// `(token, count)` pairs in first-seen order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.token_count.iter().map(|(token, &count)| (token.as_str(), count))
    }
}

impl<T> FromIterator<T> for TokenFrequency
where
    T: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut freq = TokenFrequency::new();
        for token in iter {
            freq.add_token(token.as_ref());
        }
        freq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_totals() {
        let freq: TokenFrequency = ["a", "b", "a", "c", "a"].into_iter().collect();
        assert_eq!(freq.token_count("a"), 3);
        assert_eq!(freq.token_count("z"), 0);
        assert_eq!(freq.token_sum(), 5);
        assert_eq!(freq.token_num(), 3);
        assert_eq!(freq.token_set_ref_str(), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_document() {
        let freq = TokenFrequency::new();
        assert_eq!(freq.token_num(), 0);
        assert_eq!(freq.token_sum(), 0);
    }
}
