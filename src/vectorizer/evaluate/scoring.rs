use rayon::prelude::*;
use serde::Serialize;

use crate::utils::math::vector::ZeroSpVec;

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitEntry<K> {
    /// candidate identity
    pub key: K,
    /// cosine similarity to the target, in [0, 1]
    pub score: f64,
    /// number of messages behind the candidate; display metadata only
    pub message_count: u64,
}

/// Structure to store ranking results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hits<K> {
    pub list: Vec<HitEntry<K>>,
}

impl<K> Hits<K> {
    pub fn new(list: Vec<HitEntry<K>>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score.
    /// Stable: exact ties keep their input order.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    /// First `n` entries in current order.
    pub fn top(&self, n: usize) -> &[HitEntry<K>] {
        &self.list[..n.min(self.list.len())]
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitEntry<K>> {
        self.list.iter()
    }
}

/// Score every candidate row against the target row by cosine similarity
/// and rank them.
///
/// `candidates` yields `(key, row, message_count)` in input order; the
/// returned hits are sorted by descending score with ties left in that
/// order. Nothing is dropped or deduplicated.
pub fn rank_by_cosine<'a, K>(target: &ZeroSpVec<f64>, candidates: Vec<(K, &'a ZeroSpVec<f64>, u64)>) -> Hits<K>
where
    K: Send,
{
    let list: Vec<HitEntry<K>> = candidates
        .into_par_iter()
        .map(|(key, row, message_count)| HitEntry {
            key,
            score: target.cosine_similarity(row),
            message_count,
        })
        .collect();
    let mut hits = Hits::new(list);
    hits.sort_by_score_desc();
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(v: &[f64]) -> ZeroSpVec<f64> {
        ZeroSpVec::from(v.to_vec())
    }

    #[test]
    fn ranks_descending() {
        let target = row(&[1.0, 0.0]);
        let a = row(&[0.0, 1.0]);
        let b = row(&[1.0, 0.0]);
        let c = row(&[1.0, 1.0]);
        let hits = rank_by_cosine(&target, vec![("a", &a, 1), ("b", &b, 2), ("c", &c, 3)]);
        let keys: Vec<&str> = hits.iter().map(|h| h.key).collect();
        assert_eq!(keys, vec!["b", "c", "a"]);
        assert!((hits.list[0].score - 1.0).abs() < 1e-12);
        assert_eq!(hits.list[0].message_count, 2);
    }

    #[test]
    fn ties_keep_input_order() {
        let target = row(&[1.0, 1.0]);
        let same = row(&[2.0, 2.0]);
        let lower = row(&[1.0, 0.0]);
        let hits = rank_by_cosine(
            &target,
            vec![("x", &lower, 0), ("p", &same, 0), ("q", &same, 0), ("r", &same, 0)],
        );
        let keys: Vec<&str> = hits.iter().map(|h| h.key).collect();
        assert_eq!(keys, vec!["p", "q", "r", "x"]);
    }

    #[test]
    fn zero_target_scores_every_candidate_zero() {
        let target: ZeroSpVec<f64> = ZeroSpVec::zeros(3);
        let a = row(&[1.0, 2.0, 3.0]);
        let b = row(&[0.0, 0.0, 1.0]);
        let hits = rank_by_cosine(&target, vec![("a", &a, 5), ("b", &b, 7)]);
        assert!(hits.iter().all(|h| h.score == 0.0 && !h.score.is_nan()));
        let keys: Vec<&str> = hits.iter().map(|h| h.key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn top_truncates_view_only() {
        let target = row(&[1.0]);
        let a = row(&[1.0]);
        let hits = rank_by_cosine(&target, vec![("a", &a, 0), ("b", &a, 0)]);
        assert_eq!(hits.top(1).len(), 1);
        assert_eq!(hits.top(10).len(), 2);
        assert_eq!(hits.len(), 2);
    }
}
