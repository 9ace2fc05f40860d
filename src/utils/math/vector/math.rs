use std::{cmp::Ordering, ops::AddAssign};

use num::Num;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// Dot product of two vectors of equal dimension.
    ///
    /// # Arguments
    /// * `other` - the other vector
    ///
    /// # Returns
    /// * `R` - Σ(a_i * b_i)
    #[inline]
    pub fn dot<R>(&self, other: &Self) -> R
    where
        R: Num + AddAssign,
        N: Into<R>,
    {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = R::zero();
        let mut a_it = self.raw_iter();
        let mut b_it = other.raw_iter();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    result += (*va).into() * (*vb).into();
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        result
    }

    /// Squared L2 norm.
    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for (_, val) in self.raw_iter() {
            let val: R = (*val).into();
            result += val * val;
        }
        result
    }

    /// Cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    ///
    /// Defined as 0.0 when either side is the zero vector.
    /// For non-negative vectors the result lies in [0, 1].
    #[inline]
    pub fn cosine_similarity(&self, other: &Self) -> f64
    where
        N: Into<f64>,
    {
        let norm_a: f64 = self.norm_sq();
        let norm_b: f64 = other.norm_sq();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        let dot: f64 = self.dot(other);
        // rounding can push identical vectors a hair above 1
        (dot / (norm_a.sqrt() * norm_b.sqrt())).min(1.0)
    }
}
