pub mod math;

use std::fmt::{self, Debug};
use std::ops::Index;

use num::Num;

/// ZeroSpVec is a sparse vector that treats zero elements as implicit.
/// It keeps `indices` and `values` side by side:
/// indices hold the logical position of each stored element,
/// values hold the element itself.
///
/// Stored elements are guaranteed to be in ascending index order.
pub struct ZeroSpVec<N>
where N: Num
{
    inds: Vec<usize>,
    vals: Vec<N>,
    len: usize,
    zero: N,
}

impl<N> ZeroSpVec<N>
where N: Num
{
    #[inline]
    pub fn new() -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len: 0,
            zero: N::zero(),
        }
    }

    /// `cap` is the expected number of non-zero elements.
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        ZeroSpVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            len: 0,
            zero: N::zero(),
        }
    }

    /// All-zero vector of logical length `len`.
    #[inline]
    pub fn zeros(len: usize) -> Self {
        let mut vec = Self::new();
        vec.len = len;
        vec
    }

    /// Build from already sorted parts.
    ///
    /// # Arguments
    /// * `len` - logical dimension
    /// * `inds` - strictly ascending indices, all `< len`
    /// * `vals` - values aligned with `inds`; zeros are dropped
    pub fn from_sorted_parts(len: usize, inds: Vec<usize>, vals: Vec<N>) -> Self {
        debug_assert_eq!(inds.len(), vals.len(), "indices and values must align");
        debug_assert!(inds.windows(2).all(|w| w[0] < w[1]), "indices must be strictly ascending");
        debug_assert!(inds.last().map_or(true, |&i| i < len), "index out of bounds");
        let mut vec = Self::with_capacity(inds.len());
        for (ind, val) in inds.into_iter().zip(vals) {
            if val != N::zero() {
                vec.inds.push(ind);
                vec.vals.push(val);
            }
        }
        vec.len = len;
        vec
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn is_all_zero(&self) -> bool {
        self.inds.is_empty()
    }

    /// Append one element at the end; zeros only extend the dimension.
    #[inline]
    pub fn push(&mut self, elem: N) {
        if elem != N::zero() {
            self.inds.push(self.len);
            self.vals.push(elem);
        }
        self.len += 1;
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&index) {
            Ok(pos) => Some(&self.vals[pos]),
            Err(_) => Some(&self.zero),
        }
    }

    /// Concatenate `other` after `self`.
    /// Indices of `other` are shifted by the current dimension.
    pub fn hstack(&mut self, other: &Self)
    where
        N: Copy,
    {
        let offset = self.len;
        self.inds.reserve(other.nnz());
        self.vals.reserve(other.nnz());
        for (ind, val) in other.raw_iter() {
            self.inds.push(ind + offset);
            self.vals.push(*val);
        }
        self.len += other.len;
    }

    #[inline]
    pub fn iter(&self) -> ZeroSpVecIter<'_, N> {
        ZeroSpVecIter {
            vec: self,
            pos: 0,
        }
    }

    /// Iterate stored elements only, as `(index, &value)` in ascending index order.
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, &N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter())
    }

    /// Dense copy.
    pub fn to_dense(&self) -> Vec<N>
    where
        N: Copy,
    {
        let mut dense: Vec<N> = (0..self.len).map(|_| N::zero()).collect();
        for (ind, val) in self.raw_iter() {
            dense[ind] = *val;
        }
        dense
    }
}

impl<N> From<Vec<N>> for ZeroSpVec<N>
where N: Num
{
    #[inline]
    fn from(vec: Vec<N>) -> Self {
        let mut zero_sp_vec = ZeroSpVec::with_capacity(vec.len());
        for entry in vec {
            zero_sp_vec.push(entry);
        }
        zero_sp_vec
    }
}

impl<N> Clone for ZeroSpVec<N>
where N: Num + Clone
{
    #[inline]
    fn clone(&self) -> Self {
        ZeroSpVec {
            inds: self.inds.clone(),
            vals: self.vals.clone(),
            len: self.len,
            zero: N::zero(),
        }
    }
}

impl<N> PartialEq for ZeroSpVec<N>
where N: Num
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.inds == other.inds && self.vals == other.vals
    }
}

impl<N> Default for ZeroSpVec<N>
where N: Num
{
    #[inline]
    fn default() -> Self {
        ZeroSpVec::new()
    }
}

impl<N> Index<usize> for ZeroSpVec<N>
where N: Num
{
    type Output = N;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(val) => val,
            None => panic!("index {index} out of bounds for ZeroSpVec of len {}", self.len),
        }
    }
}

impl<N: Num + Debug> Debug for ZeroSpVec<N> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "ZeroSpVec(len: {}, {:?})", self.len, self.raw_iter().collect::<Vec<_>>())
        } else {
            f.debug_list().entries(self.iter()).finish()
        }
    }
}

pub struct ZeroSpVecIter<'a, N>
where N: Num
{
    vec: &'a ZeroSpVec<N>,
    pos: usize,
}

impl<'a, N> Iterator for ZeroSpVecIter<'a, N>
where N: Num
{
    type Item = &'a N;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.vec.get(self.pos).map(|val| {
            self.pos += 1;
            val
        })
    }
}
