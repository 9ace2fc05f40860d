use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{AttrResult, AttributionError};
use crate::utils::math::vector::ZeroSpVec;

/// The three fingerprint families, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureFamily {
    CharNgram,
    WordNgram,
    FunctionWord,
}

impl fmt::Display for FeatureFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatureFamily::CharNgram => "character n-gram",
            FeatureFamily::WordNgram => "word n-gram",
            FeatureFamily::FunctionWord => "function word",
        };
        f.write_str(name)
    }
}

/// One family's rows, all of width `width`.
#[derive(Debug, Clone)]
pub struct FeatureBlock {
    pub family: FeatureFamily,
    pub width: usize,
    pub rows: Vec<ZeroSpVec<f64>>,
}

impl FeatureBlock {
    pub fn new(family: FeatureFamily, width: usize, rows: Vec<ZeroSpVec<f64>>) -> Self {
        Self { family, width, rows }
    }
}

/// Combined sparse matrix: candidate rows in input order, target row last.
///
/// Every row has width `n_cols`, and `layout` says which column range
/// belongs to which family.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    rows: Vec<ZeroSpVec<f64>>,
    n_cols: usize,
    layout: Vec<(FeatureFamily, Range<usize>)>,
}

impl FeatureMatrix {
    /// Concatenate blocks column-wise, in the order given.
    ///
    /// # Errors
    /// `DimensionMismatch` when blocks disagree on row count or a row's
    /// width differs from its block's declared width.
    pub fn hstack(blocks: Vec<FeatureBlock>) -> AttrResult<Self> {
        let n_rows = blocks.first().map_or(0, |b| b.rows.len());
        let mut layout = Vec::with_capacity(blocks.len());
        let mut n_cols = 0;
        for block in &blocks {
            if block.rows.len() != n_rows {
                return Err(AttributionError::DimensionMismatch(format!(
                    "{} block has {} rows, expected {}",
                    block.family,
                    block.rows.len(),
                    n_rows
                )));
            }
            if let Some((i, row)) = block.rows.iter().enumerate().find(|(_, r)| r.len() != block.width) {
                return Err(AttributionError::DimensionMismatch(format!(
                    "{} row {} has width {}, expected {}",
                    block.family,
                    i,
                    row.len(),
                    block.width
                )));
            }
            layout.push((block.family, n_cols..n_cols + block.width));
            n_cols += block.width;
        }

        let mut rows: Vec<ZeroSpVec<f64>> = (0..n_rows).map(|_| ZeroSpVec::new()).collect();
        for block in &blocks {
            for (row, part) in rows.iter_mut().zip(&block.rows) {
                row.hstack(part);
            }
        }
        Ok(Self { rows, n_cols, layout })
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn rows(&self) -> &[ZeroSpVec<f64>] {
        &self.rows
    }

    /// Column range of `family`, if it is part of the matrix.
    pub fn columns_of(&self, family: FeatureFamily) -> Option<Range<usize>> {
        self.layout
            .iter()
            .find(|(f, _)| *f == family)
            .map(|(_, range)| range.clone())
    }

    pub fn layout(&self) -> &[(FeatureFamily, Range<usize>)] {
        &self.layout
    }

    /// The last row.
    pub fn target_row(&self) -> Option<&ZeroSpVec<f64>> {
        self.rows.last()
    }

    /// Every row but the last.
    pub fn candidate_rows(&self) -> &[ZeroSpVec<f64>] {
        match self.rows.split_last() {
            Some((_, candidates)) => candidates,
            None => &[],
        }
    }
}
