//! Sample access in two tiers.
//!
//! Checked: [`Mat::at`] / [`Mat::at_mut`] validate every coordinate against
//! the shape and return a [`MatError`] instead of touching memory.
//!
//! Unchecked: `mat[(row, col, channel)]` and `mat[(b, row, col, channel)]`
//! compute the offset without validating individual axes. The caller must
//! keep every coordinate inside the shape; an out-of-range coordinate may
//! silently address a different sample, or panic if it falls past the end of
//! the buffer. The two-index `(row, col)` form is only offered by the checked
//! tier, where it fails on Mats whose `channels != 1`.
use std::ops::{Index, IndexMut};

use super::shape::MatIndex;
use super::Mat;
use crate::error::{MatError, Result};

/// Iterator over image rows, each `cols * channels` samples long.
pub type Rows<'a> = std::slice::ChunksExact<'a, f32>;
pub type RowsMut<'a> = std::slice::ChunksExactMut<'a, f32>;

impl Mat {
    /// Checked read access.
    ///
    /// ```
    /// use mat_core::{Mat, MatError};
    ///
    /// let m = Mat::zeros(2, 3, 2).unwrap();
    /// assert!(m.at((1, 2, 1)).is_ok());
    /// assert!(matches!(m.at((2, 0, 0)), Err(MatError::OutOfBounds { .. })));
    /// assert!(matches!(
    ///     m.at((0, 0)),
    ///     Err(MatError::InvalidChannelsForOperation { channels: 2 })
    /// ));
    /// ```
    pub fn at<I: MatIndex>(&self, index: I) -> Result<&f32> {
        let offset = index.checked_offset(&self.shape)?;
        Ok(&self.data[offset])
    }

    /// Checked write access.
    pub fn at_mut<I: MatIndex>(&mut self, index: I) -> Result<&mut f32> {
        let offset = index.checked_offset(&self.shape)?;
        Ok(&mut self.data[offset])
    }

    /// All channel samples of the pixel at `(row, col)` in the first image.
    pub fn pixel(&self, row: usize, col: usize) -> Result<&[f32]> {
        let range = self.pixel_range(row, col)?;
        Ok(&self.data[range])
    }

    pub fn pixel_mut(&mut self, row: usize, col: usize) -> Result<&mut [f32]> {
        let range = self.pixel_range(row, col)?;
        Ok(&mut self.data[range])
    }

    /// Samples of image `b` of the batch.
    pub fn batch_slice(&self, b: usize) -> Result<&[f32]> {
        let range = self.batch_range(b)?;
        Ok(&self.data[range])
    }

    pub fn batch_slice_mut(&mut self, b: usize) -> Result<&mut [f32]> {
        let range = self.batch_range(b)?;
        Ok(&mut self.data[range])
    }

    /// Image rows in storage order; a batched Mat yields `batch * rows` rows.
    pub fn rows_iter(&self) -> Rows<'_> {
        self.data.chunks_exact(self.shape.row_len().max(1))
    }

    pub fn rows_iter_mut(&mut self) -> RowsMut<'_> {
        let len = self.shape.row_len().max(1);
        self.data.chunks_exact_mut(len)
    }

    fn pixel_range(&self, row: usize, col: usize) -> Result<std::ops::Range<usize>> {
        if row >= self.shape.rows || col >= self.shape.cols {
            return Err(MatError::OutOfBounds {
                index: vec![row, col],
                shape: self.shape,
            });
        }
        let start = self.shape.offset_unchecked(0, row, col, 0);
        Ok(start..start + self.shape.channels)
    }

    fn batch_range(&self, b: usize) -> Result<std::ops::Range<usize>> {
        if b >= self.shape.batch || self.is_empty() {
            return Err(MatError::OutOfBounds {
                index: vec![b],
                shape: self.shape,
            });
        }
        let len = self.shape.image_len();
        Ok(b * len..(b + 1) * len)
    }
}

impl Index<(usize, usize, usize)> for Mat {
    type Output = f32;

    #[inline]
    fn index(&self, (row, col, channel): (usize, usize, usize)) -> &f32 {
        &self.data[self.shape.offset_unchecked(0, row, col, channel)]
    }
}

impl IndexMut<(usize, usize, usize)> for Mat {
    #[inline]
    fn index_mut(&mut self, (row, col, channel): (usize, usize, usize)) -> &mut f32 {
        let offset = self.shape.offset_unchecked(0, row, col, channel);
        &mut self.data[offset]
    }
}

impl Index<(usize, usize, usize, usize)> for Mat {
    type Output = f32;

    #[inline]
    fn index(&self, (b, row, col, channel): (usize, usize, usize, usize)) -> &f32 {
        &self.data[self.shape.offset_unchecked(b, row, col, channel)]
    }
}

impl IndexMut<(usize, usize, usize, usize)> for Mat {
    #[inline]
    fn index_mut(&mut self, (b, row, col, channel): (usize, usize, usize, usize)) -> &mut f32 {
        let offset = self.shape.offset_unchecked(b, row, col, channel);
        &mut self.data[offset]
    }
}
