//! Shape metadata and coordinate → offset math.
//!
//! Samples are stored row-major with the channel as the fastest-varying
//! index and an optional leading batch dimension:
//!
//! ```text
//! offset = ((b * rows + row) * cols + col) * channels + channel
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MatError, Result};

/// Extent of a [`Mat`](crate::Mat) along its four axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub batch: usize,
    pub rows: usize,
    pub cols: usize,
    pub channels: usize,
}

impl Shape {
    /// Shape of the empty Mat: no rows, no columns, no channels.
    pub const EMPTY: Shape = Shape {
        batch: 1,
        rows: 0,
        cols: 0,
        channels: 0,
    };

    /// Single-image shape (`batch == 1`).
    pub const fn new(rows: usize, cols: usize, channels: usize) -> Self {
        Self::batched(1, rows, cols, channels)
    }

    pub const fn batched(batch: usize, rows: usize, cols: usize, channels: usize) -> Self {
        Self {
            batch,
            rows,
            cols,
            channels,
        }
    }

    /// Reject non-positive extents and sample counts that overflow `usize`.
    pub fn validated(self) -> Result<Self> {
        let positive = self.batch > 0 && self.rows > 0 && self.cols > 0 && self.channels > 0;
        if positive && self.checked_len().is_some() {
            Ok(self)
        } else {
            Err(self.invalid())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of samples, `batch * rows * cols * channels`.
    ///
    /// Saturates at `usize::MAX` for shapes that [`Shape::validated`] rejects.
    #[inline]
    pub fn len(&self) -> usize {
        self.batch.saturating_mul(self.image_len())
    }

    /// Samples in one image of the batch.
    #[inline]
    pub fn image_len(&self) -> usize {
        self.rows
            .saturating_mul(self.cols)
            .saturating_mul(self.channels)
    }

    /// Samples in one image row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.cols.saturating_mul(self.channels)
    }

    pub fn checked_len(&self) -> Option<usize> {
        self.batch
            .checked_mul(self.rows)?
            .checked_mul(self.cols)?
            .checked_mul(self.channels)
    }

    /// Linear offset of a coordinate. Coordinates are not validated.
    #[inline]
    pub fn offset_unchecked(&self, b: usize, row: usize, col: usize, channel: usize) -> usize {
        ((b * self.rows + row) * self.cols + col) * self.channels + channel
    }

    /// Linear offset of a coordinate after validating every axis.
    pub fn offset(&self, b: usize, row: usize, col: usize, channel: usize) -> Result<usize> {
        if b < self.batch && row < self.rows && col < self.cols && channel < self.channels {
            Ok(self.offset_unchecked(b, row, col, channel))
        } else {
            Err(MatError::OutOfBounds {
                index: vec![b, row, col, channel],
                shape: *self,
            })
        }
    }

    pub(crate) fn invalid(&self) -> MatError {
        MatError::InvalidDimensions {
            batch: self.batch,
            rows: self.rows,
            cols: self.cols,
            channels: self.channels,
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.batch != 1 {
            write!(f, "{}x", self.batch)?;
        }
        write!(f, "{}x{}x{}", self.rows, self.cols, self.channels)
    }
}

/// Coordinate accepted by the checked accessors.
///
/// - `(row, col)`: single-channel Mats only; any other channel count fails
///   with [`MatError::InvalidChannelsForOperation`].
/// - `(row, col, channel)`: first image of the batch.
/// - `(b, row, col, channel)`: explicit batch index.
pub trait MatIndex: Copy {
    fn checked_offset(self, shape: &Shape) -> Result<usize>;
}

impl MatIndex for (usize, usize) {
    fn checked_offset(self, shape: &Shape) -> Result<usize> {
        if shape.channels != 1 {
            return Err(MatError::InvalidChannelsForOperation {
                channels: shape.channels,
            });
        }
        let (row, col) = self;
        shape.offset(0, row, col, 0).map_err(|_| MatError::OutOfBounds {
            index: vec![row, col],
            shape: *shape,
        })
    }
}

impl MatIndex for (usize, usize, usize) {
    fn checked_offset(self, shape: &Shape) -> Result<usize> {
        let (row, col, channel) = self;
        shape
            .offset(0, row, col, channel)
            .map_err(|_| MatError::OutOfBounds {
                index: vec![row, col, channel],
                shape: *shape,
            })
    }
}

impl MatIndex for (usize, usize, usize, usize) {
    fn checked_offset(self, shape: &Shape) -> Result<usize> {
        let (b, row, col, channel) = self;
        shape.offset(b, row, col, channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_channel_fastest() {
        let s = Shape::batched(2, 2, 3, 2);
        assert_eq!(s.offset_unchecked(0, 0, 0, 1), 1);
        assert_eq!(s.offset_unchecked(0, 0, 1, 0), 2);
        assert_eq!(s.offset_unchecked(0, 1, 0, 0), 6);
        assert_eq!(s.offset_unchecked(1, 0, 0, 0), 12);
        assert_eq!(s.offset_unchecked(1, 1, 2, 1), s.len() - 1);
    }

    #[test]
    fn validation_rejects_zero_extents() {
        assert!(Shape::new(1, 1, 1).validated().is_ok());
        for s in [
            Shape::new(0, 1, 1),
            Shape::new(1, 0, 1),
            Shape::new(1, 1, 0),
            Shape::batched(0, 1, 1, 1),
        ] {
            assert!(matches!(
                s.validated(),
                Err(MatError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn validation_rejects_overflowing_len() {
        let s = Shape::new(usize::MAX, 2, 1);
        assert!(s.validated().is_err());
        assert_eq!(s.checked_len(), None);
    }

    #[test]
    fn lengths_saturate_instead_of_overflowing() {
        let s = Shape::batched(2, usize::MAX, 2, 1);
        assert_eq!(s.len(), usize::MAX);
        assert_eq!(s.image_len(), usize::MAX);
        assert_eq!(Shape::new(1, usize::MAX, 3).row_len(), usize::MAX);
        assert!(!s.is_empty());
        assert!(Shape::new(usize::MAX, 0, 4).is_empty());
    }

    #[test]
    fn two_index_form_requires_single_channel() {
        let s = Shape::new(2, 2, 3);
        assert_eq!(
            (0usize, 0usize).checked_offset(&s),
            Err(MatError::InvalidChannelsForOperation { channels: 3 })
        );
        let mono = Shape::new(2, 2, 1);
        assert_eq!((1usize, 1usize).checked_offset(&mono), Ok(3));
        assert!(matches!(
            (2usize, 0usize).checked_offset(&mono),
            Err(MatError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn display_omits_unit_batch() {
        assert_eq!(Shape::new(3, 5, 2).to_string(), "3x5x2");
        assert_eq!(Shape::batched(4, 3, 5, 2).to_string(), "4x3x5x2");
    }
}
