//! Owned, densely packed multi-channel `f32` buffer.
//!
//! A [`Mat`] holds `batch * rows * cols * channels` samples in one contiguous
//! `Vec<f32>`, row-major with the channel as the fastest-varying index (see
//! [`Shape`]). Every Mat owns its buffer: `clone` deep-copies, moves transfer
//! ownership, and no two Mats ever alias the same samples.
mod access;
mod eq;
mod ops;
mod shape;

pub use self::access::{Rows, RowsMut};
pub use self::eq::Tolerance;
pub use self::shape::{MatIndex, Shape};

use crate::error::{MatError, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Dense row-major tensor of `f32` samples.
///
/// `Mat::default()` is the empty Mat: zero rows, columns and channels and no
/// allocated buffer. It is a valid value, distinct from any constructed Mat.
#[derive(Clone, Debug, Default)]
pub struct Mat {
    shape: Shape,
    data: Vec<f32>,
}

impl Mat {
    /// Zero-initialized `rows × cols × channels` Mat.
    pub fn new(rows: usize, cols: usize, channels: usize) -> Result<Self> {
        Self::filled(rows, cols, channels, 0.0)
    }

    /// Mat with every sample set to `value`.
    pub fn filled(rows: usize, cols: usize, channels: usize, value: f32) -> Result<Self> {
        Self::batched(1, rows, cols, channels, value)
    }

    /// `batch` images of `rows × cols × channels` packed back to back.
    pub fn batched(
        batch: usize,
        rows: usize,
        cols: usize,
        channels: usize,
        value: f32,
    ) -> Result<Self> {
        let shape = Shape::batched(batch, rows, cols, channels).validated()?;
        Ok(Self {
            shape,
            data: vec![value; shape.len()],
        })
    }

    pub fn zeros(rows: usize, cols: usize, channels: usize) -> Result<Self> {
        Self::filled(rows, cols, channels, 0.0)
    }

    pub fn ones(rows: usize, cols: usize, channels: usize) -> Result<Self> {
        Self::filled(rows, cols, channels, 1.0)
    }

    /// Zero-filled Mat with the same shape as `self`.
    pub fn zeros_like(&self) -> Self {
        Self {
            shape: self.shape,
            data: vec![0.0; self.data.len()],
        }
    }

    /// Adopt `data` as the sample buffer of a single-image Mat.
    pub fn from_vec(rows: usize, cols: usize, channels: usize, data: Vec<f32>) -> Result<Self> {
        Self::from_vec_batched(1, rows, cols, channels, data)
    }

    /// Adopt `data` as the sample buffer of a batched Mat.
    ///
    /// Fails with [`MatError::IncompatibleDimensions`] when `data.len()` is not
    /// exactly `batch * rows * cols * channels`.
    pub fn from_vec_batched(
        batch: usize,
        rows: usize,
        cols: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> Result<Self> {
        let shape = Shape::batched(batch, rows, cols, channels).validated()?;
        if data.len() != shape.len() {
            return Err(MatError::IncompatibleDimensions {
                lhs: shape,
                rhs: Shape::new(data.len(), 1, 1),
            });
        }
        Ok(Self { shape, data })
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }
    #[inline]
    pub fn batch(&self) -> usize {
        self.shape.batch
    }
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }
    #[inline]
    pub fn channels(&self) -> usize {
        self.shape.channels
    }
    /// Image width in pixels (`cols`).
    #[inline]
    pub fn width(&self) -> usize {
        self.shape.cols
    }
    /// Image height in pixels (`rows`).
    #[inline]
    pub fn height(&self) -> usize {
        self.shape.rows
    }

    /// Number of samples in the buffer.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Samples in storage order.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Move the contents out, leaving `self` as the empty Mat.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Overwrite every sample with `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// New Mat of the same shape with `f` applied to every sample.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f32) -> f32 + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        let data = self.data.par_iter().map(|&v| f(v)).collect();
        #[cfg(not(feature = "parallel"))]
        let data = self.data.iter().map(|&v| f(v)).collect();
        Self {
            shape: self.shape,
            data,
        }
    }

    /// Combine two same-shape Mats sample by sample.
    ///
    /// Fails with [`MatError::IncompatibleDimensions`] when the shapes differ.
    pub fn zip_with<F>(&self, other: &Mat, f: F) -> Result<Self>
    where
        F: Fn(f32, f32) -> f32 + Sync + Send,
    {
        if self.shape != other.shape {
            return Err(MatError::IncompatibleDimensions {
                lhs: self.shape,
                rhs: other.shape,
            });
        }
        #[cfg(feature = "parallel")]
        let data = self
            .data
            .par_iter()
            .zip(other.data.par_iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Self {
            shape: self.shape,
            data,
        })
    }

    /// Assemble a Mat from parts whose length the caller has already checked.
    pub(crate) fn from_parts(shape: Shape, data: Vec<f32>) -> Self {
        debug_assert_eq!(shape.len(), data.len());
        Self { shape, data }
    }
}

/// All-ones `rows × cols × channels` Mat.
pub fn ones(rows: usize, cols: usize, channels: usize) -> Result<Mat> {
    Mat::ones(rows, cols, channels)
}

/// All-zeros `rows × cols × channels` Mat.
pub fn zeros(rows: usize, cols: usize, channels: usize) -> Result<Mat> {
    Mat::zeros(rows, cols, channels)
}
