//! Value equality with floating-point tolerance.
//!
//! Shapes must match exactly; samples are compared with [`Tolerance`] so
//! results of repeated arithmetic compare equal to their exact counterparts.
//! NaN never compares equal, so a Mat holding NaN is not equal to itself.
use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use super::Mat;

/// Absolute and relative tolerance for sample comparison.
///
/// Two samples `a`, `b` are equal when `a == b`, `|a - b| <= abs`, or
/// `|a - b| <= rel * max(|a|, |b|)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    pub abs: f32,
    pub rel: f32,
}

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance {
        abs: 1e-5,
        rel: 1e-5,
    };

    /// Bit-exact comparison (still `-0.0 == 0.0`).
    pub const EXACT: Tolerance = Tolerance { abs: 0.0, rel: 0.0 };

    #[inline]
    pub fn samples_eq(&self, a: f32, b: f32) -> bool {
        approx::relative_eq!(a, b, epsilon = self.abs, max_relative = self.rel)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Mat {
    /// Shape equality plus per-sample comparison under `tol`.
    pub fn approx_eq(&self, other: &Mat, tol: Tolerance) -> bool {
        self.shape() == other.shape()
            && self
                .data()
                .iter()
                .zip(other.data())
                .all(|(&a, &b)| tol.samples_eq(a, b))
    }
}

impl PartialEq for Mat {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, Tolerance::DEFAULT)
    }
}

impl AbsDiffEq for Mat {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        Tolerance::DEFAULT.abs
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.shape() == other.shape()
            && self
                .data()
                .iter()
                .zip(other.data())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat {
    fn default_max_relative() -> f32 {
        Tolerance::DEFAULT.rel
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.approx_eq(
            other,
            Tolerance {
                abs: epsilon,
                rel: max_relative,
            },
        )
    }
}
