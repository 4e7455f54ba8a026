//! Element-wise arithmetic.
//!
//! Every operator returns a freshly allocated Mat; operands are never
//! mutated. Mat ⊕ Mat yields `Result<Mat>` because the shapes must match;
//! Mat ⊕ scalar is infallible. `f64` scalars are narrowed to `f32` before
//! they are applied.
//!
//! Division by zero is not guarded: samples follow IEEE-754 and become
//! `±inf` or NaN.
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::Mat;
use crate::error::Result;

impl Mat {
    pub fn try_add(&self, other: &Mat) -> Result<Mat> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn try_sub(&self, other: &Mat) -> Result<Mat> {
        self.zip_with(other, |a, b| a - b)
    }

    pub fn add_scalar(&self, scalar: f32) -> Mat {
        self.map(|v| v + scalar)
    }

    pub fn sub_scalar(&self, scalar: f32) -> Mat {
        self.map(|v| v - scalar)
    }

    pub fn mul_scalar(&self, scalar: f32) -> Mat {
        self.map(|v| v * scalar)
    }

    pub fn div_scalar(&self, scalar: f32) -> Mat {
        self.map(|v| v / scalar)
    }
}

macro_rules! mat_mat_op {
    ($trait:ident, $method:ident, $kernel:ident) => {
        impl $trait<&Mat> for &Mat {
            type Output = Result<Mat>;
            fn $method(self, rhs: &Mat) -> Result<Mat> {
                self.$kernel(rhs)
            }
        }

        impl $trait<Mat> for &Mat {
            type Output = Result<Mat>;
            fn $method(self, rhs: Mat) -> Result<Mat> {
                self.$kernel(&rhs)
            }
        }

        impl $trait<&Mat> for Mat {
            type Output = Result<Mat>;
            fn $method(self, rhs: &Mat) -> Result<Mat> {
                self.$kernel(rhs)
            }
        }

        impl $trait<Mat> for Mat {
            type Output = Result<Mat>;
            fn $method(self, rhs: Mat) -> Result<Mat> {
                self.$kernel(&rhs)
            }
        }
    };
}

mat_mat_op!(Add, add, try_add);
mat_mat_op!(Sub, sub, try_sub);

macro_rules! mat_scalar_op {
    ($trait:ident, $method:ident, $kernel:ident, $($scalar:ty),+) => {$(
        impl $trait<$scalar> for &Mat {
            type Output = Mat;
            fn $method(self, rhs: $scalar) -> Mat {
                self.$kernel(rhs as f32)
            }
        }

        impl $trait<$scalar> for Mat {
            type Output = Mat;
            fn $method(self, rhs: $scalar) -> Mat {
                self.$kernel(rhs as f32)
            }
        }
    )+};
}

mat_scalar_op!(Add, add, add_scalar, f32, f64);
mat_scalar_op!(Sub, sub, sub_scalar, f32, f64);
mat_scalar_op!(Mul, mul, mul_scalar, f32, f64);
mat_scalar_op!(Div, div, div_scalar, f32, f64);

// scalar * Mat commutes with Mat * scalar
macro_rules! scalar_mat_mul {
    ($($scalar:ty),+) => {$(
        impl Mul<&Mat> for $scalar {
            type Output = Mat;
            fn mul(self, rhs: &Mat) -> Mat {
                rhs * self
            }
        }

        impl Mul<Mat> for $scalar {
            type Output = Mat;
            fn mul(self, rhs: Mat) -> Mat {
                rhs * self
            }
        }
    )+};
}

scalar_mat_mul!(f32, f64);

impl Neg for &Mat {
    type Output = Mat;
    fn neg(self) -> Mat {
        self * -1.0f32
    }
}

impl Neg for Mat {
    type Output = Mat;
    fn neg(self) -> Mat {
        -&self
    }
}
