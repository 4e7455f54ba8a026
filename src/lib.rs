#![doc = include_str!("../README.md")]

pub mod error;
pub mod io;
pub mod mat;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{MatError, Result};
pub use crate::mat::{ones, zeros, Mat, MatIndex, Shape, Tolerance};

// Codec entry points.
pub use crate::io::{decode_record, encode_record, imread, imwrite, MatRecord};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use mat_core::prelude::*;
///
/// # fn main() -> Result<(), MatError> {
/// let img = imread("input.png")?;
/// let brighter = &img * 1.2f32 + 0.05f32;
/// imwrite("output.png", &brighter)?;
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::io::{imread, imwrite};
    pub use crate::{ones, zeros, Mat, MatError, Shape};
}
