//! Bridge between [`Mat`] and 8-bit image files.
//!
//! Decoding keeps the source channel count (gray, gray+alpha, RGB, RGBA) and
//! maps each 8-bit sample to `v / 255` in `[0, 1]`. Encoding clamps samples to
//! `[0, 1]`, scales them to `[0, 255]` and hands the interleaved bytes to the
//! encoder. Decoded pixels are copied into the Mat's own buffer before these
//! functions return; no decoder allocation outlives the call.
use image::{ColorType, DynamicImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::options::{OutputFormat, WriteOptions};
use crate::error::{MatError, Result};
use crate::mat::{Mat, Shape};

/// Load an image file into a Mat with samples in `[0, 1]`.
pub fn imread(path: impl AsRef<Path>) -> Result<Mat> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(MatError::InvalidFilename(PathBuf::new()));
    }
    let bytes = fs::read(path).map_err(|e| load_failed(path, e))?;
    let img = image::load_from_memory(&bytes).map_err(|e| load_failed(path, e))?;
    let mat = dynamic_to_mat(img).map_err(|e| match e {
        MatError::InvalidDimensions { .. } => load_failed(path, "image has no pixels"),
        other => other,
    })?;
    log::debug!("imread {}: {}", path.display(), mat.shape());
    Ok(mat)
}

/// Decode an in-memory encoded image (PNG, JPEG, BMP, TIFF).
pub fn imdecode(bytes: &[u8]) -> Result<Mat> {
    let img = image::load_from_memory(bytes).map_err(|e| load_failed(Path::new(""), e))?;
    dynamic_to_mat(img)
}

/// Write `mat` as a PNG, creating parent directories as needed.
///
/// Samples are clamped to `[0, 1]` and rounded to the nearest 8-bit level,
/// so `0.5` is stored as `128`.
pub fn imwrite(path: impl AsRef<Path>, mat: &Mat) -> Result<()> {
    imwrite_with(path, mat, &WriteOptions::default())
}

/// Write `mat` in `options.format`.
///
/// Fails with [`MatError::InvalidChannelsForOperation`] before touching the
/// filesystem when the format cannot store `mat.channels()` channels (see
/// [`OutputFormat::supported_channels`]).
pub fn imwrite_with(path: impl AsRef<Path>, mat: &Mat, options: &WriteOptions) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(MatError::InvalidFilename(PathBuf::new()));
    }
    let (width, height, color) = encoder_layout(mat, options.format)?;
    if options.create_parent_dirs {
        ensure_parent_dir(path)?;
    }
    let bytes = to_u8_samples(mat);
    image::save_buffer_with_format(
        path,
        &bytes,
        width,
        height,
        color,
        options.format.image_format(),
    )
    .map_err(|e| {
        log::debug!("imwrite {} failed: {e}", path.display());
        MatError::WriteImageFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })
}

/// Encode `mat` into an in-memory image of the given format.
pub fn imencode(mat: &Mat, format: OutputFormat) -> Result<Vec<u8>> {
    let (width, height, color) = encoder_layout(mat, format)?;
    let bytes = to_u8_samples(mat);
    let mut out = Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &bytes,
        width,
        height,
        color,
        format.image_format(),
    )
    .map_err(|e| MatError::WriteImageFailed {
        path: PathBuf::new(),
        reason: e.to_string(),
    })?;
    Ok(out.into_inner())
}

fn dynamic_to_mat(img: DynamicImage) -> Result<Mat> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let channels = img.color().channel_count() as usize;
    let raw = match channels {
        1 => img.into_luma8().into_raw(),
        2 => img.into_luma_alpha8().into_raw(),
        3 => img.into_rgb8().into_raw(),
        4 => img.into_rgba8().into_raw(),
        _ => return Err(MatError::InvalidChannelsForOperation { channels }),
    };
    let data = raw.into_iter().map(|v| v as f32 / 255.0).collect();
    Mat::from_vec(height, width, channels, data)
}

fn encoder_layout(mat: &Mat, format: OutputFormat) -> Result<(u32, u32, ColorType)> {
    let shape = mat.shape();
    if mat.is_empty() || shape.batch != 1 {
        return Err(shape.invalid());
    }
    if !format.supports_channels(shape.channels) {
        return Err(MatError::InvalidChannelsForOperation {
            channels: shape.channels,
        });
    }
    let color = match shape.channels {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        channels => return Err(MatError::InvalidChannelsForOperation { channels }),
    };
    let dim = |v: usize| u32::try_from(v).map_err(|_| Shape::invalid(&shape));
    Ok((dim(shape.cols)?, dim(shape.rows)?, color))
}

fn to_u8_samples(mat: &Mat) -> Vec<u8> {
    mat.data()
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}

fn load_failed(path: &Path, reason: impl ToString) -> MatError {
    log::debug!("imread {} failed: {}", path.display(), reason.to_string());
    MatError::ImageLoadFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| MatError::io(parent, e))?;
        }
    }
    Ok(())
}
