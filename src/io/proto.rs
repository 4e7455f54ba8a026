//! Flat binary record: shape fields plus the raw sample bytes.
//!
//! The record is a protobuf message so it can be exchanged with other
//! runtimes:
//!
//! ```text
//! message MatRecord {
//!   uint32 rows     = 1;
//!   uint32 cols     = 2;
//!   uint32 channels = 3;
//!   bytes  data     = 4;  // little-endian f32, row-major, channel fastest
//!   uint32 batch    = 5;  // omitted (0) for single images
//! }
//! ```
//!
//! `data` must be exactly `batch * rows * cols * channels * 4` bytes.
use std::fs;
use std::path::Path;

use prost::Message;

use crate::error::{MatError, Result};
use crate::mat::{Mat, Shape};

const SAMPLE_BYTES: usize = std::mem::size_of::<f32>();

#[derive(Clone, PartialEq, Message)]
pub struct MatRecord {
    #[prost(uint32, tag = "1")]
    pub rows: u32,
    #[prost(uint32, tag = "2")]
    pub cols: u32,
    #[prost(uint32, tag = "3")]
    pub channels: u32,
    #[prost(bytes = "vec", tag = "4")]
    pub data: Vec<u8>,
    #[prost(uint32, tag = "5")]
    pub batch: u32,
}

impl MatRecord {
    /// Shape declared by the record; a zero `batch` field means one image.
    pub fn shape(&self) -> Shape {
        Shape::batched(
            (self.batch as usize).max(1),
            self.rows as usize,
            self.cols as usize,
            self.channels as usize,
        )
    }
}

impl TryFrom<&Mat> for MatRecord {
    type Error = MatError;

    fn try_from(mat: &Mat) -> Result<Self> {
        let shape = mat.shape();
        let field = |v: usize| u32::try_from(v).map_err(|_| shape.invalid());
        let batch = if shape.batch == 1 { 0 } else { field(shape.batch)? };
        let mut data = Vec::with_capacity(mat.size() * SAMPLE_BYTES);
        for v in mat.data() {
            data.extend_from_slice(&v.to_le_bytes());
        }
        Ok(Self {
            rows: field(shape.rows)?,
            cols: field(shape.cols)?,
            channels: field(shape.channels)?,
            data,
            batch,
        })
    }
}

impl TryFrom<&MatRecord> for Mat {
    type Error = MatError;

    fn try_from(record: &MatRecord) -> Result<Self> {
        let declared = record.shape();
        if declared.rows == 0 && declared.cols == 0 && declared.channels == 0 {
            if declared.batch == 1 && record.data.is_empty() {
                return Ok(Mat::default());
            }
            return Err(declared.invalid());
        }
        let shape = declared.validated()?;
        let expected = shape
            .len()
            .checked_mul(SAMPLE_BYTES)
            .ok_or_else(|| shape.invalid())?;
        if record.data.len() != expected {
            log::debug!(
                "record payload mismatch: shape={shape} expected={expected} actual={}",
                record.data.len()
            );
            return Err(MatError::ProtoDataMismatch {
                shape,
                expected,
                actual: record.data.len(),
            });
        }
        let data = record
            .data
            .chunks_exact(SAMPLE_BYTES)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        Ok(Mat::from_parts(shape, data))
    }
}

impl TryFrom<MatRecord> for Mat {
    type Error = MatError;

    fn try_from(record: MatRecord) -> Result<Self> {
        Mat::try_from(&record)
    }
}

pub fn to_record(mat: &Mat) -> Result<MatRecord> {
    MatRecord::try_from(mat)
}

pub fn from_record(record: &MatRecord) -> Result<Mat> {
    Mat::try_from(record)
}

/// Serialize `mat` to protobuf wire bytes.
pub fn encode_record(mat: &Mat) -> Result<Vec<u8>> {
    Ok(to_record(mat)?.encode_to_vec())
}

/// Parse protobuf wire bytes back into a Mat.
pub fn decode_record(bytes: &[u8]) -> Result<Mat> {
    let record = MatRecord::decode(bytes).map_err(|e| MatError::ProtoDecode(e.to_string()))?;
    from_record(&record)
}

/// Write the encoded record to `path`, replacing any existing file.
pub fn save_record(mat: &Mat, path: &Path) -> Result<usize> {
    let bytes = encode_record(mat)?;
    fs::write(path, &bytes).map_err(|e| MatError::io(path, e))?;
    Ok(bytes.len())
}

/// Read and decode a record file written by [`save_record`].
pub fn load_record(path: &Path) -> Result<Mat> {
    let bytes = fs::read(path).map_err(|e| MatError::io(path, e))?;
    decode_record(&bytes)
}
