//! Codec I/O for [`Mat`](crate::Mat).
//!
//! - `proto`: the flat binary record (shape + raw little-endian `f32` bytes).
//! - `image`: bridge to 8-bit image files (`imread`, `imwrite`) and their
//!   in-memory counterparts (`imdecode`, `imencode`).
//! - `options`: serde-configurable write options.
pub mod image;
pub mod options;
pub mod proto;

pub use self::image::{imdecode, imencode, imread, imwrite, imwrite_with};
pub use self::options::{load_write_options, OutputFormat, WriteOptions};
pub use self::proto::{
    decode_record, encode_record, from_record, load_record, save_record, to_record, MatRecord,
};
