use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{MatError, Result};

/// Lossless container used by [`imwrite_with`](super::imwrite_with) and
/// [`imencode`](super::imencode).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Bmp,
    Tiff,
}

impl OutputFormat {
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Bmp => image::ImageFormat::Bmp,
            OutputFormat::Tiff => image::ImageFormat::Tiff,
        }
    }

    /// Channel counts the format stores and decodes back unchanged.
    ///
    /// BMP has no gray or gray+alpha layout that survives decoding, and the
    /// TIFF encoder has no gray+alpha layout.
    pub fn supported_channels(self) -> &'static [usize] {
        match self {
            OutputFormat::Png => &[1, 2, 3, 4],
            OutputFormat::Bmp => &[3, 4],
            OutputFormat::Tiff => &[1, 3, 4],
        }
    }

    pub fn supports_channels(self, channels: usize) -> bool {
        self.supported_channels().contains(&channels)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    pub format: OutputFormat,
    /// Create missing parent directories of the target path.
    pub create_parent_dirs: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            create_parent_dirs: true,
        }
    }
}

impl WriteOptions {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }
}

/// Read [`WriteOptions`] from a JSON file; missing fields take defaults.
pub fn load_write_options(path: &Path) -> Result<WriteOptions> {
    let data = fs::read_to_string(path).map_err(|e| MatError::io(path, e))?;
    serde_json::from_str(&data).map_err(|e| MatError::InvalidConfig {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
