use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;
use image::ImageReader;

use crate::error::Result;
use crate::error::StoreError;
use crate::media::validate_filename;

/// Extensions accepted by the upload form.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// An image that passed upload validation and is ready for `save_memory`.
#[derive(Clone, Debug)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl Upload {
    /// Read an image from disk; the stored name is the file's base name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StoreError::InvalidFilename(path.display().to_string()))?
            .to_string();
        let bytes = std::fs::read(path).map_err(|e| StoreError::from_read(path, e))?;
        Self::from_bytes(filename, bytes)
    }

    pub fn from_bytes(filename: String, bytes: Vec<u8>) -> Result<Self> {
        validate_filename(&filename)?;
        let unsupported = |reason: String| StoreError::UnsupportedImage {
            filename: filename.clone(),
            reason,
        };

        let ext = Path::new(&filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(unsupported(format!(
                "expected one of {}",
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }

        let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| unsupported(e.to_string()))?;
        let format = reader
            .format()
            .ok_or_else(|| unsupported("not a recognizable image".to_string()))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| unsupported(e.to_string()))?;

        Ok(Self {
            filename,
            bytes,
            format,
            width,
            height,
        })
    }

    /// Decoded format and size, e.g. `PNG 4x3`.
    pub fn summary(&self) -> String {
        let kind = self
            .format
            .extensions_str()
            .first()
            .map(|ext| ext.to_ascii_uppercase())
            .unwrap_or_else(|| format!("{:?}", self.format));
        format!("{kind} {}x{}", self.width, self.height)
    }
}
