//! # Stripper Module
//!
//! Removes every piece of embedded metadata from a single image.
//!
//! ## How It Works
//! 1. Decode the source into a raw pixel buffer
//! 2. Keep only the color mode and pixel dimensions
//! 3. Encode a brand-new container from that buffer
//! 4. Pick the container format from the destination extension
//!
//! No tag of any kind (orientation, ICC profile, timestamps, GPS,
//! thumbnails) is read or carried over.
//!
//! ## Example
//! ```rust,ignore
//! use exif_remover::core::stripper::{MetadataStripper, PixelStripper};
//!
//! let stripper = PixelStripper::default();
//! if !stripper.strip(Path::new("IMG_0001.jpg"), Path::new("clean/IMG_0001.jpg")) {
//!     eprintln!("could not strip IMG_0001.jpg");
//! }
//! ```

mod pixel;
mod traits;

pub use pixel::PixelStripper;
pub use traits::{MetadataStripper, StrippedImage};

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default JPEG quality for re-encoded output
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Encoder options for rebuilt images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripOptions {
    /// JPEG quality (1-100). Ignored for lossless formats.
    pub jpeg_quality: u8,
}

impl StripOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Set the JPEG quality
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Check the options before a run starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::InvalidJpegQuality {
                value: self.jpeg_quality,
            });
        }
        Ok(())
    }
}

impl Default for StripOptions {
    fn default() -> Self {
        Self::new()
    }
}
