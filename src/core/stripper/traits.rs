//! Trait definitions for metadata stripping.

use crate::error::StripError;
use image::{ColorType, ImageFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What was written for a successfully stripped image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedImage {
    /// Destination file
    pub output: PathBuf,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Color mode carried over from the source
    pub color: ColorType,
    /// Container format chosen from the destination extension
    pub format: ImageFormat,
}

/// Rebuilds an image without any of its auxiliary data
///
/// Implement this trait to plug a different rebuild strategy (or a test
/// double) into the batch processor.
pub trait MetadataStripper: Send + Sync {
    /// Rebuild `input` into a fresh container at `output`.
    ///
    /// Only the pixel grid, color mode and dimensions are carried over.
    /// `output` is created or overwritten; `input` is never modified.
    fn rebuild(&self, input: &Path, output: &Path) -> Result<StrippedImage, StripError>;

    /// Strip one file, reporting success as a plain flag.
    ///
    /// Failures are logged and swallowed so that callers iterating over many
    /// files never abort on a single bad one.
    fn strip(&self, input: &Path, output: &Path) -> bool {
        match self.rebuild(input, output) {
            Ok(image) => {
                debug!(
                    input = %input.display(),
                    output = %image.output.display(),
                    width = image.width,
                    height = image.height,
                    "stripped metadata"
                );
                true
            }
            Err(error) => {
                warn!(input = %input.display(), %error, "failed to strip metadata");
                false
            }
        }
    }
}
