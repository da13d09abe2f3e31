//! Extension filtering for selected files.

use std::collections::HashSet;
use std::path::Path;

/// Extensions accepted by default
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "tiff"];

/// Decides whether a path looks like an image the stripper accepts
#[derive(Debug, Clone)]
pub struct ImageFilter {
    /// Lowercase extensions to accept
    extensions: HashSet<String>,
    /// Whether to accept hidden files found while walking folders
    include_hidden: bool,
}

impl ImageFilter {
    /// Create a filter with the default extensions
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
        }
    }

    /// Accept hidden files (starting with .) when walking folders
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Whether hidden files are accepted during folder walks
    pub fn includes_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Check the extension only, case-insensitively
    pub fn has_image_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }

    /// Check a file discovered inside a folder
    pub fn should_include(&self, path: &Path) -> bool {
        if !self.include_hidden && is_hidden(path) {
            return false;
        }
        self.has_image_extension(path)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_supported_extensions() {
        let filter = ImageFilter::new();
        assert!(filter.has_image_extension(Path::new("/photos/a.jpg")));
        assert!(filter.has_image_extension(Path::new("/photos/a.jpeg")));
        assert!(filter.has_image_extension(Path::new("/photos/a.png")));
        assert!(filter.has_image_extension(Path::new("/photos/a.tiff")));
    }

    #[test]
    fn filter_ignores_case() {
        let filter = ImageFilter::new();
        assert!(filter.has_image_extension(Path::new("/photos/IMG_1234.JPG")));
        assert!(filter.has_image_extension(Path::new("/photos/scan.TiFf")));
    }

    #[test]
    fn filter_rejects_other_files() {
        let filter = ImageFilter::new();
        assert!(!filter.has_image_extension(Path::new("/photos/a.gif")));
        assert!(!filter.has_image_extension(Path::new("/photos/a.tif")));
        assert!(!filter.has_image_extension(Path::new("/photos/notes.txt")));
        assert!(!filter.has_image_extension(Path::new("/photos/no_extension")));
    }

    #[test]
    fn hidden_files_skipped_during_walks_by_default() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/.thumb.jpg")));
        assert!(filter.with_hidden(true).should_include(Path::new("/photos/.thumb.jpg")));
    }
}
