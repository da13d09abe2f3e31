//! # Selection Module
//!
//! The list of files the user picked, before it becomes a batch job.
//!
//! Files can come from a picker, a drop, or a folder. Only paths with a
//! supported extension (`.jpg`, `.jpeg`, `.png`, `.tiff`, any case) are
//! kept. Order is preserved and the same file may be added twice.
//!
//! Turning a selection into a job validates the output folder without
//! consuming the selection, so the user can fix the folder and retry.

mod filter;

pub use filter::{ImageFilter, DEFAULT_EXTENSIONS};

use crate::core::batch::BatchJob;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// What happened when paths were added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    /// Files appended to the selection
    pub added: usize,
    /// Paths ignored because they are not supported images
    pub ignored: Vec<PathBuf>,
}

/// Ordered list of files waiting to be stripped
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    files: Vec<PathBuf>,
    filter: ImageFilter,
}

impl FileSelection {
    /// Create an empty selection with the default filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty selection with a custom filter
    pub fn with_filter(filter: ImageFilter) -> Self {
        Self {
            files: Vec::new(),
            filter,
        }
    }

    /// Add files and folders.
    ///
    /// Files are kept if their extension is supported. Folders are walked
    /// recursively in name order.
    pub fn add_paths<I, P>(&mut self, paths: I) -> SelectionChange
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut change = SelectionChange::default();

        for path in paths {
            let path = path.into();
            if path.is_dir() {
                self.add_directory(&path, &mut change);
            } else if self.filter.has_image_extension(&path) {
                self.files.push(path);
                change.added += 1;
            } else {
                debug!(path = %path.display(), "ignoring unsupported file");
                change.ignored.push(path);
            }
        }

        change
    }

    fn add_directory(&mut self, root: &Path, change: &mut SelectionChange) {
        let include_hidden = self.filter.includes_hidden();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0 || include_hidden || !filter::is_hidden(entry.path())
            });

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    if self.filter.should_include(entry.path()) {
                        self.files.push(entry.into_path());
                        change.added += 1;
                    }
                }
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                }
            }
        }
    }

    /// Remove every file
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Selected files in order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number of selected files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Build a validated job from the current selection.
    ///
    /// The selection is left untouched whether or not this succeeds.
    pub fn to_job(&self, output_dir: Option<&Path>, rename: bool) -> Result<BatchJob, ConfigError> {
        let mut builder = BatchJob::builder().files(self.files.iter().cloned()).rename(rename);
        if let Some(dir) = output_dir {
            builder = builder.output_dir(dir);
        }
        builder.build()
    }
}
