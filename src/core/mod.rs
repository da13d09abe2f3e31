//! # Core Module
//!
//! The GUI-agnostic metadata stripping engine.
//!
//! ## Modules
//! - `stripper` - Rebuilds one image from its raw pixels
//! - `batch` - Runs a list of files on a worker thread with progress and cancellation
//! - `selection` - Collects and filters the files a user picked
//! - `settings` - Persists the last output folder

pub mod batch;
pub mod selection;
pub mod settings;
pub mod stripper;

// Re-export commonly used types
pub use batch::{BatchHandle, BatchJob, BatchProcessor, BatchState, CancellationToken, JobResult};
pub use selection::FileSelection;
pub use settings::SettingsStore;
pub use stripper::{MetadataStripper, PixelStripper, StripOptions};
