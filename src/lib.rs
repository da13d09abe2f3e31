//! # EXIF Remover
//!
//! Strips EXIF and every other kind of embedded metadata from photos.
//!
//! ## Approach
//! Images are not edited in place. Each one is decoded to its raw pixel
//! grid and written into a brand-new container, so no metadata block can
//! survive, whatever format it was stored in.
//!
//! ## Architecture
//! The library is split into a core engine (GUI-agnostic) and presentation layers:
//! - `core` - Stripping, batch processing, file selection, settings
//! - `events` - Channel-based progress reporting (GUI-ready)
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{ExifRemoverError, Result};

/// Initialize tracing for the library
///
/// Logs go to stderr. `RUST_LOG` overrides the default level, which is
/// `warn`, or `debug` when `verbose` is set. Calling this more than once is
/// harmless.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Report panics through `tracing` instead of the default stderr hook.
///
/// The batch worker turns a decoder panic into an ordinary per-file
/// failure; with this hook the panic shows up as a log line in the same
/// stream as other failures rather than a raw message across the progress
/// bar. This replaces the process-wide panic hook.
pub fn log_panics() {
    std::panic::set_hook(Box::new(|info| {
        let thread = std::thread::current();
        tracing::error!(thread = thread.name().unwrap_or("unnamed"), "{info}");
    }));
}
