//! # Events Module
//!
//! Channel-based notifications from the batch worker to a UI.
//!
//! ## Design
//! The worker never touches UI state. It emits events through a channel and
//! the UI (CLI progress bar, desktop window) drains them on its own thread.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//! let handle = processor.start(job, sender)?;
//!
//! for event in receiver.iter() {
//!     match event {
//!         Event::Batch(BatchEvent::Progress(p)) => println!("{}%", p.percent),
//!         Event::Batch(BatchEvent::Completed { result }) => {
//!             println!("{} stripped", result.success_count);
//!             break;
//!         }
//!         _ => {}
//!     }
//! }
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender, null_sender};
pub use types::*;
