//! Observers receive batch notifications on the worker thread.

use super::{BatchJob, JobResult};
use crate::core::stripper::StrippedImage;
use crate::error::StripError;
use crate::events::{BatchEvent, BatchProgress, Event, EventSender};
use std::path::Path;
use uuid::Uuid;

/// Receives notifications from a running batch
///
/// Every method is called on the worker thread. `on_complete` is called
/// exactly once per run, including cancelled runs.
pub trait BatchObserver: Send {
    /// The run has started
    fn on_started(&mut self, _job_id: Uuid, _job: &BatchJob) {}

    /// A file was attempted
    fn on_file_done(&mut self, _source: &Path, _outcome: &Result<StrippedImage, StripError>) {}

    /// Progress after each attempted file
    fn on_progress(&mut self, progress: &BatchProgress);

    /// Final counts for the run
    fn on_complete(&mut self, result: &JobResult);
}

impl BatchObserver for EventSender {
    fn on_started(&mut self, job_id: Uuid, job: &BatchJob) {
        self.send(Event::Batch(BatchEvent::Started {
            job_id,
            total_files: job.len(),
            output_dir: job.output_dir.clone(),
        }));
    }

    fn on_file_done(&mut self, source: &Path, outcome: &Result<StrippedImage, StripError>) {
        let event = match outcome {
            Ok(image) => BatchEvent::FileStripped {
                path: source.to_path_buf(),
                output: image.output.clone(),
            },
            Err(error) => BatchEvent::FileFailed {
                path: source.to_path_buf(),
                message: error.to_string(),
            },
        };
        self.send(Event::Batch(event));
    }

    fn on_progress(&mut self, progress: &BatchProgress) {
        self.send(Event::Batch(BatchEvent::Progress(progress.clone())));
    }

    fn on_complete(&mut self, result: &JobResult) {
        if result.cancelled {
            self.send(Event::Batch(BatchEvent::Cancelled {
                job_id: result.job_id,
            }));
        }
        self.send(Event::Batch(BatchEvent::Completed {
            result: result.clone(),
        }));
    }
}

/// Observer built from a progress closure and a completion closure
pub struct Callbacks<P, C> {
    on_progress: P,
    on_complete: Option<C>,
}

impl<P, C> Callbacks<P, C>
where
    P: FnMut(u8) + Send,
    C: FnOnce(JobResult) + Send,
{
    /// `on_progress` receives the percentage, `on_complete` the final result
    pub fn new(on_progress: P, on_complete: C) -> Self {
        Self {
            on_progress,
            on_complete: Some(on_complete),
        }
    }
}

impl<P, C> BatchObserver for Callbacks<P, C>
where
    P: FnMut(u8) + Send,
    C: FnOnce(JobResult) + Send,
{
    fn on_progress(&mut self, progress: &BatchProgress) {
        (self.on_progress)(progress.percent);
    }

    fn on_complete(&mut self, result: &JobResult) {
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(result.clone());
        }
    }
}
