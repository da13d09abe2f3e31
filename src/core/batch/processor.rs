//! Batch execution on a background worker.

use super::job::progress_percent;
use super::{BatchJob, BatchObserver, Callbacks, CancellationToken, JobResult};
use crate::core::stripper::{MetadataStripper, PixelStripper, StrippedImage};
use crate::error::{BatchError, ExifRemoverError, StripError};
use crate::events::BatchProgress;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BatchState {
    Idle = 0,
    Running = 1,
    Completed = 2,
    Cancelled = 3,
}

impl BatchState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => BatchState::Running,
            2 => BatchState::Completed,
            3 => BatchState::Cancelled,
            _ => BatchState::Idle,
        }
    }
}

impl std::fmt::Display for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchState::Idle => write!(f, "Idle"),
            BatchState::Running => write!(f, "Running"),
            BatchState::Completed => write!(f, "Completed"),
            BatchState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug, Clone)]
struct SharedState(Arc<AtomicU8>);

impl SharedState {
    fn new(state: BatchState) -> Self {
        Self(Arc::new(AtomicU8::new(state as u8)))
    }

    fn get(&self) -> BatchState {
        BatchState::from_u8(self.0.load(Ordering::SeqCst))
    }

    fn set(&self, state: BatchState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }
}

/// The run currently owned by a processor
#[derive(Debug)]
struct ActiveRun {
    token: CancellationToken,
    state: SharedState,
}

/// Marks the run finished before the caller hears about completion, so a
/// completion handler may immediately start the next run.
struct Tracked<O> {
    inner: O,
    state: SharedState,
}

impl<O: BatchObserver> BatchObserver for Tracked<O> {
    fn on_started(&mut self, job_id: Uuid, job: &BatchJob) {
        self.inner.on_started(job_id, job);
    }

    fn on_file_done(&mut self, source: &Path, outcome: &Result<StrippedImage, StripError>) {
        self.inner.on_file_done(source, outcome);
    }

    fn on_progress(&mut self, progress: &BatchProgress) {
        self.inner.on_progress(progress);
    }

    fn on_complete(&mut self, result: &JobResult) {
        self.state.set(if result.cancelled {
            BatchState::Cancelled
        } else {
            BatchState::Completed
        });
        self.inner.on_complete(result);
    }
}

/// Ends the run if the worker unwinds before `on_complete`, e.g. when a
/// caller's callback panics. Without it the processor would stay `Running`.
struct FinishGuard {
    state: SharedState,
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        if self.state.get() == BatchState::Running {
            warn!("batch worker stopped before completing");
            self.state.set(BatchState::Cancelled);
        }
    }
}

/// Handle to a run started with [`BatchProcessor::start`]
#[derive(Debug)]
pub struct BatchHandle {
    job_id: Uuid,
    token: CancellationToken,
    state: SharedState,
    thread: JoinHandle<JobResult>,
}

impl BatchHandle {
    /// Identifier of the run
    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    /// Request cancellation. Takes effect before the next file.
    ///
    /// Returns `false` (and does nothing) if the run already finished.
    pub fn cancel(&self) -> bool {
        if self.state.get() != BatchState::Running {
            return false;
        }
        self.token.cancel();
        true
    }

    /// Current state of the run
    pub fn state(&self) -> BatchState {
        self.state.get()
    }

    /// Whether the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the worker and return the result
    pub fn join(self) -> Result<JobResult, BatchError> {
        self.thread.join().map_err(|_| BatchError::WorkerPanicked)
    }
}

/// Runs batch jobs one file at a time on a worker thread
pub struct BatchProcessor {
    stripper: Arc<dyn MetadataStripper>,
    active: Mutex<Option<ActiveRun>>,
}

impl BatchProcessor {
    /// Create a processor using the given stripper
    pub fn new(stripper: Arc<dyn MetadataStripper>) -> Self {
        Self {
            stripper,
            active: Mutex::new(None),
        }
    }

    /// Start `job` on a worker thread with a pair of callbacks.
    ///
    /// `on_progress` receives the rounded percentage after every file,
    /// `on_complete` the final result, once.
    pub fn run<P, C>(
        &self,
        job: BatchJob,
        on_progress: P,
        on_complete: C,
    ) -> Result<BatchHandle, ExifRemoverError>
    where
        P: FnMut(u8) + Send + 'static,
        C: FnOnce(JobResult) + Send + 'static,
    {
        self.start(job, Callbacks::new(on_progress, on_complete))
    }

    /// Start `job` on a worker thread, reporting to `observer`.
    ///
    /// Fails without touching any file if the job is invalid or another run
    /// is still active on this processor.
    pub fn start<O>(&self, job: BatchJob, observer: O) -> Result<BatchHandle, ExifRemoverError>
    where
        O: BatchObserver + 'static,
    {
        job.validate()?;

        let mut active = self
            .active
            .lock()
            .map_err(|_| BatchError::WorkerPanicked)?;
        if let Some(run) = active.as_ref() {
            if run.state.get() == BatchState::Running {
                return Err(BatchError::AlreadyRunning.into());
            }
        }

        let job_id = Uuid::new_v4();
        let token = CancellationToken::new();
        let state = SharedState::new(BatchState::Running);

        let worker = Worker {
            stripper: Arc::clone(&self.stripper),
        };
        let worker_token = token.clone();
        let mut tracked = Tracked {
            inner: observer,
            state: state.clone(),
        };

        let guard = FinishGuard {
            state: state.clone(),
        };

        let thread = thread::Builder::new()
            .name("exif-remover-batch".to_string())
            .spawn(move || {
                let _guard = guard;
                worker.execute(job_id, &job, &worker_token, &mut tracked)
            })
            .map_err(BatchError::Spawn)?;

        *active = Some(ActiveRun {
            token: token.clone(),
            state: state.clone(),
        });

        Ok(BatchHandle {
            job_id,
            token,
            state,
            thread,
        })
    }

    /// Cancel the active run, if any.
    ///
    /// Returns `false` when nothing is running.
    pub fn cancel(&self) -> bool {
        let Ok(active) = self.active.lock() else {
            return false;
        };
        match active.as_ref() {
            Some(run) if run.state.get() == BatchState::Running => {
                run.token.cancel();
                true
            }
            _ => false,
        }
    }

    /// State of the most recent run, or `Idle` if none was started
    pub fn state(&self) -> BatchState {
        self.active
            .lock()
            .ok()
            .and_then(|active| active.as_ref().map(|run| run.state.get()))
            .unwrap_or(BatchState::Idle)
    }

    /// Whether a run is in progress
    pub fn is_running(&self) -> bool {
        self.state() == BatchState::Running
    }

    /// Run `job` on the calling thread.
    ///
    /// This is the loop the worker thread executes; it is exposed for
    /// callers that manage their own threads.
    pub fn process(
        &self,
        job: &BatchJob,
        token: &CancellationToken,
        observer: &mut dyn BatchObserver,
    ) -> JobResult {
        let worker = Worker {
            stripper: Arc::clone(&self.stripper),
        };
        worker.execute(Uuid::new_v4(), job, token, observer)
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(Arc::new(PixelStripper::default()))
    }
}

struct Worker {
    stripper: Arc<dyn MetadataStripper>,
}

impl Worker {
    fn execute<O: BatchObserver + ?Sized>(
        &self,
        job_id: Uuid,
        job: &BatchJob,
        token: &CancellationToken,
        observer: &mut O,
    ) -> JobResult {
        let start_time = Instant::now();
        let total = job.len();

        info!(
            %job_id,
            total,
            output_dir = %job.output_dir.display(),
            rename = job.rename,
            "batch started"
        );
        observer.on_started(job_id, job);

        let mut rng = rand::thread_rng();
        let mut success_count = 0usize;
        let mut failed_paths = Vec::new();
        let mut cancelled = false;

        for (index, source) in job.files.iter().enumerate() {
            if token.is_cancelled() {
                cancelled = true;
                break;
            }

            let outcome = job
                .output_path_for(source, &mut rng)
                .and_then(|output| self.strip_one(source, &output));

            match &outcome {
                Ok(image) => {
                    success_count += 1;
                    debug!(
                        input = %source.display(),
                        output = %image.output.display(),
                        "stripped metadata"
                    );
                }
                Err(error) => {
                    warn!(input = %source.display(), %error, "failed to strip metadata");
                    failed_paths.push(source.clone());
                }
            }
            observer.on_file_done(source, &outcome);

            let attempted = index + 1;
            observer.on_progress(&BatchProgress {
                job_id,
                attempted,
                total,
                percent: progress_percent(attempted, total),
                current_path: source.clone(),
            });
        }

        let result = JobResult {
            job_id,
            output_dir: job.output_dir.clone(),
            success_count,
            failed_paths,
            total_files: total,
            cancelled,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        if cancelled {
            info!(
                %job_id,
                attempted = result.attempted(),
                skipped = result.skipped(),
                "batch cancelled"
            );
        } else {
            info!(
                %job_id,
                succeeded = result.success_count,
                failed = result.failed_count(),
                duration_ms = result.duration_ms,
                "batch completed"
            );
        }

        observer.on_complete(&result);
        result
    }

    /// A decoder panic on a malformed file counts as that file failing.
    fn strip_one(&self, source: &Path, output: &Path) -> Result<StrippedImage, StripError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.stripper.rebuild(source, output)))
            .unwrap_or_else(|_| {
                Err(StripError::Decode {
                    path: source.to_path_buf(),
                    reason: "decoder panicked".to_string(),
                })
            })
    }
}
