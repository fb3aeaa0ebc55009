//! Background jobs for work too slow for the UI thread (thumbnail
//! regeneration, image decoding).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Handed to the job closure so it can poll for cancellation at safe
/// points. Cancellation is cooperative; an ignored flag just means the
/// result is thrown away.
#[derive(Clone)]
pub struct JobCtx {
    cancelled: Arc<AtomicBool>,
}

impl JobCtx {
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

enum JobState<T> {
    Running,
    Finished(T),
    Taken,
}

/// A handle to a background computation. Dropping the handle cancels the
/// job cooperatively and detaches the thread.
pub struct Job<T> {
    state: Arc<Mutex<JobState<T>>>,
    cancelled: Arc<AtomicBool>,
}

impl<T: Send + 'static> Job<T> {
    /// Runs `f` on a new thread. A job cancelled before completion stores
    /// no result.
    pub fn spawn<F>(f: F) -> Self
    where
        F: FnOnce(&JobCtx) -> T + Send + 'static,
    {
        let state = Arc::new(Mutex::new(JobState::Running));
        let cancelled = Arc::new(AtomicBool::new(false));
        let ctx = JobCtx {
            cancelled: cancelled.clone(),
        };
        let thread_state = state.clone();
        std::thread::spawn(move || {
            let result = f(&ctx);
            if !ctx.is_cancelled() {
                *thread_state.lock() = JobState::Finished(result);
            }
        });
        Self { state, cancelled }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        matches!(*self.state.lock(), JobState::Finished(_))
    }

    /// Takes the result if the job has finished; `None` while it is still
    /// running, was cancelled, or was already taken.
    pub fn take_result(&self) -> Option<T> {
        let mut state = self.state.lock();
        if matches!(*state, JobState::Finished(_)) {
            match std::mem::replace(&mut *state, JobState::Taken) {
                JobState::Finished(result) => Some(result),
                _ => unreachable!(),
            }
        } else {
            None
        }
    }
}

impl<T> Drop for Job<T> {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}
