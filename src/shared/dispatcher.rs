//! UI-affine job queue
//!
//! The view tree may only be touched from the thread that owns it. Other
//! threads post closures through a [`UiHandle`]; the owning thread drains
//! them with [`UiLoop::run_pending`] or [`UiLoop::run_next`].

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::marker::PhantomData;
use std::thread::{self, ThreadId};
use std::time::Duration;
use thiserror::Error;

/// Work posted to the UI thread
pub type UiJob = Box<dyn FnOnce() + Send + 'static>;

/// Posting to the UI thread failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The UI loop has been dropped
    #[error("UI thread is no longer accepting work")]
    UiThreadGone,
}

/// Receiving end of the queue, pinned to the thread that created it
pub struct UiLoop {
    rx: Receiver<UiJob>,
    tx: Sender<UiJob>,
    thread: ThreadId,
    // !Send: the loop must be drained on the thread that created it
    _not_send: PhantomData<*const ()>,
}

/// Cloneable sender for posting jobs to a [`UiLoop`]
#[derive(Clone)]
pub struct UiHandle {
    tx: Sender<UiJob>,
    thread: ThreadId,
}

impl UiLoop {
    /// Create a loop owned by the current thread
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            rx,
            tx,
            thread: thread::current().id(),
            _not_send: PhantomData,
        }
    }

    /// Get a handle for posting jobs
    pub fn handle(&self) -> UiHandle {
        UiHandle {
            tx: self.tx.clone(),
            thread: self.thread,
        }
    }

    /// Run every job already queued. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Wait up to `timeout` for one job and run it
    pub fn run_next(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(job) => {
                job();
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Number of jobs waiting
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl Default for UiLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl UiHandle {
    /// Queue a job for the UI thread
    pub fn run_on_ui(&self, job: UiJob) -> Result<(), DispatchError> {
        self.tx.send(job).map_err(|_| DispatchError::UiThreadGone)
    }

    /// Whether the caller is running on the UI thread
    pub fn is_ui_thread(&self) -> bool {
        thread::current().id() == self.thread
    }
}

impl std::fmt::Debug for UiHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiHandle").field("thread", &self.thread).finish()
    }
}
