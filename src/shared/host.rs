//! Host UI liveness
//!
//! Tasks never own the host's UI objects. They keep weak references and ask,
//! at delivery time, whether the destination is still there.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::shared::dispatcher::{DispatchError, UiHandle, UiJob};

/// The screen a task delivers into
pub trait HostActivity: Send + Sync {
    /// The activity is closing and should not receive new results
    fn is_finishing(&self) -> bool;

    /// The activity has been torn down
    fn is_destroyed(&self) -> bool;

    /// Run `job` on the activity's UI thread
    fn run_on_ui_thread(&self, job: UiJob) -> Result<(), DispatchError>;
}

/// The UI context a task is created from
pub trait HostContext: Send + Sync {
    /// The activity currently attached to this context, if any
    fn current_activity(&self) -> Option<Arc<dyn HostActivity>>;
}

/// In-process activity backed by a [`UiLoop`](crate::shared::UiLoop)
#[derive(Debug)]
pub struct LocalActivity {
    ui: UiHandle,
    finishing: AtomicBool,
    destroyed: AtomicBool,
}

impl LocalActivity {
    pub fn new(ui: UiHandle) -> Self {
        Self {
            ui,
            finishing: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
        }
    }

    /// Mark the activity as finishing
    pub fn finish(&self) {
        self.finishing.store(true, Ordering::SeqCst);
    }

    /// Mark the activity as destroyed
    pub fn destroy(&self) {
        self.finishing.store(true, Ordering::SeqCst);
        self.destroyed.store(true, Ordering::SeqCst);
    }
}

impl HostActivity for LocalActivity {
    fn is_finishing(&self) -> bool {
        self.finishing.load(Ordering::SeqCst)
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    fn run_on_ui_thread(&self, job: UiJob) -> Result<(), DispatchError> {
        self.ui.run_on_ui(job)
    }
}

/// In-process context holding at most one activity
#[derive(Default)]
pub struct LocalContext {
    activity: RwLock<Option<Arc<dyn HostActivity>>>,
}

impl LocalContext {
    pub fn new(activity: Arc<dyn HostActivity>) -> Self {
        Self {
            activity: RwLock::new(Some(activity)),
        }
    }

    /// Attach a different activity, or none
    pub fn set_activity(&self, activity: Option<Arc<dyn HostActivity>>) {
        *self.activity.write() = activity;
    }
}

impl HostContext for LocalContext {
    fn current_activity(&self) -> Option<Arc<dyn HostActivity>> {
        self.activity.read().clone()
    }
}
