//! One-shot text recognition task
//!
//! A task owns one camera frame. `start()` spawns a worker thread that asks
//! the recognizer for text and waits for the answer; the result is then
//! posted to the host activity's UI thread, where it is serialized and
//! handed to the delegate.
//!
//! Nothing after `start()` is reported to the caller as an error. Engine
//! failures are logged and treated as "no text", a host that went away in
//! the meantime simply gets nothing, and a cancelled task stays silent.

use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info_span, warn};
use uuid::Uuid;

use crate::bridge::geometry::ViewTransformContext;
use crate::bridge::serialize::{serialize_blocks, SerializedRegion};
use crate::bridge::BridgeError;
use crate::capture::{CaptureParams, CapturedFrame};
use crate::shared::{HostActivity, HostContext, UiJob};
use crate::vision::{EngineSlot, RecognizedRegion, RecognizerError, RecognizerProvider};

/// Receives the outcome of a task, always on the UI thread
pub trait TextRecognizerDelegate: Send + Sync {
    /// Text was recognized. Called at most once, before `on_task_completed`.
    fn on_text_recognized(&self, blocks: Vec<SerializedRegion>);

    /// The task finished, with or without text. Called at most once.
    fn on_task_completed(&self);
}

/// Lifecycle of a [`RecognitionTask`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Created,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Cancelled | TaskState::Failed
        )
    }
}

/// Per-task tuning
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskOptions {
    /// Upper bound on the wait for the recognizer. `None` waits forever.
    pub recognizer_timeout: Option<Duration>,
}

/// State shared by the task handle, its worker and its UI-thread delivery
struct TaskShared {
    id: Uuid,
    cancelled: AtomicBool,
    state: Mutex<TaskState>,
    engine: EngineSlot,
}

impl TaskShared {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Move to a terminal state unless one was already reached
    fn finish(&self, next: TaskState) {
        let mut state = self.state.lock();
        if !state.is_terminal() {
            *state = next;
        }
    }
}

/// Everything the worker thread takes ownership of
struct Job {
    shared: Arc<TaskShared>,
    delegate: Arc<dyn TextRecognizerDelegate>,
    context: Weak<dyn HostContext>,
    activity: Option<Weak<dyn HostActivity>>,
    provider: Arc<dyn RecognizerProvider>,
    frame: CapturedFrame,
    transform: ViewTransformContext,
    options: TaskOptions,
}

/// Recognizes text in a single camera frame in the background
pub struct RecognitionTask {
    shared: Arc<TaskShared>,
    job: Mutex<Option<Job>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl RecognitionTask {
    /// Create a task for one frame.
    ///
    /// Only weak references to `context` and its current activity are kept,
    /// so a pending task never keeps the host UI alive.
    pub fn new<C: HostContext + 'static>(
        delegate: Arc<dyn TextRecognizerDelegate>,
        context: &Arc<C>,
        provider: Arc<dyn RecognizerProvider>,
        image_data: Vec<u8>,
        params: CaptureParams,
        options: TaskOptions,
    ) -> Result<Self, BridgeError> {
        let transform = ViewTransformContext::from_capture(&params)?;
        let activity = context
            .current_activity()
            .map(|activity| Arc::downgrade(&activity));
        let context: Weak<C> = Arc::downgrade(context);
        let context: Weak<dyn HostContext> = context;

        let shared = Arc::new(TaskShared {
            id: Uuid::new_v4(),
            cancelled: AtomicBool::new(false),
            state: Mutex::new(TaskState::Created),
            engine: EngineSlot::new(),
        });

        let job = Job {
            shared: shared.clone(),
            delegate,
            context,
            activity,
            provider,
            frame: CapturedFrame::new(image_data, params.width, params.height, params.rotation),
            transform,
            options,
        };

        Ok(Self {
            shared,
            job: Mutex::new(Some(job)),
            worker: Mutex::new(None),
        })
    }

    /// Task id, as recorded in logs
    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    pub fn state(&self) -> TaskState {
        *self.shared.state.lock()
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.is_cancelled()
    }

    /// Spawn the worker thread. Returns without waiting for recognition.
    pub fn start(&self) -> Result<(), BridgeError> {
        let job = self.job.lock().take().ok_or(BridgeError::AlreadyStarted)?;

        {
            let mut state = self.shared.state.lock();
            if *state == TaskState::Created {
                *state = TaskState::Running;
            }
        }

        let name = format!("text-recognizer-{}", self.shared.id.simple());
        match thread::Builder::new().name(name).spawn(move || job.run()) {
            Ok(handle) => {
                *self.worker.lock() = Some(handle);
                Ok(())
            }
            Err(e) => {
                error!(task = %self.shared.id, "Failed to spawn recognition worker: {}", e);
                self.shared.finish(TaskState::Failed);
                Err(e.into())
            }
        }
    }

    /// Stop the task. Safe to call at any time and more than once.
    ///
    /// No delegate callback fires after this returns, and the recognizer
    /// client is closed if one is held.
    pub fn cancel(&self) {
        if !self.shared.cancelled.swap(true, Ordering::SeqCst) {
            debug!(task = %self.shared.id, "Recognition task cancelled");
        }
        self.shared.finish(TaskState::Cancelled);
        self.shared.engine.release();
    }

    /// Wait for the worker thread to exit.
    ///
    /// Delivery happens later, when the UI thread runs the posted job.
    pub fn join(&self) {
        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                error!(task = %self.shared.id, "Recognition worker panicked");
                self.shared.engine.release();
                self.shared.finish(TaskState::Failed);
            }
        }
    }
}

impl std::fmt::Debug for RecognitionTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognitionTask")
            .field("id", &self.shared.id)
            .field("state", &self.state())
            .finish()
    }
}

impl Job {
    fn run(self) {
        let span = info_span!("text_recognition", task = %self.shared.id);
        let _enter = span.enter();

        if self.shared.is_cancelled() {
            debug!("Cancelled before recognition started");
            return;
        }

        let result = self.recognize();
        match &result {
            Ok(blocks) => debug!(
                "Recognizer returned {} blocks ({} regions)",
                blocks.len(),
                blocks.iter().map(RecognizedRegion::count).sum::<usize>()
            ),
            Err(e) => error!("Error processing image: {}", e),
        }

        let Some(activity) = self.live_activity() else {
            if self.shared.is_cancelled() {
                debug!("Cancelled before delivery");
            } else {
                warn!("Host is gone, dropping recognition result");
            }
            self.shared.engine.release();
            self.shared.finish(TaskState::Completed);
            return;
        };

        let shared = self.shared.clone();
        let delegate = self.delegate.clone();
        let transform = self.transform;
        let job: UiJob = Box::new(move || deliver(&shared, delegate.as_ref(), &transform, result));

        if let Err(e) = activity.run_on_ui_thread(job) {
            error!("Error posting result to UI thread: {}", e);
            self.shared.engine.release();
            self.shared.finish(TaskState::Failed);
        }
    }

    fn recognize(&self) -> Result<Vec<RecognizedRegion>, RecognizerError> {
        let client = self.provider.client()?;
        self.shared.engine.install(client);
        let pending = self
            .shared
            .engine
            .submit(&self.frame)
            .ok_or(RecognizerError::Closed)?;
        pending.wait(self.options.recognizer_timeout)
    }

    /// The destination activity, if it can still take results
    fn live_activity(&self) -> Option<Arc<dyn HostActivity>> {
        let _context = self.context.upgrade()?;
        let activity = self.activity.as_ref()?.upgrade()?;

        if activity.is_finishing() || activity.is_destroyed() || self.shared.is_cancelled() {
            return None;
        }
        Some(activity)
    }
}

/// Runs on the UI thread
fn deliver(
    shared: &TaskShared,
    delegate: &dyn TextRecognizerDelegate,
    transform: &ViewTransformContext,
    result: Result<Vec<RecognizedRegion>, RecognizerError>,
) {
    let span = info_span!("text_recognition", task = %shared.id);
    let _enter = span.enter();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        shared.engine.release();

        if shared.is_cancelled() {
            debug!("Cancelled before delivery");
            return TaskState::Cancelled;
        }

        let state = match result {
            Ok(blocks) => {
                let tree = serialize_blocks(&blocks, transform);
                delegate.on_text_recognized(tree);
                TaskState::Completed
            }
            Err(_) => TaskState::Failed,
        };
        delegate.on_task_completed();
        state
    }));

    match outcome {
        Ok(state) => shared.finish(state),
        Err(_) => {
            error!("Error in UI thread while delivering recognition result");
            shared.finish(TaskState::Failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CameraFacing;
    use crate::shared::{DispatchError, LocalActivity, LocalContext, UiHandle, UiLoop};
    use crate::vision::{PendingText, Rect, TextRecognizer, TextResolver};
    use std::sync::atomic::AtomicUsize;
    use std::thread::ThreadId;
    use std::time::Instant;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Recognized(Vec<SerializedRegion>),
        Completed,
    }

    #[derive(Default)]
    struct RecordingDelegate {
        events: Mutex<Vec<(Event, ThreadId)>>,
        panic_on_recognized: bool,
    }

    impl RecordingDelegate {
        fn events(&self) -> Vec<Event> {
            self.events.lock().iter().map(|(e, _)| e.clone()).collect()
        }

        fn threads(&self) -> Vec<ThreadId> {
            self.events.lock().iter().map(|(_, t)| *t).collect()
        }
    }

    impl TextRecognizerDelegate for RecordingDelegate {
        fn on_text_recognized(&self, blocks: Vec<SerializedRegion>) {
            if self.panic_on_recognized {
                panic!("delegate failure");
            }
            self.events
                .lock()
                .push((Event::Recognized(blocks), thread::current().id()));
        }

        fn on_task_completed(&self) {
            self.events
                .lock()
                .push((Event::Completed, thread::current().id()));
        }
    }

    enum Answer {
        Blocks(Vec<RecognizedRegion>),
        Fail(String),
        /// Leave the result for the test to resolve
        Manual,
    }

    struct TestProvider {
        answer: Answer,
        clients: AtomicUsize,
        closes: Arc<AtomicUsize>,
        resolver: Arc<Mutex<Option<TextResolver>>>,
    }

    impl TestProvider {
        fn new(answer: Answer) -> Arc<Self> {
            Arc::new(Self {
                answer,
                clients: AtomicUsize::new(0),
                closes: Arc::new(AtomicUsize::new(0)),
                resolver: Arc::new(Mutex::new(None)),
            })
        }

        fn clients(&self) -> usize {
            self.clients.load(Ordering::SeqCst)
        }

        fn closes(&self) -> usize {
            self.closes.load(Ordering::SeqCst)
        }
    }

    struct TestEngine {
        answer: Option<Result<Vec<RecognizedRegion>, RecognizerError>>,
        closes: Arc<AtomicUsize>,
        resolver: Arc<Mutex<Option<TextResolver>>>,
    }

    impl TextRecognizer for TestEngine {
        fn process(&mut self, _frame: &CapturedFrame) -> PendingText {
            match self.answer.take() {
                Some(result) => PendingText::ready(result),
                None => {
                    let (resolver, pending) = PendingText::channel();
                    *self.resolver.lock() = Some(resolver);
                    pending
                }
            }
        }

        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl RecognizerProvider for TestProvider {
        fn client(&self) -> Result<Box<dyn TextRecognizer>, RecognizerError> {
            self.clients.fetch_add(1, Ordering::SeqCst);
            let answer = match &self.answer {
                Answer::Blocks(blocks) => Some(Ok(blocks.clone())),
                Answer::Fail(message) => Some(Err(RecognizerError::Engine(message.clone()))),
                Answer::Manual => None,
            };
            Ok(Box::new(TestEngine {
                answer,
                closes: self.closes.clone(),
                resolver: self.resolver.clone(),
            }))
        }
    }

    struct Harness {
        ui: UiLoop,
        activity: Arc<LocalActivity>,
        context: Arc<LocalContext>,
        delegate: Arc<RecordingDelegate>,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_delegate(RecordingDelegate::default())
        }

        fn with_delegate(delegate: RecordingDelegate) -> Self {
            let ui = UiLoop::new();
            let activity = Arc::new(LocalActivity::new(ui.handle()));
            let context = Arc::new(LocalContext::new(activity.clone()));
            Self {
                ui,
                activity,
                context,
                delegate: Arc::new(delegate),
            }
        }

        fn task(&self, provider: Arc<TestProvider>, params: CaptureParams) -> RecognitionTask {
            self.task_with_options(provider, params, TaskOptions::default())
        }

        fn task_with_options(
            &self,
            provider: Arc<TestProvider>,
            params: CaptureParams,
            options: TaskOptions,
        ) -> RecognitionTask {
            RecognitionTask::new(
                self.delegate.clone(),
                &self.context,
                provider,
                vec![0; 16],
                params,
                options,
            )
            .unwrap()
        }
    }

    fn params(facing: CameraFacing) -> CaptureParams {
        CaptureParams {
            width: 200,
            height: 100,
            rotation: 0,
            density: 1.0,
            facing,
            view_width: 200,
            view_height: 100,
            view_padding_left: 0,
            view_padding_top: 0,
        }
    }

    fn blocks() -> Vec<RecognizedRegion> {
        vec![RecognizedRegion::block(
            "HI",
            Rect::new(20, 10, 40, 20),
            vec![RecognizedRegion::line(
                "HI",
                Rect::new(20, 10, 40, 20),
                vec![RecognizedRegion::element("HI", Rect::new(20, 10, 40, 20))],
            )],
        )]
    }

    fn wait_until(condition: impl Fn() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !condition() {
            assert!(Instant::now() < deadline, "condition not reached in time");
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_delivers_tree_then_completion_on_ui_thread() {
        let harness = Harness::new();
        let provider = TestProvider::new(Answer::Blocks(blocks()));
        let task = harness.task(provider.clone(), params(CameraFacing::Back));

        assert_eq!(task.state(), TaskState::Created);
        task.start().unwrap();
        task.join();

        // nothing is delivered until the UI thread runs
        assert!(harness.delegate.events().is_empty());
        assert_eq!(harness.ui.run_pending(), 1);

        let events = harness.delegate.events();
        assert_eq!(events.len(), 2);
        let Event::Recognized(tree) = &events[0] else {
            panic!("expected recognized event first, got {:?}", events[0]);
        };
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].value, "HI");
        assert_eq!(tree[0].bounds.origin.x, 20.0);
        assert_eq!(tree[0].components[0].components.len(), 1);
        assert_eq!(events[1], Event::Completed);

        let ui_thread = thread::current().id();
        assert!(harness.delegate.threads().iter().all(|t| *t == ui_thread));

        assert_eq!(task.state(), TaskState::Completed);
        assert_eq!(provider.closes(), 1);
    }

    #[test]
    fn test_front_camera_result_is_mirrored() {
        let harness = Harness::new();
        let provider = TestProvider::new(Answer::Blocks(blocks()));
        let task = harness.task(provider, params(CameraFacing::Front));

        task.start().unwrap();
        task.join();
        harness.ui.run_pending();

        let events = harness.delegate.events();
        let Event::Recognized(tree) = &events[0] else {
            panic!("expected recognized event");
        };
        // 200 - 20 - 40
        assert_eq!(tree[0].bounds.origin.x, 140.0);
        assert_eq!(tree[0].components[0].components[0].bounds.origin.x, 140.0);
    }

    #[test]
    fn test_engine_failure_still_completes() {
        let harness = Harness::new();
        let provider = TestProvider::new(Answer::Fail("decode error".into()));
        let task = harness.task(provider.clone(), params(CameraFacing::Back));

        task.start().unwrap();
        task.join();
        harness.ui.run_pending();

        assert_eq!(harness.delegate.events(), vec![Event::Completed]);
        assert_eq!(task.state(), TaskState::Failed);
        assert_eq!(provider.closes(), 1);
    }

    #[test]
    fn test_cancel_before_start_is_silent() {
        let harness = Harness::new();
        let provider = TestProvider::new(Answer::Blocks(blocks()));
        let task = harness.task(provider.clone(), params(CameraFacing::Back));

        task.cancel();
        task.start().unwrap();
        task.join();
        assert_eq!(harness.ui.run_pending(), 0);

        assert!(harness.delegate.events().is_empty());
        assert_eq!(provider.clients(), 0);
        assert_eq!(task.state(), TaskState::Cancelled);
    }

    #[test]
    fn test_cancel_after_recognition_before_delivery() {
        let harness = Harness::new();
        let provider = TestProvider::new(Answer::Blocks(blocks()));
        let task = harness.task(provider.clone(), params(CameraFacing::Back));

        task.start().unwrap();
        task.join();
        assert_eq!(harness.ui.pending(), 1);

        task.cancel();
        task.cancel();
        harness.ui.run_pending();

        assert!(harness.delegate.events().is_empty());
        assert_eq!(provider.closes(), 1);
        assert_eq!(task.state(), TaskState::Cancelled);
    }

    #[test]
    fn test_cancel_while_engine_is_working() {
        let harness = Harness::new();
        let provider = TestProvider::new(Answer::Manual);
        let task = harness.task(provider.clone(), params(CameraFacing::Back));

        task.start().unwrap();
        wait_until(|| provider.resolver.lock().is_some());
        assert_eq!(task.state(), TaskState::Running);

        task.cancel();
        assert_eq!(provider.closes(), 1);

        let resolver = provider.resolver.lock().take().unwrap();
        resolver.resolve(Ok(blocks()));
        task.join();
        harness.ui.run_pending();

        assert!(harness.delegate.events().is_empty());
        assert_eq!(provider.closes(), 1);
        assert_eq!(task.state(), TaskState::Cancelled);
    }

    #[test]
    fn test_finishing_activity_gets_nothing() {
        let harness = Harness::new();
        let provider = TestProvider::new(Answer::Blocks(blocks()));
        let task = harness.task(provider.clone(), params(CameraFacing::Back));

        harness.activity.finish();
        task.start().unwrap();
        task.join();

        assert_eq!(harness.ui.run_pending(), 0);
        assert!(harness.delegate.events().is_empty());
        assert_eq!(provider.closes(), 1);
        assert_eq!(task.state(), TaskState::Completed);
    }

    #[test]
    fn test_dropped_context_gets_nothing() {
        let Harness {
            ui,
            activity,
            context,
            delegate,
        } = Harness::new();
        let provider = TestProvider::new(Answer::Blocks(blocks()));
        let task = RecognitionTask::new(
            delegate.clone(),
            &context,
            provider.clone(),
            vec![],
            params(CameraFacing::Back),
            TaskOptions::default(),
        )
        .unwrap();

        drop(context);
        task.start().unwrap();
        task.join();

        assert_eq!(ui.run_pending(), 0);
        assert!(delegate.events().is_empty());
        assert_eq!(provider.closes(), 1);
        drop(activity);
    }

    #[test]
    fn test_detached_activity_gets_nothing() {
        let harness = Harness::new();
        harness.context.set_activity(None);
        let provider = TestProvider::new(Answer::Blocks(blocks()));
        let task = harness.task(provider.clone(), params(CameraFacing::Back));

        task.start().unwrap();
        task.join();

        assert_eq!(harness.ui.run_pending(), 0);
        assert!(harness.delegate.events().is_empty());
        assert_eq!(provider.closes(), 1);
    }

    /// Destroyed without having been marked finishing first
    struct DestroyedActivity {
        ui: UiHandle,
    }

    impl HostActivity for DestroyedActivity {
        fn is_finishing(&self) -> bool {
            false
        }

        fn is_destroyed(&self) -> bool {
            true
        }

        fn run_on_ui_thread(&self, job: UiJob) -> Result<(), DispatchError> {
            self.ui.run_on_ui(job)
        }
    }

    #[test]
    fn test_destroyed_activity_gets_nothing() {
        let harness = Harness::new();
        let destroyed = Arc::new(DestroyedActivity {
            ui: harness.ui.handle(),
        });
        let context = Arc::new(LocalContext::new(destroyed.clone()));
        let provider = TestProvider::new(Answer::Blocks(blocks()));
        let task = RecognitionTask::new(
            harness.delegate.clone(),
            &context,
            provider.clone(),
            vec![],
            params(CameraFacing::Back),
            TaskOptions::default(),
        )
        .unwrap();

        task.start().unwrap();
        task.join();

        assert_eq!(harness.ui.run_pending(), 0);
        assert!(harness.delegate.events().is_empty());
        assert_eq!(provider.closes(), 1);
        assert_eq!(task.state(), TaskState::Completed);
    }

    #[test]
    fn test_engine_released_when_delivery_never_runs() {
        let Harness {
            ui,
            activity,
            context,
            delegate,
        } = Harness::new();
        let provider = TestProvider::new(Answer::Blocks(blocks()));
        let task = RecognitionTask::new(
            delegate.clone(),
            &context,
            provider.clone(),
            vec![],
            params(CameraFacing::Back),
            TaskOptions::default(),
        )
        .unwrap();

        task.start().unwrap();
        task.join();
        assert_eq!(ui.pending(), 1);
        assert_eq!(provider.closes(), 0);

        // The queued job and the task are the last owners of the engine
        drop(ui);
        drop(task);
        drop((activity, context));

        assert!(delegate.events().is_empty());
        assert_eq!(provider.closes(), 1);
    }

    #[test]
    fn test_recognizer_timeout_counts_as_no_text() {
        let harness = Harness::new();
        let provider = TestProvider::new(Answer::Manual);
        let task = harness.task_with_options(
            provider.clone(),
            params(CameraFacing::Back),
            TaskOptions {
                recognizer_timeout: Some(Duration::from_millis(20)),
            },
        );

        task.start().unwrap();
        task.join();
        harness.ui.run_pending();

        assert_eq!(harness.delegate.events(), vec![Event::Completed]);
        assert_eq!(task.state(), TaskState::Failed);
        assert_eq!(provider.closes(), 1);
    }

    #[test]
    fn test_start_twice_fails() {
        let harness = Harness::new();
        let provider = TestProvider::new(Answer::Blocks(vec![]));
        let task = harness.task(provider, params(CameraFacing::Back));

        task.start().unwrap();
        assert!(matches!(task.start(), Err(BridgeError::AlreadyStarted)));
        task.join();
        harness.ui.run_pending();
        assert_eq!(harness.delegate.events(), vec![Event::Recognized(vec![]), Event::Completed]);
    }

    #[test]
    fn test_ui_loop_gone_releases_engine() {
        let harness = Harness::new();
        let provider = TestProvider::new(Answer::Blocks(blocks()));
        let task = harness.task(provider.clone(), params(CameraFacing::Back));

        let Harness {
            ui,
            activity,
            context,
            delegate,
        } = harness;
        drop(ui);

        task.start().unwrap();
        task.join();

        assert!(delegate.events().is_empty());
        assert_eq!(provider.closes(), 1);
        assert_eq!(task.state(), TaskState::Failed);
        drop((activity, context));
    }

    #[test]
    fn test_panicking_delegate_is_contained() {
        let harness = Harness::with_delegate(RecordingDelegate {
            panic_on_recognized: true,
            ..Default::default()
        });
        let provider = TestProvider::new(Answer::Blocks(blocks()));
        let task = harness.task(provider.clone(), params(CameraFacing::Back));

        task.start().unwrap();
        task.join();
        assert_eq!(harness.ui.run_pending(), 1);

        assert!(harness.delegate.events().is_empty());
        assert_eq!(provider.closes(), 1);
        assert_eq!(task.state(), TaskState::Failed);
    }

    #[test]
    fn test_invalid_scale_rejected_at_construction() {
        let harness = Harness::new();
        let mut p = params(CameraFacing::Back);
        p.density = 0.0;
        let result = RecognitionTask::new(
            harness.delegate.clone(),
            &harness.context,
            TestProvider::new(Answer::Blocks(vec![])),
            vec![],
            p,
            TaskOptions::default(),
        );
        assert!(matches!(result, Err(BridgeError::InvalidScale { .. })));
    }
}
