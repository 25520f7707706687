//! Recognizer engine seam
//!
//! The text recognizer is an external engine. It accepts a frame and
//! answers asynchronously; the bridge waits for that answer on its worker
//! thread. Engines hold native resources, so every client is closed exactly
//! once through [`EngineSlot`].

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::capture::CapturedFrame;
use crate::vision::text::RecognizedRegion;

/// Failures reported by (or while waiting on) a recognizer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognizerError {
    /// The engine rejected or failed to process the frame
    #[error("recognizer engine error: {0}")]
    Engine(String),
    /// The client was closed before it could answer
    #[error("recognizer client is closed")]
    Closed,
    /// No answer within the configured bound
    #[error("recognition timed out after {0:?}")]
    TimedOut(Duration),
    /// The engine dropped the request without answering
    #[error("recognizer dropped the pending result")]
    Disconnected,
}

type TextResult = Result<Vec<RecognizedRegion>, RecognizerError>;

/// The eventual result of one `process` call.
#[derive(Debug)]
pub struct PendingText {
    rx: Receiver<TextResult>,
}

/// Write side of a [`PendingText`], kept by the engine until it has an answer
#[derive(Debug)]
pub struct TextResolver {
    tx: Sender<TextResult>,
}

impl PendingText {
    /// Create an unresolved result and the resolver that completes it
    pub fn channel() -> (TextResolver, PendingText) {
        let (tx, rx) = bounded(1);
        (TextResolver { tx }, PendingText { rx })
    }

    /// An already completed result, for engines that answer synchronously
    pub fn ready(result: TextResult) -> Self {
        let (resolver, pending) = Self::channel();
        resolver.resolve(result);
        pending
    }

    /// Block until the engine answers.
    ///
    /// With `timeout = None` this waits indefinitely.
    pub fn wait(self, timeout: Option<Duration>) -> TextResult {
        match timeout {
            None => self.rx.recv().map_err(|_| RecognizerError::Disconnected)?,
            Some(limit) => match self.rx.recv_timeout(limit) {
                Ok(result) => result,
                Err(RecvTimeoutError::Timeout) => Err(RecognizerError::TimedOut(limit)),
                Err(RecvTimeoutError::Disconnected) => Err(RecognizerError::Disconnected),
            },
        }
    }
}

impl TextResolver {
    /// Complete the pending result. A waiter that already gave up is ignored.
    pub fn resolve(self, result: TextResult) {
        let _ = self.tx.send(result);
    }
}

/// A live recognizer client
pub trait TextRecognizer: Send {
    /// Submit a frame. Must return without waiting for the engine.
    ///
    /// Called with the task's engine lock held, so a `cancel()` blocks
    /// until this returns.
    fn process(&mut self, frame: &CapturedFrame) -> PendingText;

    /// Release engine resources
    fn close(&mut self);
}

/// Hands out recognizer clients, one per task
pub trait RecognizerProvider: Send + Sync {
    fn client(&self) -> Result<Box<dyn TextRecognizer>, RecognizerError>;
}

/// Holder for a task's recognizer client.
///
/// Shared between the worker, the UI-thread delivery and `cancel()`.
/// Whoever releases first closes the engine; later releases are no-ops.
#[derive(Default)]
pub struct EngineSlot {
    engine: Mutex<Option<Box<dyn TextRecognizer>>>,
}

impl EngineSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly created client. A previously held client is closed.
    pub fn install(&self, engine: Box<dyn TextRecognizer>) {
        let previous = self.engine.lock().replace(engine);
        if let Some(mut previous) = previous {
            previous.close();
        }
    }

    /// Submit a frame to the held client, `None` if it was already released
    pub fn submit(&self, frame: &CapturedFrame) -> Option<PendingText> {
        // Only the submission happens under the lock; waiting does not.
        self.engine.lock().as_mut().map(|engine| engine.process(frame))
    }

    /// Close the held client. Returns whether this call did the closing.
    pub fn release(&self) -> bool {
        let engine = self.engine.lock().take();
        match engine {
            Some(mut engine) => {
                engine.close();
                debug!("Recognizer client released");
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self) -> bool {
        self.engine.lock().is_some()
    }
}

impl Drop for EngineSlot {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for EngineSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineSlot")
            .field("held", &self.is_held())
            .finish()
    }
}
