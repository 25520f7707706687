//! Recognition Bridge
//!
//! Runs one recognizer pass per camera frame on a background thread and
//! delivers the result, mapped into view coordinates, on the UI thread.
//! - `geometry`: image space to view space
//! - `mirror`: front camera correction
//! - `serialize`: recognizer regions to the wire tree
//! - `task`: the one-shot background task

pub mod geometry;
pub mod mirror;
pub mod serialize;
pub mod task;

use thiserror::Error;

pub use geometry::{Bounds, Point, Size, ViewTransformContext};
pub use mirror::mirror_horizontally;
pub use serialize::{serialize, serialize_blocks, SerializedRegion};
pub use task::{RecognitionTask, TaskOptions, TaskState, TextRecognizerDelegate};

/// Errors surfaced to whoever creates or starts a task.
///
/// Everything after `start()` is handled inside the task and never reaches
/// the caller.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// `start()` was called more than once
    #[error("recognition task already started")]
    AlreadyStarted,
    /// Capture parameters produce a zero, negative or non-finite scale
    #[error("invalid {axis} scale factor: {value}")]
    InvalidScale { axis: &'static str, value: f64 },
    /// The worker thread could not be spawned
    #[error("failed to spawn recognition worker: {0}")]
    Spawn(#[from] std::io::Error),
}
