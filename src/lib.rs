//! camera-text-bridge - camera frame text recognition bridge
//!
//! Hands camera frames to an external text recognizer on a background
//! thread and delivers the recognized blocks, lines and elements to the UI
//! thread as a tree of view-space boxes.

pub mod bridge;
pub mod capture;
pub mod config;
pub mod shared;
pub mod vision;

pub use bridge::{
    BridgeError, RecognitionTask, SerializedRegion, TaskOptions, TaskState,
    TextRecognizerDelegate, ViewTransformContext,
};
pub use capture::{CameraFacing, CaptureParams, CapturedFrame, ImageDimensions};
pub use shared::{HostActivity, HostContext, UiHandle, UiLoop};
pub use vision::{RecognizedRegion, RecognizerError, RecognizerProvider, Rect, RegionKind, TextRecognizer};
