//! Replay recognizer
//!
//! Plays back a recorded recognizer answer instead of running an engine.
//! Used by the `camtext` harness and for exercising the bridge without a
//! device.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::capture::CapturedFrame;
use crate::vision::ocr::{PendingText, RecognizerError, RecognizerProvider, TextRecognizer};
use crate::vision::text::RecognizedRegion;

/// What a replayed engine answers with
#[derive(Debug, Clone)]
enum Recording {
    Blocks(Arc<Vec<RecognizedRegion>>),
    Failure(String),
}

/// Provider handing out clients that replay one recording
#[derive(Debug, Clone)]
pub struct ReplayProvider {
    recording: Recording,
    latency: Option<Duration>,
}

impl ReplayProvider {
    /// Replay the given blocks for every frame
    pub fn new(blocks: Vec<RecognizedRegion>) -> Self {
        Self {
            recording: Recording::Blocks(Arc::new(blocks)),
            latency: None,
        }
    }

    /// Every frame fails with an engine error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            recording: Recording::Failure(message.into()),
            latency: None,
        }
    }

    /// Parse a JSON array of blocks
    pub fn from_json(json: &str) -> Result<Self> {
        let blocks: Vec<RecognizedRegion> =
            serde_json::from_str(json).context("Failed to parse recognizer recording")?;
        Ok(Self::new(blocks))
    }

    /// Load a JSON recording from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recording: {:?}", path))?;
        Self::from_json(&content)
    }

    /// Answer from a background thread after `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

impl RecognizerProvider for ReplayProvider {
    fn client(&self) -> Result<Box<dyn TextRecognizer>, RecognizerError> {
        Ok(Box::new(ReplayRecognizer {
            recording: self.recording.clone(),
            latency: self.latency,
            closed: false,
        }))
    }
}

/// A client replaying a recording
#[derive(Debug)]
pub struct ReplayRecognizer {
    recording: Recording,
    latency: Option<Duration>,
    closed: bool,
}

impl ReplayRecognizer {
    fn answer(recording: &Recording) -> Result<Vec<RecognizedRegion>, RecognizerError> {
        match recording {
            Recording::Blocks(blocks) => Ok(blocks.as_ref().clone()),
            Recording::Failure(message) => Err(RecognizerError::Engine(message.clone())),
        }
    }
}

impl TextRecognizer for ReplayRecognizer {
    fn process(&mut self, frame: &CapturedFrame) -> PendingText {
        if self.closed {
            return PendingText::ready(Err(RecognizerError::Closed));
        }

        debug!(
            "Replaying recognition for {}x{} frame (rotation {})",
            frame.width, frame.height, frame.rotation
        );

        let Some(latency) = self.latency else {
            return PendingText::ready(Self::answer(&self.recording));
        };

        let (resolver, pending) = PendingText::channel();
        let recording = self.recording.clone();
        std::thread::spawn(move || {
            std::thread::sleep(latency);
            resolver.resolve(Self::answer(&recording));
        });
        pending
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
