//! Vision/OCR Layer
//!
//! The recognizer seam. Text detection itself is done by an external engine
//! plugged in through [`RecognizerProvider`]; this layer defines what the
//! engine reports and how the bridge waits for it.

pub mod ocr;
pub mod replay;
pub mod text;

pub use ocr::{
    EngineSlot, PendingText, RecognizerError, RecognizerProvider, TextRecognizer, TextResolver,
};
pub use replay::{ReplayProvider, ReplayRecognizer};
pub use text::{RecognizedRegion, Rect, RegionKind};
