//! Recognized text model
//!
//! Recognizers report text as a three level hierarchy: blocks contain lines,
//! lines contain elements (roughly words). Coordinates are in source image
//! pixels.

use serde::{Deserialize, Serialize};

/// Axis-aligned box in image pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build from edge coordinates, the way most engines report boxes
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

/// Level of a region in the recognizer hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Block,
    Line,
    Element,
}

impl RegionKind {
    /// Name used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            RegionKind::Block => "block",
            RegionKind::Line => "line",
            RegionKind::Element => "element",
        }
    }
}

/// One block, line or element reported by the recognizer.
///
/// Produced once per frame and discarded after serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedRegion {
    pub kind: RegionKind,
    #[serde(default)]
    pub text: String,
    pub bounding_box: Rect,
    #[serde(default)]
    pub children: Vec<RecognizedRegion>,
}

impl RecognizedRegion {
    pub fn block(text: impl Into<String>, bounding_box: Rect, lines: Vec<RecognizedRegion>) -> Self {
        Self {
            kind: RegionKind::Block,
            text: text.into(),
            bounding_box,
            children: lines,
        }
    }

    pub fn line(text: impl Into<String>, bounding_box: Rect, elements: Vec<RecognizedRegion>) -> Self {
        Self {
            kind: RegionKind::Line,
            text: text.into(),
            bounding_box,
            children: elements,
        }
    }

    pub fn element(text: impl Into<String>, bounding_box: Rect) -> Self {
        Self {
            kind: RegionKind::Element,
            text: text.into(),
            bounding_box,
            children: Vec::new(),
        }
    }

    /// Number of regions in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RecognizedRegion::count).sum::<usize>()
    }
}
