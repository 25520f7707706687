//! Frame data structures for captured camera content

use std::time::Instant;

use super::CameraFacing;

/// A captured camera frame, handed to the recognizer as-is
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Raw encoded pixel data (the recognizer decides how to read it)
    pub data: Vec<u8>,
    /// Frame width in pixels, before rotation
    pub width: u32,
    /// Frame height in pixels, before rotation
    pub height: u32,
    /// Sensor rotation in degrees (0, 90, 180, 270)
    pub rotation: u32,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
}

impl CapturedFrame {
    /// Create a new captured frame
    pub fn new(data: Vec<u8>, width: u32, height: u32, rotation: u32) -> Self {
        Self {
            data,
            width,
            height,
            rotation,
            timestamp: Instant::now(),
        }
    }

    /// Get frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Rotation-aware frame dimensions.
///
/// A frame rotated by 90 or 270 degrees is displayed with its axes swapped,
/// so `width()`/`height()` report the oriented size while `raw_width()`/
/// `raw_height()` keep the sensor size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    width: u32,
    height: u32,
    rotation: u32,
    facing: CameraFacing,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32, rotation: u32, facing: CameraFacing) -> Self {
        Self {
            width,
            height,
            rotation,
            facing,
        }
    }

    /// Whether the rotation swaps the axes
    pub fn is_landscape(&self) -> bool {
        self.rotation % 180 == 90
    }

    /// Oriented width
    pub fn width(&self) -> u32 {
        if self.is_landscape() {
            self.height
        } else {
            self.width
        }
    }

    /// Oriented height
    pub fn height(&self) -> u32 {
        if self.is_landscape() {
            self.width
        } else {
            self.height
        }
    }

    pub fn raw_width(&self) -> u32 {
        self.width
    }

    pub fn raw_height(&self) -> u32 {
        self.height
    }

    pub fn rotation(&self) -> u32 {
        self.rotation
    }

    pub fn facing(&self) -> CameraFacing {
        self.facing
    }
}
