//! Camera Capture Parameters
//!
//! Describes an incoming camera frame and the view it will be drawn over.
//! Capture and encoding happen in the host; this layer only carries the
//! numbers the bridge needs to map recognizer output into view space.

pub mod frame;

use serde::{Deserialize, Serialize};

pub use frame::{CapturedFrame, ImageDimensions};

/// Which physical camera produced the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraFacing {
    /// Rear camera
    #[default]
    Back,
    /// Front (selfie) camera; previews are mirrored
    Front,
}

impl CameraFacing {
    /// Front camera previews are shown mirrored
    pub fn is_mirrored(self) -> bool {
        matches!(self, CameraFacing::Front)
    }
}

/// Everything the host supplies when a frame is submitted for recognition.
///
/// All fields are required. Width and height must match the encoding of the
/// frame bytes; nothing here checks that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureParams {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Sensor rotation in degrees
    pub rotation: u32,
    /// Device pixel density
    pub density: f32,
    /// Camera that produced the frame
    pub facing: CameraFacing,
    /// Destination view width
    pub view_width: i32,
    /// Destination view height
    pub view_height: i32,
    /// Destination view left padding
    pub view_padding_left: i32,
    /// Destination view top padding
    pub view_padding_top: i32,
}

impl CaptureParams {
    /// Rotation-aware dimensions for this capture
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height, self.rotation, self.facing)
    }
}
