//! Image space to view space mapping
//!
//! Recognizers report boxes in frame pixels. The preview view is scaled
//! (and possibly padded) relative to the frame, so every box goes through
//! [`ViewTransformContext::map`] before it is handed to the UI layer.

use serde::{Deserialize, Serialize};

use crate::bridge::BridgeError;
use crate::capture::CaptureParams;
use crate::vision::Rect;

/// A point in view space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A size in view space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A box in view space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub origin: Point,
    pub size: Size,
}

/// Per-task parameters of the image to view transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransformContext {
    /// Frame width before rotation
    pub image_width: i32,
    /// Frame height before rotation
    pub image_height: i32,
    /// Oriented frame width, the axis front-camera boxes are mirrored about
    pub mirror_width: i32,
    pub scale_x: f64,
    pub scale_y: f64,
    pub padding_left: i32,
    pub padding_top: i32,
    pub is_mirrored: bool,
}

impl ViewTransformContext {
    /// Derive the transform for one capture.
    ///
    /// Scale is view size over oriented image size in device pixels.
    pub fn from_capture(params: &CaptureParams) -> Result<Self, BridgeError> {
        let dims = params.dimensions();
        let density = f64::from(params.density);

        let scale_x = f64::from(params.view_width) / (f64::from(dims.width()) * density);
        let scale_y = f64::from(params.view_height) / (f64::from(dims.height()) * density);

        check_scale("x", scale_x)?;
        check_scale("y", scale_y)?;

        Ok(Self {
            image_width: params.width as i32,
            image_height: params.height as i32,
            mirror_width: dims.width() as i32,
            scale_x,
            scale_y,
            padding_left: params.view_padding_left,
            padding_top: params.view_padding_top,
            is_mirrored: params.facing.is_mirrored(),
        })
    }

    /// Map a box from image pixels into view space.
    ///
    /// Padding is split in half and applied toward the centre: a box left of
    /// the vertical midline is pushed right, one to the right is pulled left.
    /// The vertical branch compares the box height, not its top, against
    /// half the image height.
    pub fn map(&self, rect: &Rect) -> Bounds {
        let mut x = rect.left;
        let mut y = rect.top;

        let half_width = self.image_width / 2;
        if x < half_width {
            x += self.padding_left / 2;
        } else if x > half_width {
            x -= self.padding_left / 2;
        }

        let half_height = self.image_height / 2;
        if rect.height < half_height {
            y += self.padding_top / 2;
        } else if rect.height > half_height {
            y -= self.padding_top / 2;
        }

        Bounds {
            origin: Point {
                x: f64::from(x) * self.scale_x,
                y: f64::from(y) * self.scale_y,
            },
            size: Size {
                width: f64::from(rect.width) * self.scale_x,
                height: f64::from(rect.height) * self.scale_y,
            },
        }
    }
}

fn check_scale(axis: &'static str, value: f64) -> Result<(), BridgeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BridgeError::InvalidScale { axis, value })
    }
}

/// Reflect a point about the vertical axis of a container.
///
/// `point.x` is in scaled space; the container width is not.
pub fn position_mirrored_horizontally(point: Point, container_width: i32, scale_x: f64) -> Point {
    let original_x = point.x / scale_x;
    let mirrored_x = f64::from(container_width) - original_x;
    Point {
        x: mirrored_x * scale_x,
        y: point.y,
    }
}

/// Shift a point horizontally
pub fn position_translated_horizontally(point: Point, translate_x: f64) -> Point {
    Point {
        x: point.x + translate_x,
        y: point.y,
    }
}
