//! Front camera mirroring
//!
//! Front camera previews are shown mirrored, but recognizers report boxes in
//! unmirrored frame coordinates. This flips every box of a serialized tree
//! about the frame's vertical axis.

use crate::bridge::geometry::{
    position_mirrored_horizontally, position_translated_horizontally, Bounds,
};
use crate::bridge::serialize::SerializedRegion;

/// Return a copy of `region` with every box mirrored horizontally.
///
/// The mirrored origin is the box's former right edge, so each origin is
/// reflected and then moved left by the box's own width.
pub fn mirror_horizontally(region: &SerializedRegion, axis_width: i32, scale_x: f64) -> SerializedRegion {
    let bounds = region.bounds;
    let mirrored = position_mirrored_horizontally(bounds.origin, axis_width, scale_x);
    let origin = position_translated_horizontally(mirrored, -bounds.size.width);

    SerializedRegion {
        kind: region.kind,
        value: region.value.clone(),
        bounds: Bounds {
            origin,
            size: bounds.size,
        },
        components: region
            .components
            .iter()
            .map(|component| mirror_horizontally(component, axis_width, scale_x))
            .collect(),
    }
}
