//! Recognizer output to wire tree
//!
//! Output shape, one object per region:
//!
//! ```json
//! { "type": "line", "value": "...",
//!   "bounds": { "origin": { "x": 0.0, "y": 0.0 }, "size": { "width": 0.0, "height": 0.0 } },
//!   "components": [ ... ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::bridge::geometry::{Bounds, ViewTransformContext};
use crate::bridge::mirror::mirror_horizontally;
use crate::vision::{RecognizedRegion, RegionKind};

/// One region of the tree handed to the UI layer, in view coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedRegion {
    #[serde(rename = "type")]
    pub kind: RegionKind,
    pub value: String,
    pub bounds: Bounds,
    pub components: Vec<SerializedRegion>,
}

/// Serialize one region and its subtree
pub fn serialize(region: &RecognizedRegion, ctx: &ViewTransformContext) -> SerializedRegion {
    let components = match region.kind {
        RegionKind::Block | RegionKind::Line => region
            .children
            .iter()
            .map(|child| serialize(child, ctx))
            .collect(),
        RegionKind::Element => Vec::new(),
    };

    SerializedRegion {
        kind: region.kind,
        value: region.text.clone(),
        bounds: ctx.map(&region.bounding_box),
        components,
    }
}

/// Serialize the recognizer's blocks, mirroring them for front camera frames
pub fn serialize_blocks(blocks: &[RecognizedRegion], ctx: &ViewTransformContext) -> Vec<SerializedRegion> {
    blocks
        .iter()
        .map(|block| {
            let serialized = serialize(block, ctx);
            if ctx.is_mirrored {
                mirror_horizontally(&serialized, ctx.mirror_width, ctx.scale_x)
            } else {
                serialized
            }
        })
        .collect()
}
