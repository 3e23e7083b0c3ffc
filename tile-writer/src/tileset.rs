use serde::Serialize;

use coordinate_converter::{CoordinateConverter, EpsgCode};
use tiler_core::octree::Octree;

use crate::error::TileWriteError;

pub const TILESET_VERSION: &str = "0.0";
pub const REFINE_ADD: &str = "add";

#[derive(Serialize)]
pub struct Tileset {
    pub asset: Asset,
    #[serde(rename = "geometricError")]
    pub geometric_error: f64,
    pub root: Root,
}

#[derive(Serialize)]
pub struct Asset {
    pub version: String,
}

#[derive(Serialize)]
pub struct Root {
    pub children: Vec<Child>,
    pub content: Content,
    #[serde(rename = "boundingVolume")]
    pub bounding_volume: BoundingVolume,
    #[serde(rename = "geometricError")]
    pub geometric_error: f64,
    pub refine: String,
}

#[derive(Serialize)]
pub struct Child {
    pub content: Content,
    #[serde(rename = "boundingVolume")]
    pub bounding_volume: BoundingVolume,
    #[serde(rename = "geometricError")]
    pub geometric_error: f64,
    pub refine: String,
}

#[derive(Serialize)]
pub struct Content {
    pub url: String,
}

/// 3D Tiles region volume: `[west, south, east, north, minH, maxH]`,
/// angles in radians.
#[derive(Serialize)]
pub struct BoundingVolume {
    pub region: [f64; 6],
}

/// Builds the manifest for an internal node.
///
/// Children are listed only when they hold points; a leaf child is linked by
/// its binary tile, an internal child by its own manifest.
pub fn build_tileset(
    octree: &Octree,
    index: usize,
    converter: &mut dyn CoordinateConverter,
    srid: EpsgCode,
) -> Result<Tileset, TileWriteError> {
    let node = octree.node(index);
    debug_assert!(!node.is_leaf, "leaf nodes carry no tileset.json");

    let mut children = Vec::new();
    for (slot, child) in node.children.iter().enumerate() {
        let Some(child_index) = *child else {
            continue;
        };
        let child_node = octree.node(child_index);
        if child_node.global_count == 0 {
            continue;
        }
        let filename = if child_node.is_leaf {
            "content.pnts"
        } else {
            "tileset.json"
        };
        let region =
            converter.convert_2d_bounding_box_to_wgs84_region(&child_node.bounding_box, srid)?;
        children.push(Child {
            content: Content {
                url: format!("{slot}/{filename}"),
            },
            bounding_volume: BoundingVolume { region },
            geometric_error: octree.geometric_error(child_index),
            refine: REFINE_ADD.to_string(),
        });
    }

    let region = converter.convert_2d_bounding_box_to_wgs84_region(&node.bounding_box, srid)?;
    let geometric_error = octree.geometric_error(index);
    Ok(Tileset {
        asset: Asset {
            version: TILESET_VERSION.to_string(),
        },
        geometric_error,
        root: Root {
            children,
            content: Content {
                url: "content.pnts".to_string(),
            },
            bounding_volume: BoundingVolume { region },
            geometric_error,
            refine: REFINE_ADD.to_string(),
        },
    })
}
