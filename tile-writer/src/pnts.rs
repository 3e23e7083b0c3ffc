use serde::Serialize;

use coordinate_converter::{Coordinate, CoordinateConverter, EpsgCode};
use tiler_core::pointcloud::point::Point;

use crate::error::TileWriteError;

/// Fixed part of the pnts header: magic, version, byteLength and the four
/// table length fields.
pub const PNTS_HEADER_LENGTH: usize = 28;

const PNTS_MAGIC: &[u8; 4] = b"pnts";
const PNTS_VERSION: u32 = 1;

#[derive(Serialize)]
struct FeatureTableHeader {
    #[serde(rename = "POINTS_LENGTH")]
    points_length: usize,
    #[serde(rename = "RTC_CENTER")]
    rtc_center: [f64; 3],
    #[serde(rename = "POSITION")]
    position: ByteOffset,
    #[serde(rename = "RGB")]
    rgb: ByteOffset,
}

#[derive(Serialize)]
struct ByteOffset {
    #[serde(rename = "byteOffset")]
    byte_offset: usize,
}

#[derive(Serialize)]
struct BatchTableHeader {
    #[serde(rename = "INTENSITY")]
    intensity: BatchAttribute,
    #[serde(rename = "CLASSIFICATION")]
    classification: BatchAttribute,
}

#[derive(Serialize)]
struct BatchAttribute {
    #[serde(rename = "byteOffset")]
    byte_offset: usize,
    #[serde(rename = "componentType")]
    component_type: &'static str,
    #[serde(rename = "type")]
    attribute_type: &'static str,
}

/// Builds the binary pnts payload for one octree node.
///
/// Point positions are converted to ECEF, re-expressed relative to their
/// running average (recorded as `RTC_CENTER`) and truncated to f32, so the
/// tile keeps sub-meter precision without f64 vertex data. The feature table
/// binary holds positions then colors; the batch table binary holds
/// intensities then classifications. JSON headers are space-padded and the
/// binary sections zero-padded so every length field is a multiple of four,
/// and `byteLength` covers the whole tile including the batch table.
pub fn build_pnts(
    items: &[Point],
    converter: &mut dyn CoordinateConverter,
    srid: EpsgCode,
) -> Result<Vec<u8>, TileWriteError> {
    let point_count = items.len();

    let mut cartesians = Vec::with_capacity(point_count);
    for item in items {
        let cartesian = converter.convert_to_wgs84_cartesian(
            Coordinate {
                x: item.x,
                y: item.y,
                z: item.z,
            },
            srid,
        )?;
        cartesians.push(cartesian);
    }

    let mut center = [0.0_f64; 3];
    for cartesian in &cartesians {
        center[0] += cartesian.x;
        center[1] += cartesian.y;
        center[2] += cartesian.z;
    }
    if point_count > 0 {
        center[0] /= point_count as f64;
        center[1] /= point_count as f64;
        center[2] /= point_count as f64;
    }

    let mut feature_table_binary = Vec::with_capacity(point_count * 15);
    for cartesian in &cartesians {
        for component in [
            cartesian.x - center[0],
            cartesian.y - center[1],
            cartesian.z - center[2],
        ] {
            feature_table_binary.extend_from_slice(&(component as f32).to_le_bytes());
        }
    }
    for item in items {
        feature_table_binary.extend_from_slice(&[item.r, item.g, item.b]);
    }
    pad_binary(&mut feature_table_binary);

    let mut batch_table_binary = Vec::with_capacity(point_count * 2);
    batch_table_binary.extend(items.iter().map(|item| item.intensity));
    batch_table_binary.extend(items.iter().map(|item| item.classification));
    pad_binary(&mut batch_table_binary);

    let feature_table_json = pad_json(serde_json::to_string(&FeatureTableHeader {
        points_length: point_count,
        rtc_center: center,
        position: ByteOffset { byte_offset: 0 },
        rgb: ByteOffset {
            byte_offset: point_count * 12,
        },
    })?);
    let batch_table_json = pad_json(serde_json::to_string(&BatchTableHeader {
        intensity: BatchAttribute {
            byte_offset: 0,
            component_type: "UNSIGNED_BYTE",
            attribute_type: "SCALAR",
        },
        classification: BatchAttribute {
            byte_offset: point_count,
            component_type: "UNSIGNED_BYTE",
            attribute_type: "SCALAR",
        },
    })?);

    let byte_length = PNTS_HEADER_LENGTH
        + feature_table_json.len()
        + feature_table_binary.len()
        + batch_table_json.len()
        + batch_table_binary.len();

    let mut tile = Vec::with_capacity(byte_length);
    tile.extend_from_slice(PNTS_MAGIC);
    tile.extend_from_slice(&PNTS_VERSION.to_le_bytes());
    tile.extend_from_slice(&(byte_length as u32).to_le_bytes());
    tile.extend_from_slice(&(feature_table_json.len() as u32).to_le_bytes());
    tile.extend_from_slice(&(feature_table_binary.len() as u32).to_le_bytes());
    tile.extend_from_slice(&(batch_table_json.len() as u32).to_le_bytes());
    tile.extend_from_slice(&(batch_table_binary.len() as u32).to_le_bytes());
    tile.extend_from_slice(feature_table_json.as_bytes());
    tile.extend_from_slice(&feature_table_binary);
    tile.extend_from_slice(batch_table_json.as_bytes());
    tile.extend_from_slice(&batch_table_binary);
    Ok(tile)
}

/// Space-pads a JSON header to the next 4-byte boundary.
fn pad_json(mut json: String) -> String {
    while json.len() % 4 != 0 {
        json.push(' ');
    }
    json
}

/// Zero-pads a binary section to the next 4-byte boundary.
fn pad_binary(bytes: &mut Vec<u8>) {
    while bytes.len() % 4 != 0 {
        bytes.push(0);
    }
}
