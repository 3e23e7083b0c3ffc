use tiler_core::pointcloud::point::BoundingBox;

use crate::error::ProjectionError;

/// EPSG code type alias
pub type EpsgCode = u16;

/// WGS84 Geodetic 2D (EPSG:4326)
pub const EPSG_WGS84_GEODETIC: EpsgCode = 4326;

/// WGS84 Geographic 3D (EPSG:4979)
pub const EPSG_WGS84_GEOGRAPHIC_3D: EpsgCode = 4979;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Geodetic conversion surface consumed by the tiler pipeline.
///
/// Implementations release their projection contexts on `Drop`.
pub trait CoordinateConverter {
    /// Transforms a coordinate between two EPSG-coded reference systems.
    fn convert_coordinate(
        &mut self,
        source: EpsgCode,
        target: EpsgCode,
        coordinate: Coordinate,
    ) -> Result<Coordinate, ProjectionError>;

    /// Converts a coordinate in the given system to WGS84 ECEF meters.
    fn convert_to_wgs84_cartesian(
        &mut self,
        coordinate: Coordinate,
        source: EpsgCode,
    ) -> Result<Coordinate, ProjectionError>;

    /// Converts the horizontal footprint of a bounding box to a 3D Tiles
    /// region: `[west, south, east, north, min_height, max_height]`, the
    /// four angles in radians.
    fn convert_2d_bounding_box_to_wgs84_region(
        &mut self,
        bounding_box: &BoundingBox,
        source: EpsgCode,
    ) -> Result<[f64; 6], ProjectionError>;
}

/// Mints per-worker converter instances.
///
/// PROJ contexts must be used by one thread at a time, so concurrent phases
/// hand each worker its own converter instead of sharing one.
pub trait ConverterProvider {
    fn converter(&self) -> Result<Box<dyn CoordinateConverter>, ProjectionError>;
}
