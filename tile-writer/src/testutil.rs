use coordinate_converter::{
    ConverterProvider, Coordinate, CoordinateConverter, EpsgCode, ProjectionError,
};
use projection_transform::cartesian::geodetic_to_geocentric;
use tiler_core::pointcloud::point::BoundingBox;

/// Pure-math converter for clouds already in geodetic WGS84; keeps the test
/// suite independent of a PROJ installation.
pub struct GeodeticConverter;

impl CoordinateConverter for GeodeticConverter {
    fn convert_coordinate(
        &mut self,
        source: EpsgCode,
        target: EpsgCode,
        coordinate: Coordinate,
    ) -> Result<Coordinate, ProjectionError> {
        if source == target {
            Ok(coordinate)
        } else {
            Err(ProjectionError {
                code: 0,
                message: format!("test converter cannot transform {source} to {target}"),
                context: "test",
            })
        }
    }

    fn convert_to_wgs84_cartesian(
        &mut self,
        coordinate: Coordinate,
        _source: EpsgCode,
    ) -> Result<Coordinate, ProjectionError> {
        let ellipsoid = projection_transform::ellipsoid::wgs84();
        let (x, y, z) =
            geodetic_to_geocentric(&ellipsoid, coordinate.x, coordinate.y, coordinate.z);
        Ok(Coordinate { x, y, z })
    }

    fn convert_2d_bounding_box_to_wgs84_region(
        &mut self,
        bounding_box: &BoundingBox,
        _source: EpsgCode,
    ) -> Result<[f64; 6], ProjectionError> {
        Ok([
            bounding_box.min_x.to_radians(),
            bounding_box.min_y.to_radians(),
            bounding_box.max_x.to_radians(),
            bounding_box.max_y.to_radians(),
            bounding_box.min_z,
            bounding_box.max_z,
        ])
    }
}

pub struct GeodeticProvider;

impl ConverterProvider for GeodeticProvider {
    fn converter(&self) -> Result<Box<dyn CoordinateConverter>, ProjectionError> {
        Ok(Box::new(GeodeticConverter))
    }
}

/// A provider whose converters fail every conversion; used to exercise the
/// writer's error propagation.
pub struct FailingProvider;

struct FailingConverter;

impl CoordinateConverter for FailingConverter {
    fn convert_coordinate(
        &mut self,
        _source: EpsgCode,
        _target: EpsgCode,
        _coordinate: Coordinate,
    ) -> Result<Coordinate, ProjectionError> {
        Err(projection_failure())
    }

    fn convert_to_wgs84_cartesian(
        &mut self,
        _coordinate: Coordinate,
        _source: EpsgCode,
    ) -> Result<Coordinate, ProjectionError> {
        Err(projection_failure())
    }

    fn convert_2d_bounding_box_to_wgs84_region(
        &mut self,
        _bounding_box: &BoundingBox,
        _source: EpsgCode,
    ) -> Result<[f64; 6], ProjectionError> {
        Err(projection_failure())
    }
}

impl ConverterProvider for FailingProvider {
    fn converter(&self) -> Result<Box<dyn CoordinateConverter>, ProjectionError> {
        Ok(Box::new(FailingConverter))
    }
}

fn projection_failure() -> ProjectionError {
    ProjectionError {
        code: -1,
        message: "injected failure".to_string(),
        context: "test",
    }
}
