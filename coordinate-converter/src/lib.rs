pub mod converter;
pub mod error;
pub mod proj;

pub use converter::{
    ConverterProvider, Coordinate, CoordinateConverter, EpsgCode, EPSG_WGS84_GEODETIC,
    EPSG_WGS84_GEOGRAPHIC_3D,
};
pub use error::ProjectionError;
pub use proj::{ProjConverterProvider, ProjCoordinateConverter};
