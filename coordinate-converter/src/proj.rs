use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::{Path, PathBuf};
use std::ptr;

use proj_sys as proj;
use projection_transform::cartesian::geodetic_to_geocentric;

use tiler_core::pointcloud::point::{BoundingBox, Point};

use crate::converter::{
    ConverterProvider, Coordinate, CoordinateConverter, EpsgCode, EPSG_WGS84_GEODETIC,
    EPSG_WGS84_GEOGRAPHIC_3D,
};
use crate::error::ProjectionError;

fn is_geodetic_wgs84(srid: EpsgCode) -> bool {
    matches!(srid, EPSG_WGS84_GEODETIC | EPSG_WGS84_GEOGRAPHIC_3D)
}

/// PROJ-backed converter.
///
/// Owns one `PJ_CONTEXT` and a cache of crs-to-crs pipelines keyed by the
/// (source, target) EPSG pair. A context must be used by only one thread at
/// a time, so concurrent phases obtain their own instance through
/// [`ProjConverterProvider`].
pub struct ProjCoordinateConverter {
    ctx: *mut proj::PJ_CONTEXT,
    pipelines: HashMap<(EpsgCode, EpsgCode), *mut proj::PJ>,
}

impl ProjCoordinateConverter {
    pub fn new(proj_data_dir: Option<&Path>) -> Result<Self, ProjectionError> {
        let ctx = unsafe { proj::proj_context_create() };
        if ctx.is_null() {
            return Err(ProjectionError {
                code: 0,
                message: "proj_context_create() returned NULL".to_string(),
                context: "proj_context_create",
            });
        }

        // Enable network access for automatic grid file downloads from CDN.
        // Grid files will be cached in the user's local directory.
        unsafe {
            proj::proj_context_set_enable_network(ctx, 1);
            proj::proj_grid_cache_set_enable(ctx, 1);
        }

        if let Some(dir) = proj_data_dir {
            let c_path =
                CString::new(dir.to_string_lossy().as_bytes()).map_err(|_| ProjectionError {
                    code: 0,
                    message: "proj_data_dir contains NUL byte".to_string(),
                    context: "proj_context_set_search_paths",
                })?;
            let paths = [c_path.as_ptr()];
            unsafe {
                proj::proj_context_set_search_paths(ctx, paths.len() as i32, paths.as_ptr());
            }
        }

        Ok(Self {
            ctx,
            pipelines: HashMap::new(),
        })
    }

    fn pipeline(
        &mut self,
        source: EpsgCode,
        target: EpsgCode,
    ) -> Result<*mut proj::PJ, ProjectionError> {
        if let Some(&pj) = self.pipelines.get(&(source, target)) {
            return Ok(pj);
        }

        let source_crs = CString::new(format!("EPSG:{source}")).map_err(|_| ProjectionError {
            code: 0,
            message: "source CRS contains NUL byte".to_string(),
            context: "proj_create_crs_to_crs",
        })?;
        let target_crs = CString::new(format!("EPSG:{target}")).map_err(|_| ProjectionError {
            code: 0,
            message: "target CRS contains NUL byte".to_string(),
            context: "proj_create_crs_to_crs",
        })?;

        let pj = unsafe {
            proj::proj_create_crs_to_crs(
                self.ctx,
                source_crs.as_ptr(),
                target_crs.as_ptr(),
                ptr::null_mut(),
            )
        };
        if pj.is_null() {
            return Err(proj_error_from_ctx(self.ctx, "proj_create_crs_to_crs"));
        }

        // Normalize axis order (e.g. EPSG:4326 is lat,lon by definition).
        let normalized = unsafe { proj::proj_normalize_for_visualization(self.ctx, pj) };
        unsafe {
            proj::proj_destroy(pj);
        }
        if normalized.is_null() {
            return Err(proj_error_from_ctx(
                self.ctx,
                "proj_normalize_for_visualization",
            ));
        }

        self.pipelines.insert((source, target), normalized);
        Ok(normalized)
    }

    /// Batch-transforms the coordinates of a point slice in place by striding
    /// over the `x`, `y`, `z` fields directly.
    pub fn convert_points_in_place(
        &mut self,
        points: &mut [Point],
        source: EpsgCode,
        target: EpsgCode,
    ) -> Result<(), ProjectionError> {
        if points.is_empty() || source == target {
            return Ok(());
        }
        let pj = self.pipeline(source, target)?;

        let stride = std::mem::size_of::<Point>();
        let n = points.len();

        unsafe {
            proj::proj_errno_reset(pj);

            let first = points.as_mut_ptr();
            let x = ptr::addr_of_mut!((*first).x);
            let y = ptr::addr_of_mut!((*first).y);
            let z = ptr::addr_of_mut!((*first).z);

            proj::proj_trans_generic(
                pj,
                proj::PJ_DIRECTION_PJ_FWD,
                x,
                stride,
                n,
                y,
                stride,
                n,
                z,
                stride,
                n,
                ptr::null_mut(),
                0,
                0,
            );

            let err = proj::proj_errno(pj);
            if err != 0 {
                return Err(proj_error_from_pj(self.ctx, pj, "proj_trans_generic"));
            }
        }

        Ok(())
    }

    /// Reprojects a point slice to WGS84 geodetic coordinates and applies the
    /// elevation corrections, in that order. Sources already in geodetic
    /// WGS84 skip the projection step.
    pub fn reproject_points_to_wgs84(
        &mut self,
        points: &mut [Point],
        source: EpsgCode,
        z_offset: f64,
        z_correction: Option<&(dyn Fn(f64, f64, f64) -> f64 + Send + Sync)>,
    ) -> Result<(), ProjectionError> {
        if !is_geodetic_wgs84(source) {
            self.convert_points_in_place(points, source, EPSG_WGS84_GEOGRAPHIC_3D)?;
        }
        for point in points.iter_mut() {
            point.z += z_offset;
            if let Some(correction) = z_correction {
                point.z = correction(point.y, point.x, point.z);
            }
        }
        Ok(())
    }
}

impl CoordinateConverter for ProjCoordinateConverter {
    fn convert_coordinate(
        &mut self,
        source: EpsgCode,
        target: EpsgCode,
        coordinate: Coordinate,
    ) -> Result<Coordinate, ProjectionError> {
        if source == target {
            return Ok(coordinate);
        }
        let pj = self.pipeline(source, target)?;
        let transformed = unsafe {
            proj::proj_errno_reset(pj);
            let out = proj::proj_trans(
                pj,
                proj::PJ_DIRECTION_PJ_FWD,
                proj::proj_coord(coordinate.x, coordinate.y, coordinate.z, 0.0),
            );
            if proj::proj_errno(pj) != 0 {
                return Err(proj_error_from_pj(self.ctx, pj, "proj_trans"));
            }
            Coordinate {
                x: out.xyz.x,
                y: out.xyz.y,
                z: out.xyz.z,
            }
        };
        Ok(transformed)
    }

    fn convert_to_wgs84_cartesian(
        &mut self,
        coordinate: Coordinate,
        source: EpsgCode,
    ) -> Result<Coordinate, ProjectionError> {
        let geodetic = if is_geodetic_wgs84(source) {
            coordinate
        } else {
            self.convert_coordinate(source, EPSG_WGS84_GEOGRAPHIC_3D, coordinate)?
        };
        let ellipsoid = projection_transform::ellipsoid::wgs84();
        let (x, y, z) =
            geodetic_to_geocentric(&ellipsoid, geodetic.x, geodetic.y, geodetic.z);
        Ok(Coordinate { x, y, z })
    }

    fn convert_2d_bounding_box_to_wgs84_region(
        &mut self,
        bounding_box: &BoundingBox,
        source: EpsgCode,
    ) -> Result<[f64; 6], ProjectionError> {
        let mut lower = Coordinate {
            x: bounding_box.min_x,
            y: bounding_box.min_y,
            z: 0.0,
        };
        let mut upper = Coordinate {
            x: bounding_box.max_x,
            y: bounding_box.max_y,
            z: 0.0,
        };
        if !is_geodetic_wgs84(source) {
            lower = self.convert_coordinate(source, EPSG_WGS84_GEODETIC, lower)?;
            upper = self.convert_coordinate(source, EPSG_WGS84_GEODETIC, upper)?;
        }
        Ok([
            lower.x.to_radians(),
            lower.y.to_radians(),
            upper.x.to_radians(),
            upper.y.to_radians(),
            bounding_box.min_z,
            bounding_box.max_z,
        ])
    }
}

impl Drop for ProjCoordinateConverter {
    fn drop(&mut self) {
        unsafe {
            for (_, pj) in self.pipelines.drain() {
                if !pj.is_null() {
                    proj::proj_destroy(pj);
                }
            }
            if !self.ctx.is_null() {
                proj::proj_context_destroy(self.ctx);
                self.ctx = ptr::null_mut();
            }
        }
    }
}

unsafe impl Send for ProjCoordinateConverter {}

/// Hands each tile-writer worker its own converter.
#[derive(Debug, Clone, Default)]
pub struct ProjConverterProvider {
    pub proj_data_dir: Option<PathBuf>,
}

impl ConverterProvider for ProjConverterProvider {
    fn converter(&self) -> Result<Box<dyn CoordinateConverter>, ProjectionError> {
        Ok(Box::new(ProjCoordinateConverter::new(
            self.proj_data_dir.as_deref(),
        )?))
    }
}

fn proj_error_from_ctx(ctx: *mut proj::PJ_CONTEXT, context: &'static str) -> ProjectionError {
    let code = unsafe { proj::proj_context_errno(ctx) };
    let message = proj_error_message(ctx, code);
    ProjectionError {
        code,
        message,
        context,
    }
}

fn proj_error_from_pj(
    ctx: *mut proj::PJ_CONTEXT,
    pj: *mut proj::PJ,
    context: &'static str,
) -> ProjectionError {
    let code = unsafe { proj::proj_errno(pj) };
    let message = proj_error_message(ctx, code);
    ProjectionError {
        code,
        message,
        context,
    }
}

fn proj_error_message(ctx: *mut proj::PJ_CONTEXT, code: i32) -> String {
    let c_msg = unsafe { proj::proj_context_errno_string(ctx, code) };
    if c_msg.is_null() {
        return "unknown error".to_string();
    }
    unsafe { CStr::from_ptr(c_msg as *const c_char) }
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_srid_is_identity() {
        let mut converter = ProjCoordinateConverter::new(None).unwrap();
        let coordinate = Coordinate {
            x: 11.25,
            y: 43.5,
            z: 12.0,
        };
        let out = converter
            .convert_coordinate(EPSG_WGS84_GEODETIC, EPSG_WGS84_GEODETIC, coordinate)
            .unwrap();
        assert_eq!(out, coordinate);
    }

    #[test]
    fn geodetic_source_converts_straight_to_ecef() {
        let mut converter = ProjCoordinateConverter::new(None).unwrap();
        let out = converter
            .convert_to_wgs84_cartesian(
                Coordinate {
                    x: 0.0,
                    y: 0.0,
                    z: 0.0,
                },
                EPSG_WGS84_GEODETIC,
            )
            .unwrap();
        assert!((out.x - 6_378_137.0).abs() < 1e-6);
        assert!(out.y.abs() < 1e-6);
        assert!(out.z.abs() < 1e-6);
    }

    #[test]
    fn geodetic_region_is_radians() {
        let mut converter = ProjCoordinateConverter::new(None).unwrap();
        let bounding_box = BoundingBox::new(10.0, 11.0, 40.0, 41.0, 5.0, 25.0);
        let region = converter
            .convert_2d_bounding_box_to_wgs84_region(&bounding_box, EPSG_WGS84_GEODETIC)
            .unwrap();
        assert!((region[0] - 0.174_53).abs() < 1e-4);
        assert!((region[1] - 0.698_13).abs() < 1e-4);
        assert!((region[2] - 0.191_98).abs() < 1e-4);
        assert!((region[3] - 0.715_58).abs() < 1e-4);
        assert_eq!(region[4], 5.0);
        assert_eq!(region[5], 25.0);
    }

    #[test]
    fn geodetic_reprojection_applies_elevation_corrections() {
        let mut converter = ProjCoordinateConverter::new(None).unwrap();
        let mut points = vec![Point {
            x: 10.0,
            y: 45.0,
            z: 100.0,
            r: 0,
            g: 0,
            b: 0,
            intensity: 0,
            classification: 0,
        }];
        let correction: Box<dyn Fn(f64, f64, f64) -> f64 + Send + Sync> =
            Box::new(|_lat, _lon, z| z * 2.0);
        converter
            .reproject_points_to_wgs84(
                &mut points,
                EPSG_WGS84_GEOGRAPHIC_3D,
                1.5,
                Some(correction.as_ref()),
            )
            .unwrap();
        assert_eq!(points[0].z, 203.0);
        assert_eq!(points[0].x, 10.0);
        assert_eq!(points[0].y, 45.0);
    }
}
