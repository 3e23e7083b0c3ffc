use std::num::NonZeroUsize;
use std::thread;

/// Elevation correction applied after reprojection and before octree
/// insertion; receives `(latitude, longitude, elevation)` in degrees/meters
/// and returns the corrected elevation.
pub type ZCorrection = Box<dyn Fn(f64, f64, f64) -> f64 + Send + Sync>;

/// Knobs supplied by the external driver.
pub struct TilerOptions {
    /// EPSG code of the input coordinates.
    pub srid: u16,
    /// Constant elevation correction added to every input elevation.
    pub z_offset: f64,
    /// Leaf capacity before subdivision.
    pub max_points_per_node: usize,
    /// Recursion cap; a node at this depth stays a leaf regardless of
    /// capacity.
    pub max_tree_depth: usize,
    /// Tile-writer pool size.
    pub num_workers: usize,
    pub z_correction: Option<ZCorrection>,
    /// Seed for the loader shuffle; `None` draws from the system source.
    pub shuffle_seed: Option<u64>,
}

impl Default for TilerOptions {
    fn default() -> Self {
        Self {
            srid: 4326,
            z_offset: 0.0,
            max_points_per_node: 50_000,
            max_tree_depth: 10,
            num_workers: thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            z_correction: None,
            shuffle_seed: None,
        }
    }
}
