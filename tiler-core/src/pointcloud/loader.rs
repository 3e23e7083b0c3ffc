use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::pointcloud::point::Point;

/// Buffers points in arrival order and replays them in a uniformly random
/// order for octree construction.
///
/// LAS files are usually scan-line ordered; inserting them as-is would
/// degenerate the octree into raster stripes, so `initialize` shuffles the
/// backing buffer in place before the first `next_point`.
pub struct PointLoader {
    points: Vec<Point>,
    min: [f64; 3],
    max: [f64; 3],
    initialized: bool,
    cursor: usize,
    seed: Option<u64>,
}

impl PointLoader {
    pub fn new() -> Self {
        Self::with_seed(None)
    }

    /// A seeded loader shuffles deterministically, which makes whole-pipeline
    /// runs reproducible byte for byte.
    pub fn with_seed(seed: Option<u64>) -> Self {
        Self {
            points: Vec::new(),
            min: [f64::MAX, f64::MAX, f64::MAX],
            max: [f64::MIN, f64::MIN, f64::MIN],
            initialized: false,
            cursor: 0,
            seed,
        }
    }

    pub fn add(&mut self, point: Point) {
        assert!(
            !self.initialized,
            "PointLoader::add called after initialize"
        );
        self.min[0] = self.min[0].min(point.x);
        self.min[1] = self.min[1].min(point.y);
        self.min[2] = self.min[2].min(point.z);
        self.max[0] = self.max[0].max(point.x);
        self.max[1] = self.max[1].max(point.y);
        self.max[2] = self.max[2].max(point.z);
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Transitions the loader from write mode to read mode, shuffling the
    /// buffer. Must be called after the last `add` and before the first
    /// `next_point`.
    pub fn initialize(&mut self) {
        assert!(!self.initialized, "PointLoader::initialize called twice");
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.points.shuffle(&mut rng);
        self.initialized = true;
    }

    /// Next point in randomized order, `None` once the buffer is exhausted.
    pub fn next_point(&mut self) -> Option<Point> {
        assert!(
            self.initialized,
            "PointLoader::next_point called before initialize"
        );
        let point = self.points.get(self.cursor).copied();
        if point.is_some() {
            self.cursor += 1;
        }
        point
    }

    /// Bounding extremes of every added point, as
    /// `[min_x, max_x, min_y, max_y, min_z, max_z]`.
    pub fn bounds(&self) -> [f64; 6] {
        [
            self.min[0], self.max[0], self.min[1], self.max[1], self.min[2], self.max[2],
        ]
    }
}

impl Default for PointLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_point(x: f64, y: f64, z: f64) -> Point {
        Point {
            x,
            y,
            z,
            r: 0,
            g: 0,
            b: 0,
            intensity: 0,
            classification: 0,
        }
    }

    #[test]
    fn yields_a_permutation_of_added_points() {
        let mut loader = PointLoader::with_seed(Some(7));
        for i in 0..100 {
            loader.add(make_point(i as f64, 0.0, 0.0));
        }
        loader.initialize();

        let mut seen = Vec::new();
        while let Some(point) = loader.next_point() {
            seen.push(point.x as i64);
        }
        assert_eq!(seen.len(), 100);
        seen.sort_unstable();
        assert_eq!(seen, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn exhaustion_yields_none() {
        let mut loader = PointLoader::with_seed(Some(1));
        loader.add(make_point(1.0, 2.0, 3.0));
        loader.initialize();
        assert!(loader.next_point().is_some());
        assert!(loader.next_point().is_none());
        assert!(loader.next_point().is_none());
    }

    #[test]
    fn bounds_track_every_added_point() {
        let mut loader = PointLoader::new();
        loader.add(make_point(-1.0, 5.0, 0.5));
        loader.add(make_point(3.0, -2.0, 7.0));
        loader.add(make_point(0.0, 0.0, 0.0));
        assert_eq!(loader.bounds(), [-1.0, 3.0, -2.0, 5.0, 0.0, 7.0]);
    }

    #[test]
    fn seeded_shuffle_is_deterministic() {
        let order = |seed| {
            let mut loader = PointLoader::with_seed(Some(seed));
            for i in 0..50 {
                loader.add(make_point(i as f64, 0.0, 0.0));
            }
            loader.initialize();
            let mut out = Vec::new();
            while let Some(point) = loader.next_point() {
                out.push(point.x as i64);
            }
            out
        };
        assert_eq!(order(42), order(42));
        assert_ne!(order(42), order(43));
    }

    #[test]
    #[should_panic(expected = "before initialize")]
    fn next_point_before_initialize_panics() {
        let mut loader = PointLoader::new();
        loader.add(make_point(0.0, 0.0, 0.0));
        loader.next_point();
    }
}
