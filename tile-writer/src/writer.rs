use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use coordinate_converter::{
    ConverterProvider, CoordinateConverter, EpsgCode, EPSG_WGS84_GEOGRAPHIC_3D,
};
use tiler_core::octree::{Octree, ROOT};
use tiler_core::tiler::TilerOptions;

use crate::error::TileWriteError;
use crate::pnts;
use crate::tileset;

// Octree coordinates are WGS84 geodetic after the reprojection stage, so the
// write phase always converts from the geodetic code.
const TREE_SRID: EpsgCode = EPSG_WGS84_GEOGRAPHIC_3D;

/// The minimal data needed to produce one tile directory: an octree node and
/// the directory its files go to.
pub struct WorkUnit {
    pub node: usize,
    pub path: PathBuf,
}

/// Walks the octree and writes one directory per populated node, mirroring
/// the tree: the node at path `[i1, .., ik]` lands in `root/i1/../ik/` with
/// its `content.pnts`, plus a `tileset.json` for internal nodes.
///
/// A single-threaded walk produces the work units; a dedicated pool of
/// `num_workers` consumes them, each worker with its own converter instance.
/// The first error cancels the remaining units and is returned.
pub fn write_tiles<P>(
    octree: &Octree,
    options: &TilerOptions,
    provider: &P,
    output_dir: &Path,
) -> Result<(), TileWriteError>
where
    P: ConverterProvider + Sync,
{
    let mut units = Vec::new();
    collect_work_units(octree, ROOT, output_dir.to_path_buf(), &mut units);
    if units.is_empty() {
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.num_workers)
        .build()
        .map_err(TileWriteError::WorkerPool)?;

    pool.install(|| {
        units.par_iter().try_for_each_init(
            || provider.converter(),
            |converter, unit| {
                let converter = converter
                    .as_mut()
                    .map_err(|err| TileWriteError::Projection(err.clone()))?;
                write_node(octree, converter.as_mut(), unit)
            },
        )
    })
}

fn collect_work_units(octree: &Octree, index: usize, path: PathBuf, units: &mut Vec<WorkUnit>) {
    let node = octree.node(index);
    if node.global_count == 0 {
        return;
    }
    units.push(WorkUnit {
        node: index,
        path: path.clone(),
    });
    for (slot, child) in node.children.iter().enumerate() {
        if let Some(child_index) = *child {
            collect_work_units(octree, child_index, path.join(slot.to_string()), units);
        }
    }
}

fn write_node(
    octree: &Octree,
    converter: &mut dyn CoordinateConverter,
    unit: &WorkUnit,
) -> Result<(), TileWriteError> {
    fs::create_dir_all(&unit.path)?;
    let node = octree.node(unit.node);

    let payload = pnts::build_pnts(&node.items, converter, TREE_SRID)?;
    fs::write(unit.path.join("content.pnts"), payload)?;

    if !node.is_leaf {
        let manifest = tileset::build_tileset(octree, unit.node, converter, TREE_SRID)?;
        fs::write(
            unit.path.join("tileset.json"),
            serde_json::to_vec_pretty(&manifest)?,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use serde_json::Value;
    use tempfile::tempdir;

    use tiler_core::pointcloud::loader::PointLoader;
    use tiler_core::pointcloud::point::Point;

    use crate::testutil::{FailingProvider, GeodeticProvider};

    use super::*;

    fn make_point(x: f64, y: f64, z: f64) -> Point {
        Point {
            x,
            y,
            z,
            r: 128,
            g: 128,
            b: 128,
            intensity: 100,
            classification: 2,
        }
    }

    /// Deterministic cloud spread over a one-degree tile near Florence.
    fn sample_cloud(count: usize) -> Vec<Point> {
        (0..count)
            .map(|i| {
                make_point(
                    11.0 + (i * 7 % 101) as f64 / 101.0,
                    43.0 + (i * 13 % 103) as f64 / 103.0,
                    (i * 3 % 47) as f64,
                )
            })
            .collect()
    }

    fn build_octree(points: Vec<Point>, max_points_per_node: usize) -> (Octree, TilerOptions) {
        let options = TilerOptions {
            max_points_per_node,
            num_workers: 4,
            shuffle_seed: Some(5),
            ..TilerOptions::default()
        };
        let mut loader = PointLoader::with_seed(options.shuffle_seed);
        for point in points {
            loader.add(point);
        }
        loader.initialize();
        (Octree::build(loader, &options), options)
    }

    fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                collect_files(&path, out);
            } else {
                out.push(path);
            }
        }
    }

    fn pnts_point_count(path: &Path) -> u64 {
        let bytes = fs::read(path).unwrap();
        assert_eq!(&bytes[0..4], b"pnts");
        let json_length =
            u32::from_le_bytes(bytes[12..16].try_into().unwrap()) as usize;
        let json: Value = serde_json::from_slice(&bytes[28..28 + json_length]).unwrap();
        json["POINTS_LENGTH"].as_u64().unwrap()
    }

    #[test]
    fn single_point_cloud_writes_one_leaf_tile() {
        let (octree, options) = build_octree(vec![make_point(11.5, 43.5, 7.0)], 100);
        let out = tempdir().unwrap();
        write_tiles(&octree, &options, &GeodeticProvider, out.path()).unwrap();

        assert!(out.path().join("content.pnts").exists());
        assert!(!out.path().join("tileset.json").exists());
        assert_eq!(pnts_point_count(&out.path().join("content.pnts")), 1);
    }

    #[test]
    fn empty_octree_writes_nothing() {
        let (octree, options) = build_octree(Vec::new(), 100);
        let out = tempdir().unwrap();
        write_tiles(&octree, &options, &GeodeticProvider, out.path()).unwrap();
        assert!(fs::read_dir(out.path()).unwrap().next().is_none());
    }

    #[test]
    fn tile_point_counts_sum_to_the_cloud_size() {
        let (octree, options) = build_octree(sample_cloud(1000), 100);
        let out = tempdir().unwrap();
        write_tiles(&octree, &options, &GeodeticProvider, out.path()).unwrap();

        let mut files = Vec::new();
        collect_files(out.path(), &mut files);
        let total: u64 = files
            .iter()
            .filter(|path| path.file_name().is_some_and(|n| n == "content.pnts"))
            .map(|path| pnts_point_count(path))
            .sum();
        assert_eq!(total, 1000);
    }

    #[test]
    fn every_child_url_resolves_on_disk() {
        let (octree, options) = build_octree(sample_cloud(1000), 50);
        let out = tempdir().unwrap();
        write_tiles(&octree, &options, &GeodeticProvider, out.path()).unwrap();

        let mut files = Vec::new();
        collect_files(out.path(), &mut files);
        let manifests: Vec<&PathBuf> = files
            .iter()
            .filter(|path| path.file_name().is_some_and(|n| n == "tileset.json"))
            .collect();
        assert!(!manifests.is_empty());

        for manifest in manifests {
            let json: Value =
                serde_json::from_slice(&fs::read(manifest).unwrap()).unwrap();
            assert_eq!(json["asset"]["version"], "0.0");
            assert_eq!(json["root"]["refine"], "add");
            assert_eq!(json["root"]["content"]["url"], "content.pnts");
            let base = manifest.parent().unwrap();
            for child in json["root"]["children"].as_array().unwrap() {
                let url = child["content"]["url"].as_str().unwrap();
                assert!(base.join(url).exists(), "missing child tile {url}");
                let region = child["boundingVolume"]["region"].as_array().unwrap();
                assert_eq!(region.len(), 6);
            }
        }
    }

    #[test]
    fn root_manifest_has_positive_geometric_error() {
        let (octree, options) = build_octree(sample_cloud(500), 50);
        let out = tempdir().unwrap();
        write_tiles(&octree, &options, &GeodeticProvider, out.path()).unwrap();

        let json: Value =
            serde_json::from_slice(&fs::read(out.path().join("tileset.json")).unwrap()).unwrap();
        assert!(json["geometricError"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn reruns_are_byte_identical() {
        let (octree, options) = build_octree(sample_cloud(400), 50);
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        write_tiles(&octree, &options, &GeodeticProvider, first.path()).unwrap();
        write_tiles(&octree, &options, &GeodeticProvider, second.path()).unwrap();

        let mut files = Vec::new();
        collect_files(first.path(), &mut files);
        assert!(!files.is_empty());
        for path in files {
            let relative = path.strip_prefix(first.path()).unwrap();
            let twin = second.path().join(relative);
            assert_eq!(
                fs::read(&path).unwrap(),
                fs::read(&twin).unwrap(),
                "mismatch for {relative:?}"
            );
        }
    }

    #[test]
    fn projection_failure_surfaces_from_the_pool() {
        let (octree, options) = build_octree(sample_cloud(200), 50);
        let out = tempdir().unwrap();
        let err = write_tiles(&octree, &options, &FailingProvider, out.path()).unwrap_err();
        assert!(matches!(err, TileWriteError::Projection(_)));
    }

    #[test]
    fn unwritable_output_surfaces_an_io_error() {
        let (octree, options) = build_octree(sample_cloud(10), 100);
        let dir = tempdir().unwrap();
        let blocked = dir.path().join("out");
        let mut file = File::create(&blocked).unwrap();
        file.write_all(b"in the way").unwrap();

        let err = write_tiles(&octree, &options, &GeodeticProvider, &blocked).unwrap_err();
        assert!(matches!(err, TileWriteError::Io(_)));
    }
}
