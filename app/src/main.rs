use std::error::Error;
use std::fs;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

use chrono::Local;
use clap::Parser;
use env_logger::Builder;
use glob::glob;
use log::LevelFilter;

use coordinate_converter::{ProjConverterProvider, ProjCoordinateConverter};
use las_reader::LasReader;
use tile_writer::write_tiles;
use tiler_core::octree::Octree;
use tiler_core::pointcloud::loader::PointLoader;
use tiler_core::tiler::TilerOptions;

#[derive(Parser, Debug)]
#[command(
    name = "LAS Tiler",
    about = "A tool for converting LAS point clouds into Cesium 3D Tiles",
    version = "0.1.0"
)]
struct Cli {
    #[arg(short, long, required = true, num_args = 1.., value_name = "FILE")]
    input: Vec<String>,

    #[arg(short, long, required = true, value_name = "DIR")]
    output: String,

    #[arg(short, long, required = true)]
    epsg: u16,

    #[arg(long, default_value_t = 0.0)]
    z_offset: f64,

    #[arg(long, default_value_t = 50_000)]
    max_points_per_node: usize,

    #[arg(long, default_value_t = 10)]
    max_depth: usize,

    #[arg(long)]
    workers: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,
}

fn expand_globs(input_patterns: Vec<String>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for pattern in input_patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            for entry in glob(&pattern).expect("Failed to read glob pattern") {
                match entry {
                    Ok(path) => paths.push(path),
                    Err(e) => eprintln!("Error: {:?}", e),
                }
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }
    paths
}

fn main() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .init();

    let args = Cli::parse();

    log::info!("input files: {:?}", args.input);
    log::info!("output folder: {}", args.output);
    log::info!("input EPSG: {}", args.epsg);

    let start = std::time::Instant::now();
    if let Err(e) = run(args) {
        log::error!("tiling failed: {e}");
        std::process::exit(1);
    }
    log::info!("Elapsed: {:?}", start.elapsed());
    log::info!("Finish processing");
}

fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    let input_files = expand_globs(args.input);
    if input_files.is_empty() {
        return Err("no input files matched".into());
    }
    log::info!("Expanded input files: {:?}", input_files);

    let output_path = PathBuf::from(&args.output);
    fs::create_dir_all(&output_path)?;

    let options = TilerOptions {
        srid: args.epsg,
        z_offset: args.z_offset,
        max_points_per_node: args.max_points_per_node,
        max_tree_depth: args.max_depth,
        num_workers: args.workers.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        }),
        z_correction: None,
        shuffle_seed: args.seed,
    };

    log::info!("start parsing...");
    let start_local = std::time::Instant::now();
    let mut converter = ProjCoordinateConverter::new(None)?;
    let mut loader = PointLoader::with_seed(options.shuffle_seed);
    for file in &input_files {
        let (header, mut points) = LasReader::new(file).read()?;
        log::info!(
            "read {} points (format {}) from {:?}",
            header.number_of_points,
            header.point_format,
            file
        );
        converter.reproject_points_to_wgs84(
            &mut points,
            options.srid,
            options.z_offset,
            options.z_correction.as_deref(),
        )?;
        for point in points {
            loader.add(point);
        }
    }
    log::info!("finish parsing in {:?}", start_local.elapsed());

    log::info!("start octree build...");
    let start_local = std::time::Instant::now();
    loader.initialize();
    let total_points = loader.len();
    let octree = Octree::build(loader, &options);
    log::info!(
        "built octree with {} nodes over {} points in {:?}",
        octree.len(),
        total_points,
        start_local.elapsed()
    );

    log::info!("start writing tiles...");
    let start_local = std::time::Instant::now();
    let provider = ProjConverterProvider::default();
    write_tiles(&octree, &options, &provider, &output_path)?;
    log::info!("finish writing tiles in {:?}", start_local.elapsed());

    Ok(())
}
