use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

use byteorder::{ByteOrder, LittleEndian};
use rayon::prelude::*;

use tiler_core::pointcloud::point::Point;

use crate::error::LasError;
use crate::header::LasHeader;

/// Reads a LAS file into memory and decodes its point records in parallel.
///
/// The whole point block (`number_of_points * point_record_length` bytes at
/// `offset_to_points`) is slurped with one `read_exact`, then split into one
/// contiguous run of whole records per worker; each worker decodes its run
/// into a local vector and the runs are concatenated in index order. VLRs
/// between the header and the point block are skipped unread.
pub struct LasReader {
    path: PathBuf,
}

impl LasReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read(&self) -> Result<(LasHeader, Vec<Point>), LasError> {
        let mut file = File::open(&self.path)?;
        let header = {
            let mut reader = BufReader::new(&mut file);
            LasHeader::read_from(&mut reader)?
        };

        if header.number_of_points == 0 {
            return Ok((header, Vec::new()));
        }

        let record_length = header.point_record_length as usize;
        let total = header.number_of_points as usize;
        let mut buffer = vec![0u8; total * record_length];
        file.seek(SeekFrom::Start(u64::from(header.offset_to_points)))?;
        file.read_exact(&mut buffer)?;

        let points = parse_records(&buffer, &header);
        Ok((header, points))
    }
}

fn parse_records(buffer: &[u8], header: &LasHeader) -> Vec<Point> {
    let record_length = header.point_record_length as usize;
    let total = buffer.len() / record_length;
    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    let block = total.div_ceil(workers).max(1) * record_length;

    let blocks: Vec<Vec<Point>> = buffer
        .par_chunks(block)
        .map(|chunk| {
            chunk
                .chunks_exact(record_length)
                .map(|record| parse_record(record, header))
                .collect()
        })
        .collect();
    blocks.into_iter().flatten().collect()
}

fn parse_record(record: &[u8], header: &LasHeader) -> Point {
    let x = f64::from(LittleEndian::read_i32(&record[0..4])) * header.scale[0] + header.offset[0];
    let y = f64::from(LittleEndian::read_i32(&record[4..8])) * header.scale[1] + header.offset[1];
    let z = f64::from(LittleEndian::read_i32(&record[8..12])) * header.scale[2] + header.offset[2];

    // Offset of the return-info bit field; intensity, when present, sits
    // between it and the coordinates.
    let attributes = 12 + if header.use_point_intensity { 2 } else { 0 };
    let intensity = if header.use_point_intensity {
        high_byte(LittleEndian::read_u16(&record[12..14]))
    } else {
        0
    };
    let classification = record[attributes + 1];

    let (r, g, b) = if header.has_color() {
        // Skip the return-info, classification and scan-angle bytes, the
        // optional user-data byte, the point-source id, and the GPS time of
        // formats 1 and 3.
        let color = attributes
            + 3
            + usize::from(header.use_point_userdata)
            + 2
            + if header.has_gps_time() { 8 } else { 0 };
        (
            high_byte(LittleEndian::read_u16(&record[color..color + 2])),
            high_byte(LittleEndian::read_u16(&record[color + 2..color + 4])),
            high_byte(LittleEndian::read_u16(&record[color + 4..color + 6])),
        )
    } else {
        (0, 0, 0)
    };

    Point {
        x,
        y,
        z,
        r,
        g,
        b,
        intensity,
        classification,
    }
}

fn high_byte(value: u16) -> u8 {
    (value / 256) as u8
}
