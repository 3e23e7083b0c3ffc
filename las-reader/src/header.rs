use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::LasError;

/// Legal point record lengths for formats 0-3, indexed by format and by the
/// presence of the optional intensity / user-data fields:
/// `[both, no intensity, no user data, neither]`.
const RECORD_LENGTHS: [[u16; 4]; 4] = [
    [20, 18, 19, 17],
    [28, 26, 27, 25],
    [26, 24, 25, 23],
    [34, 32, 33, 31],
];

/// The fixed LAS public header block, reduced to the fields the tiler needs.
#[derive(Debug, Clone)]
pub struct LasHeader {
    pub version_major: u8,
    pub version_minor: u8,
    pub point_format: u8,
    pub point_record_length: u16,
    pub number_of_points: u64,
    pub offset_to_points: u32,
    pub number_of_vlrs: u32,
    pub header_size: u16,
    pub scale: [f64; 3],
    pub offset: [f64; 3],
    pub min: [f64; 3],
    pub max: [f64; 3],
    /// Whether records carry the optional intensity field, derived from the
    /// record length.
    pub use_point_intensity: bool,
    /// Whether records carry the optional user-data field, derived from the
    /// record length.
    pub use_point_userdata: bool,
}

impl LasHeader {
    /// Parses the public header block from the start of a LAS stream.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, LasError> {
        let mut signature = [0u8; 4];
        reader.read_exact(&mut signature)?;
        if &signature != b"LASF" {
            return Err(LasError::NotALasFile);
        }

        let _file_source_id = reader.read_u16::<LittleEndian>()?;
        let _global_encoding = reader.read_u16::<LittleEndian>()?;
        skip(reader, 16)?; // project GUID
        let version_major = reader.read_u8()?;
        let version_minor = reader.read_u8()?;
        skip(reader, 64)?; // system identifier + generating software
        let _file_creation_day = reader.read_u16::<LittleEndian>()?;
        let _file_creation_year = reader.read_u16::<LittleEndian>()?;
        let header_size = reader.read_u16::<LittleEndian>()?;
        let offset_to_points = reader.read_u32::<LittleEndian>()?;
        let number_of_vlrs = reader.read_u32::<LittleEndian>()?;
        let point_format = reader.read_u8()?;
        let point_record_length = reader.read_u16::<LittleEndian>()?;
        let legacy_number_of_points = reader.read_u32::<LittleEndian>()?;
        skip(reader, 20)?; // legacy number of points by return

        let mut scale = [0.0; 3];
        for axis in &mut scale {
            *axis = reader.read_f64::<LittleEndian>()?;
        }
        let mut offset = [0.0; 3];
        for axis in &mut offset {
            *axis = reader.read_f64::<LittleEndian>()?;
        }
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for axis in 0..3 {
            max[axis] = reader.read_f64::<LittleEndian>()?;
            min[axis] = reader.read_f64::<LittleEndian>()?;
        }

        let mut number_of_points = u64::from(legacy_number_of_points);
        if version_minor >= 3 && header_size >= 235 {
            let _waveform_offset = reader.read_u64::<LittleEndian>()?;
        }
        if version_minor >= 4 && header_size >= 375 {
            let _evlr_offset = reader.read_u64::<LittleEndian>()?;
            let _evlr_count = reader.read_u32::<LittleEndian>()?;
            let extended_number_of_points = reader.read_u64::<LittleEndian>()?;
            if number_of_points == 0 {
                number_of_points = extended_number_of_points;
            }
        }

        if point_format > 3 {
            return Err(LasError::UnsupportedPointFormat(point_format));
        }
        for factor in scale {
            if factor <= 0.0 {
                return Err(LasError::InvalidScaleFactor(factor));
            }
        }
        let (use_point_intensity, use_point_userdata) =
            record_flags(point_format, point_record_length)?;

        Ok(Self {
            version_major,
            version_minor,
            point_format,
            point_record_length,
            number_of_points,
            offset_to_points,
            number_of_vlrs,
            header_size,
            scale,
            offset,
            min,
            max,
            use_point_intensity,
            use_point_userdata,
        })
    }

    pub fn has_gps_time(&self) -> bool {
        matches!(self.point_format, 1 | 3)
    }

    pub fn has_color(&self) -> bool {
        matches!(self.point_format, 2 | 3)
    }
}

/// Maps a (format, record length) pair to the optional-field flags, erroring
/// when the length matches none of the four legal values for the format.
fn record_flags(format: u8, length: u16) -> Result<(bool, bool), LasError> {
    let row = RECORD_LENGTHS[format as usize];
    match row.iter().position(|&legal| legal == length) {
        Some(0) => Ok((true, true)),
        Some(1) => Ok((false, true)),
        Some(2) => Ok((true, false)),
        Some(3) => Ok((false, false)),
        _ => Err(LasError::RecordLengthMismatch { format, length }),
    }
}

fn skip<R: Read>(reader: &mut R, count: usize) -> std::io::Result<()> {
    let mut scratch = [0u8; 64];
    let mut remaining = count;
    while remaining > 0 {
        let take = remaining.min(scratch.len());
        reader.read_exact(&mut scratch[..take])?;
        remaining -= take;
    }
    Ok(())
}
