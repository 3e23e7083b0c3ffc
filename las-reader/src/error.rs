use std::fmt;
use std::io;

#[derive(Debug)]
pub enum LasError {
    Io(io::Error),
    /// The file does not start with the `LASF` signature.
    NotALasFile,
    /// Point formats outside 0-3 (including LAZ-flagged formats).
    UnsupportedPointFormat(u8),
    /// The header's record length matches none of the legal lengths for the
    /// declared point format.
    RecordLengthMismatch { format: u8, length: u16 },
    /// A scale factor in the header is zero or negative.
    InvalidScaleFactor(f64),
}

impl fmt::Display for LasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LasError::Io(err) => write!(f, "LAS I/O error: {err}"),
            LasError::NotALasFile => write!(f, "missing LASF signature"),
            LasError::UnsupportedPointFormat(format) => {
                write!(f, "unsupported point format {format}, expected 0-3")
            }
            LasError::RecordLengthMismatch { format, length } => write!(
                f,
                "point record length {length} is not valid for point format {format}"
            ),
            LasError::InvalidScaleFactor(scale) => {
                write!(f, "scale factor {scale} must be positive")
            }
        }
    }
}

impl std::error::Error for LasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LasError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LasError {
    fn from(err: io::Error) -> Self {
        LasError::Io(err)
    }
}
