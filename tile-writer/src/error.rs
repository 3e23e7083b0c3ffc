use std::fmt;
use std::io;

use coordinate_converter::ProjectionError;

#[derive(Debug)]
pub enum TileWriteError {
    Io(io::Error),
    Projection(ProjectionError),
    Serialization(serde_json::Error),
    WorkerPool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for TileWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileWriteError::Io(err) => write!(f, "tile write I/O error: {err}"),
            TileWriteError::Projection(err) => write!(f, "tile write projection error: {err}"),
            TileWriteError::Serialization(err) => {
                write!(f, "tile write serialization error: {err}")
            }
            TileWriteError::WorkerPool(err) => write!(f, "tile writer pool error: {err}"),
        }
    }
}

impl std::error::Error for TileWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TileWriteError::Io(err) => Some(err),
            TileWriteError::Projection(err) => Some(err),
            TileWriteError::Serialization(err) => Some(err),
            TileWriteError::WorkerPool(err) => Some(err),
        }
    }
}

impl From<io::Error> for TileWriteError {
    fn from(err: io::Error) -> Self {
        TileWriteError::Io(err)
    }
}

impl From<ProjectionError> for TileWriteError {
    fn from(err: ProjectionError) -> Self {
        TileWriteError::Projection(err)
    }
}

impl From<serde_json::Error> for TileWriteError {
    fn from(err: serde_json::Error) -> Self {
        TileWriteError::Serialization(err)
    }
}
