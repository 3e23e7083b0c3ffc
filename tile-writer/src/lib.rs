pub mod error;
pub mod pnts;
pub mod tileset;
pub mod writer;

pub use error::TileWriteError;
pub use writer::{write_tiles, WorkUnit};

#[cfg(test)]
pub(crate) mod testutil;
