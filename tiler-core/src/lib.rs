pub mod octree;
pub mod pointcloud;
pub mod tiler;

pub use octree::{OctNode, Octree};
pub use pointcloud::loader::PointLoader;
pub use pointcloud::point::{BoundingBox, Point};
pub use tiler::TilerOptions;
