//! Mesh converter (scene mesh -> .sch3Dmesh)

mod geometry;
mod skin;
mod types;


// Re-export public API
pub use geometry::{process_geometry, process_texture, EdgeSplitPlan};
pub use skin::bind_skin;
pub use types::{BoneWeight, Geometry, MeshExport, SkinData, TextureData, VertexWeights};
