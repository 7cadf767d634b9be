//! Types for mesh conversion

use schooner_common::MeshFlags;
use smallvec::SmallVec;

use crate::config::FaceMode;

/// Index and position buffers of a validated mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub mode: FaceMode,
    /// Flattened per-face vertex indices (3 or 4 per face)
    pub indices: Vec<u16>,
    /// Flattened xyz positions, in host vertex order
    pub positions: Vec<f32>,
}

impl Geometry {
    pub fn face_count(&self) -> usize {
        self.indices.len() / self.mode.corners()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Texture data of a textured mesh
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    /// Sorted, unique indices of vertices touching a sharp edge
    pub sharp_vertices: Vec<u16>,
    /// Flattened uv pairs, one per vertex
    pub uvs: Vec<f32>,
}

/// One bone influence on a vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneWeight {
    /// Index into the filtered bone list
    pub bone: u8,
    /// Weight, already clamped near zero
    pub weight: f32,
}

/// Bone influences of one vertex (rarely more than four)
pub type VertexWeights = SmallVec<[BoneWeight; 4]>;

/// Per-vertex bone influences of a skinned mesh
#[derive(Debug, Clone, PartialEq)]
pub struct SkinData {
    pub weights: Vec<VertexWeights>,
}

/// A mesh ready to be written, decided once from the export options and the
/// mesh's parent
#[derive(Debug, Clone, PartialEq)]
pub enum MeshExport {
    Static {
        geometry: Geometry,
    },
    Textured {
        geometry: Geometry,
        texture: TextureData,
    },
    Skinned {
        geometry: Geometry,
        skin: SkinData,
    },
    TexturedSkinned {
        geometry: Geometry,
        texture: TextureData,
        skin: SkinData,
    },
}

impl MeshExport {
    pub fn new(geometry: Geometry, texture: Option<TextureData>, skin: Option<SkinData>) -> Self {
        match (texture, skin) {
            (None, None) => Self::Static { geometry },
            (Some(texture), None) => Self::Textured { geometry, texture },
            (None, Some(skin)) => Self::Skinned { geometry, skin },
            (Some(texture), Some(skin)) => Self::TexturedSkinned {
                geometry,
                texture,
                skin,
            },
        }
    }

    pub fn geometry(&self) -> &Geometry {
        match self {
            Self::Static { geometry }
            | Self::Textured { geometry, .. }
            | Self::Skinned { geometry, .. }
            | Self::TexturedSkinned { geometry, .. } => geometry,
        }
    }

    pub fn texture(&self) -> Option<&TextureData> {
        match self {
            Self::Textured { texture, .. } | Self::TexturedSkinned { texture, .. } => Some(texture),
            _ => None,
        }
    }

    pub fn skin(&self) -> Option<&SkinData> {
        match self {
            Self::Skinned { skin, .. } | Self::TexturedSkinned { skin, .. } => Some(skin),
            _ => None,
        }
    }

    pub fn flags(&self) -> MeshFlags {
        MeshFlags {
            triangles: self.geometry().mode == FaceMode::Triangles,
            textured: self.texture().is_some(),
            skinned: self.skin().is_some(),
        }
    }
}
