//! Schooner 3D mesh format (.sch3Dmesh)
//!
//! # Layout
//! ```text
//! i32      version (1)
//! u8       flags: bit0 = triangle mode, bit1 = textured, bit2 = skinned
//! u16      face_count
//! u16      vertex_count
//! u16[]    indices (face_count × 3 in triangle mode, × 4 in quad mode)
//! f32[]    positions (vertex_count × 3)
//!
//! if textured:
//!   u16    sharp_vertex_count
//!   u16[]  sharp_vertex_indices (sorted, unique)
//!   f32[]  uvs (vertex_count × 2)
//!
//! if skinned, for each vertex in order:
//!   u8     bone_weight_count
//!   (u8 bone_index, f32 weight) × bone_weight_count
//! ```

/// Maximum vertex count (u16 count field and u16 indices)
pub const MAX_VERTEX_COUNT: usize = u16::MAX as usize;

/// Maximum face count (u16 count field)
pub const MAX_FACE_COUNT: usize = u16::MAX as usize;

/// Maximum bone influences per vertex (u8 count field)
pub const MAX_BONE_WEIGHTS: usize = u8::MAX as usize;

/// Mesh flags byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshFlags {
    /// Faces are triangles (3 indices) rather than quads (4 indices)
    pub triangles: bool,
    /// Sharp vertex list and UVs follow the positions
    pub textured: bool,
    /// Per-vertex bone weights follow
    pub skinned: bool,
}

impl MeshFlags {
    /// Booleans in bit order, for `BinaryWriter::write_flags`
    pub fn bits(&self) -> [bool; 3] {
        [self.triangles, self.textured, self.skinned]
    }

    /// Number of indices per face
    pub fn indices_per_face(&self) -> usize {
        if self.triangles { 3 } else { 4 }
    }

    /// Read flags from the packed byte
    pub fn from_byte(byte: u8) -> Self {
        Self {
            triangles: byte & 0b001 != 0,
            textured: byte & 0b010 != 0,
            skinned: byte & 0b100 != 0,
        }
    }
}
