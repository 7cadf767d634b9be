//! Index/position buffers, UVs and the sharp vertex list
//!
//! Input meshes have already been split by the host along every edge in the
//! [`EdgeSplitPlan`], so no vertex matching happens here.

use serde::Serialize;

use schooner_common::{MAX_FACE_COUNT, MAX_VERTEX_COUNT};

use super::types::{Geometry, TextureData};
use crate::config::FaceMode;
use crate::error::ValidationError;
use crate::scene::MeshData;

/// Edges the host must split before dumping a mesh
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EdgeSplitPlan {
    /// Sharp edges (always split)
    pub sharp: Vec<usize>,
    /// Seam edges that are not sharp (split only for textured export)
    pub seams: Vec<usize>,
}

impl EdgeSplitPlan {
    pub fn for_mesh(mesh: &MeshData, textured: bool) -> Self {
        let mut plan = Self::default();
        for (index, edge) in mesh.edges.iter().enumerate() {
            if edge.sharp {
                plan.sharp.push(index);
            } else if edge.seam && textured {
                plan.seams.push(index);
            }
        }
        plan
    }

    /// All edges to split, in edge order
    pub fn edges(&self) -> Vec<usize> {
        let mut edges: Vec<usize> = self.sharp.iter().chain(&self.seams).copied().collect();
        edges.sort_unstable();
        edges
    }

    pub fn is_empty(&self) -> bool {
        self.sharp.is_empty() && self.seams.is_empty()
    }
}

/// Build the index and position buffers of a mesh.
///
/// Every face must have `mode.corners()` vertices; mixed triangle/quad meshes
/// are rejected.
pub fn process_geometry(mesh: &MeshData, mode: FaceMode) -> Result<Geometry, ValidationError> {
    if mesh.faces.is_empty() {
        return Err(ValidationError::EmptyMesh);
    }

    let vertex_count = mesh.vertices.len();
    if vertex_count > MAX_VERTEX_COUNT {
        return Err(ValidationError::TooManyVertices {
            count: vertex_count,
            max: MAX_VERTEX_COUNT,
        });
    }
    if mesh.faces.len() > MAX_FACE_COUNT {
        return Err(ValidationError::TooManyFaces {
            count: mesh.faces.len(),
            max: MAX_FACE_COUNT,
        });
    }

    let found = face_mode(mesh)?;
    if found != mode {
        return Err(ValidationError::FaceModeMismatch {
            expected: mode.name(),
            found: found.name(),
        });
    }

    let mut indices = Vec::with_capacity(mesh.faces.len() * mode.corners());
    for (face_index, face) in mesh.faces.iter().enumerate() {
        for &index in &face.vertices {
            if index as usize >= vertex_count {
                return Err(ValidationError::IndexOutOfRange {
                    face: face_index,
                    index,
                    vertex_count,
                });
            }
            // Bounded by MAX_VERTEX_COUNT above
            indices.push(index as u16);
        }
    }

    let positions = mesh
        .vertices
        .iter()
        .flat_map(|v| v.position)
        .collect();

    Ok(Geometry {
        mode,
        indices,
        positions,
    })
}

/// Determine whether a mesh is all triangles or all quads
fn face_mode(mesh: &MeshData) -> Result<FaceMode, ValidationError> {
    let mut triangles = 0;
    let mut quads = 0;
    for (index, face) in mesh.faces.iter().enumerate() {
        match face.vertices.len() {
            3 => triangles += 1,
            4 => quads += 1,
            len => return Err(ValidationError::UnsupportedFace { face: index, len }),
        }
    }

    match (triangles, quads) {
        (_, 0) => Ok(FaceMode::Triangles),
        (0, _) => Ok(FaceMode::Quads),
        (triangles, quads) => Err(ValidationError::MixedTopology { triangles, quads }),
    }
}

/// Build the sharp vertex list and per-vertex UVs of a mesh.
///
/// UVs are stored per face corner; each vertex takes the UV of its corner in
/// the lowest-indexed face that uses it. Expects a mesh that passed
/// [`process_geometry`].
pub fn process_texture(mesh: &MeshData) -> Result<TextureData, ValidationError> {
    let vertex_count = mesh.vertices.len();

    let mut sharp_vertices = Vec::new();
    for (edge_index, edge) in mesh.edges.iter().enumerate() {
        if !edge.sharp {
            continue;
        }
        for index in edge.vertices {
            if index as usize >= vertex_count {
                return Err(ValidationError::EdgeOutOfRange {
                    edge: edge_index,
                    index,
                    vertex_count,
                });
            }
            sharp_vertices.push(index as u16);
        }
    }
    sharp_vertices.sort_unstable();
    sharp_vertices.dedup();

    for (face_index, face) in mesh.faces.iter().enumerate() {
        let corners = face.vertices.len();
        if face.uvs.as_ref().is_none_or(|uvs| uvs.len() != corners) {
            return Err(ValidationError::MissingUvs {
                face: face_index,
                corners,
            });
        }
    }

    // (face, corner) of the first occurrence of each vertex
    let mut first_corner: Vec<Option<(usize, usize)>> = vec![None; vertex_count];
    for (face_index, face) in mesh.faces.iter().enumerate() {
        for (corner, &index) in face.vertices.iter().enumerate() {
            let slot = &mut first_corner[index as usize];
            if slot.is_none() {
                *slot = Some((face_index, corner));
            }
        }
    }

    let mut uvs = Vec::with_capacity(vertex_count * 2);
    for (vertex, slot) in first_corner.iter().enumerate() {
        let (face, corner) = slot.ok_or(ValidationError::DanglingVertex { vertex })?;
        let uv = mesh.faces[face]
            .uvs
            .as_ref()
            .and_then(|uvs| uvs.get(corner))
            .ok_or(ValidationError::MissingUvs {
                face,
                corners: mesh.faces[face].vertices.len(),
            })?;
        uvs.extend_from_slice(uv);
    }

    Ok(TextureData {
        sharp_vertices,
        uvs,
    })
}
