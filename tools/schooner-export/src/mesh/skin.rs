//! Vertex group to bone binding

use hashbrown::HashMap;

use schooner_common::{clamp_float, MAX_BONE_COUNT, MAX_BONE_WEIGHTS};

use super::types::{BoneWeight, SkinData, VertexWeights};
use crate::error::ValidationError;
use crate::scene::{Bone, MeshData};

/// Resolve each vertex's group weights against the exported bone list.
///
/// Groups that do not name an exported bone are ignored, as are weights that
/// clamp to zero. Every vertex must keep at least one influence.
pub fn bind_skin(mesh: &MeshData, bones: &[&Bone]) -> Result<SkinData, ValidationError> {
    if bones.len() > MAX_BONE_COUNT {
        return Err(ValidationError::TooManyBones {
            count: bones.len(),
            max: MAX_BONE_COUNT,
        });
    }

    // Bounded by MAX_BONE_COUNT, so every index fits a byte
    let bone_index: HashMap<&str, u8> = bones
        .iter()
        .enumerate()
        .map(|(i, bone)| (bone.name.as_str(), i as u8))
        .collect();

    let group_count = mesh.vertex_groups.len();
    let mut weights = Vec::with_capacity(mesh.vertices.len());

    for (vertex_index, vertex) in mesh.vertices.iter().enumerate() {
        let mut influences = VertexWeights::new();

        for group_weight in &vertex.groups {
            let group_name = mesh.vertex_groups.get(group_weight.group).ok_or(
                ValidationError::UnknownVertexGroup {
                    vertex: vertex_index,
                    group: group_weight.group,
                    group_count,
                },
            )?;

            let weight = clamp_float(group_weight.weight);
            if weight == 0.0 {
                continue;
            }
            let Some(&bone) = bone_index.get(group_name.as_str()) else {
                continue;
            };
            influences.push(BoneWeight { bone, weight });
        }

        if influences.is_empty() {
            return Err(ValidationError::UnweightedVertex {
                vertex: vertex_index,
            });
        }
        if influences.len() > MAX_BONE_WEIGHTS {
            return Err(ValidationError::TooManyBoneWeights {
                vertex: vertex_index,
                count: influences.len(),
                max: MAX_BONE_WEIGHTS,
            });
        }

        weights.push(influences);
    }

    Ok(SkinData { weights })
}
