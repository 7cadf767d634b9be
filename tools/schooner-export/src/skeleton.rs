//! Bone filtering and the armature bone table
//!
//! Only bones that actually deform a child mesh are exported. The resulting
//! list fixes the bone indices used by both the mesh skin data and the
//! armature file.

use hashbrown::{HashMap, HashSet};

use schooner_common::{bone_count_byte, clamp_float, parent_index_byte, MAX_BONE_COUNT};

use crate::error::ValidationError;
use crate::scene::{ArmatureData, Bone, MeshData, Scene, SceneObject};

/// Filtered bone list of an armature with encoded parent indices
#[derive(Debug, Clone)]
pub struct Skeleton<'a> {
    /// Exported bones, in armature order
    pub bones: Vec<&'a Bone>,
    /// 0 for a root bone, else 1 + index into `bones`
    pub parents: Vec<u8>,
}

impl<'a> Skeleton<'a> {
    /// Filter the bones of `object` and resolve their parent indices.
    pub fn build(
        scene: &'a Scene,
        object: &'a SceneObject,
        armature: &'a ArmatureData,
    ) -> Result<Self, ValidationError> {
        let bones = filter_bones(scene, object, armature);
        if bones.is_empty() {
            return Err(ValidationError::NoUsedBones {
                armature: object.name.clone(),
            });
        }
        if bones.len() > MAX_BONE_COUNT {
            return Err(ValidationError::TooManyBones {
                count: bones.len(),
                max: MAX_BONE_COUNT,
            });
        }

        let all: HashSet<&str> = armature.bones.iter().map(|b| b.name.as_str()).collect();
        let kept: HashMap<&str, usize> = bones
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name.as_str(), i))
            .collect();

        let mut parents = Vec::with_capacity(bones.len());
        for bone in &bones {
            let parent = match bone.parent.as_deref() {
                None => None,
                Some(parent) => match kept.get(parent) {
                    Some(&index) => Some(index),
                    None if all.contains(parent) => {
                        return Err(ValidationError::OrphanedBone {
                            bone: bone.name.clone(),
                            parent: parent.to_string(),
                        });
                    }
                    None => {
                        return Err(ValidationError::UnknownParent {
                            bone: bone.name.clone(),
                            parent: parent.to_string(),
                        });
                    }
                },
            };

            let byte =
                parent_index_byte(parent).ok_or_else(|| ValidationError::ParentIndexOverflow {
                    bone: bone.name.clone(),
                    index: parent.unwrap_or_default(),
                })?;
            parents.push(byte);
        }

        Ok(Self { bones, parents })
    }

    /// Stored bone count byte (count minus one)
    pub fn count_byte(&self) -> u8 {
        // build() guarantees 1..=MAX_BONE_COUNT bones
        bone_count_byte(self.bones.len()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}

/// Bones of `armature` that deform at least one vertex of a mesh parented to
/// `object`, in armature order
pub fn filter_bones<'a>(
    scene: &'a Scene,
    object: &SceneObject,
    armature: &'a ArmatureData,
) -> Vec<&'a Bone> {
    let meshes: Vec<&MeshData> = scene
        .children_of(&object.name)
        .filter_map(SceneObject::mesh)
        .collect();

    armature
        .bones
        .iter()
        .filter(|bone| meshes.iter().any(|mesh| deforms(mesh, &bone.name)))
        .collect()
}

/// Whether any vertex carries a non-zero weight in the group named `bone`
fn deforms(mesh: &MeshData, bone: &str) -> bool {
    let Some(group) = mesh.vertex_group_index(bone) else {
        return false;
    };
    mesh.vertices.iter().any(|v| {
        v.groups
            .iter()
            .any(|g| g.group == group && clamp_float(g.weight) != 0.0)
    })
}
