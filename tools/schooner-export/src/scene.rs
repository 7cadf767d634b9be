//! Host scene snapshot
//!
//! The host-side dump script serialises the scene to JSON after it has
//! triangulated (or quadrangulated) every mesh and split the edges listed by
//! the [`EdgeSplitPlan`](crate::mesh::EdgeSplitPlan). The exporter reads that
//! snapshot and never edits geometry itself.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ExportError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    /// Name of the parent object, if any
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub rotation_mode: RotationMode,
    pub data: ObjectData,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    #[default]
    Quaternion,
    AxisAngle,
    Euler,
}

impl RotationMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Quaternion => "quaternion",
            Self::AxisAngle => "axis-angle",
            Self::Euler => "euler",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectData {
    Mesh(MeshData),
    Armature(ArmatureData),
    Empty,
}

/// Mesh data after host-side triangulation and edge splitting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub faces: Vec<Face>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    /// Vertex group names, indexed by [`GroupWeight::group`]
    #[serde(default)]
    pub vertex_groups: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshVertex {
    pub position: [f32; 3],
    #[serde(default)]
    pub groups: Vec<GroupWeight>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroupWeight {
    pub group: usize,
    pub weight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    pub vertices: Vec<u32>,
    /// One UV per corner, in the same order as `vertices`
    #[serde(default)]
    pub uvs: Option<Vec<[f32; 2]>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Edge {
    pub vertices: [u32; 2],
    #[serde(default)]
    pub seam: bool,
    #[serde(default)]
    pub sharp: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArmatureData {
    pub bones: Vec<Bone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    /// Head position in armature space
    pub head: [f32; 3],
    #[serde(default)]
    pub parent: Option<String>,
}

/// A named animation clip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(default)]
    pub curves: Vec<Curve>,
}

/// One animated component, e.g. `rotation_quaternion[2]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curve {
    pub data_path: String,
    #[serde(default)]
    pub array_index: u32,
    /// Action group (bone name for pose-bone curves)
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
}

/// Bezier keyframe: `[time, value]` pairs in frame units
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Keyframe {
    pub co: [f32; 2],
    pub handle_left: [f32; 2],
    pub handle_right: [f32; 2],
}

impl Scene {
    /// Load a scene snapshot from a JSON file and normalize it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ExportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut scene: Self =
            serde_json::from_str(&content).map_err(|source| ExportError::ParseScene {
                path: path.to_path_buf(),
                source,
            })?;
        scene.normalize();
        Ok(scene)
    }

    /// Parse a scene snapshot from a JSON string and normalize it
    pub fn from_json(content: &str) -> Result<Self> {
        let mut scene: Self =
            serde_json::from_str(content).map_err(|source| ExportError::ParseScene {
                path: "<string>".into(),
                source,
            })?;
        scene.normalize();
        Ok(scene)
    }

    /// Sort keyframes by time and group pose-bone curves by bone name
    pub fn normalize(&mut self) {
        for action in &mut self.actions {
            action.normalize();
        }
    }

    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Objects whose parent is `name`, in scene order
    pub fn children_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SceneObject> {
        self.objects
            .iter()
            .filter(move |o| o.parent.as_deref() == Some(name))
    }
}

impl SceneObject {
    pub fn mesh(&self) -> Option<&MeshData> {
        match &self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn armature(&self) -> Option<&ArmatureData> {
        match &self.data {
            ObjectData::Armature(armature) => Some(armature),
            _ => None,
        }
    }
}

impl MeshData {
    pub fn vertex_group_index(&self, name: &str) -> Option<usize> {
        self.vertex_groups.iter().position(|g| g == name)
    }
}

impl Action {
    /// Sort keyframes by time and group pose-bone curves by bone name.
    ///
    /// A curve whose data path is `pose.bones["<bone>"].<property>` belongs to
    /// group `<bone>`, whatever group the host reported.
    pub fn normalize(&mut self) {
        for curve in &mut self.curves {
            curve
                .keyframes
                .sort_by(|a, b| a.co[0].total_cmp(&b.co[0]));
            if let Some(bone) = pose_bone_name(&curve.data_path) {
                if curve.group.as_deref() != Some(bone) {
                    curve.group = Some(bone.to_string());
                }
            }
        }
    }

    /// First curve matching an exact data path and component index
    pub fn find_curve(&self, data_path: &str, array_index: u32) -> Option<&Curve> {
        self.curves
            .iter()
            .find(|c| c.data_path == data_path && c.array_index == array_index)
    }

    /// Curves in a group, in action order
    pub fn group_channels<'a, 'g>(
        &'a self,
        group: &'g str,
    ) -> impl Iterator<Item = &'a Curve> + use<'a, 'g> {
        self.curves
            .iter()
            .filter(move |c| c.group.as_deref() == Some(group))
    }
}

impl Curve {
    /// Time of the first keyframe
    pub fn start_time(&self) -> Option<f32> {
        self.keyframes.first().map(|k| k.co[0])
    }
}

/// Bone name of a `pose.bones["<bone>"].<property>` data path
pub fn pose_bone_name(data_path: &str) -> Option<&str> {
    let rest = data_path.strip_prefix("pose.bones[\"")?;
    let (bone, property) = rest.split_once("\"]")?;
    if bone.is_empty() || !property.starts_with('.') || property.len() < 2 {
        return None;
    }
    Some(bone)
}
