//! Programmatic scene snapshots for integration tests.
//!
//! Builds scenes with:
//! - a unit cube (8 vertices, 6 quads split into 12 triangles)
//! - a 3-bone rig (Root -> Spine -> Head) skinning a stacked mesh
//! - object and armature actions with Bezier keyframes

#![allow(dead_code)]

pub mod decode;

use schooner_export::scene::{
    Action, ArmatureData, Bone, Curve, Face, GroupWeight, Keyframe, MeshData, MeshVertex,
    ObjectData, RotationMode, Scene, SceneObject,
};

/// Bone names of the test rig, in armature order
pub const BONES: [&str; 3] = ["Root", "Spine", "Head"];

/// Cube corner positions
const CUBE_POSITIONS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Cube quads, counter-clockwise from outside
const CUBE_QUADS: [[u32; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [2, 3, 7, 6],
    [1, 2, 6, 5],
    [0, 4, 7, 3],
];

/// Cube as the host hands it over after quadrangulation
pub fn cube_quads() -> MeshData {
    MeshData {
        vertices: CUBE_POSITIONS.iter().map(|&p| vertex(p)).collect(),
        faces: CUBE_QUADS
            .iter()
            .map(|q| Face {
                vertices: q.to_vec(),
                uvs: None,
            })
            .collect(),
        ..Default::default()
    }
}

/// Cube as the host hands it over after triangulation
pub fn cube_triangles() -> MeshData {
    MeshData {
        vertices: CUBE_POSITIONS.iter().map(|&p| vertex(p)).collect(),
        faces: CUBE_QUADS
            .iter()
            .flat_map(|&[a, b, c, d]| {
                [
                    Face {
                        vertices: vec![a, b, c],
                        uvs: None,
                    },
                    Face {
                        vertices: vec![a, c, d],
                        uvs: None,
                    },
                ]
            })
            .collect(),
        ..Default::default()
    }
}

/// Triangulated cube with a planar UV per corner
pub fn textured_cube() -> MeshData {
    let mut mesh = cube_triangles();
    for face in &mut mesh.faces {
        let uvs = face
            .vertices
            .iter()
            .map(|&v| {
                let [x, y, _] = CUBE_POSITIONS[v as usize];
                [(x + 1.0) / 2.0, (y + 1.0) / 2.0]
            })
            .collect();
        face.uvs = Some(uvs);
    }
    mesh
}

pub fn vertex(position: [f32; 3]) -> MeshVertex {
    MeshVertex {
        position,
        groups: Vec::new(),
    }
}

pub fn mesh_object(name: &str, mesh: MeshData) -> SceneObject {
    SceneObject {
        name: name.to_string(),
        parent: None,
        rotation_mode: RotationMode::Quaternion,
        data: ObjectData::Mesh(mesh),
    }
}

/// One mesh object holding the triangulated cube
pub fn cube_scene() -> Scene {
    Scene {
        objects: vec![mesh_object("Cube", cube_triangles())],
        actions: Vec::new(),
    }
}

/// Keyframe with handles half a frame either side
pub fn key(time: f32, value: f32) -> Keyframe {
    Keyframe {
        co: [time, value],
        handle_left: [time - 0.5, value],
        handle_right: [time + 0.5, value],
    }
}

pub fn curve(data_path: &str, array_index: u32, keys: &[(f32, f32)]) -> Curve {
    Curve {
        data_path: data_path.to_string(),
        array_index,
        group: None,
        keyframes: keys.iter().map(|&(t, v)| key(t, v)).collect(),
    }
}

/// Spin around Z: a quaternion rotation channel over `frames`
pub fn spin_curves(data_path: &str, frames: &[f32]) -> Vec<Curve> {
    (0..4)
        .map(|component| {
            let keys: Vec<(f32, f32)> = frames
                .iter()
                .enumerate()
                .map(|(i, &t)| {
                    let angle = i as f32 * 0.5;
                    let value = match component {
                        0 => angle.cos(),
                        3 => angle.sin(),
                        _ => 0.0,
                    };
                    (t, value)
                })
                .collect();
            curve(data_path, component, &keys)
        })
        .collect()
}

/// Cube with one rotation action named `name`
pub fn animated_cube_scene(name: &str) -> Scene {
    let mut scene = cube_scene();
    scene.actions.push(Action {
        name: name.to_string(),
        curves: spin_curves("rotation_quaternion", &[1.0, 11.0, 21.0]),
    });
    scene.normalize();
    scene
}

/// Three stacked triangles, each fully weighted to one rig bone
pub fn skinned_body() -> MeshData {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    for (bone, _) in BONES.iter().enumerate() {
        let y = bone as f32;
        let base = vertices.len() as u32;
        for position in [[0.0, y, 0.0], [1.0, y, 0.0], [0.0, y + 1.0, 0.0]] {
            vertices.push(MeshVertex {
                position,
                groups: vec![GroupWeight {
                    group: bone,
                    weight: 1.0,
                }],
            });
        }
        faces.push(Face {
            vertices: vec![base, base + 1, base + 2],
            uvs: None,
        });
    }

    MeshData {
        vertices,
        faces,
        edges: Vec::new(),
        vertex_groups: BONES.iter().map(|b| b.to_string()).collect(),
    }
}

/// Rig armature with the skinned body parented to it and one wave action
pub fn rig_scene() -> Scene {
    let bones = BONES
        .iter()
        .enumerate()
        .map(|(i, name)| Bone {
            name: name.to_string(),
            head: [0.0, i as f32, 0.0],
            parent: i.checked_sub(1).map(|p| BONES[p].to_string()),
        })
        .collect();

    let mut body = mesh_object("Body", skinned_body());
    body.parent = Some("Rig".to_string());

    let mut curves = spin_curves("pose.bones[\"Spine\"].rotation_quaternion", &[3.0, 9.0]);
    curves.push(curve("location", 0, &[(5.0, 0.0)]));
    curves.push(curve("location", 1, &[(5.0, 0.0)]));
    curves.push(curve("location", 2, &[(5.0, 0.0)]));

    let mut scene = Scene {
        objects: vec![
            SceneObject {
                name: "Rig".to_string(),
                parent: None,
                rotation_mode: RotationMode::Quaternion,
                data: ObjectData::Armature(ArmatureData { bones }),
            },
            body,
        ],
        actions: vec![Action {
            name: "RigAction.Wave".to_string(),
            curves,
        }],
    };
    scene.normalize();
    scene
}
