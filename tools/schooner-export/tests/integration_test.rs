//! Integration tests for schooner-export
//!
//! Tests the full pipeline: build scene -> export -> decode output

mod scene_generator;

use std::path::Path;
use tempfile::tempdir;

use scene_generator::decode;
use schooner_export::config::{ExportConfig, FaceMode};
use schooner_export::scene::{Edge, Face, GroupWeight, MeshVertex, ObjectData, RotationMode};
use schooner_export::{
    check_scene, export_scene, ExportError, ExportReport, ReportLog, Scene, ValidationError,
    SCH3D_FORMAT,
};

fn export(scene: &Scene, config: &ExportConfig, dir: &Path) -> (ExportReport, ReportLog) {
    let mut log = ReportLog::new();
    let report = export_scene(scene, config, dir, &mut log).expect("export failed");
    (report, log)
}

/// Test cube export in triangle mode
#[test]
fn test_cube_mesh() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = ExportConfig::default();
    let (report, log) = export(&scene_generator::cube_scene(), &config, dir.path());

    let path = dir.path().join("Cube.sch3Dmesh");
    assert_eq!(report.written, vec![path.clone()]);
    assert!(report.skipped.is_empty());
    assert_eq!(log.warning_count(), 0);

    let data = std::fs::read(&path).expect("Failed to read mesh file");
    assert_eq!(data[4], 0b0000_0001, "flags: triangles only");

    let mesh = decode::mesh(&data);
    assert_eq!(mesh.version, 1);
    assert_eq!(mesh.face_count, 12);
    assert_eq!(mesh.vertex_count, 8);
    assert_eq!(mesh.indices.len(), 36);
    assert_eq!(mesh.positions.len(), 24);
    assert!(mesh.indices.iter().all(|&i| i < mesh.vertex_count));
    assert_eq!(data.len(), 4 + 1 + 2 + 2 + 36 * 2 + 24 * 4);
}

/// Test quad mode keeps four indices per face
#[test]
fn test_quad_mesh() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut scene = scene_generator::cube_scene();
    scene.objects[0] = scene_generator::mesh_object("Cube.001", scene_generator::cube_quads());
    let mut config = ExportConfig::default();
    config.mesh.faces = FaceMode::Quads;

    let (report, _) = export(&scene, &config, dir.path());
    assert_eq!(report.written, vec![dir.path().join("Cube.sch3Dmesh")]);

    let data = std::fs::read(dir.path().join("Cube.sch3Dmesh")).unwrap();
    let mesh = decode::mesh(&data);
    assert!(!mesh.flags.triangles);
    assert_eq!(mesh.face_count, 6);
    assert_eq!(mesh.indices.len(), 24);
}

/// Duplicate suffixes collapse onto one mesh file, with a warning
#[test]
fn test_mesh_stem_collision_warns() {
    let dir = tempdir().unwrap();
    let mut scene = scene_generator::cube_scene();
    scene
        .objects
        .push(scene_generator::mesh_object("Cube.001", scene_generator::cube_triangles()));

    let (report, log) = export(&scene, &ExportConfig::default(), dir.path());
    let path = dir.path().join("Cube.sch3Dmesh");
    assert_eq!(report.written, vec![path.clone(), path]);
    assert_eq!(log.warning_count(), 1);
    assert!(log.warnings().next().unwrap().starts_with("Cube.001:"));
}

/// Exporting the same scene twice gives identical bytes
#[test]
fn test_export_is_deterministic() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    let scene = scene_generator::rig_scene();
    export(&scene, &ExportConfig::default(), first.path());
    export(&scene, &ExportConfig::default(), second.path());

    for file in ["Body.sch3Dmesh", "Rig.sch3Darmature"] {
        let a = std::fs::read(first.path().join(file)).unwrap();
        let b = std::fs::read(second.path().join(file)).unwrap();
        assert_eq!(a, b, "{} differs between runs", file);
    }
}

/// Textured cube carries UVs and the sharp vertex list
#[test]
fn test_textured_mesh() {
    let dir = tempdir().unwrap();
    let mut mesh = scene_generator::textured_cube();
    mesh.edges.push(Edge {
        vertices: [6, 2],
        seam: false,
        sharp: true,
    });
    let scene = Scene {
        objects: vec![scene_generator::mesh_object("Crate", mesh)],
        actions: Vec::new(),
    };
    let mut config = ExportConfig::default();
    config.mesh.textured = true;

    export(&scene, &config, dir.path());
    let data = std::fs::read(dir.path().join("Crate.sch3Dmesh")).unwrap();
    let mesh = decode::mesh(&data);

    assert!(mesh.flags.textured);
    assert_eq!(mesh.sharp_vertices, vec![2, 6]);
    assert_eq!(mesh.uvs.len(), 16);
    // Vertex 6 is (1, 1, 1)
    assert_eq!(&mesh.uvs[12..14], &[1.0, 1.0]);
}

/// Mixed topology is rejected and no file is written
#[test]
fn test_mixed_topology_skipped() {
    let dir = tempdir().unwrap();
    let mut scene = scene_generator::cube_scene();
    if let ObjectData::Mesh(mesh) = &mut scene.objects[0].data {
        mesh.faces.push(Face {
            vertices: vec![0, 1, 2, 3],
            uvs: None,
        });
    }

    let (report, log) = export(&scene, &ExportConfig::default(), dir.path());
    assert!(report.written.is_empty());
    assert_eq!(report.skipped.len(), 1);
    assert!(matches!(
        report.skipped[0].error,
        ValidationError::MixedTopology { .. }
    ));
    assert_eq!(log.warning_count(), 1);
    assert!(!dir.path().join("Cube.sch3Dmesh").exists());
}

/// A skinned vertex with only near-zero weights aborts that mesh
#[test]
fn test_unweighted_skinned_vertex() {
    let dir = tempdir().unwrap();
    let mut scene = scene_generator::rig_scene();
    if let ObjectData::Mesh(mesh) = &mut scene.objects[1].data {
        mesh.vertices.push(MeshVertex {
            position: [0.0, 0.0, 1.0],
            groups: vec![GroupWeight {
                group: 0,
                weight: 0.00005,
            }],
        });
        mesh.faces.push(Face {
            vertices: vec![0, 1, 9],
            uvs: None,
        });
    }

    let (report, _) = export(&scene, &ExportConfig::default(), dir.path());
    assert!(!dir.path().join("Body.sch3Dmesh").exists());
    assert_eq!(
        report.skipped[0].error,
        ValidationError::UnweightedVertex { vertex: 9 }
    );
    // The armature is unaffected
    assert!(dir.path().join("Rig.sch3Darmature").exists());
}

/// Skinned mesh stores one bone influence per vertex
#[test]
fn test_skinned_mesh() {
    let dir = tempdir().unwrap();
    export(&scene_generator::rig_scene(), &ExportConfig::default(), dir.path());

    let data = std::fs::read(dir.path().join("Body.sch3Dmesh")).unwrap();
    let mesh = decode::mesh(&data);
    assert!(mesh.flags.skinned);
    assert_eq!(mesh.weights.len(), 9);
    assert_eq!(mesh.weights[0], vec![(0, 1.0)]);
    assert_eq!(mesh.weights[4], vec![(1, 1.0)]);
    assert_eq!(mesh.weights[8], vec![(2, 1.0)]);
}

/// Armature file: bone table, movement block, then bone curves
#[test]
fn test_armature_file() {
    let dir = tempdir().unwrap();
    export(&scene_generator::rig_scene(), &ExportConfig::default(), dir.path());

    let data = std::fs::read(dir.path().join("Rig.sch3Darmature")).unwrap();
    let armature = decode::armature(&data);
    assert_eq!(armature.version, 1);
    assert_eq!(
        armature.bones,
        vec![([0.0, 0.0, 0.0], 0), ([0.0, 1.0, 0.0], 1), ([0.0, 2.0, 0.0], 2)]
    );

    assert_eq!(armature.actions.len(), 1);
    let wave = &armature.actions[0];
    assert_eq!(wave.name, "Wave");
    assert!(wave.flags.location);
    assert!(!wave.flags.rotation);

    // Location keys at frame 5 set the origin for the whole action
    assert_eq!(wave.curves.len(), 3);
    assert_eq!(wave.curves[0].points(), vec![[0.0, 0.0]]);

    // Root and Head have no curves; Spine has four two-key curves
    assert!(wave.bones[0].iter().all(|c| c.count == 0));
    assert!(wave.bones[2].iter().all(|c| c.count == 0));
    let spine = &wave.bones[1];
    assert!(spine.iter().all(|c| c.count == 2 && c.pairs.len() == 4));
    // Bone keys at frames 3 and 9 are shifted by the same origin
    assert_eq!(spine[0].pairs[0], [-2.0, 1.0]);
    assert_eq!(spine[0].pairs[3][0], 4.0);
}

/// Object actions land in a movements file with times from zero
#[test]
fn test_movements_file() {
    let dir = tempdir().unwrap();
    let scene = scene_generator::animated_cube_scene("CubeAction.Spin");
    let (report, _) = export(&scene, &ExportConfig::default(), dir.path());

    // Movements are exported before meshes
    assert_eq!(
        report.written,
        vec![
            dir.path().join("Cube.sch3Dmovements"),
            dir.path().join("Cube.sch3Dmesh")
        ]
    );

    let data = std::fs::read(dir.path().join("Cube.sch3Dmovements")).unwrap();
    let (version, actions) = decode::movements(&data);
    assert_eq!(version, 1);
    assert_eq!(actions.len(), 1);

    let spin = &actions[0];
    assert_eq!(spin.name, "Spin");
    assert_eq!(spin.flags.bits(), [false, true, false, false]);
    assert_eq!(spin.curves.len(), 4);
    assert!(spin.curves.iter().all(|c| c.count == 3));
    // version, name, flags, one shared count, then 4 curves of 7 pairs
    assert_eq!(data.len(), 4 + 5 + 1 + 1 + 4 * 7 * 8);

    let w = &spin.curves[0];
    assert_eq!(w.count, 3);
    // point, right | left, point, right | left, point
    assert_eq!(w.pairs.len(), 7);
    let times: Vec<f32> = w.points().iter().map(|p| p[0]).collect();
    assert_eq!(times, vec![0.0, 10.0, 20.0]);
    assert_eq!(w.pairs[1][0], 0.5);
    assert_eq!(w.pairs[6][0], 20.0);
}

/// Actions without a name suffix get a generated name and one warning
#[test]
fn test_unnamed_action() {
    let dir = tempdir().unwrap();
    let scene = scene_generator::animated_cube_scene("CubeAction");
    let (_, log) = export(&scene, &ExportConfig::default(), dir.path());

    assert_eq!(log.warning_count(), 1);
    let data = std::fs::read(dir.path().join("Cube.sch3Dmovements")).unwrap();
    let (_, actions) = decode::movements(&data);
    assert_eq!(actions[0].name, "unnamed0");
}

/// Euler-rotated objects cannot export movements but still export meshes
#[test]
fn test_euler_object_skips_movements() {
    let dir = tempdir().unwrap();
    let mut scene = scene_generator::animated_cube_scene("CubeAction.Spin");
    scene.objects[0].rotation_mode = RotationMode::Euler;

    let (report, log) = export(&scene, &ExportConfig::default(), dir.path());
    assert_eq!(report.written, vec![dir.path().join("Cube.sch3Dmesh")]);
    assert_eq!(log.warning_count(), 1);
    assert!(matches!(
        report.skipped[0].error,
        ValidationError::NonQuaternionRotation { .. }
    ));
}

/// Check mode encodes everything but writes nothing
#[test]
fn test_check_writes_nothing() {
    let mut log = ReportLog::new();
    let report = check_scene(
        &scene_generator::rig_scene(),
        &ExportConfig::default(),
        &mut log,
    )
    .unwrap();
    assert_eq!(report.written.len(), 2);
    assert!(!report.written[0].exists());
}

/// An unwritable output directory is fatal
#[test]
fn test_output_dir_error_is_fatal() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let mut log = ReportLog::new();
    let err = export_scene(
        &scene_generator::cube_scene(),
        &ExportConfig::default(),
        &blocker.join("out"),
        &mut log,
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::CreateDir { .. }));
    assert!(err.is_fatal());
}

/// Test the CLI build command end to end
#[test]
fn test_cli_build() {
    let dir = tempdir().expect("Failed to create temp dir");
    let scene_path = dir.path().join("level.json");
    let config_path = dir.path().join("export.toml");
    let json = serde_json::to_string(&scene_generator::animated_cube_scene("CubeAction.Spin"))
        .expect("Failed to encode scene");
    std::fs::write(&scene_path, json).unwrap();
    std::fs::write(&config_path, "[export]\nlog_to_file = true\n").unwrap();

    let status = std::process::Command::new(env!("CARGO_BIN_EXE_schooner-export"))
        .args([
            "build",
            scene_path.to_str().unwrap(),
            "-c",
            config_path.to_str().unwrap(),
        ])
        .status()
        .expect("Failed to run schooner-export");
    assert!(status.success(), "schooner-export build command failed");

    let out = dir.path().join("level_exports");
    assert!(out.join(SCH3D_FORMAT.mesh_file("Cube")).exists());
    assert!(out.join(SCH3D_FORMAT.movements_file("Cube")).exists());
    assert!(out.join("log.txt").exists());
}

/// Test the CLI split-plan command prints JSON
#[test]
fn test_cli_split_plan() {
    let dir = tempdir().unwrap();
    let scene_path = dir.path().join("level.json");
    let mut scene = scene_generator::cube_scene();
    if let ObjectData::Mesh(mesh) = &mut scene.objects[0].data {
        mesh.edges.push(Edge {
            vertices: [0, 1],
            seam: false,
            sharp: true,
        });
    }
    std::fs::write(&scene_path, serde_json::to_string(&scene).unwrap()).unwrap();

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_schooner-export"))
        .args(["split-plan", scene_path.to_str().unwrap()])
        .output()
        .expect("Failed to run schooner-export");
    assert!(output.status.success());

    let plans: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plans[0]["object"], "Cube");
    assert_eq!(plans[0]["sharp"], serde_json::json!([0]));
}
