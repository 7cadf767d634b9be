//! Export run over a whole scene
//!
//! Movements files are written first (one per animated mesh object), then
//! mesh files, then armature files. Each file is encoded completely in memory
//! before anything touches the disk, so a validation error never leaves a
//! partial file behind.

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use schooner_common::{BinaryWriter, SCH3D_FORMAT};

use crate::animation::{actions_of_armature, actions_of_object, ActionBlock, ActionNamer};
use crate::config::ExportConfig;
use crate::error::{ExportError, Result, ValidationError};
use crate::formats::{write_armature, write_mesh, write_movements};
use crate::mesh::{bind_skin, process_geometry, process_texture, MeshExport};
use crate::report::Reporter;
use crate::scene::{ArmatureData, MeshData, RotationMode, Scene, SceneObject};
use crate::skeleton::Skeleton;

/// Kind of file an object was being exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Movements,
    Mesh,
    Armature,
}

impl AssetKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Movements => "movements",
            Self::Mesh => "mesh",
            Self::Armature => "armature",
        }
    }
}

/// An object whose export was abandoned
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedObject {
    pub object: String,
    pub kind: AssetKind,
    pub error: ValidationError,
}

/// Outcome of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Files written, in order (for a dry run: files that would be written)
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedObject>,
}

/// State of one export run
pub struct ExportSession<'c> {
    config: &'c ExportConfig,
    output_dir: PathBuf,
    dry_run: bool,
    namer: ActionNamer,
    /// Mesh files produced so far, to catch stem collisions
    mesh_files: HashSet<PathBuf>,
    report: ExportReport,
}

impl<'c> ExportSession<'c> {
    pub fn new(config: &'c ExportConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            output_dir: output_dir.into(),
            dry_run: false,
            namer: ActionNamer::new(),
            mesh_files: HashSet::new(),
            report: ExportReport::default(),
        }
    }

    /// Encode everything but write nothing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export every object of `scene`.
    ///
    /// Validation errors skip the offending object; I/O errors stop the run.
    pub fn run(mut self, scene: &Scene, reporter: &mut dyn Reporter) -> Result<ExportReport> {
        if !self.dry_run {
            fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::CreateDir {
                path: self.output_dir.clone(),
                source,
            })?;
        }

        for object in &scene.objects {
            if object.mesh().is_some() {
                let result = self.export_movements(scene, object, reporter);
                self.settle(object, AssetKind::Movements, result, reporter)?;
            }
        }

        for object in &scene.objects {
            if let Some(mesh) = object.mesh() {
                let result = self.export_mesh(scene, object, mesh, reporter);
                self.settle(object, AssetKind::Mesh, result, reporter)?;
            }
        }

        for object in &scene.objects {
            if let Some(armature) = object.armature() {
                let result = self.export_armature(scene, object, armature, reporter);
                self.settle(object, AssetKind::Armature, result, reporter)?;
            }
        }

        reporter.info(&format!(
            "Export finished: {} file(s), {} object(s) skipped",
            self.report.written.len(),
            self.report.skipped.len()
        ));
        Ok(self.report)
    }

    /// Turn a per-object validation error into a warning; pass fatal errors on
    fn settle(
        &mut self,
        object: &SceneObject,
        kind: AssetKind,
        result: Result<()>,
        reporter: &mut dyn Reporter,
    ) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(ExportError::Validation(error)) => {
                reporter.warn(&format!(
                    "{}: {} export skipped: {}",
                    object.name,
                    kind.name(),
                    error
                ));
                self.report.skipped.push(SkippedObject {
                    object: object.name.clone(),
                    kind,
                    error,
                });
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn export_movements(
        &mut self,
        scene: &Scene,
        object: &SceneObject,
        reporter: &mut dyn Reporter,
    ) -> Result<()> {
        let actions = actions_of_object(scene, object);
        if actions.is_empty() {
            tracing::debug!("{}: no object actions", object.name);
            return Ok(());
        }
        if object.rotation_mode != RotationMode::Quaternion {
            return Err(ValidationError::NonQuaternionRotation {
                object: object.name.clone(),
                mode: object.rotation_mode.name(),
            }
            .into());
        }

        let mut blocks = Vec::with_capacity(actions.len());
        for action in actions {
            let name = self.namer.record_name(&action.name, reporter);
            blocks.push(ActionBlock::movement(action, name, &self.config.movements)?);
        }

        let path = self
            .output_dir
            .join(SCH3D_FORMAT.movements_file(&object.name));
        let bytes = encode(&path, |w| write_movements(w, &blocks))?;
        self.write_file(path, bytes, reporter, &format!("{} action(s)", blocks.len()))
    }

    fn export_mesh(
        &mut self,
        scene: &Scene,
        object: &SceneObject,
        mesh: &MeshData,
        reporter: &mut dyn Reporter,
    ) -> Result<()> {
        let geometry = process_geometry(mesh, self.config.mesh.faces)?;

        let texture = if self.config.mesh.textured {
            Some(process_texture(mesh)?)
        } else {
            None
        };

        let rig = object
            .parent
            .as_deref()
            .and_then(|parent| scene.object(parent))
            .and_then(|parent| parent.armature().map(|armature| (parent, armature)));
        let skin = match rig {
            Some((parent, armature)) => {
                let skeleton = Skeleton::build(scene, parent, armature)?;
                Some(bind_skin(mesh, &skeleton.bones)?)
            }
            None => None,
        };

        let export = MeshExport::new(geometry, texture, skin);
        let detail = format!(
            "{} faces, {} vertices",
            export.geometry().face_count(),
            export.geometry().vertex_count()
        );

        let path = self
            .output_dir
            .join(SCH3D_FORMAT.mesh_file(mesh_file_stem(&object.name)));
        let bytes = encode(&path, |w| write_mesh(w, &export))?;
        if !self.mesh_files.insert(path.clone()) {
            reporter.warn(&format!(
                "{}: {} was already exported in this run and is overwritten",
                object.name,
                path.display()
            ));
        }
        self.write_file(path, bytes, reporter, &detail)
    }

    fn export_armature(
        &mut self,
        scene: &Scene,
        object: &SceneObject,
        armature: &ArmatureData,
        reporter: &mut dyn Reporter,
    ) -> Result<()> {
        let actions = actions_of_armature(scene, object, armature, reporter);
        if actions.is_empty() {
            tracing::debug!("{}: no armature actions", object.name);
            return Ok(());
        }

        let skeleton = Skeleton::build(scene, object, armature)?;

        let mut blocks = Vec::with_capacity(actions.len());
        for action in actions {
            let name = self.namer.record_name(&action.name, reporter);
            blocks.push(ActionBlock::armature(
                action,
                name,
                &self.config.armature,
                &skeleton.bones,
            )?);
        }

        let path = self
            .output_dir
            .join(SCH3D_FORMAT.armature_file(&object.name));
        let bytes = encode(&path, |w| write_armature(w, &skeleton, &blocks))?;
        let detail = format!("{} bones, {} action(s)", skeleton.len(), blocks.len());
        self.write_file(path, bytes, reporter, &detail)
    }

    fn write_file(
        &mut self,
        path: PathBuf,
        bytes: Vec<u8>,
        reporter: &mut dyn Reporter,
        detail: &str,
    ) -> Result<()> {
        if self.dry_run {
            reporter.info(&format!("Checked {} ({})", path.display(), detail));
        } else {
            fs::write(&path, &bytes).map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
            reporter.info(&format!(
                "Exported {} ({}, {} bytes)",
                path.display(),
                detail,
                bytes.len()
            ));
        }
        self.report.written.push(path);
        Ok(())
    }
}

/// Encode a file into memory
fn encode(
    path: &Path,
    write: impl FnOnce(&mut BinaryWriter<Vec<u8>>) -> std::io::Result<()>,
) -> Result<Vec<u8>> {
    let mut w = BinaryWriter::new(Vec::new());
    write(&mut w)
        .and_then(|()| w.finish())
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Mesh files drop the host's duplicate suffix (`Cube.001` -> `Cube`)
pub fn mesh_file_stem(object_name: &str) -> &str {
    object_name
        .rsplit_once('.')
        .map_or(object_name, |(stem, _)| stem)
}

/// Export `scene` into `output_dir`
pub fn export_scene(
    scene: &Scene,
    config: &ExportConfig,
    output_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Result<ExportReport> {
    ExportSession::new(config, output_dir).run(scene, reporter)
}

/// Encode `scene` without writing any file
pub fn check_scene(
    scene: &Scene,
    config: &ExportConfig,
    reporter: &mut dyn Reporter,
) -> Result<ExportReport> {
    ExportSession::new(config, PathBuf::new())
        .dry_run(true)
        .run(scene, reporter)
}
