//! Export error types
//!
//! Validation errors abort the export of the current object only; every other
//! error is fatal to the run.

use std::io;
use std::path::PathBuf;

/// A scene object cannot be encoded in the Schooner 3D formats.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("mesh has no faces")]
    EmptyMesh,

    #[error("face {face} has {len} vertices (only triangles and quads are supported)")]
    UnsupportedFace { face: usize, len: usize },

    #[error("mesh mixes {triangles} triangles with {quads} quads; triangulate or quadrangulate it first")]
    MixedTopology { triangles: usize, quads: usize },

    #[error("mesh is made of {found} but the export expects {expected}")]
    FaceModeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("face {face} references vertex {index} but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("edge {edge} references vertex {index} but the mesh has {vertex_count} vertices")]
    EdgeOutOfRange {
        edge: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("mesh has {count} vertices, maximum is {max}")]
    TooManyVertices { count: usize, max: usize },

    #[error("mesh has {count} faces, maximum is {max}")]
    TooManyFaces { count: usize, max: usize },

    #[error("face {face} has no UV coordinates for its {corners} corners")]
    MissingUvs { face: usize, corners: usize },

    #[error("vertex {vertex} is not used by any face, so it has no UV coordinate")]
    DanglingVertex { vertex: usize },

    #[error("object '{object}' uses {mode} rotation; only quaternion rotation is supported")]
    NonQuaternionRotation { object: String, mode: &'static str },

    #[error("vertex {vertex} has no bone weight above the rounding threshold")]
    UnweightedVertex { vertex: usize },

    #[error("vertex {vertex} references vertex group {group} but the mesh has {group_count} groups")]
    UnknownVertexGroup {
        vertex: usize,
        group: usize,
        group_count: usize,
    },

    #[error("vertex {vertex} is influenced by {count} bones, maximum is {max}")]
    TooManyBoneWeights {
        vertex: usize,
        count: usize,
        max: usize,
    },

    #[error("armature has {count} used bones, maximum is {max}")]
    TooManyBones { count: usize, max: usize },

    #[error("armature '{armature}' has no bones with weighted vertices")]
    NoUsedBones { armature: String },

    #[error("bone '{bone}' is exported but its parent '{parent}' has no weighted vertices")]
    OrphanedBone { bone: String, parent: String },

    #[error("bone '{bone}' has parent '{parent}' which is not a bone of the armature")]
    UnknownParent { bone: String, parent: String },

    #[error("bone '{bone}' parent index {index} does not fit the parent byte")]
    ParentIndexOverflow { bone: String, index: usize },

    #[error("curve {data_path}[{array_index}] has {count} keyframes, maximum is {max}")]
    TooManyKeyframes {
        data_path: String,
        array_index: u32,
        count: usize,
        max: usize,
    },

    #[error("curve {data_path}[{array_index}] has {found} keyframes but {data_path}[0] has {expected}")]
    UnevenChannel {
        data_path: String,
        array_index: u32,
        expected: usize,
        found: usize,
    },
}

/// Error raised while exporting a scene.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse scene {path}: {source}")]
    ParseScene {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl ExportError {
    /// Whether this error must halt the whole run.
    ///
    /// Validation errors are confined to the object being exported.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}

pub type Result<T, E = ExportError> = std::result::Result<T, E>;
