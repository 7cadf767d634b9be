//! Shared types and utilities for Schooner 3D asset files
//!
//! This crate provides the wire-level vocabulary shared between:
//! - `schooner-export` (asset pipeline)
//! - any loader that reads `.sch3Dmesh`, `.sch3Darmature` or `.sch3Dmovements`
//!
//! # Modules
//!
//! - [`writer`] - Big-endian primitive encoder (flags, integers, clamped floats, strings)
//! - [`formats`] - File layouts, flag bytes and the extension/version table

pub mod formats;
pub mod writer;

// Re-export the primitive encoder
pub use writer::{BinaryWriter, ROUND_TO_ZERO_WITHIN, clamp_float};

// Re-export commonly used format items
pub use formats::{
    // Format table
    AssetFormat,
    BONE_CURVE_COMPONENTS,
    FORMAT_VERSION,
    MAX_BONE_COUNT,
    MAX_BONE_WEIGHTS,
    MAX_FACE_COUNT,
    MAX_KEYFRAMES,
    MAX_VERTEX_COUNT,
    // Flag bytes
    MeshFlags,
    MovementFlags,
    SCH3D_FORMAT,
    // Field encoders
    bone_count_byte,
    parent_index_byte,
    point_pair_count,
};
