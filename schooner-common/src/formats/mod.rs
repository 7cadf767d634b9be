//! Schooner 3D binary asset formats
//!
//! Three independent files share one naming convention (object or action
//! name) so a loader can associate them:
//!
//! - [`mesh`] - `.sch3Dmesh`: indexed geometry, optional UVs and bone weights
//! - [`armature`] - `.sch3Darmature`: bone offset table plus per-action curves
//! - [`movements`] - `.sch3Dmovements`: object-level keyframe curves per action
//!
//! All integers are big-endian, floats are IEEE 754 single precision and
//! strings are UTF-8 with a single zero terminator. Every file starts with an
//! `i32` format version.
//!
//! File extensions and the version live in [`AssetFormat`]; use
//! [`SCH3D_FORMAT`] for all Schooner 3D format constants.

pub mod armature;
mod asset_format;
pub mod mesh;
pub mod movements;

pub use armature::*;
pub use asset_format::{AssetFormat, FORMAT_VERSION, SCH3D_FORMAT};
pub use mesh::*;
pub use movements::*;
