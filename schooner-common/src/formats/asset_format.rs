//! Asset format table
//!
//! Single source of truth for the file extensions and format version of the
//! Schooner 3D asset files.

/// Format version written at the start of every file
pub const FORMAT_VERSION: i32 = 1;

/// File format specification for one family of asset files.
#[derive(Debug, Clone, Copy)]
pub struct AssetFormat {
    /// Version written as the leading `i32` of every file
    pub version: i32,

    /// Mesh file extension without dot (e.g., "sch3Dmesh")
    pub mesh_ext: &'static str,

    /// Armature file extension without dot (e.g., "sch3Darmature")
    pub armature_ext: &'static str,

    /// Movements file extension without dot (e.g., "sch3Dmovements")
    pub movements_ext: &'static str,
}

impl AssetFormat {
    pub const fn new(
        version: i32,
        mesh_ext: &'static str,
        armature_ext: &'static str,
        movements_ext: &'static str,
    ) -> Self {
        Self {
            version,
            mesh_ext,
            armature_ext,
            movements_ext,
        }
    }

    /// File name for a mesh asset (`<name>.sch3Dmesh`)
    pub fn mesh_file(&self, name: &str) -> String {
        format!("{}.{}", name, self.mesh_ext)
    }

    /// File name for an armature asset (`<name>.sch3Darmature`)
    pub fn armature_file(&self, name: &str) -> String {
        format!("{}.{}", name, self.armature_ext)
    }

    /// File name for a movements asset (`<name>.sch3Dmovements`)
    pub fn movements_file(&self, name: &str) -> String {
        format!("{}.{}", name, self.movements_ext)
    }
}

/// Schooner 3D format specification (version 1).
pub const SCH3D_FORMAT: AssetFormat =
    AssetFormat::new(FORMAT_VERSION, "sch3Dmesh", "sch3Darmature", "sch3Dmovements");
