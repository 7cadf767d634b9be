//! export.toml parsing
//!
//! Every section and field is optional; an empty file yields the defaults.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ExportError, Result};

/// export.toml structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    #[serde(default)]
    pub export: RunSection,
    #[serde(default)]
    pub mesh: MeshSection,
    /// Channels exported for object-level actions (.sch3Dmovements)
    #[serde(default)]
    pub movements: ChannelOptions,
    /// Movement channels exported ahead of armature bone curves
    #[serde(default)]
    pub armature: ChannelOptions,
}

/// Run-wide options
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    /// Emit debug-level diagnostics.
    /// Default: false
    #[serde(default)]
    pub verbose: bool,

    /// Mirror the log into `log_file` inside the output directory.
    /// Default: false
    #[serde(default)]
    pub log_to_file: bool,

    /// Log file name (no directories).
    /// Default: "log.txt"
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            verbose: false,
            log_to_file: false,
            log_file: default_log_file(),
        }
    }
}

fn default_log_file() -> String {
    "log.txt".to_string()
}

/// Face layout every exported mesh must already have
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceMode {
    #[default]
    Triangles,
    Quads,
}

impl FaceMode {
    pub fn corners(self) -> usize {
        match self {
            Self::Triangles => 3,
            Self::Quads => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Triangles => "triangles",
            Self::Quads => "quads",
        }
    }
}

/// Mesh export options
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeshSection {
    /// Default: triangles
    #[serde(default)]
    pub faces: FaceMode,

    /// Export UVs and the sharp vertex list.
    /// Default: false
    #[serde(default)]
    pub textured: bool,
}

/// Scale channel layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    None,
    /// One curve (`scale[0]`) applied to all axes
    #[default]
    Uniform,
    /// Three curves, one per axis
    Axis,
}

/// Which movement channels an action should carry
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelOptions {
    /// Default: true
    #[serde(default = "default_true")]
    pub location: bool,
    /// Default: true
    #[serde(default = "default_true")]
    pub rotation: bool,
    /// Default: uniform
    #[serde(default)]
    pub scale: ScaleMode,
}

impl Default for ChannelOptions {
    fn default() -> Self {
        Self {
            location: true,
            rotation: true,
            scale: ScaleMode::Uniform,
        }
    }
}

fn default_true() -> bool {
    true
}

impl ExportConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ExportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ExportError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse config from string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|source| ExportError::ParseConfig {
            path: "<string>".into(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config fields
    pub fn validate(&self) -> Result<()> {
        let log_file = &self.export.log_file;
        if log_file.is_empty() {
            return Err(ExportError::InvalidConfig(
                "export.log_file must not be empty".to_string(),
            ));
        }
        if log_file.contains(['/', '\\']) || log_file == "." || log_file == ".." {
            return Err(ExportError::InvalidConfig(format!(
                "export.log_file '{}' must be a plain file name",
                log_file
            )));
        }
        Ok(())
    }
}
