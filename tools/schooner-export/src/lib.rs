//! schooner-export library
//!
//! Converts a host scene snapshot into Schooner 3D asset files
//! (.sch3Dmesh, .sch3Darmature, .sch3Dmovements).

pub mod animation;
pub mod config;
pub mod error;
pub mod export;
pub mod formats;
pub mod logging;
pub mod mesh;
pub mod report;
pub mod scene;
pub mod skeleton;

// Re-export the file format table from schooner-common
pub use schooner_common::{AssetFormat, SCH3D_FORMAT};

// Re-export the run entry points
pub use config::ExportConfig;
pub use error::{ExportError, Result, ValidationError};
pub use export::{check_scene, export_scene, ExportReport, ExportSession, SkippedObject};
pub use report::{ReportLog, Reporter, TracingReporter};
pub use scene::Scene;

// Re-export key types for mesh conversion
pub use mesh::{EdgeSplitPlan, MeshExport};
