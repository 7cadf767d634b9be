//! Logging setup for the export binary
//!
//! Terminal output goes to stderr through an `EnvFilter` (`RUST_LOG` wins over
//! the default level). With `log_to_file` the same events are mirrored,
//! without ANSI colours, into `<output_dir>/<log_file>`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::RunSection;
use crate::error::{ExportError, Result};

/// Default level for a run: DEBUG when verbose, else INFO
pub fn default_level(run: &RunSection) -> Level {
    if run.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Path of the log file for a run, if file logging is on
pub fn log_path(run: &RunSection, output_dir: &Path) -> Option<PathBuf> {
    run.log_to_file.then(|| output_dir.join(&run.log_file))
}

/// Install the global subscriber.
///
/// Returns the log file path when file logging is enabled. A subscriber that
/// is already installed (e.g. by a test harness) is left in place.
pub fn init(run: &RunSection, output_dir: &Path) -> Result<Option<PathBuf>> {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(run).into())
        .from_env_lossy();

    let path = log_path(run, output_dir);
    let file_layer = match &path {
        Some(path) => {
            fs::create_dir_all(output_dir).map_err(|source| ExportError::CreateDir {
                path: output_dir.to_path_buf(),
                source,
            })?;
            let file = File::create(path).map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        let mut run = RunSection::default();
        assert_eq!(default_level(&run), Level::INFO);
        run.verbose = true;
        assert_eq!(default_level(&run), Level::DEBUG);
    }

    #[test]
    fn test_log_path() {
        let mut run = RunSection::default();
        let dir = Path::new("out");
        assert_eq!(log_path(&run, dir), None);

        run.log_to_file = true;
        assert_eq!(log_path(&run, dir), Some(PathBuf::from("out/log.txt")));
    }
}
