use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::tool::RunError;

/// Fatal errors that halt a run. Per-diagram failures are not errors here;
/// they are reported as [`crate::generate::Outcome::Failed`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("{name} (`{program}`) is unavailable: {source}")]
    PrerequisiteMissing {
        name: String,
        program: String,
        #[source]
        source: RunError,
    },
    #[error("failed to install {name}: {source}")]
    InstallFailed {
        name: String,
        #[source]
        source: RunError,
    },
    #[error("install command is empty")]
    EmptyInstallCommand,
    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
