use std::path::PathBuf;

use cleric_pipe::CompileError;
use thiserror::Error;

/// Every way the driver itself (as opposed to the core pipeline) can fail:
/// subprocess failures and I/O failures writing intermediate artifacts,
/// kept distinct from `CompileError` so the exit-code logic in `main` can
/// tell "gcc wasn't found" apart from "the source didn't compile".
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read {}: {source}", path.display())]
    ReadSource { path: PathBuf, source: std::io::Error },

    #[error("failed to write {}: {source}", path.display())]
    WriteOutput { path: PathBuf, source: std::io::Error },

    #[error("failed to remove {}: {source}", path.display())]
    RemoveIntermediate { path: PathBuf, source: std::io::Error },

    #[error("failed to launch '{program}': {source}")]
    Spawn { program: &'static str, source: std::io::Error },

    #[error("preprocessing {} failed", path.display())]
    PreprocessFailed { path: PathBuf },

    #[error("assembling/linking {} failed", path.display())]
    AssembleLinkFailed { path: PathBuf },

    #[error(transparent)]
    Compile(#[from] CompileError),
}
