//! External collaboration layer: everything the core pipeline does *not*
//! do — invoking the system preprocessor and assembler/linker as child
//! processes, and managing the `.c`/`.i`/`.s` intermediate files that flow
//! between them. None of this crate's sibling phase crates know these files
//! exist; they only ever see an in-memory source string and write to an
//! in-memory buffer.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use cleric_pipe::CompileFlags;
use cleric_util::{Arena, Handler, StringBuffer};
use log::debug;

use crate::error::DriverError;

/// Arena capacity handed to the core pipeline for one file. A few hundred
/// lines of this C subset comfortably fit in a fraction of this; it is sized
/// generously rather than tightly because there is no recovery path if a
/// real program overruns it.
const ARENA_CAPACITY: usize = 1 << 20;

/// What a full (non-stopped) driver invocation produced.
pub enum DriverOutcome {
    /// A `--lex`/`--parse`/`--validate`/`--tac`/`--codegen` flag stopped the
    /// pipeline early; this is the rendered text of whatever phase it
    /// stopped after, meant to be printed to stdout by the caller.
    Stopped(String),
    /// The pipeline ran to completion and the result was assembled and
    /// linked into an executable at this path.
    Compiled { executable: PathBuf },
}

/// Run the whole per-file driver sequence: preprocess, compile, and (unless
/// a stop flag was given) assemble and link.
pub fn compile_file(input: &Path, flags: CompileFlags) -> Result<DriverOutcome, DriverError> {
    let preprocessed = run_preprocessor(input)?;

    let source = fs::read_to_string(&preprocessed).map_err(|source| DriverError::ReadSource {
        path: preprocessed.clone(),
        source,
    })?;

    let arena = Arena::with_capacity(ARENA_CAPACITY);
    let handler = Handler::new();
    let out = StringBuffer::new(&arena);
    cleric_pipe::compile(&source, flags, &handler, &out, &arena)?;

    fs::remove_file(&preprocessed).map_err(|source| DriverError::RemoveIntermediate {
        path: preprocessed.clone(),
        source,
    })?;

    if stops_early(flags) {
        return Ok(DriverOutcome::Stopped(out.as_str().to_string()));
    }

    let assembly = assembly_path(input);
    fs::write(&assembly, out.as_str()).map_err(|source| DriverError::WriteOutput {
        path: assembly.clone(),
        source,
    })?;

    let executable = run_assembler_linker(&assembly)?;
    Ok(DriverOutcome::Compiled { executable })
}

fn stops_early(flags: CompileFlags) -> bool {
    flags.lex_only || flags.parse_only || flags.validate_only || flags.tac_only || flags.codegen_only
}

/// Run the system C preprocessor over `input.c`, producing `input.i`.
pub fn run_preprocessor(input: &Path) -> Result<PathBuf, DriverError> {
    let output_path = preprocessed_path(input);
    debug!("preprocessing {} -> {}", input.display(), output_path.display());

    let status = Command::new("gcc")
        .arg("-E")
        .arg("-P")
        .arg(input)
        .arg("-o")
        .arg(&output_path)
        .status()
        .map_err(|source| DriverError::Spawn { program: "gcc -E", source })?;

    if !status.success() {
        return Err(DriverError::PreprocessFailed { path: input.to_path_buf() });
    }
    Ok(output_path)
}

/// Invoke the system assembler/linker (`gcc path.s -o path`) and remove the
/// intermediate assembly file once the executable exists.
pub fn run_assembler_linker(assembly: &Path) -> Result<PathBuf, DriverError> {
    let executable_path = executable_path(assembly);
    debug!(
        "assembling and linking {} -> {}",
        assembly.display(),
        executable_path.display()
    );

    let status = Command::new("gcc")
        .arg(assembly)
        .arg("-o")
        .arg(&executable_path)
        .status()
        .map_err(|source| DriverError::Spawn { program: "gcc", source })?;

    if !status.success() {
        return Err(DriverError::AssembleLinkFailed {
            path: assembly.to_path_buf(),
        });
    }

    fs::remove_file(assembly).map_err(|source| DriverError::RemoveIntermediate {
        path: assembly.to_path_buf(),
        source,
    })?;

    Ok(executable_path)
}

/// `foo.c` -> `foo.i`.
fn preprocessed_path(input: &Path) -> PathBuf {
    input.with_extension("i")
}

/// `foo.c` -> `foo.s`.
fn assembly_path(input: &Path) -> PathBuf {
    input.with_extension("s")
}

/// `foo.s` -> `foo` (no extension, matching a Unix/macOS executable name).
fn executable_path(assembly: &Path) -> PathBuf {
    assembly.with_extension("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocessed_path_swaps_extension_to_i() {
        assert_eq!(preprocessed_path(Path::new("main.c")), PathBuf::from("main.i"));
    }

    #[test]
    fn assembly_path_swaps_extension_to_s() {
        assert_eq!(assembly_path(Path::new("main.c")), PathBuf::from("main.s"));
    }

    #[test]
    fn executable_path_strips_the_extension() {
        assert_eq!(executable_path(Path::new("main.s")), PathBuf::from("main"));
    }
}
