//! File-mode transforms built atop the pipeline.
//!
//! A file is treated as newline-delimited units: split on `'\n'` alone,
//! with the single trailing empty line of a newline-terminated file dropped
//! as a splitting artifact. Output units are joined with `'\n'` and written
//! in one pass, only after the whole pipeline has succeeded, so a failed
//! operation never leaves a partial or modified file behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::client::Transit;
use crate::core::constants::{DECRYPTED_SUFFIX, ENCRYPTED_SUFFIX};
use crate::core::pipeline;
use crate::core::types::{Direction, EmptyUnits};
use crate::error::{IoError, Result};

/// Read a file and split it into transform units.
pub fn read_units(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| IoError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut units: Vec<String> = content.split('\n').map(str::to_string).collect();
    // A newline-terminated file splits into one trailing empty unit; drop
    // exactly that one. Interior and other trailing blanks are real units.
    if units.last().map_or(false, |u| u.is_empty()) {
        units.pop();
    }

    Ok(units)
}

/// Deterministic output path resolution. No prompts, no probing.
///
/// - `override_file`: write back to the input path.
/// - Output folder given: `folder/basename` plus the `.encrypted` suffix for
///   encryption, or minus one trailing `.encrypted` for decryption.
/// - Neither: encryption appends `.encrypted`; decryption strips a trailing
///   `.encrypted` if present, else appends `.decrypted`.
pub fn resolve_destination(
    input: &Path,
    direction: Direction,
    override_file: bool,
    output_folder: Option<&Path>,
) -> PathBuf {
    if override_file {
        return input.to_path_buf();
    }

    if let Some(folder) = output_folder {
        let name = input
            .file_name()
            .unwrap_or(input.as_os_str())
            .to_string_lossy();
        return match direction {
            Direction::Encrypt => folder.join(format!("{name}{ENCRYPTED_SUFFIX}")),
            Direction::Decrypt => folder.join(name.strip_suffix(ENCRYPTED_SUFFIX).unwrap_or(&name)),
        };
    }

    let path = input.to_string_lossy();
    match direction {
        Direction::Encrypt => PathBuf::from(format!("{path}{ENCRYPTED_SUFFIX}")),
        Direction::Decrypt => match path.strip_suffix(ENCRYPTED_SUFFIX) {
            Some(stripped) => PathBuf::from(stripped),
            None => PathBuf::from(format!("{path}{DECRYPTED_SUFFIX}")),
        },
    }
}

/// Run the whole file transform: read, pipeline, resolve destination, write.
///
/// Returns the path the output was written to.
///
/// # Errors
///
/// Any pipeline or I/O failure aborts before the destination is touched.
pub fn transform_file(
    backend: &impl Transit,
    direction: Direction,
    input: &Path,
    output_folder: Option<&Path>,
    override_file: bool,
    batch_limit: usize,
    empty_units: EmptyUnits,
) -> Result<PathBuf> {
    let units = read_units(input)?;
    debug!(path = %input.display(), units = units.len(), "read input file");

    let transformed = pipeline::transform_units(backend, direction, &units, batch_limit, empty_units)?;

    let destination = resolve_destination(input, direction, override_file, output_folder);

    if let Some(folder) = output_folder.filter(|_| !override_file) {
        fs::create_dir_all(folder).map_err(|e| IoError::CreateDir {
            path: folder.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&destination, transformed.join("\n")).map_err(|e| IoError::Write {
        path: destination.clone(),
        source: e,
    })?;

    debug!(path = %destination.display(), units = transformed.len(), "wrote output file");
    Ok(destination)
}
