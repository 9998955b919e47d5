//! Source location and reading
//!
//! Finds the directories to process and parses their Go files.

use anyhow::{Context, Result};
use fmgen_core::GENERATED_FILE_NAME;
use fmgen_core::syntax::{SourceFile, parse_source};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Dependency directory never descended into.
pub const VENDOR_DIR: &str = "vendor";

const GO_EXTENSION: &str = ".go";
const TEST_SUFFIX: &str = "_test.go";

/// Directories to process under `root`, depth-first in name order.
///
/// Without recursion only `root` itself is returned. Subdirectories named
/// `vendor` are pruned together with everything below them.
pub fn locate_dirs(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let metadata =
        fs::metadata(root).with_context(|| format!("Failed to read directory: {root:?}"))?;
    if !metadata.is_dir() {
        anyhow::bail!("Not a directory: {root:?}");
    }

    if !recursive {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut dirs = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !(e.file_type().is_dir() && e.file_name() == VENDOR_DIR));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to traverse directory: {root:?}"))?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }

    Ok(dirs)
}

/// Whether a file name is a Go source file fmgen reads.
///
/// Test files and the generated file itself are excluded.
pub fn is_source_file(name: &str) -> bool {
    name.ends_with(GO_EXTENSION) && !name.ends_with(TEST_SUFFIX) && name != GENERATED_FILE_NAME
}

/// Read and parse one Go file.
pub fn parse_file(path: &Path) -> Result<SourceFile> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read source: {path:?}"))?;

    parse_source(&source).with_context(|| format!("Failed to parse {path:?}"))
}

/// Parse every source file directly inside `dir`, sorted by file name.
pub fn read_dir_sources(dir: &Path) -> Result<Vec<(String, SourceFile)>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {dir:?}"))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read directory: {dir:?}"))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_file() && is_source_file(&name) {
            names.push(name);
        }
    }
    names.sort();

    names
        .into_iter()
        .map(|name| {
            let file = parse_file(&dir.join(&name))?;
            Ok((name, file))
        })
        .collect()
}
