//! Generate and inspect command implementation

use crate::codegen::{render_file, write_generated};
use crate::source::{locate_dirs, parse_file, read_dir_sources};
use anyhow::{Context, Result};
use fmgen_core::{AllowList, ExtractOptions, PackageModel, extract_file, extract_package, policy};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single Go file
    File(PathBuf),
    /// A directory, optionally with its subdirectories
    Dir { root: PathBuf, recursive: bool },
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub target: Target,
    pub allow_list: Option<AllowList>,
    pub extract: ExtractOptions,
}

/// Outcome of a generate run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Generated files, in the order they were written
    pub written: Vec<PathBuf>,
    pub structs_found: usize,
    pub structs_generated: usize,
}

/// Parse and extract every package the target covers.
pub fn collect(target: &Target, options: &ExtractOptions) -> Result<Vec<PackageModel>> {
    match target {
        Target::File(path) => {
            let file = parse_file(path)?;
            let model = extract_file(path, &file, options)
                .with_context(|| format!("Failed to extract structs from {path:?}"))?;
            Ok(vec![PackageModel::from(model)])
        }
        Target::Dir { root, recursive } => {
            let mut packages = Vec::new();
            for dir in locate_dirs(root, *recursive)? {
                let sources = read_dir_sources(&dir)?;
                if sources.is_empty() {
                    continue;
                }
                let models = extract_package(&dir, &sources, options)
                    .with_context(|| format!("Failed to extract structs from {dir:?}"))?;
                packages.extend(models);
            }
            Ok(packages)
        }
    }
}

/// Run the generate command
pub fn run(options: &GenerateOptions) -> Result<Summary> {
    let packages = collect(&options.target, &options.extract)?;

    if let Target::File(path) = &options.target
        && packages.iter().all(|p| p.structs.is_empty())
    {
        anyhow::bail!("no structs found in file {}, aborting", path.display());
    }

    let mut summary = Summary::default();
    let mut written_dirs = HashSet::new();

    for package in &packages {
        summary.structs_found += package.structs.len();

        let selected = policy::filter(&package.structs, options.allow_list.as_ref());
        if selected.is_empty() {
            debug!(dir = %package.dir.display(), package = %package.package, "no structs selected");
            continue;
        }

        if !written_dirs.insert(package.dir.clone()) {
            warn!(
                dir = %package.dir.display(),
                package = %package.package,
                "directory already has a generated file from another package; skipping"
            );
            continue;
        }

        let content = render_file(&package.package, &package.imports, &selected);
        let path = write_generated(&package.dir, &content)?;
        info!(path = %path.display(), structs = selected.len(), "wrote generated file");

        summary.structs_generated += selected.len();
        summary.written.push(path);
    }

    Ok(summary)
}

/// Run the inspect command, returning the models as pretty JSON.
pub fn inspect(options: &GenerateOptions) -> Result<String> {
    let packages = collect(&options.target, &options.extract)?;
    serde_json::to_string_pretty(&packages).context("Failed to serialize struct models")
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
