//! Integration tests for the generate and inspect commands.
//!
//! Builds small Go trees in temporary directories and runs both the library
//! drivers and the `fmgen` binary against them.

#![allow(non_snake_case)]

use fmgen_cli::{GenerateOptions, Overrides, Settings, Target, generate};
use fmgen_core::{ExtractOptions, GENERATED_FILE_NAME};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const SAMPLE: &str = r#"package models

import (
	"net/url"
	"time"
)

// Sample simple struct
type Sample struct {
	ID          int64 `fmgen:"-"`
	Name        string
	Age         int64 `fmgen:"optional"`
	LastUpdated time.Time
}

// Legacy is kept by hand fmgen:skip
type Legacy struct {
	Link url.URL
}
"#;

/// Helper to lay out a Go module tree.
fn create_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    dir
}

fn dir_options(root: &Path, settings: &Settings) -> GenerateOptions {
    GenerateOptions {
        target: Target::Dir {
            root: root.to_path_buf(),
            recursive: settings.generate.recursive,
        },
        allow_list: settings.allow_list(),
        extract: ExtractOptions::default(),
    }
}

fn fmgen(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_fmgen"))
        .args(args)
        .output()
        .unwrap()
}

// =============================================================================
// Library driver tests
// =============================================================================

mod driver {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn generate___sample_tree___renders_expected_file() {
        let dir = create_tree(&[("models/sample.go", SAMPLE)]);

        let summary = generate::run(&dir_options(dir.path(), &Settings::default())).unwrap();

        assert_eq!(summary.written.len(), 1);
        let content = fs::read_to_string(dir.path().join("models").join(GENERATED_FILE_NAME))
            .unwrap();
        let expected = "\
// Code generated by fmgen. DO NOT EDIT.

package models

import (
\t\"time\"
)

// SampleBuilder builds Sample values.
type SampleBuilder struct {
\tmodel Sample
}

// NewSampleBuilder returns a SampleBuilder with the required fields set.
func NewSampleBuilder(name string, lastUpdated time.Time) *SampleBuilder {
\tb := &SampleBuilder{}
\tb.model.Name = name
\tb.model.LastUpdated = lastUpdated
\treturn b
}

// WithAge sets Age.
func (b *SampleBuilder) WithAge(age int64) *SampleBuilder {
\tb.model.Age = age
\treturn b
}

// Build returns the built Sample.
func (b *SampleBuilder) Build() Sample {
\treturn b.model
}
";
        assert_eq!(content, expected);
    }

    #[test]
    fn generate___vendor_and_tests___are_ignored() {
        let dir = create_tree(&[
            ("main.go", "package main\n\ntype App struct {\n\tName string\n}\n"),
            ("main_test.go", "package main\n\ntype Fixture struct {\n\tName string\n}\n"),
            ("vendor/dep/dep.go", "package dep\n\ntype Dep struct {\n\tName string\n}\n"),
        ]);

        let summary = generate::run(&dir_options(dir.path(), &Settings::default())).unwrap();

        assert_eq!(summary.written, vec![dir.path().join(GENERATED_FILE_NAME)]);
        assert_eq!(summary.structs_found, 1);
        assert!(!dir.path().join("vendor/dep").join(GENERATED_FILE_NAME).exists());
    }

    #[test]
    fn generate___no_recursive_setting___stays_in_root() {
        let dir = create_tree(&[
            ("root.go", "package root\n\ntype Root struct{}\n"),
            ("sub/sub.go", "package sub\n\ntype Sub struct{}\n"),
        ]);
        let settings = Settings::default()
            .with_overrides(&Overrides {
                no_recursive: true,
                ..Overrides::default()
            })
            .unwrap();

        let summary = generate::run(&dir_options(dir.path(), &settings)).unwrap();

        assert_eq!(summary.written, vec![dir.path().join(GENERATED_FILE_NAME)]);
    }

    #[test]
    fn generate___allow_list_from_settings_file___restricts_output() {
        let dir = create_tree(&[
            (
                "fmgen.toml",
                "[generate]\nstructs = [\"Sample\", \"Legacy\"]\n",
            ),
            ("sample.go", SAMPLE),
            ("extra.go", "package models\n\ntype Extra struct {\n\tName string\n}\n"),
        ]);
        let settings = Settings::load(None, dir.path()).unwrap();

        let summary = generate::run(&dir_options(dir.path(), &settings)).unwrap();

        assert_eq!(summary.structs_found, 3);
        assert_eq!(summary.structs_generated, 1);
        let content = fs::read_to_string(&summary.written[0]).unwrap();
        assert!(content.contains("SampleBuilder"));
        assert!(!content.contains("ExtraBuilder"));
        assert!(!content.contains("LegacyBuilder"));
    }

    #[test]
    fn generate___syntax_error___aborts_whole_run() {
        let dir = create_tree(&[
            ("a/good.go", "package a\n\ntype Good struct{}\n"),
            ("b/bad.go", "package b\n\ntype Bad struct {\n"),
        ]);

        let err = generate::run(&dir_options(dir.path(), &Settings::default())).unwrap_err();

        assert!(format!("{err:#}").contains("bad.go"));
    }
}

// =============================================================================
// Binary tests
// =============================================================================

mod binary {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fmgen_generate___file_flag___writes_and_reports() {
        let dir = create_tree(&[("sample.go", SAMPLE)]);
        let file = dir.path().join("sample.go");

        let output = fmgen(&["generate", "--file", file.to_str().unwrap()]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Generated builders for 1 of 2 structs in 1 file(s)"));
        assert!(dir.path().join(GENERATED_FILE_NAME).exists());
    }

    #[test]
    fn fmgen_generate___file_without_structs___exits_non_zero() {
        let dir = create_tree(&[("ids.go", "package ids\n\ntype ID int64\n")]);
        let file = dir.path().join("ids.go");

        let output = fmgen(&["generate", "--file", file.to_str().unwrap()]);

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("no structs found in file"));
    }

    #[test]
    fn fmgen_generate___structs_flag___overrides_settings() {
        let dir = create_tree(&[
            ("fmgen.toml", "[generate]\nstructs = [\"Other\"]\n"),
            ("sample.go", SAMPLE),
        ]);

        let output = fmgen(&[
            "generate",
            "--dir",
            dir.path().to_str().unwrap(),
            "--structs",
            "Sample",
        ]);

        assert!(output.status.success());
        let content = fs::read_to_string(dir.path().join(GENERATED_FILE_NAME)).unwrap();
        assert!(content.contains("SampleBuilder"));
    }

    #[test]
    fn fmgen_inspect___dir___prints_json_and_writes_nothing() {
        let dir = create_tree(&[("sample.go", SAMPLE)]);

        let output = fmgen(&["inspect", "--dir", dir.path().to_str().unwrap()]);

        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value[0]["structs"][1]["name"], "Legacy");
        assert_eq!(
            value[0]["structs"][1]["comment"]["text"],
            "Legacy is kept by hand fmgen:skip\n"
        );
        assert!(!dir.path().join(GENERATED_FILE_NAME).exists());
    }

    #[test]
    fn fmgen_generate___invalid_settings___exits_non_zero() {
        let dir = create_tree(&[
            ("fmgen.toml", "[generate]\nlog_level = \"chatty\"\n"),
            ("sample.go", SAMPLE),
        ]);

        let output = fmgen(&["generate", "--dir", dir.path().to_str().unwrap()]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level"));
    }
}
