#![allow(non_snake_case)]

use super::*;
use fmgen_core::GENERATED_FILE_NAME;
use std::fs;
use std::path::Path;

const SIMPLE: &str = r#"package testdata

import "time"

// Sample simple struct fmgen:omit
type Sample struct {
	ID          int64 `fmgen:"-"`
	Name        string
	Age         int64 `fmgen:"optional"`
	LastUpdated time.Time
}

// Simple struct with just a name
type Simple struct {
	Name string
}
"#;

fn options(target: Target, allow_list: Option<&str>) -> GenerateOptions {
    GenerateOptions {
        target,
        allow_list: allow_list.map(AllowList::parse),
        extract: ExtractOptions::default(),
    }
}

fn dir_target(root: &Path) -> Target {
    Target::Dir {
        root: root.to_path_buf(),
        recursive: true,
    }
}

#[test]
fn run___file_mode___writes_generated_file_next_to_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("simple.go");
    fs::write(&source, SIMPLE).unwrap();

    let summary = run(&options(Target::File(source), None)).unwrap();

    let generated = dir.path().join(GENERATED_FILE_NAME);
    assert_eq!(summary.written, vec![generated.clone()]);
    assert_eq!(summary.structs_found, 2);
    assert_eq!(summary.structs_generated, 1);

    let content = fs::read_to_string(generated).unwrap();
    assert!(content.contains("type SimpleBuilder struct"));
    assert!(!content.contains("SampleBuilder"));
}

#[test]
fn run___aliased_import___keeps_alias_in_generated_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("event.go");
    fs::write(
        &source,
        "package events\n\nimport t \"time\"\n\ntype Event struct {\n\tAt t.Time\n}\n",
    )
    .unwrap();

    let summary = run(&options(Target::File(source), None)).unwrap();

    let content = fs::read_to_string(&summary.written[0]).unwrap();
    assert!(content.contains("import (\n\tt \"time\"\n)\n"));
}

#[test]
fn run___file_without_structs___aborts() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("empty.go");
    fs::write(&source, "package empty\n\ntype ID int64\n").unwrap();

    let err = run(&options(Target::File(source), None)).unwrap_err();

    assert!(err.to_string().starts_with("no structs found in file"));
    assert!(!dir.path().join(GENERATED_FILE_NAME).exists());
}

#[test]
fn run___all_structs_excluded___writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("simple.go");
    fs::write(&source, SIMPLE).unwrap();

    let summary = run(&options(Target::File(source), Some("Other"))).unwrap();

    assert!(summary.written.is_empty());
    assert!(!dir.path().join(GENERATED_FILE_NAME).exists());
}

#[test]
fn run___dir_mode___writes_per_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("simple.go"), SIMPLE).unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(
        dir.path().join("nested/user.go"),
        "package nested\n\ntype User struct {\n\tName string\n}\n",
    )
    .unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();

    let summary = run(&options(dir_target(dir.path()), None)).unwrap();

    assert_eq!(
        summary.written,
        vec![
            dir.path().join(GENERATED_FILE_NAME),
            dir.path().join("nested").join(GENERATED_FILE_NAME),
        ]
    );
    assert_eq!(summary.structs_found, 3);
    assert_eq!(summary.structs_generated, 2);
}

#[test]
fn run___second_package_in_directory___is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.go"), "package alpha\n\ntype A struct{}\n").unwrap();
    fs::write(dir.path().join("b.go"), "package beta\n\ntype B struct{}\n").unwrap();

    let summary = run(&options(dir_target(dir.path()), None)).unwrap();

    assert_eq!(summary.written.len(), 1);
    let content = fs::read_to_string(&summary.written[0]).unwrap();
    assert!(content.contains("package alpha"));
}

#[test]
fn run___unsupported_field___aborts_naming_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("bad.go");
    fs::write(
        &source,
        "package bad\n\ntype Bad struct {\n\tHandler func()\n}\n",
    )
    .unwrap();

    let err = run(&options(Target::File(source), None)).unwrap_err();

    let chain = format!("{err:#}");
    assert!(chain.contains("bad.go"));
    assert!(chain.contains("unsupported type for field [Handler] in struct [Bad]"));
}

#[test]
fn run___regenerating___ignores_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("simple.go"), SIMPLE).unwrap();

    let first = run(&options(dir_target(dir.path()), None)).unwrap();
    let second = run(&options(dir_target(dir.path()), None)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn inspect___file___renders_json_models() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("simple.go");
    fs::write(&source, SIMPLE).unwrap();

    let json = inspect(&options(Target::File(source), None)).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["package"], "testdata");
    assert_eq!(value[0]["structs"][0]["name"], "Sample");
    assert_eq!(value[0]["structs"][0]["fields"][0]["is_skipped"], true);
    assert_eq!(value[0]["imports"][0], "\"time\"");
    assert!(!dir.path().join(GENERATED_FILE_NAME).exists());
}
