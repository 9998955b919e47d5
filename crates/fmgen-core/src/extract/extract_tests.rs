#![allow(non_snake_case)]

use super::*;
use crate::syntax::parse_source;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

const SIMPLE: &str = r#"package testdata

import "time"

// Sample simple struct
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

const POINTER: &str = r#"package testdata

import "time"

// Pointer struct to help test pointers
type Pointer struct {
	ID          int64 `fmgen:"-"`
	Name        string
	Age         int64 `fmgen:"optional"`
	PtrS        *string
	PtrOpt      *string `fmgen:"optional"`
	PtrI        *int
	LastUpdated *time.Time
}
"#;

const INTERFACE: &str = r#"package testdata

type iface interface {
	Do() error
}

type impl struct {
	i iface
}
"#;

fn descriptor(name: &str, base_type: &str) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        base_type: base_type.to_string(),
        is_pointer: false,
        is_array: false,
        is_optional: false,
        is_skipped: false,
    }
}

fn structs_of(source: &str) -> Vec<StructModel> {
    let file = parse_source(source).unwrap();
    extract_structs(&file, &ExtractOptions::default()).unwrap()
}

#[test]
fn extract_structs___sample_struct___builds_fields_in_order() {
    let structs = structs_of(SIMPLE);

    assert_eq!(structs.len(), 2);
    let expected = StructModel {
        name: "Sample".to_string(),
        line: 6,
        fields: vec![
            FieldDescriptor {
                is_skipped: true,
                ..descriptor("ID", "int64")
            },
            descriptor("Name", "string"),
            FieldDescriptor {
                is_optional: true,
                ..descriptor("Age", "int64")
            },
            descriptor("LastUpdated", "time.Time"),
        ],
        comment: Some(Comment {
            line: 5,
            text: "Sample simple struct\n".to_string(),
        }),
    };
    assert_eq!(structs[0], expected);
    assert_eq!(structs[1].name, "Simple");
    assert_eq!(structs[1].line, 14);
}

#[test]
fn extract_structs___pointer_fields___set_pointer_flag() {
    let structs = structs_of(POINTER);

    assert_eq!(structs.len(), 1);
    let pointers: Vec<(&str, bool, bool)> = structs[0]
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.is_pointer, f.is_optional))
        .collect();
    assert_eq!(
        pointers,
        vec![
            ("ID", false, false),
            ("Name", false, false),
            ("Age", false, true),
            ("PtrS", true, false),
            ("PtrOpt", true, true),
            ("PtrI", true, false),
            ("LastUpdated", true, false),
        ]
    );
    assert_eq!(structs[0].fields[6].base_type, "time.Time");
}

#[test]
fn extract_structs___interface_declaration___is_skipped() {
    let structs = structs_of(INTERFACE);

    assert_eq!(
        structs,
        vec![StructModel {
            name: "impl".to_string(),
            line: 7,
            fields: vec![descriptor("i", "iface")],
            comment: None,
        }]
    );
}

#[test]
fn extract_structs___alias_and_generic___are_skipped() {
    let structs = structs_of(
        "package p\n\ntype A = struct{ X int }\n\ntype List[T any] struct {\n\tItems []T\n}\n\ntype Id int64\n",
    );

    assert!(structs.is_empty());
}

#[test]
fn extract_structs___comment_two_lines_above___is_not_attached() {
    let structs = structs_of("package p\n\n// Detached\n\ntype S struct {\n\tA int\n}\n");

    assert_eq!(structs[0].comment, None);
}

#[test]
fn extract_structs___multi_line_comment___measured_from_first_line() {
    let structs = structs_of("package p\n\n// First\n// Second\ntype S struct {\n\tA int\n}\n");

    assert_eq!(structs[0].comment, None);
}

#[test]
fn extract_structs___grouped_declaration___uses_spec_line() {
    let structs = structs_of(
        "package p\n\ntype (\n\t// First doc\n\tFirst struct {\n\t\tA int\n\t}\n\tSecond struct{ B string }\n)\n",
    );

    assert_eq!(structs.len(), 2);
    assert_eq!(structs[0].line, 5);
    assert_eq!(
        structs[0].comment.as_ref().map(|c| c.text.as_str()),
        Some("First doc\n")
    );
    assert_eq!(structs[1].line, 8);
}

#[test]
fn extract_structs___multi_name_field___expands_per_name() {
    let structs = structs_of("package p\n\ntype Point struct {\n\tX, Y *float64 `fmgen:\"optional\"`\n}\n");

    let fields = &structs[0].fields;
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "X");
    assert_eq!(fields[1].name, "Y");
    assert!(fields.iter().all(|f| f.is_pointer && f.is_optional));
}

#[test]
fn extract_structs___embedded_fields___use_type_name() {
    let structs =
        structs_of("package p\n\nimport \"time\"\n\ntype S struct {\n\ttime.Time\n\t*Base\n}\n");

    let names: Vec<&str> = structs[0].fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Time", "Base"]);
    assert_eq!(structs[0].fields[0].base_type, "time.Time");
    assert!(structs[0].fields[1].is_pointer);
}

#[test]
fn extract_structs___unsupported_field___aborts_with_location() {
    let file =
        parse_source("package p\n\ntype S struct {\n\tName string\n\tTags map[string]string\n}\n")
            .unwrap();

    let result = extract_structs(&file, &ExtractOptions::default());

    assert_eq!(
        result,
        Err(ExtractError::UnsupportedFieldType {
            structure: "S".to_string(),
            field: "Tags".to_string(),
            line: 5,
            shape: "map type".to_string(),
        })
    );
}

#[test]
fn extract_structs___repeated_runs___are_identical() {
    let file = parse_source(POINTER).unwrap();

    let first = extract_structs(&file, &ExtractOptions::default()).unwrap();
    let second = extract_structs(&file, &ExtractOptions::verbose()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn extract_imports___grouped_imports___keep_aliases() {
    let file = parse_source(
        "package p\n\nimport (\n\t\"net/url\"\n\tt \"time\"\n)\n\ntype S struct{ A url.URL }\n",
    )
    .unwrap();

    let imports = extract_imports(&file, &ExtractOptions::default());

    assert_eq!(imports, vec!["\"net/url\"", "t \"time\""]);
}

#[test]
fn find_comment___adjacent_line___matches() {
    let comments = vec![Comment {
        line: 9,
        text: String::new(),
    }];

    assert_eq!(find_comment(10, &comments), Some(&comments[0]));
}

#[test]
fn find_comment___far_away_line___no_match() {
    let comments = vec![Comment {
        line: 1000,
        text: String::new(),
    }];

    assert_eq!(find_comment(10, &comments), None);
}

#[test]
fn find_comment___several_candidates___first_wins() {
    let comments = vec![
        Comment {
            line: 4,
            text: "a".to_string(),
        },
        Comment {
            line: 4,
            text: "b".to_string(),
        },
    ];

    assert_eq!(find_comment(5, &comments).map(|c| c.text.as_str()), Some("a"));
}

#[test]
fn extract_file___path___splits_dir_and_name() {
    let file = parse_source(SIMPLE).unwrap();

    let model = extract_file(
        Path::new("pkg/models/simple.go"),
        &file,
        &ExtractOptions::default(),
    )
    .unwrap();

    assert_eq!(model.dir, PathBuf::from("pkg/models"));
    assert_eq!(model.file_name, "simple.go");
    assert_eq!(model.package, "testdata");
    assert_eq!(model.structs.len(), 2);
    assert_eq!(model.imports, vec!["\"time\""]);
}

#[test]
fn extract_package___two_files___concatenate_in_given_order() {
    let files = vec![
        ("pointer.go".to_string(), parse_source(POINTER).unwrap()),
        ("simple.go".to_string(), parse_source(SIMPLE).unwrap()),
    ];

    let packages = extract_package(Path::new("testdata"), &files, &ExtractOptions::default())
        .unwrap();

    assert_eq!(packages.len(), 1);
    let names: Vec<&str> = packages[0].structs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Pointer", "Sample", "Simple"]);
    assert_eq!(packages[0].imports, vec!["\"time\"", "\"time\""]);
    assert_eq!(packages[0].dir, PathBuf::from("testdata"));
}

#[test]
fn extract_package___different_packages___grouped_first_seen() {
    let files = vec![
        ("a.go".to_string(), parse_source("package beta\ntype B struct{}\n").unwrap()),
        ("b.go".to_string(), parse_source("package alpha\ntype A struct{}\n").unwrap()),
        ("c.go".to_string(), parse_source("package beta\ntype C struct{}\n").unwrap()),
    ];

    let packages = extract_package(Path::new("."), &files, &ExtractOptions::default()).unwrap();

    let summary: Vec<(&str, usize)> = packages
        .iter()
        .map(|p| (p.package.as_str(), p.structs.len()))
        .collect();
    assert_eq!(summary, vec![("beta", 2), ("alpha", 1)]);
}
