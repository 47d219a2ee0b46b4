// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fs;

use tempfile::TempDir;
use vmstub::{Marker, Schema, SchemaError, TypeRef};

#[test]
fn test_from_file_picks_format_by_extension() {
    let dir = TempDir::new().unwrap();

    let yaml = dir.path().join("model.yaml");
    fs::write(
        &yaml,
        "types:\n  - name: Point\n    members:\n      - name: x\n        type: f64\n        markers: [export_to_view_model]\n",
    )
    .unwrap();

    let json = dir.path().join("model.JSON");
    fs::write(
        &json,
        r#"{"types":[{"name":"Point","members":[{"name":"x","type":"f64","markers":["export_to_view_model"]}]}]}"#,
    )
    .unwrap();

    let from_yaml = Schema::from_file(&yaml).unwrap();
    let from_json = Schema::from_file(&json).unwrap();
    assert_eq!(from_yaml.get("Point"), from_json.get("Point"));

    let x = &from_json.get("Point").unwrap().members[0];
    assert_eq!(x.ty, TypeRef::named("f64"));
    assert!(x.has_marker(Marker::ExportToViewModel));
}

#[test]
fn test_from_file_missing_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Schema::from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, SchemaError::Io(_)));
}

#[test]
fn test_from_file_rejects_malformed_type_ref() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.yaml");
    fs::write(
        &path,
        "types:\n  - name: Bag\n    members:\n      - name: items\n        type: \"list<string\"\n",
    )
    .unwrap();

    assert!(matches!(Schema::from_file(&path), Err(SchemaError::Yaml(_))));
}
