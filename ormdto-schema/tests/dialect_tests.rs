//! Tests for loading dialect files

use ormdto_schema::{transform_str, ColumnType, Dialect, TransformError, DEFAULT_DIALECT};
use std::fs;
use tempfile::TempDir;

const ENTITY: &str = r#"import { Column, Entity } from "typeorm";

@Entity("Rates", { schema: "dbo" })
export class Rate {
  @Column("datetime", {
    name: "ValidFrom",
    default: () => "[Helpers].[Now]()",
  })
  validFrom: Date;
}
"#;

#[test]
fn test_default_dialect_matches_default() {
    assert_eq!(*DEFAULT_DIALECT, Dialect::default());
}

#[test]
fn test_load_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dialect.toml");
    fs::write(
        &path,
        r#"
computed_default_marker = "Helpers"
validator_module = "class-validator"

[type_mapping]
Date = "date"
"#,
    )
    .unwrap();

    let dialect = Dialect::from_file(&path).unwrap();
    assert_eq!(dialect.computed_default_marker, "Helpers");
    assert_eq!(dialect.type_mapping.len(), 1);

    let dto = transform_str(ENTITY, &dialect).unwrap();
    assert!(dto.contains("  @IsDateString()\n  validFrom: Date;"));
}

#[test]
fn test_load_yaml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dialect.yml");
    fs::write(
        &path,
        "relation_keywords:\n  - ManyToOne\ntype_mapping:\n  Date: date\n  bigint: number\n",
    )
    .unwrap();

    let dialect = Dialect::from_file(&path).unwrap();
    assert_eq!(dialect.relation_keywords, vec!["ManyToOne".to_string()]);
    assert_eq!(dialect.column_type("bigint").unwrap(), ColumnType::Number);

    // The default marker is XUtils, so the Helpers default is kept.
    let dto = transform_str(ENTITY, &dialect).unwrap();
    assert!(dto.contains("validFrom: Date = [Helpers].[Now];"));
}

#[test]
fn test_invalid_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dialect.toml");
    fs::write(&path, "type_mapping = [1, 2").unwrap();

    assert!(matches!(Dialect::from_file(&path), Err(TransformError::Toml(_))));
}

#[test]
fn test_unknown_category_rejected() {
    let result = Dialect::from_toml("[type_mapping]\nstring = \"text\"\n");
    assert!(matches!(result, Err(TransformError::Toml(_))));
}

#[test]
fn test_missing_dialect_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = Dialect::from_file(temp_dir.path().join("missing.toml"));
    assert!(matches!(result, Err(TransformError::Config(_))));
}
