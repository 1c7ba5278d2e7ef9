//! ormdto-schema - TypeORM entity parsing and DTO generation
//!
//! This crate rewrites TypeORM entity classes into DTO classes decorated
//! with `class-validator` checks.
//!
//! # Features
//!
//! - **Entry splitting** of an entity file into import, relation and column blocks
//! - **Type and optionality inference** from property declarations
//! - **Default and length extraction** from decorator object literals
//! - **Decorator synthesis** (`@IsString()`, `@MaxLength(n)`, `@IsOptional()`, ...)
//! - **Import rewriting** that drops ORM-only symbols and lists the validators in use
//!
//! # Example
//!
//! ```rust
//! use ormdto_schema::{transform_str, Dialect};
//!
//! # fn example() -> ormdto_schema::Result<()> {
//! let source = r#"import { Column, Entity } from "typeorm";
//!
//! @Entity("Users")
//! export class User {
//!   @Column("varchar", { name: "Name", length: 40 })
//!   name: string;
//! }
//! "#;
//!
//! let dto = transform_str(source, &Dialect::default())?;
//! assert!(dto.contains("@MaxLength(40)"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use std::path::Path;
use thiserror::Error;

pub mod codegen;
pub mod column;
pub mod dialect;
pub mod literal;
pub mod parser;
pub mod types;
pub mod usage;

pub use codegen::DtoGenerator;
pub use column::Column;
pub use dialect::{Dialect, DEFAULT_DIALECT};
pub use literal::LiteralError;
pub use parser::{Entry, EntityParser, ParsedEntity};
pub use types::ColumnType;
pub use usage::ValidatorUsage;

/// Transformation errors
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Unrecognized type token '{token}'")]
    UnknownType { token: String },

    #[error("Malformed decorator object in line '{line}': {source}")]
    MalformedLiteral {
        line: String,
        #[source]
        source: LiteralError,
    },

    #[error("Invalid length in line '{line}': {reason}")]
    InvalidLength { line: String, reason: String },

    #[error("Field entry has no property declaration: {entry:?}")]
    MissingDeclaration { entry: String },

    #[error("Index annotation is not followed by an entity declaration")]
    MissingEntityDeclaration,

    #[error("No column fields found in entity source")]
    NoColumns,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, TransformError>;

/// Read an entity file and return the generated DTO source
pub fn transform_file(path: &Path, dialect: &Dialect) -> Result<String> {
    let parsed = EntityParser::new(dialect).parse_file(path)?;
    render(parsed, dialect)
}

/// Transform entity source text into DTO source text
///
/// Every call owns a fresh [`ValidatorUsage`], so repeated calls never see
/// each other's decorator requirements.
pub fn transform_str(source: &str, dialect: &Dialect) -> Result<String> {
    let parsed = EntityParser::new(dialect).parse_str(source)?;
    render(parsed, dialect)
}

fn render(mut parsed: ParsedEntity, dialect: &Dialect) -> Result<String> {
    let first = parsed.columns.first_mut().ok_or(TransformError::NoColumns)?;
    first.remove_index(dialect)?;

    DtoGenerator::new(dialect)?.generate(&parsed)
}
