//! Entity source parser
//!
//! Splits an entity file into blank-line-delimited entries and turns the
//! column entries into [`Column`]s.

use crate::{Column, Dialect, Result, ValidatorUsage};
use std::fs;
use std::path::Path;

const IMPORT_KEYWORD: &str = "import";

/// Classified entry of an entity file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    /// The import block, kept verbatim
    Imports(&'a str),
    /// Relation declaration, never emitted
    Relation(&'a str),
    /// Column field to parse
    Field(&'a str),
    /// Whitespace-only entry left by consecutive blank lines
    Blank,
}

/// Split source text on blank lines, preserving order
pub fn split_entries(source: &str) -> impl Iterator<Item = &str> {
    source.split("\n\n")
}

/// Classify one entry
pub fn classify<'a>(entry: &'a str, dialect: &Dialect) -> Entry<'a> {
    if entry.starts_with(IMPORT_KEYWORD) {
        Entry::Imports(entry)
    } else if entry.trim().is_empty() {
        Entry::Blank
    } else if dialect.is_relation(entry) {
        Entry::Relation(entry)
    } else {
        Entry::Field(entry)
    }
}

/// Result of parsing one entity file
#[derive(Debug, Clone, Default)]
pub struct ParsedEntity {
    /// Raw import block, empty when the file has none
    pub imports: String,
    /// Column fields in source order
    pub columns: Vec<Column>,
    /// Decorators required by `columns`
    pub usage: ValidatorUsage,
}

/// Entity source parser
pub struct EntityParser<'d> {
    dialect: &'d Dialect,
}

impl<'d> EntityParser<'d> {
    pub fn new(dialect: &'d Dialect) -> Self {
        Self { dialect }
    }

    /// Parse an entity file
    pub fn parse_file(&self, path: &Path) -> Result<ParsedEntity> {
        let source = fs::read_to_string(path)?;
        log::debug!("Read {} bytes from {}", source.len(), path.display());
        self.parse_str(&source)
    }

    /// Parse entity source text
    pub fn parse_str(&self, source: &str) -> Result<ParsedEntity> {
        let source = source.replace("\r\n", "\n");
        let mut parsed = ParsedEntity::default();
        let mut seen_imports = false;

        for (index, entry) in split_entries(&source).enumerate() {
            match classify(entry, self.dialect) {
                Entry::Imports(imports) => {
                    if seen_imports {
                        log::warn!("Entry {} is a second import block; it replaces the first", index);
                    }
                    seen_imports = true;
                    parsed.imports = imports.to_string();
                }
                Entry::Relation(_) => {
                    log::debug!("Skipping relation entry {}", index);
                }
                Entry::Blank => {
                    log::warn!("Skipping blank entry {}", index);
                }
                Entry::Field(field) => {
                    let column = Column::parse(field, self.dialect, &mut parsed.usage)?;
                    parsed.columns.push(column);
                }
            }
        }

        log::debug!("Parsed {} column(s)", parsed.columns.len());
        Ok(parsed)
    }
}
