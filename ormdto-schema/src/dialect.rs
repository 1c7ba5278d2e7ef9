//! Dialect configuration
//!
//! Collects the markers and tables that describe the supported TypeORM
//! decorator dialect. Every field can be overridden from a TOML or YAML file.

use crate::{ColumnType, Result, TransformError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Built-in dialect
pub static DEFAULT_DIALECT: Lazy<Dialect> = Lazy::new(Dialect::default);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Decorators marking an entry as a relation (never emitted)
    pub relation_keywords: Vec<String>,

    /// Prefixes of decorator lines that may carry a `length` object
    pub column_indicators: Vec<String>,

    /// Marker of the index annotation preceding the entity declaration
    pub index_marker: String,

    /// Marker of the entity declaration line
    pub entity_marker: String,

    /// Defaults mentioning this marker are computed at runtime and dropped
    pub computed_default_marker: String,

    /// Module the validator decorators are imported from
    pub validator_module: String,

    /// TypeScript type token to column category
    pub type_mapping: BTreeMap<String, ColumnType>,
}

impl Default for Dialect {
    fn default() -> Self {
        let type_mapping = [
            ("string", ColumnType::String),
            ("number", ColumnType::Number),
            ("Date", ColumnType::Date),
            ("boolean", ColumnType::Boolean),
            ("Buffer", ColumnType::Other),
        ]
        .into_iter()
        .map(|(token, ty)| (token.to_string(), ty))
        .collect();

        Self {
            relation_keywords: ["ManyToOne", "OneToMany", "OneToOne", "ManyToMany", "JoinColumn"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            column_indicators: vec!["@Column".to_string(), "@Primary".to_string()],
            index_marker: "@Index".to_string(),
            entity_marker: "@Entity".to_string(),
            computed_default_marker: "XUtils".to_string(),
            validator_module: "class-validator".to_string(),
            type_mapping,
        }
    }
}

impl Dialect {
    /// Load a dialect from a TOML file, or YAML for `.yaml`/`.yml` paths
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let content = fs::read_to_string(path_ref).map_err(|e| {
            TransformError::Config(format!(
                "Failed to read dialect file '{}': {}",
                path_ref.display(),
                e
            ))
        })?;

        let is_yaml = path_ref
            .extension()
            .map_or(false, |ext| ext == "yaml" || ext == "yml");

        let dialect = if is_yaml {
            Self::from_yaml(&content)?
        } else {
            Self::from_toml(&content)?
        };

        log::debug!("Loaded dialect from: {}", path_ref.display());
        Ok(dialect)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let dialect: Dialect = toml::from_str(content)?;
        dialect.validated()
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let dialect: Dialect = serde_yaml::from_str(content)?;
        dialect.validated()
    }

    fn validated(self) -> Result<Self> {
        if self.entity_marker.is_empty() {
            return Err(TransformError::Config("entity_marker must not be empty".to_string()));
        }
        if self.index_marker.is_empty() {
            return Err(TransformError::Config("index_marker must not be empty".to_string()));
        }
        Ok(self)
    }

    /// Look up the category of a type token
    pub fn column_type(&self, token: &str) -> Result<ColumnType> {
        self.type_mapping
            .get(token)
            .copied()
            .ok_or_else(|| TransformError::UnknownType {
                token: token.to_string(),
            })
    }

    /// Whether an entry declares a relation
    pub fn is_relation(&self, entry: &str) -> bool {
        self.relation_keywords.iter().any(|keyword| entry.contains(keyword.as_str()))
    }

    pub fn is_column_indicator(&self, line: &str) -> bool {
        self.column_indicators
            .iter()
            .any(|indicator| line.starts_with(indicator.as_str()))
    }

    /// Import symbols that only make sense on the ORM entity
    pub fn is_orm_only_symbol(&self, symbol: &str) -> bool {
        symbol == self.index_marker.trim_start_matches('@')
            || self.relation_keywords.iter().any(|keyword| keyword == symbol)
    }
}
