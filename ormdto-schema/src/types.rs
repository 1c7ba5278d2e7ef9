//! Column type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of a TypeScript property type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Number,
    Date,
    Boolean,
    /// Types that get no validation decorator (e.g. `Buffer`)
    Other,
}

impl ColumnType {
    /// All categories in validator-import order
    pub const ALL: [ColumnType; 5] = [
        ColumnType::String,
        ColumnType::Number,
        ColumnType::Date,
        ColumnType::Boolean,
        ColumnType::Other,
    ];

    /// Name of the `class-validator` decorator checking this type
    pub fn validator(&self) -> Option<&'static str> {
        match self {
            ColumnType::String => Some("IsString"),
            ColumnType::Number => Some("IsNumber"),
            ColumnType::Date => Some("IsDateString"),
            ColumnType::Boolean => Some("IsBoolean"),
            ColumnType::Other => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ColumnType::String)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
            ColumnType::Other => "other",
        };
        f.write_str(name)
    }
}
