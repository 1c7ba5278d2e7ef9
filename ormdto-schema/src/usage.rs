//! Validator usage accumulator
//!
//! Records which `class-validator` decorators the columns of one file need,
//! so the generated import statement lists exactly those.

use crate::ColumnType;

pub const MAX_LENGTH: &str = "MaxLength";
pub const IS_OPTIONAL: &str = "IsOptional";

/// Decorators required by the columns parsed so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorUsage {
    string: bool,
    number: bool,
    date: bool,
    boolean: bool,
    max_length: bool,
    optional: bool,
}

impl ValidatorUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the type validator (and `IsOptional`) as used
    pub fn register(&mut self, column_type: ColumnType, optional: bool) {
        match column_type {
            ColumnType::String => self.string = true,
            ColumnType::Number => self.number = true,
            ColumnType::Date => self.date = true,
            ColumnType::Boolean => self.boolean = true,
            ColumnType::Other => {}
        }
        if optional {
            self.optional = true;
        }
    }

    pub fn register_max_length(&mut self) {
        self.max_length = true;
    }

    pub fn is_used(&self, column_type: ColumnType) -> bool {
        match column_type {
            ColumnType::String => self.string,
            ColumnType::Number => self.number,
            ColumnType::Date => self.date,
            ColumnType::Boolean => self.boolean,
            ColumnType::Other => false,
        }
    }

    pub fn is_optional_used(&self) -> bool {
        self.optional
    }

    pub fn is_max_length_used(&self) -> bool {
        self.max_length
    }

    /// Used decorator symbols in import order
    ///
    /// `MaxLength` follows `IsString`; `IsOptional` always comes last.
    pub fn symbols(&self) -> Vec<&'static str> {
        let mut symbols = Vec::new();

        for column_type in ColumnType::ALL {
            if !self.is_used(column_type) {
                continue;
            }
            if let Some(validator) = column_type.validator() {
                symbols.push(validator);
            }
            if column_type.is_string() && self.max_length {
                symbols.push(MAX_LENGTH);
            }
        }

        if self.optional {
            symbols.push(IS_OPTIONAL);
        }

        symbols
    }
}
