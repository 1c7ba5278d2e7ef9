//! DTO code generation
//!
//! Turns a [`ParsedEntity`] into the final DTO source:
//! - the filtered original import block
//! - a `class-validator` import listing the decorators in use
//! - every column re-emitted with its validation decorators
//! - the closing brace of the class

use crate::{Dialect, ParsedEntity, Result, ValidatorUsage};
use serde::Serialize;

pub mod field;
pub mod imports;
pub mod templates;

pub use field::render_column;
pub use imports::filter_imports;
pub use templates::TemplateGenerator;

/// Context of the document template
#[derive(Debug, Serialize)]
struct DocumentContext<'a> {
    imports: String,
    validator_import: String,
    fields: Vec<String>,
    closing: &'a str,
}

#[derive(Debug, Serialize)]
struct ValidatorImportContext<'a> {
    symbols: String,
    module: &'a str,
}

/// DTO generator
pub struct DtoGenerator<'d> {
    dialect: &'d Dialect,
    templates: TemplateGenerator,
}

impl<'d> DtoGenerator<'d> {
    pub fn new(dialect: &'d Dialect) -> Result<Self> {
        Ok(Self {
            dialect,
            templates: TemplateGenerator::new()?,
        })
    }

    /// Build the `import { ... } from 'class-validator';` line
    pub fn validator_import(&self, usage: &ValidatorUsage) -> Result<String> {
        let context = ValidatorImportContext {
            symbols: usage.symbols().join(", "),
            module: &self.dialect.validator_module,
        };
        self.templates.render("validator_import", &context)
    }

    /// Render the complete DTO document
    pub fn generate(&self, parsed: &ParsedEntity) -> Result<String> {
        let context = DocumentContext {
            imports: filter_imports(&parsed.imports, self.dialect),
            validator_import: self.validator_import(&parsed.usage)?,
            fields: parsed.columns.iter().map(render_column).collect(),
            closing: "}",
        };

        log::debug!("Rendering {} field(s)", context.fields.len());
        self.templates.render("document", &context)
    }
}
