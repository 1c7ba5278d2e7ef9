//! Template definitions for DTO generation

use crate::{Result, TransformError};
use handlebars::Handlebars;
use serde::Serialize;

/// Validator import statement
pub const VALIDATOR_IMPORT_TEMPLATE: &str = "import { {{symbols}} } from '{{module}}';";

/// Whole DTO document
pub const DOCUMENT_TEMPLATE: &str =
    "{{imports}}\n{{validator_import}}\n\n{{#each fields}}{{this}}\n\n{{/each}}{{closing}}";

/// Template-based renderer
///
/// HTML escaping is disabled; the output is TypeScript.
pub struct TemplateGenerator {
    handlebars: Handlebars<'static>,
}

impl TemplateGenerator {
    /// Create a generator with the DTO templates registered
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        let mut generator = Self { handlebars };
        generator.register_template("validator_import", VALIDATOR_IMPORT_TEMPLATE)?;
        generator.register_template("document", DOCUMENT_TEMPLATE)?;
        Ok(generator)
    }

    /// Register a template
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| TransformError::Template(format!("Template registration failed: {}", e)))
    }

    /// Render a template with context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| TransformError::Template(format!("Template rendering failed: {}", e)))
    }
}
