//! Field rendering
//!
//! Re-emits a column's source with validation decorators inserted directly
//! above the property declaration, in the order
//! `@IsOptional()`, type validator, `@MaxLength(n)`.

use crate::column::remove_tail;
use crate::usage::{IS_OPTIONAL, MAX_LENGTH};
use crate::Column;

const DECORATOR_INDENT: &str = "  ";

/// Render a column with its validation decorators
pub fn render_column(column: &Column) -> String {
    let mut lines: Vec<String> = column.lines().to_vec();
    remove_tail(&mut lines);

    let Some(mut declaration) = lines.pop() else {
        return String::new();
    };

    if column.is_optional() {
        declaration = add_optional(&declaration);
        lines.push(decorator(IS_OPTIONAL, ""));
    }

    if let Some(default) = column.default_value() {
        declaration = add_default(&declaration, default);
    }

    if let Some(validator) = column.column_type().validator() {
        lines.push(decorator(validator, ""));
    }

    if let Some(length) = column.max_length().filter(|length| *length > 0) {
        lines.push(decorator(MAX_LENGTH, &length.to_string()));
    }

    lines.push(declaration);
    lines.join("\n")
}

fn decorator(name: &str, argument: &str) -> String {
    format!("{}@{}({})", DECORATOR_INDENT, name, argument)
}

/// Turn the first `:` into `?:`
pub fn add_optional(line: &str) -> String {
    line.replacen(':', "?:", 1)
}

/// Append ` = <default>` before the terminating semicolon
pub fn add_default(line: &str, default: &str) -> String {
    format!("{} = {};", line.trim_matches(';'), default)
}
