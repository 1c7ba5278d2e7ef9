//! Import rewriting

use crate::Dialect;

/// Drop relative imports and ORM-only symbols from an import block
///
/// Removes every line mentioning a relative path (`./`) and every line that
/// is just a relation or index symbol inside a multi-line import list.
pub fn filter_imports(imports: &str, dialect: &Dialect) -> String {
    imports
        .split('\n')
        .filter(|line| {
            let symbol = line.trim_matches(|c: char| c == ' ' || c == ',' || c == '\n');
            !line.contains("./") && !dialect.is_orm_only_symbol(symbol)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
