//! Column model
//!
//! A column is one blank-line-delimited field entry: its decorator lines
//! followed by the property declaration, e.g.
//!
//! ```text
//!   @Column("varchar", { name: "FolderLocation", nullable: true, length: 200 })
//!   folderLocation: string | null;
//! ```
//!
//! All line-splitting logic for field entries lives here; the code generator
//! only sees the structured [`Column`].

use crate::literal::decode_object;
use crate::{ColumnType, Dialect, Result, TransformError, ValidatorUsage};

const DEFAULT_CLAUSE: &str = "default: ";
const DEFAULT_CALL: &str = "default: (";
const LENGTH_CLAUSE: &str = "length: ";

/// Parsed field entry
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Source lines, untrimmed; the declaration is the last non-tail line
    lines: Vec<String>,
    column_type: ColumnType,
    optional: bool,
    max_length: Option<u32>,
    default: Option<String>,
}

impl Column {
    /// Parse one field entry, registering its decorators in `usage`
    pub fn parse(entry: &str, dialect: &Dialect, usage: &mut ValidatorUsage) -> Result<Self> {
        let lines: Vec<String> = entry.split('\n').map(str::to_string).collect();

        let mut working: Vec<&str> = lines.iter().map(String::as_str).collect();
        remove_tail(&mut working);

        let declaration = working.last().ok_or_else(|| TransformError::MissingDeclaration {
            entry: entry.to_string(),
        })?;
        let (column_type, optional) = find_type(declaration, dialect, usage)?;

        let mut max_length = None;
        let mut default = None;

        for line in &working {
            let mut line = line.trim().to_string();

            if line.contains(DEFAULT_CALL) {
                let (stripped, value) = separate_default(&line, dialect);
                line = stripped;
                default = value;
            }

            if column_type.is_string() {
                if dialect.is_column_indicator(&line) && line.contains('{') && line.contains('}') {
                    max_length = find_length_object(&line)?;
                } else if line.contains(LENGTH_CLAUSE) {
                    max_length = Some(find_length(&line)?);
                }
            }
        }

        if max_length.map_or(false, |length| length > 0) {
            usage.register_max_length();
        }

        log::debug!(
            "Parsed column {:?}: type={} optional={} max_length={:?} default={:?}",
            declaration.trim(),
            column_type,
            optional,
            max_length,
            default
        );

        Ok(Self {
            lines,
            column_type,
            optional,
            max_length,
            default,
        })
    }

    /// Drop a leading index annotation up to the entity declaration
    ///
    /// No-op unless the first line carries the index marker.
    pub fn remove_index(&mut self, dialect: &Dialect) -> Result<()> {
        let has_index = self
            .lines
            .first()
            .map_or(false, |line| line.contains(dialect.index_marker.as_str()));
        if !has_index {
            return Ok(());
        }

        let entity_at = self
            .lines
            .iter()
            .position(|line| line.starts_with(dialect.entity_marker.as_str()))
            .ok_or(TransformError::MissingEntityDeclaration)?;

        self.lines.drain(..entity_at);
        Ok(())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Source text of the entry
    pub fn source(&self) -> String {
        self.lines.join("\n")
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn max_length(&self) -> Option<u32> {
        self.max_length
    }

    /// Statically representable default literal, if any
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// Infer `(type, optional)` from a `name: Type;` or `name: Type | null;` line
pub fn find_type(line: &str, dialect: &Dialect, usage: &mut ValidatorUsage) -> Result<(ColumnType, bool)> {
    let mut type_token = line
        .rsplit(':')
        .next()
        .unwrap_or(line)
        .trim_matches(|c: char| c == ';' || c == '\n' || c == ' ');

    let optional = type_token.contains('|');
    if optional {
        type_token = type_token.split(" | ").next().unwrap_or(type_token).trim();
    }

    let column_type = dialect.column_type(type_token)?;
    usage.register(column_type, optional);

    Ok((column_type, optional))
}

/// Split a line into the part before `default: ` and the default literal
///
/// A non-empty leading part gets `})` re-appended so a one-line decorator
/// stays a decodable call. Defaults naming the computed-default marker, and
/// empty ones, come back as `None`.
pub fn separate_default(line: &str, dialect: &Dialect) -> (String, Option<String>) {
    let head = line.split(DEFAULT_CLAUSE).next().unwrap_or_default();
    let tail = line.rsplit(DEFAULT_CLAUSE).next().unwrap_or_default();

    let literal = tail.trim_matches(|c: char| matches!(c, '(' | ')' | ' ' | '=' | '>' | '}' | '{' | '"' | ',' | '\n'));
    let default = if literal.is_empty() || literal.contains(dialect.computed_default_marker.as_str()) {
        None
    } else {
        Some(literal.to_string())
    };

    let mut head = head.to_string();
    if !head.is_empty() {
        head.push_str("})");
    }

    (head, default)
}

/// Extract `length` from the object literal of a one-line decorator
///
/// The literal is the text between the last pair of braces. A literal
/// without a `length` key yields `None`.
pub fn find_length_object(line: &str) -> Result<Option<u32>> {
    let pieces: Vec<&str> = line.split(|c: char| c == '{' || c == '}').collect();
    let inner = if pieces.len() >= 2 { pieces[pieces.len() - 2] } else { "" };
    let literal = format!("{{{}}}", inner.trim());

    let object = decode_object(&literal).map_err(|source| TransformError::MalformedLiteral {
        line: line.to_string(),
        source,
    })?;

    match object.get("length") {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|length| u32::try_from(length).ok())
            .map(Some)
            .ok_or_else(|| TransformError::InvalidLength {
                line: line.to_string(),
                reason: format!("expected a non-negative integer, found {}", value),
            }),
    }
}

/// Extract `x` from a line of the form `length: x,`
pub fn find_length(line: &str) -> Result<u32> {
    let value = line
        .rsplit(':')
        .next()
        .unwrap_or(line)
        .trim_matches(|c: char| c == ',' || c == ' ');

    value.parse::<u32>().map_err(|e| TransformError::InvalidLength {
        line: line.to_string(),
        reason: e.to_string(),
    })
}

/// Pop trailing lines shorter than two characters (closing braces, blanks)
pub fn remove_tail<S: AsRef<str>>(lines: &mut Vec<S>) {
    while lines
        .last()
        .map_or(false, |line| line.as_ref().chars().count() < 2)
    {
        lines.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dialect() -> Dialect {
        Dialect::default()
    }

    #[test]
    fn test_find_type() {
        let mut usage = ValidatorUsage::new();
        let d = dialect();

        assert_eq!(find_type("companyId: number;", &d, &mut usage).unwrap(), (ColumnType::Number, false));
        assert_eq!(
            find_type("companyName?: string | null;", &d, &mut usage).unwrap(),
            (ColumnType::String, true)
        );
        assert_eq!(find_type("enterDate: Date;", &d, &mut usage).unwrap(), (ColumnType::Date, false));
        assert_eq!(
            find_type("isDeleted: boolean | null;", &d, &mut usage).unwrap(),
            (ColumnType::Boolean, true)
        );

        for ty in [ColumnType::String, ColumnType::Number, ColumnType::Date, ColumnType::Boolean] {
            assert!(usage.is_used(ty));
        }
        assert!(usage.is_optional_used());
    }

    #[test]
    fn test_find_type_marks_only_its_type() {
        let mut usage = ValidatorUsage::new();
        find_type("  enterUserId: number;", &dialect(), &mut usage).unwrap();

        assert!(usage.is_used(ColumnType::Number));
        assert!(!usage.is_used(ColumnType::String));
        assert!(!usage.is_used(ColumnType::Date));
        assert!(!usage.is_used(ColumnType::Boolean));
        assert!(!usage.is_optional_used());
    }

    #[test]
    fn test_find_type_unknown_token() {
        let mut usage = ValidatorUsage::new();
        let result = find_type("tags: string[];", &dialect(), &mut usage);
        assert!(matches!(result, Err(TransformError::UnknownType { token }) if token == "string[]"));
        assert_eq!(usage, ValidatorUsage::new());
    }

    #[test]
    fn test_separate_default() {
        let number_default = r#"@Column("tinyint", { name: "Exclude", nullable: true, default: () => "(0)" })"#;
        assert_eq!(
            separate_default(number_default, &dialect()),
            (
                r#"@Column("tinyint", { name: "Exclude", nullable: true, })"#.to_string(),
                Some("0".to_string())
            )
        );

        let computed = r#"@Column("tinyint", { name: "Exclude", nullable: true, default: () => "[XUtils].[GetCurrentDateTime]()" })"#;
        assert_eq!(
            separate_default(computed, &dialect()),
            (r#"@Column("tinyint", { name: "Exclude", nullable: true, })"#.to_string(), None)
        );

        assert_eq!(
            separate_default(r#"default: () => "'N/A'","#, &dialect()),
            (String::new(), Some("'N/A'".to_string()))
        );
    }

    #[test]
    fn test_find_length_object() {
        let line = r#"@Column("varchar", { name: "CompanyName", nullable: true, length: 60 })"#;
        assert_eq!(find_length_object(line).unwrap(), Some(60));

        let non_string = r#"@PrimaryGeneratedColumn({ type: "smallint", name: "CompanyId" })"#;
        assert_eq!(find_length_object(non_string).unwrap(), None);
    }

    #[test]
    fn test_find_length_object_malformed() {
        let line = r#"@Column("varchar", { name: "Notes", transformer: trim })"#;
        let err = find_length_object(line).unwrap_err();
        assert!(matches!(err, TransformError::MalformedLiteral { line: l, .. } if l == line));

        let negative = r#"@Column("varchar", { length: -1 })"#;
        assert!(matches!(find_length_object(negative), Err(TransformError::InvalidLength { .. })));
    }

    #[test]
    fn test_find_length() {
        assert_eq!(find_length("length: 200,").unwrap(), 200);
        assert_eq!(find_length("length: 15").unwrap(), 15);
        assert!(matches!(find_length("length: MAX_NAME,"), Err(TransformError::InvalidLength { .. })));
    }

    #[test]
    fn test_remove_tail() {
        let mut lines = vec!["  name: string;", "}", ""];
        remove_tail(&mut lines);
        assert_eq!(lines, vec!["  name: string;"]);

        let mut only_tail = vec!["}", ""];
        remove_tail(&mut only_tail);
        assert!(only_tail.is_empty());
    }

    #[test]
    fn test_parse_one_line_decorator() {
        let entry = "\n  @Column(\"varchar\", { name: \"FolderLocation\", nullable: true, length: 200 })\n  folderLocation: string | null;\n";
        let mut usage = ValidatorUsage::new();
        let column = Column::parse(entry, &dialect(), &mut usage).unwrap();

        assert_eq!(column.default_value(), None);
        assert_eq!(column.max_length(), Some(200));
        assert_eq!(column.column_type(), ColumnType::String);
        assert!(column.is_optional());
        assert!(usage.is_max_length_used());
        assert_eq!(column.source(), entry);
    }

    #[test]
    fn test_parse_multi_line_decorator() {
        let entry = "\n  @Column(\"money\", {\n    name: \"EngineeringRate\",\n    default: () => \"(0)\",\n  })\n  engineeringRate: number;\n";
        let mut usage = ValidatorUsage::new();
        let column = Column::parse(entry, &dialect(), &mut usage).unwrap();

        assert_eq!(column.default_value(), Some("0"));
        assert_eq!(column.max_length(), None);
        assert_eq!(column.column_type(), ColumnType::Number);
        assert!(!column.is_optional());
        assert!(!usage.is_max_length_used());
    }

    #[test]
    fn test_parse_bare_length_clause() {
        let entry = "  @Column(\"nvarchar\", {\n    name: \"Notes\",\n    length: 500,\n  })\n  notes: string;";
        let column = Column::parse(entry, &dialect(), &mut ValidatorUsage::new()).unwrap();
        assert_eq!(column.max_length(), Some(500));
    }

    #[test]
    fn test_parse_default_and_length_on_one_line() {
        let entry = "  @Column(\"varchar\", { name: \"Code\", length: 3, default: () => \"'USD'\" })\n  code: string;";
        let column = Column::parse(entry, &dialect(), &mut ValidatorUsage::new()).unwrap();
        assert_eq!(column.max_length(), Some(3));
        assert_eq!(column.default_value(), Some("'USD'"));
    }

    #[test]
    fn test_parse_ignores_length_on_non_string() {
        let entry = "  @Column(\"binary\", { name: \"Blob\", length: 16 })\n  blob: Buffer;";
        let column = Column::parse(entry, &dialect(), &mut ValidatorUsage::new()).unwrap();
        assert_eq!(column.column_type(), ColumnType::Other);
        assert_eq!(column.max_length(), None);
    }

    #[test]
    fn test_parse_entry_without_declaration() {
        let result = Column::parse("}\n", &dialect(), &mut ValidatorUsage::new());
        assert!(matches!(result, Err(TransformError::MissingDeclaration { .. })));
    }

    #[test]
    fn test_remove_index() {
        let index = r#"@Index("PK_Locations", ["companyId"], { unique: true })"#;
        let entry = "@Entity(\"Admin_Company\", { schema: \"dbo\" })\nexport class AdminCompany {\n  @PrimaryGeneratedColumn({ type: \"smallint\", name: \"CompanyId\" })\n  companyId: number;\n";

        let mut indexed = Column::parse(&format!("{}\n{}", index, entry), &dialect(), &mut ValidatorUsage::new()).unwrap();
        indexed.remove_index(&dialect()).unwrap();
        assert_eq!(indexed.source(), entry);

        let mut plain = Column::parse(entry, &dialect(), &mut ValidatorUsage::new()).unwrap();
        plain.remove_index(&dialect()).unwrap();
        assert_eq!(plain.source(), entry);
    }

    #[test]
    fn test_remove_index_without_entity() {
        let entry = "@Index(\"IX_Name\", [\"name\"])\n  @Column(\"varchar\", { name: \"Name\" })\n  name: string;";
        let mut column = Column::parse(entry, &dialect(), &mut ValidatorUsage::new()).unwrap();
        assert!(matches!(column.remove_index(&dialect()), Err(TransformError::MissingEntityDeclaration)));
    }
}
