use chrono::{DateTime, Utc};
use derive_more::derive::Display;
use serde::Serialize;
use std::collections::BTreeMap;

/// Static description of one resource table. Every identifier that ends up in
/// generated SQL comes from one of these, never from request input.
#[derive(Debug, Display)]
#[display("{}", label)]
pub struct ResourceSpec {
    /// Human name used in messages ("Article not found").
    pub label: &'static str,
    pub table: &'static str,
    pub columns: &'static [Column],
    pub file: Option<FileSlot>,
    /// Column whose value is slugified into `slug` when present in a write.
    pub slug_from: Option<&'static str>,
    pub joins: &'static [Join],
    pub order_by: SortOrder,
    /// Message for a uniqueness violation raised by an update, when it differs
    /// from the generic one.
    pub update_conflict: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadWrite,
    /// Accepted on writes, never selected (password hashes).
    WriteOnly,
    /// Selected on reads, only changed by dedicated statements (view counters).
    ReadOnly,
}

#[derive(Debug)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub access: Access,
}

impl Column {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Text,
            access: Access::ReadWrite,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Integer,
            access: Access::ReadWrite,
        }
    }

    pub const fn access(self, access: Access) -> Self {
        Self { access, ..self }
    }

    pub fn readable(&self) -> bool {
        self.access != Access::WriteOnly
    }

    pub fn writable(&self) -> bool {
        self.access != Access::ReadOnly
    }
}

/// The column holding the public path of the record's uploaded file.
#[derive(Debug, Clone, Copy)]
pub struct FileSlot {
    pub column: &'static str,
    pub required: bool,
}

impl FileSlot {
    pub fn missing_message(&self) -> String {
        let mut chars = self.column.chars();
        match chars.next() {
            Some(first) => format!("{}{} is required", first.to_uppercase(), chars.as_str()),
            None => "File is required".to_string(),
        }
    }
}

/// `LEFT JOIN {table} ON {table}.id = t.{column}`, exposing `{table}.{display} AS {alias}`.
#[derive(Debug)]
pub struct Join {
    pub column: &'static str,
    pub table: &'static str,
    pub display: &'static str,
    pub alias: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub enum SortOrder {
    IdAsc,
    NewestFirst,
}

impl ResourceSpec {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn readable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.readable())
    }

    pub fn file_column(&self) -> Option<&'static str> {
        self.file.map(|slot| slot.column)
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.label)
    }
}

/// A single bound value. Serializes as the bare JSON scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display)]
#[serde(untagged)]
pub enum FieldValue {
    #[display("null")]
    Null,
    #[display("{_0}")]
    Integer(i64),
    #[display("{_0}")]
    Text(String),
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Column name -> value for a write. Only the keys present are written.
pub type Fields = BTreeMap<String, FieldValue>;

/// A row as read back from the store, with join aliases folded into `fields`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: i64,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        match self.fields.get(column) {
            Some(FieldValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn file_ref(&self, spec: &ResourceSpec) -> Option<&str> {
        spec.file_column()
            .and_then(|column| self.text(column))
            .filter(|path| !path.is_empty())
    }
}

/// Filters for list reads.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Drop rows whose `column` holds any of `values`.
    pub exclude: Option<(&'static str, Vec<String>)>,
}

impl ListQuery {
    pub fn excluding(column: &'static str, values: &[&str]) -> Self {
        Self {
            exclude: Some((column, values.iter().map(|v| v.to_string()).collect())),
        }
    }
}

/// Lowercase ASCII slug: non-ASCII text is transliterated first ("Café" becomes
/// "cafe"), then runs of anything that isn't alphanumeric collapse to one `-`.
/// Empty when nothing alphanumeric survives.
pub fn slugify(input: &str) -> String {
    let ascii = deunicode::deunicode(input);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
