//! Raw result rows, detached from driver statement lifetimes.
//!
//! # Responsibility
//! - Materialize driver rows into an owned, column-name addressable shape.
//!
//! # Invariants
//! - Column order matches the statement's select list.
//! - Raw rows are consumed by domain mappers only; the untyped boundary
//!   must not leak past them.

use rusqlite::types::Value;
use rusqlite::Row;

/// One result row as an ordered column-name to scalar mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    columns: Vec<(String, Value)>,
}

impl RawRow {
    /// Copies a driver row into an owned `RawRow`.
    pub(crate) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        let stmt = row.as_ref();
        let mut columns = Vec::with_capacity(stmt.column_count());
        for index in 0..stmt.column_count() {
            let name = stmt.column_name(index)?.to_string();
            let value: Value = row.get(index)?;
            columns.push((name, value));
        }
        Ok(Self { columns })
    }

    /// Looks up a column value by name.
    pub fn value(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Convenience accessor for integer columns.
    pub fn integer(&self, column: &str) -> Option<i64> {
        match self.value(column) {
            Some(Value::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    /// Convenience accessor for text columns.
    pub fn text(&self, column: &str) -> Option<&str> {
        match self.value(column) {
            Some(Value::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RawRow;
    use rusqlite::types::Value;
    use rusqlite::Connection;

    fn probe_row(sql: &str) -> RawRow {
        let conn = Connection::open_in_memory().unwrap();
        conn.query_row(sql, [], |row| RawRow::read(row)).unwrap()
    }

    #[test]
    fn exposes_columns_by_name() {
        let row = probe_row("SELECT 7 AS id, 'Muddy Waters' AS name;");
        assert_eq!(row.integer("id"), Some(7));
        assert_eq!(row.text("name"), Some("Muddy Waters"));
        assert_eq!(row.value("missing"), None);
    }

    #[test]
    fn null_columns_are_present_but_typed_accessors_decline() {
        let row = probe_row("SELECT NULL AS name;");
        assert_eq!(row.value("name"), Some(&Value::Null));
        assert_eq!(row.text("name"), None);
        assert_eq!(row.integer("name"), None);
    }
}
