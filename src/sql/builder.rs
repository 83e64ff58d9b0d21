//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the resource tables.

use super::params::PgBindValue;
use crate::query::Criteria;

/// Static description of one table. Identifiers come from here only; values
/// always travel as parameters.
#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    /// Column used by find-one, update and delete.
    pub key: &'static str,
    /// Column listing ordering.
    pub order_by: &'static str,
    /// All columns, in insert order.
    pub columns: &'static [&'static str],
    /// Unique constraint name → column it protects.
    pub unique: &'static [(&'static str, &'static str)],
}

impl TableDef {
    /// Column protected by the named unique constraint.
    pub fn unique_field(&self, constraint: &str) -> Option<&'static str> {
        self.unique
            .iter()
            .find(|(name, _)| *name == constraint)
            .map(|(_, field)| *field)
    }
}

pub const CUSTOMERS: TableDef = TableDef {
    name: "customers",
    key: "username",
    order_by: "reference",
    columns: &["username", "firstname", "lastname", "city", "reference"],
    unique: &[
        ("customers_pkey", "reference"),
        ("customers_username_key", "username"),
    ],
};

pub const ACCOUNTS: TableDef = TableDef {
    name: "accounts",
    key: "number",
    order_by: "number",
    columns: &["number", "reference", "type", "amount"],
    unique: &[("accounts_pkey", "number")],
};

/// Quote identifier for PostgreSQL (safe: only from TableDef).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: PgBindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn column_list(table: &TableDef) -> String {
    table
        .columns
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT with every criteria term joined by AND, ORDER BY the table's order column.
pub fn select_list(table: &TableDef, criteria: &Criteria) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for term in criteria.terms() {
        let n = q.push_param(PgBindValue::from(&term.value));
        where_parts.push(format!("{} = ${}", quoted(term.field), n));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        column_list(table),
        quoted(table.name),
        where_clause,
        quoted(table.order_by)
    );
    q
}

/// SELECT by key column.
pub fn select_by_key(table: &TableDef, key: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(PgBindValue::Text(key.to_string()));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = $1",
        column_list(table),
        quoted(table.name),
        quoted(table.key)
    );
    q
}

/// INSERT one row; `values` line up with `table.columns`.
pub fn insert(table: &TableDef, values: Vec<PgBindValue>) -> QueryBuf {
    debug_assert_eq!(values.len(), table.columns.len());
    let mut q = QueryBuf::new();
    let placeholders: Vec<String> = values
        .into_iter()
        .map(|v| format!("${}", q.push_param(v)))
        .collect();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table.name),
        column_list(table),
        placeholders.join(", "),
        column_list(table)
    );
    q
}

/// UPDATE by key: SET only the given columns. Caller ensures `sets` is non-empty.
pub fn update(table: &TableDef, key: &str, sets: Vec<(&'static str, PgBindValue)>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let set_clause = sets
        .into_iter()
        .map(|(col, v)| format!("{} = ${}", quoted(col), q.push_param(v)))
        .collect::<Vec<_>>()
        .join(", ");
    let key_param = q.push_param(PgBindValue::Text(key.to_string()));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(table.name),
        set_clause,
        quoted(table.key),
        key_param,
        column_list(table)
    );
    q
}

/// DELETE by key.
pub fn delete(table: &TableDef, key: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.push_param(PgBindValue::Text(key.to_string()));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = $1",
        quoted(table.name),
        quoted(table.key)
    );
    q
}
