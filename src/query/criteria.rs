//! Equality criteria built from list query strings.

use crate::error::AppError;
use std::collections::HashMap;

/// How a filterable field compares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

/// Borrowed view of one field of a record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldRef<'a> {
    Text(&'a str),
    Number(f64),
}

/// Expected value of one criterion.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Exact, case-sensitive equality. Text never equals a number.
    pub fn matches(&self, actual: FieldRef<'_>) -> bool {
        match (self, actual) {
            (FieldValue::Text(expected), FieldRef::Text(actual)) => expected == actual,
            (FieldValue::Number(expected), FieldRef::Number(actual)) => *expected == actual,
            _ => false,
        }
    }
}

/// A record the filter engine can inspect.
pub trait Record {
    /// Resource name used in messages ("customer", "account").
    const NAME: &'static str;
    /// Fields that list endpoints accept as filters, in column order.
    const FILTERABLE: &'static [(&'static str, FieldKind)];

    /// Value of `field`, or `None` when the field is unset or unknown.
    fn field(&self, field: &str) -> Option<FieldRef<'_>>;
}

/// One `field = value` term.
#[derive(Clone, Debug, PartialEq)]
pub struct Criterion {
    pub field: &'static str,
    pub value: FieldValue,
}

/// A conjunction of equality terms. Empty criteria match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Criteria {
    terms: Vec<Criterion>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term. Terms accumulate; a later term never replaces an earlier one.
    pub fn and(mut self, field: &'static str, value: FieldValue) -> Self {
        self.terms.push(Criterion { field, value });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[Criterion] {
        &self.terms
    }

    /// True when `record` satisfies every term.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.terms.iter().all(|term| {
            record
                .field(term.field)
                .is_some_and(|actual| term.value.matches(actual))
        })
    }

    /// Build criteria for `R` from query parameters. Unknown parameters are
    /// ignored; numeric fields must parse as numbers. Terms follow `R::FILTERABLE`
    /// order so the generated SQL is stable.
    pub fn from_query<R: Record>(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut criteria = Criteria::new();
        for (field, kind) in R::FILTERABLE {
            let Some(raw) = params.get(*field) else { continue };
            let value = match kind {
                FieldKind::Text => FieldValue::Text(raw.clone()),
                FieldKind::Number => raw
                    .trim()
                    .parse::<f64>()
                    .map(FieldValue::Number)
                    .map_err(|_| AppError::BadRequest(format!("{} filter must be a number", field)))?,
            };
            criteria = criteria.and(*field, value);
        }
        Ok(criteria)
    }
}
