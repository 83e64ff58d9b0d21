//! Values that sqlx can bind to a dynamically built query.

use crate::query::FieldValue;
use sqlx::encode::{Encode, IsNull};
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::Database;

/// A value bound to a PostgreSQL placeholder. Each variant reports its own
/// type so the server sees `text` or `float8` rather than a guess.
#[derive(Clone, Debug, PartialEq)]
pub enum PgBindValue {
    Null,
    F64(f64),
    Text(String),
}

impl From<&FieldValue> for PgBindValue {
    fn from(v: &FieldValue) -> Self {
        match v {
            FieldValue::Text(s) => PgBindValue::Text(s.clone()),
            FieldValue::Number(n) => PgBindValue::F64(*n),
        }
    }
}

impl From<Option<String>> for PgBindValue {
    fn from(v: Option<String>) -> Self {
        v.map(PgBindValue::Text).unwrap_or(PgBindValue::Null)
    }
}

impl From<String> for PgBindValue {
    fn from(s: String) -> Self {
        PgBindValue::Text(s)
    }
}

impl From<f64> for PgBindValue {
    fn from(n: f64) -> Self {
        PgBindValue::F64(n)
    }
}

impl<'q> Encode<'q, Postgres> for PgBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        match self {
            PgBindValue::Null => Ok(IsNull::Yes),
            PgBindValue::F64(n) => <f64 as Encode<Postgres>>::encode_by_ref(n, buf),
            PgBindValue::Text(s) => <&str as Encode<Postgres>>::encode_by_ref(&s.as_str(), buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        match self {
            PgBindValue::F64(_) => Some(<f64 as sqlx::Type<Postgres>>::type_info()),
            PgBindValue::Null | PgBindValue::Text(_) => Some(<str as sqlx::Type<Postgres>>::type_info()),
        }
    }
}

impl sqlx::Type<Postgres> for PgBindValue {
    fn type_info() -> PgTypeInfo {
        <str as sqlx::Type<Postgres>>::type_info()
    }
}
