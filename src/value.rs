use std::collections::BTreeMap;

use ahash::AHashSet;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use indexmap::IndexMap;

use crate::errors::CypherGraphError;

/// Ordered property map, rendered in insertion order.
pub type Properties = IndexMap<String, CypherValue>;

/// Closed set of values the codec knows how to turn into openCypher literals.
#[derive(Clone, Debug, PartialEq)]
pub enum CypherValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Query variable emitted unquoted, e.g. `graph` in `CALL algo(graph)`.
    Variable(String),
    List(Vec<CypherValue>),
    Map(IndexMap<String, CypherValue>),
    Date(NaiveDate),
    LocalTime(NaiveTime),
    LocalDateTime(NaiveDateTime),
    DateTime(DateTime<FixedOffset>),
    Duration(TimeDelta),
}

impl CypherValue {
    pub fn variable<T: Into<String>>(name: T) -> Self {
        CypherValue::Variable(name.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CypherValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CypherValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CypherValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CypherValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[CypherValue]> {
        match self {
            CypherValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, CypherValue>> {
        match self {
            CypherValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<()> for CypherValue {
    fn from(_: ()) -> Self {
        CypherValue::Null
    }
}

impl From<bool> for CypherValue {
    fn from(value: bool) -> Self {
        CypherValue::Bool(value)
    }
}

macro_rules! int_into_cypher {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CypherValue {
                fn from(value: $ty) -> Self {
                    CypherValue::Int(i64::from(value))
                }
            }
        )*
    };
}

int_into_cypher!(i8, i16, i32, i64, u8, u16, u32);

/// Wide integers are accepted when they fit an `i64`.
macro_rules! wide_int_into_cypher {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<$ty> for CypherValue {
                type Error = CypherGraphError;

                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    i64::try_from(value).map(CypherValue::Int).map_err(|_| {
                        CypherGraphError::encoding(format!(
                            "{value} does not fit a 64-bit Cypher integer"
                        ))
                    })
                }
            }
        )*
    };
}

wide_int_into_cypher!(u64, usize, i128, u128, isize);

impl From<f32> for CypherValue {
    fn from(value: f32) -> Self {
        CypherValue::Float(f64::from(value))
    }
}

impl From<f64> for CypherValue {
    fn from(value: f64) -> Self {
        CypherValue::Float(value)
    }
}

impl From<&str> for CypherValue {
    fn from(value: &str) -> Self {
        CypherValue::String(value.to_string())
    }
}

impl From<String> for CypherValue {
    fn from(value: String) -> Self {
        CypherValue::String(value)
    }
}

impl From<&String> for CypherValue {
    fn from(value: &String) -> Self {
        CypherValue::String(value.clone())
    }
}

impl<T: Into<CypherValue>> From<Option<T>> for CypherValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CypherValue::Null, Into::into)
    }
}

impl<T: Into<CypherValue>> From<Vec<T>> for CypherValue {
    fn from(values: Vec<T>) -> Self {
        CypherValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<CypherValue>> From<&[T]> for CypherValue {
    fn from(values: &[T]) -> Self {
        CypherValue::List(values.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<CypherValue>, const N: usize> From<[T; N]> for CypherValue {
    fn from(values: [T; N]) -> Self {
        CypherValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Set iteration order is unspecified, so the rendered list order is too.
impl<T: Into<CypherValue>> From<AHashSet<T>> for CypherValue {
    fn from(values: AHashSet<T>) -> Self {
        CypherValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<CypherValue>> From<IndexMap<K, V>> for CypherValue {
    fn from(map: IndexMap<K, V>) -> Self {
        CypherValue::Map(
            map.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<CypherValue>> From<BTreeMap<K, V>> for CypherValue {
    fn from(map: BTreeMap<K, V>) -> Self {
        CypherValue::Map(
            map.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<NaiveDate> for CypherValue {
    fn from(value: NaiveDate) -> Self {
        CypherValue::Date(value)
    }
}

impl From<NaiveTime> for CypherValue {
    fn from(value: NaiveTime) -> Self {
        CypherValue::LocalTime(value)
    }
}

impl From<NaiveDateTime> for CypherValue {
    fn from(value: NaiveDateTime) -> Self {
        CypherValue::LocalDateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for CypherValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        CypherValue::DateTime(value)
    }
}

impl From<DateTime<Utc>> for CypherValue {
    fn from(value: DateTime<Utc>) -> Self {
        CypherValue::DateTime(value.fixed_offset())
    }
}

impl From<TimeDelta> for CypherValue {
    fn from(value: TimeDelta) -> Self {
        CypherValue::Duration(value)
    }
}

impl From<serde_json::Value> for CypherValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CypherValue::Null,
            serde_json::Value::Bool(flag) => CypherValue::Bool(flag),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(int) => CypherValue::Int(int),
                None => CypherValue::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(text) => CypherValue::String(text),
            serde_json::Value::Array(items) => {
                CypherValue::List(items.into_iter().map(CypherValue::from).collect())
            }
            serde_json::Value::Object(map) => CypherValue::Map(
                map.into_iter()
                    .map(|(key, value)| (key, CypherValue::from(value)))
                    .collect(),
            ),
        }
    }
}
