//! Backend-assigned record identifiers and lenient field decoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier assigned by the backend. Either numeric or opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Num(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Num(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<i64>()
            .map(RecordId::Num)
            .unwrap_or_else(|_| RecordId::Text(s.to_string())))
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Num(n)
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        RecordId::Num(n.into())
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}

/// Decoders for fields the backend sends as numbers or numeric strings.
pub(crate) mod lenient {
    use super::*;

    fn number(value: Option<Value>) -> Option<i64> {
        match value? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn opt_i32<'de, D>(d: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(number(Option::<Value>::deserialize(d)?).and_then(|n| i32::try_from(n).ok()))
    }

    pub fn opt_u32<'de, D>(d: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(number(Option::<Value>::deserialize(d)?).and_then(|n| u32::try_from(n).ok()))
    }

    pub fn opt_i64<'de, D>(d: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(number(Option::<Value>::deserialize(d)?))
    }

    /// Strings and numbers become text; blanks and `null` become `None`.
    pub fn opt_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    /// `null` becomes the type's default.
    pub fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_shapes() {
        let num: RecordId = serde_json::from_str("7").unwrap();
        let text: RecordId = serde_json::from_str(r#""64f1c2""#).unwrap();
        assert_eq!(num, RecordId::Num(7));
        assert_eq!(text, RecordId::Text("64f1c2".into()));
    }

    #[test]
    fn test_record_id_parse_matches_backend_number() {
        assert_eq!(RecordId::from("7"), RecordId::Num(7));
        assert_eq!(RecordId::from(" abc "), RecordId::Text("abc".into()));
        assert_eq!(RecordId::from(7).to_string(), "7");
    }

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient::opt_u32")]
        issue: Option<u32>,
        #[serde(default, deserialize_with = "lenient::opt_string")]
        category: Option<String>,
    }

    #[test]
    fn test_lenient_numbers_and_strings() {
        let p: Probe = serde_json::from_str(r#"{"issue":"3","category":5}"#).unwrap();
        assert_eq!(p.issue, Some(3));
        assert_eq!(p.category.as_deref(), Some("5"));

        let p: Probe = serde_json::from_str(r#"{"issue":"","category":""}"#).unwrap();
        assert_eq!(p.issue, None);
        assert_eq!(p.category, None);

        let p: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(p.issue, None);
    }
}
