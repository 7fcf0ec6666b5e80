//! Locale codes and locale-keyed text.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// Interface language of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Ru,
    En,
    /// Kyrgyz; stored under `ky` or the legacy `kg` key.
    Ky,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Ru, Locale::En, Locale::Ky];

    /// Canonical code.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::En => "en",
            Locale::Ky => "ky",
        }
    }

    /// Keys this locale may be stored under, in lookup order.
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Locale::Ru => &["ru"],
            Locale::En => &["en"],
            Locale::Ky => &["ky", "kg"],
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = AppError;

    /// Accepts full language tags such as `en-US`; only the first two letters count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let prefix: String = s.trim().chars().take(2).collect::<String>().to_lowercase();
        match prefix.as_str() {
            "ru" => Ok(Locale::Ru),
            "en" => Ok(Locale::En),
            "ky" | "kg" => Ok(Locale::Ky),
            _ => Err(AppError::validation(format!("unknown locale '{s}'"))),
        }
    }
}

/// Text keyed by language code.
///
/// Not every key has to be populated. Lookups fall back to Russian when the
/// requested locale is missing or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty `ru`/`en`/`kg` slots, the shape new journals are created with.
    pub fn blank(keys: &[&str]) -> Self {
        Self(keys.iter().map(|k| (k.to_string(), String::new())).collect())
    }

    /// Builder-style setter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Value stored under exactly this key.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Value for `locale`, falling back to `ru`, then to the empty string.
    pub fn get(&self, locale: Locale) -> &str {
        locale
            .keys()
            .iter()
            .filter_map(|k| self.raw(k))
            .find(|v| !v.trim().is_empty())
            .or_else(|| self.raw("ru"))
            .unwrap_or("")
    }

    pub fn ru(&self) -> &str {
        self.raw("ru").unwrap_or("")
    }

    /// True when no key carries any non-blank text.
    pub fn is_blank(&self) -> bool {
        self.0.values().all(|v| v.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'de> Deserialize<'de> for LocalizedText {
    /// Accepts a map, `null`, or a bare string (stored as `ru`).
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Map(BTreeMap<String, Option<String>>),
            Plain(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Map(map)) => Self(
                map.into_iter()
                    .map(|(k, v)| (k, v.unwrap_or_default()))
                    .collect(),
            ),
            Some(Raw::Plain(s)) => Self::new().with("ru", s),
            None => Self::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!("ru".parse::<Locale>().unwrap(), Locale::Ru);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("kg".parse::<Locale>().unwrap(), Locale::Ky);
        assert_eq!("KY".parse::<Locale>().unwrap(), Locale::Ky);
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_fallback_to_ru_when_missing() {
        let text = LocalizedText::new().with("ru", "Журнал");
        assert_eq!(text.get(Locale::En), "Журнал");
        assert_eq!(text.get(Locale::Ky), "Журнал");
    }

    #[test]
    fn test_fallback_to_ru_when_blank() {
        let text = LocalizedText::new().with("ru", "Журнал").with("en", "  ");
        assert_eq!(text.get(Locale::En), "Журнал");
    }

    #[test]
    fn test_kyrgyz_accepts_both_keys() {
        let legacy = LocalizedText::new().with("ru", "a").with("kg", "b");
        let current = LocalizedText::new().with("ru", "a").with("ky", "c");
        assert_eq!(legacy.get(Locale::Ky), "b");
        assert_eq!(current.get(Locale::Ky), "c");
    }

    #[test]
    fn test_empty_map_yields_empty_string() {
        assert_eq!(LocalizedText::new().get(Locale::En), "");
        assert!(LocalizedText::blank(&["ru", "en", "kg"]).is_blank());
    }

    #[test]
    fn test_deserialize_shapes() {
        let map: LocalizedText = serde_json::from_str(r#"{"ru":"a","en":null}"#).unwrap();
        assert_eq!(map.ru(), "a");
        assert_eq!(map.raw("en"), Some(""));

        let plain: LocalizedText = serde_json::from_str(r#""Новости""#).unwrap();
        assert_eq!(plain.get(Locale::En), "Новости");

        let null: LocalizedText = serde_json::from_str("null").unwrap();
        assert!(null.is_blank());
    }
}
