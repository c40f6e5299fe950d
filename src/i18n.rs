//! Translation lookup and locale preference resolution.

use std::collections::HashMap;

use serde_json::Value;
use strum::IntoEnumIterator;
use tracing::warn;

use crate::error::Result;
use crate::model::Locale;

const BUNDLED_ES: &str = include_str!("../assets/locales/es.json");
const BUNDLED_EN: &str = include_str!("../assets/locales/en.json");

/// A nested string table for one locale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary(Value);

impl Dictionary {
    pub fn new(root: Value) -> Self {
        Self(root)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(json)?))
    }

    pub fn bundled(locale: Locale) -> Result<Self> {
        match locale {
            Locale::Es => Self::from_json_str(BUNDLED_ES),
            Locale::En => Self::from_json_str(BUNDLED_EN),
        }
    }

    /// Resolve a dotted path such as `showcase.filters.all` to its string leaf.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(&self.0, |node, part| node.get(part))
            .and_then(Value::as_str)
    }
}

/// Translation context handed to rendering code at startup.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    locale: Locale,
    dictionaries: HashMap<Locale, Dictionary>,
}

impl Translator {
    /// A translator with no dictionaries; every lookup misses.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            dictionaries: HashMap::new(),
        }
    }

    /// A translator loaded with the dictionaries shipped in the crate.
    pub fn bundled(locale: Locale) -> Result<Self> {
        let dictionaries: HashMap<_, _> = Locale::iter()
            .map(|l| Dictionary::bundled(l).map(|d| (l, d)))
            .collect::<Result<_>>()?;
        Ok(Self {
            locale,
            dictionaries,
        })
    }

    pub fn with_dictionary(mut self, locale: Locale, dictionary: Dictionary) -> Self {
        self.dictionaries.insert(locale, dictionary);
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Translate `key` in the active locale. A miss is logged and the key
    /// itself is returned so rendering can continue.
    pub fn t(&self, key: &str) -> String {
        match self
            .dictionaries
            .get(&self.locale)
            .and_then(|d| d.lookup(key))
        {
            Some(text) => text.to_string(),
            None => {
                warn!(key, locale = %self.locale, "missing translation");
                key.to_string()
            }
        }
    }
}

/// Pick the active locale: a stored preference if it names a supported
/// locale, else the first supported browser language, else the default.
pub fn resolve_locale(persisted: Option<&str>, browser_languages: &[&str]) -> Locale {
    persisted
        .and_then(Locale::from_tag)
        .or_else(|| browser_languages.iter().find_map(|tag| Locale::from_tag(tag)))
        .unwrap_or_default()
}
