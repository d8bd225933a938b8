use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
#[cfg(feature = "serde")]
use crate::lenient::or_default;

/// Locales the catalog ships strings and titles for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Zh]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// Reads the locale from the first segment of a path such as
    /// `/zh/media`. Unknown or missing prefixes yield `None`.
    pub fn from_path(path: &str) -> Option<Locale> {
        let segment = path.trim_start_matches('/').split('/').next()?;
        segment.parse().ok()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "zh" => Ok(Locale::Zh),
            _ => Err(ModelError::UnknownVariant {
                kind: "locale",
                value: s.to_string(),
            }),
        }
    }
}

/// Text carried in every supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocalizedText {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub en: String,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub zh: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, zh: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            zh: zh.into(),
        }
    }

    /// Value for `locale`, falling back to English when it is blank.
    pub fn get(&self, locale: Locale) -> &str {
        let value = match locale {
            Locale::En => &self.en,
            Locale::Zh => &self.zh,
        };
        if value.trim().is_empty() {
            &self.en
        } else {
            value
        }
    }

    /// Case-insensitive substring match against any locale.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.en.to_lowercase().contains(&needle)
            || self.zh.to_lowercase().contains(&needle)
    }
}
