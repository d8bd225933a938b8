use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
#[cfg(feature = "serde")]
use crate::lenient::or_default;
use crate::locale::LocalizedText;

/// Catalog identifier as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MediaId(pub String);

/// Accepts both string and numeric ids.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MediaId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(id) => MediaId(id),
            Raw::Number(id) => MediaId(id.to_string()),
        })
    }
}

impl MediaId {
    pub fn new(id: impl Into<String>) -> Self {
        MediaId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MediaType {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "movie"))]
    Movie,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "tv-show", alias = "tv", alias = "tvShow")
    )]
    TvShow,
}

impl MediaType {
    pub fn all() -> &'static [MediaType] {
        &[MediaType::Movie, MediaType::TvShow]
    }

    /// Value used in query strings and on the wire.
    pub fn as_param(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::TvShow => "tv-show",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for MediaType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "tv-show" | "tv" | "tvshow" => Ok(MediaType::TvShow),
            _ => Err(ModelError::UnknownVariant {
                kind: "media type",
                value: s.to_string(),
            }),
        }
    }
}

/// Release status of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaStatus {
    #[default]
    Released,
    Ongoing,
    Upcoming,
}

impl MediaStatus {
    pub fn all() -> &'static [MediaStatus] {
        &[
            MediaStatus::Released,
            MediaStatus::Ongoing,
            MediaStatus::Upcoming,
        ]
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            MediaStatus::Released => "released",
            MediaStatus::Ongoing => "ongoing",
            MediaStatus::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for MediaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for MediaStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "released" => Ok(MediaStatus::Released),
            "ongoing" => Ok(MediaStatus::Ongoing),
            "upcoming" => Ok(MediaStatus::Upcoming),
            _ => Err(ModelError::UnknownVariant {
                kind: "media status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CastMember {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub role: String,
}

/// A single catalog entry as rendered in the grid.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct MediaItem {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub id: MediaId,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub title: LocalizedText,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub overview: LocalizedText,
    #[cfg_attr(
        feature = "serde",
        serde(alias = "posterUrl", deserialize_with = "or_default")
    )]
    pub poster: String,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub rating: f32,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub year: u16,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", deserialize_with = "or_default")
    )]
    pub media_type: MediaType,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub status: MediaStatus,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub genres: Vec<String>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "or_default"))]
    pub cast: Vec<CastMember>,
}

impl MediaItem {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g.eq_ignore_ascii_case(genre))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_params_round_through_from_str() {
        for media_type in MediaType::all() {
            assert_eq!(
                media_type.as_param().parse::<MediaType>().unwrap(),
                *media_type
            );
        }
        assert!("cartoon".parse::<MediaType>().is_err());
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(
            "Ongoing".parse::<MediaStatus>().unwrap(),
            MediaStatus::Ongoing
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn media_item_deserializes_with_missing_fields() {
        let raw = r#"{"id":"7","title":{"en":"Arrival"},"type":"tv-show"}"#;
        let item: MediaItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.id.as_str(), "7");
        assert_eq!(item.media_type, MediaType::TvShow);
        assert_eq!(item.rating, 0.0);
        assert!(item.cast.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn numeric_ids_are_accepted() {
        let item: MediaItem = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(item.id, MediaId::new("42"));
        assert_eq!(serde_json::to_string(&item.id).unwrap(), r#""42""#);
    }
}
