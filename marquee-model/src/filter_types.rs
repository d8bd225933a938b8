use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Fields the catalog can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortField {
    Rating,
    Year,
    Title,
}

impl SortField {
    pub fn all() -> &'static [SortField] {
        &[SortField::Rating, SortField::Year, SortField::Title]
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortField::Rating => "rating",
            SortField::Year => "year",
            SortField::Title => "title",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for SortField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rating" => Ok(SortField::Rating),
            "year" => Ok(SortField::Year),
            "title" => Ok(SortField::Title),
            _ => Err(ModelError::UnknownVariant {
                kind: "sort field",
                value: s.to_string(),
            }),
        }
    }
}

/// Sort direction. Accepts `ASC`/`asc` and `DESC`/`desc`; rendered upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    #[cfg_attr(feature = "serde", serde(rename = "ASC", alias = "asc"))]
    Asc,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "DESC", alias = "desc"))]
    Desc,
}

impl SortOrder {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn reversed(&self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for SortOrder {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortOrder::Desc)
        } else {
            Err(ModelError::UnknownVariant {
                kind: "sort order",
                value: s.to_string(),
            })
        }
    }
}

/// Preset entries offered by the filter bar's sort menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortOption {
    pub fn all() -> &'static [SortOption] {
        use SortField::*;
        use SortOrder::*;
        &[
            SortOption { field: Rating, order: Desc },
            SortOption { field: Rating, order: Asc },
            SortOption { field: Year, order: Desc },
            SortOption { field: Year, order: Asc },
            SortOption { field: Title, order: Asc },
            SortOption { field: Title, order: Desc },
        ]
    }

    /// Key into the string tables, e.g. `sort.year.asc`.
    pub fn label_key(&self) -> String {
        format!(
            "sort.{}.{}",
            self.field.as_param(),
            self.order.as_param().to_ascii_lowercase()
        )
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.order)
    }
}
