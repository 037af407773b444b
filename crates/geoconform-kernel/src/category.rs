//! The fixed set of validator categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One validator slot of a [`crate::ValidatorContainer`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Naming,
    Metadata,
    Citation,
    Quality,
    Extent,
    Geometry,
    Parameter,
    Datum,
    Cs,
    Crs,
    Operation,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Naming,
        Category::Metadata,
        Category::Citation,
        Category::Quality,
        Category::Extent,
        Category::Geometry,
        Category::Parameter,
        Category::Datum,
        Category::Cs,
        Category::Crs,
        Category::Operation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Naming => "naming",
            Self::Metadata => "metadata",
            Self::Citation => "citation",
            Self::Quality => "quality",
            Self::Extent => "extent",
            Self::Geometry => "geometry",
            Self::Parameter => "parameter",
            Self::Datum => "datum",
            Self::Cs => "cs",
            Self::Crs => "crs",
            Self::Operation => "operation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("unknown validator category: {s}"))
    }
}
