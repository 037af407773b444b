//! Coordinate systems and their axes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::referencing::IdentifiedObject;
use crate::text::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisDirection {
    Other,
    North,
    NorthNorthEast,
    NorthEast,
    EastNorthEast,
    East,
    EastSouthEast,
    SouthEast,
    SouthSouthEast,
    South,
    SouthSouthWest,
    SouthWest,
    WestSouthWest,
    West,
    WestNorthWest,
    NorthWest,
    NorthNorthWest,
    Up,
    Down,
    GeocentricX,
    GeocentricY,
    GeocentricZ,
    Future,
    Past,
    ColumnPositive,
    ColumnNegative,
    RowPositive,
    RowNegative,
    DisplayRight,
    DisplayLeft,
    DisplayUp,
    DisplayDown,
}

const COMPASS: [AxisDirection; 16] = [
    AxisDirection::North,
    AxisDirection::NorthNorthEast,
    AxisDirection::NorthEast,
    AxisDirection::EastNorthEast,
    AxisDirection::East,
    AxisDirection::EastSouthEast,
    AxisDirection::SouthEast,
    AxisDirection::SouthSouthEast,
    AxisDirection::South,
    AxisDirection::SouthSouthWest,
    AxisDirection::SouthWest,
    AxisDirection::WestSouthWest,
    AxisDirection::West,
    AxisDirection::WestNorthWest,
    AxisDirection::NorthWest,
    AxisDirection::NorthNorthWest,
];

impl AxisDirection {
    /// Position on the compass rose, in sixteenths of a full turn clockwise
    /// from north.
    pub fn compass_index(self) -> Option<usize> {
        COMPASS.iter().position(|d| *d == self)
    }

    pub fn is_compass(self) -> bool {
        self.compass_index().is_some()
    }

    /// Compass bearing in degrees.
    pub fn compass_angle(self) -> Option<f64> {
        self.compass_index().map(|i| i as f64 * 22.5)
    }

    pub fn opposite(self) -> Option<Self> {
        if let Some(i) = self.compass_index() {
            return Some(COMPASS[(i + 8) % 16]);
        }
        let opposite = match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Future => Self::Past,
            Self::Past => Self::Future,
            Self::ColumnPositive => Self::ColumnNegative,
            Self::ColumnNegative => Self::ColumnPositive,
            Self::RowPositive => Self::RowNegative,
            Self::RowNegative => Self::RowPositive,
            Self::DisplayRight => Self::DisplayLeft,
            Self::DisplayLeft => Self::DisplayRight,
            Self::DisplayUp => Self::DisplayDown,
            Self::DisplayDown => Self::DisplayUp,
            _ => return None,
        };
        Some(opposite)
    }

    /// The canonical member of `{self, opposite}`: north-ish, east-ish, up,
    /// future, positive, right.
    pub fn absolute(self) -> Self {
        match self.compass_index() {
            Some(i) if i >= 8 => COMPASS[i - 8],
            Some(_) => self,
            None => match self {
                Self::Down => Self::Up,
                Self::Past => Self::Future,
                Self::ColumnNegative => Self::ColumnPositive,
                Self::RowNegative => Self::RowPositive,
                Self::DisplayLeft => Self::DisplayRight,
                Self::DisplayDown => Self::DisplayUp,
                other => other,
            },
        }
    }
}

/// Whether values outside an axis `[minimum, maximum]` are illegal (exact) or
/// wrap around (e.g. longitude).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMeaning {
    Exact,
    Wraparound,
}

pub trait CoordinateSystemAxis: IdentifiedObject {
    fn abbreviation(&self) -> Option<String>;
    fn direction(&self) -> Option<AxisDirection>;
    fn unit(&self) -> Option<Unit>;
    fn minimum_value(&self) -> f64;
    fn maximum_value(&self) -> f64;
    fn range_meaning(&self) -> Option<RangeMeaning>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsKind {
    Cartesian,
    Ellipsoidal,
    Spherical,
    Cylindrical,
    Polar,
    Vertical,
    Time,
    Linear,
    Affine,
    UserDefined,
}

pub trait CoordinateSystem: IdentifiedObject {
    fn kind(&self) -> CsKind;
    fn dimension(&self) -> usize;
    fn axis(&self, dimension: usize) -> Option<Arc<dyn CoordinateSystemAxis>>;
}
