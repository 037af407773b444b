//! Localizable text and units of measure.

use serde::{Deserialize, Serialize};

use crate::subject::Subject;

/// Text with an unlocalized form and zero or more translations.
pub trait InternationalString: Subject {
    /// The unlocalized form.
    fn to_plain_string(&self) -> String;

    /// The form for `locale`; `None` selects the root (unlocalized) form.
    fn to_localized(&self, locale: Option<&str>) -> String;

    /// Number of characters in the unlocalized form.
    fn char_count(&self) -> usize {
        self.to_plain_string().chars().count()
    }
}

/// Physical quantity measured by a [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitDimension {
    Angular,
    Linear,
    Time,
    Scale,
}

/// A unit of measure, described by its symbol and its factor to the SI
/// base unit of its dimension (radian, metre, second, unity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub symbol: String,
    pub dimension: UnitDimension,
    pub to_base: f64,
}

impl Unit {
    pub fn new(symbol: impl Into<String>, dimension: UnitDimension, to_base: f64) -> Self {
        Self {
            symbol: symbol.into(),
            dimension,
            to_base,
        }
    }

    pub fn degree() -> Self {
        Self::new("°", UnitDimension::Angular, std::f64::consts::PI / 180.0)
    }

    pub fn radian() -> Self {
        Self::new("rad", UnitDimension::Angular, 1.0)
    }

    pub fn grad() -> Self {
        Self::new("grad", UnitDimension::Angular, std::f64::consts::PI / 200.0)
    }

    pub fn metre() -> Self {
        Self::new("m", UnitDimension::Linear, 1.0)
    }

    pub fn second() -> Self {
        Self::new("s", UnitDimension::Time, 1.0)
    }

    pub fn day() -> Self {
        Self::new("d", UnitDimension::Time, 86_400.0)
    }

    pub fn unity() -> Self {
        Self::new("", UnitDimension::Scale, 1.0)
    }

    pub fn is_angular(&self) -> bool {
        self.dimension == UnitDimension::Angular
    }

    pub fn is_linear(&self) -> bool {
        self.dimension == UnitDimension::Linear
    }

    pub fn is_temporal(&self) -> bool {
        self.dimension == UnitDimension::Time
    }

    /// Converts an angle in this unit to degrees. Only meaningful for
    /// angular units.
    pub fn to_degrees(&self, value: f64) -> f64 {
        (value * self.to_base).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angular_conversions() {
        assert!((Unit::grad().to_degrees(200.0) - 180.0).abs() < 1e-12);
        assert!((Unit::radian().to_degrees(std::f64::consts::PI) - 180.0).abs() < 1e-12);
        assert!((Unit::degree().to_degrees(-45.0) + 45.0).abs() < 1e-12);
    }

    #[test]
    fn dimension_predicates() {
        assert!(Unit::degree().is_angular());
        assert!(Unit::metre().is_linear());
        assert!(Unit::day().is_temporal());
        assert!(!Unit::unity().is_angular());
    }
}
