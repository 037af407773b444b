//! Coordinate systems and axes.

use geoconform_model::{AxisDirection, CoordinateSystem, CoordinateSystemAxis, CsKind};
use serde_json::json;

use super::referencing::validate_identified_object;
use crate::context::Validation;
use crate::policy::Policy;

pub trait CsValidation: Send + Sync {
    fn policy(&self) -> &Policy;

    fn validate_coordinate_system(&self, v: &mut Validation<'_>, cs: &dyn CoordinateSystem) {
        validate_coordinate_system(v, cs);
    }

    fn validate_axis(&self, v: &mut Validation<'_>, axis: &dyn CoordinateSystemAxis) {
        validate_axis(v, axis);
    }
}

pub struct CsValidator {
    policy: Policy,
}

impl CsValidator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl CsValidation for CsValidator {
    fn policy(&self) -> &Policy {
        &self.policy
    }
}

pub fn validate_axis(v: &mut Validation<'_>, axis: &dyn CoordinateSystemAxis) {
    validate_identified_object(v, axis);

    let abbreviation = axis.abbreviation();
    v.mandatory("CoordinateSystemAxis: abbreviation is mandatory", &abbreviation);
    if let Some(abbreviation) = abbreviation {
        v.check(
            !abbreviation.trim().is_empty(),
            "CoordinateSystemAxis: abbreviation must not be blank",
        );
    }
    v.mandatory("CoordinateSystemAxis: direction is mandatory", &axis.direction());
    v.mandatory("CoordinateSystemAxis: unit is mandatory", &axis.unit());
    v.mandatory(
        "CoordinateSystemAxis: range meaning is mandatory",
        &axis.range_meaning(),
    );

    let (minimum, maximum) = (axis.minimum_value(), axis.maximum_value());
    if minimum > maximum {
        v.fail_with(
            "CoordinateSystemAxis: minimum value must not exceed maximum value",
            json!({ "minimum": minimum, "maximum": maximum }),
        );
    }
}

/// Dimensions a coordinate system of `kind` may have.
pub fn allowed_dimensions(kind: CsKind) -> &'static [usize] {
    match kind {
        CsKind::Cartesian | CsKind::Ellipsoidal | CsKind::Affine | CsKind::UserDefined => &[2, 3],
        CsKind::Spherical | CsKind::Cylindrical => &[3],
        CsKind::Polar => &[2],
        CsKind::Vertical | CsKind::Time | CsKind::Linear => &[1],
    }
}

pub fn validate_coordinate_system(v: &mut Validation<'_>, cs: &dyn CoordinateSystem) {
    validate_identified_object(v, cs);

    let dimension = cs.dimension();
    let kind = cs.kind();
    if dimension == 0 {
        v.fail("CoordinateSystem: dimension must be at least 1");
        return;
    }
    let allowed = allowed_dimensions(kind);
    if !allowed.contains(&dimension) {
        v.fail_with(
            "CoordinateSystem: dimension not allowed for this kind of coordinate system",
            json!({ "kind": kind, "dimension": dimension, "allowed": allowed }),
        );
    }

    let mut axes = Vec::with_capacity(dimension);
    for index in 0..dimension {
        let axis = cs.axis(index);
        v.at_item("axis", index, |v| {
            v.mandatory("CoordinateSystem: axis is mandatory", &axis);
        });
        v.dispatch_field(&format!("axis[{index}]"), axis.as_deref());
        axes.push(axis);
    }

    let directions: Vec<Option<AxisDirection>> = axes
        .iter()
        .map(|axis| axis.as_ref().and_then(|axis| axis.direction()))
        .collect();
    for i in 0..directions.len() {
        for j in (i + 1)..directions.len() {
            let (Some(a), Some(b)) = (directions[i], directions[j]) else {
                continue;
            };
            if a != AxisDirection::Other && a.absolute() == b.absolute() {
                v.structural(
                    "CoordinateSystem: axes must not be colinear",
                    json!({ "first": i, "second": j, "direction": a.absolute() }),
                );
            }
        }
    }

    match kind {
        CsKind::Cartesian => check_perpendicular(v, &directions),
        CsKind::Ellipsoidal => check_ellipsoidal(v, &axes),
        CsKind::Vertical => {
            for direction in directions.iter().flatten() {
                v.check_eq(
                    AxisDirection::Up,
                    direction.absolute(),
                    "CoordinateSystem: a vertical axis must point up or down",
                );
            }
        }
        CsKind::Time => {
            for (direction, axis) in directions.iter().zip(&axes) {
                if let Some(direction) = direction {
                    v.check_eq(
                        AxisDirection::Future,
                        direction.absolute(),
                        "CoordinateSystem: a time axis must point to the future or the past",
                    );
                }
                if let Some(unit) = axis.as_ref().and_then(|axis| axis.unit()) {
                    v.check(
                        unit.is_temporal(),
                        "CoordinateSystem: a time axis needs a temporal unit",
                    );
                }
            }
        }
        _ => {}
    }
}

/// Compass axes of a Cartesian system are perpendicular to each other.
fn check_perpendicular(v: &mut Validation<'_>, directions: &[Option<AxisDirection>]) {
    let compass: Vec<(usize, usize)> = directions
        .iter()
        .enumerate()
        .filter_map(|(i, d)| d.and_then(|d| d.compass_index()).map(|c| (i, c)))
        .collect();
    for (n, &(i, a)) in compass.iter().enumerate() {
        for &(j, b) in &compass[n + 1..] {
            let quarter_turn = (a as i64 - b as i64).rem_euclid(8) == 4;
            if !quarter_turn {
                v.structural(
                    "CoordinateSystem: Cartesian axes must be perpendicular",
                    json!({ "first": i, "second": j }),
                );
            }
        }
    }
}

/// Latitude, longitude and optional ellipsoidal height axes.
fn check_ellipsoidal(
    v: &mut Validation<'_>,
    axes: &[Option<std::sync::Arc<dyn CoordinateSystemAxis>>],
) {
    for (index, axis) in axes.iter().enumerate() {
        let Some(axis) = axis else { continue };
        let Some(direction) = axis.direction() else {
            continue;
        };
        v.at_item("axis", index, |v| match direction.absolute() {
            AxisDirection::North | AxisDirection::East => {
                if let Some(unit) = axis.unit() {
                    v.check(
                        unit.is_angular(),
                        "CoordinateSystem: ellipsoidal latitude and longitude need angular units",
                    );
                }
            }
            AxisDirection::Up => {}
            other => {
                v.fail_with(
                    "CoordinateSystem: ellipsoidal axes must point north, east or up",
                    json!({ "direction": other }),
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ValidatorContainer;
    use geoconform_model::toy::{ToyAxis, ToyCs};
    use geoconform_model::{RangeMeaning, Unit};

    fn easting() -> ToyAxis {
        ToyAxis::new("Easting", "E", AxisDirection::East, Unit::metre())
    }

    fn northing() -> ToyAxis {
        ToyAxis::new("Northing", "N", AxisDirection::North, Unit::metre())
    }

    #[test]
    fn cartesian_en_passes() {
        let cs = ToyCs::new("Cartesian 2D", CsKind::Cartesian, vec![easting(), northing()]);
        let report = ValidatorContainer::new().validate(&cs);
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    #[test]
    fn colinear_axes_fail() {
        let westing = ToyAxis::new("Westing", "W", AxisDirection::West, Unit::metre());
        let cs = ToyCs::new("Broken", CsKind::Cartesian, vec![easting(), westing]);
        let report = ValidatorContainer::new().validate(&cs);
        assert!(report.mentions("axes must not be colinear"));
    }

    #[test]
    fn pairwise_failures_have_distinct_witnesses() {
        let cs = ToyCs::new(
            "All north",
            CsKind::Cartesian,
            vec![northing(), northing(), northing()],
        );
        let report = ValidatorContainer::new().validate(&cs);
        let pairwise: Vec<&str> = report
            .failures
            .iter()
            .filter(|f| f.message.ends_with("colinear") || f.message.ends_with("perpendicular"))
            .map(|f| f.witness_id.as_str())
            .collect();
        assert_eq!(pairwise.len(), 6);
        let distinct: std::collections::BTreeSet<&str> = pairwise.iter().copied().collect();
        assert_eq!(distinct.len(), 6);
    }

    #[test]
    fn oblique_cartesian_axes_fail() {
        let north_east = ToyAxis::new("Diagonal", "D", AxisDirection::NorthEast, Unit::metre());
        let cs = ToyCs::new("Oblique", CsKind::Cartesian, vec![easting(), north_east]);
        let report = ValidatorContainer::new().validate(&cs);
        assert!(report.mentions("Cartesian axes must be perpendicular"));
    }

    #[test]
    fn dimension_rules_per_kind() {
        assert_eq!(allowed_dimensions(CsKind::Polar), &[2]);
        let cs = ToyCs::new("Too flat", CsKind::Spherical, vec![easting(), northing()]);
        let report = ValidatorContainer::new().validate(&cs);
        assert!(report.mentions("dimension not allowed"));
    }

    #[test]
    fn ellipsoidal_axes_need_angular_units() {
        let cs = ToyCs::new("Bad units", CsKind::Ellipsoidal, vec![easting(), northing()]);
        let report = ValidatorContainer::new().validate(&cs);
        assert!(report.mentions("need angular units"));
    }

    #[test]
    fn axis_range_must_be_ordered() {
        let axis = easting().bounded(10.0, -10.0, RangeMeaning::Exact);
        let report = ValidatorContainer::new().validate(&axis);
        assert!(report.mentions("minimum value must not exceed maximum value"));
    }

    #[test]
    fn blank_abbreviation_fails() {
        let mut axis = northing();
        axis.abbreviation = Some("  ".into());
        let report = ValidatorContainer::new().validate(&axis);
        assert!(report.mentions("abbreviation must not be blank"));
    }
}
