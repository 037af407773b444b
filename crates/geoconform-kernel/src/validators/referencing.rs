//! Identified objects, reference systems and coordinate reference systems.

use std::sync::Arc;

use geoconform_model::{
    CoordinateReferenceSystem, CoordinateSystem, CrsKind, CsKind, Datum, DatumKind,
    IdentifiedObject, ReferenceSystem, same_instance,
};
use serde_json::json;

use crate::context::Validation;
use crate::policy::Policy;

pub trait CrsValidation: Send + Sync {
    fn policy(&self) -> &Policy;

    /// Fallback for identified objects matching no more specific facet.
    fn validate_identified_object(&self, v: &mut Validation<'_>, object: &dyn IdentifiedObject) {
        validate_identified_object(v, object);
    }

    fn validate_reference_system(&self, v: &mut Validation<'_>, system: &dyn ReferenceSystem) {
        validate_reference_system(v, system);
    }

    fn validate_crs(&self, v: &mut Validation<'_>, crs: &dyn CoordinateReferenceSystem) {
        validate_crs(v, crs);
    }
}

pub struct CrsValidator {
    policy: Policy,
}

impl CrsValidator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl CrsValidation for CrsValidator {
    fn policy(&self) -> &Policy {
        &self.policy
    }
}

/// Checks every referencing object shares: a named primary identifier,
/// lawful identifier and alias collections, and valid remarks.
pub fn validate_identified_object<T: IdentifiedObject + ?Sized>(v: &mut Validation<'_>, object: &T) {
    let name = object.name();
    if v.mandatory("IdentifiedObject: name is mandatory", &name) {
        let code = name.as_ref().and_then(|name| name.code());
        v.at("name", |v| {
            v.mandatory("IdentifiedObject: name code is mandatory", &code);
        });
    }
    v.dispatch_field("name", name.as_deref());

    let identifiers = object.identifiers();
    v.dispatch_items("identifiers", &identifiers);
    v.check_equivalence_of("identifiers", &identifiers);

    let alias = object.alias();
    v.dispatch_items("alias", &alias);
    v.check_equivalence_of("alias", &alias);

    v.dispatch_field("remarks", object.remarks().as_deref());
}

pub fn validate_reference_system<T: ReferenceSystem + ?Sized>(v: &mut Validation<'_>, system: &T) {
    validate_identified_object(v, system);
    v.dispatch_field("domainOfValidity", system.domain_of_validity().as_deref());
    v.dispatch_field("scope", system.scope().as_deref());
}

pub fn validate_crs(v: &mut Validation<'_>, crs: &dyn CoordinateReferenceSystem) {
    validate_reference_system(v, crs);

    let cs = crs.coordinate_system();
    let datum = crs.datum();
    v.dispatch_field("coordinateSystem", cs.as_deref());
    v.dispatch_field("datum", datum.as_deref());

    match crs.kind() {
        CrsKind::Geographic => {
            expect_cs(v, &cs, &[CsKind::Ellipsoidal], "geographic");
            expect_datum(v, &datum, DatumKind::Geodetic, "geographic");
        }
        CrsKind::Geocentric => {
            if expect_cs(v, &cs, &[CsKind::Cartesian, CsKind::Spherical], "geocentric") {
                check_geocentric_axes(v, &cs);
            }
            expect_datum(v, &datum, DatumKind::Geodetic, "geocentric");
        }
        CrsKind::Projected => {
            expect_cs(v, &cs, &[CsKind::Cartesian], "projected");
            let base = crs.base_crs();
            v.at("baseCrs", |v| {
                v.check(
                    base.as_ref().is_none_or(|b| b.kind() == CrsKind::Geographic),
                    "CoordinateReferenceSystem: the base of a projected CRS must be geographic",
                );
            });
            validate_derivation(v, crs, base);
        }
        CrsKind::Derived => {
            v.mandatory("CoordinateReferenceSystem: coordinate system is mandatory", &cs);
            validate_derivation(v, crs, crs.base_crs());
        }
        CrsKind::Vertical => {
            expect_cs(v, &cs, &[CsKind::Vertical], "vertical");
            expect_datum(v, &datum, DatumKind::Vertical, "vertical");
        }
        CrsKind::Temporal => {
            expect_cs(v, &cs, &[CsKind::Time], "temporal");
            expect_datum(v, &datum, DatumKind::Temporal, "temporal");
        }
        CrsKind::Engineering => {
            v.mandatory("CoordinateReferenceSystem: coordinate system is mandatory", &cs);
            expect_datum(v, &datum, DatumKind::Engineering, "engineering");
        }
        CrsKind::Image => {
            expect_cs(v, &cs, &[CsKind::Cartesian, CsKind::Affine], "image");
            expect_datum(v, &datum, DatumKind::Image, "image");
        }
        CrsKind::Compound => {
            let components = crs.components();
            if components.len() < 2 {
                v.fail_with(
                    "CoordinateReferenceSystem: a compound CRS needs at least two components",
                    json!({ "components": components.len() }),
                );
            }
            v.dispatch_items("components", &components);
        }
    }
}

/// Requires a coordinate system of one of the `allowed` kinds. Returns
/// whether it has one.
fn expect_cs(
    v: &mut Validation<'_>,
    cs: &Option<Arc<dyn CoordinateSystem>>,
    allowed: &[CsKind],
    crs_kind: &str,
) -> bool {
    if !v.mandatory("CoordinateReferenceSystem: coordinate system is mandatory", cs) {
        return false;
    }
    let Some(cs) = cs else {
        return false;
    };
    let kind = cs.kind();
    let holds = allowed.contains(&kind);
    if !holds {
        v.at("coordinateSystem", |v| {
            v.fail_with(
                "CoordinateReferenceSystem: coordinate system kind does not suit the CRS kind",
                json!({ "crsKind": crs_kind, "csKind": kind, "allowed": allowed }),
            );
        });
    }
    holds
}

fn expect_datum(
    v: &mut Validation<'_>,
    datum: &Option<Arc<dyn Datum>>,
    expected: DatumKind,
    crs_kind: &str,
) {
    if !v.mandatory("CoordinateReferenceSystem: datum is mandatory", datum) {
        return;
    }
    if let Some(datum) = datum {
        let kind = datum.kind();
        if kind != expected {
            v.at("datum", |v| {
                v.fail_with(
                    "CoordinateReferenceSystem: datum kind does not suit the CRS kind",
                    json!({ "crsKind": crs_kind, "datumKind": kind, "expected": expected }),
                );
            });
        }
    }
}

/// A geocentric Cartesian system has the geocentric X, Y and Z axes.
fn check_geocentric_axes(v: &mut Validation<'_>, cs: &Option<Arc<dyn CoordinateSystem>>) {
    use geoconform_model::AxisDirection::{GeocentricX, GeocentricY, GeocentricZ};

    let Some(cs) = cs.as_ref().filter(|cs| cs.kind() == CsKind::Cartesian) else {
        return;
    };
    let directions: Vec<_> = (0..cs.dimension())
        .map(|i| cs.axis(i).and_then(|axis| axis.direction()))
        .collect();
    v.at("coordinateSystem", |v| {
        v.check_eq(
            vec![Some(GeocentricX), Some(GeocentricY), Some(GeocentricZ)],
            directions,
            "CoordinateReferenceSystem: a geocentric Cartesian CS needs the geocentric X, Y, Z axes",
        );
    });
}

/// Base CRS and defining conversion of a projected or derived CRS.
fn validate_derivation(
    v: &mut Validation<'_>,
    crs: &dyn CoordinateReferenceSystem,
    base: Option<Arc<dyn CoordinateReferenceSystem>>,
) {
    let conversion = crs.conversion_from_base();
    v.mandatory("CoordinateReferenceSystem: base CRS is mandatory", &base);
    v.mandatory(
        "CoordinateReferenceSystem: conversion from base is mandatory",
        &conversion,
    );
    v.dispatch_field("baseCrs", base.as_deref());
    v.dispatch_field("conversionFromBase", conversion.as_deref());

    let Some(conversion) = conversion else {
        return;
    };
    v.at("conversionFromBase", |v| {
        if let (Some(source), Some(base)) = (conversion.source_crs(), base.as_ref()) {
            v.check_same(
                base.as_subject(),
                source.as_subject(),
                "CoordinateReferenceSystem: conversion source must be the base CRS",
            );
        }
        if let Some(target) = conversion.target_crs() {
            v.check_same(
                crs.as_subject(),
                target.as_subject(),
                "CoordinateReferenceSystem: conversion target must be the derived CRS itself",
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ValidatorContainer;
    use geoconform_model::toy::{ToyCrs, ToyCs, ToyDatum, ToyIdentifier, ToyProperties};
    use geoconform_model::{AxisDirection, Identifier, Subject, Unit};

    #[test]
    fn wgs84_geographic_passes() {
        let report = ValidatorContainer::new().validate(&ToyCrs::geographic_lon_lat());
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    #[test]
    fn vertical_passes() {
        let report = ValidatorContainer::new().validate(&ToyCrs::vertical());
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    #[test]
    fn geographic_with_vertical_cs_fails() {
        let vertical = ToyCrs::vertical();
        let mut crs = ToyCrs::geographic_lon_lat();
        crs.cs = vertical.cs.clone();
        let report = ValidatorContainer::new().validate(&crs);
        assert!(report.mentions("coordinate system kind does not suit the CRS kind"));
    }

    #[test]
    fn unnamed_object_fails() {
        let mut crs = ToyCrs::vertical();
        crs.properties = ToyProperties::default();
        let report = ValidatorContainer::new().validate(&crs);
        assert!(report.mentions("IdentifiedObject: name is mandatory"));
    }

    #[test]
    fn identifiers_must_be_lawful() {
        let mut crs = ToyCrs::vertical();
        crs.properties.identifiers = vec![
            Arc::new(ToyIdentifier::in_space("EPSG", "5714")),
            Arc::new(ToyIdentifier::in_space("EPSG", "5714")),
        ];
        let report = ValidatorContainer::new().validate(&crs);
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    /// An identifier that is not equal to itself.
    struct Irreflexive;

    impl Subject for Irreflexive {
        fn equals(&self, _other: Option<&dyn Subject>) -> bool {
            false
        }

        fn as_identifier(&self) -> Option<&dyn Identifier> {
            Some(self)
        }
    }

    impl Identifier for Irreflexive {
        fn code(&self) -> Option<String> {
            Some("5714".into())
        }

        fn code_space(&self) -> Option<String> {
            Some("EPSG".into())
        }

        fn version(&self) -> Option<String> {
            None
        }

        fn authority(&self) -> Option<Arc<dyn geoconform_model::Citation>> {
            None
        }
    }

    #[test]
    fn single_identifier_must_equal_itself() {
        let mut crs = ToyCrs::vertical();
        crs.properties.identifiers = vec![Arc::new(Irreflexive)];
        let report = ValidatorContainer::new().validate(&crs);
        assert!(!report.is_accepted());
        let failure = report
            .failures
            .iter()
            .find(|f| f.message.starts_with("equivalence law"))
            .expect("reflexivity failure");
        assert_eq!(failure.path, "$.identifiers");
        assert_eq!(failure.category, crate::category::Category::Crs);
    }

    #[test]
    fn compound_needs_two_components() {
        let mut compound = ToyCrs::new("WGS 84 + MSL height", CrsKind::Compound);
        compound.components = vec![Arc::new(ToyCrs::geographic_lon_lat())];
        let report = ValidatorContainer::new().validate(&compound);
        assert!(report.mentions("at least two components"));

        compound.components.push(Arc::new(ToyCrs::vertical()));
        let report = ValidatorContainer::new().validate(&compound);
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    #[test]
    fn geocentric_axes_are_checked() {
        use geoconform_model::toy::ToyAxis;
        let axes = vec![
            ToyAxis::new("Geocentric X", "X", AxisDirection::GeocentricX, Unit::metre()),
            ToyAxis::new("Geocentric Y", "Y", AxisDirection::GeocentricY, Unit::metre()),
            ToyAxis::new("Geocentric Z", "Z", AxisDirection::GeocentricZ, Unit::metre()),
        ];
        let crs = ToyCrs::new("WGS 84 geocentric", CrsKind::Geocentric)
            .with_cs(ToyCs::new("Earth centred", CsKind::Cartesian, axes))
            .with_datum(ToyDatum::wgs84());
        let report = ValidatorContainer::new().validate(&crs);
        assert!(report.is_accepted(), "{:?}", report.failures);
    }
}
