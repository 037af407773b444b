//! Datums, ellipsoids and prime meridians.

use geoconform_model::{Datum, DatumKind, Ellipsoid, PrimeMeridian};
use serde_json::json;

use super::referencing::validate_identified_object;
use crate::context::Validation;
use crate::policy::Policy;

pub trait DatumValidation: Send + Sync {
    fn policy(&self) -> &Policy;

    fn validate_datum(&self, v: &mut Validation<'_>, datum: &dyn Datum) {
        validate_datum(v, datum);
    }

    fn validate_ellipsoid(&self, v: &mut Validation<'_>, ellipsoid: &dyn Ellipsoid) {
        validate_ellipsoid(v, ellipsoid);
    }

    fn validate_prime_meridian(&self, v: &mut Validation<'_>, meridian: &dyn PrimeMeridian) {
        validate_prime_meridian(v, meridian);
    }
}

pub struct DatumValidator {
    policy: Policy,
}

impl DatumValidator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl DatumValidation for DatumValidator {
    fn policy(&self) -> &Policy {
        &self.policy
    }
}

pub fn validate_datum(v: &mut Validation<'_>, datum: &dyn Datum) {
    validate_identified_object(v, datum);
    v.dispatch_field("anchorPoint", datum.anchor_point().as_deref());
    v.dispatch_field("scope", datum.scope().as_deref());
    v.dispatch_field("domainOfValidity", datum.domain_of_validity().as_deref());

    let ellipsoid = datum.ellipsoid();
    let prime_meridian = datum.prime_meridian();
    match datum.kind() {
        DatumKind::Geodetic => {
            v.mandatory("GeodeticDatum: ellipsoid is mandatory", &ellipsoid);
            v.mandatory("GeodeticDatum: prime meridian is mandatory", &prime_meridian);
        }
        DatumKind::Temporal => {
            v.mandatory("TemporalDatum: origin is mandatory", &datum.origin());
        }
        DatumKind::Image => {
            v.mandatory("ImageDatum: pixel in cell is mandatory", &datum.pixel_in_cell());
        }
        DatumKind::Vertical | DatumKind::Engineering => {}
    }
    v.dispatch_field("ellipsoid", ellipsoid.as_deref());
    v.dispatch_field("primeMeridian", prime_meridian.as_deref());
}

pub fn validate_ellipsoid(v: &mut Validation<'_>, ellipsoid: &dyn Ellipsoid) {
    validate_identified_object(v, ellipsoid);
    v.mandatory("Ellipsoid: axis unit is mandatory", &ellipsoid.axis_unit());

    let a = ellipsoid.semi_major_axis();
    let b = ellipsoid.semi_minor_axis();
    let ivf = ellipsoid.inverse_flattening();
    let major_valid = v.check_strictly_positive(a, "Ellipsoid: semi-major axis must be positive");
    let minor_valid = v.check_strictly_positive(b, "Ellipsoid: semi-minor axis must be positive");
    if b > a {
        v.fail_with(
            "Ellipsoid: semi-minor axis must not exceed semi-major axis",
            json!({ "semiMajor": a, "semiMinor": b }),
        );
    }
    v.check_strictly_positive(ivf, "Ellipsoid: inverse flattening must be positive");
    v.check_consistent(
        a == b,
        ellipsoid.is_sphere(),
        "Ellipsoid: must be a sphere exactly when both semi-axes are equal",
    );

    if !major_valid || !minor_valid || b > a {
        return;
    }
    if a == b {
        v.check(
            ivf == f64::INFINITY,
            "Ellipsoid: inverse flattening of a sphere must be infinite",
        );
    } else {
        let expected = a / (a - b);
        let tolerance = v.tolerance() * expected;
        if !crate::assert::approx_eq(expected, ivf, tolerance) {
            v.structural(
                "Ellipsoid: inverse flattening must agree with the semi-axes",
                json!({ "expected": expected, "actual": ivf, "definitive": ellipsoid.is_ivf_definitive() }),
            );
        }
    }
}

pub fn validate_prime_meridian(v: &mut Validation<'_>, meridian: &dyn PrimeMeridian) {
    validate_identified_object(v, meridian);
    let unit = meridian.angular_unit();
    if !v.mandatory("PrimeMeridian: angular unit is mandatory", &unit) {
        return;
    }
    let Some(unit) = unit else {
        return;
    };
    if !v.check(unit.is_angular(), "PrimeMeridian: unit must be angular") {
        return;
    }
    let degrees = unit.to_degrees(meridian.greenwich_longitude());
    v.check_between(
        degrees,
        -180.0,
        180.0,
        "PrimeMeridian: Greenwich longitude must be within ±180°",
    );
    let is_greenwich = meridian
        .name()
        .and_then(|name| name.code())
        .is_some_and(|code| code.eq_ignore_ascii_case("Greenwich"));
    if is_greenwich {
        v.check_approx(
            0.0,
            degrees,
            0.0,
            "PrimeMeridian: the Greenwich meridian must have longitude 0",
        );
    }
}
