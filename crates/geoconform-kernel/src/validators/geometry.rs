//! Direct positions and envelopes.
//!
//! An envelope axis is in one of two regimes. In the normal regime
//! (`lower <= upper`) the statistics accessors are cross-checked against the
//! corners. In the wrapped regime (`lower > upper`, or the `+0, -0` full
//! revolution) the box crosses the axis discontinuity, which only a
//! wraparound axis allows.

use std::sync::Arc;

use geoconform_model::{
    CoordinateReferenceSystem, CoordinateSystemAxis, DirectPosition, Envelope, RangeMeaning,
    crs_dimension, hash_ordinates, is_full_revolution, same_instance,
};
use serde_json::json;

use crate::context::Validation;
use crate::policy::Policy;

pub trait GeometryValidation: Send + Sync {
    fn policy(&self) -> &Policy;

    fn validate_envelope(&self, v: &mut Validation<'_>, envelope: &dyn Envelope) {
        validate_envelope(v, envelope);
    }

    fn validate_position(&self, v: &mut Validation<'_>, position: &dyn DirectPosition) {
        validate_position(v, position);
    }
}

pub struct GeometryValidator {
    policy: Policy,
}

impl GeometryValidator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl GeometryValidation for GeometryValidator {
    fn policy(&self) -> &Policy {
        &self.policy
    }
}

fn axis_of(
    crs: Option<&Arc<dyn CoordinateReferenceSystem>>,
    dimension: usize,
) -> Option<Arc<dyn CoordinateSystemAxis>> {
    crs?.coordinate_system()?.axis(dimension)
}

fn check_crs_dimension(
    v: &mut Validation<'_>,
    crs: Option<&Arc<dyn CoordinateReferenceSystem>>,
    dimension: usize,
    message: &str,
) {
    if let Some(expected) = crs.and_then(|crs| crs_dimension(crs.as_ref())) {
        if expected != dimension {
            v.structural(
                message,
                json!({ "crsDimension": expected, "dimension": dimension }),
            );
        }
    }
}

pub fn validate_position(v: &mut Validation<'_>, position: &dyn DirectPosition) {
    let dimension = position.dimension();
    let coordinates = position.coordinates();
    let crs = position.coordinate_reference_system();
    v.dispatch_field("coordinateReferenceSystem", crs.as_deref());

    v.check_eq(
        dimension,
        coordinates.len(),
        "DirectPosition: coordinate array length must equal the dimension",
    );
    for (index, expected) in coordinates.iter().enumerate().take(dimension) {
        let actual = position.ordinate(index);
        if expected.to_bits() != actual.to_bits() {
            v.at_item("ordinate", index, |v| {
                v.fail_with(
                    "DirectPosition: ordinate must equal the coordinate array element",
                    json!({ "expected": format!("{expected:?}"), "actual": format!("{actual:?}") }),
                );
            });
        }
    }
    check_crs_dimension(
        v,
        crs.as_ref(),
        dimension,
        "DirectPosition: dimension must match the CRS dimension",
    );

    for (index, value) in coordinates.iter().enumerate() {
        let Some(axis) = axis_of(crs.as_ref(), index) else {
            continue;
        };
        if axis.range_meaning() == Some(RangeMeaning::Exact) {
            v.at_item("ordinate", index, |v| {
                v.check_between(
                    *value,
                    axis.minimum_value(),
                    axis.maximum_value(),
                    "DirectPosition: ordinate out of the axis range",
                );
            });
        }
    }

    let expected_hash = crs
        .as_ref()
        .map_or(0, |crs| crs.hash_code())
        .wrapping_add(hash_ordinates(&coordinates));
    v.check_eq(
        expected_hash,
        position.hash_code(),
        "DirectPosition: hash code must combine the CRS and ordinate hashes",
    );
    v.check(
        position.equals(Some(position.as_subject())),
        "DirectPosition: must be equal to itself",
    );
}

pub fn validate_envelope(v: &mut Validation<'_>, envelope: &dyn Envelope) {
    let dimension = envelope.dimension();
    let crs = envelope.coordinate_reference_system();
    check_crs_dimension(
        v,
        crs.as_ref(),
        dimension,
        "Envelope: dimension must match the CRS dimension",
    );

    let lower = envelope.lower_corner();
    let upper = envelope.upper_corner();
    v.mandatory("Envelope: lower corner is mandatory", &lower);
    v.mandatory("Envelope: upper corner is mandatory", &upper);
    v.dispatch_field("coordinateReferenceSystem", crs.as_deref());
    v.dispatch_field("lowerCorner", lower.as_deref());
    v.dispatch_field("upperCorner", upper.as_deref());

    let (Some(lower), Some(upper)) = (lower, upper) else {
        return;
    };
    check_corner_crs(v, crs.as_ref(), lower.as_ref(), upper.as_ref());
    for (field, corner) in [("lowerCorner", &lower), ("upperCorner", &upper)] {
        v.at(field, |v| {
            v.check_consistent(
                dimension,
                corner.dimension(),
                "Envelope: corner dimension must match the envelope dimension",
            );
        });
    }

    for index in 0..dimension {
        let axis = axis_of(crs.as_ref(), index);
        v.at_item("axis", index, |v| {
            check_axis(v, envelope, index, lower.ordinate(index), upper.ordinate(index), axis)
        });
    }
}

/// With an envelope CRS, every corner CRS present is that instance. Without
/// one, both corners share a single instance or have none.
fn check_corner_crs(
    v: &mut Validation<'_>,
    crs: Option<&Arc<dyn CoordinateReferenceSystem>>,
    lower: &dyn DirectPosition,
    upper: &dyn DirectPosition,
) {
    let lower_crs = lower.coordinate_reference_system();
    let upper_crs = upper.coordinate_reference_system();
    match crs {
        Some(crs) => {
            for (field, corner_crs) in [("lowerCorner", &lower_crs), ("upperCorner", &upper_crs)] {
                if let Some(corner_crs) = corner_crs {
                    v.at(field, |v| {
                        v.check_same(
                            crs.as_subject(),
                            corner_crs.as_subject(),
                            "Envelope: corner CRS must be the envelope CRS",
                        );
                    });
                }
            }
        }
        None => {
            let shared = match (&lower_crs, &upper_crs) {
                (None, None) => true,
                (Some(a), Some(b)) => same_instance(a.as_subject(), b.as_subject()),
                _ => false,
            };
            v.check(shared, "Envelope: both corners must share the same CRS");
        }
    }
}

fn check_axis(
    v: &mut Validation<'_>,
    envelope: &dyn Envelope,
    index: usize,
    lower: f64,
    upper: f64,
    axis: Option<Arc<dyn CoordinateSystemAxis>>,
) {
    let minimum = envelope.minimum(index);
    let maximum = envelope.maximum(index);
    let median = envelope.median(index);
    let span = envelope.span(index);
    let wrapped = lower > upper || is_full_revolution(lower, upper);

    if !wrapped {
        let eps = v.tolerance() * (upper - lower);
        let eps = if eps.is_nan() { 0.0 } else { eps };
        v.check_approx(lower, minimum, eps, "Envelope: minimum must be the lower corner ordinate");
        v.check_approx(upper, maximum, eps, "Envelope: maximum must be the upper corner ordinate");
        v.check_approx(maximum - minimum, span, eps, "Envelope: span must be maximum minus minimum");
        v.check_approx(
            (maximum + minimum) / 2.0,
            median,
            eps,
            "Envelope: median must be halfway between minimum and maximum",
        );
        return;
    }

    let meaning = axis.as_ref().and_then(|axis| axis.range_meaning());
    if meaning != Some(RangeMeaning::Wraparound) {
        v.structural(
            "Envelope: lower corner exceeds upper corner on an axis that does not wrap around",
            json!({ "lower": lower, "upper": upper, "rangeMeaning": meaning }),
        );
    }
    if meaning == Some(RangeMeaning::Exact) {
        if minimum > maximum {
            v.fail_with(
                "Envelope: minimum must not exceed maximum",
                json!({ "minimum": minimum, "maximum": maximum }),
            );
        }
        for (value, message) in [
            (lower, "Envelope: lower corner ordinate out of the axis range"),
            (upper, "Envelope: upper corner ordinate out of the axis range"),
            (median, "Envelope: median out of the axis range"),
        ] {
            if value < minimum || value > maximum {
                v.fail_with(
                    message,
                    json!({ "value": value, "minimum": minimum, "maximum": maximum }),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ValidatorContainer;
    use geoconform_model::toy::{ToyAxis, ToyCrs, ToyCs, ToyDatum, ToyEnvelope, ToyPosition};
    use geoconform_model::{CrsKind, CsKind, Subject};

    fn geographic(longitude: RangeMeaning) -> Arc<dyn CoordinateReferenceSystem> {
        let cs = ToyCs::new(
            "Ellipsoidal 2D",
            CsKind::Ellipsoidal,
            vec![
                ToyAxis::longitude().bounded(-180.0, 180.0, longitude),
                ToyAxis::latitude(),
            ],
        );
        Arc::new(
            ToyCrs::new("WGS 84", CrsKind::Geographic)
                .with_cs(cs)
                .with_datum(ToyDatum::wgs84()),
        )
    }

    #[test]
    fn envelope_across_the_antimeridian_passes() {
        let envelope = ToyEnvelope::new(
            Some(geographic(RangeMeaning::Wraparound)),
            vec![170.0, -10.0],
            vec![-170.0, 10.0],
        );
        let report = ValidatorContainer::new().validate(&envelope);
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    #[test]
    fn crossing_an_exact_axis_fails() {
        let envelope = ToyEnvelope::new(
            Some(geographic(RangeMeaning::Exact)),
            vec![170.0, -10.0],
            vec![-170.0, 10.0],
        );
        let report = ValidatorContainer::new().validate(&envelope);
        assert!(report.mentions("on an axis that does not wrap around"));
        assert_eq!(report.failures[0].path, "$.axis[0]");
    }

    #[test]
    fn full_revolution_is_wrapped() {
        let envelope = ToyEnvelope::new(
            Some(geographic(RangeMeaning::Wraparound)),
            vec![0.0, -10.0],
            vec![-0.0, 10.0],
        );
        let report = ValidatorContainer::new().validate(&envelope);
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    #[test]
    fn corners_must_share_the_envelope_crs() {
        let mut envelope = ToyEnvelope::new(
            Some(geographic(RangeMeaning::Wraparound)),
            vec![0.0, 0.0],
            vec![10.0, 10.0],
        );
        envelope.upper = Some(Arc::new(ToyPosition::with_crs(
            geographic(RangeMeaning::Wraparound),
            vec![10.0, 10.0],
        )));
        let report = ValidatorContainer::new().validate(&envelope);
        assert!(report.mentions("corner CRS must be the envelope CRS"));
    }

    #[test]
    fn position_without_crs_passes() {
        let position = ToyPosition::new(vec![1.0, 2.0]);
        assert_eq!(position.hash_code(), hash_ordinates(&[1.0, 2.0]));
        let report = ValidatorContainer::new().validate(&position);
        assert!(report.is_accepted(), "{:?}", report.failures);
        assert_eq!(position.ordinate(0), 1.0);
    }

    #[test]
    fn position_outside_an_exact_axis_fails() {
        let position = ToyPosition::with_crs(geographic(RangeMeaning::Wraparound), vec![0.0, 95.0]);
        let report = ValidatorContainer::new().validate(&position);
        assert!(report.mentions("ordinate out of the axis range"));
    }

    #[test]
    fn corners_without_envelope_crs_share_one_instance() {
        let container = ValidatorContainer::new();
        let mut envelope = ToyEnvelope::new(None, vec![0.0, 0.0], vec![10.0, 10.0]);
        assert!(container.validate(&envelope).is_accepted());

        let shared = geographic(RangeMeaning::Exact);
        envelope.upper = Some(Arc::new(ToyPosition::with_crs(shared.clone(), vec![10.0, 10.0])));
        let report = container.validate(&envelope);
        assert!(report.mentions("Envelope: both corners must share the same CRS"));

        envelope.lower = Some(Arc::new(ToyPosition::with_crs(
            geographic(RangeMeaning::Exact),
            vec![0.0, 0.0],
        )));
        let report = container.validate(&envelope);
        assert!(report.mentions("Envelope: both corners must share the same CRS"));

        envelope.lower = Some(Arc::new(ToyPosition::with_crs(shared, vec![0.0, 0.0])));
        let report = container.validate(&envelope);
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    /// Which first-axis property a [`Misreported`] envelope gets wrong.
    #[derive(Clone, Copy)]
    enum Misreport {
        Minimum,
        Span,
        Median,
        SwappedRange,
        NarrowRange,
    }

    /// Reports its corners faithfully but one derived value of axis 0
    /// wrongly.
    struct Misreported {
        inner: ToyEnvelope,
        fault: Misreport,
    }

    impl Subject for Misreported {
        fn as_envelope(&self) -> Option<&dyn Envelope> {
            Some(self)
        }
    }

    impl Envelope for Misreported {
        fn coordinate_reference_system(&self) -> Option<Arc<dyn CoordinateReferenceSystem>> {
            self.inner.coordinate_reference_system()
        }

        fn dimension(&self) -> usize {
            self.inner.dimension()
        }

        fn lower_corner(&self) -> Option<Arc<dyn DirectPosition>> {
            self.inner.lower_corner()
        }

        fn upper_corner(&self) -> Option<Arc<dyn DirectPosition>> {
            self.inner.upper_corner()
        }

        fn minimum(&self, dimension: usize) -> f64 {
            match (dimension, self.fault) {
                (0, Misreport::Minimum) => self.inner.minimum(0) + 1.0,
                (0, Misreport::SwappedRange) => self.inner.maximum(0),
                (0, Misreport::NarrowRange) => -160.0,
                _ => self.inner.minimum(dimension),
            }
        }

        fn maximum(&self, dimension: usize) -> f64 {
            match (dimension, self.fault) {
                (0, Misreport::SwappedRange) => self.inner.minimum(0),
                (0, Misreport::NarrowRange) => 160.0,
                _ => self.inner.maximum(dimension),
            }
        }

        fn median(&self, dimension: usize) -> f64 {
            match (dimension, self.fault) {
                (0, Misreport::Median) => self.inner.median(0) + 1.0,
                _ => self.inner.median(dimension),
            }
        }

        fn span(&self, dimension: usize) -> f64 {
            match (dimension, self.fault) {
                (0, Misreport::Span) => self.inner.span(0) + 1.0,
                _ => self.inner.span(dimension),
            }
        }
    }

    fn first_axis_failures(envelope: ToyEnvelope, fault: Misreport) -> Vec<String> {
        let report = ValidatorContainer::new().validate(&Misreported { inner: envelope, fault });
        report
            .failures
            .iter()
            .filter(|f| f.path == "$.axis[0]")
            .map(|f| f.message.clone())
            .collect()
    }

    fn plain_box() -> ToyEnvelope {
        ToyEnvelope::new(
            Some(geographic(RangeMeaning::Exact)),
            vec![0.0, 0.0],
            vec![10.0, 10.0],
        )
    }

    fn crossing_box() -> ToyEnvelope {
        ToyEnvelope::new(
            Some(geographic(RangeMeaning::Exact)),
            vec![170.0, -10.0],
            vec![-170.0, 10.0],
        )
    }

    #[test]
    fn derived_values_follow_the_corners() {
        assert_eq!(
            first_axis_failures(plain_box(), Misreport::Minimum),
            [
                "Envelope: minimum must be the lower corner ordinate",
                "Envelope: span must be maximum minus minimum",
                "Envelope: median must be halfway between minimum and maximum",
            ]
        );
        assert_eq!(
            first_axis_failures(plain_box(), Misreport::Span),
            ["Envelope: span must be maximum minus minimum"]
        );
        assert_eq!(
            first_axis_failures(plain_box(), Misreport::Median),
            ["Envelope: median must be halfway between minimum and maximum"]
        );
    }

    #[test]
    fn crossing_an_exact_axis_checks_the_range() {
        let swapped = first_axis_failures(crossing_box(), Misreport::SwappedRange);
        assert!(swapped.iter().any(|m| m == "Envelope: minimum must not exceed maximum"));
        assert!(swapped.iter().any(|m| m == "Envelope: lower corner ordinate out of the axis range"));

        let narrow = first_axis_failures(crossing_box(), Misreport::NarrowRange);
        assert_eq!(
            narrow,
            [
                "Envelope: lower corner exceeds upper corner on an axis that does not wrap around",
                "Envelope: lower corner ordinate out of the axis range",
                "Envelope: upper corner ordinate out of the axis range",
                "Envelope: median out of the axis range",
            ]
        );
    }

    struct Skewed;

    impl Subject for Skewed {
        fn as_direct_position(&self) -> Option<&dyn DirectPosition> {
            Some(self)
        }
    }

    impl DirectPosition for Skewed {
        fn coordinate_reference_system(&self) -> Option<Arc<dyn CoordinateReferenceSystem>> {
            None
        }

        fn dimension(&self) -> usize {
            3
        }

        fn coordinates(&self) -> Vec<f64> {
            vec![1.0, 2.0]
        }

        fn ordinate(&self, dimension: usize) -> f64 {
            dimension as f64
        }
    }

    #[test]
    fn inconsistent_position_fails() {
        let report = ValidatorContainer::new().validate(&Skewed);
        assert!(report.mentions("coordinate array length must equal the dimension"));
        assert!(report.mentions("ordinate must equal the coordinate array element"));
        assert!(report.mentions("hash code must combine the CRS and ordinate hashes"));
    }
}
