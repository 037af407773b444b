//! End-to-end checks of the documented conformance properties, each run
//! through a fresh standard container.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use geoconform_kernel::{Category, ValidatorContainer};
use geoconform_model::toy::{
    ToyAxis, ToyBoundingBox, ToyCitation, ToyCrs, ToyCs, ToyDatum, ToyEnvelope, ToyIdentifier,
    ToyName, ToyPosition,
};
use geoconform_model::{
    AsSubject, CoordinateReferenceSystem, CrsKind, CsKind, DateType, DirectPosition, GenericName,
    RangeMeaning, ScopedName, Subject, hash_ordinates,
};

fn lon_lat(longitude: RangeMeaning) -> Arc<dyn CoordinateReferenceSystem> {
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

fn day(year: i32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
}

/// Breaks `a.equals(a)`.
struct Irreflexive;

impl Subject for Irreflexive {
    fn equals(&self, _: Option<&dyn Subject>) -> bool {
        false
    }
}

#[test]
fn equivalence_law() {
    let container = ValidatorContainer::new();
    let a = ToyIdentifier::in_space("EPSG", "4326");
    let b = ToyIdentifier::in_space("EPSG", "4326");
    let c = ToyIdentifier::in_space("EPSG", "3857");
    assert!(
        container
            .validate_equivalence(&[Some(&a), Some(&b), Some(&c), None])
            .is_accepted()
    );

    let report = container.validate_equivalence(&[Some(&a), Some(&Irreflexive)]);
    assert!(!report.is_accepted());
    assert!(report.mentions("equivalence law"));
}

#[test]
fn envelope_across_the_antimeridian() {
    let container = ValidatorContainer::new();
    let wrapped = ToyEnvelope::new(
        Some(lon_lat(RangeMeaning::Wraparound)),
        vec![170.0, -10.0],
        vec![-170.0, 10.0],
    );
    let report = container.validate(&wrapped);
    assert!(report.is_accepted(), "{:?}", report.failures);

    let exact = ToyEnvelope::new(
        Some(lon_lat(RangeMeaning::Exact)),
        vec![170.0, -10.0],
        vec![-170.0, 10.0],
    );
    let report = container.validate(&exact);
    assert!(!report.is_accepted());
    assert!(report.failures_in(Category::Geometry).count() > 0);
}

#[test]
fn position_without_crs_hashes_its_ordinates() {
    let position = ToyPosition::new(vec![1.0, 2.0]);
    assert_eq!(position.hash_code(), hash_ordinates(&[1.0, 2.0]));

    let mut copy = position.coordinates();
    copy[0] = 99.0;
    assert_eq!(position.ordinate(0), 1.0);

    assert!(ValidatorContainer::new().validate(&position).is_accepted());
}

#[test]
fn scoped_name_structure() {
    let name = ToyName::parse("a:b:c", ":");
    assert_eq!(name.depth(), 3);
    assert_eq!(name.head().unwrap().to_plain_string(), "a");
    let tip = name.tip().unwrap();
    assert_eq!(tip.to_plain_string(), "c");

    let tail = name.tail().unwrap();
    assert_eq!(tail.depth(), 2);
    assert_eq!(name.path().unwrap().depth(), 2);
    assert!(tail.tip().unwrap().equals(Some(tip.as_subject())));

    let report = ValidatorContainer::new().validate(name.as_ref());
    assert!(report.is_accepted(), "{:?}", report.failures);
}

#[test]
fn bounding_box_bounds() {
    let container = ValidatorContainer::new();

    let report = container.validate(&ToyBoundingBox::new(-200.0, 10.0, 0.0, 10.0));
    assert!(report.mentions("illegal west bound"));

    let report = container.validate(&ToyBoundingBox::new(0.0, 10.0, 10.0, -10.0));
    assert!(report.mentions("invalid range of latitudes"));

    let report = container.validate(&ToyBoundingBox::new(0.0, 10.0, f64::NAN, -10.0));
    assert!(!report.mentions("invalid range of latitudes"));
    assert!(report.is_accepted(), "{:?}", report.failures);
}

#[test]
fn citation_date_order() {
    let container = ValidatorContainer::new();

    let backwards = ToyCitation::titled("Dataset")
        .with_date(DateType::Creation, day(2020))
        .with_date(DateType::Revision, day(2019));
    let report = container.validate(&backwards);
    assert!(report.mentions("creation date must not be after revision date"));

    let ordered = ToyCitation::titled("Dataset")
        .with_date(DateType::Creation, day(2020))
        .with_date(DateType::LastUpdate, day(2021))
        .with_date(DateType::NextUpdate, day(2022));
    let report = container.validate(&ordered);
    assert!(report.is_accepted(), "{:?}", report.failures);
}
