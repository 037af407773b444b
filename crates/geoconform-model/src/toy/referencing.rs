use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cs::{AxisDirection, CoordinateSystem, CoordinateSystemAxis, CsKind, RangeMeaning};
use crate::datum::{Datum, DatumKind, Ellipsoid, PixelInCell, PrimeMeridian};
use crate::extent::Extent;
use crate::metadata::Identifier;
use crate::naming::GenericName;
use crate::operation::CoordinateOperation;
use crate::referencing::{CoordinateReferenceSystem, CrsKind, IdentifiedObject, ReferenceSystem};
use crate::subject::Subject;
use crate::text::{InternationalString, Unit};
use crate::toy::ToyIdentifier;

/// Properties shared by every identified object.
#[derive(Default, Clone)]
pub struct ToyProperties {
    pub name: Option<Arc<dyn Identifier>>,
    pub alias: Vec<Arc<dyn GenericName>>,
    pub identifiers: Vec<Arc<dyn Identifier>>,
    pub remarks: Option<Arc<dyn InternationalString>>,
}

impl ToyProperties {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(Arc::new(ToyIdentifier::code(name))),
            ..Self::default()
        }
    }
}

macro_rules! identified_object {
    ($toy:ty) => {
        impl $crate::referencing::IdentifiedObject for $toy {
            fn name(&self) -> Option<std::sync::Arc<dyn $crate::metadata::Identifier>> {
                self.properties.name.clone()
            }

            fn alias(&self) -> Vec<std::sync::Arc<dyn $crate::naming::GenericName>> {
                self.properties.alias.clone()
            }

            fn identifiers(&self) -> Vec<std::sync::Arc<dyn $crate::metadata::Identifier>> {
                self.properties.identifiers.clone()
            }

            fn remarks(&self) -> Option<std::sync::Arc<dyn $crate::text::InternationalString>> {
                self.properties.remarks.clone()
            }
        }
    };
}

pub(crate) use identified_object;

#[derive(Clone)]
pub struct ToyAxis {
    pub properties: ToyProperties,
    pub abbreviation: Option<String>,
    pub direction: Option<AxisDirection>,
    pub unit: Option<Unit>,
    pub minimum: f64,
    pub maximum: f64,
    pub range_meaning: Option<RangeMeaning>,
}

impl ToyAxis {
    /// An unbounded axis with exact range meaning.
    pub fn new(name: &str, abbreviation: &str, direction: AxisDirection, unit: Unit) -> Self {
        Self {
            properties: ToyProperties::named(name),
            abbreviation: Some(abbreviation.to_string()),
            direction: Some(direction),
            unit: Some(unit),
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            range_meaning: Some(RangeMeaning::Exact),
        }
    }

    pub fn bounded(mut self, minimum: f64, maximum: f64, meaning: RangeMeaning) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self.range_meaning = Some(meaning);
        self
    }

    pub fn longitude() -> Self {
        Self::new("Geodetic longitude", "λ", AxisDirection::East, Unit::degree()).bounded(
            -180.0,
            180.0,
            RangeMeaning::Wraparound,
        )
    }

    pub fn latitude() -> Self {
        Self::new("Geodetic latitude", "φ", AxisDirection::North, Unit::degree()).bounded(
            -90.0,
            90.0,
            RangeMeaning::Exact,
        )
    }
}

impl Subject for ToyAxis {
    fn as_identified_object(&self) -> Option<&dyn IdentifiedObject> {
        Some(self)
    }

    fn as_coordinate_system_axis(&self) -> Option<&dyn CoordinateSystemAxis> {
        Some(self)
    }
}

identified_object!(ToyAxis);

impl CoordinateSystemAxis for ToyAxis {
    fn abbreviation(&self) -> Option<String> {
        self.abbreviation.clone()
    }

    fn direction(&self) -> Option<AxisDirection> {
        self.direction
    }

    fn unit(&self) -> Option<Unit> {
        self.unit.clone()
    }

    fn minimum_value(&self) -> f64 {
        self.minimum
    }

    fn maximum_value(&self) -> f64 {
        self.maximum
    }

    fn range_meaning(&self) -> Option<RangeMeaning> {
        self.range_meaning
    }
}

pub struct ToyCs {
    pub properties: ToyProperties,
    pub kind: CsKind,
    pub axes: Vec<Arc<dyn CoordinateSystemAxis>>,
}

impl ToyCs {
    pub fn new(name: &str, kind: CsKind, axes: Vec<ToyAxis>) -> Self {
        Self {
            properties: ToyProperties::named(name),
            kind,
            axes: axes
                .into_iter()
                .map(|axis| Arc::new(axis) as Arc<dyn CoordinateSystemAxis>)
                .collect(),
        }
    }
}

impl Subject for ToyCs {
    fn as_identified_object(&self) -> Option<&dyn IdentifiedObject> {
        Some(self)
    }

    fn as_coordinate_system(&self) -> Option<&dyn CoordinateSystem> {
        Some(self)
    }
}

identified_object!(ToyCs);

impl CoordinateSystem for ToyCs {
    fn kind(&self) -> CsKind {
        self.kind
    }

    fn dimension(&self) -> usize {
        self.axes.len()
    }

    fn axis(&self, dimension: usize) -> Option<Arc<dyn CoordinateSystemAxis>> {
        self.axes.get(dimension).cloned()
    }
}

#[derive(Clone)]
pub struct ToyEllipsoid {
    pub properties: ToyProperties,
    pub axis_unit: Option<Unit>,
    pub semi_major: f64,
    pub semi_minor: f64,
    pub inverse_flattening: f64,
    pub ivf_definitive: bool,
}

impl ToyEllipsoid {
    pub fn flattened(name: &str, semi_major: f64, inverse_flattening: f64) -> Self {
        Self {
            properties: ToyProperties::named(name),
            axis_unit: Some(Unit::metre()),
            semi_major,
            semi_minor: semi_major * (1.0 - 1.0 / inverse_flattening),
            inverse_flattening,
            ivf_definitive: true,
        }
    }

    pub fn sphere(name: &str, radius: f64) -> Self {
        Self {
            properties: ToyProperties::named(name),
            axis_unit: Some(Unit::metre()),
            semi_major: radius,
            semi_minor: radius,
            inverse_flattening: f64::INFINITY,
            ivf_definitive: false,
        }
    }

    pub fn wgs84() -> Self {
        Self::flattened("WGS 84", 6_378_137.0, 298.257_223_563)
    }
}

impl Subject for ToyEllipsoid {
    fn as_identified_object(&self) -> Option<&dyn IdentifiedObject> {
        Some(self)
    }

    fn as_ellipsoid(&self) -> Option<&dyn Ellipsoid> {
        Some(self)
    }
}

identified_object!(ToyEllipsoid);

impl Ellipsoid for ToyEllipsoid {
    fn axis_unit(&self) -> Option<Unit> {
        self.axis_unit.clone()
    }

    fn semi_major_axis(&self) -> f64 {
        self.semi_major
    }

    fn semi_minor_axis(&self) -> f64 {
        self.semi_minor
    }

    fn inverse_flattening(&self) -> f64 {
        self.inverse_flattening
    }

    fn is_ivf_definitive(&self) -> bool {
        self.ivf_definitive
    }

    fn is_sphere(&self) -> bool {
        self.semi_major == self.semi_minor
    }
}

#[derive(Clone)]
pub struct ToyPrimeMeridian {
    pub properties: ToyProperties,
    pub greenwich_longitude: f64,
    pub angular_unit: Option<Unit>,
}

impl ToyPrimeMeridian {
    pub fn new(name: &str, greenwich_longitude: f64, angular_unit: Unit) -> Self {
        Self {
            properties: ToyProperties::named(name),
            greenwich_longitude,
            angular_unit: Some(angular_unit),
        }
    }

    pub fn greenwich() -> Self {
        Self::new("Greenwich", 0.0, Unit::degree())
    }
}

impl Subject for ToyPrimeMeridian {
    fn as_identified_object(&self) -> Option<&dyn IdentifiedObject> {
        Some(self)
    }

    fn as_prime_meridian(&self) -> Option<&dyn PrimeMeridian> {
        Some(self)
    }
}

identified_object!(ToyPrimeMeridian);

impl PrimeMeridian for ToyPrimeMeridian {
    fn greenwich_longitude(&self) -> f64 {
        self.greenwich_longitude
    }

    fn angular_unit(&self) -> Option<Unit> {
        self.angular_unit.clone()
    }
}

pub struct ToyDatum {
    pub properties: ToyProperties,
    pub kind: DatumKind,
    pub anchor_point: Option<Arc<dyn InternationalString>>,
    pub realization_epoch: Option<DateTime<Utc>>,
    pub domain_of_validity: Option<Arc<dyn Extent>>,
    pub scope: Option<Arc<dyn InternationalString>>,
    pub ellipsoid: Option<Arc<dyn Ellipsoid>>,
    pub prime_meridian: Option<Arc<dyn PrimeMeridian>>,
    pub origin: Option<DateTime<Utc>>,
    pub pixel_in_cell: Option<PixelInCell>,
}

impl ToyDatum {
    pub fn new(name: &str, kind: DatumKind) -> Self {
        Self {
            properties: ToyProperties::named(name),
            kind,
            anchor_point: None,
            realization_epoch: None,
            domain_of_validity: None,
            scope: None,
            ellipsoid: None,
            prime_meridian: None,
            origin: None,
            pixel_in_cell: None,
        }
    }

    pub fn geodetic(name: &str, ellipsoid: ToyEllipsoid, prime_meridian: ToyPrimeMeridian) -> Self {
        Self {
            ellipsoid: Some(Arc::new(ellipsoid)),
            prime_meridian: Some(Arc::new(prime_meridian)),
            ..Self::new(name, DatumKind::Geodetic)
        }
    }

    pub fn wgs84() -> Self {
        Self::geodetic(
            "World Geodetic System 1984",
            ToyEllipsoid::wgs84(),
            ToyPrimeMeridian::greenwich(),
        )
    }
}

impl Subject for ToyDatum {
    fn as_identified_object(&self) -> Option<&dyn IdentifiedObject> {
        Some(self)
    }

    fn as_datum(&self) -> Option<&dyn Datum> {
        Some(self)
    }
}

identified_object!(ToyDatum);

impl Datum for ToyDatum {
    fn kind(&self) -> DatumKind {
        self.kind
    }

    fn anchor_point(&self) -> Option<Arc<dyn InternationalString>> {
        self.anchor_point.clone()
    }

    fn realization_epoch(&self) -> Option<DateTime<Utc>> {
        self.realization_epoch
    }

    fn domain_of_validity(&self) -> Option<Arc<dyn Extent>> {
        self.domain_of_validity.clone()
    }

    fn scope(&self) -> Option<Arc<dyn InternationalString>> {
        self.scope.clone()
    }

    fn ellipsoid(&self) -> Option<Arc<dyn Ellipsoid>> {
        self.ellipsoid.clone()
    }

    fn prime_meridian(&self) -> Option<Arc<dyn PrimeMeridian>> {
        self.prime_meridian.clone()
    }

    fn origin(&self) -> Option<DateTime<Utc>> {
        self.origin
    }

    fn pixel_in_cell(&self) -> Option<PixelInCell> {
        self.pixel_in_cell
    }
}

pub struct ToyCrs {
    pub properties: ToyProperties,
    pub kind: CrsKind,
    pub domain_of_validity: Option<Arc<dyn Extent>>,
    pub scope: Option<Arc<dyn InternationalString>>,
    pub cs: Option<Arc<dyn CoordinateSystem>>,
    pub datum: Option<Arc<dyn Datum>>,
    pub base: Option<Arc<dyn CoordinateReferenceSystem>>,
    pub conversion: Option<Arc<dyn CoordinateOperation>>,
    pub components: Vec<Arc<dyn CoordinateReferenceSystem>>,
}

impl ToyCrs {
    pub fn new(name: &str, kind: CrsKind) -> Self {
        Self {
            properties: ToyProperties::named(name),
            kind,
            domain_of_validity: None,
            scope: None,
            cs: None,
            datum: None,
            base: None,
            conversion: None,
            components: Vec::new(),
        }
    }

    pub fn with_cs(mut self, cs: ToyCs) -> Self {
        self.cs = Some(Arc::new(cs));
        self
    }

    pub fn with_datum(mut self, datum: ToyDatum) -> Self {
        self.datum = Some(Arc::new(datum));
        self
    }

    /// WGS 84 with (longitude, latitude) axis order in degrees.
    pub fn geographic_lon_lat() -> Self {
        let cs = ToyCs::new(
            "Ellipsoidal 2D (λ, φ)",
            CsKind::Ellipsoidal,
            vec![ToyAxis::longitude(), ToyAxis::latitude()],
        );
        Self::new("WGS 84", CrsKind::Geographic)
            .with_cs(cs)
            .with_datum(ToyDatum::wgs84())
    }

    /// Gravity-related height in metres.
    pub fn vertical() -> Self {
        let axis = ToyAxis::new("Gravity-related height", "H", AxisDirection::Up, Unit::metre());
        let cs = ToyCs::new("Vertical (H)", CsKind::Vertical, vec![axis]);
        Self::new("Mean sea level height", CrsKind::Vertical)
            .with_cs(cs)
            .with_datum(ToyDatum::new("Mean sea level", DatumKind::Vertical))
    }
}

impl Subject for ToyCrs {
    fn as_identified_object(&self) -> Option<&dyn IdentifiedObject> {
        Some(self)
    }

    fn as_reference_system(&self) -> Option<&dyn ReferenceSystem> {
        Some(self)
    }

    fn as_coordinate_reference_system(&self) -> Option<&dyn CoordinateReferenceSystem> {
        Some(self)
    }
}

identified_object!(ToyCrs);

impl ReferenceSystem for ToyCrs {
    fn domain_of_validity(&self) -> Option<Arc<dyn Extent>> {
        self.domain_of_validity.clone()
    }

    fn scope(&self) -> Option<Arc<dyn InternationalString>> {
        self.scope.clone()
    }
}

impl CoordinateReferenceSystem for ToyCrs {
    fn kind(&self) -> CrsKind {
        self.kind
    }

    fn coordinate_system(&self) -> Option<Arc<dyn CoordinateSystem>> {
        self.cs.clone()
    }

    fn datum(&self) -> Option<Arc<dyn Datum>> {
        self.datum.clone()
    }

    fn base_crs(&self) -> Option<Arc<dyn CoordinateReferenceSystem>> {
        self.base.clone()
    }

    fn conversion_from_base(&self) -> Option<Arc<dyn CoordinateOperation>> {
        self.conversion.clone()
    }

    fn components(&self) -> Vec<Arc<dyn CoordinateReferenceSystem>> {
        self.components.clone()
    }
}
