use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::extent::{
    Extent, GeographicBoundingBox, GeographicDescription, GeographicExtent, TemporalExtent,
    VerticalExtent,
};
use crate::metadata::Identifier;
use crate::referencing::CoordinateReferenceSystem;
use crate::subject::Subject;
use crate::text::InternationalString;

#[derive(Default)]
pub struct ToyExtent {
    pub description: Option<Arc<dyn InternationalString>>,
    pub geographic_elements: Vec<Arc<dyn GeographicExtent>>,
    pub vertical_elements: Vec<Arc<dyn VerticalExtent>>,
    pub temporal_elements: Vec<Arc<dyn TemporalExtent>>,
}

impl ToyExtent {
    pub fn of_box(bbox: ToyBoundingBox) -> Self {
        Self {
            geographic_elements: vec![Arc::new(bbox)],
            ..Self::default()
        }
    }
}

impl Subject for ToyExtent {
    fn as_extent(&self) -> Option<&dyn Extent> {
        Some(self)
    }
}

impl Extent for ToyExtent {
    fn description(&self) -> Option<Arc<dyn InternationalString>> {
        self.description.clone()
    }

    fn geographic_elements(&self) -> Vec<Arc<dyn GeographicExtent>> {
        self.geographic_elements.clone()
    }

    fn vertical_elements(&self) -> Vec<Arc<dyn VerticalExtent>> {
        self.vertical_elements.clone()
    }

    fn temporal_elements(&self) -> Vec<Arc<dyn TemporalExtent>> {
        self.temporal_elements.clone()
    }
}

/// Longitude/latitude bounds in degrees, compared by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToyBoundingBox {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl ToyBoundingBox {
    pub fn new(west: f64, east: f64, south: f64, north: f64) -> Self {
        Self {
            west,
            east,
            south,
            north,
        }
    }

    pub fn world() -> Self {
        Self::new(-180.0, 180.0, -90.0, 90.0)
    }
}

impl Subject for ToyBoundingBox {
    fn equals(&self, other: Option<&dyn Subject>) -> bool {
        other
            .and_then(|o| o.as_geographic_bounding_box())
            .is_some_and(|o| {
                [
                    (o.west_bound_longitude(), self.west),
                    (o.east_bound_longitude(), self.east),
                    (o.south_bound_latitude(), self.south),
                    (o.north_bound_latitude(), self.north),
                ]
                .iter()
                .all(|(a, b)| a.to_bits() == b.to_bits())
            })
    }

    fn hash_code(&self) -> i32 {
        crate::subject::hash_ordinates(&[self.west, self.east, self.south, self.north])
    }

    fn as_geographic_bounding_box(&self) -> Option<&dyn GeographicBoundingBox> {
        Some(self)
    }
}

impl GeographicExtent for ToyBoundingBox {}

impl GeographicBoundingBox for ToyBoundingBox {
    fn west_bound_longitude(&self) -> f64 {
        self.west
    }

    fn east_bound_longitude(&self) -> f64 {
        self.east
    }

    fn south_bound_latitude(&self) -> f64 {
        self.south
    }

    fn north_bound_latitude(&self) -> f64 {
        self.north
    }
}

#[derive(Default)]
pub struct ToyGeographicDescription {
    pub identifier: Option<Arc<dyn Identifier>>,
}

impl Subject for ToyGeographicDescription {
    fn as_geographic_description(&self) -> Option<&dyn GeographicDescription> {
        Some(self)
    }
}

impl GeographicExtent for ToyGeographicDescription {}

impl GeographicDescription for ToyGeographicDescription {
    fn geographic_identifier(&self) -> Option<Arc<dyn Identifier>> {
        self.identifier.clone()
    }
}

#[derive(Default)]
pub struct ToyVerticalExtent {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub crs: Option<Arc<dyn CoordinateReferenceSystem>>,
}

impl Subject for ToyVerticalExtent {
    fn as_vertical_extent(&self) -> Option<&dyn VerticalExtent> {
        Some(self)
    }
}

impl VerticalExtent for ToyVerticalExtent {
    fn minimum_value(&self) -> Option<f64> {
        self.minimum
    }

    fn maximum_value(&self) -> Option<f64> {
        self.maximum
    }

    fn vertical_crs(&self) -> Option<Arc<dyn CoordinateReferenceSystem>> {
        self.crs.clone()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ToyTemporalExtent {
    pub begin: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Subject for ToyTemporalExtent {
    fn as_temporal_extent(&self) -> Option<&dyn TemporalExtent> {
        Some(self)
    }
}

impl TemporalExtent for ToyTemporalExtent {
    fn begin(&self) -> Option<DateTime<Utc>> {
        self.begin
    }

    fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }
}
