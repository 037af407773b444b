//! Spatial and temporal extents.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::metadata::Identifier;
use crate::referencing::CoordinateReferenceSystem;
use crate::subject::Subject;
use crate::text::InternationalString;

pub trait Extent: Subject {
    fn description(&self) -> Option<Arc<dyn InternationalString>>;
    fn geographic_elements(&self) -> Vec<Arc<dyn GeographicExtent>>;
    fn vertical_elements(&self) -> Vec<Arc<dyn VerticalExtent>>;
    fn temporal_elements(&self) -> Vec<Arc<dyn TemporalExtent>>;
}

/// Base of the geographic extent kinds. Concrete kinds answer
/// `as_geographic_bounding_box` or `as_geographic_description`.
pub trait GeographicExtent: Subject {
    /// `true` when the area is included, `false` when excluded.
    fn inclusion(&self) -> Option<bool> {
        Some(true)
    }
}

/// Longitude/latitude box in decimal degrees. West may exceed east when the
/// box spans the antimeridian.
pub trait GeographicBoundingBox: GeographicExtent {
    fn west_bound_longitude(&self) -> f64;
    fn east_bound_longitude(&self) -> f64;
    fn south_bound_latitude(&self) -> f64;
    fn north_bound_latitude(&self) -> f64;
}

pub trait GeographicDescription: GeographicExtent {
    fn geographic_identifier(&self) -> Option<Arc<dyn Identifier>>;
}

pub trait VerticalExtent: Subject {
    fn minimum_value(&self) -> Option<f64>;
    fn maximum_value(&self) -> Option<f64>;
    fn vertical_crs(&self) -> Option<Arc<dyn CoordinateReferenceSystem>>;
}

pub trait TemporalExtent: Subject {
    fn begin(&self) -> Option<DateTime<Utc>>;
    fn end(&self) -> Option<DateTime<Utc>>;
}
