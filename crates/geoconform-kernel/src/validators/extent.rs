//! Geographic, vertical and temporal extents.

use geoconform_model::{
    CrsKind, Extent, GeographicBoundingBox, GeographicDescription, GeographicExtent,
    TemporalExtent, VerticalExtent,
};
use serde_json::json;

use crate::context::Validation;
use crate::policy::Policy;

pub trait ExtentValidation: Send + Sync {
    fn policy(&self) -> &Policy;

    fn validate_extent(&self, v: &mut Validation<'_>, extent: &dyn Extent) {
        validate_extent(v, extent);
    }

    fn validate_bounding_box(&self, v: &mut Validation<'_>, bbox: &dyn GeographicBoundingBox) {
        validate_bounding_box(v, bbox);
    }

    fn validate_geographic_description(
        &self,
        v: &mut Validation<'_>,
        description: &dyn GeographicDescription,
    ) {
        validate_geographic_description(v, description);
    }

    fn validate_vertical_extent(&self, v: &mut Validation<'_>, extent: &dyn VerticalExtent) {
        validate_vertical_extent(v, extent);
    }

    fn validate_temporal_extent(&self, v: &mut Validation<'_>, extent: &dyn TemporalExtent) {
        validate_temporal_extent(v, extent);
    }
}

pub struct ExtentValidator {
    policy: Policy,
}

impl ExtentValidator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl ExtentValidation for ExtentValidator {
    fn policy(&self) -> &Policy {
        &self.policy
    }
}

pub fn validate_extent(v: &mut Validation<'_>, extent: &dyn Extent) {
    let description = extent.description();
    let geographic = extent.geographic_elements();
    let vertical = extent.vertical_elements();
    let temporal = extent.temporal_elements();
    v.check(
        description.is_some() || !geographic.is_empty() || !vertical.is_empty() || !temporal.is_empty(),
        "Extent: at least one of description, geographic, vertical or temporal elements is required",
    );
    v.dispatch_field("description", description.as_deref());
    v.dispatch_items("geographicElement", &geographic);
    v.dispatch_items("verticalElement", &vertical);
    v.dispatch_items("temporalElement", &temporal);
}

fn validate_inclusion<T: GeographicExtent + ?Sized>(v: &mut Validation<'_>, element: &T) {
    v.mandatory(
        "GeographicExtent: inclusion flag is mandatory",
        &element.inclusion(),
    );
}

/// Bounds are in decimal degrees. West may exceed east (a box crossing the
/// antimeridian); NaN bounds are tolerated.
pub fn validate_bounding_box(v: &mut Validation<'_>, bbox: &dyn GeographicBoundingBox) {
    validate_inclusion(v, bbox);

    let west = bbox.west_bound_longitude();
    let east = bbox.east_bound_longitude();
    let south = bbox.south_bound_latitude();
    let north = bbox.north_bound_latitude();
    v.check_between(west, -180.0, 180.0, "GeographicBoundingBox: illegal west bound");
    v.check_between(east, -180.0, 180.0, "GeographicBoundingBox: illegal east bound");
    v.check_between(south, -90.0, 90.0, "GeographicBoundingBox: illegal south bound");
    v.check_between(north, -90.0, 90.0, "GeographicBoundingBox: illegal north bound");
    if south > north {
        v.fail_with(
            "GeographicBoundingBox: invalid range of latitudes",
            json!({ "south": south, "north": north }),
        );
    }
}

pub fn validate_geographic_description(
    v: &mut Validation<'_>,
    description: &dyn GeographicDescription,
) {
    validate_inclusion(v, description);
    let identifier = description.geographic_identifier();
    v.mandatory(
        "GeographicDescription: geographic identifier is mandatory",
        &identifier,
    );
    v.dispatch_field("geographicIdentifier", identifier.as_deref());
}

pub fn validate_vertical_extent(v: &mut Validation<'_>, extent: &dyn VerticalExtent) {
    let minimum = extent.minimum_value();
    let maximum = extent.maximum_value();
    v.mandatory("VerticalExtent: minimum value is mandatory", &minimum);
    v.mandatory("VerticalExtent: maximum value is mandatory", &maximum);
    if let (Some(minimum), Some(maximum)) = (minimum, maximum) {
        if minimum > maximum {
            v.fail_with(
                "VerticalExtent: invalid range of heights",
                json!({ "minimum": minimum, "maximum": maximum }),
            );
        }
    }

    let crs = extent.vertical_crs();
    if let Some(crs) = &crs {
        v.at("verticalCrs", |v| {
            v.check_eq(
                CrsKind::Vertical,
                crs.kind(),
                "VerticalExtent: the reference system must be vertical",
            );
        });
    }
    v.dispatch_field("verticalCrs", crs.as_deref());
}

pub fn validate_temporal_extent(v: &mut Validation<'_>, extent: &dyn TemporalExtent) {
    if let (Some(begin), Some(end)) = (extent.begin(), extent.end()) {
        if begin > end {
            v.fail_with(
                "TemporalExtent: the period must not end before it begins",
                json!({ "begin": begin.to_rfc3339(), "end": end.to_rfc3339() }),
            );
        }
    }
}
