//! Datums, ellipsoids and prime meridians.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extent::Extent;
use crate::referencing::IdentifiedObject;
use crate::text::{InternationalString, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatumKind {
    Geodetic,
    Vertical,
    Temporal,
    Engineering,
    Image,
}

/// Which point of a grid cell an image datum's coordinates refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelInCell {
    CellCenter,
    CellCorner,
}

/// A datum, tagged by kind. Accessors that do not apply to a kind return
/// `None`.
pub trait Datum: IdentifiedObject {
    fn kind(&self) -> DatumKind;
    fn anchor_point(&self) -> Option<Arc<dyn InternationalString>>;
    fn realization_epoch(&self) -> Option<DateTime<Utc>>;
    fn domain_of_validity(&self) -> Option<Arc<dyn Extent>>;
    fn scope(&self) -> Option<Arc<dyn InternationalString>>;
    /// Geodetic kind.
    fn ellipsoid(&self) -> Option<Arc<dyn Ellipsoid>> {
        None
    }
    /// Geodetic kind.
    fn prime_meridian(&self) -> Option<Arc<dyn PrimeMeridian>> {
        None
    }
    /// Temporal kind.
    fn origin(&self) -> Option<DateTime<Utc>> {
        None
    }
    /// Image kind.
    fn pixel_in_cell(&self) -> Option<PixelInCell> {
        None
    }
}

pub trait Ellipsoid: IdentifiedObject {
    fn axis_unit(&self) -> Option<Unit>;
    fn semi_major_axis(&self) -> f64;
    fn semi_minor_axis(&self) -> f64;
    /// Infinite for a sphere.
    fn inverse_flattening(&self) -> f64;
    fn is_ivf_definitive(&self) -> bool;
    fn is_sphere(&self) -> bool;
}

pub trait PrimeMeridian: IdentifiedObject {
    /// Longitude from Greenwich, in [`PrimeMeridian::angular_unit`].
    fn greenwich_longitude(&self) -> f64;
    fn angular_unit(&self) -> Option<Unit>;
}
