//! Identified objects, reference systems and coordinate reference systems.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cs::CoordinateSystem;
use crate::datum::Datum;
use crate::extent::Extent;
use crate::metadata::Identifier;
use crate::naming::GenericName;
use crate::operation::CoordinateOperation;
use crate::subject::Subject;
use crate::text::InternationalString;

/// Base of every referencing object: named, optionally aliased and
/// identified by codes.
pub trait IdentifiedObject: Subject {
    fn name(&self) -> Option<Arc<dyn Identifier>>;
    fn alias(&self) -> Vec<Arc<dyn GenericName>>;
    fn identifiers(&self) -> Vec<Arc<dyn Identifier>>;
    fn remarks(&self) -> Option<Arc<dyn InternationalString>>;
}

pub trait ReferenceSystem: IdentifiedObject {
    fn domain_of_validity(&self) -> Option<Arc<dyn Extent>>;
    fn scope(&self) -> Option<Arc<dyn InternationalString>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrsKind {
    Geographic,
    Geocentric,
    Projected,
    Derived,
    Vertical,
    Temporal,
    Engineering,
    Image,
    Compound,
}

impl CrsKind {
    /// Kinds defined by a conversion applied to a base CRS.
    pub fn is_derived(self) -> bool {
        matches!(self, Self::Projected | Self::Derived)
    }
}

/// A coordinate reference system, tagged by kind. Accessors that do not
/// apply to a kind return `None` or an empty list.
pub trait CoordinateReferenceSystem: ReferenceSystem {
    fn kind(&self) -> CrsKind;
    fn coordinate_system(&self) -> Option<Arc<dyn CoordinateSystem>>;
    fn datum(&self) -> Option<Arc<dyn Datum>>;
    /// Projected and derived kinds.
    fn base_crs(&self) -> Option<Arc<dyn CoordinateReferenceSystem>> {
        None
    }
    /// Projected and derived kinds.
    fn conversion_from_base(&self) -> Option<Arc<dyn CoordinateOperation>> {
        None
    }
    /// Compound kind.
    fn components(&self) -> Vec<Arc<dyn CoordinateReferenceSystem>> {
        Vec::new()
    }
}

/// Number of dimensions of `crs`: its coordinate system's dimension, or the
/// sum over the components of a compound CRS. Compound nesting deeper than
/// eight levels is treated as unknown.
pub fn crs_dimension(crs: &dyn CoordinateReferenceSystem) -> Option<usize> {
    nested_dimension(crs, 8)
}

fn nested_dimension(crs: &dyn CoordinateReferenceSystem, budget: usize) -> Option<usize> {
    if let Some(cs) = crs.coordinate_system() {
        return Some(cs.dimension());
    }
    let components = crs.components();
    if components.is_empty() || budget == 0 {
        return None;
    }
    components
        .iter()
        .map(|component| nested_dimension(component.as_ref(), budget - 1))
        .sum()
}
