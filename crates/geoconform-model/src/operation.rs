//! Coordinate operations, methods and formulas.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::extent::Extent;
use crate::metadata::Citation;
use crate::parameter::{ParameterDescriptorGroup, ParameterValueGroup};
use crate::quality::QualityElement;
use crate::referencing::{CoordinateReferenceSystem, IdentifiedObject};
use crate::subject::Subject;
use crate::text::InternationalString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Conversion,
    Transformation,
    Concatenated,
    PassThrough,
}

impl OperationKind {
    /// Kinds described by a method and its parameter values.
    pub fn is_single(self) -> bool {
        matches!(self, Self::Conversion | Self::Transformation)
    }
}

/// The function converting coordinates, seen only through its dimensions.
pub trait MathTransform: Subject {
    fn source_dimensions(&self) -> usize;
    fn target_dimensions(&self) -> usize;
    fn is_identity(&self) -> bool;
}

pub trait Formula: Subject {
    fn formula(&self) -> Option<Arc<dyn InternationalString>>;
    fn citation(&self) -> Option<Arc<dyn Citation>>;
}

pub trait OperationMethod: IdentifiedObject {
    fn formula(&self) -> Option<Arc<dyn Formula>>;
    fn source_dimensions(&self) -> Option<usize>;
    fn target_dimensions(&self) -> Option<usize>;
    fn parameters(&self) -> Option<Arc<dyn ParameterDescriptorGroup>>;
}

/// A coordinate operation, tagged by kind. Accessors that do not apply to a
/// kind return `None` or an empty list.
pub trait CoordinateOperation: IdentifiedObject {
    fn kind(&self) -> OperationKind;
    fn source_crs(&self) -> Option<Arc<dyn CoordinateReferenceSystem>>;
    fn target_crs(&self) -> Option<Arc<dyn CoordinateReferenceSystem>>;
    fn operation_version(&self) -> Option<String>;
    fn coordinate_operation_accuracy(&self) -> Vec<Arc<dyn QualityElement>>;
    fn domain_of_validity(&self) -> Option<Arc<dyn Extent>>;
    fn scope(&self) -> Option<Arc<dyn InternationalString>>;
    fn math_transform(&self) -> Option<Arc<dyn MathTransform>>;
    /// Conversion and transformation kinds.
    fn method(&self) -> Option<Arc<dyn OperationMethod>> {
        None
    }
    /// Conversion and transformation kinds.
    fn parameter_values(&self) -> Option<Arc<dyn ParameterValueGroup>> {
        None
    }
    /// Concatenated kind, in application order.
    fn operations(&self) -> Vec<Arc<dyn CoordinateOperation>> {
        Vec::new()
    }
    /// Pass-through kind: the operation applied to a subset of coordinates.
    fn operation(&self) -> Option<Arc<dyn CoordinateOperation>> {
        None
    }
    /// Pass-through kind: zero-based indices of the coordinates modified.
    fn modified_coordinates(&self) -> Vec<usize> {
        Vec::new()
    }
}
