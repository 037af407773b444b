use std::sync::Arc;

use crate::extent::Extent;
use crate::metadata::Citation;
use crate::operation::{
    CoordinateOperation, Formula, MathTransform, OperationKind, OperationMethod,
};
use crate::parameter::{ParameterDescriptorGroup, ParameterValueGroup};
use crate::quality::QualityElement;
use crate::referencing::{CoordinateReferenceSystem, IdentifiedObject};
use crate::subject::Subject;
use crate::text::InternationalString;
use crate::toy::referencing::identified_object;
use crate::toy::{ToyProperties, ToyText};

/// A transform known only by its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToyTransform {
    pub source_dimensions: usize,
    pub target_dimensions: usize,
    pub identity: bool,
}

impl ToyTransform {
    pub fn new(source_dimensions: usize, target_dimensions: usize) -> Self {
        Self {
            source_dimensions,
            target_dimensions,
            identity: false,
        }
    }
}

impl Subject for ToyTransform {
    fn as_math_transform(&self) -> Option<&dyn MathTransform> {
        Some(self)
    }
}

impl MathTransform for ToyTransform {
    fn source_dimensions(&self) -> usize {
        self.source_dimensions
    }

    fn target_dimensions(&self) -> usize {
        self.target_dimensions
    }

    fn is_identity(&self) -> bool {
        self.identity
    }
}

#[derive(Default)]
pub struct ToyFormula {
    pub formula: Option<Arc<dyn InternationalString>>,
    pub citation: Option<Arc<dyn Citation>>,
}

impl ToyFormula {
    pub fn text(formula: &str) -> Self {
        Self {
            formula: Some(ToyText::shared(formula)),
            citation: None,
        }
    }
}

impl Subject for ToyFormula {
    fn as_formula(&self) -> Option<&dyn Formula> {
        Some(self)
    }
}

impl Formula for ToyFormula {
    fn formula(&self) -> Option<Arc<dyn InternationalString>> {
        self.formula.clone()
    }

    fn citation(&self) -> Option<Arc<dyn Citation>> {
        self.citation.clone()
    }
}

pub struct ToyMethod {
    pub properties: ToyProperties,
    pub formula: Option<Arc<dyn Formula>>,
    pub source_dimensions: Option<usize>,
    pub target_dimensions: Option<usize>,
    pub parameters: Option<Arc<dyn ParameterDescriptorGroup>>,
}

impl ToyMethod {
    pub fn new(name: &str, formula: &str) -> Self {
        Self {
            properties: ToyProperties::named(name),
            formula: Some(Arc::new(ToyFormula::text(formula))),
            source_dimensions: None,
            target_dimensions: None,
            parameters: None,
        }
    }
}

impl Subject for ToyMethod {
    fn as_identified_object(&self) -> Option<&dyn IdentifiedObject> {
        Some(self)
    }

    fn as_operation_method(&self) -> Option<&dyn OperationMethod> {
        Some(self)
    }
}

identified_object!(ToyMethod);

impl OperationMethod for ToyMethod {
    fn formula(&self) -> Option<Arc<dyn Formula>> {
        self.formula.clone()
    }

    fn source_dimensions(&self) -> Option<usize> {
        self.source_dimensions
    }

    fn target_dimensions(&self) -> Option<usize> {
        self.target_dimensions
    }

    fn parameters(&self) -> Option<Arc<dyn ParameterDescriptorGroup>> {
        self.parameters.clone()
    }
}

pub struct ToyOperation {
    pub properties: ToyProperties,
    pub kind: OperationKind,
    pub source: Option<Arc<dyn CoordinateReferenceSystem>>,
    pub target: Option<Arc<dyn CoordinateReferenceSystem>>,
    pub version: Option<String>,
    pub accuracy: Vec<Arc<dyn QualityElement>>,
    pub domain_of_validity: Option<Arc<dyn Extent>>,
    pub scope: Option<Arc<dyn InternationalString>>,
    pub transform: Option<Arc<dyn MathTransform>>,
    pub method: Option<Arc<dyn OperationMethod>>,
    pub parameter_values: Option<Arc<dyn ParameterValueGroup>>,
    pub steps: Vec<Arc<dyn CoordinateOperation>>,
    pub wrapped: Option<Arc<dyn CoordinateOperation>>,
    pub modified_coordinates: Vec<usize>,
}

impl ToyOperation {
    pub fn new(name: &str, kind: OperationKind) -> Self {
        Self {
            properties: ToyProperties::named(name),
            kind,
            source: None,
            target: None,
            version: None,
            accuracy: Vec::new(),
            domain_of_validity: None,
            scope: None,
            transform: None,
            method: None,
            parameter_values: None,
            steps: Vec::new(),
            wrapped: None,
            modified_coordinates: Vec::new(),
        }
    }

    pub fn between(
        mut self,
        source: Arc<dyn CoordinateReferenceSystem>,
        target: Arc<dyn CoordinateReferenceSystem>,
    ) -> Self {
        self.source = Some(source);
        self.target = Some(target);
        self
    }
}

impl Subject for ToyOperation {
    fn as_identified_object(&self) -> Option<&dyn IdentifiedObject> {
        Some(self)
    }

    fn as_coordinate_operation(&self) -> Option<&dyn CoordinateOperation> {
        Some(self)
    }
}

identified_object!(ToyOperation);

impl CoordinateOperation for ToyOperation {
    fn kind(&self) -> OperationKind {
        self.kind
    }

    fn source_crs(&self) -> Option<Arc<dyn CoordinateReferenceSystem>> {
        self.source.clone()
    }

    fn target_crs(&self) -> Option<Arc<dyn CoordinateReferenceSystem>> {
        self.target.clone()
    }

    fn operation_version(&self) -> Option<String> {
        self.version.clone()
    }

    fn coordinate_operation_accuracy(&self) -> Vec<Arc<dyn QualityElement>> {
        self.accuracy.clone()
    }

    fn domain_of_validity(&self) -> Option<Arc<dyn Extent>> {
        self.domain_of_validity.clone()
    }

    fn scope(&self) -> Option<Arc<dyn InternationalString>> {
        self.scope.clone()
    }

    fn math_transform(&self) -> Option<Arc<dyn MathTransform>> {
        self.transform.clone()
    }

    fn method(&self) -> Option<Arc<dyn OperationMethod>> {
        self.method.clone()
    }

    fn parameter_values(&self) -> Option<Arc<dyn ParameterValueGroup>> {
        self.parameter_values.clone()
    }

    fn operations(&self) -> Vec<Arc<dyn CoordinateOperation>> {
        self.steps.clone()
    }

    fn operation(&self) -> Option<Arc<dyn CoordinateOperation>> {
        self.wrapped.clone()
    }

    fn modified_coordinates(&self) -> Vec<usize> {
        self.modified_coordinates.clone()
    }
}
