//! Coordinate operations, methods, formulas and math transforms.

use geoconform_model::{
    CoordinateOperation, Formula, MathTransform, OperationKind, OperationMethod, crs_dimension,
};
use serde_json::json;

use super::referencing::validate_identified_object;
use crate::context::Validation;
use crate::policy::Policy;

pub trait OperationValidation: Send + Sync {
    fn policy(&self) -> &Policy;

    fn validate_operation(&self, v: &mut Validation<'_>, operation: &dyn CoordinateOperation) {
        validate_operation(v, operation);
    }

    fn validate_method(&self, v: &mut Validation<'_>, method: &dyn OperationMethod) {
        validate_method(v, method);
    }

    fn validate_formula(&self, v: &mut Validation<'_>, formula: &dyn Formula) {
        validate_formula(v, formula);
    }

    fn validate_math_transform(&self, v: &mut Validation<'_>, transform: &dyn MathTransform) {
        validate_math_transform(v, transform);
    }
}

pub struct OperationValidator {
    policy: Policy,
}

impl OperationValidator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl OperationValidation for OperationValidator {
    fn policy(&self) -> &Policy {
        &self.policy
    }
}

pub fn validate_operation(v: &mut Validation<'_>, operation: &dyn CoordinateOperation) {
    validate_identified_object(v, operation);

    let source = operation.source_crs();
    let target = operation.target_crs();
    let transform = operation.math_transform();
    v.dispatch_field("sourceCrs", source.as_deref());
    v.dispatch_field("targetCrs", target.as_deref());
    v.dispatch_field("mathTransform", transform.as_deref());
    v.dispatch_items("coordinateOperationAccuracy", &operation.coordinate_operation_accuracy());
    v.dispatch_field("domainOfValidity", operation.domain_of_validity().as_deref());
    v.dispatch_field("scope", operation.scope().as_deref());

    if let Some(transform) = &transform {
        v.at("mathTransform", |v| {
            if let Some(dimension) = source.as_deref().and_then(|crs| crs_dimension(crs)) {
                v.check_consistent(
                    dimension,
                    transform.source_dimensions(),
                    "CoordinateOperation: transform source dimensions must match the source CRS",
                );
            }
            if let Some(dimension) = target.as_deref().and_then(|crs| crs_dimension(crs)) {
                v.check_consistent(
                    dimension,
                    transform.target_dimensions(),
                    "CoordinateOperation: transform target dimensions must match the target CRS",
                );
            }
        });
    }

    match operation.kind() {
        OperationKind::Conversion => {
            v.forbidden(
                "Conversion: operation version is forbidden",
                &operation.operation_version(),
            );
            validate_single(v, operation, "Conversion");
        }
        OperationKind::Transformation => {
            v.mandatory("Transformation: source CRS is mandatory", &source);
            v.mandatory("Transformation: target CRS is mandatory", &target);
            v.mandatory(
                "Transformation: operation version is mandatory",
                &operation.operation_version(),
            );
            validate_single(v, operation, "Transformation");
        }
        OperationKind::Concatenated => validate_concatenated(v, operation),
        OperationKind::PassThrough => validate_pass_through(v, operation),
    }
}

/// Method and parameter values of a conversion or transformation.
fn validate_single(v: &mut Validation<'_>, operation: &dyn CoordinateOperation, kind: &str) {
    let method = operation.method();
    let values = operation.parameter_values();
    v.mandatory(&format!("{kind}: method is mandatory"), &method);
    if operation.kind() == OperationKind::Conversion {
        v.mandatory(&format!("{kind}: parameter values are mandatory"), &values);
    }
    v.dispatch_field("method", method.as_deref());
    v.dispatch_field("parameterValues", values.as_deref());
}

fn validate_concatenated(v: &mut Validation<'_>, operation: &dyn CoordinateOperation) {
    let steps = operation.operations();
    if steps.len() < 2 {
        v.fail_with(
            "ConcatenatedOperation: at least two steps are required",
            json!({ "steps": steps.len() }),
        );
    }
    v.dispatch_items("operations", &steps);

    for (index, pair) in steps.windows(2).enumerate() {
        if let (Some(target), Some(source)) = (pair[0].target_crs(), pair[1].source_crs()) {
            v.at_item("operations", index + 1, |v| {
                v.check(
                    target.equals(Some(source.as_subject())),
                    "ConcatenatedOperation: each step must start where the previous one ends",
                );
            });
        }
    }
    if let (Some(first), Some(source)) = (
        steps.first().and_then(|step| step.source_crs()),
        operation.source_crs(),
    ) {
        v.check(
            first.equals(Some(source.as_subject())),
            "ConcatenatedOperation: the first step must start at the operation source CRS",
        );
    }
    if let (Some(last), Some(target)) = (
        steps.last().and_then(|step| step.target_crs()),
        operation.target_crs(),
    ) {
        v.check(
            last.equals(Some(target.as_subject())),
            "ConcatenatedOperation: the last step must end at the operation target CRS",
        );
    }
}

fn validate_pass_through(v: &mut Validation<'_>, operation: &dyn CoordinateOperation) {
    let wrapped = operation.operation();
    v.mandatory("PassThroughOperation: wrapped operation is mandatory", &wrapped);
    v.dispatch_field("operation", wrapped.as_deref());

    let modified = operation.modified_coordinates();
    if !v.mandatory(
        "PassThroughOperation: modified coordinates are mandatory",
        &modified,
    ) {
        return;
    }
    v.at("modifiedCoordinates", |v| {
        v.check(
            modified.windows(2).all(|pair| pair[0] < pair[1]),
            "PassThroughOperation: modified coordinates must be strictly increasing",
        );
        let dimension = operation.source_crs().as_deref().and_then(|crs| crs_dimension(crs));
        if let Some(dimension) = dimension {
            for (index, coordinate) in modified.iter().enumerate() {
                if *coordinate >= dimension {
                    v.fail_with(
                        "PassThroughOperation: modified coordinate index out of the source dimension",
                        json!({ "index": index, "coordinate": coordinate, "dimension": dimension }),
                    );
                }
            }
        }
    });
}

pub fn validate_method(v: &mut Validation<'_>, method: &dyn OperationMethod) {
    validate_identified_object(v, method);
    let formula = method.formula();
    v.mandatory("OperationMethod: formula is mandatory", &formula);
    v.dispatch_field("formula", formula.as_deref());
    if let Some(dimension) = method.source_dimensions() {
        v.check(
            dimension > 0,
            "OperationMethod: source dimensions must be positive",
        );
    }
    if let Some(dimension) = method.target_dimensions() {
        v.check(
            dimension > 0,
            "OperationMethod: target dimensions must be positive",
        );
    }
    v.dispatch_field("parameters", method.parameters().as_deref());
}

pub fn validate_formula(v: &mut Validation<'_>, formula: &dyn Formula) {
    let text = formula.formula();
    let citation = formula.citation();
    v.check(
        text.is_some() || citation.is_some(),
        "Formula: a formula text or a citation is required",
    );
    v.dispatch_field("formula", text.as_deref());
    v.dispatch_field("citation", citation.as_deref());
}

pub fn validate_math_transform(v: &mut Validation<'_>, transform: &dyn MathTransform) {
    let source = transform.source_dimensions();
    let target = transform.target_dimensions();
    v.check(source > 0, "MathTransform: source dimensions must be positive");
    v.check(target > 0, "MathTransform: target dimensions must be positive");
    if transform.is_identity() {
        v.check_consistent(
            source,
            target,
            "MathTransform: an identity transform keeps the number of dimensions",
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::container::ValidatorContainer;
    use geoconform_model::CoordinateReferenceSystem;
    use geoconform_model::toy::{ToyCrs, ToyMethod, ToyOperation, ToyTransform};

    fn crs_pair() -> (Arc<dyn CoordinateReferenceSystem>, Arc<dyn CoordinateReferenceSystem>) {
        (
            Arc::new(ToyCrs::geographic_lon_lat()),
            Arc::new(ToyCrs::geographic_lon_lat()),
        )
    }

    fn transformation() -> ToyOperation {
        let (source, target) = crs_pair();
        let mut op = ToyOperation::new("Shift", OperationKind::Transformation).between(source, target);
        op.version = Some("1".into());
        op.method = Some(Arc::new(ToyMethod::new("Geocentric translations", "x' = x + dx")));
        op
    }

    #[test]
    fn transformation_passes() {
        let report = ValidatorContainer::new().validate(&transformation());
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    #[test]
    fn transformation_needs_version() {
        let mut op = transformation();
        op.version = None;
        let report = ValidatorContainer::new().validate(&op);
        assert!(report.mentions("Transformation: operation version is mandatory"));
    }

    #[test]
    fn conversion_forbids_version() {
        let mut op = ToyOperation::new("Projection", OperationKind::Conversion);
        op.version = Some("2".into());
        let report = ValidatorContainer::new().validate(&op);
        assert!(report.mentions("Conversion: operation version is forbidden"));
        assert!(report.mentions("Conversion: method is mandatory"));
    }

    #[test]
    fn transform_dimensions_must_match() {
        let mut op = transformation();
        op.transform = Some(Arc::new(ToyTransform::new(3, 2)));
        let report = ValidatorContainer::new().validate(&op);
        assert!(report.mentions("transform source dimensions must match the source CRS"));
    }

    #[test]
    fn concatenation_needs_two_steps() {
        let mut op = ToyOperation::new("Chain", OperationKind::Concatenated);
        op.steps = vec![Arc::new(transformation())];
        let report = ValidatorContainer::new().validate(&op);
        assert!(report.mentions("at least two steps are required"));
    }

    #[test]
    fn broken_chain_fails() {
        let first = transformation();
        let second = transformation();
        let mut op = ToyOperation::new("Chain", OperationKind::Concatenated);
        op.steps = vec![Arc::new(first), Arc::new(second)];
        let report = ValidatorContainer::new().validate(&op);
        assert!(report.mentions("each step must start where the previous one ends"));
    }

    #[test]
    fn pass_through_indices_are_checked() {
        let (source, target) = crs_pair();
        let mut op = ToyOperation::new("Subset", OperationKind::PassThrough).between(source, target);
        op.wrapped = Some(Arc::new(transformation()));
        op.modified_coordinates = vec![1, 0, 5];
        let report = ValidatorContainer::new().validate(&op);
        assert!(report.mentions("strictly increasing"));
        assert!(report.mentions("out of the source dimension"));
    }
}
