//! Data quality elements and their results.

use geoconform_model::{ConformanceResult, QualityElement, QuantitativeResult};
use serde_json::json;

use crate::context::Validation;
use crate::policy::Policy;

pub trait QualityValidation: Send + Sync {
    fn policy(&self) -> &Policy;

    fn validate_element(&self, v: &mut Validation<'_>, element: &dyn QualityElement) {
        validate_element(v, element);
    }

    fn validate_conformance_result(&self, v: &mut Validation<'_>, result: &dyn ConformanceResult) {
        validate_conformance_result(v, result);
    }

    fn validate_quantitative_result(
        &self,
        v: &mut Validation<'_>,
        result: &dyn QuantitativeResult,
    ) {
        validate_quantitative_result(v, result);
    }
}

pub struct QualityValidator {
    policy: Policy,
}

impl QualityValidator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl QualityValidation for QualityValidator {
    fn policy(&self) -> &Policy {
        &self.policy
    }
}

pub fn validate_element(v: &mut Validation<'_>, element: &dyn QualityElement) {
    v.dispatch_items("nameOfMeasure", &element.names_of_measure());
    v.dispatch_field(
        "measureIdentification",
        element.measure_identification().as_deref(),
    );
    v.dispatch_field("measureDescription", element.measure_description().as_deref());

    let results = element.results();
    v.mandatory("QualityElement: results are mandatory", &results);
    for (index, result) in results.iter().enumerate() {
        v.at_item("result", index, |v| {
            let known = result.as_conformance_result().is_some()
                || result.as_quantitative_result().is_some();
            v.check(
                known,
                "QualityElement: a result must be a conformance or quantitative result",
            );
        });
    }
    v.dispatch_items("result", &results);
}

pub fn validate_conformance_result(v: &mut Validation<'_>, result: &dyn ConformanceResult) {
    let specification = result.specification();
    v.mandatory("ConformanceResult: specification is mandatory", &specification);
    v.dispatch_field("specification", specification.as_deref());

    let explanation = result.explanation();
    v.mandatory("ConformanceResult: explanation is mandatory", &explanation);
    v.dispatch_field("explanation", explanation.as_deref());

    v.mandatory("ConformanceResult: pass flag is mandatory", &result.pass());
}

pub fn validate_quantitative_result(v: &mut Validation<'_>, result: &dyn QuantitativeResult) {
    let values = result.values();
    v.mandatory("QuantitativeResult: values are mandatory", &values);
    for (index, value) in values.iter().enumerate() {
        if value.is_infinite() {
            v.fail_with(
                "QuantitativeResult: values must be finite or NaN",
                json!({ "index": index, "value": format!("{value:?}") }),
            );
        }
    }
    v.dispatch_field("errorStatistic", result.error_statistic().as_deref());
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use geoconform_model::Subject;
    use geoconform_model::toy::{
        ToyCitation, ToyConformanceResult, ToyIdentifier, ToyQualityElement,
        ToyQuantitativeResult, ToyText,
    };

    use crate::container::ValidatorContainer;

    fn accuracy(values: Vec<f64>) -> ToyQualityElement {
        let result: Arc<dyn Subject> = Arc::new(ToyQuantitativeResult {
            values,
            ..ToyQuantitativeResult::default()
        });
        ToyQualityElement {
            measure_identification: Some(Arc::new(ToyIdentifier::code("positional accuracy"))),
            results: vec![result],
            ..ToyQualityElement::default()
        }
    }

    #[test]
    fn quantitative_accuracy_passes() {
        let report = ValidatorContainer::new().validate(&accuracy(vec![0.5, f64::NAN]));
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    #[test]
    fn infinite_values_fail() {
        let report = ValidatorContainer::new().validate(&accuracy(vec![f64::INFINITY]));
        assert!(report.mentions("values must be finite or NaN"));
    }

    #[test]
    fn element_without_results_fails() {
        let report = ValidatorContainer::new().validate(&ToyQualityElement::default());
        assert!(report.mentions("QualityElement: results are mandatory"));
    }

    #[test]
    fn results_must_be_known_kinds() {
        let element = ToyQualityElement {
            results: vec![Arc::new(ToyText::new("passed")) as Arc<dyn Subject>],
            ..ToyQualityElement::default()
        };
        let report = ValidatorContainer::new().validate(&element);
        assert!(report.mentions("must be a conformance or quantitative result"));
    }

    #[test]
    fn conformance_result_needs_every_part() {
        let container = ValidatorContainer::new();
        let complete = ToyConformanceResult {
            specification: Some(Arc::new(ToyCitation::titled("ISO 19111"))),
            explanation: Some(ToyText::shared("All axes named")),
            pass: Some(true),
        };
        assert!(container.validate(&complete).is_accepted());

        let report = container.validate(&ToyConformanceResult::default());
        assert!(report.mentions("specification is mandatory"));
        assert!(report.mentions("explanation is mandatory"));
        assert!(report.mentions("pass flag is mandatory"));
    }
}
