//! Data quality reports.

use std::sync::Arc;

use crate::metadata::{Citation, Identifier};
use crate::subject::Subject;
use crate::text::{InternationalString, Unit};

/// One evaluated aspect of quality, e.g. the positional accuracy of a
/// coordinate operation.
pub trait QualityElement: Subject {
    fn names_of_measure(&self) -> Vec<Arc<dyn InternationalString>>;
    fn measure_identification(&self) -> Option<Arc<dyn Identifier>>;
    fn measure_description(&self) -> Option<Arc<dyn InternationalString>>;
    /// Each result answers one of the result facets
    /// (`as_conformance_result`, `as_quantitative_result`).
    fn results(&self) -> Vec<Arc<dyn Subject>>;
}

pub trait ConformanceResult: Subject {
    fn specification(&self) -> Option<Arc<dyn Citation>>;
    fn explanation(&self) -> Option<Arc<dyn InternationalString>>;
    fn pass(&self) -> Option<bool>;
}

pub trait QuantitativeResult: Subject {
    fn values(&self) -> Vec<f64>;
    fn value_unit(&self) -> Option<Unit>;
    fn error_statistic(&self) -> Option<Arc<dyn InternationalString>>;
}
