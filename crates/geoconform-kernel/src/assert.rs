//! Assertion primitives shared by every validator.
//!
//! Each primitive records at most one failure and reports whether the check
//! held, so callers can skip dependent checks without aborting the walk.

use std::fmt::Debug;

use geoconform_model::{ParamValue, Subject, ValueClass, same_instance};
use serde_json::{Value, json};

use crate::context::Validation;
use crate::report::{Failure, FailureKind};

/// Floating-point agreement with the usual test-framework semantics: equal
/// bit patterns (so NaN matches NaN) or a difference within `tolerance`.
pub fn approx_eq(expected: f64, actual: f64, tolerance: f64) -> bool {
    expected.to_bits() == actual.to_bits() || (expected - actual).abs() <= tolerance
}

impl Validation<'_> {
    pub fn fail(&mut self, message: impl Into<String>) {
        self.raise(FailureKind::HardFailure, message.into(), None);
    }

    pub fn fail_with(&mut self, message: impl Into<String>, details: Value) {
        self.raise(FailureKind::HardFailure, message.into(), Some(details));
    }

    /// Records a cross-field violation found by combining several accessors.
    pub fn structural(&mut self, message: impl Into<String>, details: Value) {
        self.raise(
            FailureKind::StructuralInconsistency,
            message.into(),
            Some(details),
        );
    }

    fn raise(&mut self, kind: FailureKind, message: String, details: Option<Value>) {
        let mut failure = Failure::new(kind, self.category(), message, self.path());
        if let Some(details) = details {
            failure = failure.with_details(details);
        }
        self.record_failure(failure);
    }

    pub fn check(&mut self, condition: bool, message: &str) -> bool {
        if !condition {
            self.fail(message);
        }
        condition
    }

    pub fn check_eq<T: PartialEq + Debug>(&mut self, expected: T, actual: T, message: &str) -> bool {
        let holds = expected == actual;
        if !holds {
            self.fail_with(
                message,
                json!({
                    "expected": format!("{expected:?}"),
                    "actual": format!("{actual:?}"),
                }),
            );
        }
        holds
    }

    /// Like [`Validation::check_eq`] but reported as a structural
    /// inconsistency.
    pub fn check_consistent<T: PartialEq + Debug>(
        &mut self,
        expected: T,
        actual: T,
        message: &str,
    ) -> bool {
        let holds = expected == actual;
        if !holds {
            self.structural(
                message,
                json!({
                    "expected": format!("{expected:?}"),
                    "actual": format!("{actual:?}"),
                }),
            );
        }
        holds
    }

    /// See [`approx_eq`].
    pub fn check_approx(&mut self, expected: f64, actual: f64, tolerance: f64, message: &str) -> bool {
        let holds = approx_eq(expected, actual, tolerance);
        if !holds {
            self.fail_with(
                message,
                json!({
                    "expected": format!("{expected:?}"),
                    "actual": format!("{actual:?}"),
                    "tolerance": format!("{tolerance:?}"),
                }),
            );
        }
        holds
    }

    /// `minimum ≤ value ≤ maximum`. NaN on either side never fails.
    pub fn check_between(&mut self, value: f64, minimum: f64, maximum: f64, message: &str) -> bool {
        let holds = !(value < minimum || value > maximum);
        if !holds {
            self.fail_with(
                message,
                json!({
                    "value": format!("{value:?}"),
                    "minimum": format!("{minimum:?}"),
                    "maximum": format!("{maximum:?}"),
                }),
            );
        }
        holds
    }

    pub fn check_strictly_positive(&mut self, value: f64, message: &str) -> bool {
        let holds = value > 0.0;
        if !holds {
            self.fail_with(message, json!({ "value": format!("{value:?}") }));
        }
        holds
    }

    pub fn check_some<T>(&mut self, value: &Option<T>, message: &str) -> bool {
        self.check(value.is_some(), message)
    }

    pub fn check_none<T>(&mut self, value: &Option<T>, message: &str) -> bool {
        self.check(value.is_none(), message)
    }

    /// Both references designate the same object.
    pub fn check_same(&mut self, expected: &dyn Subject, actual: &dyn Subject, message: &str) -> bool {
        self.check(same_instance(expected, actual), message)
    }

    /// `value` may be stored in a parameter declared with `class`.
    pub fn check_instance_of(&mut self, value: &ParamValue, class: ValueClass, message: &str) -> bool {
        let holds = value.is_instance_of(class);
        if !holds {
            self.fail_with(
                message,
                json!({
                    "expectedClass": class,
                    "actualClass": value.value_class(),
                }),
            );
        }
        holds
    }
}
