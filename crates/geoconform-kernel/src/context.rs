//! Per-call validation state.

use std::collections::HashSet;
use std::sync::Arc;

use geoconform_model::{AsSubject, ObjectKey, Subject};

use crate::category::Category;
use crate::container::ValidatorContainer;
use crate::policy::Policy;
use crate::report::{Failure, Warning};
use crate::sink::Sink;

/// State of one top-level validation call: where the walk is, which objects
/// are being validated on the current path, and where records go.
///
/// Validators are stateless; everything that changes during a walk lives
/// here and is dropped when the call returns.
pub struct Validation<'c> {
    container: &'c ValidatorContainer,
    sink: &'c mut dyn Sink,
    active: HashSet<ObjectKey>,
    segments: Vec<String>,
    depth: usize,
    category: Category,
}

impl<'c> Validation<'c> {
    pub fn new(container: &'c ValidatorContainer, sink: &'c mut dyn Sink) -> Self {
        Self {
            container,
            sink,
            active: HashSet::new(),
            segments: Vec::new(),
            depth: 0,
            category: Category::Crs,
        }
    }

    pub fn container(&self) -> &'c ValidatorContainer {
        self.container
    }

    /// Category whose checks are running.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Policy of the running category.
    pub fn policy(&self) -> Policy {
        *self.container.policy_of(self.category)
    }

    pub fn tolerance(&self) -> f64 {
        self.policy().tolerance
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// JSON-path-like location of the object being checked.
    pub fn path(&self) -> String {
        let mut path = String::from("$");
        for segment in &self.segments {
            path.push_str(segment);
        }
        path
    }

    pub(crate) fn record_failure(&mut self, failure: Failure) {
        self.sink.record_failure(failure);
    }

    pub(crate) fn record_warning(&mut self, warning: Warning) {
        self.sink.record_warning(warning);
    }

    /// Runs `f` with `field` appended to the path.
    pub fn at<R>(&mut self, field: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        self.segments.push(format!(".{field}"));
        let out = f(self);
        self.segments.pop();
        out
    }

    /// Runs `f` with `field[index]` appended to the path.
    pub fn at_item<R>(&mut self, field: &str, index: usize, f: impl FnOnce(&mut Self) -> R) -> R {
        self.segments.push(format!(".{field}[{index}]"));
        let out = f(self);
        self.segments.pop();
        out
    }

    /// Runs `f` with the checks attributed to `category`.
    pub fn in_category<R>(&mut self, category: Category, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = std::mem::replace(&mut self.category, category);
        let out = f(self);
        self.category = previous;
        out
    }

    /// Dispatches a nested object found under `field`. `None` is a no-op.
    pub fn dispatch_field<T: AsSubject + ?Sized>(&mut self, field: &str, value: Option<&T>) {
        if let Some(value) = value {
            self.at(field, |v| v.dispatch(value.as_subject()));
        }
    }

    /// Dispatches every element of a collection found under `field`.
    pub fn dispatch_items<T: AsSubject + ?Sized>(&mut self, field: &str, values: &[Arc<T>]) {
        for (index, value) in values.iter().enumerate() {
            self.at_item(field, index, |v| v.dispatch((**value).as_subject()));
        }
    }

    /// Whether `subject` is being validated higher up the current path.
    pub fn is_active(&self, subject: &dyn Subject) -> bool {
        self.active.contains(&ObjectKey::of(subject))
    }

    /// Marks `subject` active for the duration of `f`. Returns `None`
    /// without running `f` when it already is.
    pub(crate) fn enter<R>(
        &mut self,
        subject: &dyn Subject,
        f: impl FnOnce(&mut Self) -> R,
    ) -> Option<R> {
        let key = ObjectKey::of(subject);
        if !self.active.insert(key) {
            return None;
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        self.active.remove(&key);
        Some(out)
    }
}
