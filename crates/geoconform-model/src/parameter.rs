//! Operation parameters: descriptors and values.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::referencing::IdentifiedObject;
use crate::subject::Subject;
use crate::text::Unit;

/// Declared type of a parameter's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueClass {
    Boolean,
    Integer,
    Double,
    Text,
    IntegerList,
    DoubleList,
}

/// A parameter value tagged with its runtime type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Text(String),
    IntegerList(Vec<i64>),
    DoubleList(Vec<f64>),
}

impl ParamValue {
    pub fn value_class(&self) -> ValueClass {
        match self {
            Self::Boolean(_) => ValueClass::Boolean,
            Self::Integer(_) => ValueClass::Integer,
            Self::Double(_) => ValueClass::Double,
            Self::Text(_) => ValueClass::Text,
            Self::IntegerList(_) => ValueClass::IntegerList,
            Self::DoubleList(_) => ValueClass::DoubleList,
        }
    }

    /// Whether this value may be stored in a parameter declared with `class`.
    /// The classes must match exactly.
    pub fn is_instance_of(&self, class: ValueClass) -> bool {
        self.value_class() == class
    }

    /// Numeric view of scalar values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Order between comparable values: numbers with numbers, text with
    /// text. `None` when the values are not comparable or one is NaN.
    pub fn compare(&self, other: &ParamValue) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Boolean(a), Self::Boolean(b)) => Some(a.cmp(b)),
            _ => self.as_f64()?.partial_cmp(&other.as_f64()?),
        }
    }
}

/// Base of parameter descriptors. Concrete kinds answer
/// `as_parameter_descriptor` or `as_parameter_descriptor_group`.
pub trait GeneralParameterDescriptor: IdentifiedObject {
    fn minimum_occurs(&self) -> u32;
    fn maximum_occurs(&self) -> u32;
}

pub trait ParameterDescriptor: GeneralParameterDescriptor {
    fn value_class(&self) -> Option<ValueClass>;
    fn valid_values(&self) -> Vec<ParamValue>;
    fn default_value(&self) -> Option<ParamValue>;
    fn minimum_value(&self) -> Option<ParamValue>;
    fn maximum_value(&self) -> Option<ParamValue>;
    fn unit(&self) -> Option<Unit>;
}

pub trait ParameterDescriptorGroup: GeneralParameterDescriptor {
    fn descriptors(&self) -> Vec<Arc<dyn GeneralParameterDescriptor>>;

    /// Looks a member up by the code of its name.
    fn descriptor(&self, name: &str) -> Option<Arc<dyn GeneralParameterDescriptor>>;
}

/// Base of parameter values. Concrete kinds answer `as_parameter_value` or
/// `as_parameter_value_group`.
pub trait GeneralParameterValue: Subject {
    fn descriptor(&self) -> Option<Arc<dyn GeneralParameterDescriptor>>;
}

pub trait ParameterValue: GeneralParameterValue {
    fn value(&self) -> Option<ParamValue>;
    fn unit(&self) -> Option<Unit>;
}

pub trait ParameterValueGroup: GeneralParameterValue {
    fn values(&self) -> Vec<Arc<dyn GeneralParameterValue>>;

    /// Looks a single value up by the code of its descriptor's name.
    fn parameter(&self, name: &str) -> Option<Arc<dyn ParameterValue>>;
}
