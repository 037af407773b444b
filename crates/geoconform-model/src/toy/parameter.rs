use std::sync::Arc;

use crate::parameter::{
    GeneralParameterDescriptor, GeneralParameterValue, ParamValue, ParameterDescriptor,
    ParameterDescriptorGroup, ParameterValue, ParameterValueGroup, ValueClass,
};
use crate::referencing::IdentifiedObject;
use crate::subject::Subject;
use crate::text::Unit;
use crate::toy::ToyProperties;
use crate::toy::referencing::identified_object;

fn code_of<T: IdentifiedObject + ?Sized>(object: &T) -> Option<String> {
    object.name().and_then(|name| name.code())
}

#[derive(Clone)]
pub struct ToyParameterDescriptor {
    pub properties: ToyProperties,
    pub minimum_occurs: u32,
    pub maximum_occurs: u32,
    pub value_class: Option<ValueClass>,
    pub valid_values: Vec<ParamValue>,
    pub default_value: Option<ParamValue>,
    pub minimum: Option<ParamValue>,
    pub maximum: Option<ParamValue>,
    pub unit: Option<Unit>,
}

impl ToyParameterDescriptor {
    /// A mandatory singleton parameter without range or default.
    pub fn new(name: &str, value_class: ValueClass) -> Self {
        Self {
            properties: ToyProperties::named(name),
            minimum_occurs: 1,
            maximum_occurs: 1,
            value_class: Some(value_class),
            valid_values: Vec::new(),
            default_value: None,
            minimum: None,
            maximum: None,
            unit: None,
        }
    }

    pub fn bounded(mut self, minimum: ParamValue, maximum: ParamValue) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    pub fn with_default(mut self, value: ParamValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

impl Subject for ToyParameterDescriptor {
    fn as_identified_object(&self) -> Option<&dyn IdentifiedObject> {
        Some(self)
    }

    fn as_parameter_descriptor(&self) -> Option<&dyn ParameterDescriptor> {
        Some(self)
    }
}

identified_object!(ToyParameterDescriptor);

impl GeneralParameterDescriptor for ToyParameterDescriptor {
    fn minimum_occurs(&self) -> u32 {
        self.minimum_occurs
    }

    fn maximum_occurs(&self) -> u32 {
        self.maximum_occurs
    }
}

impl ParameterDescriptor for ToyParameterDescriptor {
    fn value_class(&self) -> Option<ValueClass> {
        self.value_class
    }

    fn valid_values(&self) -> Vec<ParamValue> {
        self.valid_values.clone()
    }

    fn default_value(&self) -> Option<ParamValue> {
        self.default_value.clone()
    }

    fn minimum_value(&self) -> Option<ParamValue> {
        self.minimum.clone()
    }

    fn maximum_value(&self) -> Option<ParamValue> {
        self.maximum.clone()
    }

    fn unit(&self) -> Option<Unit> {
        self.unit.clone()
    }
}

pub struct ToyDescriptorGroup {
    pub properties: ToyProperties,
    pub minimum_occurs: u32,
    pub maximum_occurs: u32,
    pub descriptors: Vec<Arc<dyn GeneralParameterDescriptor>>,
}

impl ToyDescriptorGroup {
    pub fn new(name: &str, descriptors: Vec<Arc<dyn GeneralParameterDescriptor>>) -> Self {
        Self {
            properties: ToyProperties::named(name),
            minimum_occurs: 1,
            maximum_occurs: 1,
            descriptors,
        }
    }
}

impl Subject for ToyDescriptorGroup {
    fn as_identified_object(&self) -> Option<&dyn IdentifiedObject> {
        Some(self)
    }

    fn as_parameter_descriptor_group(&self) -> Option<&dyn ParameterDescriptorGroup> {
        Some(self)
    }
}

identified_object!(ToyDescriptorGroup);

impl GeneralParameterDescriptor for ToyDescriptorGroup {
    fn minimum_occurs(&self) -> u32 {
        self.minimum_occurs
    }

    fn maximum_occurs(&self) -> u32 {
        self.maximum_occurs
    }
}

impl ParameterDescriptorGroup for ToyDescriptorGroup {
    fn descriptors(&self) -> Vec<Arc<dyn GeneralParameterDescriptor>> {
        self.descriptors.clone()
    }

    fn descriptor(&self, name: &str) -> Option<Arc<dyn GeneralParameterDescriptor>> {
        self.descriptors
            .iter()
            .find(|d| code_of(&***d).as_deref() == Some(name))
            .cloned()
    }
}

pub struct ToyParameterValue {
    pub descriptor: Option<Arc<dyn GeneralParameterDescriptor>>,
    pub value: Option<ParamValue>,
    pub unit: Option<Unit>,
}

impl ToyParameterValue {
    pub fn new(descriptor: Arc<dyn GeneralParameterDescriptor>, value: ParamValue) -> Self {
        Self {
            descriptor: Some(descriptor),
            value: Some(value),
            unit: None,
        }
    }
}

impl Subject for ToyParameterValue {
    fn as_parameter_value(&self) -> Option<&dyn ParameterValue> {
        Some(self)
    }
}

impl GeneralParameterValue for ToyParameterValue {
    fn descriptor(&self) -> Option<Arc<dyn GeneralParameterDescriptor>> {
        self.descriptor.clone()
    }
}

impl ParameterValue for ToyParameterValue {
    fn value(&self) -> Option<ParamValue> {
        self.value.clone()
    }

    fn unit(&self) -> Option<Unit> {
        self.unit.clone()
    }
}

pub struct ToyValueGroup {
    pub descriptor: Option<Arc<dyn GeneralParameterDescriptor>>,
    pub values: Vec<Arc<ToyParameterValue>>,
}

impl Subject for ToyValueGroup {
    fn as_parameter_value_group(&self) -> Option<&dyn ParameterValueGroup> {
        Some(self)
    }
}

impl GeneralParameterValue for ToyValueGroup {
    fn descriptor(&self) -> Option<Arc<dyn GeneralParameterDescriptor>> {
        self.descriptor.clone()
    }
}

impl ParameterValueGroup for ToyValueGroup {
    fn values(&self) -> Vec<Arc<dyn GeneralParameterValue>> {
        self.values
            .iter()
            .map(|value| Arc::clone(value) as Arc<dyn GeneralParameterValue>)
            .collect()
    }

    fn parameter(&self, name: &str) -> Option<Arc<dyn ParameterValue>> {
        self.values
            .iter()
            .find(|value| {
                value
                    .descriptor
                    .as_ref()
                    .and_then(|d| code_of(&**d))
                    .as_deref()
                    == Some(name)
            })
            .map(|value| Arc::clone(value) as Arc<dyn ParameterValue>)
    }
}
