//! Parameter descriptors and values, single and grouped.

use std::cmp::Ordering;
use std::sync::Arc;

use geoconform_model::{
    GeneralParameterDescriptor, GeneralParameterValue, ParamValue, ParameterDescriptor,
    ParameterDescriptorGroup, ParameterValue, ParameterValueGroup, same_instance,
};
use serde_json::json;

use super::referencing::validate_identified_object;
use crate::context::Validation;
use crate::policy::Policy;

pub trait ParameterValidation: Send + Sync {
    fn policy(&self) -> &Policy;

    fn validate_descriptor(&self, v: &mut Validation<'_>, descriptor: &dyn ParameterDescriptor) {
        validate_descriptor(v, descriptor);
    }

    fn validate_descriptor_group(
        &self,
        v: &mut Validation<'_>,
        group: &dyn ParameterDescriptorGroup,
    ) {
        validate_descriptor_group(v, group);
    }

    fn validate_value(&self, v: &mut Validation<'_>, value: &dyn ParameterValue) {
        validate_value(v, value);
    }

    fn validate_value_group(&self, v: &mut Validation<'_>, group: &dyn ParameterValueGroup) {
        validate_value_group(v, group);
    }
}

pub struct ParameterValidator {
    policy: Policy,
}

impl ParameterValidator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl ParameterValidation for ParameterValidator {
    fn policy(&self) -> &Policy {
        &self.policy
    }
}

fn code_of<T: GeneralParameterDescriptor + ?Sized>(descriptor: &T) -> Option<String> {
    descriptor.name().and_then(|name| name.code())
}

/// `value` lies within whichever of `minimum` and `maximum` are given.
/// Incomparable values (NaN, mixed kinds) are not judged here.
fn within(value: &ParamValue, minimum: Option<&ParamValue>, maximum: Option<&ParamValue>) -> bool {
    let below = minimum.is_some_and(|min| value.compare(min) == Some(Ordering::Less));
    let above = maximum.is_some_and(|max| value.compare(max) == Some(Ordering::Greater));
    !below && !above
}

pub fn validate_descriptor(v: &mut Validation<'_>, descriptor: &dyn ParameterDescriptor) {
    validate_identified_object(v, descriptor);

    let minimum_occurs = descriptor.minimum_occurs();
    let maximum_occurs = descriptor.maximum_occurs();
    if minimum_occurs > 1 {
        v.fail_with(
            "ParameterDescriptor: minimum occurrences must be 0 or 1",
            json!({ "minimumOccurs": minimum_occurs }),
        );
    }
    v.check_eq(
        1,
        maximum_occurs,
        "ParameterDescriptor: maximum occurrences must be 1",
    );

    let class = descriptor.value_class();
    v.mandatory("ParameterDescriptor: value class is mandatory", &class);
    let minimum = descriptor.minimum_value();
    let maximum = descriptor.maximum_value();
    let default = descriptor.default_value();

    if let Some(class) = class {
        for (index, value) in descriptor.valid_values().iter().enumerate() {
            v.at_item("validValues", index, |v| {
                v.check_instance_of(
                    value,
                    class,
                    "ParameterDescriptor: valid values must be instances of the value class",
                );
            });
        }
        for (field, value) in [
            ("defaultValue", &default),
            ("minimumValue", &minimum),
            ("maximumValue", &maximum),
        ] {
            if let Some(value) = value {
                v.at(field, |v| {
                    v.check_instance_of(
                        value,
                        class,
                        "ParameterDescriptor: value must be an instance of the value class",
                    );
                });
            }
        }
    }

    if let (Some(min), Some(max)) = (&minimum, &maximum) {
        if min.compare(max) == Some(Ordering::Greater) {
            v.fail_with(
                "ParameterDescriptor: minimum value must not exceed maximum value",
                json!({ "minimum": min, "maximum": max }),
            );
        }
    }
    if let Some(default) = &default {
        if !within(default, minimum.as_ref(), maximum.as_ref()) {
            v.at("defaultValue", |v| {
                v.fail_with(
                    "ParameterDescriptor: default value outside the descriptor range",
                    json!({ "default": default, "minimum": minimum, "maximum": maximum }),
                );
            });
        }
    }
}

pub fn validate_descriptor_group(v: &mut Validation<'_>, group: &dyn ParameterDescriptorGroup) {
    validate_identified_object(v, group);

    let minimum_occurs = group.minimum_occurs();
    let maximum_occurs = group.maximum_occurs();
    if minimum_occurs > maximum_occurs {
        v.fail_with(
            "ParameterDescriptorGroup: minimum occurrences must not exceed maximum occurrences",
            json!({ "minimumOccurs": minimum_occurs, "maximumOccurs": maximum_occurs }),
        );
    }

    let descriptors = group.descriptors();
    v.dispatch_items("descriptors", &descriptors);
    for (index, descriptor) in descriptors.iter().enumerate() {
        let Some(code) = code_of(descriptor.as_ref()) else {
            continue;
        };
        let found = group.descriptor(&code);
        v.at_item("descriptors", index, |v| {
            v.check(
                found.is_some_and(|found| found.equals(Some(descriptor.as_subject()))),
                "ParameterDescriptorGroup: lookup by name must find the listed descriptor",
            );
        });
    }
}

pub fn validate_value(v: &mut Validation<'_>, parameter: &dyn ParameterValue) {
    let descriptor = parameter.descriptor();
    v.mandatory("ParameterValue: descriptor is mandatory", &descriptor);
    v.dispatch_field("descriptor", descriptor.as_deref());
    let Some(descriptor) = descriptor else {
        return;
    };
    let Some(single) = descriptor.as_parameter_descriptor() else {
        v.at("descriptor", |v| {
            v.fail("ParameterValue: descriptor must describe a single parameter");
        });
        return;
    };

    let value = parameter.value();
    if descriptor.minimum_occurs() > 0 {
        v.mandatory("ParameterValue: value is mandatory", &value);
    }
    let Some(value) = value else {
        return;
    };
    v.at("value", |v| {
        if let Some(class) = single.value_class() {
            v.check_instance_of(
                &value,
                class,
                "ParameterValue: value must be an instance of the value class",
            );
        }
        let valid = single.valid_values();
        if !valid.is_empty() && !valid.contains(&value) {
            v.fail_with(
                "ParameterValue: value is not one of the valid values",
                json!({ "value": value, "validValues": valid }),
            );
        }
        let minimum = single.minimum_value();
        let maximum = single.maximum_value();
        if !within(&value, minimum.as_ref(), maximum.as_ref()) {
            v.fail_with(
                "ParameterValue: value outside the descriptor range",
                json!({ "value": value, "minimum": minimum, "maximum": maximum }),
            );
        }
    });

    if let (Some(unit), Some(expected)) = (parameter.unit(), single.unit()) {
        v.at("unit", |v| {
            v.check_eq(
                expected.dimension,
                unit.dimension,
                "ParameterValue: unit must measure the same quantity as the descriptor unit",
            );
        });
    }
}

pub fn validate_value_group(v: &mut Validation<'_>, group: &dyn ParameterValueGroup) {
    let descriptor = group.descriptor();
    v.mandatory("ParameterValueGroup: descriptor is mandatory", &descriptor);
    v.dispatch_field("descriptor", descriptor.as_deref());

    let values = group.values();
    v.dispatch_items("values", &values);

    if let Some(declared) = descriptor
        .as_ref()
        .and_then(|descriptor| descriptor.as_parameter_descriptor_group())
    {
        check_declared(v, declared, &values);
    } else if descriptor.is_some() {
        v.at("descriptor", |v| {
            v.fail("ParameterValueGroup: descriptor must describe a parameter group");
        });
    }

    for (index, value) in values.iter().enumerate() {
        let Some(code) = value.descriptor().and_then(|d| code_of(d.as_ref())) else {
            continue;
        };
        if value.as_parameter_value().is_none() {
            continue;
        }
        let found = group.parameter(&code);
        let agrees = found.is_some_and(|found| {
            values.iter().any(|listed| {
                same_instance(listed.as_subject(), found.as_subject())
                    && listed
                        .descriptor()
                        .and_then(|d| code_of(d.as_ref()))
                        .is_some_and(|listed_code| listed_code == code)
            })
        });
        v.at_item("values", index, |v| {
            v.check(
                agrees,
                "ParameterValueGroup: lookup by name must find a listed value of that name",
            );
        });
    }
}

/// Every value is declared by the group, and every declared parameter occurs
/// within its bounds.
fn check_declared(
    v: &mut Validation<'_>,
    declared: &dyn ParameterDescriptorGroup,
    values: &[Arc<dyn GeneralParameterValue>],
) {
    let descriptors = declared.descriptors();
    let mut counts = vec![0u32; descriptors.len()];
    for (index, value) in values.iter().enumerate() {
        let Some(own) = value.descriptor() else {
            continue;
        };
        let position = descriptors
            .iter()
            .position(|d| d.equals(Some(own.as_subject())));
        match position {
            Some(position) => counts[position] += 1,
            None => v.at_item("values", index, |v| {
                v.fail_with(
                    "ParameterValueGroup: value descriptor is not declared by the group",
                    json!({ "parameter": code_of(own.as_ref()) }),
                );
            }),
        }
    }
    for (descriptor, count) in descriptors.iter().zip(counts) {
        let minimum = descriptor.minimum_occurs();
        let maximum = descriptor.maximum_occurs();
        if count < minimum || count > maximum {
            v.fail_with(
                "ParameterValueGroup: parameter occurrences outside the declared bounds",
                json!({
                    "parameter": code_of(descriptor.as_ref()),
                    "count": count,
                    "minimumOccurs": minimum,
                    "maximumOccurs": maximum,
                }),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ValidatorContainer;
    use geoconform_model::ValueClass;
    use geoconform_model::toy::{
        ToyDescriptorGroup, ToyParameterDescriptor, ToyParameterValue, ToyValueGroup,
    };

    fn scale_factor() -> ToyParameterDescriptor {
        ToyParameterDescriptor::new("Scale factor at natural origin", ValueClass::Double)
            .bounded(ParamValue::Double(0.0), ParamValue::Double(10.0))
            .with_default(ParamValue::Double(1.0))
    }

    #[test]
    fn bounded_descriptor_passes() {
        let report = ValidatorContainer::new().validate(&scale_factor());
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    #[test]
    fn default_outside_range_fails() {
        let descriptor = scale_factor().with_default(ParamValue::Double(11.0));
        let report = ValidatorContainer::new().validate(&descriptor);
        assert!(report.mentions("default value outside the descriptor range"));
    }

    #[test]
    fn values_must_match_the_class() {
        let descriptor = scale_factor().with_default(ParamValue::Text("one".into()));
        let report = ValidatorContainer::new().validate(&descriptor);
        assert!(report.mentions("value must be an instance of the value class"));
    }

    #[test]
    fn repeated_parameter_fails() {
        let mut descriptor = scale_factor();
        descriptor.maximum_occurs = 2;
        let report = ValidatorContainer::new().validate(&descriptor);
        assert!(report.mentions("maximum occurrences must be 1"));
    }

    #[test]
    fn value_checks_range_and_class() {
        let descriptor: Arc<dyn GeneralParameterDescriptor> = Arc::new(scale_factor());
        let container = ValidatorContainer::new();

        let double = ToyParameterValue::new(descriptor.clone(), ParamValue::Double(2.0));
        assert!(container.validate(&double).is_accepted());

        let integer = ToyParameterValue::new(descriptor.clone(), ParamValue::Integer(2));
        assert!(
            container
                .validate(&integer)
                .mentions("value must be an instance of the value class")
        );

        let large = ToyParameterValue::new(descriptor.clone(), ParamValue::Double(20.0));
        assert!(container.validate(&large).mentions("value outside the descriptor range"));

        let mut missing = ToyParameterValue::new(descriptor, ParamValue::Double(1.0));
        missing.value = None;
        assert!(container.validate(&missing).mentions("ParameterValue: value is mandatory"));
    }

    #[test]
    fn value_must_be_a_valid_value() {
        let mut method = ToyParameterDescriptor::new("Method variant", ValueClass::Text);
        method.valid_values = vec![ParamValue::Text("A".into()), ParamValue::Text("B".into())];
        let value = ToyParameterValue::new(Arc::new(method), ParamValue::Text("C".into()));
        let report = ValidatorContainer::new().validate(&value);
        assert!(report.mentions("not one of the valid values"));
    }

    type Mercator = (
        Arc<ToyParameterDescriptor>,
        Arc<ToyParameterDescriptor>,
        Arc<ToyDescriptorGroup>,
    );

    fn mercator() -> Mercator {
        let latitude = Arc::new(ToyParameterDescriptor::new(
            "Latitude of natural origin",
            ValueClass::Double,
        ));
        let scale = Arc::new(scale_factor());
        let group = Arc::new(ToyDescriptorGroup::new(
            "Mercator",
            vec![
                latitude.clone() as Arc<dyn GeneralParameterDescriptor>,
                scale.clone() as Arc<dyn GeneralParameterDescriptor>,
            ],
        ));
        (latitude, scale, group)
    }

    #[test]
    fn complete_value_group_passes() {
        let (latitude, scale, group) = mercator();
        let values = ToyValueGroup {
            descriptor: Some(group as Arc<dyn GeneralParameterDescriptor>),
            values: vec![
                Arc::new(ToyParameterValue::new(latitude, ParamValue::Double(0.0))),
                Arc::new(ToyParameterValue::new(scale, ParamValue::Double(0.9996))),
            ],
        };
        let report = ValidatorContainer::new().validate(&values);
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    #[test]
    fn missing_and_foreign_parameters_fail() {
        let (latitude, _, group) = mercator();
        let foreign = Arc::new(ToyParameterDescriptor::new("False easting", ValueClass::Double));
        let values = ToyValueGroup {
            descriptor: Some(group as Arc<dyn GeneralParameterDescriptor>),
            values: vec![
                Arc::new(ToyParameterValue::new(latitude, ParamValue::Double(0.0))),
                Arc::new(ToyParameterValue::new(foreign, ParamValue::Double(500_000.0))),
            ],
        };
        let report = ValidatorContainer::new().validate(&values);
        assert!(report.mentions("value descriptor is not declared by the group"));
        assert!(report.mentions("parameter occurrences outside the declared bounds"));
    }

    #[test]
    fn descriptor_group_lookup_passes() {
        let (_, _, group) = mercator();
        let report = ValidatorContainer::new().validate(group.as_ref());
        assert!(report.is_accepted(), "{:?}", report.failures);
    }
}
