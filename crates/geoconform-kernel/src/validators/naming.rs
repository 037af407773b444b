//! International strings, generic names and namespaces.
//!
//! Local, scoped and member names share one structural routine
//! ([`validate_name_structure`]). It reads the scope but never dispatches
//! it, so validating a namespace's name cannot recurse back into the
//! namespace.

use std::cmp::Ordering;

use geoconform_model::{
    GenericName, InternationalString, LocalName, MemberName, NameSpace, ScopedName, Subject,
    same_instance,
};
use serde_json::json;

use crate::context::Validation;
use crate::policy::Policy;

pub trait NamingValidation: Send + Sync {
    fn policy(&self) -> &Policy;

    fn validate_international_string(&self, v: &mut Validation<'_>, text: &dyn InternationalString) {
        validate_international_string(v, text);
    }

    /// A name that is neither local nor scoped.
    fn validate_generic_name(&self, v: &mut Validation<'_>, name: &dyn GenericName) {
        validate_name_structure(v, name);
    }

    fn validate_local_name(&self, v: &mut Validation<'_>, name: &dyn LocalName) {
        validate_local_name(v, name);
    }

    fn validate_scoped_name(&self, v: &mut Validation<'_>, name: &dyn ScopedName) {
        validate_scoped_name(v, name);
    }

    fn validate_member_name(&self, v: &mut Validation<'_>, name: &dyn MemberName) {
        validate_member_name(v, name);
    }

    fn validate_name_space(&self, v: &mut Validation<'_>, space: &dyn NameSpace) {
        validate_name_space(v, space);
    }
}

pub struct NamingValidator {
    policy: Policy,
}

impl NamingValidator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl NamingValidation for NamingValidator {
    fn policy(&self) -> &Policy {
        &self.policy
    }
}

pub fn validate_international_string(v: &mut Validation<'_>, text: &dyn InternationalString) {
    let plain = text.to_plain_string();
    v.check_eq(
        plain.as_str(),
        text.to_localized(None).as_str(),
        "InternationalString: the root locale form must be the plain string",
    );
    v.check_eq(
        plain.chars().count(),
        text.char_count(),
        "InternationalString: character count must match the plain string",
    );
    v.check(
        text.equals(Some(text.as_subject())),
        "InternationalString: must be equal to itself",
    );
}

/// The generic-name view of a subject that claims to be a name.
fn generic_view<'a>(v: &mut Validation<'_>, subject: &'a dyn Subject) -> Option<&'a dyn GenericName> {
    let generic = subject.as_generic_name();
    v.check(
        generic.is_some(),
        "GenericName: a local, scoped or member name must answer the generic name facet",
    );
    generic
}

/// Checks shared by every kind of name.
pub fn validate_name_structure(v: &mut Validation<'_>, name: &dyn GenericName) {
    let scope = name.scope();
    v.mandatory("GenericName: scope is mandatory", &scope);

    let parsed = name.parsed_names();
    if v.mandatory("GenericName: parsed names are mandatory", &parsed) {
        v.check_eq(
            name.depth(),
            parsed.len(),
            "GenericName: depth must be the number of parsed names",
        );
        v.at("head", |v| match (parsed.first(), name.head()) {
            (Some(first), Some(head)) => {
                v.check(
                    first.equals(Some(head.as_subject())),
                    "GenericName: head must be the first parsed name",
                );
            }
            (_, head) => {
                v.mandatory("GenericName: head is mandatory", &head);
            }
        });
        v.at("tip", |v| match (parsed.last(), name.tip()) {
            (Some(last), Some(tip)) => {
                v.check(
                    last.equals(Some(tip.as_subject())),
                    "GenericName: tip must be the last parsed name",
                );
            }
            (_, tip) => {
                v.mandatory("GenericName: tip is mandatory", &tip);
            }
        });
    }

    let plain = name.to_plain_string();
    let fully_qualified = name.to_fully_qualified_name();
    v.mandatory("GenericName: fully qualified name is mandatory", &fully_qualified);
    if let Some(fq) = fully_qualified {
        v.at("fullyQualifiedName", |v| {
            let global = scope.as_ref().is_some_and(|s| s.is_global());
            let equal = fq.equals(Some(name.as_subject()));
            if global {
                v.check(
                    equal,
                    "GenericName: a name in the global namespace must be its own fully qualified name",
                );
            } else {
                v.check(
                    !equal,
                    "GenericName: a name outside the global namespace must differ from its fully qualified name",
                );
            }
            let fq_plain = fq.to_plain_string();
            if !fq_plain.ends_with(&plain) {
                v.fail_with(
                    "GenericName: fully qualified string must end with the name string",
                    json!({ "name": plain, "fullyQualified": fq_plain }),
                );
            }
            if let (Some(own), Some(qualified)) =
                (name.to_international_string(), fq.to_international_string())
            {
                let own = own.to_localized(None);
                let qualified = qualified.to_localized(None);
                if !qualified.ends_with(&own) {
                    v.fail_with(
                        "GenericName: localized fully qualified string must end with the localized name string",
                        json!({ "name": own, "fullyQualified": qualified }),
                    );
                }
            }
        });
    }

    v.check(
        name.equals(Some(name.as_subject())),
        "GenericName: must be equal to itself",
    );
    v.check_eq(
        Ordering::Equal,
        name.compare_to(name),
        "GenericName: must compare equal to itself",
    );
    v.dispatch_field("internationalString", name.to_international_string().as_deref());
}

pub fn validate_local_name(v: &mut Validation<'_>, name: &dyn LocalName) {
    if let Some(generic) = generic_view(v, name.as_subject()) {
        validate_name_structure(v, generic);
    }
    v.check_eq(1, name.depth(), "LocalName: depth must be 1");
}

pub fn validate_scoped_name(v: &mut Validation<'_>, name: &dyn ScopedName) {
    let Some(generic) = generic_view(v, name.as_subject()) else {
        return;
    };
    validate_name_structure(v, generic);

    let depth = name.depth();
    let parsed = name.parsed_names();
    if let (Some(head), Some(own_scope)) = (name.head(), name.scope()) {
        let head_scope = head.scope();
        v.check(
            head_scope.is_some_and(|s| s.equals(Some(own_scope.as_subject()))),
            "ScopedName: head scope must be the name scope",
        );
    }
    for (index, local) in parsed.iter().enumerate().skip(1) {
        v.at_item("parsedNames", index, |v| {
            v.check(
                !local.scope().is_some_and(|s| s.is_global()),
                "ScopedName: only the first parsed name may be in the global namespace",
            );
        });
    }

    v.at("tail", |v| {
        let tail = name.tail();
        v.mandatory("ScopedName: tail is mandatory", &tail);
        if let Some(tail) = tail {
            check_sublist(v, tail.as_ref(), parsed.get(1..).unwrap_or_default(), depth);
        }
    });
    v.at("path", |v| {
        let path = name.path();
        v.mandatory("ScopedName: path is mandatory", &path);
        if let Some(path) = path {
            let end = parsed.len().saturating_sub(1);
            check_sublist(v, path.as_ref(), &parsed[..end], depth);
        }
    });
}

/// `part` has depth `depth - 1` and parses into `expected`.
fn check_sublist(
    v: &mut Validation<'_>,
    part: &dyn GenericName,
    expected: &[std::sync::Arc<dyn LocalName>],
    depth: usize,
) {
    v.check_eq(
        depth.saturating_sub(1),
        part.depth(),
        "ScopedName: tail and path depth must be one less than the name depth",
    );
    let actual = part.parsed_names();
    let matches = actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected)
            .all(|(a, e)| a.equals(Some(e.as_subject())));
    v.check(
        matches,
        "ScopedName: tail and path must parse into the matching parsed names",
    );
}

pub fn validate_member_name(v: &mut Validation<'_>, name: &dyn MemberName) {
    if let Some(generic) = generic_view(v, name.as_subject()) {
        validate_name_structure(v, generic);
    }
    v.check_eq(1, name.depth(), "MemberName: depth must be 1");
    let attribute_type = name.attribute_type();
    v.mandatory("MemberName: attribute type is mandatory", &attribute_type);
    v.dispatch_field("attributeType", attribute_type.as_deref());
}

pub fn validate_name_space(v: &mut Validation<'_>, space: &dyn NameSpace) {
    let name = space.name();
    if !v.mandatory("NameSpace: name is mandatory", &name) {
        return;
    }
    let Some(name) = name else {
        return;
    };
    v.at("name", |v| {
        v.check(
            name.scope().is_some_and(|s| s.is_global()),
            "NameSpace: the namespace name must be in the global namespace",
        );
        let fq = name.to_fully_qualified_name();
        v.check(
            fq.is_some_and(|fq| same_instance(fq.as_subject(), name.as_subject())),
            "NameSpace: the namespace name must be its own fully qualified name",
        );
        if !space.is_global() {
            validate_name_structure(v, name.as_ref());
        }
    });
}
