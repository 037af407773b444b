use std::cmp::Ordering;
use std::sync::{Arc, Weak};

use crate::naming::{GenericName, LocalName, MemberName, NameSpace, ScopedName, TypeName};
use crate::subject::{Subject, hash_text};
use crate::text::InternationalString;
use crate::toy::ToyText;

/// A name made of separator-delimited components, declared in the namespace
/// named by `prefix` (global when `prefix` is empty).
///
/// Derived names (parsed names, tail, path, scopes) are built on request.
/// A globally scoped name is its own fully-qualified form.
pub struct ToyName {
    prefix: Vec<String>,
    components: Vec<String>,
    separator: String,
    this: Weak<ToyName>,
}

impl ToyName {
    /// Parses `text` into a name in the global namespace.
    pub fn parse(text: &str, separator: &str) -> Arc<Self> {
        let components = text.split(separator).map(str::to_string).collect();
        Self::scoped(Vec::new(), components, separator)
    }

    /// A single-component name in the global namespace.
    pub fn local(text: &str) -> Arc<Self> {
        Self::scoped(Vec::new(), vec![text.to_string()], ":")
    }

    pub fn scoped(prefix: Vec<String>, components: Vec<String>, separator: &str) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            prefix,
            components,
            separator: separator.to_string(),
            this: this.clone(),
        })
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    fn derive(&self, prefix: Vec<String>, components: Vec<String>) -> Arc<Self> {
        Self::scoped(prefix, components, &self.separator)
    }

    fn qualified_components(&self) -> Vec<String> {
        self.prefix
            .iter()
            .chain(self.components.iter())
            .cloned()
            .collect()
    }

    fn qualified_string(&self) -> String {
        self.qualified_components().join(&self.separator)
    }

    fn local_at(&self, index: usize) -> Arc<Self> {
        let mut prefix = self.prefix.clone();
        prefix.extend_from_slice(&self.components[..index]);
        self.derive(prefix, vec![self.components[index].clone()])
    }
}

impl Subject for ToyName {
    fn equals(&self, other: Option<&dyn Subject>) -> bool {
        let Some(other) = other.and_then(|o| o.as_generic_name()) else {
            return false;
        };
        other.depth() == self.depth()
            && other.to_plain_string() == self.to_plain_string()
            && other
                .to_fully_qualified_name()
                .is_some_and(|fq| fq.to_plain_string() == self.qualified_string())
    }

    fn hash_code(&self) -> i32 {
        hash_text(&self.qualified_string())
    }

    fn as_generic_name(&self) -> Option<&dyn GenericName> {
        Some(self)
    }

    fn as_local_name(&self) -> Option<&dyn LocalName> {
        (self.components.len() == 1).then_some(self as &dyn LocalName)
    }

    fn as_scoped_name(&self) -> Option<&dyn ScopedName> {
        (self.components.len() > 1).then_some(self as &dyn ScopedName)
    }
}

impl GenericName for ToyName {
    fn scope(&self) -> Option<Arc<dyn NameSpace>> {
        if self.prefix.is_empty() {
            return Some(Arc::new(ToyNameSpace::global()));
        }
        let name = self.derive(Vec::new(), self.prefix.clone());
        Some(Arc::new(ToyNameSpace::named(name)))
    }

    fn depth(&self) -> usize {
        self.components.len()
    }

    fn parsed_names(&self) -> Vec<Arc<dyn LocalName>> {
        (0..self.components.len())
            .map(|i| self.local_at(i) as Arc<dyn LocalName>)
            .collect()
    }

    fn head(&self) -> Option<Arc<dyn LocalName>> {
        (!self.components.is_empty()).then(|| self.local_at(0) as Arc<dyn LocalName>)
    }

    fn tip(&self) -> Option<Arc<dyn LocalName>> {
        let last = self.components.len().checked_sub(1)?;
        Some(self.local_at(last))
    }

    fn to_fully_qualified_name(&self) -> Option<Arc<dyn GenericName>> {
        if self.prefix.is_empty() {
            return self.this.upgrade().map(|this| this as Arc<dyn GenericName>);
        }
        Some(self.derive(Vec::new(), self.qualified_components()))
    }

    fn to_plain_string(&self) -> String {
        self.components.join(&self.separator)
    }

    fn to_international_string(&self) -> Option<Arc<dyn InternationalString>> {
        Some(ToyText::shared(self.to_plain_string()))
    }

    fn compare_to(&self, other: &dyn GenericName) -> Ordering {
        let theirs: Vec<String> = other
            .parsed_names()
            .iter()
            .map(|name| name.to_plain_string())
            .collect();
        self.components.iter().cmp(theirs.iter())
    }
}

impl LocalName for ToyName {}

impl TypeName for ToyName {}

impl ScopedName for ToyName {
    fn tail(&self) -> Option<Arc<dyn GenericName>> {
        if self.components.len() < 2 {
            return None;
        }
        let mut prefix = self.prefix.clone();
        prefix.push(self.components[0].clone());
        Some(self.derive(prefix, self.components[1..].to_vec()))
    }

    fn path(&self) -> Option<Arc<dyn GenericName>> {
        if self.components.len() < 2 {
            return None;
        }
        let end = self.components.len() - 1;
        Some(self.derive(self.prefix.clone(), self.components[..end].to_vec()))
    }
}

/// A namespace: either the global one or one identified by a name.
pub struct ToyNameSpace {
    pub global: bool,
    pub name: Option<Arc<dyn GenericName>>,
}

impl ToyNameSpace {
    pub fn global() -> Self {
        Self {
            global: true,
            name: Some(ToyName::local("global")),
        }
    }

    pub fn named(name: Arc<dyn GenericName>) -> Self {
        Self {
            global: false,
            name: Some(name),
        }
    }
}

impl Subject for ToyNameSpace {
    fn equals(&self, other: Option<&dyn Subject>) -> bool {
        let Some(other) = other.and_then(|o| o.as_name_space()) else {
            return false;
        };
        if other.is_global() != self.global {
            return false;
        }
        match (&self.name, other.name()) {
            (None, None) => true,
            (Some(mine), Some(theirs)) => mine.equals(Some(theirs.as_subject())),
            _ => false,
        }
    }

    fn hash_code(&self) -> i32 {
        let name_hash = self.name.as_ref().map_or(0, |n| n.hash_code());
        name_hash.wrapping_mul(31).wrapping_add(i32::from(self.global))
    }

    fn as_name_space(&self) -> Option<&dyn NameSpace> {
        Some(self)
    }
}

impl NameSpace for ToyNameSpace {
    fn is_global(&self) -> bool {
        self.global
    }

    fn name(&self) -> Option<Arc<dyn GenericName>> {
        self.name.clone()
    }
}

/// A record member name with the type of its values.
pub struct ToyMemberName {
    pub name: Arc<ToyName>,
    pub attribute_type: Option<Arc<dyn TypeName>>,
}

impl ToyMemberName {
    pub fn new(member: &str, attribute_type: &str) -> Self {
        Self {
            name: ToyName::local(member),
            attribute_type: Some(ToyName::local(attribute_type)),
        }
    }
}

impl Subject for ToyMemberName {
    fn equals(&self, other: Option<&dyn Subject>) -> bool {
        self.name.equals(other)
    }

    fn hash_code(&self) -> i32 {
        self.name.hash_code()
    }

    fn as_generic_name(&self) -> Option<&dyn GenericName> {
        Some(self)
    }

    fn as_local_name(&self) -> Option<&dyn LocalName> {
        Some(self)
    }

    fn as_member_name(&self) -> Option<&dyn MemberName> {
        Some(self)
    }
}

impl GenericName for ToyMemberName {
    fn scope(&self) -> Option<Arc<dyn NameSpace>> {
        self.name.scope()
    }

    fn depth(&self) -> usize {
        self.name.depth()
    }

    fn parsed_names(&self) -> Vec<Arc<dyn LocalName>> {
        self.name.parsed_names()
    }

    fn head(&self) -> Option<Arc<dyn LocalName>> {
        self.name.head()
    }

    fn tip(&self) -> Option<Arc<dyn LocalName>> {
        self.name.tip()
    }

    fn to_fully_qualified_name(&self) -> Option<Arc<dyn GenericName>> {
        self.name.to_fully_qualified_name()
    }

    fn to_plain_string(&self) -> String {
        self.name.to_plain_string()
    }

    fn to_international_string(&self) -> Option<Arc<dyn InternationalString>> {
        self.name.to_international_string()
    }

    fn compare_to(&self, other: &dyn GenericName) -> Ordering {
        self.name.compare_to(other)
    }
}

impl LocalName for ToyMemberName {}

impl MemberName for ToyMemberName {
    fn attribute_type(&self) -> Option<Arc<dyn TypeName>> {
        self.attribute_type.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::AsSubject;

    #[test]
    fn parsed_structure_of_three_components() {
        let name = ToyName::parse("a:b:c", ":");
        assert_eq!(name.depth(), 3);
        assert_eq!(name.head().map(|h| h.to_plain_string()).as_deref(), Some("a"));
        assert_eq!(name.tip().map(|t| t.to_plain_string()).as_deref(), Some("c"));

        let tail = name.tail().expect("tail of a scoped name");
        let path = name.path().expect("path of a scoped name");
        assert_eq!(tail.depth(), 2);
        assert_eq!(path.depth(), 2);
        assert_eq!(tail.to_plain_string(), "b:c");
        assert_eq!(path.to_plain_string(), "a:b");

        let outer_tip = name.tip().expect("tip");
        let tail_tip = tail.tip().expect("tail tip");
        assert!(tail_tip.equals(Some(outer_tip.as_subject())));
    }

    #[test]
    fn scopes_and_fully_qualified_forms() {
        let name = ToyName::parse("a:b:c", ":");
        let fq = name.to_fully_qualified_name().expect("fq");
        assert!(crate::subject::same_instance(fq.as_subject(), name.as_subject()));

        let tail = name.tail().expect("tail");
        let scope = tail.scope().expect("scope");
        assert!(!scope.is_global());
        assert_eq!(
            scope.name().map(|n| n.to_plain_string()).as_deref(),
            Some("a")
        );
        let tail_fq = tail.to_fully_qualified_name().expect("tail fq");
        assert_eq!(tail_fq.to_plain_string(), "a:b:c");
        assert!(!tail_fq.equals(Some(tail.as_subject())));
    }

    #[test]
    fn only_the_first_parsed_name_is_global() {
        let name = ToyName::parse("a:b:c", ":");
        let globals: Vec<bool> = name
            .parsed_names()
            .iter()
            .map(|n| n.scope().is_some_and(|s| s.is_global()))
            .collect();
        assert_eq!(globals, vec![true, false, false]);
    }
}
