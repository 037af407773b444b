//! Generic names and namespaces.
//!
//! A [`LocalName`] is a name of depth one; a [`ScopedName`] is a head local
//! name followed by a tail generic name. Every name lives in a [`NameSpace`],
//! and a non-global namespace is itself identified by a name.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::subject::Subject;
use crate::text::InternationalString;

pub trait GenericName: Subject {
    /// The namespace this name is declared in.
    fn scope(&self) -> Option<Arc<dyn NameSpace>>;

    /// Number of local names in [`GenericName::parsed_names`].
    fn depth(&self) -> usize;

    /// The sequence of local names making this name.
    fn parsed_names(&self) -> Vec<Arc<dyn LocalName>>;

    fn head(&self) -> Option<Arc<dyn LocalName>>;

    fn tip(&self) -> Option<Arc<dyn LocalName>>;

    /// This name prefixed by the names of its enclosing namespaces.
    fn to_fully_qualified_name(&self) -> Option<Arc<dyn GenericName>>;

    fn to_plain_string(&self) -> String;

    fn to_international_string(&self) -> Option<Arc<dyn InternationalString>>;

    /// Lexicographic comparison on parsed names.
    fn compare_to(&self, other: &dyn GenericName) -> Ordering;
}

pub trait LocalName: GenericName {}

pub trait ScopedName: GenericName {
    /// Every name but the head, in the head's namespace.
    fn tail(&self) -> Option<Arc<dyn GenericName>>;

    /// Every name but the tip.
    fn path(&self) -> Option<Arc<dyn GenericName>>;
}

/// The name of a data type.
pub trait TypeName: LocalName {}

/// The name of a record member, with the type of its values.
pub trait MemberName: LocalName {
    fn attribute_type(&self) -> Option<Arc<dyn TypeName>>;
}

pub trait NameSpace: Subject {
    fn is_global(&self) -> bool;

    /// The name identifying this namespace. For a well-formed namespace it is
    /// fully qualified and has a global scope.
    fn name(&self) -> Option<Arc<dyn GenericName>>;
}
