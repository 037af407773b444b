//! The equivalence-law check over a collection of subjects.
//!
//! The check only calls `equals` and `hash_code` on the subjects, since
//! those are what it tests. For the non-null elements `a`, `b`:
//!
//! 1. `a.equals(a)`
//! 2. `!a.equals(null)`
//! 3. `a.equals(b)` implies `hash(a) == hash(b)`
//! 4. every member of `{x : a.equals(x)}` sees exactly that set (symmetry
//!    and transitivity at once)
//! 5. `hash(a)` is the same on two separate reads
//!
//! Hashes are read once up front, `equals` is evaluated for every ordered
//! pair into one bitmask per element, masks are compared across each equal
//! set, and hashes are read again at the end.

use std::collections::BTreeSet;
use std::fmt;

use geoconform_model::Subject;
use serde_json::json;

use crate::context::Validation;

/// One broken law. Indices refer to positions in the checked slice,
/// nulls included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LawViolation {
    NotReflexive { index: usize },
    EqualsNull { index: usize },
    HashMismatch { first: usize, second: usize },
    InconsistentEquality { first: usize, second: usize },
    UnstableHash { index: usize },
}

impl fmt::Display for LawViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReflexive { index } => write!(f, "element {index} is not equal to itself"),
            Self::EqualsNull { index } => write!(f, "element {index} is equal to null"),
            Self::HashMismatch { first, second } => write!(
                f,
                "elements {first} and {second} are equal but have different hash codes"
            ),
            Self::InconsistentEquality { first, second } => write!(
                f,
                "elements {first} and {second} disagree on the set of elements equal to them"
            ),
            Self::UnstableHash { index } => {
                write!(f, "hash code of element {index} changed between reads")
            }
        }
    }
}

struct Bitmask {
    words: Vec<u64>,
}

impl Bitmask {
    fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
        }
    }

    fn set(&mut self, bit: usize) {
        self.words[bit / 64] |= 1 << (bit % 64);
    }

    fn get(&self, bit: usize) -> bool {
        self.words[bit / 64] & (1 << (bit % 64)) != 0
    }
}

/// Every law violated by the non-null elements of `items`.
pub fn equivalence_violations(items: &[Option<&dyn Subject>]) -> Vec<LawViolation> {
    let elements: Vec<(usize, &dyn Subject)> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| item.map(|subject| (index, subject)))
        .collect();
    let n = elements.len();
    let hashes: Vec<i32> = elements.iter().map(|(_, s)| s.hash_code()).collect();

    let mut violations = Vec::new();
    let mut masks = Vec::with_capacity(n);
    for (i, (index, a)) in elements.iter().enumerate() {
        if !a.equals(Some(*a)) {
            violations.push(LawViolation::NotReflexive { index: *index });
        }
        if a.equals(None) {
            violations.push(LawViolation::EqualsNull { index: *index });
        }
        let mut mask = Bitmask::new(n);
        for (j, (_, b)) in elements.iter().enumerate() {
            if i == j || a.equals(Some(*b)) {
                mask.set(j);
            }
        }
        masks.push(mask);
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let related = masks[i].get(j) || masks[j].get(i);
            if related && hashes[i] != hashes[j] {
                violations.push(LawViolation::HashMismatch {
                    first: elements[i].0,
                    second: elements[j].0,
                });
            }
        }
    }

    let mut reported = BTreeSet::new();
    for i in 0..n {
        for j in 0..n {
            if i == j || !masks[i].get(j) {
                continue;
            }
            let pair = (i.min(j), i.max(j));
            if masks[i].words != masks[j].words && reported.insert(pair) {
                violations.push(LawViolation::InconsistentEquality {
                    first: elements[pair.0].0,
                    second: elements[pair.1].0,
                });
            }
        }
    }

    for (i, (index, subject)) in elements.iter().enumerate() {
        if subject.hash_code() != hashes[i] {
            violations.push(LawViolation::UnstableHash { index: *index });
        }
    }
    violations
}

impl Validation<'_> {
    /// Records one failure per law violated by `items`.
    pub fn check_equivalence(&mut self, items: &[Option<&dyn Subject>]) -> bool {
        let violations = equivalence_violations(items);
        for violation in &violations {
            let details = match *violation {
                LawViolation::NotReflexive { index }
                | LawViolation::EqualsNull { index }
                | LawViolation::UnstableHash { index } => json!({ "index": index }),
                LawViolation::HashMismatch { first, second }
                | LawViolation::InconsistentEquality { first, second } => {
                    json!({ "first": first, "second": second })
                }
            };
            self.fail_with(format!("equivalence law: {violation}"), details);
        }
        violations.is_empty()
    }

    /// [`Validation::check_equivalence`] over the elements of a collection
    /// accessor.
    pub fn check_equivalence_of<T: geoconform_model::AsSubject + ?Sized>(
        &mut self,
        field: &str,
        values: &[std::sync::Arc<T>],
    ) -> bool {
        if values.is_empty() {
            return true;
        }
        let items: Vec<Option<&dyn Subject>> =
            values.iter().map(|v| Some((**v).as_subject())).collect();
        self.at(field, |v| v.check_equivalence(&items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Equal when their keys are equal; hashes the key.
    struct Keyed(i32);

    impl Subject for Keyed {
        fn equals(&self, other: Option<&dyn Subject>) -> bool {
            other
                .and_then(|o| o.as_any().downcast_ref::<Keyed>())
                .is_some_and(|o| o.0 == self.0)
        }

        fn hash_code(&self) -> i32 {
            self.0
        }
    }

    /// Never equal to anything, itself included.
    struct Irreflexive;

    impl Subject for Irreflexive {
        fn equals(&self, _other: Option<&dyn Subject>) -> bool {
            false
        }

        fn hash_code(&self) -> i32 {
            0
        }
    }

    /// Equal to every `Keyed`, which do not return the favour.
    struct Greedy;

    impl Subject for Greedy {
        fn equals(&self, other: Option<&dyn Subject>) -> bool {
            other.is_some()
        }

        fn hash_code(&self) -> i32 {
            1
        }
    }

    /// Hash code changes on every read.
    struct Drifting(Cell<i32>);

    impl Subject for Drifting {
        fn hash_code(&self) -> i32 {
            let h = self.0.get();
            self.0.set(h + 1);
            h
        }
    }

    #[test]
    fn lawful_collection_passes() {
        let (a, b, c) = (Keyed(1), Keyed(1), Keyed(2));
        let items: Vec<Option<&dyn Subject>> = vec![Some(&a), None, Some(&b), Some(&c)];
        assert!(equivalence_violations(&items).is_empty());
    }

    #[test]
    fn irreflexive_element_fails() {
        let (a, bad) = (Keyed(1), Irreflexive);
        let items: Vec<Option<&dyn Subject>> = vec![Some(&a), Some(&bad)];
        assert!(
            equivalence_violations(&items).contains(&LawViolation::NotReflexive { index: 1 })
        );
    }

    #[test]
    fn asymmetric_equality_is_inconsistent() {
        let (a, greedy) = (Keyed(1), Greedy);
        let items: Vec<Option<&dyn Subject>> = vec![Some(&a), Some(&greedy)];
        let violations = equivalence_violations(&items);
        assert!(violations.contains(&LawViolation::InconsistentEquality { first: 0, second: 1 }));
        assert!(violations.contains(&LawViolation::HashMismatch { first: 0, second: 1 }));
        assert!(!violations.contains(&LawViolation::EqualsNull { index: 0 }));
    }

    #[test]
    fn greedy_element_equals_null() {
        let greedy = Greedy;
        let items: Vec<Option<&dyn Subject>> = vec![Some(&greedy)];
        assert_eq!(
            equivalence_violations(&items),
            vec![LawViolation::EqualsNull { index: 0 }]
        );
    }

    #[test]
    fn drifting_hash_is_unstable() {
        let drifting = Drifting(Cell::new(0));
        let items: Vec<Option<&dyn Subject>> = vec![Some(&drifting)];
        assert_eq!(
            equivalence_violations(&items),
            vec![LawViolation::UnstableHash { index: 0 }]
        );
    }

    #[test]
    fn many_elements_span_several_mask_words() {
        let keyed: Vec<Keyed> = (0..130).map(|i| Keyed(i % 3)).collect();
        let items: Vec<Option<&dyn Subject>> =
            keyed.iter().map(|k| Some(k as &dyn Subject)).collect();
        assert!(equivalence_violations(&items).is_empty());
    }
}
