//! The subject root trait.
//!
//! Every accessor trait in this crate extends [`Subject`]. A subject exposes
//! three things to a validator:
//!
//! - an identity (data address plus concrete type), used to break cycles and
//!   to answer "same instance" questions;
//! - an equality/hash contract (`equals`, `hash_code`), which is itself under
//!   test and therefore never assumed to be lawful;
//! - facet queries (`as_envelope`, `as_citation`, …) naming every interface
//!   the object implements. An object may answer `Some` for several facets.

use std::any::{Any, TypeId};

use crate::cs::{CoordinateSystem, CoordinateSystemAxis};
use crate::datum::{Datum, Ellipsoid, PrimeMeridian};
use crate::extent::{
    Extent, GeographicBoundingBox, GeographicDescription, TemporalExtent, VerticalExtent,
};
use crate::geometry::{DirectPosition, Envelope};
use crate::metadata::{
    Citation, CitationDate, Identification, Identifier, Metadata, OnlineResource, Responsibility,
};
use crate::naming::{GenericName, LocalName, MemberName, NameSpace, ScopedName};
use crate::operation::{CoordinateOperation, Formula, MathTransform, OperationMethod};
use crate::parameter::{
    ParameterDescriptor, ParameterDescriptorGroup, ParameterValue, ParameterValueGroup,
};
use crate::quality::{ConformanceResult, QualityElement, QuantitativeResult};
use crate::referencing::{CoordinateReferenceSystem, IdentifiedObject, ReferenceSystem};
use crate::text::InternationalString;

/// Upcasts supplied for every [`Subject`] implementor by a blanket impl.
pub trait AsSubject {
    fn as_subject(&self) -> &dyn Subject;
    fn as_any(&self) -> &dyn Any;
}

impl<T: Subject + 'static> AsSubject for T {
    fn as_subject(&self) -> &dyn Subject {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Root of the accessor trait family.
///
/// Implementors override `equals`/`hash_code` when they have value
/// semantics, and every `as_*` facet they implement. The defaults give
/// identity semantics and no facets.
pub trait Subject: AsSubject {
    /// Value equality. `None` stands for a null argument and must yield `false`.
    fn equals(&self, other: Option<&dyn Subject>) -> bool {
        other.is_some_and(|other| same_instance(self.as_subject(), other))
    }

    /// Hash code consistent with [`Subject::equals`].
    fn hash_code(&self) -> i32 {
        ObjectKey::of(self.as_subject()).identity_hash()
    }

    fn as_international_string(&self) -> Option<&dyn InternationalString> {
        None
    }
    fn as_generic_name(&self) -> Option<&dyn GenericName> {
        None
    }
    fn as_local_name(&self) -> Option<&dyn LocalName> {
        None
    }
    fn as_scoped_name(&self) -> Option<&dyn ScopedName> {
        None
    }
    fn as_member_name(&self) -> Option<&dyn MemberName> {
        None
    }
    fn as_name_space(&self) -> Option<&dyn NameSpace> {
        None
    }

    fn as_metadata(&self) -> Option<&dyn Metadata> {
        None
    }
    fn as_identification(&self) -> Option<&dyn Identification> {
        None
    }
    fn as_citation(&self) -> Option<&dyn Citation> {
        None
    }
    fn as_citation_date(&self) -> Option<&dyn CitationDate> {
        None
    }
    fn as_identifier(&self) -> Option<&dyn Identifier> {
        None
    }
    fn as_responsibility(&self) -> Option<&dyn Responsibility> {
        None
    }
    fn as_online_resource(&self) -> Option<&dyn OnlineResource> {
        None
    }

    fn as_quality_element(&self) -> Option<&dyn QualityElement> {
        None
    }
    fn as_conformance_result(&self) -> Option<&dyn ConformanceResult> {
        None
    }
    fn as_quantitative_result(&self) -> Option<&dyn QuantitativeResult> {
        None
    }

    fn as_extent(&self) -> Option<&dyn Extent> {
        None
    }
    fn as_geographic_bounding_box(&self) -> Option<&dyn GeographicBoundingBox> {
        None
    }
    fn as_geographic_description(&self) -> Option<&dyn GeographicDescription> {
        None
    }
    fn as_vertical_extent(&self) -> Option<&dyn VerticalExtent> {
        None
    }
    fn as_temporal_extent(&self) -> Option<&dyn TemporalExtent> {
        None
    }

    fn as_envelope(&self) -> Option<&dyn Envelope> {
        None
    }
    fn as_direct_position(&self) -> Option<&dyn DirectPosition> {
        None
    }

    fn as_parameter_descriptor(&self) -> Option<&dyn ParameterDescriptor> {
        None
    }
    fn as_parameter_descriptor_group(&self) -> Option<&dyn ParameterDescriptorGroup> {
        None
    }
    fn as_parameter_value(&self) -> Option<&dyn ParameterValue> {
        None
    }
    fn as_parameter_value_group(&self) -> Option<&dyn ParameterValueGroup> {
        None
    }

    fn as_identified_object(&self) -> Option<&dyn IdentifiedObject> {
        None
    }
    fn as_reference_system(&self) -> Option<&dyn ReferenceSystem> {
        None
    }
    fn as_coordinate_reference_system(&self) -> Option<&dyn CoordinateReferenceSystem> {
        None
    }
    fn as_coordinate_system(&self) -> Option<&dyn CoordinateSystem> {
        None
    }
    fn as_coordinate_system_axis(&self) -> Option<&dyn CoordinateSystemAxis> {
        None
    }
    fn as_datum(&self) -> Option<&dyn Datum> {
        None
    }
    fn as_ellipsoid(&self) -> Option<&dyn Ellipsoid> {
        None
    }
    fn as_prime_meridian(&self) -> Option<&dyn PrimeMeridian> {
        None
    }
    fn as_coordinate_operation(&self) -> Option<&dyn CoordinateOperation> {
        None
    }
    fn as_operation_method(&self) -> Option<&dyn OperationMethod> {
        None
    }
    fn as_formula(&self) -> Option<&dyn Formula> {
        None
    }
    fn as_math_transform(&self) -> Option<&dyn MathTransform> {
        None
    }
}

/// Identity of a subject: its data address and concrete type.
///
/// The type participates so that a struct and its first field, which share
/// an address, are still distinct objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    address: usize,
    type_id: TypeId,
}

impl ObjectKey {
    pub fn of(subject: &dyn Subject) -> Self {
        Self {
            address: (subject as *const dyn Subject).cast::<()>() as usize,
            type_id: subject.as_any().type_id(),
        }
    }

    fn identity_hash(self) -> i32 {
        let address = self.address as u64;
        (address ^ (address >> 32)) as i32
    }
}

/// Whether both references designate the same object.
pub fn same_instance(a: &dyn Subject, b: &dyn Subject) -> bool {
    ObjectKey::of(a) == ObjectKey::of(b)
}

/// Array hash over IEEE-754 bit patterns: `h = 31·h + (bits ^ bits>>>32)`,
/// seeded with 1. NaN payloads are canonicalized first.
pub fn hash_ordinates(values: &[f64]) -> i32 {
    values.iter().fold(1i32, |hash, value| {
        let bits = if value.is_nan() {
            f64::NAN.to_bits()
        } else {
            value.to_bits()
        };
        hash.wrapping_mul(31)
            .wrapping_add((bits ^ (bits >> 32)) as i32)
    })
}

/// Text hash over UTF-16 code units: `h = 31·h + c`, seeded with 0.
pub fn hash_text(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}
