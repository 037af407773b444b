//! # geoconform-model
//!
//! Read-only accessor traits for geodetic, referencing and metadata objects.
//!
//! Every trait extends [`Subject`], which carries the object's identity, its
//! equality/hash contract and facet queries (`as_envelope`, `as_citation`,
//! …). A validator holding a `&dyn Subject` asks which facets the object
//! answers and checks each of them.
//!
//! ```text
//! Subject ─┬─ naming      GenericName, LocalName, ScopedName, NameSpace
//!          ├─ metadata    Metadata, Citation, Identifier, Responsibility
//!          ├─ quality     QualityElement, ConformanceResult
//!          ├─ extent      Extent, GeographicBoundingBox, TemporalExtent
//!          ├─ geometry    Envelope, DirectPosition
//!          ├─ parameter   ParameterDescriptor(Group), ParameterValue(Group)
//!          └─ referencing IdentifiedObject ─┬─ CoordinateReferenceSystem
//!                                           ├─ CoordinateSystem, Axis
//!                                           ├─ Datum, Ellipsoid, PrimeMeridian
//!                                           └─ CoordinateOperation, Method
//! ```
//!
//! The [`toy`] module holds plain implementations used by tests and the CLI.

pub mod cs;
pub mod datum;
pub mod extent;
pub mod geometry;
pub mod metadata;
pub mod naming;
pub mod operation;
pub mod parameter;
pub mod quality;
pub mod referencing;
pub mod subject;
pub mod text;
pub mod toy;

pub use cs::{AxisDirection, CoordinateSystem, CoordinateSystemAxis, CsKind, RangeMeaning};
pub use datum::{Datum, DatumKind, Ellipsoid, PixelInCell, PrimeMeridian};
pub use extent::{
    Extent, GeographicBoundingBox, GeographicDescription, GeographicExtent, TemporalExtent,
    VerticalExtent,
};
pub use geometry::{DirectPosition, Envelope, is_full_revolution};
pub use metadata::{
    Citation, CitationDate, DateType, Identification, Identifier, Metadata, OnlineResource,
    Responsibility, Role,
};
pub use naming::{GenericName, LocalName, MemberName, NameSpace, ScopedName, TypeName};
pub use operation::{
    CoordinateOperation, Formula, MathTransform, OperationKind, OperationMethod,
};
pub use parameter::{
    GeneralParameterDescriptor, GeneralParameterValue, ParamValue, ParameterDescriptor,
    ParameterDescriptorGroup, ParameterValue, ParameterValueGroup, ValueClass,
};
pub use quality::{ConformanceResult, QualityElement, QuantitativeResult};
pub use referencing::{
    CoordinateReferenceSystem, CrsKind, IdentifiedObject, ReferenceSystem, crs_dimension,
};
pub use subject::{AsSubject, ObjectKey, Subject, hash_ordinates, hash_text, same_instance};
pub use text::{InternationalString, Unit, UnitDimension};
