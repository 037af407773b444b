//! Toy implementations of the accessor traits.
//!
//! Plain structs with public fields, built to be well-formed by default so
//! that tests can break one property at a time. Objects with value semantics
//! (text, names, identifiers, positions) override `equals`/`hash_code`; the
//! others keep identity semantics.

mod extent;
mod geometry;
mod metadata;
mod names;
mod operation;
mod parameter;
mod referencing;
mod text;

pub use extent::{
    ToyBoundingBox, ToyExtent, ToyGeographicDescription, ToyTemporalExtent, ToyVerticalExtent,
};
pub use geometry::{ToyEnvelope, ToyPosition};
pub use metadata::{
    ToyCitation, ToyCitationDate, ToyConformanceResult, ToyIdentification, ToyIdentifier,
    ToyMetadata, ToyOnlineResource, ToyQualityElement, ToyQuantitativeResult, ToyResponsibility,
};
pub use names::{ToyMemberName, ToyName, ToyNameSpace};
pub use operation::{ToyFormula, ToyMethod, ToyOperation, ToyTransform};
pub use parameter::{
    ToyDescriptorGroup, ToyParameterDescriptor, ToyParameterValue, ToyValueGroup,
};
pub use referencing::{
    ToyAxis, ToyCrs, ToyCs, ToyDatum, ToyEllipsoid, ToyPrimeMeridian, ToyProperties,
};
pub use text::ToyText;
