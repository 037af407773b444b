//! Category validators.
//!
//! Each category exposes a `*Validation` trait whose default methods run the
//! standard checks, a `*Validator` carrying only its [`crate::Policy`], and
//! free functions doing the work so that a replacement strategy can still
//! delegate to the standard checks.

pub mod citation;
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

pub use citation::{CitationValidation, CitationValidator};
pub use cs::{CsValidation, CsValidator};
pub use datum::{DatumValidation, DatumValidator};
pub use extent::{ExtentValidation, ExtentValidator};
pub use geometry::{GeometryValidation, GeometryValidator};
pub use metadata::{MetadataValidation, MetadataValidator};
pub use naming::{NamingValidation, NamingValidator};
pub use operation::{OperationValidation, OperationValidator};
pub use parameter::{ParameterValidation, ParameterValidator};
pub use quality::{QualityValidation, QualityValidator};
pub use referencing::{CrsValidation, CrsValidator};
