//! # geoconform-kernel
//!
//! Structural conformance validation for object graphs exposed through the
//! accessor traits of `geoconform-model`.
//!
//! A [`ValidatorContainer`] holds one validator per [`Category`]. Given any
//! subject it finds the facets the subject answers, routes it to the
//! matching validators and lets them walk into the objects it references.
//! Broken invariants become [`Failure`] records; rules the category policy
//! does not enforce become [`Warning`]s. Validation never mutates a subject
//! and never errors: the outcome is always a [`ConformanceReport`].
//!
//! ## Architecture
//!
//! ```text
//! ValidatorContainer     ← one strategy + policy per category, max depth
//!     │
//! Validation<'c>         ← per call: path, depth, active set, sink
//!     │
//! dispatch               ← facets → category validators
//!     │
//! validators::*          ← naming, metadata, citation, quality, extent,
//!     │                    geometry, parameter, datum, cs, crs, operation
//! Sink / ReportSink      ← failures and warnings in walk order
//! ```
//!
//! ```
//! use geoconform_kernel::ValidatorContainer;
//! use geoconform_model::toy::ToyBoundingBox;
//!
//! let container = ValidatorContainer::new();
//! let report = container.validate(&ToyBoundingBox::new(170.0, -170.0, -10.0, 10.0));
//! assert!(report.is_accepted());
//!
//! let report = container.validate(&ToyBoundingBox::new(0.0, 10.0, 20.0, -20.0));
//! assert!(report.mentions("invalid range of latitudes"));
//! ```

pub mod assert;
pub mod category;
pub mod config;
pub mod container;
pub mod context;
pub mod dispatch;
pub mod equivalence;
pub mod error;
pub mod policy;
pub mod report;
pub mod sink;
pub mod validators;

pub use assert::approx_eq;
pub use category::Category;
pub use config::{ContainerConfig, DEFAULT_MAX_DEPTH, PolicyOverride};
pub use container::ValidatorContainer;
pub use context::Validation;
pub use dispatch::Facet;
pub use equivalence::{LawViolation, equivalence_violations};
pub use error::ConfigError;
pub use policy::{DEFAULT_TOLERANCE, Policy, Presence};
pub use report::{
    ConformanceReport, Failure, FailureKind, REPORT_SCHEMA, Warning, compute_failure_id,
};
pub use sink::{ReportSink, Sink};
