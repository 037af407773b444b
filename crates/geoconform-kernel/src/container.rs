//! The validator container: one strategy per category plus the walk bounds.

use geoconform_model::{Citation, Subject};

use crate::category::Category;
use crate::config::{ContainerConfig, DEFAULT_MAX_DEPTH};
use crate::context::Validation;
use crate::dispatch::Facet;
use crate::error::ConfigError;
use crate::policy::Policy;
use crate::report::ConformanceReport;
use crate::sink::{ReportSink, Sink};
use crate::validators::citation::check_title;
use crate::validators::{
    CitationValidation, CitationValidator, CrsValidation, CrsValidator, CsValidation,
    CsValidator, DatumValidation, DatumValidator, ExtentValidation, ExtentValidator,
    GeometryValidation, GeometryValidator, MetadataValidation, MetadataValidator,
    NamingValidation, NamingValidator, OperationValidation, OperationValidator,
    ParameterValidation, ParameterValidator, QualityValidation, QualityValidator,
};

/// Holds the validator of every category.
///
/// Validators cross-reference each other only through the container, so
/// replacing one category's strategy with [`ValidatorContainer::set_geometry`]
/// (and siblings) changes how that category is checked wherever it is
/// reached in the graph. The container is immutable during a validation
/// call; each call gets a fresh [`Validation`] context.
pub struct ValidatorContainer {
    naming: Box<dyn NamingValidation>,
    metadata: Box<dyn MetadataValidation>,
    citation: Box<dyn CitationValidation>,
    quality: Box<dyn QualityValidation>,
    extent: Box<dyn ExtentValidation>,
    geometry: Box<dyn GeometryValidation>,
    parameter: Box<dyn ParameterValidation>,
    datum: Box<dyn DatumValidation>,
    cs: Box<dyn CsValidation>,
    crs: Box<dyn CrsValidation>,
    operation: Box<dyn OperationValidation>,
    max_depth: usize,
}

impl Default for ValidatorContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidatorContainer {
    /// Standard validators under the strict policy.
    pub fn new() -> Self {
        Self::with_policy(Policy::strict())
    }

    /// Standard validators sharing `policy`.
    pub fn with_policy(policy: Policy) -> Self {
        Self::build(|_| policy, DEFAULT_MAX_DEPTH)
    }

    /// Standard validators with per-category policies.
    pub fn from_config(config: &ContainerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(|category| config.policy_for(category), config.max_depth))
    }

    fn build(policy: impl Fn(Category) -> Policy, max_depth: usize) -> Self {
        Self {
            naming: Box::new(NamingValidator::new(policy(Category::Naming))),
            metadata: Box::new(MetadataValidator::new(policy(Category::Metadata))),
            citation: Box::new(CitationValidator::new(policy(Category::Citation))),
            quality: Box::new(QualityValidator::new(policy(Category::Quality))),
            extent: Box::new(ExtentValidator::new(policy(Category::Extent))),
            geometry: Box::new(GeometryValidator::new(policy(Category::Geometry))),
            parameter: Box::new(ParameterValidator::new(policy(Category::Parameter))),
            datum: Box::new(DatumValidator::new(policy(Category::Datum))),
            cs: Box::new(CsValidator::new(policy(Category::Cs))),
            crs: Box::new(CrsValidator::new(policy(Category::Crs))),
            operation: Box::new(OperationValidator::new(policy(Category::Operation))),
            max_depth,
        }
    }

    /// Bounds the walk depth. Values below 1 are raised to 1, so the root
    /// is always checked.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn policy_of(&self, category: Category) -> &Policy {
        match category {
            Category::Naming => self.naming.policy(),
            Category::Metadata => self.metadata.policy(),
            Category::Citation => self.citation.policy(),
            Category::Quality => self.quality.policy(),
            Category::Extent => self.extent.policy(),
            Category::Geometry => self.geometry.policy(),
            Category::Parameter => self.parameter.policy(),
            Category::Datum => self.datum.policy(),
            Category::Cs => self.cs.policy(),
            Category::Crs => self.crs.policy(),
            Category::Operation => self.operation.policy(),
        }
    }

    /// Every category with the policy of its current validator.
    pub fn validators(&self) -> impl Iterator<Item = (Category, &Policy)> + '_ {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.policy_of(category)))
    }

    /// Validates `subject` and everything reachable from it.
    pub fn validate(&self, subject: &dyn Subject) -> ConformanceReport {
        let mut sink = ReportSink::default();
        self.validate_into(subject, &mut sink);
        sink.into_report()
    }

    /// Like [`ValidatorContainer::validate`], recording into `sink`.
    pub fn validate_into(&self, subject: &dyn Subject, sink: &mut dyn Sink) {
        tracing::debug!(max_depth = self.max_depth, "validation started");
        let mut v = Validation::new(self, sink);
        v.dispatch(subject);
    }

    /// Checks the equality and hash contract over `items`. `None` entries
    /// stand for null elements and are skipped.
    pub fn validate_equivalence(&self, items: &[Option<&dyn Subject>]) -> ConformanceReport {
        let category = items
            .iter()
            .flatten()
            .find_map(|subject| Facet::matching(*subject).first().map(|facet| facet.category()))
            .unwrap_or(Category::Crs);
        self.collect(|v| {
            v.in_category(category, |v| v.check_equivalence(items));
        })
    }

    /// Checks that the title or an alternate title of `citation` reads
    /// `expected`.
    pub fn validate_title(&self, citation: &dyn Citation, expected: &str) -> ConformanceReport {
        self.collect(|v| {
            v.in_category(Category::Citation, |v| check_title(v, citation, expected));
        })
    }

    fn collect(&self, check: impl FnOnce(&mut Validation<'_>)) -> ConformanceReport {
        let mut sink = ReportSink::default();
        check(&mut Validation::new(self, &mut sink));
        sink.into_report()
    }
}

macro_rules! slots {
    ($($field:ident, $setter:ident: $validation:ident;)*) => {
        impl ValidatorContainer {
            $(
                pub fn $field(&self) -> &dyn $validation {
                    self.$field.as_ref()
                }

                pub fn $setter(&mut self, validator: Box<dyn $validation>) {
                    self.$field = validator;
                }
            )*
        }
    };
}

slots! {
    naming, set_naming: NamingValidation;
    metadata, set_metadata: MetadataValidation;
    citation, set_citation: CitationValidation;
    quality, set_quality: QualityValidation;
    extent, set_extent: ExtentValidation;
    geometry, set_geometry: GeometryValidation;
    parameter, set_parameter: ParameterValidation;
    datum, set_datum: DatumValidation;
    cs, set_cs: CsValidation;
    crs, set_crs: CrsValidation;
    operation, set_operation: OperationValidation;
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoconform_model::Envelope;
    use geoconform_model::toy::{ToyBoundingBox, ToyCitation, ToyEnvelope, ToyIdentifier};

    /// Accepts every envelope without looking at it.
    struct Trusting(Policy);

    impl GeometryValidation for Trusting {
        fn policy(&self) -> &Policy {
            &self.0
        }

        fn validate_envelope(&self, _: &mut Validation<'_>, _: &dyn Envelope) {}
    }

    #[test]
    fn lists_every_category() {
        let container = ValidatorContainer::new();
        let listed: Vec<Category> = container.validators().map(|(c, _)| c).collect();
        assert_eq!(listed, Category::ALL.to_vec());
        assert!(container.validators().all(|(_, p)| *p == Policy::strict()));
        assert_eq!(container.max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn replaced_strategy_is_used() {
        let broken = ToyEnvelope::new(None, vec![10.0], vec![0.0]);
        let mut container = ValidatorContainer::new();
        assert!(!container.validate(&broken).is_accepted());

        container.set_geometry(Box::new(Trusting(Policy::strict())));
        assert!(container.validate(&broken).is_accepted());
    }

    #[test]
    fn zero_depth_still_checks_the_root() {
        let container = ValidatorContainer::new().with_max_depth(0);
        assert_eq!(container.max_depth(), 1);
        let broken = ToyEnvelope::new(None, vec![10.0], vec![0.0]);
        assert!(!container.validate(&broken).is_accepted());
    }

    #[test]
    fn lenient_policy_downgrades_to_warnings() {
        let container = ValidatorContainer::with_policy(Policy::lenient());
        let report = container.validate(&ToyCitation::default());
        assert!(report.is_accepted(), "{:?}", report.failures);
        let grouped = report.warnings_by_category();
        assert!(grouped[&Category::Citation]
            .iter()
            .any(|w| w.message == "Citation: title is mandatory"));
    }

    #[test]
    fn config_policies_apply_per_category() {
        let config = ContainerConfig::from_toml_str(
            "[categories.citation]\nrequire_mandatory = false\n",
        )
        .unwrap();
        let container = ValidatorContainer::from_config(&config).unwrap();
        assert!(!container.policy_of(Category::Citation).require_mandatory);
        assert!(container.policy_of(Category::Extent).require_mandatory);
        assert!(container.validate(&ToyCitation::default()).is_accepted());
    }

    #[test]
    fn equivalence_over_well_behaved_subjects() {
        let a = ToyIdentifier::in_space("EPSG", "4326");
        let b = ToyIdentifier::in_space("EPSG", "4326");
        let container = ValidatorContainer::new();
        assert!(container.validate_equivalence(&[Some(&a), None, Some(&b)]).is_accepted());

        let boxes = [ToyBoundingBox::world(), ToyBoundingBox::new(-10.0, 10.0, -5.0, 5.0)];
        let items: Vec<Option<&dyn Subject>> =
            boxes.iter().map(|b| Some(b as &dyn Subject)).collect();
        assert!(container.validate_equivalence(&items).is_accepted());
    }
}
