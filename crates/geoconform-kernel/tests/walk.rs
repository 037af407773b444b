//! Graph-walk behaviour: cycles, shared sub-objects, the depth bound,
//! policy downgrades and custom sinks.

use std::sync::{Arc, Weak};

use geoconform_kernel::{
    Category, ConformanceReport, Failure, Policy, Sink, ValidatorContainer, Warning,
};
use geoconform_model::toy::{ToyBoundingBox, ToyCitation, ToyCrs, ToyIdentifier, ToyText};
use geoconform_model::{
    Citation, CitationDate, CoordinateReferenceSystem, CrsKind, Identifier, InternationalString,
    OnlineResource, Responsibility, Subject,
};

/// A registry that is both an identifier and the citation of its own
/// authority.
struct Registry {
    this: Weak<Registry>,
}

impl Registry {
    fn new() -> Arc<Self> {
        Arc::new_cyclic(|this| Self { this: this.clone() })
    }
}

impl Subject for Registry {
    fn as_citation(&self) -> Option<&dyn Citation> {
        Some(self)
    }

    fn as_identifier(&self) -> Option<&dyn Identifier> {
        Some(self)
    }
}

impl Citation for Registry {
    fn title(&self) -> Option<Arc<dyn InternationalString>> {
        Some(ToyText::shared("Registry"))
    }

    fn alternate_titles(&self) -> Vec<Arc<dyn InternationalString>> {
        Vec::new()
    }

    fn dates(&self) -> Vec<Arc<dyn CitationDate>> {
        Vec::new()
    }

    fn edition(&self) -> Option<Arc<dyn InternationalString>> {
        None
    }

    fn identifiers(&self) -> Vec<Arc<dyn Identifier>> {
        Vec::new()
    }

    fn cited_responsible_parties(&self) -> Vec<Arc<dyn Responsibility>> {
        Vec::new()
    }

    fn online_resources(&self) -> Vec<Arc<dyn OnlineResource>> {
        Vec::new()
    }
}

impl Identifier for Registry {
    fn code(&self) -> Option<String> {
        Some("REG".into())
    }

    fn code_space(&self) -> Option<String> {
        None
    }

    fn version(&self) -> Option<String> {
        None
    }

    fn authority(&self) -> Option<Arc<dyn Citation>> {
        self.this.upgrade().map(|this| this as Arc<dyn Citation>)
    }
}

/// An identifier whose authority, an untitled citation, lists this very
/// identifier.
struct SelfCited {
    this: Weak<SelfCited>,
}

impl SelfCited {
    fn new() -> Arc<Self> {
        Arc::new_cyclic(|this| Self { this: this.clone() })
    }
}

impl Subject for SelfCited {
    fn as_identifier(&self) -> Option<&dyn Identifier> {
        Some(self)
    }
}

impl Identifier for SelfCited {
    fn code(&self) -> Option<String> {
        Some("4326".into())
    }

    fn code_space(&self) -> Option<String> {
        Some("EPSG".into())
    }

    fn version(&self) -> Option<String> {
        None
    }

    fn authority(&self) -> Option<Arc<dyn Citation>> {
        let this = self.this.upgrade()?;
        let mut authority = ToyCitation::default();
        authority.identifiers = vec![this as Arc<dyn Identifier>];
        Some(Arc::new(authority))
    }
}

fn nested_compound(levels: usize) -> ToyCrs {
    let mut crs = ToyCrs::geographic_lon_lat();
    for level in 0..levels {
        let mut compound = ToyCrs::new(&format!("Compound {level}"), CrsKind::Compound);
        compound.components = vec![
            Arc::new(crs) as Arc<dyn CoordinateReferenceSystem>,
            Arc::new(ToyCrs::vertical()),
        ];
        crs = compound;
    }
    crs
}

fn depth_warnings(report: &ConformanceReport) -> Vec<&Warning> {
    report
        .warnings
        .iter()
        .filter(|w| w.message.starts_with("depth_limit"))
        .collect()
}

#[test]
fn self_referencing_authority_terminates() {
    let registry = Registry::new();
    let report = ValidatorContainer::new().validate(registry.as_ref());
    assert!(report.is_accepted(), "{:?}", report.failures);
}

#[test]
fn authority_citing_its_identifier_is_not_walked() {
    let container = ValidatorContainer::new();
    let cited = SelfCited::new();
    let report = container.validate(cited.as_ref());
    assert!(report.is_accepted(), "{:?}", report.failures);

    let mut foreign = ToyIdentifier::code("4326");
    foreign.authority = Some(Arc::new(ToyCitation::default()));
    let report = container.validate(&foreign);
    let paths: Vec<&str> = report
        .failures
        .iter()
        .filter(|f| f.message == "Citation: title is mandatory")
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(paths, ["$.authority"]);
}

#[test]
fn shared_objects_are_checked_on_every_path() {
    let blank: Arc<dyn Identifier> = Arc::new(ToyIdentifier::code(" "));
    let mut citation = ToyCitation::titled("Shared");
    citation.identifiers = vec![blank.clone(), blank];

    let report = ValidatorContainer::new().validate(&citation);
    let paths: Vec<&str> = report
        .failures
        .iter()
        .filter(|f| f.message == "Identifier: code must not be blank")
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(paths, ["$.identifier[0]", "$.identifier[1]"]);
}

#[test]
fn depth_bound_stops_descent_with_a_warning() {
    let deep = nested_compound(6);

    let bounded = ValidatorContainer::new().with_max_depth(4);
    let report = bounded.validate(&deep);
    let warnings = depth_warnings(&report);
    assert!(!warnings.is_empty());
    assert!(warnings.iter().all(|w| w.path.starts_with("$.")));
    assert!(!report.mentions("depth_limit"));

    let report = ValidatorContainer::new().validate(&deep);
    assert!(depth_warnings(&report).is_empty());
}

#[test]
fn lenient_policy_reports_warnings_only() {
    let container = ValidatorContainer::with_policy(Policy::lenient());
    let report = container.validate(&ToyCitation::default());
    insta::assert_snapshot!(report.to_string(), @"accepted (0 failures, 1 warnings)");
    assert_eq!(report.warnings[0].category, Category::Citation);
    assert_eq!(report.warnings[0].path, "$");

    let strict = ValidatorContainer::new().validate(&ToyCitation::default());
    insta::assert_snapshot!(strict.to_string(), @"rejected (1 failures, 0 warnings)");
}

#[test]
fn failures_keep_walk_order() {
    let report = ValidatorContainer::new().validate(&ToyBoundingBox::new(-200.0, 10.0, 10.0, -10.0));
    let lines: Vec<String> = report
        .failures
        .iter()
        .map(|f| format!("{} {} {}", f.category, f.path, f.message))
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    extent $ GeographicBoundingBox: illegal west bound
    extent $ GeographicBoundingBox: invalid range of latitudes
    ");
}

#[derive(Default)]
struct Counting {
    failures: usize,
    warnings: usize,
}

impl Sink for Counting {
    fn record_failure(&mut self, _: Failure) {
        self.failures += 1;
    }

    fn record_warning(&mut self, _: Warning) {
        self.warnings += 1;
    }
}

#[test]
fn custom_sink_receives_every_record() {
    let mut sink = Counting::default();
    let container = ValidatorContainer::new();
    container.validate_into(&ToyBoundingBox::new(-200.0, 10.0, 10.0, -10.0), &mut sink);
    assert_eq!(sink.failures, 2);
    assert_eq!(sink.warnings, 0);
}
