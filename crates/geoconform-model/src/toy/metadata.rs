use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::extent::Extent;
use crate::metadata::{
    Citation, CitationDate, DateType, Identification, Identifier, Metadata, OnlineResource,
    Responsibility, Role,
};
use crate::quality::{ConformanceResult, QualityElement, QuantitativeResult};
use crate::subject::{Subject, hash_text};
use crate::text::{InternationalString, Unit};
use crate::toy::ToyText;

#[derive(Default)]
pub struct ToyCitation {
    pub title: Option<Arc<dyn InternationalString>>,
    pub alternate_titles: Vec<Arc<dyn InternationalString>>,
    pub dates: Vec<Arc<dyn CitationDate>>,
    pub edition: Option<Arc<dyn InternationalString>>,
    pub identifiers: Vec<Arc<dyn Identifier>>,
    pub responsible_parties: Vec<Arc<dyn Responsibility>>,
    pub online_resources: Vec<Arc<dyn OnlineResource>>,
}

impl ToyCitation {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(ToyText::shared(title)),
            ..Self::default()
        }
    }

    pub fn with_date(mut self, date_type: DateType, date: DateTime<Utc>) -> Self {
        self.dates.push(Arc::new(ToyCitationDate::new(date_type, date)));
        self
    }
}

impl Subject for ToyCitation {
    fn as_citation(&self) -> Option<&dyn Citation> {
        Some(self)
    }
}

impl Citation for ToyCitation {
    fn title(&self) -> Option<Arc<dyn InternationalString>> {
        self.title.clone()
    }

    fn alternate_titles(&self) -> Vec<Arc<dyn InternationalString>> {
        self.alternate_titles.clone()
    }

    fn dates(&self) -> Vec<Arc<dyn CitationDate>> {
        self.dates.clone()
    }

    fn edition(&self) -> Option<Arc<dyn InternationalString>> {
        self.edition.clone()
    }

    fn identifiers(&self) -> Vec<Arc<dyn Identifier>> {
        self.identifiers.clone()
    }

    fn cited_responsible_parties(&self) -> Vec<Arc<dyn Responsibility>> {
        self.responsible_parties.clone()
    }

    fn online_resources(&self) -> Vec<Arc<dyn OnlineResource>> {
        self.online_resources.clone()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ToyCitationDate {
    pub date: Option<DateTime<Utc>>,
    pub date_type: Option<DateType>,
}

impl ToyCitationDate {
    pub fn new(date_type: DateType, date: DateTime<Utc>) -> Self {
        Self {
            date: Some(date),
            date_type: Some(date_type),
        }
    }
}

impl Subject for ToyCitationDate {
    fn as_citation_date(&self) -> Option<&dyn CitationDate> {
        Some(self)
    }
}

impl CitationDate for ToyCitationDate {
    fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    fn date_type(&self) -> Option<DateType> {
        self.date_type
    }
}

/// An identifier compared by code space and code.
#[derive(Default)]
pub struct ToyIdentifier {
    pub code: Option<String>,
    pub code_space: Option<String>,
    pub version: Option<String>,
    pub authority: Option<Arc<dyn Citation>>,
}

impl ToyIdentifier {
    pub fn code(code: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            ..Self::default()
        }
    }

    pub fn in_space(code_space: &str, code: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            code_space: Some(code_space.to_string()),
            ..Self::default()
        }
    }
}

impl Subject for ToyIdentifier {
    fn equals(&self, other: Option<&dyn Subject>) -> bool {
        other
            .and_then(|o| o.as_identifier())
            .is_some_and(|o| o.code() == self.code && o.code_space() == self.code_space)
    }

    fn hash_code(&self) -> i32 {
        let space = self.code_space.as_deref().map_or(0, hash_text);
        let code = self.code.as_deref().map_or(0, hash_text);
        space.wrapping_mul(31).wrapping_add(code)
    }

    fn as_identifier(&self) -> Option<&dyn Identifier> {
        Some(self)
    }
}

impl Identifier for ToyIdentifier {
    fn code(&self) -> Option<String> {
        self.code.clone()
    }

    fn code_space(&self) -> Option<String> {
        self.code_space.clone()
    }

    fn version(&self) -> Option<String> {
        self.version.clone()
    }

    fn authority(&self) -> Option<Arc<dyn Citation>> {
        self.authority.clone()
    }
}

#[derive(Default)]
pub struct ToyResponsibility {
    pub role: Option<Role>,
    pub party_names: Vec<Arc<dyn InternationalString>>,
}

impl ToyResponsibility {
    pub fn new(role: Role, party: &str) -> Self {
        Self {
            role: Some(role),
            party_names: vec![ToyText::shared(party)],
        }
    }
}

impl Subject for ToyResponsibility {
    fn as_responsibility(&self) -> Option<&dyn Responsibility> {
        Some(self)
    }
}

impl Responsibility for ToyResponsibility {
    fn role(&self) -> Option<Role> {
        self.role
    }

    fn party_names(&self) -> Vec<Arc<dyn InternationalString>> {
        self.party_names.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToyOnlineResource {
    pub linkage: Option<String>,
    pub protocol: Option<String>,
    pub name: Option<String>,
}

impl Subject for ToyOnlineResource {
    fn as_online_resource(&self) -> Option<&dyn OnlineResource> {
        Some(self)
    }
}

impl OnlineResource for ToyOnlineResource {
    fn linkage(&self) -> Option<String> {
        self.linkage.clone()
    }

    fn protocol(&self) -> Option<String> {
        self.protocol.clone()
    }

    fn name(&self) -> Option<String> {
        self.name.clone()
    }
}

#[derive(Default)]
pub struct ToyMetadata {
    pub metadata_identifier: Option<Arc<dyn Identifier>>,
    pub contacts: Vec<Arc<dyn Responsibility>>,
    pub date_info: Vec<Arc<dyn CitationDate>>,
    pub metadata_standards: Vec<Arc<dyn Citation>>,
    pub identification_info: Vec<Arc<dyn Identification>>,
}

impl Subject for ToyMetadata {
    fn as_metadata(&self) -> Option<&dyn Metadata> {
        Some(self)
    }
}

impl Metadata for ToyMetadata {
    fn metadata_identifier(&self) -> Option<Arc<dyn Identifier>> {
        self.metadata_identifier.clone()
    }

    fn contacts(&self) -> Vec<Arc<dyn Responsibility>> {
        self.contacts.clone()
    }

    fn date_info(&self) -> Vec<Arc<dyn CitationDate>> {
        self.date_info.clone()
    }

    fn metadata_standards(&self) -> Vec<Arc<dyn Citation>> {
        self.metadata_standards.clone()
    }

    fn identification_info(&self) -> Vec<Arc<dyn Identification>> {
        self.identification_info.clone()
    }
}

#[derive(Default)]
pub struct ToyIdentification {
    pub citation: Option<Arc<dyn Citation>>,
    pub abstract_text: Option<Arc<dyn InternationalString>>,
    pub extents: Vec<Arc<dyn Extent>>,
}

impl Subject for ToyIdentification {
    fn as_identification(&self) -> Option<&dyn Identification> {
        Some(self)
    }
}

impl Identification for ToyIdentification {
    fn citation(&self) -> Option<Arc<dyn Citation>> {
        self.citation.clone()
    }

    fn abstract_text(&self) -> Option<Arc<dyn InternationalString>> {
        self.abstract_text.clone()
    }

    fn extents(&self) -> Vec<Arc<dyn Extent>> {
        self.extents.clone()
    }
}

#[derive(Default)]
pub struct ToyQualityElement {
    pub names_of_measure: Vec<Arc<dyn InternationalString>>,
    pub measure_identification: Option<Arc<dyn Identifier>>,
    pub measure_description: Option<Arc<dyn InternationalString>>,
    pub results: Vec<Arc<dyn Subject>>,
}

impl Subject for ToyQualityElement {
    fn as_quality_element(&self) -> Option<&dyn QualityElement> {
        Some(self)
    }
}

impl QualityElement for ToyQualityElement {
    fn names_of_measure(&self) -> Vec<Arc<dyn InternationalString>> {
        self.names_of_measure.clone()
    }

    fn measure_identification(&self) -> Option<Arc<dyn Identifier>> {
        self.measure_identification.clone()
    }

    fn measure_description(&self) -> Option<Arc<dyn InternationalString>> {
        self.measure_description.clone()
    }

    fn results(&self) -> Vec<Arc<dyn Subject>> {
        self.results.clone()
    }
}

#[derive(Default)]
pub struct ToyConformanceResult {
    pub specification: Option<Arc<dyn Citation>>,
    pub explanation: Option<Arc<dyn InternationalString>>,
    pub pass: Option<bool>,
}

impl Subject for ToyConformanceResult {
    fn as_conformance_result(&self) -> Option<&dyn ConformanceResult> {
        Some(self)
    }
}

impl ConformanceResult for ToyConformanceResult {
    fn specification(&self) -> Option<Arc<dyn Citation>> {
        self.specification.clone()
    }

    fn explanation(&self) -> Option<Arc<dyn InternationalString>> {
        self.explanation.clone()
    }

    fn pass(&self) -> Option<bool> {
        self.pass
    }
}

#[derive(Default)]
pub struct ToyQuantitativeResult {
    pub values: Vec<f64>,
    pub value_unit: Option<Unit>,
    pub error_statistic: Option<Arc<dyn InternationalString>>,
}

impl Subject for ToyQuantitativeResult {
    fn as_quantitative_result(&self) -> Option<&dyn QuantitativeResult> {
        Some(self)
    }
}

impl QuantitativeResult for ToyQuantitativeResult {
    fn values(&self) -> Vec<f64> {
        self.values.clone()
    }

    fn value_unit(&self) -> Option<Unit> {
        self.value_unit.clone()
    }

    fn error_statistic(&self) -> Option<Arc<dyn InternationalString>> {
        self.error_statistic.clone()
    }
}
