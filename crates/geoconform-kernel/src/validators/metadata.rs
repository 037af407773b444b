//! Metadata records and resource identification.

use geoconform_model::{Identification, Metadata};

use super::citation::check_date_order;
use crate::context::Validation;
use crate::policy::Policy;

pub trait MetadataValidation: Send + Sync {
    fn policy(&self) -> &Policy;

    fn validate_metadata(&self, v: &mut Validation<'_>, metadata: &dyn Metadata) {
        validate_metadata(v, metadata);
    }

    fn validate_identification(&self, v: &mut Validation<'_>, info: &dyn Identification) {
        validate_identification(v, info);
    }
}

pub struct MetadataValidator {
    policy: Policy,
}

impl MetadataValidator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl MetadataValidation for MetadataValidator {
    fn policy(&self) -> &Policy {
        &self.policy
    }
}

pub fn validate_metadata(v: &mut Validation<'_>, metadata: &dyn Metadata) {
    v.dispatch_field("metadataIdentifier", metadata.metadata_identifier().as_deref());

    let contacts = metadata.contacts();
    v.mandatory("Metadata: contacts are mandatory", &contacts);
    v.dispatch_items("contact", &contacts);

    let dates = metadata.date_info();
    v.mandatory("Metadata: date info is mandatory", &dates);
    v.dispatch_items("dateInfo", &dates);
    v.at("dateInfo", |v| check_date_order(v, &dates));

    v.dispatch_items("metadataStandard", &metadata.metadata_standards());

    let info = metadata.identification_info();
    v.mandatory("Metadata: identification info is mandatory", &info);
    v.dispatch_items("identificationInfo", &info);
}

pub fn validate_identification(v: &mut Validation<'_>, info: &dyn Identification) {
    let citation = info.citation();
    v.mandatory("Identification: citation is mandatory", &citation);
    v.dispatch_field("citation", citation.as_deref());

    let abstract_text = info.abstract_text();
    v.mandatory("Identification: abstract is mandatory", &abstract_text);
    v.dispatch_field("abstract", abstract_text.as_deref());

    v.dispatch_items("extent", &info.extents());
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use geoconform_model::toy::{
        ToyBoundingBox, ToyCitation, ToyCitationDate, ToyExtent, ToyIdentification,
        ToyMetadata, ToyResponsibility, ToyText,
    };
    use geoconform_model::{DateType, Role};

    use crate::container::ValidatorContainer;

    fn record() -> ToyMetadata {
        let created = Utc.with_ymd_and_hms(2021, 3, 1, 0, 0, 0).unwrap();
        ToyMetadata {
            contacts: vec![Arc::new(ToyResponsibility::new(
                Role::PointOfContact,
                "Survey office",
            ))],
            date_info: vec![Arc::new(ToyCitationDate::new(DateType::Creation, created))],
            identification_info: vec![Arc::new(ToyIdentification {
                citation: Some(Arc::new(ToyCitation::titled("Coastline"))),
                abstract_text: Some(ToyText::shared("Digitized coastline")),
                extents: vec![Arc::new(ToyExtent::of_box(ToyBoundingBox::world()))],
            })],
            ..ToyMetadata::default()
        }
    }

    #[test]
    fn complete_record_passes() {
        let report = ValidatorContainer::new().validate(&record());
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    #[test]
    fn empty_record_lists_every_missing_part() {
        let report = ValidatorContainer::new().validate(&ToyMetadata::default());
        assert!(report.mentions("Metadata: contacts are mandatory"));
        assert!(report.mentions("Metadata: date info is mandatory"));
        assert!(report.mentions("Metadata: identification info is mandatory"));
    }

    #[test]
    fn nested_extent_failures_carry_their_path() {
        let mut metadata = record();
        metadata.identification_info = vec![Arc::new(ToyIdentification {
            citation: Some(Arc::new(ToyCitation::titled("Coastline"))),
            abstract_text: Some(ToyText::shared("Digitized coastline")),
            extents: vec![Arc::new(ToyExtent::of_box(ToyBoundingBox::new(
                -200.0, 10.0, 0.0, 10.0,
            )))],
        })];
        let report = ValidatorContainer::new().validate(&metadata);
        let failure = report
            .failures
            .iter()
            .find(|f| f.message.contains("illegal west bound"))
            .expect("west bound failure");
        assert_eq!(
            failure.path,
            "$.identificationInfo[0].extent[0].geographicElement[0]"
        );
    }
}
