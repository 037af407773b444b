//! Citations, citation dates, identifiers, responsible parties and online
//! resources.

use std::sync::Arc;

use geoconform_model::{
    Citation, CitationDate, DateType, Identifier, OnlineResource, Responsibility, same_instance,
};
use serde_json::json;

use crate::context::Validation;
use crate::policy::Policy;

pub trait CitationValidation: Send + Sync {
    fn policy(&self) -> &Policy;

    fn validate_citation(&self, v: &mut Validation<'_>, citation: &dyn Citation) {
        validate_citation(v, citation);
    }

    fn validate_citation_date(&self, v: &mut Validation<'_>, date: &dyn CitationDate) {
        validate_citation_date(v, date);
    }

    fn validate_identifier(&self, v: &mut Validation<'_>, identifier: &dyn Identifier) {
        validate_identifier(v, identifier);
    }

    fn validate_responsibility(&self, v: &mut Validation<'_>, party: &dyn Responsibility) {
        validate_responsibility(v, party);
    }

    fn validate_online_resource(&self, v: &mut Validation<'_>, resource: &dyn OnlineResource) {
        validate_online_resource(v, resource);
    }
}

pub struct CitationValidator {
    policy: Policy,
}

impl CitationValidator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl CitationValidation for CitationValidator {
    fn policy(&self) -> &Policy {
        &self.policy
    }
}

pub fn validate_citation(v: &mut Validation<'_>, citation: &dyn Citation) {
    let title = citation.title();
    v.mandatory("Citation: title is mandatory", &title);
    v.dispatch_field("title", title.as_deref());
    v.dispatch_items("alternateTitle", &citation.alternate_titles());
    v.dispatch_field("edition", citation.edition().as_deref());

    let dates = citation.dates();
    v.dispatch_items("date", &dates);
    v.at("date", |v| check_date_order(v, &dates));

    let identifiers = citation.identifiers();
    v.dispatch_items("identifier", &identifiers);
    v.check_equivalence_of("identifier", &identifiers);

    v.dispatch_items("citedResponsibleParty", &citation.cited_responsible_parties());
    v.dispatch_items("onlineResource", &citation.online_resources());

    for (field, code) in [("isbn", citation.isbn()), ("issn", citation.issn())] {
        if let Some(code) = code {
            v.at(field, |v| {
                v.check(
                    !code.trim().is_empty(),
                    "Citation: ISBN and ISSN must not be blank when present",
                );
            });
        }
    }
}

/// Ordering law over a list of dates, checked pairwise in list order.
///
/// A creation date precedes every date ranked at or after revision, a last
/// update precedes every next update, and each validity start precedes the
/// nearest validity end that follows it in the list. Entries missing a date
/// or a type take no part.
pub fn check_date_order(v: &mut Validation<'_>, dates: &[Arc<dyn CitationDate>]) {
    let entries: Vec<_> = dates
        .iter()
        .map(|date| date.date().zip(date.date_type()))
        .collect();

    for (i, first) in entries.iter().enumerate() {
        let Some((first_date, first_type)) = *first else {
            continue;
        };
        for (j, second) in entries.iter().enumerate() {
            let Some((second_date, second_type)) = *second else {
                continue;
            };
            if i == j {
                continue;
            }
            let violated = match (first_type, second_type) {
                (DateType::Creation, later) if later.rank() >= DateType::Revision.rank() => {
                    first_date > second_date
                }
                (DateType::LastUpdate, DateType::NextUpdate) => first_date > second_date,
                _ => false,
            };
            if violated {
                v.fail_with(
                    format!(
                        "Citation: {} date must not be after {} date",
                        first_type.identifier(),
                        second_type.identifier()
                    ),
                    json!({
                        "first": i,
                        "second": j,
                        "firstDate": first_date.to_rfc3339(),
                        "secondDate": second_date.to_rfc3339(),
                    }),
                );
            }
        }

        if first_type == DateType::ValidityBegins {
            let expiry = entries.iter().enumerate().skip(i + 1).find_map(|(j, entry)| {
                (*entry)
                    .filter(|(_, kind)| *kind == DateType::ValidityExpires)
                    .map(|(date, _)| (j, date))
            });
            if let Some((j, expires)) = expiry {
                if first_date > expires {
                    v.fail_with(
                        "Citation: validity must begin before it expires",
                        json!({
                            "begins": i,
                            "expires": j,
                            "beginDate": first_date.to_rfc3339(),
                            "expiryDate": expires.to_rfc3339(),
                        }),
                    );
                }
            }
        }
    }
}

/// Whether the title or one alternate title reads `expected`.
pub fn check_title(v: &mut Validation<'_>, citation: &dyn Citation, expected: &str) -> bool {
    let mut seen: Vec<String> = citation
        .title()
        .map(|title| title.to_plain_string())
        .into_iter()
        .collect();
    seen.extend(
        citation
            .alternate_titles()
            .iter()
            .map(|title| title.to_plain_string()),
    );
    let found = seen.iter().any(|title| title == expected);
    if !found {
        v.fail_with(
            "Citation: no title or alternate title matches",
            json!({ "expected": expected, "titles": seen }),
        );
    }
    found
}

pub fn validate_citation_date(v: &mut Validation<'_>, date: &dyn CitationDate) {
    v.mandatory("CitationDate: date is mandatory", &date.date());
    v.mandatory("CitationDate: date type is mandatory", &date.date_type());
}

pub fn validate_identifier(v: &mut Validation<'_>, identifier: &dyn Identifier) {
    let code = identifier.code();
    v.mandatory("Identifier: code is mandatory", &code);
    if let Some(code) = &code {
        v.check(!code.trim().is_empty(), "Identifier: code must not be blank");
    }

    if let Some(authority) = identifier.authority() {
        let cites_itself = authority
            .identifiers()
            .iter()
            .any(|cited| same_instance(cited.as_subject(), identifier.as_subject()));
        if cites_itself {
            tracing::debug!(path = %v.path(), "authority cites this identifier; not descending");
        } else {
            v.dispatch_field("authority", Some(authority.as_ref()));
        }
    }
    v.dispatch_field("description", identifier.description().as_deref());
}

pub fn validate_responsibility(v: &mut Validation<'_>, party: &dyn Responsibility) {
    v.mandatory("Responsibility: role is mandatory", &party.role());
    let names = party.party_names();
    v.mandatory("Responsibility: at least one party name is mandatory", &names);
    v.dispatch_items("party", &names);
}

pub fn validate_online_resource(v: &mut Validation<'_>, resource: &dyn OnlineResource) {
    let linkage = resource.linkage();
    v.mandatory("OnlineResource: linkage is mandatory", &linkage);
    if let Some(linkage) = linkage {
        v.check(
            !linkage.trim().is_empty(),
            "OnlineResource: linkage must not be blank",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ValidatorContainer;
    use chrono::{DateTime, TimeZone, Utc};
    use geoconform_model::Role;
    use geoconform_model::toy::{
        ToyCitation, ToyCitationDate, ToyIdentifier, ToyOnlineResource, ToyResponsibility,
        ToyText,
    };

    fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn creation_after_revision_fails() {
        let citation = ToyCitation::titled("Geodetic registry")
            .with_date(DateType::Creation, day(2020, 1, 1))
            .with_date(DateType::Revision, day(2019, 1, 1));
        let report = ValidatorContainer::new().validate(&citation);
        assert!(report.mentions("creation date must not be after revision date"));
    }

    #[test]
    fn ordered_update_dates_pass() {
        let citation = ToyCitation::titled("Geodetic registry")
            .with_date(DateType::Creation, day(2020, 1, 1))
            .with_date(DateType::LastUpdate, day(2021, 1, 1))
            .with_date(DateType::NextUpdate, day(2022, 1, 1));
        let report = ValidatorContainer::new().validate(&citation);
        assert!(report.is_accepted(), "{:?}", report.failures);
    }

    #[test]
    fn validity_periods_pair_with_the_nearest_expiry() {
        let citation = ToyCitation::titled("Licence")
            .with_date(DateType::ValidityBegins, day(2010, 1, 1))
            .with_date(DateType::ValidityExpires, day(2012, 1, 1))
            .with_date(DateType::ValidityBegins, day(2015, 1, 1))
            .with_date(DateType::ValidityExpires, day(2018, 1, 1));
        assert!(ValidatorContainer::new().validate(&citation).is_accepted());

        let reversed = ToyCitation::titled("Licence")
            .with_date(DateType::ValidityBegins, day(2015, 1, 1))
            .with_date(DateType::ValidityExpires, day(2012, 1, 1));
        let report = ValidatorContainer::new().validate(&reversed);
        assert!(report.mentions("validity must begin before it expires"));
    }

    #[test]
    fn date_entries_need_date_and_type() {
        let mut citation = ToyCitation::titled("Registry");
        citation.dates.push(Arc::new(ToyCitationDate::default()));
        let report = ValidatorContainer::new().validate(&citation);
        assert!(report.mentions("CitationDate: date is mandatory"));
        assert!(report.mentions("CitationDate: date type is mandatory"));
    }

    #[test]
    fn untitled_citation_fails() {
        let report = ValidatorContainer::new().validate(&ToyCitation::default());
        assert!(report.mentions("Citation: title is mandatory"));
    }

    #[test]
    fn title_lookup_uses_alternate_titles() {
        let mut citation = ToyCitation::titled("European Petroleum Survey Group");
        citation.alternate_titles.push(ToyText::shared("EPSG"));
        let container = ValidatorContainer::new();
        assert!(container.validate_title(&citation, "EPSG").is_accepted());
        let report = container.validate_title(&citation, "IOGP");
        assert!(report.mentions("no title or alternate title matches"));
    }

    #[test]
    fn identifier_authority_is_walked() {
        let mut authority = ToyCitation::titled("EPSG");
        authority
            .identifiers
            .push(Arc::new(ToyIdentifier::in_space("EPSG", "4326")));
        let mut identifier = ToyIdentifier::in_space("EPSG", "4326");
        identifier.authority = Some(Arc::new(authority));
        let report = ValidatorContainer::new().validate(&identifier);
        assert!(report.is_accepted(), "{:?}", report.failures);

        identifier.authority = Some(Arc::new(ToyCitation::default()));
        let report = ValidatorContainer::new().validate(&identifier);
        assert!(report.mentions("Citation: title is mandatory"));
        assert_eq!(report.failures[0].path, "$.authority");
    }

    #[test]
    fn blank_code_fails() {
        let report = ValidatorContainer::new().validate(&ToyIdentifier::code(" "));
        assert!(report.mentions("Identifier: code must not be blank"));
    }

    #[test]
    fn parties_and_resources() {
        let container = ValidatorContainer::new();
        let party = ToyResponsibility::new(Role::Custodian, "IOGP");
        assert!(container.validate(&party).is_accepted());
        let report = container.validate(&ToyResponsibility::default());
        assert!(report.mentions("role is mandatory"));
        assert!(report.mentions("at least one party name is mandatory"));

        let report = container.validate(&ToyOnlineResource::default());
        assert!(report.mentions("OnlineResource: linkage is mandatory"));
    }
}
