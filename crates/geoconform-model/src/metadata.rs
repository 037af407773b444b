//! Metadata records, citations and identifiers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extent::Extent;
use crate::subject::Subject;
use crate::text::InternationalString;

/// Event a [`CitationDate`] refers to.
///
/// Declaration order is meaningful: the date-ordering law compares ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateType {
    Creation,
    Publication,
    Revision,
    Expiry,
    LastUpdate,
    LastRevision,
    NextUpdate,
    Unavailable,
    InForce,
    Adopted,
    Deprecated,
    Superseded,
    ValidityBegins,
    ValidityExpires,
    Released,
    Distribution,
}

impl DateType {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn identifier(self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::Publication => "publication",
            Self::Revision => "revision",
            Self::Expiry => "expiry",
            Self::LastUpdate => "lastUpdate",
            Self::LastRevision => "lastRevision",
            Self::NextUpdate => "nextUpdate",
            Self::Unavailable => "unavailable",
            Self::InForce => "inForce",
            Self::Adopted => "adopted",
            Self::Deprecated => "deprecated",
            Self::Superseded => "superseded",
            Self::ValidityBegins => "validityBegins",
            Self::ValidityExpires => "validityExpires",
            Self::Released => "released",
            Self::Distribution => "distribution",
        }
    }
}

/// Function performed by a responsible party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ResourceProvider,
    Custodian,
    Owner,
    User,
    Distributor,
    Originator,
    PointOfContact,
    PrincipalInvestigator,
    Processor,
    Publisher,
    Author,
}

pub trait Citation: Subject {
    fn title(&self) -> Option<Arc<dyn InternationalString>>;
    fn alternate_titles(&self) -> Vec<Arc<dyn InternationalString>>;
    fn dates(&self) -> Vec<Arc<dyn CitationDate>>;
    fn edition(&self) -> Option<Arc<dyn InternationalString>>;
    fn identifiers(&self) -> Vec<Arc<dyn Identifier>>;
    fn cited_responsible_parties(&self) -> Vec<Arc<dyn Responsibility>>;
    fn online_resources(&self) -> Vec<Arc<dyn OnlineResource>>;
    fn isbn(&self) -> Option<String> {
        None
    }
    fn issn(&self) -> Option<String> {
        None
    }
}

pub trait CitationDate: Subject {
    fn date(&self) -> Option<DateTime<Utc>>;
    fn date_type(&self) -> Option<DateType>;
}

pub trait Identifier: Subject {
    fn code(&self) -> Option<String>;
    fn code_space(&self) -> Option<String>;
    fn version(&self) -> Option<String>;
    /// The organization responsible for the code. May cite this very
    /// identifier among its own identifiers.
    fn authority(&self) -> Option<Arc<dyn Citation>>;
    fn description(&self) -> Option<Arc<dyn InternationalString>> {
        None
    }
}

pub trait Responsibility: Subject {
    fn role(&self) -> Option<Role>;
    fn party_names(&self) -> Vec<Arc<dyn InternationalString>>;
}

pub trait OnlineResource: Subject {
    fn linkage(&self) -> Option<String>;
    fn protocol(&self) -> Option<String>;
    fn name(&self) -> Option<String>;
}

/// Root of a metadata record.
pub trait Metadata: Subject {
    fn metadata_identifier(&self) -> Option<Arc<dyn Identifier>>;
    fn contacts(&self) -> Vec<Arc<dyn Responsibility>>;
    fn date_info(&self) -> Vec<Arc<dyn CitationDate>>;
    fn metadata_standards(&self) -> Vec<Arc<dyn Citation>>;
    fn identification_info(&self) -> Vec<Arc<dyn Identification>>;
}

/// Basic information about a described resource.
pub trait Identification: Subject {
    fn citation(&self) -> Option<Arc<dyn Citation>>;
    fn abstract_text(&self) -> Option<Arc<dyn InternationalString>>;
    fn extents(&self) -> Vec<Arc<dyn Extent>>;
}
