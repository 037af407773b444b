//! Subject documents: a JSON list of tagged subject descriptions turned into
//! toy subjects.
//!
//! ```json
//! {
//!   "subjects": [
//!     { "kind": "name", "text": "org:example:tip" },
//!     { "kind": "bounding_box", "west": 170, "east": -170, "south": -10, "north": 10 },
//!     { "kind": "envelope", "crs": { "name": "WGS 84", "kind": "geographic", "axes": [...] },
//!       "lower": [170, -10], "upper": [-170, 10] }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use geoconform_model::toy::{
    ToyAxis, ToyBoundingBox, ToyCitation, ToyCitationDate, ToyCrs, ToyCs, ToyDatum, ToyEnvelope,
    ToyIdentifier, ToyName, ToyParameterDescriptor, ToyPosition, ToyProperties, ToyText,
};
use geoconform_model::{
    AxisDirection, CitationDate, CoordinateReferenceSystem, CrsKind, CsKind, DatumKind, DateType,
    Identifier, ParamValue, RangeMeaning, Subject, Unit, ValueClass,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json at {path}: {source}")]
    ParseJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown unit `{0}` (expected degree, radian, grad, metre, second, day or unity)")]
    UnknownUnit(String),

    #[error("unsupported CRS kind {0:?} (expected geographic, vertical or engineering)")]
    UnsupportedCrs(CrsKind),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub subjects: Vec<SubjectSpec>,
}

impl Document {
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text).map_err(|source| DocumentError::ParseJson {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubjectSpec {
    Name(NameSpec),
    Citation(CitationSpec),
    BoundingBox(BoundingBoxSpec),
    Envelope(EnvelopeSpec),
    Position(PositionSpec),
    Parameter(ParameterSpec),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NameSpec {
    pub text: String,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    ":".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CitationSpec {
    pub title: Option<String>,
    #[serde(default)]
    pub alternate_titles: Vec<String>,
    #[serde(default)]
    pub dates: Vec<DateSpec>,
    #[serde(default)]
    pub identifiers: Vec<IdentifierSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DateSpec {
    pub date_type: DateType,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IdentifierSpec {
    pub code: Option<String>,
    pub code_space: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundingBoxSpec {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvelopeSpec {
    pub crs: Option<CrsSpec>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PositionSpec {
    pub crs: Option<CrsSpec>,
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CrsSpec {
    pub name: String,
    pub kind: CrsKind,
    pub axes: Vec<AxisSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AxisSpec {
    pub name: String,
    pub abbreviation: String,
    pub direction: AxisDirection,
    pub unit: String,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub range_meaning: Option<RangeMeaning>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParameterSpec {
    pub name: String,
    pub value_class: Option<ValueClass>,
    #[serde(default = "one")]
    pub minimum_occurs: u32,
    #[serde(default = "one")]
    pub maximum_occurs: u32,
    #[serde(default)]
    pub valid_values: Vec<ParamValue>,
    pub default: Option<ParamValue>,
    pub minimum: Option<ParamValue>,
    pub maximum: Option<ParamValue>,
    pub unit: Option<String>,
}

fn one() -> u32 {
    1
}

impl SubjectSpec {
    /// Short description used in command output.
    pub fn label(&self) -> String {
        match self {
            Self::Name(spec) => format!("name {}", spec.text),
            Self::Citation(spec) => match &spec.title {
                Some(title) => format!("citation {title}"),
                None => "citation".to_string(),
            },
            Self::BoundingBox(_) => "bounding_box".to_string(),
            Self::Envelope(spec) => format!("envelope{}", crs_suffix(spec.crs.as_ref())),
            Self::Position(spec) => format!("position{}", crs_suffix(spec.crs.as_ref())),
            Self::Parameter(spec) => format!("parameter {}", spec.name),
        }
    }

    pub fn build(&self) -> Result<Arc<dyn Subject>, DocumentError> {
        let subject: Arc<dyn Subject> = match self {
            Self::Name(spec) => ToyName::parse(&spec.text, &spec.separator),
            Self::Citation(spec) => Arc::new(spec.build()),
            Self::BoundingBox(spec) => Arc::new(ToyBoundingBox::new(
                spec.west,
                spec.east,
                spec.south,
                spec.north,
            )),
            Self::Envelope(spec) => {
                let crs = spec.crs.as_ref().map(CrsSpec::build).transpose()?;
                Arc::new(ToyEnvelope::new(crs, spec.lower.clone(), spec.upper.clone()))
            }
            Self::Position(spec) => {
                let crs = spec.crs.as_ref().map(CrsSpec::build).transpose()?;
                Arc::new(ToyPosition {
                    crs,
                    coordinates: spec.coordinates.clone(),
                })
            }
            Self::Parameter(spec) => Arc::new(spec.build()?),
        };
        Ok(subject)
    }
}

fn crs_suffix(crs: Option<&CrsSpec>) -> String {
    crs.map(|crs| format!(" in {}", crs.name)).unwrap_or_default()
}

impl CitationSpec {
    fn build(&self) -> ToyCitation {
        ToyCitation {
            title: self.title.as_deref().map(ToyText::shared),
            alternate_titles: self
                .alternate_titles
                .iter()
                .map(|title| ToyText::shared(title.as_str()))
                .collect(),
            dates: self
                .dates
                .iter()
                .map(|date| {
                    Arc::new(ToyCitationDate::new(date.date_type, date.date)) as Arc<dyn CitationDate>
                })
                .collect(),
            identifiers: self
                .identifiers
                .iter()
                .map(|id| {
                    Arc::new(ToyIdentifier {
                        code: id.code.clone(),
                        code_space: id.code_space.clone(),
                        ..ToyIdentifier::default()
                    }) as Arc<dyn Identifier>
                })
                .collect(),
            ..ToyCitation::default()
        }
    }
}

impl CrsSpec {
    fn build(&self) -> Result<Arc<dyn CoordinateReferenceSystem>, DocumentError> {
        let axes = self
            .axes
            .iter()
            .map(AxisSpec::build)
            .collect::<Result<Vec<_>, _>>()?;
        let (cs_kind, datum) = match self.kind {
            CrsKind::Geographic => (CsKind::Ellipsoidal, ToyDatum::wgs84()),
            CrsKind::Vertical => (
                CsKind::Vertical,
                ToyDatum::new(&format!("{} datum", self.name), DatumKind::Vertical),
            ),
            CrsKind::Engineering => (
                CsKind::Cartesian,
                ToyDatum::new(&format!("{} datum", self.name), DatumKind::Engineering),
            ),
            other => return Err(DocumentError::UnsupportedCrs(other)),
        };
        let cs = ToyCs::new(&format!("{} axes", self.name), cs_kind, axes);
        Ok(Arc::new(
            ToyCrs::new(&self.name, self.kind).with_cs(cs).with_datum(datum),
        ))
    }
}

impl AxisSpec {
    fn build(&self) -> Result<ToyAxis, DocumentError> {
        let axis = ToyAxis::new(&self.name, &self.abbreviation, self.direction, unit(&self.unit)?);
        Ok(axis.bounded(
            self.minimum.unwrap_or(f64::NEG_INFINITY),
            self.maximum.unwrap_or(f64::INFINITY),
            self.range_meaning.unwrap_or(RangeMeaning::Exact),
        ))
    }
}

impl ParameterSpec {
    fn build(&self) -> Result<ToyParameterDescriptor, DocumentError> {
        Ok(ToyParameterDescriptor {
            properties: ToyProperties::named(&self.name),
            minimum_occurs: self.minimum_occurs,
            maximum_occurs: self.maximum_occurs,
            value_class: self.value_class,
            valid_values: self.valid_values.clone(),
            default_value: self.default.clone(),
            minimum: self.minimum.clone(),
            maximum: self.maximum.clone(),
            unit: self.unit.as_deref().map(unit).transpose()?,
        })
    }
}

fn unit(name: &str) -> Result<Unit, DocumentError> {
    match name {
        "degree" => Ok(Unit::degree()),
        "radian" => Ok(Unit::radian()),
        "grad" => Ok(Unit::grad()),
        "metre" | "meter" => Ok(Unit::metre()),
        "second" => Ok(Unit::second()),
        "day" => Ok(Unit::day()),
        "unity" => Ok(Unit::unity()),
        other => Err(DocumentError::UnknownUnit(other.to_string())),
    }
}
