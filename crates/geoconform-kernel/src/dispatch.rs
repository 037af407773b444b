//! Facet dispatch.
//!
//! A subject answers any number of facet queries. The dispatcher collects
//! every facet it answers, drops the ones subsumed by a more specific facet,
//! and routes the subject to the matching method of each facet's category
//! validator.
//!
//! ```text
//! dispatch(subject)
//!   ├─ Facet::matching(subject)       ← table scan + subsumption
//!   ├─ depth >= max_depth ?           ← depth_limit warning, stop
//!   ├─ enter(subject)                 ← active-path cycle guard
//!   └─ for facet: in_category(facet.category(), route)
//! ```

use geoconform_model::Subject;

use crate::category::Category;
use crate::context::Validation;
use crate::report::Warning;

/// One interface a subject can implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    InternationalString,
    GenericName,
    LocalName,
    ScopedName,
    MemberName,
    NameSpace,
    Metadata,
    Identification,
    Citation,
    CitationDate,
    Identifier,
    Responsibility,
    OnlineResource,
    QualityElement,
    ConformanceResult,
    QuantitativeResult,
    Extent,
    GeographicBoundingBox,
    GeographicDescription,
    VerticalExtent,
    TemporalExtent,
    Envelope,
    DirectPosition,
    ParameterDescriptor,
    ParameterDescriptorGroup,
    ParameterValue,
    ParameterValueGroup,
    IdentifiedObject,
    ReferenceSystem,
    CoordinateReferenceSystem,
    CoordinateSystem,
    CoordinateSystemAxis,
    Datum,
    Ellipsoid,
    PrimeMeridian,
    CoordinateOperation,
    OperationMethod,
    Formula,
    MathTransform,
}

impl Facet {
    /// Dispatch order.
    pub const ALL: [Facet; 39] = [
        Facet::InternationalString,
        Facet::GenericName,
        Facet::LocalName,
        Facet::ScopedName,
        Facet::MemberName,
        Facet::NameSpace,
        Facet::Metadata,
        Facet::Identification,
        Facet::Citation,
        Facet::CitationDate,
        Facet::Identifier,
        Facet::Responsibility,
        Facet::OnlineResource,
        Facet::QualityElement,
        Facet::ConformanceResult,
        Facet::QuantitativeResult,
        Facet::Extent,
        Facet::GeographicBoundingBox,
        Facet::GeographicDescription,
        Facet::VerticalExtent,
        Facet::TemporalExtent,
        Facet::Envelope,
        Facet::DirectPosition,
        Facet::ParameterDescriptor,
        Facet::ParameterDescriptorGroup,
        Facet::ParameterValue,
        Facet::ParameterValueGroup,
        Facet::IdentifiedObject,
        Facet::ReferenceSystem,
        Facet::CoordinateReferenceSystem,
        Facet::CoordinateSystem,
        Facet::CoordinateSystemAxis,
        Facet::Datum,
        Facet::Ellipsoid,
        Facet::PrimeMeridian,
        Facet::CoordinateOperation,
        Facet::OperationMethod,
        Facet::Formula,
        Facet::MathTransform,
    ];

    /// The category whose validator handles this facet. Identified objects
    /// that match nothing more specific fall back to the CRS validator.
    pub fn category(self) -> Category {
        match self {
            Self::InternationalString
            | Self::GenericName
            | Self::LocalName
            | Self::ScopedName
            | Self::MemberName
            | Self::NameSpace => Category::Naming,
            Self::Metadata | Self::Identification => Category::Metadata,
            Self::Citation
            | Self::CitationDate
            | Self::Identifier
            | Self::Responsibility
            | Self::OnlineResource => Category::Citation,
            Self::QualityElement | Self::ConformanceResult | Self::QuantitativeResult => {
                Category::Quality
            }
            Self::Extent
            | Self::GeographicBoundingBox
            | Self::GeographicDescription
            | Self::VerticalExtent
            | Self::TemporalExtent => Category::Extent,
            Self::Envelope | Self::DirectPosition => Category::Geometry,
            Self::ParameterDescriptor
            | Self::ParameterDescriptorGroup
            | Self::ParameterValue
            | Self::ParameterValueGroup => Category::Parameter,
            Self::IdentifiedObject | Self::ReferenceSystem | Self::CoordinateReferenceSystem => {
                Category::Crs
            }
            Self::CoordinateSystem | Self::CoordinateSystemAxis => Category::Cs,
            Self::Datum | Self::Ellipsoid | Self::PrimeMeridian => Category::Datum,
            Self::CoordinateOperation
            | Self::OperationMethod
            | Self::Formula
            | Self::MathTransform => Category::Operation,
        }
    }

    pub fn is_present(self, subject: &dyn Subject) -> bool {
        match self {
            Self::InternationalString => subject.as_international_string().is_some(),
            Self::GenericName => subject.as_generic_name().is_some(),
            Self::LocalName => subject.as_local_name().is_some(),
            Self::ScopedName => subject.as_scoped_name().is_some(),
            Self::MemberName => subject.as_member_name().is_some(),
            Self::NameSpace => subject.as_name_space().is_some(),
            Self::Metadata => subject.as_metadata().is_some(),
            Self::Identification => subject.as_identification().is_some(),
            Self::Citation => subject.as_citation().is_some(),
            Self::CitationDate => subject.as_citation_date().is_some(),
            Self::Identifier => subject.as_identifier().is_some(),
            Self::Responsibility => subject.as_responsibility().is_some(),
            Self::OnlineResource => subject.as_online_resource().is_some(),
            Self::QualityElement => subject.as_quality_element().is_some(),
            Self::ConformanceResult => subject.as_conformance_result().is_some(),
            Self::QuantitativeResult => subject.as_quantitative_result().is_some(),
            Self::Extent => subject.as_extent().is_some(),
            Self::GeographicBoundingBox => subject.as_geographic_bounding_box().is_some(),
            Self::GeographicDescription => subject.as_geographic_description().is_some(),
            Self::VerticalExtent => subject.as_vertical_extent().is_some(),
            Self::TemporalExtent => subject.as_temporal_extent().is_some(),
            Self::Envelope => subject.as_envelope().is_some(),
            Self::DirectPosition => subject.as_direct_position().is_some(),
            Self::ParameterDescriptor => subject.as_parameter_descriptor().is_some(),
            Self::ParameterDescriptorGroup => subject.as_parameter_descriptor_group().is_some(),
            Self::ParameterValue => subject.as_parameter_value().is_some(),
            Self::ParameterValueGroup => subject.as_parameter_value_group().is_some(),
            Self::IdentifiedObject => subject.as_identified_object().is_some(),
            Self::ReferenceSystem => subject.as_reference_system().is_some(),
            Self::CoordinateReferenceSystem => subject.as_coordinate_reference_system().is_some(),
            Self::CoordinateSystem => subject.as_coordinate_system().is_some(),
            Self::CoordinateSystemAxis => subject.as_coordinate_system_axis().is_some(),
            Self::Datum => subject.as_datum().is_some(),
            Self::Ellipsoid => subject.as_ellipsoid().is_some(),
            Self::PrimeMeridian => subject.as_prime_meridian().is_some(),
            Self::CoordinateOperation => subject.as_coordinate_operation().is_some(),
            Self::OperationMethod => subject.as_operation_method().is_some(),
            Self::Formula => subject.as_formula().is_some(),
            Self::MathTransform => subject.as_math_transform().is_some(),
        }
    }

    /// Every facet `subject` answers, in dispatch order, without the facets
    /// whose checks a more specific matching facet already runs.
    pub fn matching(subject: &dyn Subject) -> Vec<Facet> {
        let present: Vec<Facet> = Self::ALL
            .into_iter()
            .filter(|facet| facet.is_present(subject))
            .collect();
        let has = |facet: Facet| present.contains(&facet);
        let specific_name = has(Self::LocalName) || has(Self::ScopedName) || has(Self::MemberName);
        let only_identified = present.iter().all(|facet| *facet == Self::IdentifiedObject);

        present
            .iter()
            .copied()
            .filter(|facet| match facet {
                Self::GenericName => !specific_name,
                Self::LocalName => !has(Self::MemberName),
                Self::ReferenceSystem => !has(Self::CoordinateReferenceSystem),
                Self::IdentifiedObject => only_identified,
                _ => true,
            })
            .collect()
    }
}

impl Validation<'_> {
    /// Validates `subject` against every facet it answers. Subjects already
    /// being validated higher up the current path are skipped; past the
    /// container's maximum depth a `depth_limit` warning is recorded instead.
    pub fn dispatch(&mut self, subject: &dyn Subject) {
        let facets = Facet::matching(subject);
        let Some(first) = facets.first().copied() else {
            tracing::debug!(path = %self.path(), "no facet matched; nothing to validate");
            return;
        };

        let max_depth = self.container().max_depth();
        if self.depth() >= max_depth {
            let category = first.category();
            let path = self.path();
            tracing::warn!(category = %category, path = %path, max_depth, "depth limit reached");
            self.record_warning(Warning {
                category,
                message: format!("depth_limit: nesting deeper than {max_depth} levels not validated"),
                path,
            });
            return;
        }

        let entered = self.enter(subject, |v| {
            for facet in &facets {
                tracing::debug!(facet = ?facet, path = %v.path(), "routing");
                v.in_category(facet.category(), |v| route(v, *facet, subject));
            }
        });
        if entered.is_none() {
            tracing::debug!(path = %self.path(), "cycle: subject already on the active path");
        }
    }
}

fn route(v: &mut Validation<'_>, facet: Facet, subject: &dyn Subject) {
    let container = v.container();
    match facet {
        Facet::InternationalString => {
            if let Some(s) = subject.as_international_string() {
                container.naming().validate_international_string(v, s);
            }
        }
        Facet::GenericName => {
            if let Some(name) = subject.as_generic_name() {
                container.naming().validate_generic_name(v, name);
            }
        }
        Facet::LocalName => {
            if let Some(name) = subject.as_local_name() {
                container.naming().validate_local_name(v, name);
            }
        }
        Facet::ScopedName => {
            if let Some(name) = subject.as_scoped_name() {
                container.naming().validate_scoped_name(v, name);
            }
        }
        Facet::MemberName => {
            if let Some(name) = subject.as_member_name() {
                container.naming().validate_member_name(v, name);
            }
        }
        Facet::NameSpace => {
            if let Some(ns) = subject.as_name_space() {
                container.naming().validate_name_space(v, ns);
            }
        }
        Facet::Metadata => {
            if let Some(m) = subject.as_metadata() {
                container.metadata().validate_metadata(v, m);
            }
        }
        Facet::Identification => {
            if let Some(i) = subject.as_identification() {
                container.metadata().validate_identification(v, i);
            }
        }
        Facet::Citation => {
            if let Some(c) = subject.as_citation() {
                container.citation().validate_citation(v, c);
            }
        }
        Facet::CitationDate => {
            if let Some(d) = subject.as_citation_date() {
                container.citation().validate_citation_date(v, d);
            }
        }
        Facet::Identifier => {
            if let Some(id) = subject.as_identifier() {
                container.citation().validate_identifier(v, id);
            }
        }
        Facet::Responsibility => {
            if let Some(r) = subject.as_responsibility() {
                container.citation().validate_responsibility(v, r);
            }
        }
        Facet::OnlineResource => {
            if let Some(r) = subject.as_online_resource() {
                container.citation().validate_online_resource(v, r);
            }
        }
        Facet::QualityElement => {
            if let Some(e) = subject.as_quality_element() {
                container.quality().validate_element(v, e);
            }
        }
        Facet::ConformanceResult => {
            if let Some(r) = subject.as_conformance_result() {
                container.quality().validate_conformance_result(v, r);
            }
        }
        Facet::QuantitativeResult => {
            if let Some(r) = subject.as_quantitative_result() {
                container.quality().validate_quantitative_result(v, r);
            }
        }
        Facet::Extent => {
            if let Some(e) = subject.as_extent() {
                container.extent().validate_extent(v, e);
            }
        }
        Facet::GeographicBoundingBox => {
            if let Some(b) = subject.as_geographic_bounding_box() {
                container.extent().validate_bounding_box(v, b);
            }
        }
        Facet::GeographicDescription => {
            if let Some(d) = subject.as_geographic_description() {
                container.extent().validate_geographic_description(v, d);
            }
        }
        Facet::VerticalExtent => {
            if let Some(e) = subject.as_vertical_extent() {
                container.extent().validate_vertical_extent(v, e);
            }
        }
        Facet::TemporalExtent => {
            if let Some(e) = subject.as_temporal_extent() {
                container.extent().validate_temporal_extent(v, e);
            }
        }
        Facet::Envelope => {
            if let Some(e) = subject.as_envelope() {
                container.geometry().validate_envelope(v, e);
            }
        }
        Facet::DirectPosition => {
            if let Some(p) = subject.as_direct_position() {
                container.geometry().validate_position(v, p);
            }
        }
        Facet::ParameterDescriptor => {
            if let Some(d) = subject.as_parameter_descriptor() {
                container.parameter().validate_descriptor(v, d);
            }
        }
        Facet::ParameterDescriptorGroup => {
            if let Some(g) = subject.as_parameter_descriptor_group() {
                container.parameter().validate_descriptor_group(v, g);
            }
        }
        Facet::ParameterValue => {
            if let Some(p) = subject.as_parameter_value() {
                container.parameter().validate_value(v, p);
            }
        }
        Facet::ParameterValueGroup => {
            if let Some(g) = subject.as_parameter_value_group() {
                container.parameter().validate_value_group(v, g);
            }
        }
        Facet::IdentifiedObject => {
            if let Some(o) = subject.as_identified_object() {
                container.crs().validate_identified_object(v, o);
            }
        }
        Facet::ReferenceSystem => {
            if let Some(r) = subject.as_reference_system() {
                container.crs().validate_reference_system(v, r);
            }
        }
        Facet::CoordinateReferenceSystem => {
            if let Some(crs) = subject.as_coordinate_reference_system() {
                container.crs().validate_crs(v, crs);
            }
        }
        Facet::CoordinateSystem => {
            if let Some(cs) = subject.as_coordinate_system() {
                container.cs().validate_coordinate_system(v, cs);
            }
        }
        Facet::CoordinateSystemAxis => {
            if let Some(axis) = subject.as_coordinate_system_axis() {
                container.cs().validate_axis(v, axis);
            }
        }
        Facet::Datum => {
            if let Some(d) = subject.as_datum() {
                container.datum().validate_datum(v, d);
            }
        }
        Facet::Ellipsoid => {
            if let Some(e) = subject.as_ellipsoid() {
                container.datum().validate_ellipsoid(v, e);
            }
        }
        Facet::PrimeMeridian => {
            if let Some(pm) = subject.as_prime_meridian() {
                container.datum().validate_prime_meridian(v, pm);
            }
        }
        Facet::CoordinateOperation => {
            if let Some(op) = subject.as_coordinate_operation() {
                container.operation().validate_operation(v, op);
            }
        }
        Facet::OperationMethod => {
            if let Some(m) = subject.as_operation_method() {
                container.operation().validate_method(v, m);
            }
        }
        Facet::Formula => {
            if let Some(f) = subject.as_formula() {
                container.operation().validate_formula(v, f);
            }
        }
        Facet::MathTransform => {
            if let Some(t) = subject.as_math_transform() {
                container.operation().validate_math_transform(v, t);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoconform_model::toy::{ToyCrs, ToyEnvelope, ToyName, ToyText};

    #[test]
    fn every_facet_has_one_table_entry() {
        for facet in Facet::ALL {
            assert_eq!(
                Facet::ALL.iter().filter(|f| **f == facet).count(),
                1,
                "{facet:?}"
            );
        }
    }

    #[test]
    fn local_name_subsumes_generic_name() {
        let name = ToyName::parse("x", ":");
        let facets = Facet::matching(name.as_ref());
        assert!(facets.contains(&Facet::LocalName));
        assert!(!facets.contains(&Facet::GenericName));
    }

    #[test]
    fn crs_subsumes_reference_and_identified_object() {
        let crs = ToyCrs::geographic_lon_lat();
        let facets = Facet::matching(&crs);
        assert_eq!(facets, vec![Facet::CoordinateReferenceSystem]);
    }

    #[test]
    fn unrelated_facets_are_all_kept() {
        let text = ToyText::new("abc");
        assert_eq!(Facet::matching(&text), vec![Facet::InternationalString]);
        let envelope = ToyEnvelope::new(None, vec![0.0], vec![1.0]);
        assert_eq!(Facet::matching(&envelope), vec![Facet::Envelope]);
    }
}
