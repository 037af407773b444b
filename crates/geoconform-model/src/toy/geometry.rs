use std::sync::Arc;

use crate::geometry::{DirectPosition, Envelope, is_full_revolution};
use crate::referencing::CoordinateReferenceSystem;
use crate::subject::{Subject, hash_ordinates, same_instance};

#[derive(Clone)]
pub struct ToyPosition {
    pub crs: Option<Arc<dyn CoordinateReferenceSystem>>,
    pub coordinates: Vec<f64>,
}

impl ToyPosition {
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self {
            crs: None,
            coordinates,
        }
    }

    pub fn with_crs(crs: Arc<dyn CoordinateReferenceSystem>, coordinates: Vec<f64>) -> Self {
        Self {
            crs: Some(crs),
            coordinates,
        }
    }
}

impl Subject for ToyPosition {
    fn equals(&self, other: Option<&dyn Subject>) -> bool {
        let Some(other) = other.and_then(|o| o.as_direct_position()) else {
            return false;
        };
        let same_crs = match (&self.crs, other.coordinate_reference_system()) {
            (None, None) => true,
            (Some(mine), Some(theirs)) => same_instance(mine.as_subject(), theirs.as_subject()),
            _ => false,
        };
        let theirs = other.coordinates();
        same_crs
            && theirs.len() == self.coordinates.len()
            && theirs
                .iter()
                .zip(&self.coordinates)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }

    fn hash_code(&self) -> i32 {
        let crs_hash = self.crs.as_ref().map_or(0, |crs| crs.hash_code());
        crs_hash.wrapping_add(hash_ordinates(&self.coordinates))
    }

    fn as_direct_position(&self) -> Option<&dyn DirectPosition> {
        Some(self)
    }
}

impl DirectPosition for ToyPosition {
    fn coordinate_reference_system(&self) -> Option<Arc<dyn CoordinateReferenceSystem>> {
        self.crs.clone()
    }

    fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    fn coordinates(&self) -> Vec<f64> {
        self.coordinates.clone()
    }

    fn ordinate(&self, dimension: usize) -> f64 {
        self.coordinates.get(dimension).copied().unwrap_or(f64::NAN)
    }
}

/// An envelope given by its two corners. On an axis where `lower > upper`
/// (or the full-revolution pair), minimum and maximum come from the axis
/// range of the CRS.
pub struct ToyEnvelope {
    pub crs: Option<Arc<dyn CoordinateReferenceSystem>>,
    pub dimension: usize,
    pub lower: Option<Arc<dyn DirectPosition>>,
    pub upper: Option<Arc<dyn DirectPosition>>,
}

impl ToyEnvelope {
    /// Both corners share `crs`.
    pub fn new(
        crs: Option<Arc<dyn CoordinateReferenceSystem>>,
        lower: Vec<f64>,
        upper: Vec<f64>,
    ) -> Self {
        let dimension = lower.len();
        let corner = |coordinates| -> Arc<dyn DirectPosition> {
            Arc::new(ToyPosition {
                crs: crs.clone(),
                coordinates,
            })
        };
        Self {
            lower: Some(corner(lower)),
            upper: Some(corner(upper)),
            crs,
            dimension,
        }
    }

    fn bounds(&self, dimension: usize) -> (f64, f64) {
        let read = |corner: &Option<Arc<dyn DirectPosition>>| {
            corner
                .as_ref()
                .map_or(f64::NAN, |position| position.ordinate(dimension))
        };
        (read(&self.lower), read(&self.upper))
    }

    fn axis_range(&self, dimension: usize) -> Option<(f64, f64)> {
        let axis = self.crs.as_ref()?.coordinate_system()?.axis(dimension)?;
        Some((axis.minimum_value(), axis.maximum_value()))
    }

    fn is_wrapped(&self, dimension: usize) -> bool {
        let (lower, upper) = self.bounds(dimension);
        lower > upper || is_full_revolution(lower, upper)
    }
}

impl Subject for ToyEnvelope {
    fn as_envelope(&self) -> Option<&dyn Envelope> {
        Some(self)
    }
}

impl Envelope for ToyEnvelope {
    fn coordinate_reference_system(&self) -> Option<Arc<dyn CoordinateReferenceSystem>> {
        self.crs.clone()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn lower_corner(&self) -> Option<Arc<dyn DirectPosition>> {
        self.lower.clone()
    }

    fn upper_corner(&self) -> Option<Arc<dyn DirectPosition>> {
        self.upper.clone()
    }

    fn minimum(&self, dimension: usize) -> f64 {
        if self.is_wrapped(dimension) {
            return self.axis_range(dimension).map_or(f64::NAN, |(min, _)| min);
        }
        self.bounds(dimension).0
    }

    fn maximum(&self, dimension: usize) -> f64 {
        if self.is_wrapped(dimension) {
            return self.axis_range(dimension).map_or(f64::NAN, |(_, max)| max);
        }
        self.bounds(dimension).1
    }

    fn median(&self, dimension: usize) -> f64 {
        let (lower, upper) = self.bounds(dimension);
        if !self.is_wrapped(dimension) {
            return (lower + upper) / 2.0;
        }
        let Some((min, max)) = self.axis_range(dimension) else {
            return f64::NAN;
        };
        let median = lower + self.span(dimension) / 2.0;
        if median > max { median - (max - min) } else { median }
    }

    fn span(&self, dimension: usize) -> f64 {
        let (lower, upper) = self.bounds(dimension);
        if !self.is_wrapped(dimension) {
            return upper - lower;
        }
        self.axis_range(dimension)
            .map_or(f64::NAN, |(min, max)| upper - lower + (max - min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_are_returned_by_copy() {
        let position = ToyPosition::new(vec![1.0, 2.0]);
        let mut coordinates = position.coordinates();
        coordinates[0] = 9.0;
        assert_eq!(position.ordinate(0), 1.0);
        assert_eq!(position.hash_code(), hash_ordinates(&[1.0, 2.0]));
    }

    #[test]
    fn normal_axis_statistics() {
        let envelope = ToyEnvelope::new(None, vec![-10.0], vec![30.0]);
        assert_eq!(envelope.minimum(0), -10.0);
        assert_eq!(envelope.maximum(0), 30.0);
        assert_eq!(envelope.span(0), 40.0);
        assert_eq!(envelope.median(0), 10.0);
    }
}
