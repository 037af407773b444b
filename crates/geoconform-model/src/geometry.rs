//! Positions and envelopes.

use std::sync::Arc;

use crate::referencing::CoordinateReferenceSystem;
use crate::subject::Subject;

pub trait DirectPosition: Subject {
    fn coordinate_reference_system(&self) -> Option<Arc<dyn CoordinateReferenceSystem>>;

    fn dimension(&self) -> usize;

    /// A copy of the coordinates. The vector is owned by the caller, so
    /// mutating it can never affect the position.
    fn coordinates(&self) -> Vec<f64>;

    fn ordinate(&self, dimension: usize) -> f64;
}

/// An axis-aligned box. Per axis, `lower > upper` denotes a box crossing the
/// discontinuity of a wraparound axis; `lower = +0, upper = -0` denotes the
/// full revolution.
pub trait Envelope: Subject {
    fn coordinate_reference_system(&self) -> Option<Arc<dyn CoordinateReferenceSystem>>;
    fn dimension(&self) -> usize;
    fn lower_corner(&self) -> Option<Arc<dyn DirectPosition>>;
    fn upper_corner(&self) -> Option<Arc<dyn DirectPosition>>;
    fn minimum(&self, dimension: usize) -> f64;
    fn maximum(&self, dimension: usize) -> f64;
    fn median(&self, dimension: usize) -> f64;
    fn span(&self, dimension: usize) -> f64;
}

/// Whether `(lower, upper)` is the `+0, -0` pair denoting a full revolution
/// of a wraparound axis. Compared by bit pattern, since `0.0 == -0.0`.
pub fn is_full_revolution(lower: f64, upper: f64) -> bool {
    lower.to_bits() == 0.0f64.to_bits() && upper.to_bits() == (-0.0f64).to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_revolution_needs_signed_zeros_in_order() {
        assert!(is_full_revolution(0.0, -0.0));
        assert!(!is_full_revolution(-0.0, 0.0));
        assert!(!is_full_revolution(0.0, 0.0));
    }
}
