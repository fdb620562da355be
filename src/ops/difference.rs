//! Symmetric difference (boolean XOR).
//!
//! Composed, not re-derived: `XOR(X, Y) = AND(OR(X, Y), NOT(AND(X, Y)))`
//! with OR realized as concatenate-then-fuse. The composition order and
//! the sub-operation semantics are part of the contract - numeric and
//! ordering edge cases must match what the primitives produce.
//!
//! Streams are forward-only, so each operand is supplied twice: one
//! cursor feeds the OR side, the other the inner AND.

use crate::error::Result;
use crate::feature::Feature;
use crate::ops::complement::Complement;
use crate::ops::concatenate::Concatenate;
use crate::ops::fusion::Fusion;
use crate::ops::overlap::Overlap;
use crate::stream::FeatureStream;

type UnionSide = Fusion<Concatenate>;
type NotBothSide = Complement<Overlap<FeatureStream, FeatureStream>>;

/// Streaming symmetric difference of two sorted streams over `[0, l)`.
pub struct Difference {
    inner: Overlap<UnionSide, NotBothSide>,
}

impl Difference {
    /// `x1`/`x2` are two independent cursors over the same X track, and
    /// likewise `y1`/`y2` for Y.
    pub fn new(
        x1: FeatureStream,
        x2: FeatureStream,
        y1: FeatureStream,
        y2: FeatureStream,
        chrom_length: i64,
    ) -> Self {
        let union = Fusion::new(Concatenate::new(vec![x1, y1]));
        let both = Overlap::new(x2, y2);
        let not_both = Complement::new(both, chrom_length);
        Self {
            inner: Overlap::new(union, not_both),
        }
    }
}

impl Iterator for Difference {
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(features: &[(i64, i64)]) -> FeatureStream {
        let owned: Vec<Feature> = features.iter().map(|&(s, e)| Feature::new(s, e)).collect();
        Box::new(owned.into_iter().map(Ok))
    }

    fn run(x: &[(i64, i64)], y: &[(i64, i64)], l: i64) -> Vec<(i64, i64)> {
        Difference::new(boxed(x), boxed(x), boxed(y), boxed(y), l)
            .collect::<Result<Vec<_>>>()
            .unwrap()
            .iter()
            .map(Feature::position)
            .collect()
    }

    #[test]
    fn test_basic_xor() {
        let out = run(&[(0, 40), (50, 60)], &[(10, 20)], 1000);
        assert_eq!(out, vec![(0, 10), (20, 40), (50, 60)]);
    }

    #[test]
    fn test_disjoint_tracks_xor_is_union() {
        let out = run(&[(0, 10)], &[(20, 30)], 100);
        assert_eq!(out, vec![(0, 10), (20, 30)]);
    }

    #[test]
    fn test_identical_tracks_cancel() {
        let out = run(&[(10, 20), (30, 40)], &[(10, 20), (30, 40)], 100);
        assert!(out.is_empty());
    }

    #[test]
    fn test_partial_overlaps() {
        let out = run(
            &[(5, 10), (20, 30), (40, 50)],
            &[(15, 20), (25, 35), (45, 65)],
            135,
        );
        assert_eq!(out, vec![(5, 10), (15, 25), (30, 35), (40, 45), (50, 65)]);
    }

    #[test]
    fn test_empty_y_returns_x() {
        let out = run(&[(10, 20)], &[], 100);
        assert_eq!(out, vec![(10, 20)]);
    }
}
