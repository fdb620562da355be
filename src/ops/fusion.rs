//! Fusion of overlapping or adjacent features.
//!
//! Consumes one sorted stream and emits a stream in which every pair of
//! output features is disjoint and non-adjacent (`end[i] < start[i+1]`).
//!
//! # Merge rule
//!
//! While the next feature starts at or before the accumulated end:
//! - end: maximum of the two ends
//! - name: non-empty names joined with `" + "`
//! - score: sum
//! - strand: conserved only when equal, otherwise neutral
//!
//! # Memory Complexity
//!
//! O(1) - only the feature under accumulation is held.

use crate::error::Result;
use crate::feature::{join_names, Feature};
use crate::stream::Validated;

/// Streaming fusion reducer over one sorted feature stream.
pub struct Fusion<I>
where
    I: Iterator<Item = Result<Feature>>,
{
    source: Validated<I>,
    current: Option<Feature>,
    done: bool,
}

impl<I> Fusion<I>
where
    I: Iterator<Item = Result<Feature>>,
{
    pub fn new(source: I) -> Self {
        Self {
            source: Validated::new(source),
            current: None,
            done: false,
        }
    }
}

impl<I> Iterator for Fusion<I>
where
    I: Iterator<Item = Result<Feature>>,
{
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.source.next() {
                None => {
                    self.done = true;
                    // Final flush; empty input yields empty output.
                    return self.current.take().map(Ok);
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(next)) => match self.current.take() {
                    None => self.current = Some(next),
                    Some(mut acc) => {
                        if next.start <= acc.end {
                            acc.end = acc.end.max(next.end);
                            acc.name = join_names(&acc.name, &next.name);
                            acc.score += next.score;
                            acc.strand = acc.strand.combine(next.strand);
                            self.current = Some(acc);
                        } else {
                            self.current = Some(next);
                            return Some(Ok(acc));
                        }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Strand;

    fn run(input: Vec<Feature>) -> Vec<Feature> {
        Fusion::new(input.into_iter().map(Ok))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_adjacent_features_fuse() {
        let out = run(vec![Feature::new(10, 20), Feature::new(20, 30)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position(), (10, 30));
    }

    #[test]
    fn test_disjoint_features_pass_through() {
        let out = run(vec![Feature::new(10, 20), Feature::new(25, 35)]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].position(), (10, 20));
        assert_eq!(out[1].position(), (25, 35));
    }

    #[test]
    fn test_scores_sum_and_names_join() {
        let out = run(vec![
            Feature::new(10, 20).with_name("a").with_score(1.5),
            Feature::new(15, 30).with_name("b").with_score(2.5),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "a + b");
        assert_eq!(out[0].score, 4.0);
    }

    #[test]
    fn test_strand_conserved_only_when_equal() {
        let same = run(vec![
            Feature::new(0, 10).with_strand(Strand::Reverse),
            Feature::new(5, 15).with_strand(Strand::Reverse),
        ]);
        assert_eq!(same[0].strand, Strand::Reverse);

        let mixed = run(vec![
            Feature::new(0, 10).with_strand(Strand::Forward),
            Feature::new(5, 15).with_strand(Strand::Reverse),
        ]);
        assert_eq!(mixed[0].strand, Strand::Unknown);
    }

    #[test]
    fn test_contained_feature_does_not_shrink_span() {
        let out = run(vec![Feature::new(10, 100), Feature::new(20, 30)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position(), (10, 100));
    }

    #[test]
    fn test_empty_input() {
        assert!(run(vec![]).is_empty());
    }

    #[test]
    fn test_fusion_is_idempotent() {
        let input = vec![
            Feature::new(10, 20).with_score(30.0),
            Feature::new(12, 18).with_score(5.0),
            Feature::new(20, 35).with_score(1.0),
            Feature::new(40, 50).with_score(2.0),
        ];
        let once = run(input);
        let twice = run(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unsorted_input_is_fatal() {
        let items = vec![Ok(Feature::new(50, 60)), Ok(Feature::new(10, 20))];
        let result: Result<Vec<_>> = Fusion::new(items.into_iter()).collect();
        assert!(result.is_err());
    }
}
