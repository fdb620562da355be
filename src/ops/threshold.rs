//! Score thresholding.
//!
//! Passes through every feature whose score is at or above the cutoff;
//! everything else is dropped. Order and metadata are untouched.

use crate::error::Result;
use crate::feature::Feature;
use crate::stream::Validated;

/// Streaming score filter over one sorted stream.
pub struct Threshold<I>
where
    I: Iterator<Item = Result<Feature>>,
{
    source: Validated<I>,
    cutoff: f64,
    done: bool,
}

impl<I> Threshold<I>
where
    I: Iterator<Item = Result<Feature>>,
{
    pub fn new(source: I, cutoff: f64) -> Self {
        Self {
            source: Validated::new(source),
            cutoff,
            done: false,
        }
    }
}

impl<I> Iterator for Threshold<I>
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
                    return None;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(feature)) => {
                    if feature.score >= self.cutoff {
                        return Some(Ok(feature));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: Vec<Feature>, cutoff: f64) -> Vec<Feature> {
        Threshold::new(input.into_iter().map(Ok), cutoff)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        let out = run(
            vec![
                Feature::new(0, 10).with_score(10.0),
                Feature::new(20, 30).with_score(4.0),
                Feature::new(40, 50).with_score(5.0),
            ],
            5.0,
        );
        let scores: Vec<f64> = out.iter().map(|f| f.score).collect();
        assert_eq!(scores, vec![10.0, 5.0]);
    }

    #[test]
    fn test_all_below_cutoff() {
        let out = run(vec![Feature::new(0, 10).with_score(1.0)], 2.0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(run(vec![], 0.0).is_empty());
    }
}
