//! Complement (boolean NOT).
//!
//! Emits every gap of `[0, l)` not covered by the input stream, where
//! `l` is the chromosome length supplied by the metadata layer.
//!
//! Overlapping input features are tolerated: the covered region is
//! tracked as a running maximum, so the input does not have to be fused
//! first. Output features carry only a span.

use crate::error::Result;
use crate::feature::Feature;
use crate::stream::Validated;

/// Streaming complement of one sorted stream against `[0, l)`.
pub struct Complement<I>
where
    I: Iterator<Item = Result<Feature>>,
{
    source: Validated<I>,
    chrom_length: i64,
    covered_end: i64,
    done: bool,
}

impl<I> Complement<I>
where
    I: Iterator<Item = Result<Feature>>,
{
    pub fn new(source: I, chrom_length: i64) -> Self {
        Self {
            source: Validated::new(source),
            chrom_length,
            covered_end: 0,
            done: false,
        }
    }
}

impl<I> Iterator for Complement<I>
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
                    if self.covered_end < self.chrom_length {
                        return Some(Ok(Feature::new(self.covered_end, self.chrom_length)));
                    }
                    return None;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                Some(Ok(feature)) => {
                    if feature.start > self.covered_end {
                        let gap = Feature::new(self.covered_end, feature.start);
                        self.covered_end = feature.end;
                        return Some(Ok(gap));
                    }
                    self.covered_end = self.covered_end.max(feature.end);
                }
            }
        }
    }
}
