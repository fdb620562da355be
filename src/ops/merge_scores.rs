//! N-ary piecewise score merge across signal tracks.
//!
//! Sweeps all streams at once, cutting the axis at every boundary
//! (start or end) of an active segment. Between consecutive boundaries
//! the scores of all covering segments are averaged and one output
//! segment is emitted; sub-intervals covered by nothing are skipped.
//!
//! The divisor is the total number of input streams, fixed at call
//! time - streams that are empty or become exhausted still count. The
//! geometric variant computes `sum(scores).powf(1/n)`, which is not the
//! textbook geometric mean; it reproduces the historical behavior of
//! this operation and is pinned by tests. Do not "fix" it.

use crate::error::{Result, TrackError};
use crate::feature::Feature;
use crate::stream::{FeatureStream, Sentineled, Validated};

/// Averaging function applied to the covering scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeanKind {
    /// `sum(scores) / n`
    Arithmetic,
    /// `sum(scores).powf(1 / n)` - as historically implemented.
    Geometric,
}

impl MeanKind {
    #[inline]
    fn apply(self, scores: &[f64], denom: f64) -> f64 {
        let sum: f64 = scores.iter().sum();
        match self {
            MeanKind::Arithmetic => sum * denom,
            MeanKind::Geometric => sum.powf(denom),
        }
    }
}

/// Streaming piecewise mean over any number of signal streams.
///
/// Each input must be internally non-overlapping and sorted. All
/// streams must agree on the number of trailing columns; the first
/// offending record is fatal.
pub struct MergeScores {
    pending: Vec<FeatureStream>,
    streams: Vec<Sentineled<Validated<FeatureStream>>>,
    elements: Vec<Feature>,
    kind: MeanKind,
    denom: f64,
    rest_arity: Option<usize>,
    primed: bool,
    done: bool,
}

impl MergeScores {
    pub fn new(streams: Vec<FeatureStream>, kind: MeanKind) -> Self {
        // The divisor counts every supplied stream, empty ones included.
        let denom = if streams.is_empty() {
            0.0
        } else {
            1.0 / streams.len() as f64
        };
        Self {
            pending: streams,
            streams: Vec::new(),
            elements: Vec::new(),
            kind,
            denom,
            rest_arity: None,
            primed: false,
            done: false,
        }
    }

    fn check_arity(&mut self, stream_idx: usize, feature: &Feature) -> Result<()> {
        match self.rest_arity {
            None => {
                self.rest_arity = Some(feature.rest.len());
                Ok(())
            }
            Some(expected) if expected == feature.rest.len() => Ok(()),
            Some(expected) => Err(TrackError::FieldMismatch {
                stream: stream_idx,
                expected,
                found: feature.rest.len(),
            }),
        }
    }

    fn prime(&mut self) -> Result<()> {
        for boxed in self.pending.drain(..) {
            let mut stream = Sentineled::new(Validated::new(boxed));
            let head = stream.pull()?;
            // Streams that are empty from the start are dropped here
            // but were already counted in the divisor.
            if !head.is_sentinel() {
                self.streams.push(stream);
                self.elements.push(head);
            }
        }
        for i in 0..self.elements.len() {
            let f = self.elements[i].clone();
            self.check_arity(i, &f)?;
        }
        Ok(())
    }

    /// One sweep segment: returns the emitted feature, if any sub-interval
    /// between the next two boundaries is covered.
    fn segment(&mut self) -> Result<Option<Feature>> {
        let start = self.elements.iter().map(|f| f.start).min().unwrap();
        let end = self
            .elements
            .iter()
            .filter(|f| f.start > start)
            .map(|f| f.start)
            .chain(self.elements.iter().map(|f| f.end))
            .min()
            .unwrap();

        let scores: Vec<f64> = self
            .elements
            .iter()
            .filter(|f| f.end > start && f.start < end)
            .map(|f| f.score)
            .collect();

        for i in (0..self.elements.len()).rev() {
            if self.elements[i].start < end {
                self.elements[i].start = end;
            }
            if self.elements[i].end <= end {
                let next = self.streams[i].pull()?;
                if next.is_sentinel() {
                    self.streams.remove(i);
                    self.elements.remove(i);
                } else {
                    self.check_arity(i, &next)?;
                    self.elements[i] = next;
                }
            }
        }

        if scores.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Feature::scored(
                start,
                end,
                self.kind.apply(&scores, self.denom),
            )))
        }
    }
}

impl Iterator for MergeScores {
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.primed {
            self.primed = true;
            if let Err(e) = self.prime() {
                self.done = true;
                return Some(Err(e));
            }
        }
        while !self.elements.is_empty() {
            match self.segment() {
                Ok(Some(feature)) => return Some(Ok(feature)),
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        self.done = true;
        None
    }
}
