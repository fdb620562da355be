//! Length-weighted mean of a signal track inside each feature.
//!
//! Given a non-overlapping signal stream `X` and a feature stream `Y`,
//! replaces every `Y` score with the average of `X` over that feature's
//! span: each overlapping segment contributes `overlap_length * score`,
//! and the total is divided by the feature length. Bases of the feature
//! not covered by any segment count as zero.
//!
//! A sliding list of `X` segments is kept; segments wholly left of the
//! current feature are discarded from the front as the sweep advances.

use crate::error::Result;
use crate::feature::Feature;
use crate::stream::{Sentineled, Validated};
use std::collections::VecDeque;

/// Streaming per-feature signal averaging.
pub struct MeanScoreByFeature<X, Y>
where
    X: Iterator<Item = Result<Feature>>,
    Y: Iterator<Item = Result<Feature>>,
{
    signal: Sentineled<Validated<X>>,
    features: Validated<Y>,
    window: VecDeque<Feature>,
    /// Start of the most recently pulled signal segment; `i64::MAX`
    /// once the signal is exhausted.
    ahead: i64,
    done: bool,
}

impl<X, Y> MeanScoreByFeature<X, Y>
where
    X: Iterator<Item = Result<Feature>>,
    Y: Iterator<Item = Result<Feature>>,
{
    pub fn new(signal: X, features: Y) -> Self {
        Self {
            signal: Sentineled::new(Validated::new(signal)),
            features: Validated::new(features),
            window: VecDeque::new(),
            ahead: i64::MIN,
            done: false,
        }
    }

    fn score_feature(&mut self, feature: &Feature) -> Result<f64> {
        // Make sure every segment that could touch this feature is in.
        while self.ahead < feature.end {
            let segment = self.signal.pull()?;
            self.ahead = segment.start;
            if segment.end > feature.start {
                self.window.push_back(segment);
            }
        }
        // Drop segments wholly left of this feature.
        while matches!(self.window.front(), Some(f) if f.end <= feature.start) {
            self.window.pop_front();
        }

        let mut weighted = 0.0;
        for segment in &self.window {
            if segment.start >= feature.end {
                continue;
            }
            let lo = segment.start.max(feature.start);
            let hi = segment.end.min(feature.end);
            weighted += (hi - lo) as f64 * segment.score;
        }
        Ok(weighted / feature.len() as f64)
    }
}

impl<X, Y> Iterator for MeanScoreByFeature<X, Y>
where
    X: Iterator<Item = Result<Feature>>,
    Y: Iterator<Item = Result<Feature>>,
{
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.features.next() {
            None => {
                self.done = true;
                None
            }
            Some(Err(e)) => {
                self.done = true;
                Some(Err(e))
            }
            Some(Ok(mut feature)) => match self.score_feature(&feature) {
                Ok(score) => {
                    feature.score = score;
                    Some(Ok(feature))
                }
                Err(e) => {
                    self.done = true;
                    Some(Err(e))
                }
            },
        }
    }
}
