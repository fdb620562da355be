//! Moving-average smoothing of a signal track.
//!
//! For every position `p` in `[0, l)` the output value is the mean of
//! the input scores over `[p-L, p+L]`, zero-padded outside the signal's
//! support. The result is run-length encoded: one segment per maximal
//! run of equal means, and runs of mean zero at the borders are never
//! emitted.
//!
//! The mean is maintained incrementally - each one-base step adds the
//! score entering at the right edge and subtracts the score leaving at
//! the left edge - so the cost per position is O(1) regardless of the
//! window radius.

use crate::error::{Result, TrackError};
use crate::feature::Feature;
use crate::stream::{Sentineled, Validated};
use std::collections::VecDeque;

/// Streaming moving-average smoother over one non-overlapping signal
/// stream.
pub struct WindowSmoothing<X>
where
    X: Iterator<Item = Result<Feature>>,
{
    signal: Sentineled<Validated<X>>,
    radius: i64,
    chrom_length: i64,
    window: VecDeque<Feature>,
    position: i64,
    same_since: i64,
    curt_mean: f64,
    next_mean: f64,
    inv_width: f64,
    primed: bool,
    done: bool,
}

impl<X> WindowSmoothing<X>
where
    X: Iterator<Item = Result<Feature>>,
{
    /// Fails fast on a negative radius; the window width is `2 * radius + 1`.
    pub fn new(signal: X, radius: i64, chrom_length: i64) -> Result<Self> {
        if radius < 0 {
            return Err(TrackError::InvalidConfig(format!(
                "window radius must be non-negative, got {}",
                radius
            )));
        }
        Ok(Self {
            signal: Sentineled::new(Validated::new(signal)),
            radius,
            chrom_length,
            window: VecDeque::new(),
            position: -radius - 2,
            same_since: -radius - 3,
            curt_mean: 0.0,
            next_mean: 0.0,
            inv_width: 1.0 / (2 * radius + 1) as f64,
            primed: false,
            done: false,
        })
    }

    /// Advance one base: update the running mean with the scores
    /// entering and leaving the window.
    fn step(&mut self) -> Result<()> {
        self.position += 1;
        let window_start = self.position - self.radius;
        let window_end = self.position + self.radius + 1;

        if self.window.back().map_or(false, |f| f.end < window_end) {
            let next = self.signal.pull()?;
            self.window.push_back(next);
        }
        if let Some(back) = self.window.back() {
            if back.start < window_end {
                self.next_mean += back.score * self.inv_width;
            }
        }
        if self.window.front().map_or(false, |f| f.end < window_start) {
            self.window.pop_front();
        }
        if let Some(front) = self.window.front() {
            if front.start < window_start {
                self.next_mean -= front.score * self.inv_width;
            }
        }
        Ok(())
    }
}

impl<X> Iterator for WindowSmoothing<X>
where
    X: Iterator<Item = Result<Feature>>,
{
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.primed {
            self.primed = true;
            match self.signal.pull() {
                Ok(first) => {
                    if first.is_sentinel() {
                        self.done = true;
                        return None;
                    }
                    self.window.push_back(first);
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        loop {
            if let Err(e) = self.step() {
                self.done = true;
                return Some(Err(e));
            }
            if self.position < 0 {
                self.curt_mean = 0.0;
                self.same_since = self.position;
                continue;
            }
            if self.position == self.chrom_length {
                self.done = true;
                if self.curt_mean != 0.0 {
                    return Some(Ok(Feature::scored(
                        self.same_since,
                        self.position,
                        self.curt_mean,
                    )));
                }
                return None;
            }
            if self.next_mean != self.curt_mean {
                let run = (self.curt_mean != 0.0).then(|| {
                    Feature::scored(self.same_since, self.position, self.curt_mean)
                });
                self.curt_mean = self.next_mean;
                self.same_since = self.position;
                if let Some(run) = run {
                    return Some(Ok(run));
                }
            }
        }
    }
}
