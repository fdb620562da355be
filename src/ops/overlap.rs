//! Pairwise overlap sweep (boolean AND).
//!
//! Computes the pieces of overlap between two sorted streams, emitting
//! one combined feature per overlapping pair.
//!
//! # Algorithm
//!
//! fjoin-style two-pointer sweep ("Simple and Efficient Computation of
//! Feature Overlap", J. Comp. Biol. 13(8), 2006):
//! 1. Keep a sliding window per stream of features that may still
//!    overlap future elements of the other stream
//! 2. Advance whichever cursor has the smaller start; on equal starts
//!    the Y cursor advances (fixed tie-break, pinned by tests)
//! 3. Before advancing, evict from the opposite window everything
//!    ending at or before the cursor start, then emit one combined
//!    feature per surviving overlap
//! 4. Insert the cursor feature into its own window only if it can
//!    still overlap the other stream's head
//!
//! # Memory Complexity
//!
//! O(k) where k = maximum number of mutually overlapping features alive
//! at any coordinate, never total input size.

use crate::error::Result;
use crate::feature::{join_names, Feature};
use crate::stream::{Sentineled, Validated};
use std::collections::VecDeque;

/// Warning threshold for sweep window size (potential pathological case).
const WINDOW_WARNING_THRESHOLD: usize = 100_000;

/// Combine an overlapping pair into one output feature.
///
/// The span is the intersection, the score the arithmetic mean, the
/// strand conserved only when shared, and the trailing columns are
/// taken from the second operand (the windowed feature).
fn combine(a: &Feature, b: &Feature) -> Feature {
    Feature {
        start: a.start.max(b.start),
        end: a.end.min(b.end),
        name: join_names(&a.name, &b.name),
        score: (a.score + b.score) / 2.0,
        strand: a.strand.combine(b.strand),
        rest: b.rest.clone(),
    }
}

/// Streaming overlap of two sorted feature streams.
pub struct Overlap<X, Y>
where
    X: Iterator<Item = Result<Feature>>,
    Y: Iterator<Item = Result<Feature>>,
{
    x: Sentineled<Validated<X>>,
    y: Sentineled<Validated<Y>>,
    cur_x: Feature,
    cur_y: Feature,
    window_x: Vec<Feature>,
    window_y: Vec<Feature>,
    pending: VecDeque<Feature>,
    primed: bool,
    done: bool,
    warned: bool,
}

impl<X, Y> Overlap<X, Y>
where
    X: Iterator<Item = Result<Feature>>,
    Y: Iterator<Item = Result<Feature>>,
{
    pub fn new(x: X, y: Y) -> Self {
        Self {
            x: Sentineled::new(Validated::new(x)),
            y: Sentineled::new(Validated::new(y)),
            cur_x: Feature::sentinel(),
            cur_y: Feature::sentinel(),
            window_x: Vec::new(),
            window_y: Vec::new(),
            pending: VecDeque::new(),
            primed: false,
            done: false,
            warned: false,
        }
    }

    /// One sweep step: advance the leftmost cursor, emitting into the
    /// pending queue.
    fn step(&mut self) -> Result<()> {
        if self.cur_x.start < self.cur_y.start {
            let cur = &self.cur_x;
            self.window_y.retain(|f| f.end > cur.start);
            for f in self.window_y.iter().filter(|f| cur.end > f.start) {
                self.pending.push_back(combine(cur, f));
            }
            if self.cur_x.end >= self.cur_y.start {
                self.window_x.push(self.cur_x.clone());
            }
            self.cur_x = self.x.pull()?;
        } else {
            let cur = &self.cur_y;
            self.window_x.retain(|f| f.end > cur.start);
            for f in self.window_x.iter().filter(|f| cur.end > f.start) {
                self.pending.push_back(combine(cur, f));
            }
            if self.cur_y.end >= self.cur_x.start {
                self.window_y.push(self.cur_y.clone());
            }
            self.cur_y = self.y.pull()?;
        }

        if !self.warned
            && self.window_x.len().max(self.window_y.len()) > WINDOW_WARNING_THRESHOLD
        {
            self.warned = true;
            eprintln!(
                "warning: overlap sweep window exceeds {} features; \
                 input may be pathologically nested",
                WINDOW_WARNING_THRESHOLD
            );
        }
        Ok(())
    }
}

impl<X, Y> Iterator for Overlap<X, Y>
where
    X: Iterator<Item = Result<Feature>>,
    Y: Iterator<Item = Result<Feature>>,
{
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(feature) = self.pending.pop_front() {
                return Some(Ok(feature));
            }
            if self.done {
                return None;
            }
            if !self.primed {
                self.primed = true;
                self.cur_x = match self.x.pull() {
                    Ok(f) => f,
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                };
                self.cur_y = match self.y.pull() {
                    Ok(f) => f,
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                };
            }
            if self.cur_x.is_sentinel() && self.cur_y.is_sentinel() {
                self.done = true;
                continue;
            }
            if let Err(e) = self.step() {
                self.done = true;
                return Some(Err(e));
            }
        }
    }
}
