//! N-ary concatenation of sorted streams.
//!
//! A k-way merge that repeatedly emits, among all active stream heads,
//! the one with the smallest `(start, end)`, verbatim. Nothing is
//! combined or deduplicated; together with fusion this realizes the
//! boolean OR.
//!
//! The active set is scanned linearly per emission - the number of
//! input tracks is small, so a heap would buy nothing.

use crate::error::Result;
use crate::feature::Feature;
use crate::stream::{FeatureStream, Sentineled, Validated};

struct Cursor {
    head: Feature,
    stream: Sentineled<Validated<FeatureStream>>,
}

/// Streaming k-way merge over any number of sorted streams.
pub struct Concatenate {
    pending: Vec<FeatureStream>,
    active: Vec<Cursor>,
    primed: bool,
    done: bool,
}

impl Concatenate {
    pub fn new(streams: Vec<FeatureStream>) -> Self {
        Self {
            pending: streams,
            active: Vec::new(),
            primed: false,
            done: false,
        }
    }

    fn prime(&mut self) -> Result<()> {
        for boxed in self.pending.drain(..) {
            let mut stream = Sentineled::new(Validated::new(boxed));
            let head = stream.pull()?;
            if !head.is_sentinel() {
                self.active.push(Cursor { head, stream });
            }
        }
        Ok(())
    }

    /// Index of the cursor holding the lowest `(start, end)` head.
    fn lowest(&self) -> usize {
        let mut best = 0;
        for (i, cursor) in self.active.iter().enumerate().skip(1) {
            if cursor.head.position() < self.active[best].head.position() {
                best = i;
            }
        }
        best
    }
}

impl Iterator for Concatenate {
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
        if self.active.is_empty() {
            self.done = true;
            return None;
        }

        let i = self.lowest();
        let next_head = match self.active[i].stream.pull() {
            Ok(f) => f,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        let emitted = if next_head.is_sentinel() {
            self.active.swap_remove(i).head
        } else {
            std::mem::replace(&mut self.active[i].head, next_head)
        };
        Some(Ok(emitted))
    }
}
