//! Filter features of one stream by overlap with another (whole-feature
//! selection).
//!
//! Emits every feature of `X`, unmodified, that overlaps any region
//! covered by `Y`. Consecutive overlapping `Y` features are extended
//! into one maximal window first, so a feature of `X` is reported at
//! most once regardless of how many `Y` features it touches.

use crate::error::Result;
use crate::feature::Feature;
use crate::stream::{Sentineled, Validated};

enum State {
    Prime,
    OpenWindow,
    Scan,
    Done,
}

/// Streaming whole-feature filter of `X` against the merged spans of `Y`.
pub struct Filter<X, Y>
where
    X: Iterator<Item = Result<Feature>>,
    Y: Iterator<Item = Result<Feature>>,
{
    x: Sentineled<Validated<X>>,
    y: Sentineled<Validated<Y>>,
    cur_x: Feature,
    cur_y: Feature,
    open: i64,
    close: i64,
    state: State,
}

impl<X, Y> Filter<X, Y>
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
            open: 0,
            close: 0,
            state: State::Prime,
        }
    }

    /// Extend the current `Y` window to its maximal merged span.
    fn open_window(&mut self) -> Result<()> {
        self.open = self.cur_y.start;
        self.close = self.cur_y.end;
        loop {
            if self.cur_y.is_sentinel() {
                return Ok(());
            }
            self.cur_y = self.y.pull()?;
            if self.cur_y.start > self.close {
                return Ok(());
            }
            if self.cur_y.end > self.close {
                self.close = self.cur_y.end;
            }
        }
    }
}

impl<X, Y> Iterator for Filter<X, Y>
where
    X: Iterator<Item = Result<Feature>>,
    Y: Iterator<Item = Result<Feature>>,
{
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Done => return None,
                State::Prime => {
                    self.cur_x = match self.x.pull() {
                        Ok(f) => f,
                        Err(e) => {
                            self.state = State::Done;
                            return Some(Err(e));
                        }
                    };
                    self.cur_y = match self.y.pull() {
                        Ok(f) => f,
                        Err(e) => {
                            self.state = State::Done;
                            return Some(Err(e));
                        }
                    };
                    if self.cur_x.is_sentinel() || self.cur_y.is_sentinel() {
                        self.state = State::Done;
                        return None;
                    }
                    self.state = State::OpenWindow;
                }
                State::OpenWindow => {
                    if let Err(e) = self.open_window() {
                        self.state = State::Done;
                        return Some(Err(e));
                    }
                    self.state = State::Scan;
                }
                State::Scan => {
                    if self.cur_x.start >= self.close {
                        self.state = State::OpenWindow;
                        continue;
                    }
                    let candidate = std::mem::replace(&mut self.cur_x, Feature::sentinel());
                    self.cur_x = match self.x.pull() {
                        Ok(f) => f,
                        Err(e) => {
                            self.state = State::Done;
                            return Some(Err(e));
                        }
                    };
                    let exhausted = self.cur_x.is_sentinel();
                    if exhausted {
                        self.state = State::Done;
                    }
                    if candidate.end > self.open {
                        return Some(Ok(candidate));
                    }
                    if exhausted {
                        return None;
                    }
                }
            }
        }
    }
}
