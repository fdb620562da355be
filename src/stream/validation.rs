//! Sort and interval validation for streaming operations.
//!
//! Every sweep algorithm assumes its input is delivered in
//! non-decreasing `start` order and that each feature satisfies
//! `start < end`. The algorithms never re-sort; a violation is a fatal
//! input error raised at the point of detection.
//!
//! Only the primary (start) order is checked: combining operations
//! guarantee start order for their output but leave the order among
//! equal starts unspecified, and validating `(start, end)` here would
//! reject legal compositions.

use crate::error::{Result, TrackError};
use crate::feature::Feature;

/// Inline validator for use within streaming loops.
///
/// Checks, per feature:
/// 1. `start < end` (half-open interval is non-empty)
/// 2. `start` is non-decreasing relative to the previous feature
#[derive(Debug, Default)]
pub struct OrderValidator {
    prev: Option<(i64, i64)>,
}

impl OrderValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that the given feature maintains stream order.
    #[inline]
    pub fn check(&mut self, feature: &Feature) -> Result<()> {
        if feature.start >= feature.end {
            return Err(TrackError::InvalidInterval {
                start: feature.start,
                end: feature.end,
            });
        }
        if let Some((prev_start, prev_end)) = self.prev {
            if feature.start < prev_start {
                return Err(TrackError::Unsorted {
                    prev_start,
                    prev_end,
                    start: feature.start,
                    end: feature.end,
                });
            }
        }
        self.prev = Some(feature.position());
        Ok(())
    }

    /// Reset validator state (for a new chromosome).
    pub fn reset(&mut self) {
        self.prev = None;
    }
}

/// Stream adapter applying [`OrderValidator`] to every element.
///
/// The first violation is yielded as an error and the stream ends;
/// everything emitted before it is a valid prefix.
pub struct Validated<I> {
    source: I,
    validator: OrderValidator,
    failed: bool,
}

impl<I> Validated<I>
where
    I: Iterator<Item = Result<Feature>>,
{
    pub fn new(source: I) -> Self {
        Self {
            source,
            validator: OrderValidator::new(),
            failed: false,
        }
    }
}

impl<I> Iterator for Validated<I>
where
    I: Iterator<Item = Result<Feature>>,
{
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.source.next() {
            Some(Ok(feature)) => match self.validator.check(&feature) {
                Ok(()) => Some(Ok(feature)),
                Err(e) => {
                    self.failed = true;
                    Some(Err(e))
                }
            },
            Some(Err(e)) => {
                self.failed = true;
                Some(Err(e))
            }
            None => None,
        }
    }
}
