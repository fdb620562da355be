//! Sentinel termination for feature streams.
//!
//! Merge loops over several sorted streams are much simpler when
//! exhaustion looks like a maximal element instead of an end-of-stream
//! branch. [`Sentineled`] wraps any feature stream so that, once the
//! source runs dry, every further pull yields [`Feature::sentinel`].

use crate::error::Result;
use crate::feature::Feature;

/// A boxed per-chromosome feature stream.
///
/// Used where the number or type of input streams is only known at run
/// time (N-ary operations, composed operations).
pub type FeatureStream = Box<dyn Iterator<Item = Result<Feature>> + Send>;

/// Adapter that yields the source elements followed by an endless run
/// of sentinels.
///
/// An error from the source is yielded once; afterwards the stream
/// behaves as exhausted, so a merge loop that aborts on the error never
/// observes anything beyond it.
pub struct Sentineled<I> {
    source: Option<I>,
}

impl<I> Sentineled<I>
where
    I: Iterator<Item = Result<Feature>>,
{
    pub fn new(source: I) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// Pull the next feature. Exhaustion appears as the sentinel, never
    /// as `None`.
    pub fn pull(&mut self) -> Result<Feature> {
        match self.source.as_mut().and_then(|source| source.next()) {
            Some(Ok(feature)) => Ok(feature),
            Some(Err(e)) => {
                self.source = None;
                Err(e)
            }
            None => {
                self.source = None;
                Ok(Feature::sentinel())
            }
        }
    }
}

impl<I> Iterator for Sentineled<I>
where
    I: Iterator<Item = Result<Feature>>,
{
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.pull())
    }
}
