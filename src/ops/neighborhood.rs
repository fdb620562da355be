//! Flanking-region generation around features.
//!
//! Derives zero, one, or two regions per input feature from four
//! offsets, then clips everything to `[0, l)` and drops regions that
//! end up empty or entirely out of bounds. Which offsets are supplied
//! selects the mode, resolved once at construction:
//!
//! - `before_start` + `after_end`: one region spanning the widened
//!   feature
//! - `before_start` + `after_start`: one region around the start
//! - `before_end` + `after_end`: one region around the end
//! - all four: two regions per feature, start-flank then end-flank
//!
//! With `on_strand` set, the offsets are mirrored and negated for every
//! feature of the stream (a whole-track upstream/downstream flip); the
//! flag does not consult per-feature strands.

use crate::error::{Result, TrackError};
use crate::feature::Feature;
use crate::stream::Validated;

/// Offset configuration for [`Neighborhood`].
///
/// Offsets may be negative; unsupported combinations are rejected at
/// construction.
#[derive(Debug, Clone, Default)]
pub struct NeighborhoodConfig {
    pub before_start: Option<i64>,
    pub after_end: Option<i64>,
    pub after_start: Option<i64>,
    pub before_end: Option<i64>,
    pub on_strand: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlankMode {
    /// `before_start` + `after_end`: widen the whole feature.
    Whole,
    /// `before_start` + `after_start`.
    AroundStart,
    /// `before_end` + `after_end`.
    AroundEnd,
    /// All four offsets: start-flank and end-flank per feature.
    BothEnds,
}

/// Streaming flank generator over one sorted stream.
pub struct Neighborhood<X>
where
    X: Iterator<Item = Result<Feature>>,
{
    source: Validated<X>,
    mode: FlankMode,
    on_strand: bool,
    before_start: i64,
    after_end: i64,
    after_start: i64,
    before_end: i64,
    chrom_length: i64,
    /// End-flank waiting to be emitted in `BothEnds` mode.
    queued: Option<Feature>,
    done: bool,
}

impl<X> Neighborhood<X>
where
    X: Iterator<Item = Result<Feature>>,
{
    pub fn new(source: X, chrom_length: i64, config: NeighborhoodConfig) -> Result<Self> {
        let mode = match (
            config.before_start,
            config.after_end,
            config.after_start,
            config.before_end,
        ) {
            (Some(_), Some(_), Some(_), Some(_)) => FlankMode::BothEnds,
            (Some(_), Some(_), None, None) => FlankMode::Whole,
            (Some(_), None, Some(_), None) => FlankMode::AroundStart,
            (None, Some(_), None, Some(_)) => FlankMode::AroundEnd,
            _ => {
                return Err(TrackError::InvalidConfig(
                    "unsupported offset combination: give before_start+after_end, \
                     before_start+after_start, before_end+after_end, or all four"
                        .to_string(),
                ))
            }
        };

        let before_start = config.before_start.unwrap_or(0);
        let after_end = config.after_end.unwrap_or(0);
        let after_start = config.after_start.unwrap_or(0);
        let before_end = config.before_end.unwrap_or(0);

        if matches!(mode, FlankMode::AroundStart | FlankMode::BothEnds)
            && before_start > after_start
        {
            return Err(TrackError::InvalidConfig(
                "'before_start' cannot be larger than 'after_start'".to_string(),
            ));
        }
        if matches!(mode, FlankMode::AroundEnd | FlankMode::BothEnds) && before_end > after_end {
            return Err(TrackError::InvalidConfig(
                "'before_end' cannot be larger than 'after_end'".to_string(),
            ));
        }

        Ok(Self {
            source: Validated::new(source),
            mode,
            on_strand: config.on_strand,
            before_start,
            after_end,
            after_start,
            before_end,
            chrom_length,
            queued: None,
            done: false,
        })
    }

    /// Clip a derived region to `[0, l)`; `None` when nothing is left.
    fn clip(&self, mut flank: Feature) -> Option<Feature> {
        if flank.end < 0 || flank.start > self.chrom_length {
            return None;
        }
        flank.start = flank.start.max(0);
        flank.end = flank.end.min(self.chrom_length);
        if flank.start < flank.end {
            Some(flank)
        } else {
            None
        }
    }

    fn derive(&self, span: (i64, i64), feature: &Feature) -> Feature {
        let mut flank = feature.clone();
        flank.start = span.0;
        flank.end = span.1;
        flank
    }

    /// The flank span(s) for one feature: the primary region, plus the
    /// end-flank in `BothEnds` mode.
    fn flanks(&self, feature: &Feature) -> (Feature, Option<Feature>) {
        let (start, end) = (feature.start, feature.end);
        if !self.on_strand {
            match self.mode {
                FlankMode::BothEnds => (
                    self.derive((start + self.before_start, start + self.after_start), feature),
                    Some(self.derive((end + self.before_end, end + self.after_end), feature)),
                ),
                FlankMode::AroundStart => (
                    self.derive((start + self.before_start, start + self.after_start), feature),
                    None,
                ),
                FlankMode::AroundEnd => (
                    self.derive((end + self.before_end, end + self.after_end), feature),
                    None,
                ),
                FlankMode::Whole => (
                    self.derive((start + self.before_start, end + self.after_end), feature),
                    None,
                ),
            }
        } else {
            match self.mode {
                FlankMode::BothEnds => (
                    self.derive((start - self.after_end, start - self.before_end), feature),
                    Some(self.derive((end - self.after_start, end - self.before_start), feature)),
                ),
                FlankMode::AroundStart => (
                    self.derive((end - self.after_start, end - self.before_start), feature),
                    None,
                ),
                FlankMode::AroundEnd => (
                    self.derive((start - self.after_end, start - self.before_end), feature),
                    None,
                ),
                FlankMode::Whole => (
                    self.derive((start - self.after_end, end - self.before_start), feature),
                    None,
                ),
            }
        }
    }
}

impl<X> Iterator for Neighborhood<X>
where
    X: Iterator<Item = Result<Feature>>,
{
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(flank) = self.queued.take() {
                if let Some(clipped) = self.clip(flank) {
                    return Some(Ok(clipped));
                }
            }
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
                    let (first, second) = self.flanks(&feature);
                    self.queued = second;
                    if let Some(clipped) = self.clip(first) {
                        return Some(Ok(clipped));
                    }
                }
            }
        }
    }
}
