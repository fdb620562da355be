//! Core feature types for genomic track representation.
//!
//! A [`Feature`] is one row of a track: a 0-based, half-open interval on
//! some chromosome, plus the standard annotation columns. The chromosome
//! itself is carried out-of-band - every algorithm in this crate operates
//! on one chromosome's stream at a time.

use std::cmp::Ordering;
use std::fmt;

/// Canonical field names, in the order the crate lays them out.
pub const FIELD_START: &str = "start";
pub const FIELD_END: &str = "end";
pub const FIELD_NAME: &str = "name";
pub const FIELD_SCORE: &str = "score";
pub const FIELD_STRAND: &str = "strand";
/// Placeholder for "any trailing columns" in a declared schema.
pub const FIELD_REST: &str = "...";

/// The full standard schema.
pub const FEATURE_FIELDS: &[&str] = &[
    FIELD_START,
    FIELD_END,
    FIELD_NAME,
    FIELD_SCORE,
    FIELD_STRAND,
    FIELD_REST,
];

/// Schema of a pure signal track.
pub const SIGNAL_FIELDS: &[&str] = &[FIELD_START, FIELD_END, FIELD_SCORE];

/// Schema of a bare interval track.
pub const INTERVAL_FIELDS: &[&str] = &[FIELD_START, FIELD_END];

/// Strand orientation, encoded as {1, 0, -1} in numeric form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    #[default]
    Unknown,
}

impl Strand {
    /// Parse from the BED character encoding.
    pub fn from_char(c: char) -> Self {
        match c {
            '+' => Strand::Forward,
            '-' => Strand::Reverse,
            _ => Strand::Unknown,
        }
    }

    /// Parse from the {-1, 0, 1} integer encoding.
    pub fn from_int(i: i8) -> Self {
        match i {
            1 => Strand::Forward,
            -1 => Strand::Reverse,
            _ => Strand::Unknown,
        }
    }

    /// The {-1, 0, 1} integer encoding.
    #[inline]
    pub fn as_int(self) -> i8 {
        match self {
            Strand::Forward => 1,
            Strand::Reverse => -1,
            Strand::Unknown => 0,
        }
    }

    /// Strand conservation rule used by every combining operation:
    /// equal strands are kept, anything else collapses to `Unknown`.
    #[inline]
    pub fn combine(self, other: Strand) -> Strand {
        if self == other {
            self
        } else {
            Strand::Unknown
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
            Strand::Unknown => write!(f, "."),
        }
    }
}

/// A single track feature on one chromosome.
///
/// Coordinates are 0-based, half-open and signed: flanking-region
/// arithmetic is allowed to run below zero before clipping. Real
/// features satisfy `start < end`; the sentinel is the one exception.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    pub start: i64,
    pub end: i64,
    pub name: String,
    pub score: f64,
    pub strand: Strand,
    /// Columns beyond the standard five, carried verbatim.
    pub rest: Vec<String>,
}

impl Feature {
    /// Create a bare interval feature.
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }

    /// Create a signal segment.
    pub fn scored(start: i64, end: i64, score: f64) -> Self {
        Self {
            start,
            end,
            score,
            ..Self::default()
        }
    }

    /// Set the name (builder pattern).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the score (builder pattern).
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Set the strand (builder pattern).
    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = strand;
        self
    }

    /// The maximal synthetic feature appended to every stream by
    /// [`crate::stream::Sentineled`]. Compares greater than any real
    /// feature under the `(start, end)` order.
    pub fn sentinel() -> Self {
        Self {
            start: i64::MAX,
            end: i64::MAX,
            ..Self::default()
        }
    }

    /// True for the stream-termination sentinel.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.start == i64::MAX
    }

    /// Interval length in base pairs.
    #[inline]
    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    /// True if the interval covers no base.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Half-open overlap test against another feature on the same
    /// chromosome.
    #[inline]
    pub fn overlaps(&self, other: &Feature) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Number of bases shared with another feature.
    #[inline]
    pub fn overlap_length(&self, other: &Feature) -> i64 {
        let lo = self.start.max(other.start);
        let hi = self.end.min(other.end);
        (hi - lo).max(0)
    }

    /// The `(start, end)` sort key every sorted stream obeys.
    #[inline]
    pub fn position(&self) -> (i64, i64) {
        (self.start, self.end)
    }

    /// Ordering by `(start, end)`; annotation columns never participate.
    #[inline]
    pub fn cmp_position(&self, other: &Feature) -> Ordering {
        self.position().cmp(&other.position())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.start, self.end, self.name, self.score, self.strand
        )?;
        for field in &self.rest {
            write!(f, "\t{}", field)?;
        }
        Ok(())
    }
}

/// Join two feature names the way combining operations report them:
/// non-empty names concatenated with `" + "`, empty names dropped.
pub fn join_names(a: &str, b: &str) -> String {
    if !a.is_empty() && !b.is_empty() {
        format!("{} + {}", a, b)
    } else if !a.is_empty() {
        a.to_string()
    } else {
        b.to_string()
    }
}
