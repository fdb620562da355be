// Clippy allows for the whole crate
#![allow(clippy::should_implement_trait)]
#![allow(clippy::type_complexity)]

//! TRAL: Track Algebra Library
//!
//! Streaming set-algebraic operations on genomic feature tracks.
//!
//! # Features
//!
//! - **Streaming algorithms**: every operation is a pull-based iterator
//!   over one chromosome's sorted features, with O(window) memory
//! - **Composable**: operations nest like any other iterator adapter
//! - **Deterministic**: fixed tie-breaks, reproducible output
//!
//! # Example
//!
//! ```rust
//! use tral_genomics::{feature::Feature, ops::Fusion};
//!
//! let track = vec![Feature::new(10, 20), Feature::new(20, 30)];
//! let fused: Vec<Feature> = Fusion::new(track.into_iter().map(Ok))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(fused.len(), 1);
//! assert_eq!((fused[0].start, fused[0].end), (10, 30));
//! ```

pub mod bed;
pub mod config;
pub mod error;
pub mod feature;
pub mod generate;
pub mod genome;
pub mod ops;
pub mod stream;
pub mod track;

// Re-export commonly used types
pub use error::{Result, TrackError};
pub use feature::{Feature, Strand};
pub use genome::Genome;
pub use track::Track;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bed::{BedReader, BedWriter};
    pub use crate::error::{Result, TrackError};
    pub use crate::feature::{Feature, Strand};
    pub use crate::genome::Genome;
    pub use crate::ops::{
        Complement, Concatenate, CustomBoolean, Difference, Filter, Fusion, MeanKind,
        MeanScoreByFeature, MergeScores, Neighborhood, NeighborhoodConfig, Overlap, Threshold,
        WindowSmoothing,
    };
    pub use crate::stream::{FeatureStream, Sentineled, Validated};
    pub use crate::track::Track;
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_basic_workflow() {
        use crate::bed::BedReader;
        use crate::ops::Fusion;
        use crate::track::Track;

        let content = "chr1\t100\t200\nchr1\t150\t250\nchr1\t300\t400\n";
        let track = Track::from_reader(BedReader::new(content.as_bytes())).unwrap();

        let merged: Vec<_> = Fusion::new(track.read("chr1"))
            .collect::<crate::Result<_>>()
            .unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].start, 100);
        assert_eq!(merged[0].end, 250);
    }

    #[test]
    fn test_overlap_workflow() {
        use crate::bed::BedReader;
        use crate::ops::Overlap;
        use crate::track::Track;

        let a = Track::from_reader(BedReader::new(
            "chr1\t100\t200\nchr1\t300\t400\n".as_bytes(),
        ))
        .unwrap();
        let b = Track::from_reader(BedReader::new("chr1\t150\t250\n".as_bytes())).unwrap();

        let hits: Vec<_> = Overlap::new(a.read("chr1"), b.read("chr1"))
            .collect::<crate::Result<_>>()
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!((hits[0].start, hits[0].end), (150, 200));
    }
}
