//! Streaming track manipulations.
//!
//! Every operation here consumes one or more sorted per-chromosome
//! feature streams and is itself an `Iterator<Item = Result<Feature>>`,
//! so operations compose by plain nesting. Inputs are validated inline
//! (sort order, non-empty intervals) and the first violation surfaces
//! as an error mid-stream; output already emitted stays valid.

pub mod complement;
pub mod concatenate;
pub mod custom_boolean;
pub mod difference;
pub mod filter;
pub mod fusion;
pub mod mean_score_by_feature;
pub mod merge_scores;
pub mod neighborhood;
pub mod overlap;
pub mod registry;
pub mod threshold;
pub mod window_smoothing;

pub use complement::Complement;
pub use concatenate::Concatenate;
pub use custom_boolean::CustomBoolean;
pub use difference::Difference;
pub use filter::Filter;
pub use fusion::Fusion;
pub use mean_score_by_feature::MeanScoreByFeature;
pub use merge_scores::{MeanKind, MergeScores};
pub use neighborhood::{Neighborhood, NeighborhoodConfig};
pub use overlap::Overlap;
pub use registry::{find, InputKind, Manipulation, MANIPULATIONS};
pub use threshold::Threshold;
pub use window_smoothing::WindowSmoothing;
