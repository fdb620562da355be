//! Generate synthetic tracks for tests and benchmarks.
//!
//! Deterministic reproducibility via explicit seeds: the same seed and
//! configuration always produce the same track.

use crate::feature::{Feature, Strand};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Configuration for synthetic track generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerateConfig {
    pub seed: u64,
    pub count: usize,
    /// Largest gap between consecutive features.
    pub max_gap: i64,
    /// Largest feature length.
    pub max_len: i64,
    /// Largest score.
    pub max_score: f64,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            count: 100,
            max_gap: 50,
            max_len: 20,
            max_score: 100.0,
        }
    }
}

/// Generate a sorted, non-overlapping signal track.
///
/// Segments are laid out left to right with random gaps, so the output
/// satisfies the preconditions of every signal operation.
pub fn signal_track(config: &GenerateConfig) -> Vec<Feature> {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut features = Vec::with_capacity(config.count);
    let mut position: i64 = 0;

    for _ in 0..config.count {
        position += rng.gen_range(1..=config.max_gap.max(1));
        let end = position + rng.gen_range(1..=config.max_len.max(1));
        let score = (rng.gen_range(0.0..config.max_score) * 10.0).round() / 10.0;
        features.push(Feature::scored(position, end, score));
        position = end;
    }
    features
}

/// Generate a sorted feature track, overlaps allowed.
pub fn feature_track(config: &GenerateConfig) -> Vec<Feature> {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let span = config.count as i64 * (config.max_gap + config.max_len).max(2);

    let mut starts: Vec<i64> = (0..config.count)
        .map(|_| rng.gen_range(0..span.max(1)))
        .collect();
    starts.sort_unstable();

    starts
        .into_iter()
        .enumerate()
        .map(|(i, start)| {
            let end = start + rng.gen_range(1..=config.max_len.max(1));
            let strand = match rng.gen_range(0..3) {
                0 => Strand::Forward,
                1 => Strand::Reverse,
                _ => Strand::Unknown,
            };
            Feature::new(start, end)
                .with_name(format!("feature_{}", i + 1))
                .with_score((rng.gen_range(0.0..config.max_score) * 10.0).round() / 10.0)
                .with_strand(strand)
        })
        .collect()
}
