//! Generalized N-ary boolean combination.
//!
//! Takes any number of feature streams and a predicate over their
//! activity: each input is fused first, then every start/end boundary
//! toggles that stream's bit, and between consecutive distinct
//! boundaries an interval is emitted whenever the predicate holds. The
//! emitted segments are fused once more, so the output is disjoint and
//! non-adjacent like every other boolean result.
//!
//! `win_size` bounds how many base pairs of boundary events are loaded
//! per iteration; memory is proportional to the number of boundaries
//! inside one window, not to track size.
//!
//! Streams that are empty from the start keep their slot in the
//! activity vector (permanently inactive), so predicate indices always
//! match the order in which the tracks were supplied.

use crate::error::{Result, TrackError};
use crate::feature::Feature;
use crate::ops::fusion::Fusion;
use crate::stream::{FeatureStream, Sentineled};

/// Raw predicate-true segments, before the final fusion pass.
struct Segments<F>
where
    F: FnMut(&[bool]) -> bool,
{
    tracks: Vec<Sentineled<Fusion<FeatureStream>>>,
    predicate: F,
    win_size: i64,
    /// Indices of tracks not yet exhausted.
    available: Vec<usize>,
    activity: Vec<bool>,
    /// Pending boundary events as `(position, track)`, kept sorted.
    events: Vec<(i64, usize)>,
    emitted: Vec<Feature>,
    /// Left edge of the segment currently being evaluated.
    cursor: i64,
    chunk: i64,
    primed: bool,
    done: bool,
}

impl<F> Segments<F>
where
    F: FnMut(&[bool]) -> bool,
{
    fn prime(&mut self) -> Result<()> {
        let n = self.tracks.len();
        self.activity = vec![false; n];
        for i in 0..n {
            let first = self.tracks[i].pull()?;
            if first.is_sentinel() {
                continue;
            }
            self.available.push(i);
            self.events.push((first.start, i));
            self.events.push((first.end, i));
        }
        self.events.sort_unstable();
        if self.events.is_empty() {
            self.done = true;
            return Ok(());
        }
        // Activate everything starting at the leftmost boundary.
        self.cursor = self.events[0].0;
        while let Some(&(pos, track)) = self.events.first() {
            if pos != self.cursor {
                break;
            }
            self.activity[track] = !self.activity[track];
            self.events.remove(0);
        }
        Ok(())
    }

    /// Load the next `win_size` base pairs of boundaries and evaluate
    /// the predicate across them.
    fn load_chunk(&mut self) -> Result<()> {
        let limit = self.chunk * self.win_size;
        let mut exhausted = Vec::new();
        for &i in &self.available {
            let mut reached = 0;
            while reached < limit {
                let feature = self.tracks[i].pull()?;
                if feature.is_sentinel() {
                    exhausted.push(i);
                    break;
                }
                self.events.push((feature.start, i));
                self.events.push((feature.end, i));
                reached = feature.end;
            }
        }
        self.available.retain(|i| !exhausted.contains(i));
        self.events.sort_unstable();
        self.evaluate_until(limit);
        self.chunk += 1;
        Ok(())
    }

    /// Emit predicate-true segments for every boundary below `limit`.
    fn evaluate_until(&mut self, limit: i64) {
        while let Some(&(pos, _)) = self.events.first() {
            if pos >= limit {
                break;
            }
            if (self.predicate)(&self.activity) {
                self.emitted.push(Feature::new(self.cursor, pos));
            }
            while let Some(&(next_pos, track)) = self.events.first() {
                if next_pos != pos {
                    break;
                }
                self.activity[track] = !self.activity[track];
                self.events.remove(0);
            }
            self.cursor = pos;
        }
    }
}

impl<F> Iterator for Segments<F>
where
    F: FnMut(&[bool]) -> bool,
{
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if !self.emitted.is_empty() {
                return Some(Ok(self.emitted.remove(0)));
            }
            if self.done {
                return None;
            }
            if !self.primed {
                self.primed = true;
                if let Err(e) = self.prime() {
                    self.done = true;
                    return Some(Err(e));
                }
                continue;
            }
            if !self.available.is_empty() {
                if let Err(e) = self.load_chunk() {
                    self.done = true;
                    return Some(Err(e));
                }
            } else {
                // All tracks exhausted: drain every boundary still
                // pending, so trailing activity is not lost.
                self.evaluate_until(i64::MAX);
                self.done = true;
            }
        }
    }
}

/// Streaming N-ary boolean combination under a user predicate.
pub struct CustomBoolean<F>
where
    F: FnMut(&[bool]) -> bool,
{
    inner: Fusion<Segments<F>>,
}

impl<F> CustomBoolean<F>
where
    F: FnMut(&[bool]) -> bool,
{
    /// Fails fast on a non-positive window size.
    pub fn new(streams: Vec<FeatureStream>, predicate: F, win_size: i64) -> Result<Self> {
        if win_size <= 0 {
            return Err(TrackError::InvalidConfig(format!(
                "win_size must be positive, got {}",
                win_size
            )));
        }
        let tracks = streams
            .into_iter()
            .map(|s| Sentineled::new(Fusion::new(s)))
            .collect();
        Ok(Self {
            inner: Fusion::new(Segments {
                tracks,
                predicate,
                win_size,
                available: Vec::new(),
                activity: Vec::new(),
                events: Vec::new(),
                emitted: Vec::new(),
                cursor: 0,
                chunk: 1,
                primed: false,
                done: false,
            }),
        })
    }
}

impl<F> Iterator for CustomBoolean<F>
where
    F: FnMut(&[bool]) -> bool,
{
    type Item = Result<Feature>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(spans: &[(i64, i64)]) -> FeatureStream {
        let owned: Vec<Feature> = spans.iter().map(|&(s, e)| Feature::new(s, e)).collect();
        Box::new(owned.into_iter().map(Ok))
    }

    fn run<F>(tracks: Vec<FeatureStream>, predicate: F, win_size: i64) -> Vec<(i64, i64)>
    where
        F: FnMut(&[bool]) -> bool,
    {
        CustomBoolean::new(tracks, predicate, win_size)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
            .iter()
            .map(Feature::position)
            .collect()
    }

    #[test]
    fn test_all_is_intersection() {
        let tracks = vec![
            boxed(&[(4, 5), (7, 9), (8, 9), (10, 12), (14, 16), (21, 28)]),
            boxed(&[(1, 3), (4, 5), (11, 14), (15, 18), (19, 20)]),
            boxed(&[(9, 13), (14, 19), (22, 25), (32, 34)]),
        ];
        let out = run(tracks, |b| b.iter().all(|&x| x), 10);
        assert_eq!(out, vec![(11, 12), (15, 16)]);
    }

    #[test]
    fn test_any_is_union() {
        let tracks = vec![
            boxed(&[(4, 5), (7, 9), (10, 12)]),
            boxed(&[(1, 3), (4, 5), (11, 14)]),
            boxed(&[(9, 13)]),
        ];
        let out = run(tracks, |b| b.iter().any(|&x| x), 1000);
        assert_eq!(out, vec![(1, 3), (4, 5), (7, 14)]);
    }

    #[test]
    fn test_custom_predicate() {
        let tracks = vec![
            boxed(&[(4, 5), (7, 9), (10, 12)]),
            boxed(&[(1, 3), (4, 5), (11, 14)]),
            boxed(&[(9, 13)]),
        ];
        let out = run(tracks, |b| !b[0] && (b[1] || b[2]), 5);
        assert_eq!(out, vec![(1, 3), (9, 10), (12, 14)]);
    }

    #[test]
    fn test_empty_track_keeps_its_slot() {
        let tracks = vec![boxed(&[]), boxed(&[(5, 10)])];
        // Index 1 must still address the second track.
        let out = run(tracks, |b| !b[0] && b[1], 1000);
        assert_eq!(out, vec![(5, 10)]);
    }

    #[test]
    fn test_trailing_feature_beyond_final_window() {
        // One long feature whose end lies far past the last loaded
        // window must still close its segment.
        let tracks = vec![boxed(&[(0, 95)])];
        let out = run(tracks, |b| b[0], 10);
        assert_eq!(out, vec![(0, 95)]);
    }

    #[test]
    fn test_no_tracks() {
        assert!(run(vec![], |b| b.iter().any(|&x| x), 100).is_empty());
    }

    #[test]
    fn test_invalid_win_size() {
        assert!(CustomBoolean::new(vec![], |b: &[bool]| b[0], 0).is_err());
    }
}
