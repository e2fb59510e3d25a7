//! GC-rich interval extraction.
//!
//! A decoded path is summarised as the maximal runs of [`State::Rich`],
//! reported with 1-based inclusive coordinates.

use crate::model::State;
use std::fmt;

/// A maximal run of GC-rich positions, 1-based and inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    /// Number of positions covered; zero when `end < start`.
    #[inline]
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    /// True only for hand-built intervals with `end < start`; extracted
    /// intervals always cover at least one position.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.start, self.end)
    }
}

impl From<Interval> for (usize, usize) {
    fn from(iv: Interval) -> Self {
        (iv.start, iv.end)
    }
}

/// Maximal runs of `Rich` in `path`, in order. Single left-to-right scan.
pub fn extract_intervals(path: &[State]) -> Vec<Interval> {
    let mut intervals = Vec::new();
    let mut open: Option<usize> = None;

    for (i, &state) in path.iter().enumerate() {
        match (state, open) {
            (State::Rich, None) => open = Some(i + 1),
            (State::Poor, Some(start)) => {
                intervals.push(Interval { start, end: i });
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        intervals.push(Interval {
            start,
            end: path.len(),
        });
    }
    intervals
}

/// Inverse of [`extract_intervals`]: per-position labels for a path of `len`.
///
/// Positions outside every interval are `Poor`; interval bounds past `len`
/// are clipped.
pub fn expand_intervals(intervals: &[Interval], len: usize) -> Vec<State> {
    let mut path = vec![State::Poor; len];
    for iv in intervals {
        let hi = iv.end.min(len);
        let lo = iv.start.saturating_sub(1).min(hi);
        for s in &mut path[lo..hi] {
            *s = State::Rich;
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use State::{Poor as L, Rich as H};

    #[test]
    fn empty_and_all_poor_have_no_intervals() {
        assert!(extract_intervals(&[]).is_empty());
        assert!(extract_intervals(&[L, L, L]).is_empty());
    }

    #[test]
    fn runs_are_one_based_inclusive() {
        let path = [L, H, H, L, L, H, L];
        assert_eq!(
            extract_intervals(&path),
            vec![Interval { start: 2, end: 3 }, Interval { start: 6, end: 6 }]
        );
    }

    #[test]
    fn run_touching_the_end_is_closed() {
        assert_eq!(
            extract_intervals(&[L, H, H]),
            vec![Interval { start: 2, end: 3 }]
        );
        assert_eq!(extract_intervals(&[H]), vec![Interval { start: 1, end: 1 }]);
    }

    #[test]
    fn inverted_intervals_cover_nothing() {
        let inverted = Interval { start: 5, end: 2 };
        assert_eq!(inverted.len(), 0);
        assert!(inverted.is_empty());
        assert_eq!(expand_intervals(&[inverted], 6), vec![L; 6]);
        // Out-of-range bounds are clipped rather than panicking.
        let past_end = Interval { start: 9, end: 12 };
        assert_eq!(expand_intervals(&[past_end], 4), vec![L; 4]);
        assert_eq!(Interval { start: 3, end: 3 }.len(), 1);
    }

    #[test]
    fn expand_inverts_extract() {
        let path = [H, H, L, H, L, L, H, H, H];
        let ivs = extract_intervals(&path);
        assert_eq!(expand_intervals(&ivs, path.len()), path.to_vec());
        assert_eq!(ivs[2].len(), 3);
        assert_eq!(ivs[0].to_string(), "1,2");
    }
}
