// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Frontier labels for the best-first route search.
//!
//! A label is the cost of reaching a station (hop count and leftover picker
//! score) plus bookkeeping for deterministic tie-breaking. The `Frontier`
//! wraps a `BinaryHeap` and assigns every pushed label a monotonically
//! increasing sequence number, so that among labels of equal cost the one
//! discovered first is expanded first.

use railyard_model::index::StationIndex;
use std::collections::BinaryHeap;

/// The cost of a partial route: fewer hops is better, and among equal hop
/// counts a larger leftover picker score is better.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cost {
    pub hops: u32,
    pub leftover: i64,
}

impl Cost {
    #[inline]
    pub const fn new(hops: u32, leftover: i64) -> Self {
        Self { hops, leftover }
    }

    /// Returns `true` if `self` is strictly better than `other`.
    #[inline]
    pub const fn improves_on(&self, other: &Cost) -> bool {
        self.hops < other.hops || (self.hops == other.hops && self.leftover > other.leftover)
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cost(hops: {}, leftover: {})", self.hops, self.leftover)
    }
}

/// An entry of the search frontier.
///
/// The `Ord` implementation is a priority order: the label that must be
/// expanded first compares greatest, which is what `BinaryHeap` pops. The
/// order is total: hops ascending, then leftover descending, then sequence
/// ascending, then station index ascending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrontierLabel {
    pub cost: Cost,
    pub station: StationIndex,
    pub sequence: u64,
}

impl FrontierLabel {
    #[inline]
    pub const fn new(cost: Cost, station: StationIndex, sequence: u64) -> Self {
        Self {
            cost,
            station,
            sequence,
        }
    }
}

impl Ord for FrontierLabel {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .cost
            .hops
            .cmp(&self.cost.hops)
            .then_with(|| self.cost.leftover.cmp(&other.cost.leftover))
            .then_with(|| other.sequence.cmp(&self.sequence))
            .then_with(|| other.station.cmp(&self.station))
    }
}

impl PartialOrd for FrontierLabel {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// The open set of the search.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierLabel>,
    next_sequence: u64,
}

impl Frontier {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, cost: Cost, station: StationIndex) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierLabel::new(cost, station, sequence));
    }

    #[inline]
    pub fn pop(&mut self) -> Option<FrontierLabel> {
        self.heap.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Empties the frontier and restarts the sequence counter, keeping the
    /// allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn si(i: usize) -> StationIndex {
        StationIndex::new(i)
    }

    #[test]
    fn test_cost_improvement() {
        let base = Cost::new(2, 5);
        assert!(Cost::new(1, 0).improves_on(&base));
        assert!(Cost::new(2, 6).improves_on(&base));
        assert!(!Cost::new(2, 5).improves_on(&base));
        assert!(!Cost::new(2, 4).improves_on(&base));
        assert!(!Cost::new(3, 100).improves_on(&base));
    }

    #[test]
    fn test_fewer_hops_pop_first() {
        let mut frontier = Frontier::new();
        frontier.push(Cost::new(3, 10), si(0));
        frontier.push(Cost::new(1, -4), si(1));
        frontier.push(Cost::new(2, 0), si(2));

        let order: Vec<_> = std::iter::from_fn(|| frontier.pop()).map(|l| l.station).collect();
        assert_eq!(order, vec![si(1), si(2), si(0)]);
    }

    #[test]
    fn test_higher_leftover_pops_first_on_equal_hops() {
        let mut frontier = Frontier::new();
        frontier.push(Cost::new(1, 2), si(0));
        frontier.push(Cost::new(1, 7), si(1));
        frontier.push(Cost::new(1, -1), si(2));

        assert_eq!(frontier.pop().map(|l| l.station), Some(si(1)));
        assert_eq!(frontier.pop().map(|l| l.station), Some(si(0)));
        assert_eq!(frontier.pop().map(|l| l.station), Some(si(2)));
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_earlier_label_wins_exact_tie() {
        let mut frontier = Frontier::preallocated(4);
        frontier.push(Cost::new(1, 1), si(5));
        frontier.push(Cost::new(1, 1), si(2));
        assert_eq!(frontier.len(), 2);

        let first = frontier.pop().unwrap();
        assert_eq!(first.station, si(5));
        assert_eq!(first.sequence, 0);
    }

    #[test]
    fn test_station_breaks_remaining_ties() {
        let a = FrontierLabel::new(Cost::new(1, 1), si(1), 3);
        let b = FrontierLabel::new(Cost::new(1, 1), si(4), 3);
        assert!(a > b);
        assert_eq!(a.cmp(&a), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_clear_resets_sequence() {
        let mut frontier = Frontier::new();
        frontier.push(Cost::new(0, 0), si(0));
        frontier.push(Cost::new(0, 0), si(1));
        frontier.clear();
        assert!(frontier.is_empty());

        frontier.push(Cost::new(0, 0), si(3));
        assert_eq!(frontier.pop().map(|l| l.sequence), Some(0));
    }
}
