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

//! Mutable resource state shared by all goods of a scheduling run.
//!
//! Three kinds of resources are tracked:
//! - the accumulated load of every lane of every edge,
//! - for every `(edge, lane, endpoint side)` whether a picker has been
//!   permanently stationed there, as one `FixedBitSet` per edge side sized
//!   to the lane count,
//! - the number of pickers each station still has available.
//!
//! `commit` is the single mutator. It validates before it writes, so a
//! rejected commit leaves the state exactly as it was and no lane can ever
//! be loaded past its capacity. Picker flags are never cleared: placing a
//! picker is a one-time cost per `(edge, lane, direction)`.

use fixedbitset::FixedBitSet;
use railyard_core::num::weight::Weight;
use railyard_model::{
    index::{EdgeIndex, LaneIndex, StationIndex},
    network::{EndpointSide, Network},
    route::Route,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// The reason a commit was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitError {
    /// The lane cannot take the additional weight.
    CapacityExceeded { edge: EdgeIndex, lane: LaneIndex },
    /// A picker would be needed at a station that has none left.
    PickersExhausted { station: StationIndex },
    /// The step's stations are not the two endpoints of the edge, or the
    /// lane does not exist.
    DisconnectedStep { edge: EdgeIndex },
}

impl std::fmt::Display for CommitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityExceeded { edge, lane } => {
                write!(f, "{} on {} would exceed its capacity", lane, edge)
            }
            Self::PickersExhausted { station } => {
                write!(f, "{} has no pickers left", station)
            }
            Self::DisconnectedStep { edge } => {
                write!(f, "step does not traverse {} between its endpoints", edge)
            }
        }
    }
}

impl std::error::Error for CommitError {}

#[derive(Clone, Debug, PartialEq)]
struct EdgeState<W> {
    a: StationIndex,
    b: StationIndex,
    loads: Vec<W>,
    pickers: [FixedBitSet; 2],
}

impl<W> EdgeState<W> {
    #[inline]
    fn side_of(&self, station: StationIndex) -> Option<EndpointSide> {
        if station == self.a {
            Some(EndpointSide::A)
        } else if station == self.b {
            Some(EndpointSide::B)
        } else {
            None
        }
    }
}

/// Loads, picker flags and remaining pickers for one scheduling run.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState<W> {
    capacity: W,
    num_lanes: usize,
    edges: Vec<EdgeState<W>>,
    remaining_pickers: Vec<u32>,
    initial_pickers: Vec<u32>,
}

impl<W> ResourceState<W>
where
    W: Weight,
{
    /// Creates the initial state of `network`: empty lanes, no pickers
    /// placed, every station at its full picker count.
    pub fn new(network: &Network<W>) -> Self {
        let num_lanes = network.num_lanes();
        let edges = network
            .edges()
            .iter()
            .map(|edge| {
                let (a, b) = edge.endpoints();
                EdgeState {
                    a,
                    b,
                    loads: vec![W::zero(); num_lanes],
                    pickers: [
                        FixedBitSet::with_capacity(num_lanes),
                        FixedBitSet::with_capacity(num_lanes),
                    ],
                }
            })
            .collect();
        let initial_pickers: Vec<u32> = network.stations().iter().map(|s| s.pickers()).collect();

        Self {
            capacity: network.lane_capacity(),
            num_lanes,
            edges,
            remaining_pickers: initial_pickers.clone(),
            initial_pickers,
        }
    }

    #[inline]
    pub fn capacity(&self) -> W {
        self.capacity
    }

    #[inline]
    pub fn num_lanes(&self) -> usize {
        self.num_lanes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn num_stations(&self) -> usize {
        self.remaining_pickers.len()
    }

    #[inline]
    fn edge_state(&self, edge: EdgeIndex) -> &EdgeState<W> {
        let index = edge.get();
        debug_assert!(
            index < self.edges.len(),
            "called `ResourceState::edge_state` with edge index out of bounds: the len is {} but the index is {}",
            self.edges.len(),
            index
        );

        &self.edges[index]
    }

    /// Returns the weight currently carried by `lane` of `edge`.
    #[inline]
    pub fn lane_load(&self, edge: EdgeIndex, lane: LaneIndex) -> W {
        debug_assert!(
            lane.get() < self.num_lanes,
            "called `ResourceState::lane_load` with lane index out of bounds: the len is {} but the index is {}",
            self.num_lanes,
            lane.get()
        );

        self.edge_state(edge).loads[lane.get()]
    }

    /// Returns `true` if `lane` of `edge` can take `weight` more without
    /// exceeding the lane capacity.
    #[inline]
    pub fn lane_has_capacity(&self, edge: EdgeIndex, lane: LaneIndex, weight: W) -> bool {
        W::fits(self.lane_load(edge, lane), weight, self.capacity)
    }

    /// Returns `true` if a picker already serves `lane` of `edge` on the side
    /// of `station`. Stations that are not endpoints of `edge` never have one.
    #[inline]
    pub fn picker_present(&self, edge: EdgeIndex, lane: LaneIndex, station: StationIndex) -> bool {
        let state = self.edge_state(edge);
        debug_assert!(
            state.side_of(station).is_some(),
            "called `ResourceState::picker_present` with {} which is not an endpoint of {}",
            station,
            edge
        );

        state
            .side_of(station)
            .is_some_and(|side| state.pickers[side.index()].contains(lane.get()))
    }

    /// Returns `true` if both directions of `lane` on `edge` already have
    /// pickers, i.e. traversing it costs no new picker.
    #[inline]
    pub fn is_free_traversal(&self, edge: EdgeIndex, lane: LaneIndex) -> bool {
        let state = self.edge_state(edge);
        state.pickers[0].contains(lane.get()) && state.pickers[1].contains(lane.get())
    }

    /// Returns `true` if `station` still has a picker to place.
    #[inline]
    pub fn can_place_picker(&self, station: StationIndex) -> bool {
        self.remaining_pickers(station) > 0
    }

    #[inline]
    pub fn remaining_pickers(&self, station: StationIndex) -> u32 {
        debug_assert!(
            station.get() < self.remaining_pickers.len(),
            "called `ResourceState::remaining_pickers` with station index out of bounds: the len is {} but the index is {}",
            self.remaining_pickers.len(),
            station.get()
        );

        self.remaining_pickers[station.get()]
    }

    #[inline]
    pub fn initial_pickers(&self, station: StationIndex) -> u32 {
        debug_assert!(
            station.get() < self.initial_pickers.len(),
            "called `ResourceState::initial_pickers` with station index out of bounds: the len is {} but the index is {}",
            self.initial_pickers.len(),
            station.get()
        );

        self.initial_pickers[station.get()]
    }

    /// Returns how many pickers `station` has placed so far.
    #[inline]
    pub fn placed_pickers(&self, station: StationIndex) -> u32 {
        self.initial_pickers(station) - self.remaining_pickers(station)
    }

    /// Returns the total number of pickers placed across all stations.
    pub fn total_placed_pickers(&self) -> u64 {
        self.initial_pickers
            .iter()
            .zip(&self.remaining_pickers)
            .map(|(&initial, &remaining)| u64::from(initial - remaining))
            .sum()
    }

    /// Returns on how many lanes of `edge` a picker is stationed on the side
    /// of `station`.
    pub fn lanes_with_pickers(&self, edge: EdgeIndex, station: StationIndex) -> usize {
        let state = self.edge_state(edge);
        state
            .side_of(station)
            .map_or(0, |side| state.pickers[side.index()].count_ones(..))
    }

    fn check_step(
        &self,
        edge: EdgeIndex,
        lane: LaneIndex,
        from: StationIndex,
        to: StationIndex,
    ) -> Result<(EndpointSide, EndpointSide), CommitError> {
        if edge.get() >= self.edges.len() || lane.get() >= self.num_lanes || from == to {
            return Err(CommitError::DisconnectedStep { edge });
        }
        let state = &self.edges[edge.get()];
        match (state.side_of(from), state.side_of(to)) {
            (Some(from_side), Some(to_side)) => Ok((from_side, to_side)),
            _ => Err(CommitError::DisconnectedStep { edge }),
        }
    }

    /// Moves `weight` over `lane` of `edge` from `from` to `to`.
    ///
    /// Adds `weight` to the lane load and, for each endpoint whose
    /// directional picker flag is not yet set, sets it and takes one picker
    /// from that station. Returns the number of pickers placed. Nothing is
    /// modified if an error is returned.
    pub fn commit(
        &mut self,
        edge: EdgeIndex,
        lane: LaneIndex,
        from: StationIndex,
        to: StationIndex,
        weight: W,
    ) -> Result<u32, CommitError> {
        let (from_side, to_side) = self.check_step(edge, lane, from, to)?;
        if !self.lane_has_capacity(edge, lane, weight) {
            return Err(CommitError::CapacityExceeded { edge, lane });
        }

        let state = &self.edges[edge.get()];
        let need_from = !state.pickers[from_side.index()].contains(lane.get());
        let need_to = !state.pickers[to_side.index()].contains(lane.get());
        if need_from && !self.can_place_picker(from) {
            return Err(CommitError::PickersExhausted { station: from });
        }
        if need_to && !self.can_place_picker(to) {
            return Err(CommitError::PickersExhausted { station: to });
        }

        let state = &mut self.edges[edge.get()];
        state.loads[lane.get()] = state.loads[lane.get()] + weight;

        let mut placed = 0;
        for (needed, side, station) in [(need_from, from_side, from), (need_to, to_side, to)] {
            if needed {
                state.pickers[side.index()].insert(lane.get());
                self.remaining_pickers[station.get()] -= 1;
                placed += 1;
            }
        }

        Ok(placed)
    }

    /// Commits every step of `route` for a good of `weight`, all or nothing.
    ///
    /// The whole route is validated against the current state first,
    /// including stations that need pickers for more than one step, and only
    /// then applied. Returns the number of pickers placed.
    pub fn commit_route(&mut self, route: &Route, weight: W) -> Result<u32, CommitError> {
        let mut pending_loads: FxHashMap<(EdgeIndex, LaneIndex), W> = FxHashMap::default();
        let mut pending_flags: FxHashSet<(EdgeIndex, LaneIndex, EndpointSide)> =
            FxHashSet::default();
        let mut pending_pickers: FxHashMap<StationIndex, u32> = FxHashMap::default();

        for step in route.steps() {
            let (from_side, to_side) = self.check_step(step.edge, step.lane, step.from, step.to)?;

            let load = pending_loads
                .entry((step.edge, step.lane))
                .or_insert_with(|| self.lane_load(step.edge, step.lane));
            if !W::fits(*load, weight, self.capacity) {
                return Err(CommitError::CapacityExceeded {
                    edge: step.edge,
                    lane: step.lane,
                });
            }
            *load = *load + weight;

            let state = &self.edges[step.edge.get()];
            for (side, station) in [(from_side, step.from), (to_side, step.to)] {
                if state.pickers[side.index()].contains(step.lane.get()) {
                    continue;
                }
                if !pending_flags.insert((step.edge, step.lane, side)) {
                    continue;
                }
                let claimed = pending_pickers.entry(station).or_insert(0);
                *claimed += 1;
                if *claimed > self.remaining_pickers(station) {
                    return Err(CommitError::PickersExhausted { station });
                }
            }
        }

        let mut placed = 0;
        for step in route.steps() {
            placed += self.commit(step.edge, step.lane, step.from, step.to, weight)?;
        }
        Ok(placed)
    }
}
