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

//! Best-first route search that may change lanes at every station.
//!
//! The search settles stations in order of `(hops, leftover)`. `leftover`
//! starts at the origin's remaining picker count and drops by one for every
//! picker the partial route would newly place; a lane whose pickers are
//! already in place on both sides costs nothing. For every neighbouring
//! edge, each lane is considered independently:
//!
//! - the lane must have room for the good's weight,
//! - if the lane has no picker on the side of the current station, that
//!   station must still have one to give after whatever the step into it
//!   already claimed,
//! - if the lane has no picker on the side of the neighbour, the neighbour
//!   must have one to give.
//!
//! A candidate replaces the neighbour's label only if it is strictly better,
//! so the lowest lane index wins ties. Settled stations are never expanded
//! again, which keeps the predecessor chain a tree rooted at the origin.
//! The search only reads the resource state.

use crate::{
    label::{Cost, Frontier},
    state::ResourceState,
    stats::SearchStatistics,
    strategy::{RouteStrategy, RoutingError},
};
use fixedbitset::FixedBitSet;
use railyard_core::num::weight::Weight;
use railyard_model::{
    good::Good,
    index::StationIndex,
    network::Network,
    route::{Route, RouteStep},
};

/// Minimum-hop, maximum-leftover route search with per-edge lane choice.
///
/// Buffers are sized to the network on every call and reused across calls,
/// so one instance can route every good of a run without reallocating.
#[derive(Debug, Clone, Default)]
pub struct LaneSwitchingSearch {
    best: Vec<Option<Cost>>,
    predecessor: Vec<Option<RouteStep>>,
    claimed: Vec<u32>,
    settled: FixedBitSet,
    frontier: Frontier,
}

impl LaneSwitchingSearch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a search with buffers sized for `num_stations` stations.
    pub fn preallocated(num_stations: usize) -> Self {
        Self {
            best: vec![None; num_stations],
            predecessor: vec![None; num_stations],
            claimed: vec![0; num_stations],
            settled: FixedBitSet::with_capacity(num_stations),
            frontier: Frontier::preallocated(num_stations),
        }
    }

    fn reset(&mut self, num_stations: usize) {
        self.best.clear();
        self.best.resize(num_stations, None);
        self.predecessor.clear();
        self.predecessor.resize(num_stations, None);
        self.claimed.clear();
        self.claimed.resize(num_stations, 0);
        self.settled.clear();
        self.settled.grow(num_stations);
        self.frontier.clear();
    }

    /// Searches for a route for `good` under `state`.
    pub fn search<W>(
        &mut self,
        network: &Network<W>,
        state: &ResourceState<W>,
        good: &Good<W>,
        stats: &mut SearchStatistics,
    ) -> Result<Route, RoutingError>
    where
        W: Weight,
    {
        if good.has_waypoints() {
            return Err(RoutingError::WaypointsUnsupported);
        }
        if good.is_trivial() {
            return Ok(Route::new());
        }

        stats.on_search();

        let origin = good.origin();
        let destination = good.destination();
        let weight = good.weight();

        self.reset(network.num_stations());

        let seed = Cost::new(0, i64::from(state.remaining_pickers(origin)));
        self.best[origin.get()] = Some(seed);
        self.frontier.push(seed, origin);
        stats.on_label_pushed();

        while let Some(label) = self.frontier.pop() {
            let u = label.station;
            if self.settled.contains(u.get()) || self.best[u.get()] != Some(label.cost) {
                continue;
            }
            self.settled.insert(u.get());
            stats.on_station_finalized();

            if u == destination {
                return Ok(self.reconstruct(origin, destination));
            }

            let available_at_u = state
                .remaining_pickers(u)
                .saturating_sub(self.claimed[u.get()]);

            for adjacent in network.neighbors(u) {
                let v = adjacent.neighbor;
                if self.settled.contains(v.get()) {
                    continue;
                }
                let remaining_at_v = state.remaining_pickers(v);

                for lane in network.lanes() {
                    if !state.lane_has_capacity(adjacent.edge, lane, weight) {
                        stats.on_capacity_rejection();
                        continue;
                    }

                    let needs_from = !state.picker_present(adjacent.edge, lane, u);
                    let needs_to = !state.picker_present(adjacent.edge, lane, v);
                    if (needs_from && available_at_u == 0) || (needs_to && remaining_at_v == 0) {
                        stats.on_picker_rejection();
                        continue;
                    }

                    let placed = i64::from(needs_from) + i64::from(needs_to);
                    let candidate = Cost::new(label.cost.hops + 1, label.cost.leftover - placed);

                    let slot = &mut self.best[v.get()];
                    if slot.is_none_or(|current| candidate.improves_on(&current)) {
                        *slot = Some(candidate);
                        self.predecessor[v.get()] =
                            Some(RouteStep::new(adjacent.edge, lane, u, v));
                        self.claimed[v.get()] = u32::from(needs_to);
                        self.frontier.push(candidate, v);
                        stats.on_label_pushed();
                    }
                }
            }
        }

        Err(RoutingError::NotReachable)
    }

    /// Walks the predecessor chain back from `destination` and returns the
    /// steps in travel order.
    fn reconstruct(&self, origin: StationIndex, destination: StationIndex) -> Route {
        let mut steps = Vec::new();
        let mut current = destination;
        while current != origin && steps.len() < self.predecessor.len() {
            let Some(step) = self.predecessor[current.get()] else {
                break;
            };
            steps.push(step);
            current = step.from;
        }
        debug_assert_eq!(
            current, origin,
            "predecessor chain from {} does not lead back to {}",
            destination, origin
        );

        Route::from_steps(steps.into_iter().rev())
    }
}

impl<W> RouteStrategy<W> for LaneSwitchingSearch
where
    W: Weight,
{
    fn name(&self) -> &str {
        "LaneSwitchingSearch"
    }

    #[inline]
    fn find_route(
        &mut self,
        network: &Network<W>,
        state: &ResourceState<W>,
        good: &Good<W>,
        stats: &mut SearchStatistics,
    ) -> Result<Route, RoutingError> {
        self.search(network, state, good, stats)
    }
}
