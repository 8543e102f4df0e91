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

//! Single-lane breadth-first route search.
//!
//! Every route stays on one lane end to end. Lanes are tried in ascending
//! order and the first lane that connects origin and destination wins; on
//! that lane the route has the fewest hops. Capacity and picker rules are
//! the same as for `LaneSwitchingSearch`, which makes this strategy a
//! stricter and cheaper baseline.

use crate::{
    state::ResourceState,
    stats::SearchStatistics,
    strategy::{RouteStrategy, RoutingError},
};
use fixedbitset::FixedBitSet;
use railyard_core::num::weight::Weight;
use railyard_model::{
    good::Good,
    index::{LaneIndex, StationIndex},
    network::Network,
    route::{Route, RouteStep},
};
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct FixedLaneSearch {
    queue: VecDeque<StationIndex>,
    visited: FixedBitSet,
    predecessor: Vec<Option<RouteStep>>,
    claimed: Vec<u32>,
}

impl FixedLaneSearch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preallocated(num_stations: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(num_stations),
            visited: FixedBitSet::with_capacity(num_stations),
            predecessor: vec![None; num_stations],
            claimed: vec![0; num_stations],
        }
    }

    fn reset(&mut self, num_stations: usize) {
        self.queue.clear();
        self.visited.clear();
        self.visited.grow(num_stations);
        self.predecessor.clear();
        self.predecessor.resize(num_stations, None);
        self.claimed.clear();
        self.claimed.resize(num_stations, 0);
    }

    /// Runs a breadth-first search restricted to `lane`.
    fn search_lane<W>(
        &mut self,
        network: &Network<W>,
        state: &ResourceState<W>,
        good: &Good<W>,
        lane: LaneIndex,
        stats: &mut SearchStatistics,
    ) -> Option<Route>
    where
        W: Weight,
    {
        let origin = good.origin();
        let destination = good.destination();

        self.reset(network.num_stations());
        self.visited.insert(origin.get());
        self.queue.push_back(origin);
        stats.on_label_pushed();

        while let Some(u) = self.queue.pop_front() {
            stats.on_station_finalized();
            if u == destination {
                return Some(self.reconstruct(origin, destination));
            }

            let available_at_u = state
                .remaining_pickers(u)
                .saturating_sub(self.claimed[u.get()]);

            for adjacent in network.neighbors(u) {
                let v = adjacent.neighbor;
                if self.visited.contains(v.get()) {
                    continue;
                }
                if !state.lane_has_capacity(adjacent.edge, lane, good.weight()) {
                    stats.on_capacity_rejection();
                    continue;
                }

                let needs_from = !state.picker_present(adjacent.edge, lane, u);
                let needs_to = !state.picker_present(adjacent.edge, lane, v);
                if (needs_from && available_at_u == 0)
                    || (needs_to && state.remaining_pickers(v) == 0)
                {
                    stats.on_picker_rejection();
                    continue;
                }

                self.visited.insert(v.get());
                self.predecessor[v.get()] = Some(RouteStep::new(adjacent.edge, lane, u, v));
                self.claimed[v.get()] = u32::from(needs_to);
                self.queue.push_back(v);
                stats.on_label_pushed();
            }
        }

        None
    }

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
        debug_assert_eq!(current, origin);

        Route::from_steps(steps.into_iter().rev())
    }
}

impl<W> RouteStrategy<W> for FixedLaneSearch
where
    W: Weight,
{
    fn name(&self) -> &str {
        "FixedLaneSearch"
    }

    fn find_route(
        &mut self,
        network: &Network<W>,
        state: &ResourceState<W>,
        good: &Good<W>,
        stats: &mut SearchStatistics,
    ) -> Result<Route, RoutingError> {
        if good.has_waypoints() {
            return Err(RoutingError::WaypointsUnsupported);
        }
        if good.is_trivial() {
            return Ok(Route::new());
        }

        stats.on_search();
        for lane in network.lanes() {
            if let Some(route) = self.search_lane(network, state, good, lane, stats) {
                return Ok(route);
            }
        }

        Err(RoutingError::NotReachable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railyard_model::{index::EdgeIndex, network::NetworkBuilder};

    fn si(i: usize) -> StationIndex {
        StationIndex::new(i)
    }

    fn li(i: usize) -> LaneIndex {
        LaneIndex::new(i)
    }

    /// A - B - C on two lanes of capacity 10, with a long way round A - D - E - C.
    fn yard() -> Network<f64> {
        let mut builder = NetworkBuilder::new(2, 10.0);
        for id in ["A", "B", "C", "D", "E"] {
            builder.add_station(id, 4).unwrap();
        }
        builder.add_edge("AB", "A", "B").unwrap();
        builder.add_edge("BC", "B", "C").unwrap();
        builder.add_edge("AD", "A", "D").unwrap();
        builder.add_edge("DE", "D", "E").unwrap();
        builder.add_edge("EC", "E", "C").unwrap();
        builder.build()
    }

    fn find(
        network: &Network<f64>,
        state: &ResourceState<f64>,
        good: &Good<f64>,
    ) -> Result<Route, RoutingError> {
        FixedLaneSearch::new().find_route(network, state, good, &mut SearchStatistics::default())
    }

    #[test]
    fn test_shortest_route_on_first_lane() {
        let network = yard();
        let state = ResourceState::new(&network);
        let route = find(&network, &state, &Good::new("G", si(0), si(2), 1.0)).unwrap();
        assert_eq!(route.len(), 2);
        assert!(route.lanes().all(|lane| lane == li(0)));
        assert!(route.is_simple_path(&network, si(0), si(2)));
    }

    #[test]
    fn test_stays_on_one_lane() {
        let network = yard();
        let mut state = ResourceState::new(&network);
        // Lane 0 of BC and lane 1 of AB are full: a lane switch at B would
        // be needed for the short way, so lane 0 takes the long way round.
        state
            .commit(EdgeIndex::new(1), li(0), si(1), si(2), 10.0)
            .unwrap();
        state
            .commit(EdgeIndex::new(0), li(1), si(0), si(1), 10.0)
            .unwrap();

        let route = find(&network, &state, &Good::new("G", si(0), si(2), 1.0)).unwrap();
        assert_eq!(route.len(), 3);
        assert!(route.lanes().all(|lane| lane == li(0)));
    }

    #[test]
    fn test_falls_back_to_later_lane() {
        let network = yard();
        let mut state = ResourceState::new(&network);
        for edge in [EdgeIndex::new(0), EdgeIndex::new(2)] {
            let (a, b) = network.edge(edge).endpoints();
            state.commit(edge, li(0), a, b, 10.0).unwrap();
        }

        let route = find(&network, &state, &Good::new("G", si(0), si(2), 1.0)).unwrap();
        assert_eq!(route.len(), 2);
        assert!(route.lanes().all(|lane| lane == li(1)));
    }

    #[test]
    fn test_unreachable_and_special_goods() {
        let network = yard();
        let state = ResourceState::new(&network);
        assert_eq!(
            find(&network, &state, &Good::new("G", si(0), si(2), 11.0)),
            Err(RoutingError::NotReachable)
        );
        assert_eq!(
            find(&network, &state, &Good::new("G", si(3), si(3), 11.0)),
            Ok(Route::new())
        );
        assert_eq!(
            find(
                &network,
                &state,
                &Good::new("G", si(0), si(2), 1.0).with_waypoints([si(1)])
            ),
            Err(RoutingError::WaypointsUnsupported)
        );
    }

    #[test]
    fn test_respects_picker_stock() {
        let mut builder = NetworkBuilder::new(1, 10.0);
        builder.add_station("A", 1).unwrap();
        builder.add_station("B", 1).unwrap();
        builder.add_station("C", 1).unwrap();
        builder.add_edge("AB", "A", "B").unwrap();
        builder.add_edge("BC", "B", "C").unwrap();
        let network = builder.build();
        let state = ResourceState::new(&network);
        assert_eq!(
            find(&network, &state, &Good::new("G", si(0), si(2), 1.0)),
            Err(RoutingError::NotReachable)
        );
    }
}
