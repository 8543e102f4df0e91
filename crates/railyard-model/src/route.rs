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

//! Committed routes.
//!
//! A `Route` is the ordered list of `(edge, lane)` choices that carries a
//! good from its origin to its destination. Each step also records the
//! direction it was travelled in, because picker bookkeeping happens per
//! `(edge, lane, direction)`.

use crate::index::{EdgeIndex, LaneIndex, StationIndex};
use crate::network::Network;
use railyard_core::num::weight::Weight;
use smallvec::SmallVec;

/// A single traversal of one lane of one edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RouteStep {
    pub edge: EdgeIndex,
    pub lane: LaneIndex,
    pub from: StationIndex,
    pub to: StationIndex,
}

impl RouteStep {
    #[inline]
    pub const fn new(edge: EdgeIndex, lane: LaneIndex, from: StationIndex, to: StationIndex) -> Self {
        Self {
            edge,
            lane,
            from,
            to,
        }
    }
}

impl std::fmt::Display for RouteStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -[{}#{}]-> {}",
            self.from.get(),
            self.edge.get(),
            self.lane.ordinal(),
            self.to.get()
        )
    }
}

/// An origin-to-destination sequence of route steps.
///
/// Most routes in practice are a handful of hops long, so the steps are kept
/// inline.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Route {
    steps: SmallVec<RouteStep, 8>,
}

impl Route {
    /// Creates the empty route (origin equals destination).
    #[inline]
    pub fn new() -> Self {
        Self {
            steps: SmallVec::new(),
        }
    }

    /// Creates a route from steps in travel order.
    #[inline]
    pub fn from_steps<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = RouteStep>,
    {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    #[inline]
    pub fn push(&mut self, step: RouteStep) {
        self.steps.push(step);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    /// Iterates over the edges of the route in travel order.
    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.steps.iter().map(|s| s.edge)
    }

    /// Iterates over the lanes of the route in travel order.
    #[inline]
    pub fn lanes(&self) -> impl Iterator<Item = LaneIndex> + '_ {
        self.steps.iter().map(|s| s.lane)
    }

    /// Checks that the steps form a simple walk from `origin` to
    /// `destination` over edges of `network`, with valid lanes.
    pub fn is_simple_path<W>(
        &self,
        network: &Network<W>,
        origin: StationIndex,
        destination: StationIndex,
    ) -> bool
    where
        W: Weight,
    {
        let mut visited = vec![false; network.num_stations()];
        let mut current = origin;
        visited[current.get()] = true;

        for step in self.steps.iter() {
            if step.from != current
                || step.edge.get() >= network.num_edges()
                || step.lane.get() >= network.num_lanes()
            {
                return false;
            }
            if network.edge(step.edge).opposite(step.from) != Some(step.to) {
                return false;
            }
            if visited[step.to.get()] {
                return false;
            }
            visited[step.to.get()] = true;
            current = step.to;
        }

        current == destination
    }
}

impl FromIterator<RouteStep> for Route {
    fn from_iter<I: IntoIterator<Item = RouteStep>>(iter: I) -> Self {
        Self::from_steps(iter)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "Route(empty)");
        }
        write!(f, "Route(")?;
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", step)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkBuilder;

    fn si(i: usize) -> StationIndex {
        StationIndex::new(i)
    }

    fn ei(i: usize) -> EdgeIndex {
        EdgeIndex::new(i)
    }

    fn li(i: usize) -> LaneIndex {
        LaneIndex::new(i)
    }

    fn line() -> Network<f64> {
        let mut builder = NetworkBuilder::new(2, 10.0);
        for id in ["A", "B", "C"] {
            builder.add_station(id, 1).unwrap();
        }
        builder.add_edge("AB", "A", "B").unwrap();
        builder.add_edge("BC", "B", "C").unwrap();
        builder.build()
    }

    #[test]
    fn test_empty_route() {
        let route = Route::new();
        assert!(route.is_empty());
        assert_eq!(route.len(), 0);
        assert!(route.is_simple_path(&line(), si(1), si(1)));
        assert!(!route.is_simple_path(&line(), si(0), si(1)));
        assert_eq!(format!("{}", route), "Route(empty)");
    }

    #[test]
    fn test_edges_and_lanes_follow_step_order() {
        let route: Route = [
            RouteStep::new(ei(0), li(1), si(0), si(1)),
            RouteStep::new(ei(1), li(0), si(1), si(2)),
        ]
        .into_iter()
        .collect();

        assert_eq!(route.edges().collect::<Vec<_>>(), vec![ei(0), ei(1)]);
        assert_eq!(route.lanes().collect::<Vec<_>>(), vec![li(1), li(0)]);
        assert!(route.is_simple_path(&line(), si(0), si(2)));
        assert!(!route.is_simple_path(&line(), si(0), si(1)));
    }

    #[test]
    fn test_broken_walks_are_rejected() {
        let network = line();
        // Step does not start where the previous one ended.
        let gap = Route::from_steps([RouteStep::new(ei(1), li(0), si(1), si(2))]);
        assert!(!gap.is_simple_path(&network, si(0), si(2)));

        // Lane out of range.
        let lane = Route::from_steps([RouteStep::new(ei(0), li(2), si(0), si(1))]);
        assert!(!lane.is_simple_path(&network, si(0), si(1)));

        // Revisits the origin.
        let back = Route::from_steps([
            RouteStep::new(ei(0), li(0), si(0), si(1)),
            RouteStep::new(ei(0), li(1), si(1), si(0)),
        ]);
        assert!(!back.is_simple_path(&network, si(0), si(0)));
    }

    #[test]
    fn test_display() {
        let route = Route::from_steps([RouteStep::new(ei(0), li(1), si(0), si(1))]);
        assert_eq!(format!("{}", route), "Route(0 -[0#2]-> 1)");
    }
}
