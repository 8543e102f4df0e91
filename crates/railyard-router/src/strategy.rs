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

//! The seam between the scheduler and concrete route searches.
//!
//! A `RouteStrategy` looks at the network, the current resource state and a
//! single good, and proposes a route. It never mutates the state: the caller
//! decides whether to commit the proposal.

use crate::{
    state::{CommitError, ResourceState},
    stats::SearchStatistics,
};
use railyard_core::num::weight::Weight;
use railyard_model::{good::Good, network::Network, route::Route};

/// Why a good could not be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingError {
    /// No route satisfies the capacity and picker constraints.
    NotReachable,
    /// The good names intermediate stops, which are not routed.
    WaypointsUnsupported,
    /// A route was found but the state refused to commit it.
    CommitRejected(CommitError),
}

impl std::fmt::Display for RoutingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReachable => write!(f, "destination not reachable"),
            Self::WaypointsUnsupported => write!(f, "goods with waypoints are not routed"),
            Self::CommitRejected(e) => write!(f, "route rejected on commit: {}", e),
        }
    }
}

impl std::error::Error for RoutingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CommitRejected(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CommitError> for RoutingError {
    fn from(error: CommitError) -> Self {
        Self::CommitRejected(error)
    }
}

/// A route search over the current resource state.
pub trait RouteStrategy<W>
where
    W: Weight,
{
    /// Returns the name of the strategy.
    fn name(&self) -> &str;

    /// Proposes a route for `good` that respects `state`.
    ///
    /// Goods whose origin equals their destination yield an empty route.
    /// Goods with waypoints yield `RoutingError::WaypointsUnsupported`.
    /// Implementations must leave `state` untouched; `stats` accumulates
    /// search counters across calls.
    fn find_route(
        &mut self,
        network: &Network<W>,
        state: &ResourceState<W>,
        good: &Good<W>,
        stats: &mut SearchStatistics,
    ) -> Result<Route, RoutingError>;
}

impl<W> std::fmt::Debug for dyn RouteStrategy<W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RouteStrategy({})", self.name())
    }
}

impl<W> std::fmt::Display for dyn RouteStrategy<W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RouteStrategy({})", self.name())
    }
}

impl<W, S> RouteStrategy<W> for Box<S>
where
    W: Weight,
    S: RouteStrategy<W> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn find_route(
        &mut self,
        network: &Network<W>,
        state: &ResourceState<W>,
        good: &Good<W>,
        stats: &mut SearchStatistics,
    ) -> Result<Route, RoutingError> {
        (**self).find_route(network, state, good, stats)
    }
}
