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

//! # Greedy Goods Scheduler
//!
//! Routes every good of an instance, one at a time, against a single
//! `ResourceState` that accumulates lane loads and picker placements.
//!
//! ## Behaviour
//!
//! - Goods are processed in the configured `GoodOrder` (heaviest first by
//!   default). Order matters: each good only sees capacity and pickers left
//!   over by the goods before it.
//! - For each good the strategy proposes a route against the current state;
//!   the route is committed as a whole or not at all.
//! - Goods with waypoints are skipped before any strategy sees them and
//!   recorded as `WaypointsUnsupported`.
//! - A failed good keeps no route and is never retried. There is no
//!   backtracking across goods.
//!
//! ## Usage
//!
//! ```rust
//! use railyard_model::loading::InstanceLoader;
//! use railyard_router::search::LaneSwitchingSearch;
//! use railyard_solver::{monitor::no_op::NoOperationMonitor, scheduler::SchedulerBuilder};
//!
//! let instance = InstanceLoader::<f64>::new()
//!     .from_str("2,1,2,10\nA,5\nB,5\nE1,A,B\n1\nG1,A,B,4,null\n")
//!     .unwrap();
//!
//! let scheduler = SchedulerBuilder::new().build();
//! let outcome = scheduler.arrange(
//!     &instance,
//!     &mut LaneSwitchingSearch::new(),
//!     &mut NoOperationMonitor::new(),
//! );
//! assert_eq!(outcome.report(&instance).to_string(), "0,0.000\nG1\nE1\n1\n");
//! ```

use crate::{
    monitor::schedule_monitor::ScheduleMonitor, order::GoodOrder, result::ScheduleOutcome,
    stats::ScheduleStatistics,
};
use railyard_core::num::weight::Weight;
use railyard_model::{instance::Instance, plan::Plan};
use railyard_router::{
    state::ResourceState,
    strategy::{RouteStrategy, RoutingError},
};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scheduler {
    order: GoodOrder,
}

impl Scheduler {
    #[inline]
    pub fn new(order: GoodOrder) -> Self {
        Self { order }
    }

    #[inline]
    pub fn order(&self) -> GoodOrder {
        self.order
    }

    /// Routes every good of `instance` with `strategy`, reporting progress
    /// to `monitor`.
    pub fn arrange<W, S, M>(
        &self,
        instance: &Instance<W>,
        strategy: &mut S,
        monitor: &mut M,
    ) -> ScheduleOutcome<W>
    where
        W: Weight,
        S: RouteStrategy<W> + ?Sized,
        M: ScheduleMonitor<W> + ?Sized,
    {
        let start_time = Instant::now();
        let network = instance.network();

        let order = self.order.arrange(instance.goods());
        let mut plan = Plan::new(instance.num_goods(), order.clone());
        let mut failures: Vec<Option<RoutingError>> = vec![None; instance.num_goods()];
        let mut state = ResourceState::new(network);
        let mut statistics = ScheduleStatistics::new(instance.num_goods());

        monitor.on_start(instance, &order);

        for &good_index in &order {
            let good = instance.good(good_index);

            let committed = if good.has_waypoints() {
                Err(RoutingError::WaypointsUnsupported)
            } else {
                strategy
                    .find_route(network, &state, good, &mut statistics.search)
                    .and_then(|route| {
                        let placed = state.commit_route(&route, good.weight())?;
                        Ok((route, placed))
                    })
            };

            match committed {
                Ok((route, pickers_placed)) => {
                    statistics.on_good_routed(route.is_empty(), pickers_placed);
                    monitor.on_good_routed(good_index, good, &route, pickers_placed);
                    plan.set_route(good_index, route);
                }
                Err(error) => {
                    statistics.on_good_failed(&error);
                    monitor.on_good_failed(good_index, good, &error);
                    failures[good_index.get()] = Some(error);
                }
            }
        }

        statistics.set_total_time(start_time.elapsed());
        monitor.on_end(&statistics);

        ScheduleOutcome::new(plan, failures, state, statistics)
    }
}

impl std::fmt::Display for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scheduler(order: {})", self.order)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerBuilder {
    order: GoodOrder,
}

impl SchedulerBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn order(mut self, order: GoodOrder) -> Self {
        self.order = order;
        self
    }

    #[inline]
    pub fn build(self) -> Scheduler {
        Scheduler::new(self.order)
    }
}
