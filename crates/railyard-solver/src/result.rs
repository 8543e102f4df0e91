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

use crate::stats::ScheduleStatistics;
use railyard_core::num::weight::Weight;
use railyard_model::{index::GoodIndex, instance::Instance, plan::Plan, report::Report};
use railyard_router::{state::ResourceState, strategy::RoutingError};

/// Everything a scheduling run produced.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome<W> {
    plan: Plan,
    failures: Vec<Option<RoutingError>>,
    state: ResourceState<W>,
    statistics: ScheduleStatistics,
}

impl<W> ScheduleOutcome<W>
where
    W: Weight,
{
    #[inline]
    pub fn new(
        plan: Plan,
        failures: Vec<Option<RoutingError>>,
        state: ResourceState<W>,
        statistics: ScheduleStatistics,
    ) -> Self {
        debug_assert_eq!(
            plan.num_goods(),
            failures.len(),
            "called `ScheduleOutcome::new` with {} goods in the plan but {} failure slots",
            plan.num_goods(),
            failures.len()
        );

        Self {
            plan,
            failures,
            state,
            statistics,
        }
    }

    #[inline]
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Returns why `good_index` was not routed, or `None` if it was.
    #[inline]
    pub fn failure(&self, good_index: GoodIndex) -> Option<&RoutingError> {
        self.failures[good_index.get()].as_ref()
    }

    /// Iterates failed goods in index order.
    pub fn failures(&self) -> impl Iterator<Item = (GoodIndex, &RoutingError)> + '_ {
        self.failures
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.as_ref().map(|e| (GoodIndex::new(i), e)))
    }

    /// Returns the resource state after the last good.
    #[inline]
    pub fn state(&self) -> &ResourceState<W> {
        &self.state
    }

    #[inline]
    pub fn statistics(&self) -> &ScheduleStatistics {
        &self.statistics
    }

    /// Builds the output report of this run for `instance`.
    #[inline]
    pub fn report<'a>(&'a self, instance: &'a Instance<W>) -> Report<'a, W> {
        Report::new(instance, &self.plan)
    }

    #[inline]
    pub fn into_plan(self) -> Plan {
        self.plan
    }
}
