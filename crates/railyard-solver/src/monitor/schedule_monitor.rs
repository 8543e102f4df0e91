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
use railyard_model::{good::Good, index::GoodIndex, instance::Instance, route::Route};
use railyard_router::strategy::RoutingError;

/// Lifecycle hooks of `Scheduler::arrange`.
pub trait ScheduleMonitor<W>
where
    W: Weight,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once before the first good, with the processing order.
    fn on_start(&mut self, instance: &Instance<W>, order: &[GoodIndex]);

    /// Called after `route` has been committed for `good`.
    fn on_good_routed(
        &mut self,
        good_index: GoodIndex,
        good: &Good<W>,
        route: &Route,
        pickers_placed: u32,
    );

    /// Called when `good` could not be routed.
    fn on_good_failed(&mut self, good_index: GoodIndex, good: &Good<W>, error: &RoutingError);

    /// Called once after the last good.
    fn on_end(&mut self, statistics: &ScheduleStatistics);
}

impl<W> std::fmt::Debug for dyn ScheduleMonitor<W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScheduleMonitor({})", self.name())
    }
}

impl<W> std::fmt::Display for dyn ScheduleMonitor<W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScheduleMonitor({})", self.name())
    }
}
