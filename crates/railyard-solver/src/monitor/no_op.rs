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

use crate::{monitor::schedule_monitor::ScheduleMonitor, stats::ScheduleStatistics};
use railyard_core::num::weight::Weight;
use railyard_model::{good::Good, index::GoodIndex, instance::Instance, route::Route};
use railyard_router::strategy::RoutingError;

/// A monitor that ignores every event.
#[repr(transparent)]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct NoOperationMonitor<W> {
    _phantom: std::marker::PhantomData<W>,
}

impl<W> NoOperationMonitor<W> {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<W> ScheduleMonitor<W> for NoOperationMonitor<W>
where
    W: Weight,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_start(&mut self, _instance: &Instance<W>, _order: &[GoodIndex]) {}

    #[inline(always)]
    fn on_good_routed(
        &mut self,
        _good_index: GoodIndex,
        _good: &Good<W>,
        _route: &Route,
        _pickers_placed: u32,
    ) {
    }

    #[inline(always)]
    fn on_good_failed(&mut self, _good_index: GoodIndex, _good: &Good<W>, _error: &RoutingError) {}

    #[inline(always)]
    fn on_end(&mut self, _statistics: &ScheduleStatistics) {}
}
