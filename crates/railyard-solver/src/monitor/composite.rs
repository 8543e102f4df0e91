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

//! Fan-out monitor.
//!
//! `CompositeMonitor` forwards every event to its children in insertion
//! order, so logging and custom observers can be combined for one run.

use crate::{monitor::schedule_monitor::ScheduleMonitor, stats::ScheduleStatistics};
use railyard_core::num::weight::Weight;
use railyard_model::{good::Good, index::GoodIndex, instance::Instance, route::Route};
use railyard_router::strategy::RoutingError;

pub struct CompositeMonitor<'a, W>
where
    W: Weight,
{
    monitors: Vec<Box<dyn ScheduleMonitor<W> + 'a>>,
}

impl<'a, W> Default for CompositeMonitor<'a, W>
where
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, W> CompositeMonitor<'a, W>
where
    W: Weight,
{
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a monitor; events reach it after all previously added ones.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: ScheduleMonitor<W> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn ScheduleMonitor<W> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn ScheduleMonitor<W> + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, W> FromIterator<Box<dyn ScheduleMonitor<W> + 'a>> for CompositeMonitor<'a, W>
where
    W: Weight,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn ScheduleMonitor<W> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, W> std::fmt::Debug for CompositeMonitor<'a, W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.monitors.iter().map(|m| m.name()))
            .finish()
    }
}

impl<'a, W> ScheduleMonitor<W> for CompositeMonitor<'a, W>
where
    W: Weight,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    #[inline(always)]
    fn on_start(&mut self, instance: &Instance<W>, order: &[GoodIndex]) {
        for monitor in &mut self.monitors {
            monitor.on_start(instance, order);
        }
    }

    #[inline(always)]
    fn on_good_routed(
        &mut self,
        good_index: GoodIndex,
        good: &Good<W>,
        route: &Route,
        pickers_placed: u32,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_good_routed(good_index, good, route, pickers_placed);
        }
    }

    #[inline(always)]
    fn on_good_failed(&mut self, good_index: GoodIndex, good: &Good<W>, error: &RoutingError) {
        for monitor in &mut self.monitors {
            monitor.on_good_failed(good_index, good, error);
        }
    }

    #[inline(always)]
    fn on_end(&mut self, statistics: &ScheduleStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_end(statistics);
        }
    }
}
