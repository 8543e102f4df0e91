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

//! Structured logging of a scheduling run through `tracing`.
//!
//! The run summary is emitted at `info`, per-good outcomes at `debug` and
//! per-step detail at `trace`. The subscriber decides what is kept; nothing
//! here writes to stdout.

use crate::{monitor::schedule_monitor::ScheduleMonitor, stats::ScheduleStatistics};
use railyard_core::num::weight::Weight;
use railyard_model::{good::Good, index::GoodIndex, instance::Instance, route::Route};
use railyard_router::strategy::RoutingError;
use std::time::Instant;
use tracing::{debug, info, trace};

#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    processed: usize,
    total: usize,
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LogMonitor {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            processed: 0,
            total: 0,
        }
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogMonitor(processed: {}/{})", self.processed, self.total)
    }
}

impl<W> ScheduleMonitor<W> for LogMonitor
where
    W: Weight,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_start(&mut self, instance: &Instance<W>, order: &[GoodIndex]) {
        self.start_time = Instant::now();
        self.processed = 0;
        self.total = order.len();

        let network = instance.network();
        info!(
            stations = network.num_stations(),
            edges = network.num_edges(),
            lanes = network.num_lanes(),
            lane_capacity = %network.lane_capacity(),
            pickers = network.total_pickers(),
            goods = instance.num_goods(),
            total_weight = %instance.total_weight(),
            "scheduling started"
        );
    }

    fn on_good_routed(
        &mut self,
        _good_index: GoodIndex,
        good: &Good<W>,
        route: &Route,
        pickers_placed: u32,
    ) {
        self.processed += 1;
        debug!(
            good = good.id(),
            weight = %good.weight(),
            hops = route.len(),
            pickers_placed,
            progress = self.processed,
            "good routed"
        );
        for step in route.steps() {
            trace!(good = good.id(), %step, "route step");
        }
    }

    fn on_good_failed(&mut self, _good_index: GoodIndex, good: &Good<W>, error: &RoutingError) {
        self.processed += 1;
        debug!(
            good = good.id(),
            weight = %good.weight(),
            reason = %error,
            progress = self.processed,
            "good not routed"
        );
    }

    fn on_end(&mut self, statistics: &ScheduleStatistics) {
        info!(
            routed = statistics.routed,
            failed = statistics.failed(),
            unreachable = statistics.unreachable,
            skipped_waypoints = statistics.skipped_waypoints,
            pickers_placed = statistics.pickers_placed,
            elapsed = ?self.start_time.elapsed(),
            "scheduling finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railyard_model::{index::StationIndex, network::NetworkBuilder};

    #[test]
    fn test_tracks_progress_without_subscriber() {
        let mut builder = NetworkBuilder::new(1, 10.0);
        builder.add_station("A", 1).unwrap();
        builder.add_station("B", 1).unwrap();
        let instance = Instance::new(builder.build(), Vec::new());
        let good = Good::new("G1", StationIndex::new(0), StationIndex::new(1), 2.0);

        let mut monitor = LogMonitor::new();
        let order = [GoodIndex::new(0), GoodIndex::new(1)];
        ScheduleMonitor::<f64>::on_start(&mut monitor, &instance, &order);
        monitor.on_good_routed(GoodIndex::new(0), &good, &Route::new(), 0);
        monitor.on_good_failed(GoodIndex::new(1), &good, &RoutingError::NotReachable);
        ScheduleMonitor::<f64>::on_end(&mut monitor, &ScheduleStatistics::default());

        assert_eq!(monitor.to_string(), "LogMonitor(processed: 2/2)");
        assert_eq!(ScheduleMonitor::<f64>::name(&monitor), "LogMonitor");
    }
}
