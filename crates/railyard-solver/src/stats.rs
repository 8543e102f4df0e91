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

//! Aggregate counters of one scheduling run.

use railyard_router::{stats::SearchStatistics, strategy::RoutingError};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleStatistics {
    /// Number of goods in the instance.
    pub goods: u64,

    /// Goods that received a route, including trivial ones.
    pub routed: u64,

    /// Routed goods whose origin equals their destination.
    pub trivial: u64,

    /// Goods for which no feasible route existed.
    pub unreachable: u64,

    /// Goods refused because they carry waypoints.
    pub skipped_waypoints: u64,

    /// Goods whose proposed route the resource state refused.
    pub rejected_commits: u64,

    /// Pickers placed over the whole run.
    pub pickers_placed: u64,

    /// Counters of the underlying route searches.
    pub search: SearchStatistics,

    pub time_total: Duration,
}

impl Default for ScheduleStatistics {
    fn default() -> Self {
        Self {
            goods: 0,
            routed: 0,
            trivial: 0,
            unreachable: 0,
            skipped_waypoints: 0,
            rejected_commits: 0,
            pickers_placed: 0,
            search: SearchStatistics::default(),
            time_total: Duration::ZERO,
        }
    }
}

impl ScheduleStatistics {
    #[inline]
    pub fn new(goods: usize) -> Self {
        Self {
            goods: goods as u64,
            ..Self::default()
        }
    }

    #[inline]
    pub fn on_good_routed(&mut self, trivial: bool, pickers_placed: u32) {
        self.routed = self.routed.saturating_add(1);
        if trivial {
            self.trivial = self.trivial.saturating_add(1);
        }
        self.pickers_placed = self.pickers_placed.saturating_add(u64::from(pickers_placed));
    }

    #[inline]
    pub fn on_good_failed(&mut self, error: &RoutingError) {
        let counter = match error {
            RoutingError::NotReachable => &mut self.unreachable,
            RoutingError::WaypointsUnsupported => &mut self.skipped_waypoints,
            RoutingError::CommitRejected(_) => &mut self.rejected_commits,
        };
        *counter = counter.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.unreachable
            .saturating_add(self.skipped_waypoints)
            .saturating_add(self.rejected_commits)
    }
}

impl std::fmt::Display for ScheduleStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Railyard Scheduler Statistics:")?;
        writeln!(f, "   Goods:                {}", self.goods)?;
        writeln!(f, "   Routed:               {}", self.routed)?;
        writeln!(f, "   Trivial:              {}", self.trivial)?;
        writeln!(f, "   Unreachable:          {}", self.unreachable)?;
        writeln!(f, "   Skipped (Waypoints):  {}", self.skipped_waypoints)?;
        writeln!(f, "   Rejected Commits:     {}", self.rejected_commits)?;
        writeln!(f, "   Pickers Placed:       {}", self.pickers_placed)?;
        writeln!(f, "   Total Time:           {:?}", self.time_total)?;
        write!(f, "{}", self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railyard_model::index::StationIndex;
    use railyard_router::state::CommitError;

    #[test]
    fn test_counts_by_outcome() {
        let mut stats = ScheduleStatistics::new(6);
        stats.on_good_routed(false, 3);
        stats.on_good_routed(true, 0);
        stats.on_good_failed(&RoutingError::NotReachable);
        stats.on_good_failed(&RoutingError::WaypointsUnsupported);
        stats.on_good_failed(&RoutingError::CommitRejected(CommitError::PickersExhausted {
            station: StationIndex::new(0),
        }));

        assert_eq!(stats.goods, 6);
        assert_eq!(stats.routed, 2);
        assert_eq!(stats.trivial, 1);
        assert_eq!(stats.pickers_placed, 3);
        assert_eq!(stats.failed(), 3);
        assert!(stats.to_string().contains("Skipped (Waypoints):  1"));
    }
}
