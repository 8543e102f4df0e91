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

//! Post-run consistency checks of a resource state.
//!
//! A correct run never produces a violation. The checks exist so callers
//! can verify that after the fact and log anything unexpected.

use railyard_core::num::weight::Weight;
use railyard_model::{
    index::{EdgeIndex, LaneIndex, StationIndex},
    network::Network,
};
use railyard_router::state::ResourceState;

#[derive(Debug, Clone, PartialEq)]
pub enum Violation<W> {
    /// A lane carries more than the lane capacity.
    LaneOverloaded {
        edge: EdgeIndex,
        lane: LaneIndex,
        load: W,
        capacity: W,
    },
    /// A station has more pickers left than it started with.
    PickersOverdrawn {
        station: StationIndex,
        remaining: u32,
        initial: u32,
    },
    /// The picker flags around a station do not match its consumed pickers.
    PickerCountMismatch {
        station: StationIndex,
        flags: usize,
        placed: u32,
    },
}

impl<W> std::fmt::Display for Violation<W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::LaneOverloaded {
                edge,
                lane,
                load,
                capacity,
            } => write!(
                f,
                "{} on {} carries {:.3} but the capacity is {:.3}",
                lane, edge, load, capacity
            ),
            Violation::PickersOverdrawn {
                station,
                remaining,
                initial,
            } => write!(
                f,
                "{} has {} pickers left but started with {}",
                station, remaining, initial
            ),
            Violation::PickerCountMismatch {
                station,
                flags,
                placed,
            } => write!(
                f,
                "{} has {} picker flags set but placed {} pickers",
                station, flags, placed
            ),
        }
    }
}

/// Checks `state` against the limits of `network`.
pub fn audit<W>(network: &Network<W>, state: &ResourceState<W>) -> Vec<Violation<W>>
where
    W: Weight,
{
    let mut violations = Vec::new();

    for edge in EdgeIndex::range(network.num_edges()) {
        for lane in network.lanes() {
            let load = state.lane_load(edge, lane);
            if load > network.lane_capacity() {
                violations.push(Violation::LaneOverloaded {
                    edge,
                    lane,
                    load,
                    capacity: network.lane_capacity(),
                });
            }
        }
    }

    for station in StationIndex::range(network.num_stations()) {
        let remaining = state.remaining_pickers(station);
        let initial = state.initial_pickers(station);
        if remaining > initial {
            violations.push(Violation::PickersOverdrawn {
                station,
                remaining,
                initial,
            });
            continue;
        }

        let flags: usize = network
            .neighbors(station)
            .iter()
            .map(|adjacent| state.lanes_with_pickers(adjacent.edge, station))
            .sum();
        let placed = initial - remaining;
        if flags != placed as usize {
            violations.push(Violation::PickerCountMismatch {
                station,
                flags,
                placed,
            });
        }
    }

    violations
}
