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

//! Station/track topology.
//!
//! A `Network` is built once through `NetworkBuilder` and is read-only from
//! then on. Stations and edges are stored in insertion order and addressed
//! by `StationIndex` / `EdgeIndex`; every station keeps its incident edges in
//! the same order, so neighbor iteration (and therefore every search that
//! runs on top of it) is deterministic.
//!
//! Edges are undirected for topology purposes. Traversal direction still
//! matters for picker bookkeeping, which is why an edge can tell which of its
//! two endpoint sides a station sits on (`Edge::side_of`).

use crate::index::{EdgeIndex, LaneIndex, StationIndex};
use railyard_core::num::weight::Weight;
use rustc_hash::FxHashMap;

/// A station with its external id and total picker capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Station {
    id: String,
    pickers: u32,
}

impl Station {
    /// Returns the external id of the station.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the total number of pickers the station starts with.
    #[inline]
    pub fn pickers(&self) -> u32 {
        self.pickers
    }
}

/// One of the two endpoints of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndpointSide {
    A,
    B,
}

impl EndpointSide {
    /// Returns `0` for `A` and `1` for `B`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        match self {
            EndpointSide::A => 0,
            EndpointSide::B => 1,
        }
    }
}

/// A bidirectional track between two distinct stations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    id: String,
    a: StationIndex,
    b: StationIndex,
}

impl Edge {
    /// Returns the external id of the edge.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns both endpoints as `(a, b)`, in the order they were declared.
    #[inline]
    pub fn endpoints(&self) -> (StationIndex, StationIndex) {
        (self.a, self.b)
    }

    /// Returns `true` if `station` is one of the endpoints.
    #[inline]
    pub fn connects(&self, station: StationIndex) -> bool {
        self.a == station || self.b == station
    }

    /// Returns the endpoint on the other side of `station`, or `None` if the
    /// edge is not incident to `station`.
    #[inline]
    pub fn opposite(&self, station: StationIndex) -> Option<StationIndex> {
        if station == self.a {
            Some(self.b)
        } else if station == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Returns the side `station` occupies on this edge.
    #[inline]
    pub fn side_of(&self, station: StationIndex) -> Option<EndpointSide> {
        if station == self.a {
            Some(EndpointSide::A)
        } else if station == self.b {
            Some(EndpointSide::B)
        } else {
            None
        }
    }

    /// Returns the station on the given side.
    #[inline]
    pub fn station_at(&self, side: EndpointSide) -> StationIndex {
        match side {
            EndpointSide::A => self.a,
            EndpointSide::B => self.b,
        }
    }
}

/// An entry of a station's adjacency list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Adjacent {
    pub edge: EdgeIndex,
    pub neighbor: StationIndex,
}

#[inline(always)]
fn pair_key(u: StationIndex, v: StationIndex) -> (StationIndex, StationIndex) {
    if u <= v { (u, v) } else { (v, u) }
}

/// The frozen station/track graph together with the lane layout shared by
/// every edge.
///
/// - `stations[s]`, `edges[e]`: arenas addressed by typed indices.
/// - `adjacency[s]`: incident edges of `s` with the station on the far side.
/// - `pair_lookup`: unordered station pair to the first edge declared between them.
/// - `num_lanes`, `lane_capacity`: every edge has `num_lanes` lanes, each
///   accepting at most `lane_capacity` accumulated weight.
#[derive(Clone)]
pub struct Network<W> {
    stations: Vec<Station>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<Adjacent>>,
    station_lookup: FxHashMap<String, StationIndex>,
    edge_lookup: FxHashMap<String, EdgeIndex>,
    pair_lookup: FxHashMap<(StationIndex, StationIndex), EdgeIndex>,
    num_lanes: usize,
    lane_capacity: W,
}

impl<W> Network<W>
where
    W: Weight,
{
    /// Returns the number of stations.
    #[inline]
    pub fn num_stations(&self) -> usize {
        self.stations.len()
    }

    /// Returns the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of lanes on every edge.
    #[inline]
    pub fn num_lanes(&self) -> usize {
        self.num_lanes
    }

    /// Returns the maximum accumulated weight of a single lane.
    #[inline]
    pub fn lane_capacity(&self) -> W {
        self.lane_capacity
    }

    /// Iterates over all lane indices in ascending order.
    #[inline]
    pub fn lanes(&self) -> impl DoubleEndedIterator<Item = LaneIndex> + ExactSizeIterator {
        LaneIndex::range(self.num_lanes)
    }

    #[inline]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the station at `station_index`.
    ///
    /// # Panics
    ///
    /// Panics if `station_index` is not in `0..num_stations()`.
    #[inline]
    pub fn station(&self, station_index: StationIndex) -> &Station {
        let index = station_index.get();
        debug_assert!(
            index < self.num_stations(),
            "called `Network::station` with station index out of bounds: the len is {} but the index is {}",
            self.num_stations(),
            index
        );

        &self.stations[index]
    }

    /// Returns the edge at `edge_index`.
    ///
    /// # Panics
    ///
    /// Panics if `edge_index` is not in `0..num_edges()`.
    #[inline]
    pub fn edge(&self, edge_index: EdgeIndex) -> &Edge {
        let index = edge_index.get();
        debug_assert!(
            index < self.num_edges(),
            "called `Network::edge` with edge index out of bounds: the len is {} but the index is {}",
            self.num_edges(),
            index
        );

        &self.edges[index]
    }

    /// Returns the incident edges of `station_index` in declaration order.
    #[inline]
    pub fn neighbors(&self, station_index: StationIndex) -> &[Adjacent] {
        &self.adjacency[station_index.get()]
    }

    /// Resolves an external station id.
    #[inline]
    pub fn station_by_id(&self, id: &str) -> Option<StationIndex> {
        self.station_lookup.get(id).copied()
    }

    /// Resolves an external edge id.
    #[inline]
    pub fn edge_by_id(&self, id: &str) -> Option<EdgeIndex> {
        self.edge_lookup.get(id).copied()
    }

    /// Returns the first edge declared between `u` and `v`, in either direction.
    #[inline]
    pub fn edge_between(&self, u: StationIndex, v: StationIndex) -> Option<EdgeIndex> {
        self.pair_lookup.get(&pair_key(u, v)).copied()
    }

    /// Returns the sum of all station picker capacities.
    pub fn total_pickers(&self) -> u64 {
        self.stations.iter().map(|s| u64::from(s.pickers)).sum()
    }
}

impl<W> std::fmt::Debug for Network<W>
where
    W: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("stations", &self.stations)
            .field("edges", &self.edges)
            .field("num_lanes", &self.num_lanes)
            .field("lane_capacity", &self.lane_capacity)
            .finish()
    }
}

impl<W> std::fmt::Display for Network<W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Network(num_stations: {}, num_edges: {}, num_lanes: {}, lane_capacity: {})",
            self.num_stations(),
            self.num_edges(),
            self.num_lanes,
            self.lane_capacity
        )
    }
}

/// The error type for structurally invalid networks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// A station id was declared twice.
    DuplicateStation { id: String },
    /// An edge id was declared twice.
    DuplicateEdge { id: String },
    /// An edge references a station id that was never declared.
    UnknownStation { id: String },
    /// An edge connects a station with itself.
    SelfLoop { edge: String },
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateStation { id } => write!(f, "Station '{}' is declared twice", id),
            Self::DuplicateEdge { id } => write!(f, "Edge '{}' is declared twice", id),
            Self::UnknownStation { id } => write!(f, "Unknown station '{}'", id),
            Self::SelfLoop { edge } => write!(f, "Edge '{}' connects a station with itself", edge),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Incrementally assembles a `Network`.
///
/// Stations must be added before the edges that reference them. Every
/// `add_*` call fails fast on structural problems instead of substituting a
/// default.
///
/// # Examples
///
/// ```rust
/// # use railyard_model::network::NetworkBuilder;
///
/// let mut builder = NetworkBuilder::<f64>::new(2, 10.0);
/// builder.add_station("A", 5).unwrap();
/// builder.add_station("B", 5).unwrap();
/// builder.add_edge("E1", "A", "B").unwrap();
/// let network = builder.build();
/// assert_eq!(network.num_edges(), 1);
/// assert_eq!(network.neighbors(network.station_by_id("A").unwrap()).len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct NetworkBuilder<W> {
    num_lanes: usize,
    lane_capacity: W,
    stations: Vec<Station>,
    edges: Vec<Edge>,
    station_lookup: FxHashMap<String, StationIndex>,
    edge_lookup: FxHashMap<String, EdgeIndex>,
}

impl<W> NetworkBuilder<W>
where
    W: Weight,
{
    /// Creates an empty builder for a network whose edges carry `num_lanes`
    /// lanes of `lane_capacity` each.
    pub fn new(num_lanes: usize, lane_capacity: W) -> Self {
        Self {
            num_lanes,
            lane_capacity,
            stations: Vec::new(),
            edges: Vec::new(),
            station_lookup: FxHashMap::default(),
            edge_lookup: FxHashMap::default(),
        }
    }

    /// Creates an empty builder with room for the given number of stations and edges.
    pub fn preallocated(
        num_lanes: usize,
        lane_capacity: W,
        num_stations: usize,
        num_edges: usize,
    ) -> Self {
        let mut station_lookup = FxHashMap::default();
        station_lookup.reserve(num_stations);
        let mut edge_lookup = FxHashMap::default();
        edge_lookup.reserve(num_edges);

        Self {
            num_lanes,
            lane_capacity,
            stations: Vec::with_capacity(num_stations),
            edges: Vec::with_capacity(num_edges),
            station_lookup,
            edge_lookup,
        }
    }

    #[inline]
    pub fn num_stations(&self) -> usize {
        self.stations.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Adds a station with `pickers` pickers.
    pub fn add_station(
        &mut self,
        id: impl Into<String>,
        pickers: u32,
    ) -> Result<StationIndex, NetworkError> {
        let id = id.into();
        if self.station_lookup.contains_key(&id) {
            return Err(NetworkError::DuplicateStation { id });
        }

        let index = StationIndex::new(self.stations.len());
        self.station_lookup.insert(id.clone(), index);
        self.stations.push(Station { id, pickers });
        Ok(index)
    }

    /// Adds an edge between two previously added stations.
    pub fn add_edge(
        &mut self,
        id: impl Into<String>,
        station_a: &str,
        station_b: &str,
    ) -> Result<EdgeIndex, NetworkError> {
        let id = id.into();
        if self.edge_lookup.contains_key(&id) {
            return Err(NetworkError::DuplicateEdge { id });
        }

        let a = self.resolve(station_a)?;
        let b = self.resolve(station_b)?;
        if a == b {
            return Err(NetworkError::SelfLoop { edge: id });
        }

        let index = EdgeIndex::new(self.edges.len());
        self.edge_lookup.insert(id.clone(), index);
        self.edges.push(Edge { id, a, b });
        Ok(index)
    }

    #[inline]
    fn resolve(&self, id: &str) -> Result<StationIndex, NetworkError> {
        self.station_lookup
            .get(id)
            .copied()
            .ok_or_else(|| NetworkError::UnknownStation { id: id.to_owned() })
    }

    /// Freezes the builder into a `Network`, deriving adjacency lists and the
    /// station pair lookup.
    pub fn build(self) -> Network<W> {
        let mut adjacency = vec![Vec::new(); self.stations.len()];
        let mut pair_lookup = FxHashMap::default();
        pair_lookup.reserve(self.edges.len());

        for (i, edge) in self.edges.iter().enumerate() {
            let edge_index = EdgeIndex::new(i);
            adjacency[edge.a.get()].push(Adjacent {
                edge: edge_index,
                neighbor: edge.b,
            });
            adjacency[edge.b.get()].push(Adjacent {
                edge: edge_index,
                neighbor: edge.a,
            });
            pair_lookup.entry(pair_key(edge.a, edge.b)).or_insert(edge_index);
        }

        Network {
            stations: self.stations,
            edges: self.edges,
            adjacency,
            station_lookup: self.station_lookup,
            edge_lookup: self.edge_lookup,
            pair_lookup,
            num_lanes: self.num_lanes,
            lane_capacity: self.lane_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn si(i: usize) -> StationIndex {
        StationIndex::new(i)
    }

    fn ei(i: usize) -> EdgeIndex {
        EdgeIndex::new(i)
    }

    fn triangle() -> Network<f64> {
        let mut builder = NetworkBuilder::new(3, 10.0);
        builder.add_station("A", 1).unwrap();
        builder.add_station("B", 2).unwrap();
        builder.add_station("C", 3).unwrap();
        builder.add_edge("AB", "A", "B").unwrap();
        builder.add_edge("BC", "B", "C").unwrap();
        builder.add_edge("CA", "C", "A").unwrap();
        builder.build()
    }

    #[test]
    fn test_dimensions_and_lookups() {
        let network = triangle();
        assert_eq!(network.num_stations(), 3);
        assert_eq!(network.num_edges(), 3);
        assert_eq!(network.num_lanes(), 3);
        assert_eq!(network.lane_capacity(), 10.0);
        assert_eq!(network.station_by_id("B"), Some(si(1)));
        assert_eq!(network.edge_by_id("CA"), Some(ei(2)));
        assert_eq!(network.station_by_id("Z"), None);
        assert_eq!(network.total_pickers(), 6);
    }

    #[test]
    fn test_adjacency_is_symmetric_and_ordered() {
        let network = triangle();
        let a = network.neighbors(si(0));
        assert_eq!(
            a,
            &[
                Adjacent { edge: ei(0), neighbor: si(1) },
                Adjacent { edge: ei(2), neighbor: si(2) },
            ]
        );
        let c = network.neighbors(si(2));
        assert_eq!(c[0], Adjacent { edge: ei(1), neighbor: si(1) });
        assert_eq!(c[1], Adjacent { edge: ei(2), neighbor: si(0) });
    }

    #[test]
    fn test_edge_between_ignores_direction() {
        let network = triangle();
        assert_eq!(network.edge_between(si(0), si(1)), Some(ei(0)));
        assert_eq!(network.edge_between(si(1), si(0)), Some(ei(0)));
        assert_eq!(network.edge_between(si(0), si(2)), Some(ei(2)));
    }

    #[test]
    fn test_parallel_edges_keep_first_in_pair_lookup() {
        let mut builder = NetworkBuilder::<f64>::new(1, 1.0);
        builder.add_station("A", 1).unwrap();
        builder.add_station("B", 1).unwrap();
        builder.add_edge("E1", "A", "B").unwrap();
        builder.add_edge("E2", "B", "A").unwrap();
        let network = builder.build();
        assert_eq!(network.edge_between(si(0), si(1)), Some(ei(0)));
        assert_eq!(network.neighbors(si(0)).len(), 2);
    }

    #[test]
    fn test_edge_sides_and_opposite() {
        let network = triangle();
        let edge = network.edge(ei(1));
        assert_eq!(edge.endpoints(), (si(1), si(2)));
        assert_eq!(edge.side_of(si(1)), Some(EndpointSide::A));
        assert_eq!(edge.side_of(si(2)), Some(EndpointSide::B));
        assert_eq!(edge.side_of(si(0)), None);
        assert_eq!(edge.opposite(si(2)), Some(si(1)));
        assert_eq!(edge.opposite(si(0)), None);
        assert_eq!(edge.station_at(EndpointSide::B), si(2));
        assert!(edge.connects(si(1)));
        assert!(!edge.connects(si(0)));
    }

    #[test]
    fn test_builder_rejects_duplicates_unknowns_and_loops() {
        let mut builder = NetworkBuilder::<f64>::new(1, 1.0);
        builder.add_station("A", 1).unwrap();
        assert_eq!(
            builder.add_station("A", 2),
            Err(NetworkError::DuplicateStation { id: "A".into() })
        );
        builder.add_station("B", 1).unwrap();
        builder.add_edge("E", "A", "B").unwrap();
        assert_eq!(
            builder.add_edge("E", "B", "A"),
            Err(NetworkError::DuplicateEdge { id: "E".into() })
        );
        assert_eq!(
            builder.add_edge("F", "A", "Q"),
            Err(NetworkError::UnknownStation { id: "Q".into() })
        );
        assert_eq!(
            builder.add_edge("G", "B", "B"),
            Err(NetworkError::SelfLoop { edge: "G".into() })
        );
        // Failed additions leave no trace.
        assert_eq!(builder.num_edges(), 1);
        assert_eq!(builder.num_stations(), 2);
    }

    #[test]
    fn test_lanes_iterates_all_lanes() {
        let network = triangle();
        let lanes: Vec<usize> = network.lanes().map(|l| l.get()).collect();
        assert_eq!(lanes, vec![0, 1, 2]);
    }

    #[test]
    fn test_display() {
        let network = triangle();
        assert_eq!(
            format!("{}", network),
            "Network(num_stations: 3, num_edges: 3, num_lanes: 3, lane_capacity: 10)"
        );
    }
}
