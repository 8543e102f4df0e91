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

use railyard_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for station indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StationIndexTag;

impl TypedIndexTag for StationIndexTag {
    const NAME: &'static str = "StationIndex";
}

/// A typed index for stations.
pub type StationIndex = TypedIndex<StationIndexTag>;

/// A tag type for edge (track) indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EdgeIndexTag;

impl TypedIndexTag for EdgeIndexTag {
    const NAME: &'static str = "EdgeIndex";
}

/// A typed index for edges.
pub type EdgeIndex = TypedIndex<EdgeIndexTag>;

/// A tag type for lane indices. Lanes are 0-based internally and printed
/// 1-based.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LaneIndexTag;

impl TypedIndexTag for LaneIndexTag {
    const NAME: &'static str = "LaneIndex";
}

/// A typed index for lanes.
pub type LaneIndex = TypedIndex<LaneIndexTag>;

/// A tag type for good indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct GoodIndexTag;

impl TypedIndexTag for GoodIndexTag {
    const NAME: &'static str = "GoodIndex";
}

/// A typed index for goods.
pub type GoodIndex = TypedIndex<GoodIndexTag>;
