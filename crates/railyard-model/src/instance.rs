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

use crate::{good::Good, index::GoodIndex, network::Network};
use railyard_core::num::weight::Weight;

/// A complete problem: the frozen network plus the goods to route, in input
/// order.
#[derive(Clone, Debug)]
pub struct Instance<W> {
    network: Network<W>,
    goods: Vec<Good<W>>,
}

impl<W> Instance<W>
where
    W: Weight,
{
    /// Bundles a network with its goods.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if a good references a station outside the network.
    pub fn new(network: Network<W>, goods: Vec<Good<W>>) -> Self {
        debug_assert!(
            goods.iter().all(|g| {
                g.origin().get() < network.num_stations()
                    && g.destination().get() < network.num_stations()
                    && g.waypoints().iter().all(|w| w.get() < network.num_stations())
            }),
            "called `Instance::new` with a good referencing a station outside the network"
        );

        Self { network, goods }
    }

    #[inline]
    pub fn network(&self) -> &Network<W> {
        &self.network
    }

    #[inline]
    pub fn goods(&self) -> &[Good<W>] {
        &self.goods
    }

    #[inline]
    pub fn num_goods(&self) -> usize {
        self.goods.len()
    }

    /// Returns the good at `good_index`.
    ///
    /// # Panics
    ///
    /// Panics if `good_index` is not in `0..num_goods()`.
    #[inline]
    pub fn good(&self, good_index: GoodIndex) -> &Good<W> {
        let index = good_index.get();
        debug_assert!(
            index < self.num_goods(),
            "called `Instance::good` with good index out of bounds: the len is {} but the index is {}",
            self.num_goods(),
            index
        );

        &self.goods[index]
    }

    /// Finds a good by its external id.
    pub fn good_by_id(&self, id: &str) -> Option<GoodIndex> {
        self.goods
            .iter()
            .position(|g| g.id() == id)
            .map(GoodIndex::new)
    }

    /// Returns the sum of all good weights.
    pub fn total_weight(&self) -> W {
        self.goods
            .iter()
            .fold(W::zero(), |acc, g| acc + g.weight())
    }
}

impl<W> std::fmt::Display for Instance<W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({}, num_goods: {})", self.network, self.num_goods())
    }
}
