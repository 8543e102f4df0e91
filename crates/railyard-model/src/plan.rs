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

use crate::{index::GoodIndex, route::Route};

/// The scheduler's result for every good of an instance.
///
/// Structure of arrays, like the rest of the model: `routes[g]` belongs to
/// good `g` and is `None` if the good could not be routed. `order` is the
/// sequence in which the scheduler processed the goods, which is also the
/// order they are reported in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    order: Vec<GoodIndex>,
    routes: Vec<Option<Route>>,
}

impl Plan {
    /// Creates a plan for `num_goods` goods, all unrouted, reported in `order`.
    ///
    /// # Panics
    ///
    /// Panics if `order` is not a permutation of `0..num_goods`.
    pub fn new(num_goods: usize, order: Vec<GoodIndex>) -> Self {
        let mut seen = vec![false; num_goods];
        for g in &order {
            let index = g.get();
            assert!(
                index < num_goods && !seen[index],
                "called `Plan::new` with an order that is not a permutation of 0..{}",
                num_goods
            );
            seen[index] = true;
        }
        assert_eq!(
            order.len(),
            num_goods,
            "called `Plan::new` with an order that is not a permutation of 0..{}",
            num_goods
        );

        Self {
            order,
            routes: vec![None; num_goods],
        }
    }

    /// Records the committed route of a good.
    #[inline]
    pub fn set_route(&mut self, good_index: GoodIndex, route: Route) {
        self.routes[good_index.get()] = Some(route);
    }

    #[inline]
    pub fn route(&self, good_index: GoodIndex) -> Option<&Route> {
        self.routes[good_index.get()].as_ref()
    }

    #[inline]
    pub fn is_routed(&self, good_index: GoodIndex) -> bool {
        self.routes[good_index.get()].is_some()
    }

    #[inline]
    pub fn order(&self) -> &[GoodIndex] {
        &self.order
    }

    #[inline]
    pub fn num_goods(&self) -> usize {
        self.routes.len()
    }

    pub fn num_routed(&self) -> usize {
        self.routes.iter().filter(|r| r.is_some()).count()
    }

    #[inline]
    pub fn num_failed(&self) -> usize {
        self.num_goods() - self.num_routed()
    }

    /// Iterates over `(good, route)` in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (GoodIndex, Option<&Route>)> + '_ {
        self.order.iter().map(|&g| (g, self.route(g)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        index::{EdgeIndex, LaneIndex, StationIndex},
        route::RouteStep,
    };

    fn gi(i: usize) -> GoodIndex {
        GoodIndex::new(i)
    }

    #[test]
    fn test_new_plan_is_unrouted() {
        let plan = Plan::new(3, vec![gi(2), gi(0), gi(1)]);
        assert_eq!(plan.num_goods(), 3);
        assert_eq!(plan.num_routed(), 0);
        assert_eq!(plan.num_failed(), 3);
        assert!(!plan.is_routed(gi(1)));
    }

    #[test]
    fn test_set_route_and_iterate_in_order() {
        let mut plan = Plan::new(2, vec![gi(1), gi(0)]);
        let route = Route::from_steps([RouteStep::new(
            EdgeIndex::new(0),
            LaneIndex::new(0),
            StationIndex::new(0),
            StationIndex::new(1),
        )]);
        plan.set_route(gi(0), route.clone());

        let visited: Vec<(GoodIndex, bool)> =
            plan.iter().map(|(g, r)| (g, r.is_some())).collect();
        assert_eq!(visited, vec![(gi(1), false), (gi(0), true)]);
        assert_eq!(plan.route(gi(0)), Some(&route));
        assert_eq!(plan.num_failed(), 1);
    }

    #[test]
    #[should_panic(expected = "not a permutation")]
    fn test_rejects_duplicate_order() {
        let _ = Plan::new(2, vec![gi(0), gi(0)]);
    }

    #[test]
    #[should_panic(expected = "not a permutation")]
    fn test_rejects_short_order() {
        let _ = Plan::new(2, vec![gi(1)]);
    }
}
