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

//! Processing order of goods.
//!
//! The scheduler is greedy: each good is routed against the state left by
//! every good before it, so the order decides who gets scarce lanes and
//! pickers. All orders are stable, equal keys keep input order.

use railyard_core::num::weight::Weight;
use railyard_model::{good::Good, index::GoodIndex};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GoodOrder {
    /// Descending weight.
    #[default]
    HeaviestFirst,
    /// Ascending weight.
    LightestFirst,
    /// The order in which goods were declared.
    InputOrder,
}

impl GoodOrder {
    /// Returns the indices of `goods` in processing order.
    pub fn arrange<W>(&self, goods: &[Good<W>]) -> Vec<GoodIndex>
    where
        W: Weight,
    {
        let mut order: Vec<GoodIndex> = GoodIndex::range(goods.len()).collect();
        let by_weight = |a: &GoodIndex, b: &GoodIndex| {
            goods[a.get()]
                .weight()
                .partial_cmp(&goods[b.get()].weight())
                .unwrap_or(Ordering::Equal)
        };

        match self {
            GoodOrder::HeaviestFirst => order.sort_by(|a, b| by_weight(b, a)),
            GoodOrder::LightestFirst => order.sort_by(by_weight),
            GoodOrder::InputOrder => {}
        }
        order
    }
}

impl std::fmt::Display for GoodOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoodOrder::HeaviestFirst => write!(f, "HeaviestFirst"),
            GoodOrder::LightestFirst => write!(f, "LightestFirst"),
            GoodOrder::InputOrder => write!(f, "InputOrder"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railyard_model::index::StationIndex;

    fn goods(weights: &[f64]) -> Vec<Good<f64>> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &w)| Good::new(format!("G{}", i + 1), StationIndex::new(0), StationIndex::new(1), w))
            .collect()
    }

    fn indices(order: &[GoodIndex]) -> Vec<usize> {
        order.iter().map(|g| g.get()).collect()
    }

    #[test]
    fn test_heaviest_first_is_stable() {
        let goods = goods(&[3.0, 7.0, 3.0, 9.5, 7.0]);
        assert_eq!(indices(&GoodOrder::HeaviestFirst.arrange(&goods)), vec![3, 1, 4, 0, 2]);
    }

    #[test]
    fn test_lightest_first_is_stable() {
        let goods = goods(&[3.0, 7.0, 3.0, 9.5, 7.0]);
        assert_eq!(indices(&GoodOrder::LightestFirst.arrange(&goods)), vec![0, 2, 1, 4, 3]);
    }

    #[test]
    fn test_input_order_and_default() {
        let goods = goods(&[3.0, 7.0, 1.0]);
        assert_eq!(indices(&GoodOrder::InputOrder.arrange(&goods)), vec![0, 1, 2]);
        assert_eq!(GoodOrder::default(), GoodOrder::HeaviestFirst);
        assert!(GoodOrder::HeaviestFirst.arrange::<f64>(&[]).is_empty());
    }
}
