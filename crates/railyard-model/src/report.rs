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

//! Textual result report.
//!
//! The report starts with one aggregate line, `failed_count,failed_weight`
//! (weight with three decimals), followed by three lines per good in
//! processing order: the good id, the comma separated edge ids of its route,
//! and the comma separated 1-based lane numbers. Goods that could not be
//! routed print `null` on both route lines. A good that is already at its
//! destination is routed with an empty route and prints two empty lines.
//!
//! Rendering is a pure function of the instance and the plan, so writing the
//! same report twice produces identical bytes.

use crate::{instance::Instance, plan::Plan};
use railyard_core::num::weight::Weight;
use std::io::Write;

/// The failure aggregate together with everything needed to render the
/// per-good lines.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a, W> {
    instance: &'a Instance<W>,
    plan: &'a Plan,
    failed_count: usize,
    failed_weight: W,
}

impl<'a, W> Report<'a, W>
where
    W: Weight,
{
    /// Aggregates failures of `plan` against `instance`.
    ///
    /// # Panics
    ///
    /// Panics if the plan was made for a different number of goods.
    pub fn new(instance: &'a Instance<W>, plan: &'a Plan) -> Self {
        assert_eq!(
            instance.num_goods(),
            plan.num_goods(),
            "called `Report::new` with a plan for {} goods but an instance with {}",
            plan.num_goods(),
            instance.num_goods()
        );

        let (failed_count, failed_weight) = plan
            .iter()
            .filter(|(_, route)| route.is_none())
            .fold((0usize, W::zero()), |(count, weight), (g, _)| {
                (count + 1, weight + instance.good(g).weight())
            });

        Self {
            instance,
            plan,
            failed_count,
            failed_weight,
        }
    }

    /// Returns the number of goods without a route.
    #[inline]
    pub fn failed_count(&self) -> usize {
        self.failed_count
    }

    /// Returns the summed weight of goods without a route.
    #[inline]
    pub fn failed_weight(&self) -> W {
        self.failed_weight
    }

    /// Writes the report to `out`.
    pub fn write_to<O>(&self, out: &mut O) -> std::io::Result<()>
    where
        O: Write,
    {
        write!(out, "{}", self)?;
        out.flush()
    }
}

impl<W> std::fmt::Display for Report<'_, W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let network = self.instance.network();
        writeln!(f, "{},{:.3}", self.failed_count, self.failed_weight)?;

        for (good_index, route) in self.plan.iter() {
            writeln!(f, "{}", self.instance.good(good_index).id())?;
            match route {
                None => {
                    writeln!(f, "null")?;
                    writeln!(f, "null")?;
                }
                Some(route) => {
                    for (i, edge) in route.edges().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", network.edge(edge).id())?;
                    }
                    writeln!(f)?;
                    for (i, lane) in route.lanes().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", lane.ordinal())?;
                    }
                    writeln!(f)?;
                }
            }
        }

        Ok(())
    }
}
