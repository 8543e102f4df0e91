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

use crate::index::StationIndex;
use railyard_core::num::weight::Weight;

/// A shipment that has to travel from `origin` to `destination`.
///
/// `weight` is the load the good puts on every lane it travels on.
/// `waypoints` lists stations the route would have to visit in order; they
/// are carried through the model but no routing strategy honors them, so
/// goods with waypoints are always reported as unroutable.
#[derive(Clone, Debug, PartialEq)]
pub struct Good<W> {
    id: String,
    origin: StationIndex,
    destination: StationIndex,
    weight: W,
    waypoints: Vec<StationIndex>,
}

impl<W> Good<W>
where
    W: Weight,
{
    /// Creates a good without waypoints.
    pub fn new(
        id: impl Into<String>,
        origin: StationIndex,
        destination: StationIndex,
        weight: W,
    ) -> Self {
        Self {
            id: id.into(),
            origin,
            destination,
            weight,
            waypoints: Vec::new(),
        }
    }

    /// Attaches mandatory intermediate stations.
    pub fn with_waypoints<I>(mut self, waypoints: I) -> Self
    where
        I: IntoIterator<Item = StationIndex>,
    {
        self.waypoints.extend(waypoints);
        self
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn origin(&self) -> StationIndex {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> StationIndex {
        self.destination
    }

    #[inline]
    pub fn weight(&self) -> W {
        self.weight
    }

    #[inline]
    pub fn waypoints(&self) -> &[StationIndex] {
        &self.waypoints
    }

    #[inline]
    pub fn has_waypoints(&self) -> bool {
        !self.waypoints.is_empty()
    }

    /// Returns `true` if the good is already where it has to go.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.origin == self.destination
    }
}

impl<W> std::fmt::Display for Good<W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Good({}, {} -> {}, weight: {:.3}, waypoints: {})",
            self.id,
            self.origin,
            self.destination,
            self.weight,
            self.waypoints.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn si(i: usize) -> StationIndex {
        StationIndex::new(i)
    }

    #[test]
    fn test_accessors() {
        let good = Good::new("G1", si(0), si(3), 4.5f64);
        assert_eq!(good.id(), "G1");
        assert_eq!(good.origin(), si(0));
        assert_eq!(good.destination(), si(3));
        assert_eq!(good.weight(), 4.5);
        assert!(!good.has_waypoints());
        assert!(!good.is_trivial());
    }

    #[test]
    fn test_waypoints_and_trivial() {
        let good = Good::new("G2", si(1), si(1), 1.0f64).with_waypoints([si(2), si(0)]);
        assert!(good.is_trivial());
        assert!(good.has_waypoints());
        assert_eq!(good.waypoints(), &[si(2), si(0)]);
    }

    #[test]
    fn test_display() {
        let good = Good::new("G3", si(0), si(1), 2.0f64);
        assert_eq!(
            format!("{}", good),
            "Good(G3, StationIndex(0) -> StationIndex(1), weight: 2.000, waypoints: 0)"
        );
    }
}
