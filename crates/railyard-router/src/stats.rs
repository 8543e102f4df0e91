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

//! Counters collected while searching for routes.
//!
//! One `SearchStatistics` is threaded through every search of a scheduling
//! run. All updates saturate so the counters are safe to bump from the inner
//! relaxation loop.

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchStatistics {
    /// Number of route searches started.
    pub searches: u64,

    /// Number of labels pushed onto a frontier.
    pub labels_pushed: u64,

    /// Number of stations whose best label was settled.
    pub stations_finalized: u64,

    /// Number of lane candidates skipped because the lane was too full.
    pub capacity_rejections: u64,

    /// Number of lane candidates skipped because a needed picker was missing.
    pub picker_rejections: u64,
}

impl SearchStatistics {
    #[inline]
    pub fn on_search(&mut self) {
        self.searches = self.searches.saturating_add(1);
    }

    #[inline]
    pub fn on_label_pushed(&mut self) {
        self.labels_pushed = self.labels_pushed.saturating_add(1);
    }

    #[inline]
    pub fn on_station_finalized(&mut self) {
        self.stations_finalized = self.stations_finalized.saturating_add(1);
    }

    #[inline]
    pub fn on_capacity_rejection(&mut self) {
        self.capacity_rejections = self.capacity_rejections.saturating_add(1);
    }

    #[inline]
    pub fn on_picker_rejection(&mut self) {
        self.picker_rejections = self.picker_rejections.saturating_add(1);
    }

    /// Adds the counters of `other` into `self`.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.searches = self.searches.saturating_add(other.searches);
        self.labels_pushed = self.labels_pushed.saturating_add(other.labels_pushed);
        self.stations_finalized = self
            .stations_finalized
            .saturating_add(other.stations_finalized);
        self.capacity_rejections = self
            .capacity_rejections
            .saturating_add(other.capacity_rejections);
        self.picker_rejections = self.picker_rejections.saturating_add(other.picker_rejections);
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Route Search Statistics:")?;
        writeln!(f, "   Searches:             {}", self.searches)?;
        writeln!(f, "   Labels Pushed:        {}", self.labels_pushed)?;
        writeln!(f, "   Stations Finalized:   {}", self.stations_finalized)?;
        writeln!(f, "   Capacity Rejections:  {}", self.capacity_rejections)?;
        writeln!(f, "   Picker Rejections:    {}", self.picker_rejections)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_saturate() {
        let mut stats = SearchStatistics {
            labels_pushed: u64::MAX,
            ..Default::default()
        };
        stats.on_label_pushed();
        stats.on_search();
        assert_eq!(stats.labels_pushed, u64::MAX);
        assert_eq!(stats.searches, 1);
    }

    #[test]
    fn test_merge_adds_all_counters() {
        let mut total = SearchStatistics::default();
        let mut run = SearchStatistics::default();
        run.on_search();
        run.on_station_finalized();
        run.on_capacity_rejection();
        run.on_picker_rejection();
        run.on_picker_rejection();

        total.merge(&run);
        total.merge(&run);
        assert_eq!(total.searches, 2);
        assert_eq!(total.stations_finalized, 2);
        assert_eq!(total.capacity_rejections, 2);
        assert_eq!(total.picker_rejections, 4);
        assert!(total.to_string().contains("Picker Rejections:    4"));
    }
}
