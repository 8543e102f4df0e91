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

//! # Weight Numeric Bound
//!
//! Good weights ("quality") and lane capacities are fractional: instances
//! specify them as decimals and reports print them with three decimal
//! places. `Weight` collects the bounds the model, router and scheduler need
//! into a single alias so generic signatures stay short, in the same way
//! integer solver code bundles `PrimInt + Signed + ...` behind one trait.
//!
//! In practice this is `f64` (and `f32` in tests that want to exercise the
//! generic path).

use num_traits::Float;
use std::str::FromStr;

/// A trait alias for the numeric type used for capacities and weights.
pub trait Weight:
    Float + FromStr + std::fmt::Debug + std::fmt::Display + Default + Send + Sync + 'static
{
    /// Returns `true` if the value is finite and not negative, i.e. a
    /// meaningful weight or capacity.
    #[inline]
    fn is_admissible(self) -> bool {
        self.is_finite() && self >= Self::zero()
    }

    /// Returns `true` if `load + weight` stays within `capacity`.
    #[inline]
    fn fits(load: Self, weight: Self, capacity: Self) -> bool {
        load + weight <= capacity
    }
}

impl<T> Weight for T where
    T: Float + FromStr + std::fmt::Debug + std::fmt::Display + Default + Send + Sync + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admissible_values() {
        assert!(0.0f64.is_admissible());
        assert!(12.5f64.is_admissible());
        assert!(!(-0.5f64).is_admissible());
        assert!(!f64::NAN.is_admissible());
        assert!(!f64::INFINITY.is_admissible());
    }

    #[test]
    fn test_fits_is_inclusive_at_capacity() {
        assert!(f64::fits(6.0, 4.0, 10.0));
        assert!(!f64::fits(6.5, 4.0, 10.0));
        assert!(f32::fits(0.0, 0.0, 0.0));
    }
}
