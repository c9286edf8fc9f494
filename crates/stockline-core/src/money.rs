//! # Money Fold Helpers
//!
//! Small numeric folds shared by the report aggregator.
//!
//! ## Why Float Money Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CURRENCY REPRESENTATION                                                │
//! │                                                                         │
//! │  The remote API reports every monetary amount as a JSON number          │
//! │  (IEEE-754 double). Derived aggregates shown next to server-reported    │
//! │  totals must reproduce the server's arithmetic exactly, so this crate   │
//! │  keeps f64 end to end and performs NO rounding.                         │
//! │                                                                         │
//! │  Rounding to 2 decimals is a presentation concern and happens in the    │
//! │  TypeScript layer, never here.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Folds
// =============================================================================

/// Sums a stream of currency amounts. Empty input sums to 0.0.
#[inline]
pub fn sum_amounts<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    amounts.into_iter().sum()
}

/// Sums an extracted amount over a collection.
///
/// ## Example
/// ```rust
/// use stockline_core::money::sum_by;
///
/// let pairs = [("a", 1.5), ("b", 2.5)];
/// assert_eq!(sum_by(&pairs, |p| p.1), 4.0);
/// ```
#[inline]
pub fn sum_by<T, F>(items: &[T], amount: F) -> f64
where
    F: Fn(&T) -> f64,
{
    items.iter().map(amount).sum()
}

/// Line total for a unit price and quantity.
#[inline]
pub fn line_total(unit_price: f64, quantity: f64) -> f64 {
    unit_price * quantity
}

/// Clamps a value to zero from below. Used for display quantities that must
/// not render negative even when source stock data is.
#[inline]
pub fn clamp_non_negative(value: f64) -> f64 {
    if value < 0.0 {
        0.0
    } else {
        value
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_amounts() {
        assert_eq!(sum_amounts([10.0, 20.0, 7.5]), 37.5);
        assert_eq!(sum_amounts(std::iter::empty::<f64>()), 0.0);
    }

    #[test]
    fn test_sum_by() {
        struct Line {
            amount: f64,
        }
        let lines = [Line { amount: 3.0 }, Line { amount: 4.5 }];
        assert_eq!(sum_by(&lines, |l| l.amount), 7.5);
        assert_eq!(sum_by::<Line, _>(&[], |l| l.amount), 0.0);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(2.5, 4.0), 10.0);
        assert_eq!(line_total(2.5, 0.0), 0.0);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(clamp_non_negative(-3.0), 0.0);
        assert_eq!(clamp_non_negative(0.0), 0.0);
        assert_eq!(clamp_non_negative(12.5), 12.5);
    }
}
