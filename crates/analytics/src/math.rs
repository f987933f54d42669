//! Shared numeric helpers.
//!
//! Every zero-denominator policy in the engine goes through [`safe_ratio`],
//! so "undefined resolves to zero" is decided exactly once instead of being
//! reinvented at each call site. The one metric allowed to escape that
//! policy, profit factor, models its infinity explicitly in
//! [`crate::report::ProfitFactor`].

use rust_decimal::{Decimal, MathematicalOps};

/// Divides `numerator / denominator`, resolving a zero denominator (or a
/// Decimal overflow) to `0` instead of panicking.
pub fn safe_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Arithmetic mean; `0` for an empty slice.
pub fn mean(values: &[Decimal]) -> Decimal {
    safe_ratio(values.iter().sum(), Decimal::from(values.len()))
}

/// Population standard deviation (divide by `n`, not `n - 1`); `0` for an
/// empty or single-point slice with no spread.
pub fn population_std_dev(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let mean = mean(values);
    let variance = safe_ratio(
        values.iter().map(|v| (*v - mean) * (*v - mean)).sum(),
        Decimal::from(values.len()),
    );
    sqrt_or_zero(variance)
}

/// `Decimal::sqrt` with the degenerate cases folded to `0`.
pub fn sqrt_or_zero(value: Decimal) -> Decimal {
    if value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    value.sqrt().unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn safe_ratio_resolves_zero_denominator_to_zero() {
        assert_eq!(safe_ratio(dec!(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(safe_ratio(dec!(10), dec!(4)), dec!(2.5));
        assert_eq!(safe_ratio(dec!(-9), dec!(3)), dec!(-3));
    }

    #[test]
    fn population_std_dev_divides_by_n() {
        // Values 2, 4, 4, 4, 5, 5, 7, 9: the textbook population example.
        let values: Vec<Decimal> = [2, 4, 4, 4, 5, 5, 7, 9]
            .iter()
            .map(|v| Decimal::from(*v))
            .collect();
        let delta = (population_std_dev(&values) - dec!(2)).abs();
        assert!(delta < dec!(0.000001), "std dev off by {delta}");
    }

    #[test]
    fn flat_series_has_zero_std_dev() {
        let values = vec![dec!(3), dec!(3), dec!(3)];
        assert_eq!(population_std_dev(&values), Decimal::ZERO);
        assert_eq!(population_std_dev(&[]), Decimal::ZERO);
    }
}
