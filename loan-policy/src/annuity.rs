//! Level-payment (원리금균등) amortization helpers
//!
//! All rates are annual percentages; the monthly rate is `rate / 100 / 12`.
//! A zero or negative rate degrades to straight-line repayment, and a
//! zero-month term is treated as a single month.
//!
//! Both directions are written in terms of the discount factor `(1+r)^−n`
//! so nothing is ever multiplied by the (possibly huge) growth factor. When
//! `(1+r)^n` no longer fits in a `Decimal` the discount is taken as zero,
//! which is the perpetuity limit: principal `A/r`, installment `P·r`.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Monthly rate as a fraction
pub fn monthly_rate(annual_rate_pct: Decimal) -> Decimal {
    annual_rate_pct / PERCENT / MONTHS_PER_YEAR
}

/// Annuity weight `1 − (1+r)^−n`, or `None` when the rate is too small to amortize
fn annuity_weight(r: Decimal, months: u32) -> Option<Decimal> {
    if r <= Decimal::ZERO {
        return None;
    }

    let discount = (Decimal::ONE + r)
        .checked_powi(i64::from(months))
        .and_then(|factor| Decimal::ONE.checked_div(factor))
        .unwrap_or(Decimal::ZERO);

    let weight = Decimal::ONE - discount;
    (weight > Decimal::ZERO).then_some(weight)
}

/// Monthly installment that repays `principal` over `months`
///
/// `P·r / (1 − (1+r)^−n)`, or `P / n` when `r = 0`.
pub fn monthly_payment(principal: Decimal, annual_rate_pct: Decimal, months: u32) -> Decimal {
    let n = months.max(1);
    if principal <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let r = monthly_rate(annual_rate_pct);
    annuity_weight(r, n)
        .and_then(|weight| principal.checked_mul(r)?.checked_div(weight))
        .unwrap_or_else(|| principal / Decimal::from(n))
}

/// Principal that a given monthly installment repays over `months`
///
/// Inverse of [`monthly_payment`]: `A·(1 − (1+r)^−n) / r`, or `A · n` when
/// `r = 0`. Never exceeds `A · n`.
pub fn principal_from_payment(payment: Decimal, annual_rate_pct: Decimal, months: u32) -> Decimal {
    let n = months.max(1);
    if payment <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let straight_line = payment
        .checked_mul(Decimal::from(n))
        .unwrap_or(Decimal::MAX);

    let r = monthly_rate(annual_rate_pct);
    annuity_weight(r, n)
        .and_then(|weight| payment.checked_mul(weight)?.checked_div(r))
        .map_or(straight_line, |principal| principal.min(straight_line))
}

/// Sum of all installments over the term
pub fn total_repayment(principal: Decimal, annual_rate_pct: Decimal, months: u32) -> Decimal {
    monthly_payment(principal, annual_rate_pct, months) * Decimal::from(months.max(1))
}

/// Total interest paid over the term
pub fn total_interest(principal: Decimal, annual_rate_pct: Decimal, months: u32) -> Decimal {
    (total_repayment(principal, annual_rate_pct, months) - principal).max(Decimal::ZERO)
}
