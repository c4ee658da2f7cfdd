//! Annualized cost helpers shared by every technology scenario.

use crate::{HcError, HcResult, Real};

/// Equivalent periodic cost of an investment.
///
/// `wacc` is a fraction (0.05 for 5 %). A zero rate spreads the capex evenly
/// over the lifetime.
pub fn annuity(capex: Real, lifetime: Real, wacc: Real) -> HcResult<Real> {
    if !(lifetime >= 1.0) {
        return Err(HcError::invalid(format!(
            "annuity lifetime must be at least one year, got {lifetime}"
        )));
    }
    if !(wacc >= 0.0) {
        return Err(HcError::invalid(format!(
            "annuity wacc must be non-negative, got {wacc}"
        )));
    }
    if wacc == 0.0 {
        return Ok(capex / lifetime);
    }
    let growth = (1.0 + wacc).powf(lifetime);
    Ok(capex * (wacc * growth) / (growth - 1.0))
}

/// Mean yearly price over the lifetime when the price rises by
/// `rate_percent` every year, starting at `price` in year zero.
pub fn average_cost_per_year(price: Real, lifetime: Real, rate_percent: Real) -> HcResult<Real> {
    let years = lifetime.floor();
    if !(years >= 1.0) {
        return Err(HcError::invalid(format!(
            "price escalation lifetime must be at least one year, got {lifetime}"
        )));
    }
    let factor = 1.0 + rate_percent / 100.0;
    let total: Real = (0..years as u32).map(|y| price * factor.powi(y as i32)).sum();
    Ok(total / years)
}
