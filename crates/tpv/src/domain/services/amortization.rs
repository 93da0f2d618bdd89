//! Amortization - Monthly payment for a financed sale
//!
//! The finance partner adds an admin fee of 1.49% of the price, capped at
//! $149, and amortizes price + fee over the term.

/// Admin fee rate applied to the sales price
pub const ADMIN_FEE_RATE: f64 = 0.0149;
/// Admin fee cap in currency units
pub const ADMIN_FEE_CAP: f64 = 149.0;

/// Admin fee for a price (tax included)
pub fn admin_fee(price: f64) -> f64 {
    (price * ADMIN_FEE_RATE).min(ADMIN_FEE_CAP)
}

/// Monthly payment rounded to cents.
///
/// `annual_rate_percent` is a nominal yearly rate such as `9.99`.
/// Returns `None` when the inputs cannot describe a loan (non-positive
/// price, negative rate, zero term, or non-finite values).
pub fn monthly_payment(price: f64, annual_rate_percent: f64, term_months: u32) -> Option<f64> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 || term_months == 0 {
        return None;
    }

    let total = price + admin_fee(price);
    let months = f64::from(term_months);

    let monthly = if annual_rate_percent == 0.0 {
        total / months
    } else {
        let monthly_rate = annual_rate_percent / 100.0 / 12.0;
        let growth = (1.0 + monthly_rate).powf(months);
        total * monthly_rate * growth / (growth - 1.0)
    };

    Some(round_cents(monthly))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
