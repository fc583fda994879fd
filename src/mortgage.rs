use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::MortgageError;

/// MortgageInput
///
/// The four calculator fields. Amounts are in currency units, the rate is the
/// annual percentage (e.g. `6.5`), the term is in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MortgageInput {
    pub home_value: f64,
    pub down_payment: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
}

/// monthly_payment
///
/// Fixed-rate amortisation: `P * r(1+r)^n / ((1+r)^n - 1)` with `r` the
/// monthly rate and `n` the number of monthly payments. A zero rate degenerates
/// to `P / n`; a rate so high that `(1+r)^n` overflows leaves only the interest
/// `P * r`.
///
/// The growth term is computed as `expm1(n * ln_1p(r))` so that tiny rates do
/// not round `(1+r)^n` down to exactly `1`.
pub fn monthly_payment(input: &MortgageInput) -> Result<f64, MortgageError> {
    if input.term_years == 0 {
        return Err(MortgageError::InvalidTerm);
    }
    let values = [input.home_value, input.down_payment, input.annual_rate_percent];
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(MortgageError::NegativeInput);
    }
    if input.down_payment > input.home_value {
        return Err(MortgageError::DownPaymentTooLarge);
    }

    let principal = input.home_value - input.down_payment;
    let payments = f64::from(input.term_years) * 12.0;
    let rate = input.annual_rate_percent / 100.0 / 12.0;

    // (1+r)^n - 1
    let accrued = (payments * rate.ln_1p()).exp_m1();

    let payment = if rate == 0.0 || accrued == 0.0 {
        principal / payments
    } else if accrued.is_infinite() {
        principal * rate
    } else {
        principal * rate * ((accrued + 1.0) / accrued)
    };

    if !payment.is_finite() {
        return Err(MortgageError::OutOfRange);
    }
    Ok(payment)
}
