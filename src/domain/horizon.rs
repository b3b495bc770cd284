//! Time-horizon rescaling of the 10-year baseline.
//!
//! These are fixed linear proxies, not survival-model reprojections. Treat the
//! 5-year and lifetime values as approximations.

use super::risk::Horizon;

pub const FIVE_YEAR_FACTOR: f64 = 0.6;
pub const LIFETIME_FACTOR: f64 = 1.8;
pub const LIFETIME_CAP_PERCENT: f64 = 90.0;

/// Rescale a 10-year risk percentage to `horizon`. No rounding is applied.
#[must_use]
pub fn adjust_horizon(risk10: f64, horizon: Horizon) -> f64 {
    match horizon {
        Horizon::TenYear => risk10,
        Horizon::FiveYear => risk10 * FIVE_YEAR_FACTOR,
        Horizon::Lifetime => (risk10 * LIFETIME_FACTOR).min(LIFETIME_CAP_PERCENT),
    }
}
