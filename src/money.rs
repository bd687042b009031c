//! Integer money arithmetic in minor currency units
//!
//! All monetary amounts are `i64` cents and all rates are fixed-point basis
//! points. Accumulation across months stays in integers; floats appear only
//! when normalizing a rate, and every monthly amount is rounded back to
//! cents before it enters the running state.

/// Monetary amount in minor currency units (cents)
pub type Cents = i64;

/// Fixed-point rate or percentage in basis points (1% = 100 bps)
pub type Bps = i64;

/// Scale factor between basis points and a plain fraction
pub const BPS_SCALE: i64 = 10_000;

/// Integer division rounded half away from zero.
///
/// The denominator must be positive.
pub fn round_div(numerator: i64, denominator: i64) -> i64 {
    round_div_i128(numerator as i128, denominator as i128)
}

/// Apply a basis-point rate to an amount, rounding half away from zero.
///
/// `apply_bps(50_000, 150)` is 1.5% of 500.00, i.e. 750 cents.
pub fn apply_bps(amount: Cents, bps: Bps) -> Cents {
    round_div_i128(amount as i128 * bps as i128, BPS_SCALE as i128)
}

/// Scale an amount by a multiplier expressed in basis points
/// (10_000 = unchanged, 11_000 = +10%).
pub fn scale_by_bps(amount: i64, multiplier_bps: Bps) -> i64 {
    round_div_i128(amount as i128 * multiplier_bps as i128, BPS_SCALE as i128)
}

/// Convert a basis-point rate to a plain fraction for rate normalization
pub fn bps_to_fraction(bps: Bps) -> f64 {
    bps as f64 / BPS_SCALE as f64
}

/// Round a transient floating amount back to integer cents
pub fn round_to_cents(amount: f64) -> Cents {
    amount.round() as Cents
}

fn round_div_i128(numerator: i128, denominator: i128) -> i64 {
    debug_assert!(denominator > 0);
    let half = denominator / 2;
    let q = if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        (numerator - half) / denominator
    };
    // Saturate instead of wrapping when a grown amount escapes the i64 range
    q.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_div_half_away_from_zero() {
        assert_eq!(round_div(5, 2), 3);
        assert_eq!(round_div(-5, 2), -3);
        assert_eq!(round_div(4, 2), 2);
        assert_eq!(round_div(7, 3), 2);
        assert_eq!(round_div(8, 3), 3);
        assert_eq!(round_div(0, 7), 0);
    }

    #[test]
    fn test_apply_bps() {
        // 1.5% of R$500.00
        assert_eq!(apply_bps(50_000, 150), 750);
        // 100% and 0%
        assert_eq!(apply_bps(12_345, 10_000), 12_345);
        assert_eq!(apply_bps(12_345, 0), 0);
        // Rounding: 0.01% of 499 cents = 0.0499 -> 0
        assert_eq!(apply_bps(499, 1), 0);
        assert_eq!(apply_bps(5_001, 1), 1);
    }

    #[test]
    fn test_scale_by_bps() {
        assert_eq!(scale_by_bps(1_000, 11_000), 1_100);
        assert_eq!(scale_by_bps(1_000, 9_000), 900);
        assert_eq!(scale_by_bps(333, 10_000), 333);
    }

    #[test]
    fn test_out_of_range_results_saturate() {
        assert_eq!(scale_by_bps(i64::MAX, 20_000), i64::MAX);
        assert_eq!(scale_by_bps(i64::MIN, 20_000), i64::MIN);
    }

    #[test]
    fn test_no_overflow_on_large_amounts() {
        // R$10 billion at 18% stays inside i64 thanks to i128 intermediates
        let principal: Cents = 1_000_000_000_000;
        assert_eq!(apply_bps(principal, 1_800), 180_000_000_000);
    }
}
