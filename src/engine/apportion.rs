use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::types::FaraidhError;

/// Splits `amount` in proportion to `weights`.
///
/// Every share but the last is `floor(amount * w / Σw)`; the last takes whatever is
/// left, so the shares always add up to `amount` exactly. The order of `weights` decides
/// who absorbs the truncation slack.
pub fn apportion(amount: &BigInt, weights: &[BigInt]) -> Result<Vec<BigInt>, FaraidhError> {
    if weights.is_empty() {
        return Ok(Vec::new());
    }
    if amount.is_negative() {
        return Err(FaraidhError::NegativeBase {
            operation: "apportion".to_string(),
            value: amount.to_string(),
        });
    }
    let total: BigInt = weights.iter().sum();
    if total.is_zero() {
        return Err(FaraidhError::DivisionByZero { operation: "apportion".to_string() });
    }

    let mut shares = Vec::with_capacity(weights.len());
    let mut assigned = BigInt::zero();
    let last = weights.len() - 1;
    for (i, w) in weights.iter().enumerate() {
        let share = if i == last {
            amount - &assigned
        } else {
            amount * w / &total
        };
        assigned += &share;
        shares.push(share);
    }
    Ok(shares)
}
