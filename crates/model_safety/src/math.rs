//! Checked arithmetic helpers - no unwrap, no panics, no as casts

/// Add u128, `None` on overflow
pub fn add_u128(a: u128, b: u128) -> Option<u128> {
    a.checked_add(b)
}

/// Subtract u128, `None` when `b > a`
pub fn sub_u128(a: u128, b: u128) -> Option<u128> {
    a.checked_sub(b)
}

/// Multiply u128 by a count, `None` on overflow
pub fn mul_count(a: u128, count: usize) -> Option<u128> {
    let count = u128::try_from(count).ok()?;
    a.checked_mul(count)
}

/// Sum with overflow detection
pub fn sum_u128<I: IntoIterator<Item = u128>>(values: I) -> Option<u128> {
    values.into_iter().try_fold(0u128, add_u128)
}
