//! Small numeric helpers shared by the stages.

/// Decimal digits kept when a coordinate or rank is used as a bucket key.
pub const KEY_DIGITS: i32 = 8;

/// Quantizes a float to an integer bucket key (`KEY_DIGITS` decimal places).
///
/// Values produced by different arithmetic paths that agree to `KEY_DIGITS` digits land in the
/// same bucket. The key is 128 bits wide so epoch-scale values stay apart; only magnitudes past
/// about 1e30 saturate.
pub fn quantize(value: f64) -> i128 {
    (value * 10f64.powi(KEY_DIGITS)).round() as i128
}

/// Orders floats with `total_cmp`; used to sort by coordinates that are known to be finite.
pub(crate) fn cmp_f64(a: f64, b: f64) -> std::cmp::Ordering {
    a.total_cmp(&b)
}
