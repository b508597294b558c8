//! Constant-time comparison of secret byte strings.

use subtle::ConstantTimeEq;

/// Returns `true` if `a` and `b` have the same length and content.
///
/// Every byte position up to the longer input's length is visited, with the
/// shorter input padded by zeros, and the per-byte results are folded with
/// `subtle::Choice`. Running time therefore depends only on
/// `max(a.len(), b.len())`, never on where or how often the inputs differ.
/// Two empty slices are equal.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut equal = a.len().ct_eq(&b.len());

    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        equal &= x.ct_eq(&y);
    }

    equal.into()
}
