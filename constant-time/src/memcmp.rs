//! Comparing byte strings without data-dependent time

use core::hint::black_box;

use crate::mask::is_less;
use crate::select::{conditional_return, select2};
use crate::taint::unpoison_value;

/// Compares two slices of memory content and returns whether they are
/// equal.
///
/// ## Leaks
/// If the two slices have different lengths, the function returns
/// immediately; slice lengths are treated as public. The execution time
/// grows linearly with the input length. Neither is considered a leak of
/// the contents.
///
/// The per-byte differences are folded into a single accumulator and only
/// the accumulated verdict is revealed, so the position of a mismatch
/// never influences control flow.
///
/// # Examples
///
/// ```
/// use flatline_constant_time::memcmp;
///
/// let a = [0, 0, 0, 0];
/// let b = [0, 0, 0, 1];
/// let c = [0, 0, 0];
/// assert!(memcmp(&a, &a));
/// assert!(!memcmp(&a, &b));
/// assert!(!memcmp(&a, &c));
/// ```
#[inline]
pub fn memcmp(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (av, bv) in a.iter().zip(b.iter()) {
        diff |= black_box(*av) ^ black_box(*bv);
    }

    conditional_return(diff, 1u8, 0u8) == 0
}

/// Compares two equal-length slices holding little-endian unsigned
/// integers and returns an integer indicating their relationship.
///
/// ## Returns
///
/// - -1 if a < b
/// - 0 if a = b
/// - 1 if a > b
///
/// The most significant differing byte decides the result, but the scan
/// still visits every byte of both inputs; the decision is carried in a
/// pair of masks that freeze once a difference has been seen.
///
/// # Panics
/// If the two slices have different lengths. Lengths are public.
///
/// # Examples
///
/// ```
/// use flatline_constant_time::compare;
///
/// assert_eq!(compare(&[], &[]), 0);
///
/// assert_eq!(compare(&[0], &[1]), -1);
/// assert_eq!(compare(&[0], &[0]), 0);
/// assert_eq!(compare(&[1], &[0]), 1);
///
/// assert_eq!(compare(&[0, 0], &[1, 0]), -1);
/// assert_eq!(compare(&[1, 0], &[0, 1]), -1);
/// assert_eq!(compare(&[0, 1], &[0, 0]), 1);
/// ```
#[inline]
pub fn compare(a: &[u8], b: &[u8]) -> i32 {
    assert!(black_box(a.len()) == black_box(b.len()));

    let mut gt = 0u8;
    let mut lt = 0u8;
    for (av, bv) in a.iter().rev().zip(b.iter().rev()) {
        let x = black_box(*av);
        let y = black_box(*bv);
        let undecided = !(gt | lt);
        gt |= undecided & is_less(y, x);
        lt |= undecided & is_less(x, y);
    }

    let verdict = select2(gt, 1u8, lt, 0xff, 0);
    unpoison_value(&verdict);
    verdict as i8 as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use rand::Rng;

    #[test]
    fn equality_on_fixtures() {
        let tag = hex!("69c767d4f99b09324a8a23fda32cb27e");
        let mut forged = tag;
        forged[15] ^= 0x01;

        assert!(memcmp(&tag, &tag));
        assert!(!memcmp(&tag, &forged));
        assert!(!memcmp(&tag, &tag[..15]));
        assert!(memcmp(&[], &[]));
    }

    #[test]
    fn equality_agrees_with_operator_eq() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let len = rng.gen_range(0..48);
            let a: Vec<u8> = (0..len).map(|_| rng.gen_range(0..4)).collect();
            let b: Vec<u8> = (0..len).map(|_| rng.gen_range(0..4)).collect();
            assert_eq!(memcmp(&a, &b), a == b);
        }
    }

    #[test]
    fn ordering_agrees_with_the_numeric_interpretation() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let len = rng.gen_range(0..9);
            let a: Vec<u8> = (0..len).map(|_| rng.gen_range(0..3)).collect();
            let b: Vec<u8> = (0..len).map(|_| rng.gen_range(0..3)).collect();

            // reference: compare as little-endian integers via the
            // reversed lexicographic order
            let expected = match a.iter().rev().cmp(b.iter().rev()) {
                std::cmp::Ordering::Less => -1,
                std::cmp::Ordering::Equal => 0,
                std::cmp::Ordering::Greater => 1,
            };
            assert_eq!(compare(&a, &b), expected, "a = {a:?}, b = {b:?}");
        }
    }

    #[test]
    fn ordering_decided_by_most_significant_difference() {
        assert_eq!(compare(&hex!("ff00"), &hex!("0001")), -1);
        assert_eq!(compare(&hex!("0001"), &hex!("ff00")), 1);
        assert_eq!(compare(&hex!("ffff"), &hex!("ffff")), 0);
    }

    #[test]
    #[should_panic]
    fn ordering_rejects_length_mismatch() {
        compare(&[1, 2], &[1]);
    }
}
