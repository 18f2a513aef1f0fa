//! Removing leading zero bytes from secrets

use core::hint::black_box;

use flatline_secret_memory::SecretBuf;

use crate::mask::is_zero;
use crate::select::select;

/// Strips the leading zero bytes off a secret byte string.
///
/// Returns a newly allocated [SecretBuf] holding `bytes` with its leading
/// run of zero bytes removed; an all-zero input yields an empty buffer.
///
/// The scan has no early exit. An accumulator mask starts all-1 and is
/// ANDed with `is_zero` of every byte in order, so it drops to all-0 at
/// the first nonzero byte and stays there for the rest of the pass, while
/// the count of leading zeros grows by a selected 0 or 1 per iteration.
/// Every byte is visited, so the running time depends on the length of
/// the input and not on where the zero run ends.
///
/// # Examples
///
/// ```
/// use flatline_constant_time::strip_leading_zeros;
///
/// assert_eq!(strip_leading_zeros(&[0x00, 0x00, 0x01, 0x02]).secret(), &[0x01, 0x02]);
/// assert_eq!(strip_leading_zeros(&[0x05]).secret(), &[0x05]);
/// assert!(strip_leading_zeros(&[0x00, 0x00, 0x00]).is_empty());
/// ```
pub fn strip_leading_zeros(bytes: &[u8]) -> SecretBuf {
    let mut leading_zeros = 0usize;
    let mut only_zeros = 0xffu8;

    for bv in bytes.iter() {
        only_zeros &= is_zero(black_box(*bv));
        leading_zeros += select(only_zeros, 1, 0) as usize;
    }

    SecretBuf::from_slice(&bytes[leading_zeros..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn strips_nothing_without_leading_zeros() {
        let buf = strip_leading_zeros(b"\x05\x00\x06");
        assert_eq!(buf.secret(), b"\x05\x00\x06");
    }

    #[test]
    fn interior_zeros_survive() {
        let buf = strip_leading_zeros(b"\x00\x01\x00\x02\x00");
        assert_eq!(buf.secret(), b"\x01\x00\x02\x00");
    }

    #[test]
    fn all_zeros_become_empty() {
        assert!(strip_leading_zeros(&[0u8; 17]).is_empty());
        assert!(strip_leading_zeros(&[]).is_empty());
    }

    #[test]
    fn agrees_with_a_plain_scan() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let len = rng.gen_range(0..32);
            let v: Vec<u8> = (0..len)
                .map(|_| if rng.gen_bool(0.5) { 0 } else { rng.gen() })
                .collect();

            let boundary = v.iter().position(|bv| *bv != 0).unwrap_or(v.len());
            assert_eq!(strip_leading_zeros(&v).secret(), &v[boundary..], "v = {v:?}");
        }
    }
}
