//! Conditional operations across whole buffers
//!
//! These apply [crate::select] element-wise. Every element of every
//! involved slice is touched on every call, so the memory access pattern
//! depends only on the (public) slice lengths, never on the condition or
//! the contents.

use core::hint::black_box;

use crate::mask::expand_mask;
use crate::select::select;
use crate::word::Word;

/// Copies one of two source slices into `to`, element by element.
///
/// Writes `to[i] = from0[i]` if `value` is nonzero and `to[i] = from1[i]`
/// otherwise. Both sources are read in full regardless of `value`; there
/// is no fast path for any length, since a shortcut taken on one side
/// only would hand the condition to a timing observer. Returns the mask
/// that was used, so callers can reuse it for related selections.
///
/// # Panics
/// If the three slices do not share one length. Lengths are public sizes
/// here, never secret contents, so the checks do not gate on secret data.
///
/// # Examples
///
/// ```
/// use flatline_constant_time::conditional_copy;
///
/// let a = [1u8, 2, 3];
/// let b = [7u8, 8, 9];
/// let mut out = [0u8; 3];
///
/// let mask = conditional_copy(1u8, &mut out, &a, &b);
/// assert_eq!(out, a);
/// assert_eq!(mask, u8::MAX);
///
/// conditional_copy(0u8, &mut out, &a, &b);
/// assert_eq!(out, b);
/// ```
#[inline]
pub fn conditional_copy<T: Word>(value: T, to: &mut [T], from0: &[T], from1: &[T]) -> T {
    assert!(black_box(to.len()) == black_box(from0.len()));
    assert!(black_box(to.len()) == black_box(from1.len()));

    let mask = expand_mask(value);
    for ((tv, s0), s1) in to.iter_mut().zip(from0.iter()).zip(from1.iter()) {
        *black_box(tv) = select(mask, black_box(*s0), black_box(*s1));
    }

    mask
}

/// Zeroes every element of `array` if `cond` is nonzero, else leaves it
/// unchanged. Writes to every index either way.
///
/// ```
/// use flatline_constant_time::cond_zero;
///
/// let mut buf = [0x41u8; 4];
/// cond_zero(0u8, &mut buf);
/// assert_eq!(buf, [0x41; 4]);
/// cond_zero(1u8, &mut buf);
/// assert_eq!(buf, [0; 4]);
/// ```
#[inline]
pub fn cond_zero<T: Word>(cond: T, array: &mut [T]) {
    let mask = expand_mask(cond);
    for av in array.iter_mut() {
        *black_box(av) = select(mask, T::ZERO, *av);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_selects_per_condition() {
        let a = [0x1111u16, 0x2222, 0x3333];
        let b = [0x9999u16, 0x8888, 0x7777];
        let mut out = [0u16; 3];

        // any nonzero value selects the first source
        assert_eq!(conditional_copy(0x4000u16, &mut out, &a, &b), u16::MAX);
        assert_eq!(out, a);

        assert_eq!(conditional_copy(0u16, &mut out, &a, &b), 0);
        assert_eq!(out, b);
    }

    #[test]
    fn copy_of_empty_slices() {
        let mut out: [u64; 0] = [];
        assert_eq!(conditional_copy(1u64, &mut out, &[], &[]), u64::MAX);
    }

    #[test]
    #[should_panic]
    fn copy_rejects_length_mismatch() {
        let mut out = [0u8; 2];
        conditional_copy(1u8, &mut out, &[1, 2, 3], &[4, 5]);
    }

    #[test]
    fn zeroing_per_condition() {
        let mut buf = [0xdeadbeefu32; 7];
        cond_zero(0u32, &mut buf);
        assert_eq!(buf, [0xdeadbeef; 7]);

        cond_zero(0x100u32, &mut buf);
        assert_eq!(buf, [0; 7]);
    }
}
