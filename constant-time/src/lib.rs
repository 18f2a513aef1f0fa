#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
//! Branch-free primitives for computing on secret data.
//!
//! Flatline internal library providing the constant-time substrate the
//! cipher and big-integer code builds on: mask algebra over unsigned
//! machine words, conditional selection and buffer operations driven by
//! those masks, taint instrumentation hooks for verifying the
//! constant-time property under an external memory checker, and a
//! leading-zero stripper for secret byte strings.
//!
//! Every operation runs in time proportional to the *size* of its inputs,
//! never their *values*: there is no data-dependent branch, no
//! data-dependent memory access, and no early exit anywhere on a secret
//! path.
//!
//! # Examples
//!
//! ```rust
//! use flatline_constant_time::{conditional_copy, is_equal, memcmp, select, strip_leading_zeros};
//!
//! // Branch-free selection driven by a mask
//! let mask = is_equal(0xaau8, 0xaau8);
//! assert_eq!(select(mask, 1, 2), 1);
//!
//! // Compare for equality without early exit
//! assert!(memcmp(&[1, 2, 3], &[1, 2, 3]));
//! assert!(!memcmp(&[1, 2, 3], &[1, 2, 4]));
//!
//! // Pick one of two buffers without revealing which
//! let mut out = [0u8; 3];
//! conditional_copy(1u8, &mut out, &[1, 2, 3], &[7, 8, 9]);
//! assert_eq!(out, [1, 2, 3]);
//!
//! // Strip leading zeros off a secret without revealing where they end
//! assert_eq!(strip_leading_zeros(&[0, 0, 7]).secret(), &[7]);
//! ```
//!
//! # Security Notes
//!
//! Some inputs are treated as public by design:
//!
//! - Slice lengths: execution time scales linearly with input size, and
//!   length mismatches are detected immediately
//! - Masks must only ever be fed back into the `select` family; branching
//!   on a mask in caller code defeats the construction
//!
//! Whether the arithmetic stays branch-free through compilation is
//! checked empirically: install a [TaintSink] backed by a memory checker,
//! poison the secret inputs, and the checker reports any secret that
//! reaches a branch or an address computation. See [poison] and the
//! `valgrind` cargo feature.

mod mask;
mod mem;
mod memcmp;
mod select;
mod strip;
mod taint;
mod word;

pub use crate::mask::{expand_mask, expand_top_bit, is_equal, is_less, is_lte, is_zero};
pub use crate::mem::{cond_zero, conditional_copy};
pub use crate::memcmp::{compare, memcmp};
pub use crate::select::{conditional_return, select, select2, select3, val_or_zero};
pub use crate::strip::strip_leading_zeros;
pub use crate::taint::{
    poison, set_taint_sink, try_set_taint_sink, unpoison, unpoison_value, TaintSink,
};
pub use crate::word::Word;

#[cfg(feature = "valgrind")]
pub use crate::taint::{taint_policy_use_valgrind, MemcheckSink};
