#![warn(missing_docs)]
//! Zeroize-on-drop storage for secret byte strings.
//!
//! Flatline internal library providing [SecretBuf], an owning, contiguous
//! byte buffer whose backing memory is overwritten with zeros when it is
//! released. Constant-time operations that allocate (such as leading-zero
//! stripping) return their results in a [SecretBuf] so that no copy of the
//! secret survives in freed memory.
//!
//! # Examples
//!
//! ```rust
//! use flatline_secret_memory::SecretBuf;
//!
//! let key = SecretBuf::from_slice(b"\x01\x02\x03");
//! assert_eq!(key.secret(), b"\x01\x02\x03");
//!
//! // The Debug implementation never reveals the contents
//! assert_eq!(format!("{:?}", key), "<SECRET>");
//! ```

mod secret_buf;
pub use crate::secret_buf::SecretBuf;
