//! Variable-length secret storage

use std::fmt;

use rand::{Fill as Randomize, Rng};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Owning byte buffer for secret data.
///
/// The backing memory is overwritten with zeros when the buffer is dropped.
/// Unlike a plain `Vec<u8>`, a [SecretBuf] never changes its length after
/// construction; zeroization clears the contents but keeps the allocation
/// addressable, so instrumented memory stays mapped for the lifetime of the
/// value.
///
/// There is deliberately no `PartialEq` implementation; comparing secrets
/// byte-by-byte through the standard traits would not be constant-time.
pub struct SecretBuf {
    storage: Vec<u8>,
}

impl SecretBuf {
    /// Returns a new [SecretBuf] of `len` zero bytes
    pub fn zero(len: usize) -> Self {
        Self {
            storage: vec![0u8; len],
        }
    }

    /// Creates a new [SecretBuf] holding a copy of `slice`
    pub fn from_slice(slice: &[u8]) -> Self {
        let mut new_self = Self::zero(slice.len());
        new_self.secret_mut().copy_from_slice(slice);
        new_self
    }

    /// Returns a new [SecretBuf] of `len` random bytes
    pub fn random(len: usize) -> Self {
        let mut new_self = Self::zero(len);
        new_self.randomize();
        new_self
    }

    /// Overwrites the contents with random bytes
    pub fn randomize(&mut self) {
        self.try_fill(&mut rand::thread_rng()).unwrap()
    }

    /// Borrows the data
    pub fn secret(&self) -> &[u8] {
        &self.storage
    }

    /// Borrows the data mutably
    pub fn secret_mut(&mut self) -> &mut [u8] {
        &mut self.storage
    }

    /// Length of the buffer in bytes
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the buffer holds zero bytes of data
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Randomize for SecretBuf {
    fn try_fill<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), rand::Error> {
        // Zeroize first so the barriers from the zeroize crate take effect
        // and the compiler cannot elide the erasure of the previous value.
        self.zeroize();
        self.storage.as_mut_slice().try_fill(rng)
    }
}

impl ZeroizeOnDrop for SecretBuf {}
impl Zeroize for SecretBuf {
    fn zeroize(&mut self) {
        // Zeroize the slice rather than the Vec; Vec::zeroize would also
        // truncate, and the length must stay stable.
        self.storage.as_mut_slice().zeroize()
    }
}

impl Drop for SecretBuf {
    fn drop(&mut self) {
        self.zeroize()
    }
}

impl Clone for SecretBuf {
    fn clone(&self) -> Self {
        Self::from_slice(self.secret())
    }
}

/// The Debug implementation of [SecretBuf] does not reveal the secret data,
/// instead a placeholder `<SECRET>` is used
impl fmt::Debug for SecretBuf {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str("<SECRET>")
    }
}
