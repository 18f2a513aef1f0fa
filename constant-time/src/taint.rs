//! Taint instrumentation hooks
//!
//! A memory-taint checker (valgrind's memcheck being the canonical one)
//! tracks a shadow "defined"/"undefined" state per byte and reports any
//! undefined value that reaches a conditional jump or a load/store
//! address. Marking all secret inputs as undefined therefore turns the
//! checker into an empirical constant-time verifier: if the arithmetic in
//! this crate, or in consumer code built on it, ever branches or indexes
//! on a secret, the instrumented run fails.
//!
//! The checker is an external tool, so the hooks are modeled as an
//! injected capability: a [TaintSink] installed once per process, with a
//! do-nothing default when no checker is in use. Whether a sink is
//! installed changes no function's return value anywhere in this crate,
//! only whether the external shadow bookkeeping happens.

use std::sync::OnceLock;

/// Receiver for taint transitions.
///
/// Implementations forward the transitions to a memory checker's shadow
/// state. They must treat the region as opaque: reading the pointed-to
/// bytes, or branching on them, would defeat the instrumentation.
pub trait TaintSink: Sync {
    /// Marks `len` bytes starting at `addr` as undefined ("poisoned")
    fn poison(&self, addr: *const u8, len: usize);

    /// Marks `len` bytes starting at `addr` as defined again
    fn unpoison(&self, addr: *const u8, len: usize);
}

/// Globally configures the [TaintSink] that transitions are forwarded to
static SINK: OnceLock<&'static dyn TaintSink> = OnceLock::new();

/// Installs the process-wide [TaintSink].
///
/// Intended to be called once at startup, before any operation on secret
/// data takes place.
///
/// # Panics
/// If a sink is already installed.
pub fn set_taint_sink(sink: &'static dyn TaintSink) {
    if try_set_taint_sink(sink).is_err() {
        panic!("taint sink already installed");
    }
}

/// Installs the process-wide [TaintSink], handing the sink back if one is
/// installed already.
pub fn try_set_taint_sink(
    sink: &'static dyn TaintSink,
) -> Result<(), &'static dyn TaintSink> {
    SINK.set(sink)?;
    log::info!("Taint transitions will be forwarded to an external memory checker");
    Ok(())
}

/// Marks every byte of `region` as undefined in the installed checker.
///
/// A complete no-op when no sink is installed. In either case the actual
/// contents of `region` are left untouched; only the checker's shadow
/// state changes.
#[inline]
pub fn poison<T>(region: &[T]) {
    if let Some(sink) = SINK.get() {
        sink.poison(region.as_ptr() as *const u8, core::mem::size_of_val(region));
    }
}

/// Marks every byte of `region` as defined in the installed checker.
///
/// Call this before any code path that is permitted to branch on the
/// data, e.g. for values that are genuinely public.
#[inline]
pub fn unpoison<T>(region: &[T]) {
    if let Some(sink) = SINK.get() {
        sink.unpoison(region.as_ptr() as *const u8, core::mem::size_of_val(region));
    }
}

/// Marks the storage of a single value as defined.
///
/// Used at the point where a selected result is deliberately revealed to
/// ordinary control flow, see [crate::conditional_return].
#[inline]
pub fn unpoison_value<T>(value: &T) {
    if let Some(sink) = SINK.get() {
        sink.unpoison(value as *const T as *const u8, core::mem::size_of::<T>());
    }
}

#[cfg(feature = "valgrind")]
mod memcheck {
    use super::{set_taint_sink, TaintSink};

    /// Forwards taint transitions to valgrind's memcheck client requests.
    ///
    /// The client-request machinery costs a few cycles when the process is
    /// not running under valgrind, so this sink is safe (if pointless) to
    /// install in a plain run of an instrumented binary.
    pub struct MemcheckSink;

    impl TaintSink for MemcheckSink {
        fn poison(&self, addr: *const u8, len: usize) {
            let _ = crabgrind::memcheck::mark_mem(
                addr as _,
                len,
                crabgrind::memcheck::MemState::Undefined,
            );
        }

        fn unpoison(&self, addr: *const u8, len: usize) {
            let _ = crabgrind::memcheck::mark_mem(
                addr as _,
                len,
                crabgrind::memcheck::MemState::Defined,
            );
        }
    }

    /// Installs [MemcheckSink] as the process-wide taint sink.
    ///
    /// # Panics
    /// If a sink is already installed.
    pub fn taint_policy_use_valgrind() {
        static MEMCHECK: MemcheckSink = MemcheckSink;
        set_taint_sink(&MEMCHECK);
    }
}

#[cfg(feature = "valgrind")]
pub use memcheck::{taint_policy_use_valgrind, MemcheckSink};
