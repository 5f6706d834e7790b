//! Single-flight re-authentication gate.
//!
//! When a burst of concurrently in-flight requests all come back classified
//! as unauthorized, only the first may open the "session expired" prompt; the
//! rest are rejected immediately. The gate is released whether the user
//! confirms or dismisses, and only after release can a later unauthorized
//! response open it again.

use std::sync::atomic::{AtomicBool, Ordering};

/// Guard ensuring at most one re-authentication prompt at a time.
///
/// `try_enter` hands out at most one [`ReauthPermit`]; the gate reopens when
/// the permit is dropped, so every exit path of the prompt flow (confirm,
/// cancel, panic) releases it.
#[derive(Debug, Default)]
pub struct ReauthGate {
    open: AtomicBool,
}

impl ReauthGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to take ownership of the gate. `None` means a prompt is
    /// already showing and the caller must reject without a second one.
    pub fn try_enter(&self) -> Option<ReauthPermit<'_>> {
        if self
            .open
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            Some(ReauthPermit { gate: self })
        } else {
            None
        }
    }

    /// True while a prompt is showing.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

/// Ownership of the gate; dropping it releases the gate.
#[derive(Debug)]
pub struct ReauthPermit<'a> {
    gate: &'a ReauthGate,
}

impl Drop for ReauthPermit<'_> {
    fn drop(&mut self) {
        self.gate.open.store(false, Ordering::SeqCst);
    }
}
