//! Signal-driven mode switching.
//!
//! The shell ignores SIGINT for itself, so an interactive interrupt only
//! ever reaches a foreground child. SIGTSTP toggles foreground-only
//! mode: while active, `&` is parsed but has no effect. The handler runs
//! at arbitrary interruption points, so the mode lives in a single
//! atomic flag and the transition messages are written with raw
//! `write(2)` rather than any buffered output.

use std::sync::atomic::{AtomicBool, Ordering};

use failure::ResultExt;
use nix::libc;
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::errors::{ErrorKind, Result};

static FOREGROUND_ONLY: AtomicBool = AtomicBool::new(false);

const ENTER_MESSAGE: &[u8] = b"\nEntering foreground-only mode (& is now ignored)\n";
const EXIT_MESSAGE: &[u8] = b"\nExiting foreground-only mode\n";

/// Installs the shell's signal dispositions: SIGINT is ignored and
/// SIGTSTP toggles foreground-only mode. `SA_RESTART` keeps an
/// in-progress line read going across a toggle.
pub fn install() -> Result<()> {
    unsafe {
        signal::signal(Signal::SIGINT, SigHandler::SigIgn).context(ErrorKind::Nix)?;

        let action = SigAction::new(
            SigHandler::Handler(handle_sigtstp),
            SaFlags::SA_RESTART,
            SigSet::empty(),
        );
        signal::sigaction(Signal::SIGTSTP, &action).context(ErrorKind::Nix)?;
    }

    Ok(())
}

/// Returns `true` while foreground-only mode is active. Read by the
/// parser when deciding whether `&` takes effect.
pub fn foreground_only() -> bool {
    FOREGROUND_ONLY.load(Ordering::SeqCst)
}

extern "C" fn handle_sigtstp(_signal: libc::c_int) {
    let was_active = FOREGROUND_ONLY.fetch_xor(true, Ordering::SeqCst);
    let message = if was_active { EXIT_MESSAGE } else { ENTER_MESSAGE };
    // Async-signal-safe: a single write(2), no allocation, no locks.
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            message.as_ptr() as *const libc::c_void,
            message.len(),
        );
    }
}
