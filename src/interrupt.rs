//! Turns Ctrl-C into a stop flag so the headless reader can close the port
//! and exit cleanly instead of being killed mid-read.

use log::warn;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn on_sigint(_: libc::c_int) {
    // Only async-signal-safe work in here.
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Installs a SIGINT handler and returns the flag it raises.
///
/// If the handler can't be installed, Ctrl-C keeps its default behaviour and
/// the returned flag simply never gets raised.
pub fn stop_on_interrupt() -> &'static AtomicBool {
    #[cfg(unix)]
    {
        let handler = on_sigint as extern "C" fn(libc::c_int);
        // SAFETY: the handler only stores to an atomic.
        let previous = unsafe { libc::signal(libc::SIGINT, handler as libc::sighandler_t) };
        if previous == libc::SIG_ERR {
            warn!(
                "Failed to install interrupt handler: {}",
                std::io::Error::last_os_error()
            );
        }
    }
    #[cfg(not(unix))]
    warn!("Interrupt handling is not supported on this platform");

    &INTERRUPTED
}
