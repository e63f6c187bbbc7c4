//! Ctrl+C handling for repeat mode.
//!
//! A run is never cancelled halfway: the shutdown flag is only consulted
//! between runs and while sleeping until the next one. Pressing Ctrl+C
//! during a run lets that run finish, then the loop stops and the process
//! exits with code 130.
//!
//! ```rust,no_run
//! use filemop::signal::install_handler;
//! use std::time::Duration;
//!
//! let handler = install_handler().expect("Failed to install signal handler");
//! loop {
//!     // ... one run ...
//!     if !handler.sleep(Duration::from_secs(3600)) {
//!         break;
//!     }
//! }
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

/// Exit code for SIGINT (Ctrl+C) interruption: 128 + 2.
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

/// Slice length used while sleeping, so Ctrl+C is noticed promptly.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shared shutdown flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether Ctrl+C was pressed (or [`request_shutdown`](Self::request_shutdown) called).
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Request a shutdown by hand.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Clear the flag.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// A clone of the underlying flag.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Sleep for `duration`, waking early on shutdown.
    ///
    /// Returns `true` if the full duration elapsed, `false` if shutdown was
    /// requested.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_shutdown_requested() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install the process-wide Ctrl+C handler.
///
/// Calling this again returns the installed handler with its flag cleared,
/// so tests that go through `run_app` more than once keep working.
///
/// # Errors
///
/// Returns [`SignalError::InstallFailed`] if a different handler was
/// already registered with `ctrlc`.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        let _ = writeln!(
            std::io::stderr(),
            "\nInterrupted. Stopping after the current run..."
        );
        let _ = std::io::stderr().flush();
    })?;

    let _ = GLOBAL_HANDLER.set(handler.clone());
    Ok(handler)
}
