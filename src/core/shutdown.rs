//! Shutdown Coordination
//!
//! Signal handling for the CLI: the first interrupt is broadcast so callers
//! can stop waiting and report, a second one exits immediately.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Exit code used when the process is interrupted
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Coordinates graceful shutdown across the application
///
/// Clones share the same channel and flag.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
    signal_count: Arc<AtomicUsize>,
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(8);
        Self {
            shutdown_tx,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
            signal_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a coordinator with process signal handlers installed
    ///
    /// Must be called from within a Tokio runtime.
    pub fn with_signal_handlers() -> Self {
        let coordinator = Self::new();
        setup_signal_handlers(&coordinator);
        coordinator
    }

    /// Receiver for shutdown notifications sent after this call
    ///
    /// Check [`is_shutdown_requested`](Self::is_shutdown_requested) after
    /// subscribing to catch a request that came earlier.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Handle one process signal; the second one exits immediately
    fn signal_received(&self) {
        let prev = self.signal_count.fetch_add(1, Ordering::AcqRel);
        self.trigger_shutdown();
        if prev >= 1 {
            log::warn!("Second interrupt received; exiting");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        log::warn!("Interrupt received; stopping (repeat to exit immediately)");
    }
}

fn setup_signal_handlers(coordinator: &ShutdownCoordinator) {
    #[cfg(unix)]
    {
        // Restore default SIGPIPE so `moviebatch ... | head` exits quietly
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }

        use tokio::signal::unix::{signal, SignalKind};

        for kind in [SignalKind::terminate(), SignalKind::hangup()] {
            let coordinator = coordinator.clone();
            tokio::spawn(async move {
                if let Ok(mut sig) = signal(kind) {
                    while sig.recv().await.is_some() {
                        coordinator.signal_received();
                    }
                }
            });
        }
    }

    let coordinator = coordinator.clone();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            coordinator.signal_received();
        }
    });
}
