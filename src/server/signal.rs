// Signal handling module
//
// SIGTERM and SIGINT (Ctrl+C) request a graceful shutdown. Non-unix
// platforms only get Ctrl+C.

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Spawn a task that notifies `shutdown` once a termination signal arrives
///
/// `notify_one` stores a permit, so the accept loop sees the request even if
/// it is not waiting at that moment.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                logger::log_warning(&format!(
                    "Failed to register SIGTERM handler: {e}, falling back to Ctrl+C only"
                ));
                wait_for_ctrl_c(&shutdown).await;
                return;
            }
        };

        logger::log_info(&format!(
            "Signal handlers registered (SIGTERM, SIGINT), pid {}",
            std::process::id()
        ));

        tokio::select! {
            _ = sigterm.recv() => logger::log_info("SIGTERM received, shutting down"),
            res = tokio::signal::ctrl_c() => match res {
                Ok(()) => logger::log_info("SIGINT received, shutting down"),
                Err(e) => {
                    logger::log_error(&format!("Failed to listen for SIGINT: {e}"));
                    // Keep serving until SIGTERM
                    sigterm.recv().await;
                    logger::log_info("SIGTERM received, shutting down");
                }
            },
        }
        shutdown.notify_one();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        wait_for_ctrl_c(&shutdown).await;
    });
}

async fn wait_for_ctrl_c(shutdown: &Notify) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            logger::log_info("Ctrl+C received, shutting down");
            shutdown.notify_one();
        }
        Err(e) => logger::log_error(&format!("Failed to listen for Ctrl+C: {e}")),
    }
}
