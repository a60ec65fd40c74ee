//! Interrupt signal to cancellation token adapter.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Cancel `token` when the process receives Ctrl-C / SIGINT.
///
/// The listener task ends on its own once the token is cancelled from
/// elsewhere.
pub fn cancel_on_interrupt(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    info!("got interrupt signal, stopping");
                    token.cancel();
                }
                Err(err) => error!(error = %err, "failed to listen for interrupt signal"),
            },
            () = token.cancelled() => {}
        }
    })
}
