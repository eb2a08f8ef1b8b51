use crate::HubSet;
use crate::listener::ClosingListener;

use rb_stream::ShutdownCoordinator;

use std::future::IntoFuture;
use std::io;
use std::time::Duration;

use axum::Router;
use log::{info, warn};
use tokio::net::TcpListener;

/// Serve `app` until shutdown, then drain for at most `grace`.
///
/// On the shutdown signal the hubs are closed so every stream ends, and
/// axum stops accepting. Connections still open after `grace` (a client
/// that stopped reading) are cut, so this always returns.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    hubs: HubSet,
    shutdown: ShutdownCoordinator,
    grace: Duration,
) -> io::Result<()> {
    let (listener, cutter) = ClosingListener::new(listener);
    let mut drain_guard = shutdown.subscribe_guard();
    let mut grace_guard = shutdown.subscribe_guard();

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            drain_guard.wait().await;
            hubs.shutdown();
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result,
        _ = grace_guard.wait() => {}
    }

    info!("Draining connections for up to {}ms", grace.as_millis());

    tokio::select! {
        result = &mut server => result,
        _ = tokio::time::sleep(grace) => {
            warn!(
                "Connections still open {}ms after shutdown, closing them",
                grace.as_millis()
            );
            cutter.cut();
            server.await
        }
    }
}
