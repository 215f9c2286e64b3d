use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::http::connection::Connection;
use crate::routing::Router;

/// Binds the listening socket. Failing here is the only fatal error.
pub async fn bind(listen_addr: &str) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Could not listen on {}", listen_addr))?;
    info!("Listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Accepts connections forever, handling each one to completion before the
/// next `accept`.
pub async fn serve(listener: TcpListener, router: &Router) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Accept failed");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, router);
        if let Err(e) = conn.run().await {
            error!("Connection error from {}: {:#}", peer, e);
        }
    }
}
