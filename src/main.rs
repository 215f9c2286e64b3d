use beacon::config::Config;
use beacon::routing::Router;
use beacon::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let router = Router::from_config(&cfg)?;

    let listener = server::listener::bind(&cfg.server.listen_addr)
        .await
        .inspect_err(|e| tracing::error!("{:#}", e))?;

    let addr = listener.local_addr()?;
    tracing::info!("Try these endpoints:");
    tracing::info!("  http://{}/app/hello?name=John", addr);
    tracing::info!("  http://{}/stocks?symbol=fb", addr);
    tracing::info!("  http://{}/", addr);

    tokio::select! {
        res = server::listener::serve(listener, &router) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
