use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use contacts_server::{
    config::{ServerConfig, StorageKind},
    data_source::InMemoryStorage,
    state::AppState,
};

#[cfg(feature = "mongodb")]
use contacts_server::data_source::MongoStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_file(true).with_line_number(true))
        .with(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env()
        .inspect_err(|err| error!(%err, "invalid configuration"))?;

    let state = match config.storage {
        StorageKind::Memory => {
            info!("Using in-memory storage, contacts are lost on shutdown");
            AppState::new(InMemoryStorage::default())
        }
        #[cfg(feature = "mongodb")]
        StorageKind::Mongo => {
            let storage = MongoStorage::from_config(&config.store).await?;
            if let Err(err) = storage.connector().ping().await {
                warn!(%err, "MongoDB is not reachable yet, requests will fail until it is");
            }
            AppState::new(storage)
        }
        #[cfg(not(feature = "mongodb"))]
        StorageKind::Mongo => {
            return Err("built without the `mongodb` feature, set STORAGE=memory".into());
        }
    };

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on http://{}", listener.local_addr()?);

    if let Err(e) = axum::serve(listener, state.into_router())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("webserver crashed: {}", e);
        return Err(e.into());
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(%err, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down");
}
