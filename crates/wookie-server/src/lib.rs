//! Wookie Server - standalone bootstrap
//!
//! Parses runtime arguments, prepares the database, serves the read-only
//! admin HTTP surface and shuts down on a loopback stop request or Ctrl-C.

pub mod config;
pub mod router;
pub mod stop;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::net::TcpListener;
use wookie_store::{db, migrations::apply_migrations, SqliteGateway};

pub use config::{ServerArgs, ServerConfig};
pub use router::{build_router, AppState};

pub type ServeResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Open the database and, when asked, bring its schema up to date
///
/// # Errors
///
/// Returns the store error if the database cannot be opened or migrated.
pub fn prepare_gateway(config: &ServerConfig) -> wookie_store::Result<SqliteGateway> {
    let mut conn = db::open(&config.db)?;
    db::configure(&conn)?;
    if config.init_db {
        let applied = apply_migrations(&mut conn)?;
        tracing::info!(applied, db = %config.db.display(), "database initialised");
    } else {
        tracing::info!(db = %config.db.display(), "skipping database initialisation");
    }
    Ok(SqliteGateway::new(conn))
}

/// Bind both listeners and serve until stopped
///
/// # Errors
///
/// Returns an error if the database cannot be prepared, a port cannot be
/// bound, or the HTTP server fails.
pub async fn run(config: ServerConfig) -> ServeResult<()> {
    let gateway = prepare_gateway(&config)?;
    let state = AppState::new(Arc::new(Mutex::new(gateway)));

    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], config.port))).await?;
    let stop_listener = stop::bind(config.stop_port).await?;

    tracing::info!(
        "point your browser at http://localhost:{}{}",
        config.port,
        config.context_path
    );
    serve(listener, stop_listener, state, &config.context_path).await
}

/// Serve on already-bound listeners
///
/// # Errors
///
/// Returns an error if the HTTP server fails.
pub async fn serve(
    listener: TcpListener,
    stop_listener: TcpListener,
    state: AppState,
    context_path: &str,
) -> ServeResult<()> {
    let app = build_router(state, context_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(stop::shutdown_signal(stop_listener))
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
