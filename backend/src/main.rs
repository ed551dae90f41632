use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

use ledger_backend::db::DbConnection;
use ledger_backend::domain::{AccountService, LedgerService, QueryService};
use ledger_backend::rest::{self, AppState};
use ledger_backend::storage::{
    AccountStore, SqliteAccountStore, SqliteStatementStore, StatementStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Setting up database");
    let db = DbConnection::init().await?;

    let accounts: Arc<dyn AccountStore> = Arc::new(SqliteAccountStore::new(db.clone()));
    let statements: Arc<dyn StatementStore> = Arc::new(SqliteStatementStore::new(db));

    let state = AppState::new(
        Arc::new(AccountService::new(accounts.clone())),
        Arc::new(LedgerService::new(accounts.clone(), statements.clone())),
        Arc::new(QueryService::new(accounts, statements)),
    );

    // CORS setup so browser clients can reach the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new().nest("/api", rest::router(state)).layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
