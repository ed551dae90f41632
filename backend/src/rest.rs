//! HTTP surface: thin glue over the domain services.
//!
//! Handlers parse input, call a service, and map the result to a status code
//! using the error's status hint. Authentication happens upstream; the
//! account id arrives as an opaque path segment.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use shared::{
    AccountResponse, BalanceResponse, CreateAccountRequest, CreateStatementRequest, ErrorResponse,
    StatementResponse,
};
use tracing::info;

use crate::domain::{
    AccountError, AccountService, CreateAccountCommand, CreateStatementCommand, LedgerError,
    LedgerService, QueryService,
};
use crate::domain::models::{Account, OperationType, Statement};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub ledger: Arc<LedgerService>,
    pub queries: Arc<QueryService>,
}

impl AppState {
    pub fn new(
        accounts: Arc<AccountService>,
        ledger: Arc<LedgerService>,
        queries: Arc<QueryService>,
    ) -> Self {
        Self {
            accounts,
            ledger,
            queries,
        }
    }
}

/// Build the API router. The caller decides where to nest it.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/accounts", post(create_account))
        .route("/accounts/:account_id", get(get_account))
        .route("/accounts/:account_id/statements/deposit", post(deposit))
        .route("/accounts/:account_id/statements/withdraw", post(withdraw))
        .route("/accounts/:account_id/statements/balance", get(get_balance))
        .route(
            "/accounts/:account_id/statements/:statement_id",
            get(get_statement),
        )
        .with_state(state)
}

fn account_response(account: &Account) -> AccountResponse {
    AccountResponse {
        id: account.id.clone(),
        name: account.name.clone(),
        email: account.email.clone(),
        created_at: account.created_at.to_rfc3339(),
        updated_at: account.updated_at.to_rfc3339(),
    }
}

fn statement_response(statement: &Statement) -> StatementResponse {
    StatementResponse {
        id: statement.id.clone(),
        account_id: statement.account_id.clone(),
        kind: statement.kind.as_str().to_string(),
        amount: statement.amount,
        description: statement.description.clone(),
        created_at: statement.created_at.to_rfc3339(),
        updated_at: statement.updated_at.to_rfc3339(),
    }
}

fn ledger_error_response(err: LedgerError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = if status.is_server_error() {
        tracing::error!("Storage error: {err:?}");
        "Internal server error".to_string()
    } else {
        err.to_string()
    };
    (status, Json(ErrorResponse::new(message))).into_response()
}

fn account_error_response(err: AccountError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = if status.is_server_error() {
        tracing::error!("Storage error: {err:?}");
        "Internal server error".to_string()
    } else {
        err.to_string()
    };
    (status, Json(ErrorResponse::new(message))).into_response()
}

/// POST /accounts
async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    info!("POST /accounts - email: {}", request.email);

    let cmd = CreateAccountCommand {
        name: request.name,
        email: request.email,
    };
    match state.accounts.create_account(cmd).await {
        Ok(account) => (StatusCode::CREATED, Json(account_response(&account))).into_response(),
        Err(e) => account_error_response(e),
    }
}

/// GET /accounts/:account_id
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /accounts/{}", account_id);

    match state.accounts.get_account(&account_id).await {
        Ok(account) => (StatusCode::OK, Json(account_response(&account))).into_response(),
        Err(e) => account_error_response(e),
    }
}

/// POST /accounts/:account_id/statements/deposit
async fn deposit(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(request): Json<CreateStatementRequest>,
) -> impl IntoResponse {
    create_statement(state, account_id, OperationType::Deposit, request).await
}

/// POST /accounts/:account_id/statements/withdraw
async fn withdraw(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(request): Json<CreateStatementRequest>,
) -> impl IntoResponse {
    create_statement(state, account_id, OperationType::Withdraw, request).await
}

async fn create_statement(
    state: AppState,
    account_id: String,
    kind: OperationType,
    request: CreateStatementRequest,
) -> Response {
    info!(
        "POST /accounts/{}/statements/{} - amount: {}",
        account_id, kind, request.amount
    );

    let cmd = CreateStatementCommand {
        account_id,
        kind: kind.as_str().to_string(),
        amount: request.amount,
        description: request.description,
    };
    match state.ledger.create_statement(cmd).await {
        Ok(statement) => {
            (StatusCode::CREATED, Json(statement_response(&statement))).into_response()
        }
        Err(e) => ledger_error_response(e),
    }
}

/// GET /accounts/:account_id/statements/balance
async fn get_balance(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /accounts/{}/statements/balance", account_id);

    match state.queries.get_balance(&account_id).await {
        Ok(summary) => {
            let response = BalanceResponse {
                balance: summary.balance,
                statements: summary.statements.iter().map(statement_response).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => ledger_error_response(e),
    }
}

/// GET /accounts/:account_id/statements/:statement_id
async fn get_statement(
    State(state): State<AppState>,
    Path((account_id, statement_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("GET /accounts/{}/statements/{}", account_id, statement_id);

    match state.queries.get_statement(&account_id, &statement_id).await {
        Ok(statement) => (StatusCode::OK, Json(statement_response(&statement))).into_response(),
        Err(e) => ledger_error_response(e),
    }
}
