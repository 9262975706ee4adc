use axum::extract::State;
use axum::http::StatusCode;

use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn health<S: AuthServicePort>(
    State(state): State<AppState<S>>,
) -> (StatusCode, &'static str) {
    (StatusCode::OK, state.auth_service.health().message())
}
