use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use common::types::{Ack, RegistrationRecord};
use service::records::domain::{CreateRecordInput, NewRecord};

use crate::errors::{ApiError, MSG_INVALID_BODY, MSG_LOAD_FAILED, MSG_SAVE_FAILED};
use crate::state::ServerState;

pub const MSG_CREATED: &str = "Record registered successfully!";

/// `POST /records` — 201 with an acknowledgment; no identifier is returned.
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CreateRecordInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Ack>), ApiError> {
    let Json(input) = payload.map_err(|e| {
        warn!(error = %e, "rejected malformed create body");
        ApiError::new(StatusCode::BAD_REQUEST, MSG_INVALID_BODY)
    })?;

    let stored = state
        .records
        .create(NewRecord::from(input))
        .await
        .map_err(|e| ApiError::from_service(e, MSG_SAVE_FAILED))?;
    info!(cpf = %stored.cpf, "created record");
    Ok((StatusCode::CREATED, Json(Ack { message: MSG_CREATED.to_string() })))
}

/// `GET /records` — every stored row.
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<RegistrationRecord>>, ApiError> {
    let rows = state
        .records
        .list()
        .await
        .map_err(|e| ApiError::from_service(e, MSG_LOAD_FAILED))?;
    info!(count = rows.len(), "list records");
    Ok(Json(rows))
}
