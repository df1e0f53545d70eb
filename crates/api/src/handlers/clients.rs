use axum::extract::State;
use crm_core::records::Client;

use super::{found, RecordPath};
use crate::error::AppResult;
use crate::response::NormalizedResponse;
use crate::state::AppState;

/// GET /clients
pub async fn list_clients(State(state): State<AppState>) -> AppResult<NormalizedResponse> {
    let clients = state.store.list_clients().await?;
    NormalizedResponse::list::<Client>(&clients)
}

/// GET /clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    RecordPath(id): RecordPath,
) -> AppResult<NormalizedResponse> {
    let client = found(state.store.find_client(id).await?, id)?;
    NormalizedResponse::single(&client)
}
