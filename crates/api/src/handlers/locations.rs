use axum::extract::State;
use crm_core::records::Location;

use super::{found, RecordPath};
use crate::error::AppResult;
use crate::response::NormalizedResponse;
use crate::state::AppState;

/// GET /locations
pub async fn list_locations(State(state): State<AppState>) -> AppResult<NormalizedResponse> {
    let locations = state.store.list_locations().await?;
    NormalizedResponse::list::<Location>(&locations)
}

/// GET /locations/{id}
pub async fn get_location(
    State(state): State<AppState>,
    RecordPath(id): RecordPath,
) -> AppResult<NormalizedResponse> {
    let location = found(state.store.find_location(id).await?, id)?;
    NormalizedResponse::single(&location)
}
