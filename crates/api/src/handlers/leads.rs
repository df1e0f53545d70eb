use axum::extract::State;
use crm_core::records::Lead;

use super::{found, RecordPath};
use crate::error::AppResult;
use crate::response::NormalizedResponse;
use crate::state::AppState;

/// GET /leads
pub async fn list_leads(State(state): State<AppState>) -> AppResult<NormalizedResponse> {
    let leads = state.store.list_leads().await?;
    NormalizedResponse::list::<Lead>(&leads)
}

/// GET /leads/{id}
pub async fn get_lead(
    State(state): State<AppState>,
    RecordPath(id): RecordPath,
) -> AppResult<NormalizedResponse> {
    let lead = found(state.store.find_lead(id).await?, id)?;
    NormalizedResponse::single(&lead)
}
