use axum::extract::State;
use crm_core::records::FunnelStep;

use super::{found, RecordPath};
use crate::error::AppResult;
use crate::response::NormalizedResponse;
use crate::state::AppState;

/// GET /funnel-steps
pub async fn list_funnel_steps(State(state): State<AppState>) -> AppResult<NormalizedResponse> {
    let funnel_steps = state.store.list_funnel_steps().await?;
    NormalizedResponse::list::<FunnelStep>(&funnel_steps)
}

/// GET /funnel-steps/{id}
pub async fn get_funnel_step(
    State(state): State<AppState>,
    RecordPath(id): RecordPath,
) -> AppResult<NormalizedResponse> {
    let funnel_step = found(state.store.find_funnel_step(id).await?, id)?;
    NormalizedResponse::single(&funnel_step)
}
