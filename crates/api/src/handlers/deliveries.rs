use axum::extract::State;
use crm_core::records::Delivery;

use super::{found, RecordPath};
use crate::error::AppResult;
use crate::response::NormalizedResponse;
use crate::state::AppState;

/// GET /deliveries
pub async fn list_deliveries(State(state): State<AppState>) -> AppResult<NormalizedResponse> {
    let deliveries = state.store.list_deliveries().await?;
    NormalizedResponse::list::<Delivery>(&deliveries)
}

/// GET /deliveries/{id}
pub async fn get_delivery(
    State(state): State<AppState>,
    RecordPath(id): RecordPath,
) -> AppResult<NormalizedResponse> {
    let delivery = found(state.store.find_delivery(id).await?, id)?;
    NormalizedResponse::single(&delivery)
}
