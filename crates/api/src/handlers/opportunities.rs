//! Handlers for opportunities and their per-lead info rows.
//!
//! Both resources are served under the `opportunities` key.

use axum::extract::State;
use crm_core::records::{Opportunity, OpportunityInfo};

use super::{found, RecordPath};
use crate::error::AppResult;
use crate::response::NormalizedResponse;
use crate::state::AppState;

/// GET /opportunities
pub async fn list_opportunities(State(state): State<AppState>) -> AppResult<NormalizedResponse> {
    let opportunities = state.store.list_opportunities().await?;
    NormalizedResponse::list::<Opportunity>(&opportunities)
}

/// GET /opportunities/{id}
pub async fn get_opportunity(
    State(state): State<AppState>,
    RecordPath(id): RecordPath,
) -> AppResult<NormalizedResponse> {
    let opportunity = found(state.store.find_opportunity(id).await?, id)?;
    NormalizedResponse::single(&opportunity)
}

/// GET /opportunity-info
pub async fn list_opportunity_info(
    State(state): State<AppState>,
) -> AppResult<NormalizedResponse> {
    let info = state.store.list_opportunity_info().await?;
    NormalizedResponse::list::<OpportunityInfo>(&info)
}

/// GET /opportunity-info/{id}
pub async fn get_opportunity_info(
    State(state): State<AppState>,
    RecordPath(id): RecordPath,
) -> AppResult<NormalizedResponse> {
    let info = found(state.store.find_opportunity_info(id).await?, id)?;
    NormalizedResponse::single(&info)
}
