use axum::extract::State;
use crm_core::normalize::Envelope;
use crm_core::records::{CrmRecord, FunnelStep, Lead, Opportunity};

use crate::error::AppResult;
use crate::response::NormalizedResponse;
use crate::state::AppState;

/// GET /pipeline
///
/// The whole sales pipeline in one envelope: opportunities, their funnel
/// steps, and the leads sitting in those steps.
pub async fn get_pipeline(State(state): State<AppState>) -> AppResult<NormalizedResponse> {
    let opportunities = state.store.list_opportunities().await?;
    let funnel_steps = state.store.list_funnel_steps().await?;
    let leads = state.store.list_leads().await?;

    let envelope = Envelope::success()
        .with_collection(Opportunity::COLLECTION, &opportunities)?
        .with_collection(FunnelStep::COLLECTION, &funnel_steps)?
        .with_collection(Lead::COLLECTION, &leads)?;

    tracing::debug!(
        opportunities = opportunities.len(),
        funnel_steps = funnel_steps.len(),
        leads = leads.len(),
        "Pipeline assembled",
    );

    Ok(envelope.into())
}
