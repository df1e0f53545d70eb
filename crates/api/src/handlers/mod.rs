//! Request handlers.
//!
//! Every handler fetches through the injected [`CrmStore`](crm_core::store::CrmStore),
//! maps absent records to 404, and answers with a [`NormalizedResponse`](crate::response::NormalizedResponse).

pub mod clients;
pub mod deliveries;
pub mod funnel_steps;
pub mod leads;
pub mod locations;
pub mod opportunities;
pub mod pipeline;
pub mod todos;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use crm_core::error::CoreError;
use crm_core::records::CrmRecord;
use crm_core::types::DbId;

use crate::error::AppError;

/// Integer `{id}` path segment. Malformed ids are rejected with the JSON
/// error envelope instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct RecordPath(pub DbId);

impl<S: Send + Sync> FromRequestParts<S> for RecordPath {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}

/// Turn a missing record into a `NotFound` error for its entity.
pub(crate) fn found<R: CrmRecord>(record: Option<R>, id: DbId) -> Result<R, AppError> {
    record.ok_or(AppError::Core(CoreError::NotFound {
        entity: R::ENTITY,
        id,
    }))
}
