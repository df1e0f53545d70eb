//! Normalized response bodies.
//!
//! List and detail endpoints answer with a [`crm_core::normalize::Envelope`].
//! [`NormalizedResponse`] carries it onto the wire with the envelope's own
//! status code, so handlers return envelopes rather than ad-hoc
//! `serde_json::json!` bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use crm_core::normalize::Envelope;
use crm_core::records::CrmRecord;

use crate::error::AppResult;

/// An [`Envelope`] ready to be returned from a handler.
#[derive(Debug)]
pub struct NormalizedResponse(pub Envelope);

impl NormalizedResponse {
    /// Serve `records` under their type's collection key.
    pub fn list<R: CrmRecord>(records: &[R]) -> AppResult<Self> {
        let envelope = Envelope::success().with_collection(R::COLLECTION, records)?;
        Ok(Self(envelope))
    }

    /// Serve one record as a one-element collection.
    pub fn single<R: CrmRecord>(record: &R) -> AppResult<Self> {
        let envelope = Envelope::success().with_record(R::COLLECTION, record)?;
        Ok(Self(envelope))
    }
}

impl From<Envelope> for NormalizedResponse {
    fn from(envelope: Envelope) -> Self {
        Self(envelope)
    }
}

impl IntoResponse for NormalizedResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.code()).unwrap_or(StatusCode::OK);
        (status, Json(self.0)).into_response()
    }
}
