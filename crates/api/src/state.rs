use std::sync::Arc;

use crm_core::store::CrmStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Data-access collaborator the handlers fetch records through.
    pub store: Arc<dyn CrmStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
