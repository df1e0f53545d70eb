//! Data-access interface injected into request handlers.
//!
//! Handlers never reach for a global database handle; they receive an
//! `Arc<dyn CrmStore>` through application state. [`MemoryStore`] is the
//! bundled implementation, loaded once from a JSON [`Dataset`] file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::records::{
    Client, CrmRecord, Delivery, FunnelStep, Lead, Location, Opportunity, OpportunityInfo, Todo,
};
use crate::types::DbId;

/// Read access to CRM records.
///
/// `list_*` methods return records in ascending id order. `find_*` methods
/// return `Ok(None)` for unknown ids; mapping that to a 404 is the caller's
/// job.
#[async_trait]
pub trait CrmStore: Send + Sync {
    /// Liveness check used by the health endpoint.
    async fn ping(&self) -> Result<(), CoreError>;

    async fn list_leads(&self) -> Result<Vec<Lead>, CoreError>;
    async fn find_lead(&self, id: DbId) -> Result<Option<Lead>, CoreError>;

    async fn list_opportunities(&self) -> Result<Vec<Opportunity>, CoreError>;
    async fn find_opportunity(&self, id: DbId) -> Result<Option<Opportunity>, CoreError>;

    async fn list_opportunity_info(&self) -> Result<Vec<OpportunityInfo>, CoreError>;
    async fn find_opportunity_info(&self, id: DbId) -> Result<Option<OpportunityInfo>, CoreError>;

    async fn list_funnel_steps(&self) -> Result<Vec<FunnelStep>, CoreError>;
    async fn find_funnel_step(&self, id: DbId) -> Result<Option<FunnelStep>, CoreError>;

    async fn list_todos(&self) -> Result<Vec<Todo>, CoreError>;
    async fn find_todo(&self, id: DbId) -> Result<Option<Todo>, CoreError>;

    async fn list_clients(&self) -> Result<Vec<Client>, CoreError>;
    async fn find_client(&self, id: DbId) -> Result<Option<Client>, CoreError>;

    async fn list_locations(&self) -> Result<Vec<Location>, CoreError>;
    async fn find_location(&self, id: DbId) -> Result<Option<Location>, CoreError>;

    async fn list_deliveries(&self) -> Result<Vec<Delivery>, CoreError>;
    async fn find_delivery(&self, id: DbId) -> Result<Option<Delivery>, CoreError>;
}

/// Failure to load a dataset file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Every record the store serves, grouped by type.
///
/// Missing groups deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dataset {
    pub leads: Vec<Lead>,
    pub opportunities: Vec<Opportunity>,
    pub opportunity_info: Vec<OpportunityInfo>,
    pub funnel_steps: Vec<FunnelStep>,
    pub todos: Vec<Todo>,
    pub clients: Vec<Client>,
    pub locations: Vec<Location>,
    pub deliveries: Vec<Delivery>,
}

impl Dataset {
    /// Read and parse a dataset from a JSON file.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Sort every group by id so listings are stable.
    fn sorted(mut self) -> Self {
        self.leads.sort_by_key(CrmRecord::id);
        self.opportunities.sort_by_key(CrmRecord::id);
        self.opportunity_info.sort_by_key(CrmRecord::id);
        self.funnel_steps.sort_by_key(CrmRecord::id);
        self.todos.sort_by_key(CrmRecord::id);
        self.clients.sort_by_key(CrmRecord::id);
        self.locations.sort_by_key(CrmRecord::id);
        self.deliveries.sort_by_key(CrmRecord::id);
        self
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Read-only, in-process [`CrmStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<Dataset>,
}

impl MemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            data: Arc::new(dataset.sorted()),
        }
    }

    /// Load a store from a dataset file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dataset = Dataset::from_json_file(path.as_ref()).await?;
        tracing::info!(
            path = %path.as_ref().display(),
            leads = dataset.leads.len(),
            opportunities = dataset.opportunities.len(),
            opportunity_info = dataset.opportunity_info.len(),
            funnel_steps = dataset.funnel_steps.len(),
            todos = dataset.todos.len(),
            clients = dataset.clients.len(),
            locations = dataset.locations.len(),
            deliveries = dataset.deliveries.len(),
            "Dataset loaded",
        );
        Ok(Self::new(dataset))
    }
}

fn find<R: CrmRecord + Clone>(records: &[R], id: DbId) -> Option<R> {
    records.iter().find(|r| r.id() == id).cloned()
}

#[async_trait]
impl CrmStore for MemoryStore {
    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }

    async fn list_leads(&self) -> Result<Vec<Lead>, CoreError> {
        Ok(self.data.leads.clone())
    }

    async fn find_lead(&self, id: DbId) -> Result<Option<Lead>, CoreError> {
        Ok(find(&self.data.leads, id))
    }

    async fn list_opportunities(&self) -> Result<Vec<Opportunity>, CoreError> {
        Ok(self.data.opportunities.clone())
    }

    async fn find_opportunity(&self, id: DbId) -> Result<Option<Opportunity>, CoreError> {
        Ok(find(&self.data.opportunities, id))
    }

    async fn list_opportunity_info(&self) -> Result<Vec<OpportunityInfo>, CoreError> {
        Ok(self.data.opportunity_info.clone())
    }

    async fn find_opportunity_info(&self, id: DbId) -> Result<Option<OpportunityInfo>, CoreError> {
        Ok(find(&self.data.opportunity_info, id))
    }

    async fn list_funnel_steps(&self) -> Result<Vec<FunnelStep>, CoreError> {
        Ok(self.data.funnel_steps.clone())
    }

    async fn find_funnel_step(&self, id: DbId) -> Result<Option<FunnelStep>, CoreError> {
        Ok(find(&self.data.funnel_steps, id))
    }

    async fn list_todos(&self) -> Result<Vec<Todo>, CoreError> {
        Ok(self.data.todos.clone())
    }

    async fn find_todo(&self, id: DbId) -> Result<Option<Todo>, CoreError> {
        Ok(find(&self.data.todos, id))
    }

    async fn list_clients(&self) -> Result<Vec<Client>, CoreError> {
        Ok(self.data.clients.clone())
    }

    async fn find_client(&self, id: DbId) -> Result<Option<Client>, CoreError> {
        Ok(find(&self.data.clients, id))
    }

    async fn list_locations(&self) -> Result<Vec<Location>, CoreError> {
        Ok(self.data.locations.clone())
    }

    async fn find_location(&self, id: DbId) -> Result<Option<Location>, CoreError> {
        Ok(find(&self.data.locations, id))
    }

    async fn list_deliveries(&self) -> Result<Vec<Delivery>, CoreError> {
        Ok(self.data.deliveries.clone())
    }

    async fn find_delivery(&self, id: DbId) -> Result<Option<Delivery>, CoreError> {
        Ok(find(&self.data.deliveries, id))
    }
}
