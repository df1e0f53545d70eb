//! CRM entities and their wire projections.
//!
//! Each struct is both the stored row and its projection: the `Serialize`
//! output is what ends up under `byId` in a response. Pipeline records use
//! camelCase keys; the delivery records use snake_case.
//! Relationships are plain foreign-key ids; nothing is nested.

use serde::{Deserialize, Serialize};

use crate::normalize::Record;
use crate::types::{DbId, RecordId, Timestamp};

/// A record type served by the CRM endpoints.
pub trait CrmRecord: Record {
    /// Entity name used in not-found messages.
    const ENTITY: &'static str;
    /// Envelope key the records are served under.
    const COLLECTION: &'static str;

    fn id(&self) -> DbId;
}

macro_rules! crm_record {
    ($ty:ty, $entity:literal, $collection:literal) => {
        impl Record for $ty {
            fn record_id(&self) -> Option<RecordId> {
                Some(RecordId::Int(self.id))
            }
        }

        impl CrmRecord for $ty {
            const ENTITY: &'static str = $entity;
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> DbId {
                self.id
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Leads
// ---------------------------------------------------------------------------

/// A prospective client sitting in one funnel step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: DbId,
    pub address: Option<String>,
    pub chance_to_convert: f64,
    pub date_created: Timestamp,
    pub email: Option<String>,
    pub funnel_step_id: DbId,
    pub last_contact: Timestamp,
    pub name: String,
    pub phone: String,
    /// Free-form pipeline label, e.g. `"Follow Up"` or `"Hot Lead"`.
    pub status: Option<String>,
}

crm_record!(Lead, "Lead", "leads");

// ---------------------------------------------------------------------------
// Opportunities
// ---------------------------------------------------------------------------

/// A service line (e.g. "Payroll") with its ordered funnel steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub funnel_steps: Vec<DbId>,
}

crm_record!(Opportunity, "Opportunity", "opportunities");

/// Per-lead details for an opportunity.
///
/// Served under the `opportunities` key; the client merges these into the
/// opportunity view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityInfo {
    pub id: DbId,
    pub filing_status: String,
    pub final_price: Option<String>,
    pub lead_id: DbId,
    pub occupation: Option<String>,
    pub opportunity_id: DbId,
    pub quoted_price: Option<f64>,
    pub yearly_income: Option<String>,
}

crm_record!(OpportunityInfo, "OpportunityInfo", "opportunities");

// ---------------------------------------------------------------------------
// Funnel steps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStep {
    pub id: DbId,
    #[serde(default)]
    pub leads: Vec<DbId>,
    pub name: String,
    pub opportunity_id: DbId,
}

crm_record!(FunnelStep, "FunnelStep", "funnelSteps");

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: DbId,
    pub completed: bool,
    #[serde(rename = "datecompleted")]
    pub date_completed: Option<Timestamp>,
    pub date_created: Timestamp,
    pub description: String,
    pub lead_id: DbId,
    pub priority_rank: i32,
}

crm_record!(Todo, "Todo", "todos");

// ---------------------------------------------------------------------------
// Clients, locations and deliveries
// ---------------------------------------------------------------------------
//
// The delivery side of the schema has always used snake_case keys on the
// wire, unlike the sales pipeline records above.

/// A delivery customer with its sites and delivery history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub locations: Vec<DbId>,
    #[serde(default)]
    pub deliveries: Vec<DbId>,
}

crm_record!(Client, "Client", "clients");

/// A client site that deliveries are picked up from or dropped off at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: DbId,
    pub client_id: DbId,
    pub location_name: String,
    /// Whether this is the client's main site.
    #[serde(default)]
    pub primary_location: bool,
    pub primary_contact: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: Option<String>,
    /// Deliveries picked up here.
    #[serde(default)]
    pub pickups: Vec<DbId>,
    /// Deliveries dropped off here.
    #[serde(default)]
    pub dropoffs: Vec<DbId>,
}

crm_record!(Location, "Location", "locations");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: DbId,
    pub client_id: DbId,
    pub date_created: Timestamp,
    pub item: String,
    pub notes: Option<String>,
    /// `None` until the delivery has been completed.
    #[serde(default)]
    pub date_fulfilled: Option<Timestamp>,
    pub pickup_location_id: DbId,
    pub dropoff_location_id: DbId,
}

crm_record!(Delivery, "Delivery", "deliveries");
