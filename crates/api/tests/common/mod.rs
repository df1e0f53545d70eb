#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::TimeZone;
use crm_api::config::ServerConfig;
use crm_api::router::build_app_router;
use crm_api::state::AppState;
use crm_core::records::{
    Client, Delivery, FunnelStep, Lead, Location, Opportunity, OpportunityInfo, Todo,
};
use crm_core::store::{CrmStore, Dataset, MemoryStore};
use crm_core::types::Timestamp;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_path: None,
    }
}

/// Build the full application router around the given store.
pub fn build_test_app_with(store: Arc<dyn CrmStore>) -> Router {
    let state = AppState {
        store,
        config: Arc::new(test_config()),
    };
    build_app_router(state).unwrap()
}

/// Build the full application router over [`sample_dataset`].
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(MemoryStore::new(sample_dataset())))
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn at(day: u32) -> Timestamp {
    chrono::Utc.with_ymd_and_hms(2021, 2, day, 15, 32, 37).unwrap()
}

fn lead(id: i64, funnel_step_id: i64, name: &str) -> Lead {
    Lead {
        id,
        address: None,
        chance_to_convert: 0.35,
        date_created: at(26),
        email: Some(format!("lead{id}@example.com")),
        funnel_step_id,
        last_contact: at(26),
        name: name.to_string(),
        phone: "+15555550100".to_string(),
        status: Some("Follow Up".to_string()),
    }
}

/// Small pipeline (two opportunities, three funnel steps, three leads) plus
/// one client with two locations and two deliveries.
///
/// Records are deliberately listed out of id order.
pub fn sample_dataset() -> Dataset {
    Dataset {
        leads: vec![
            lead(3, 3, "Janice Perez"),
            lead(1, 1, "Ada Park"),
            lead(2, 1, "Omar Reyes"),
        ],
        opportunities: vec![
            Opportunity {
                id: 2,
                name: "Payroll".to_string(),
                funnel_steps: vec![3],
            },
            Opportunity {
                id: 1,
                name: "Individual Tax Return".to_string(),
                funnel_steps: vec![1, 2],
            },
        ],
        opportunity_info: vec![OpportunityInfo {
            id: 1,
            filing_status: "Single".to_string(),
            final_price: None,
            lead_id: 1,
            occupation: Some("Engineer".to_string()),
            opportunity_id: 1,
            quoted_price: Some(350.0),
            yearly_income: Some("$100k-$150k".to_string()),
        }],
        funnel_steps: vec![
            FunnelStep {
                id: 1,
                leads: vec![1, 2],
                name: "Initial Inquiry".to_string(),
                opportunity_id: 1,
            },
            FunnelStep {
                id: 2,
                leads: vec![],
                name: "Took Questionnaire".to_string(),
                opportunity_id: 1,
            },
            FunnelStep {
                id: 3,
                leads: vec![3],
                name: "Initial Inquiry".to_string(),
                opportunity_id: 2,
            },
        ],
        todos: vec![Todo {
            id: 1,
            completed: false,
            date_completed: None,
            date_created: at(27),
            description: "Call back about W-2 forms".to_string(),
            lead_id: 1,
            priority_rank: 1,
        }],
        clients: vec![Client {
            id: 1,
            name: "Northwind".to_string(),
            locations: vec![1, 2],
            deliveries: vec![1, 2],
        }],
        locations: vec![location(2, "Warehouse", false), location(1, "HQ", true)],
        deliveries: vec![
            Delivery {
                id: 2,
                client_id: 1,
                date_created: at(26),
                item: "Lunch".to_string(),
                notes: None,
                date_fulfilled: None,
                pickup_location_id: 2,
                dropoff_location_id: 1,
            },
            Delivery {
                id: 1,
                client_id: 1,
                date_created: at(25),
                item: "Laptop".to_string(),
                notes: Some("Gray 15-inch model".to_string()),
                date_fulfilled: Some(at(26)),
                pickup_location_id: 1,
                dropoff_location_id: 2,
            },
        ],
    }
}

fn location(id: i64, name: &str, primary: bool) -> Location {
    Location {
        id,
        client_id: 1,
        location_name: name.to_string(),
        primary_location: primary,
        primary_contact: Some("Rosa Diaz".to_string()),
        email: None,
        address: "1 Harbor Way".to_string(),
        city: "Oakland".to_string(),
        state: "CA".to_string(),
        zip_code: "94607".to_string(),
        phone: None,
        pickups: vec![id],
        dropoffs: vec![],
    }
}
