pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers::{
    clients, deliveries, funnel_steps, leads, locations, opportunities, pipeline, todos,
};
use crate::state::AppState;

/// Build the resource route tree.
///
/// ```text
/// /opportunities                 list
/// /opportunities/{id}            get
/// /opportunity-info              list (served under `opportunities`)
/// /opportunity-info/{id}         get
/// /funnel-steps                  list
/// /funnel-steps/{id}             get
/// /leads                         list
/// /leads/{id}                    get
/// /todos                         list
/// /todos/{id}                    get
/// /clients                       list
/// /clients/{id}                  get
/// /locations                     list
/// /locations/{id}                get
/// /deliveries                    list
/// /deliveries/{id}               get
/// /pipeline                      opportunities + funnel steps + leads
/// ```
pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/opportunities", get(opportunities::list_opportunities))
        .route("/opportunities/{id}", get(opportunities::get_opportunity))
        .route("/opportunity-info", get(opportunities::list_opportunity_info))
        .route("/opportunity-info/{id}", get(opportunities::get_opportunity_info))
        .route("/funnel-steps", get(funnel_steps::list_funnel_steps))
        .route("/funnel-steps/{id}", get(funnel_steps::get_funnel_step))
        .route("/leads", get(leads::list_leads))
        .route("/leads/{id}", get(leads::get_lead))
        .route("/todos", get(todos::list_todos))
        .route("/todos/{id}", get(todos::get_todo))
        .route("/clients", get(clients::list_clients))
        .route("/clients/{id}", get(clients::get_client))
        .route("/locations", get(locations::list_locations))
        .route("/locations/{id}", get(locations::get_location))
        .route("/deliveries", get(deliveries::list_deliveries))
        .route("/deliveries/{id}", get(deliveries::get_delivery))
        .route("/pipeline", get(pipeline::get_pipeline))
}
