//! Core domain logic for the CRM backend.
//!
//! - [`normalize`] builds the `{allIds, byId}` response envelope.
//! - [`records`] holds the CRM entities and their wire projections.
//! - [`store`] defines the injected data-access interface and its in-memory
//!   implementation.

pub mod error;
pub mod normalize;
pub mod records;
pub mod store;
pub mod types;
