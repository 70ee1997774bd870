//! Synchronous typed client for the War Track Dashboard API.
//!
//! # Overview
//! Translates high-level filtered queries into HTTP calls against the
//! dashboard's REST endpoints and converts responses into typed records or
//! classified errors. One blocking round trip per operation; no retries,
//! no caching, no pagination.
//!
//! # Design
//! - [`Client`] owns the transport agent for its whole lifetime; it is
//!   released by drop or by an explicit [`Client::close`].
//! - Filter dimensions are closed enums ([`Country`], [`EquipmentType`],
//!   [`Status`]) serializing to their lowercase wire tokens, so invalid
//!   filter values are unrepresentable.
//! - Date filters are validated to strict `YYYY-MM-DD` before any network
//!   call.
//! - Every failure is one [`Error`] variant carrying the HTTP status (when
//!   there is one), the raw body, and the operation name.
//!
//! # Example
//! ```no_run
//! use wartrack_core::{Client, Country, EquipmentFilter, EquipmentType};
//!
//! fn main() -> Result<(), wartrack_core::Error> {
//!     let client = Client::new("http://localhost:8000");
//!     let filter = EquipmentFilter {
//!         types: vec![EquipmentType::Tanks],
//!         date_start: Some("2024-01-01".into()),
//!         date_end: Some("2024-12-31".into()),
//!     };
//!     for eq in client.equipments(Country::Ukraine, &filter)? {
//!         println!("{} {}: {} total", eq.date, eq.equipment_type, eq.total);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod query;
pub mod types;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::Error;
pub use query::{DateInput, EquipmentFilter, SystemFilter};
pub use types::{
    AllEquipment, AllSystem, Country, Equipment, EquipmentType, Status, StatusMap, System,
    TypeInfo, UnknownToken,
};
