//! Synchronous client for the War Track Dashboard API.
//!
//! # Design
//! `Client` holds immutable configuration (base URL, timeout, extra headers)
//! plus the owned `ureq::Agent` transport. Each operation assembles query
//! pairs, performs exactly one blocking round trip, classifies the status
//! code, and deserializes the body. Query assembly and status classification
//! are separate pure steps so they are testable without a server.
//!
//! The agent is created at construction and released either by dropping the
//! client or by an explicit [`Client::close`]; operations after `close` fail
//! with [`Error::Closed`] instead of touching the network.

use std::time::Duration;

use log::debug;
use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::error::Error;
use crate::query::{EquipmentFilter, QueryPairs, SystemFilter};
use crate::types::{
    AllEquipment, AllSystem, Country, Equipment, EquipmentType, StatusMap, System, TypeInfo,
};

/// Placeholder base URL for a locally running dashboard.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

/// Status and body of a completed round trip, before classification.
#[derive(Debug)]
struct RawResponse {
    status: u16,
    body: String,
}

/// Configures and constructs a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    timeout: Duration,
    headers: Vec<(String, String)>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
        }
    }
}

impl ClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header attached unchanged to every outgoing request.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> Client {
        // Status interpretation belongs to the client, not the transport:
        // 4xx/5xx come back as data, never as ureq errors.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(self.timeout))
            .build()
            .new_agent();
        Client {
            base_url: self.base_url,
            headers: self.headers,
            agent: Some(agent),
        }
    }
}

/// Blocking client for the War Track Dashboard API.
///
/// One network round trip per operation, no retries, no caching. Not
/// intended for sharing across threads; use one client per thread.
#[derive(Debug)]
pub struct Client {
    base_url: String,
    headers: Vec<(String, String)>,
    agent: Option<Agent>,
}

impl Client {
    /// Client with the default timeout and no extra headers.
    pub fn new(base_url: &str) -> Self {
        Client::builder().base_url(base_url).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Release the transport. Further operations fail with [`Error::Closed`].
    ///
    /// Dropping the client releases the transport as well; `close` exists for
    /// callers who want the release to happen at a specific point.
    pub fn close(&mut self) {
        if self.agent.take().is_some() {
            debug!("client closed ({})", self.base_url);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.agent.is_none()
    }

    // --- query operations ---

    /// Dated equipment-loss observations for one country.
    pub fn equipments(
        &self,
        country: Country,
        filter: &EquipmentFilter,
    ) -> Result<Vec<Equipment>, Error> {
        const OP: &str = "equipments";
        let mut q = QueryPairs::new();
        q.push_country(Some(country));
        q.push_types(&filter.types);
        q.push_date(OP, "date_start", filter.date_start.as_ref())?;
        q.push_date(OP, "date_end", filter.date_end.as_ref())?;
        self.get_json(OP, "/equipments", q)
    }

    /// Aggregate equipment-loss totals, optionally narrowed by country/types.
    pub fn total_equipments(
        &self,
        country: Option<Country>,
        types: &[EquipmentType],
    ) -> Result<Vec<AllEquipment>, Error> {
        const OP: &str = "total_equipments";
        let mut q = QueryPairs::new();
        q.push_country(country);
        q.push_types(types);
        self.get_json(OP, "/equipments/total", q)
    }

    /// Equipment categories known to the server, as token/label pairs.
    pub fn equipment_types(&self) -> Result<Vec<TypeInfo>, Error> {
        self.get_json("equipment_types", "/equipments/types", QueryPairs::new())
    }

    /// Dated weapon-system status observations for one country.
    pub fn systems(
        &self,
        country: Country,
        filter: &SystemFilter,
    ) -> Result<Vec<System>, Error> {
        const OP: &str = "systems";
        let mut q = QueryPairs::new();
        q.push_country(Some(country));
        q.push_systems(&filter.systems);
        q.push_statuses(&filter.statuses);
        q.push_date(OP, "date_start", filter.date_start.as_ref())?;
        q.push_date(OP, "date_end", filter.date_end.as_ref())?;
        self.get_json(OP, "/systems", q)
    }

    /// Aggregate per-status totals, optionally narrowed by country/systems.
    pub fn total_systems(
        &self,
        country: Option<Country>,
        systems: &[String],
    ) -> Result<Vec<AllSystem>, Error> {
        const OP: &str = "total_systems";
        let mut q = QueryPairs::new();
        q.push_country(country);
        q.push_systems(systems);
        self.get_json(OP, "/systems/total", q)
    }

    /// Weapon-system status values known to the server, as token/label pairs.
    pub fn system_types(&self) -> Result<Vec<TypeInfo>, Error> {
        self.get_json("system_types", "/systems/types", QueryPairs::new())
    }

    // --- import triggers ---

    pub fn import_equipments(&self) -> Result<StatusMap, Error> {
        self.post_json("import_equipments", "/import/equipments")
    }

    pub fn import_all_equipments(&self) -> Result<StatusMap, Error> {
        self.post_json("import_all_equipments", "/import/equipments/all")
    }

    pub fn import_systems(&self) -> Result<StatusMap, Error> {
        self.post_json("import_systems", "/import/systems")
    }

    pub fn import_all_systems(&self) -> Result<StatusMap, Error> {
        self.post_json("import_all_systems", "/import/systems/all")
    }

    pub fn import_all(&self) -> Result<StatusMap, Error> {
        self.post_json("import_all", "/import/all")
    }

    // --- health ---

    /// Server liveness probe; returns the response mapping unchanged.
    pub fn health_check(&self) -> Result<StatusMap, Error> {
        self.get_json("health_check", "/health", QueryPairs::new())
    }

    // --- plumbing ---

    fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        query: QueryPairs,
    ) -> Result<T, Error> {
        let raw = self.execute(operation, Method::Get, path, query.into_pairs())?;
        check_status(operation, &raw)?;
        parse_json(operation, &raw.body)
    }

    fn post_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<T, Error> {
        let raw = self.execute(operation, Method::Post, path, Vec::new())?;
        check_status(operation, &raw)?;
        parse_json(operation, &raw.body)
    }

    /// Perform the single round trip for an operation.
    fn execute(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<RawResponse, Error> {
        let agent = self.agent.as_ref().ok_or(Error::Closed { operation })?;
        let url = format!("{}{}", self.base_url, path);
        debug!(
            "{operation}: {} {url} ({} query pairs)",
            match method {
                Method::Get => "GET",
                Method::Post => "POST",
            },
            query.len()
        );

        let result = match method {
            Method::Get => {
                let mut req = agent.get(&url);
                for (key, value) in &query {
                    req = req.query(key.as_str(), value.as_str());
                }
                for (name, value) in &self.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()
            }
            Method::Post => {
                let mut req = agent.post(&url);
                for (name, value) in &self.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.send_empty()
            }
        };

        let mut response = result.map_err(|e| Error::Connection {
            operation,
            message: e.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::Connection {
                operation,
                message: format!("failed reading response body: {e}"),
            })?;
        debug!("{operation}: HTTP {status} ({} bytes)", body.len());
        Ok(RawResponse { status, body })
    }
}

/// Map a non-2xx status to its error variant. Exhaustive for 401/403/404/429
/// and 5xx; everything else non-2xx lands in `Api`.
fn check_status(operation: &'static str, raw: &RawResponse) -> Result<(), Error> {
    let body = || raw.body.clone();
    match raw.status {
        200..=299 => Ok(()),
        401 => Err(Error::Authentication {
            operation,
            body: body(),
        }),
        403 => Err(Error::Forbidden {
            operation,
            body: body(),
        }),
        404 => Err(Error::NotFound {
            operation,
            body: body(),
        }),
        429 => Err(Error::RateLimit {
            operation,
            body: body(),
        }),
        status if status >= 500 => Err(Error::Server {
            operation,
            status,
            body: body(),
        }),
        status => Err(Error::Api {
            operation,
            status,
            body: body(),
        }),
    }
}

fn parse_json<T: DeserializeOwned>(operation: &'static str, body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        operation,
        message: e.to_string(),
    })
}
