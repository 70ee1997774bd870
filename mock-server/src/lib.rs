//! In-memory mock of the War Track Dashboard API for integration tests.
//!
//! The store starts empty; the `POST /import/*` triggers load a small fixture
//! dataset for the corresponding record families, standing in for the
//! upstream's scrape jobs. List endpoints apply country/type/system/status
//! and date-range filters from the query string. DTOs here are defined
//! independently from the client crate so integration tests catch schema
//! drift between the two.

use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Equipment {
    pub id: u64,
    pub country: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub destroyed: u64,
    pub abandoned: u64,
    pub captured: u64,
    pub damaged: u64,
    pub total: u64,
    pub date: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllEquipment {
    pub id: u64,
    pub country: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub destroyed: u64,
    pub abandoned: u64,
    pub captured: u64,
    pub damaged: u64,
    pub total: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct System {
    pub id: u64,
    pub country: String,
    pub system: String,
    pub status: String,
    pub url: String,
    pub date: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllSystem {
    pub id: u64,
    pub country: String,
    pub system: String,
    pub destroyed: u64,
    pub abandoned: u64,
    pub captured: u64,
    pub damaged: u64,
    pub total: u64,
}

#[derive(Debug, Default)]
pub struct Store {
    pub equipments: Vec<Equipment>,
    pub all_equipments: Vec<AllEquipment>,
    pub systems: Vec<System>,
    pub all_systems: Vec<AllSystem>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/equipments", get(list_equipments))
        .route("/equipments/total", get(list_total_equipments))
        .route("/equipments/types", get(list_equipment_types))
        .route("/systems", get(list_systems))
        .route("/systems/total", get(list_total_systems))
        .route("/systems/types", get(list_system_types))
        .route("/import/equipments", post(import_equipments))
        .route("/import/equipments/all", post(import_all_equipments))
        .route("/import/systems", post(import_systems))
        .route("/import/systems/all", post(import_all_systems))
        .route("/import/all", post(import_all))
        .route("/health", get(health))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- fixtures loaded by the import triggers ---

fn fixture_equipments() -> Vec<Equipment> {
    fn row(
        id: u64,
        country: &str,
        equipment_type: &str,
        counts: [u64; 4],
        date: &str,
    ) -> Equipment {
        Equipment {
            id,
            country: country.to_string(),
            equipment_type: equipment_type.to_string(),
            destroyed: counts[0],
            abandoned: counts[1],
            captured: counts[2],
            damaged: counts[3],
            total: counts.iter().sum(),
            date: date.to_string(),
        }
    }
    vec![
        row(1, "ukraine", "tanks", [5, 1, 0, 2], "2024-01-01"),
        row(2, "ukraine", "tanks", [3, 0, 1, 1], "2024-02-01"),
        row(3, "ukraine", "drones", [12, 0, 0, 3], "2024-01-15"),
        row(4, "russia", "tanks", [9, 2, 4, 1], "2024-01-01"),
        row(5, "russia", "artillery", [7, 1, 2, 0], "2024-03-10"),
    ]
}

fn fixture_all_equipments() -> Vec<AllEquipment> {
    fn row(id: u64, country: &str, equipment_type: &str, counts: [u64; 4]) -> AllEquipment {
        AllEquipment {
            id,
            country: country.to_string(),
            equipment_type: equipment_type.to_string(),
            destroyed: counts[0],
            abandoned: counts[1],
            captured: counts[2],
            damaged: counts[3],
            total: counts.iter().sum(),
        }
    }
    vec![
        row(1, "ukraine", "tanks", [8, 1, 1, 3]),
        row(2, "ukraine", "drones", [12, 0, 0, 3]),
        row(3, "russia", "tanks", [9, 2, 4, 1]),
        row(4, "russia", "artillery", [7, 1, 2, 0]),
    ]
}

fn fixture_systems() -> Vec<System> {
    fn row(id: u64, country: &str, system: &str, status: &str, date: &str) -> System {
        System {
            id,
            country: country.to_string(),
            system: system.to_string(),
            status: status.to_string(),
            url: format!("https://example.com/evidence/{id}"),
            date: date.to_string(),
        }
    }
    vec![
        row(1, "russia", "T-90M", "destroyed", "2024-03-15"),
        row(2, "russia", "T-90M", "captured", "2024-04-02"),
        row(3, "ukraine", "Leopard 2A6", "damaged", "2024-02-20"),
        row(4, "russia", "Ka-52", "destroyed", "2024-01-05"),
    ]
}

fn fixture_all_systems() -> Vec<AllSystem> {
    fn row(id: u64, country: &str, system: &str, counts: [u64; 4]) -> AllSystem {
        AllSystem {
            id,
            country: country.to_string(),
            system: system.to_string(),
            destroyed: counts[0],
            abandoned: counts[1],
            captured: counts[2],
            damaged: counts[3],
            total: counts.iter().sum(),
        }
    }
    vec![
        row(1, "russia", "T-90M", [1, 0, 1, 0]),
        row(2, "ukraine", "Leopard 2A6", [0, 0, 0, 1]),
        row(3, "russia", "Ka-52", [1, 0, 0, 0]),
    ]
}

// --- query-string helpers ---
// serde_urlencoded into Vec pairs keeps repeated keys (type=tanks&type=drones).

fn pairs(query: &Option<String>) -> Vec<(String, String)> {
    query
        .as_deref()
        .map(|q| serde_urlencoded::from_str(q).unwrap_or_default())
        .unwrap_or_default()
}

fn single<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

fn values<'a>(pairs: &'a [(String, String)], key: &str) -> Vec<&'a str> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect()
}

fn matches_multi(value: &str, wanted: &[&str]) -> bool {
    wanted.is_empty() || wanted.contains(&value)
}

/// Lexicographic comparison is correct for ISO `YYYY-MM-DD` dates.
fn in_date_range(date: &str, start: Option<&str>, end: Option<&str>) -> bool {
    start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
}

fn require_country<'a>(
    pairs: &'a [(String, String)],
) -> Result<&'a str, (StatusCode, Json<serde_json::Value>)> {
    single(pairs, "country").ok_or((
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"detail": "country is required"})),
    ))
}

// --- handlers ---

async fn list_equipments(
    State(db): State<Db>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Equipment>>, (StatusCode, Json<serde_json::Value>)> {
    let pairs = pairs(&query);
    let country = require_country(&pairs)?;
    let types = values(&pairs, "type");
    let start = single(&pairs, "date_start");
    let end = single(&pairs, "date_end");

    let store = db.read().await;
    let out = store
        .equipments
        .iter()
        .filter(|e| e.country == country)
        .filter(|e| matches_multi(&e.equipment_type, &types))
        .filter(|e| in_date_range(&e.date, start, end))
        .cloned()
        .collect();
    Ok(Json(out))
}

async fn list_total_equipments(
    State(db): State<Db>,
    RawQuery(query): RawQuery,
) -> Json<Vec<AllEquipment>> {
    let pairs = pairs(&query);
    let country = single(&pairs, "country");
    let types = values(&pairs, "type");

    let store = db.read().await;
    let out = store
        .all_equipments
        .iter()
        .filter(|e| country.is_none_or(|c| e.country == c))
        .filter(|e| matches_multi(&e.equipment_type, &types))
        .cloned()
        .collect();
    Json(out)
}

async fn list_equipment_types() -> Json<serde_json::Value> {
    Json(json!([
        {"key": "tanks", "value": "Tanks"},
        {"key": "afvs", "value": "Armoured Fighting Vehicles"},
        {"key": "ifvs", "value": "Infantry Fighting Vehicles"},
        {"key": "apcs", "value": "Armoured Personnel Carriers"},
        {"key": "artillery", "value": "Artillery"},
        {"key": "mlrs", "value": "Multiple Launch Rocket Systems"},
        {"key": "aircraft", "value": "Aircraft"},
        {"key": "helicopters", "value": "Helicopters"},
        {"key": "drones", "value": "Drones"},
        {"key": "naval", "value": "Naval Ships"},
        {"key": "vehicles", "value": "Vehicles"},
    ]))
}

async fn list_systems(
    State(db): State<Db>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<System>>, (StatusCode, Json<serde_json::Value>)> {
    let pairs = pairs(&query);
    let country = require_country(&pairs)?;
    let systems = values(&pairs, "system");
    let statuses = values(&pairs, "status");
    let start = single(&pairs, "date_start");
    let end = single(&pairs, "date_end");

    let store = db.read().await;
    let out = store
        .systems
        .iter()
        .filter(|s| s.country == country)
        .filter(|s| matches_multi(&s.system, &systems))
        .filter(|s| matches_multi(&s.status, &statuses))
        .filter(|s| in_date_range(&s.date, start, end))
        .cloned()
        .collect();
    Ok(Json(out))
}

async fn list_total_systems(
    State(db): State<Db>,
    RawQuery(query): RawQuery,
) -> Json<Vec<AllSystem>> {
    let pairs = pairs(&query);
    let country = single(&pairs, "country");
    let systems = values(&pairs, "system");

    let store = db.read().await;
    let out = store
        .all_systems
        .iter()
        .filter(|s| country.is_none_or(|c| s.country == c))
        .filter(|s| matches_multi(&s.system, &systems))
        .cloned()
        .collect();
    Json(out)
}

async fn list_system_types() -> Json<serde_json::Value> {
    Json(json!([
        {"key": "destroyed", "value": "Destroyed"},
        {"key": "abandoned", "value": "Abandoned"},
        {"key": "captured", "value": "Captured"},
        {"key": "damaged", "value": "Damaged"},
    ]))
}

async fn import_equipments(State(db): State<Db>) -> Json<serde_json::Value> {
    db.write().await.equipments = fixture_equipments();
    Json(json!({"status": "ok", "imported": "equipments"}))
}

async fn import_all_equipments(State(db): State<Db>) -> Json<serde_json::Value> {
    db.write().await.all_equipments = fixture_all_equipments();
    Json(json!({"status": "ok", "imported": "all_equipments"}))
}

async fn import_systems(State(db): State<Db>) -> Json<serde_json::Value> {
    db.write().await.systems = fixture_systems();
    Json(json!({"status": "ok", "imported": "systems"}))
}

async fn import_all_systems(State(db): State<Db>) -> Json<serde_json::Value> {
    db.write().await.all_systems = fixture_all_systems();
    Json(json!({"status": "ok", "imported": "all_systems"}))
}

async fn import_all(State(db): State<Db>) -> Json<serde_json::Value> {
    let mut store = db.write().await;
    store.equipments = fixture_equipments();
    store.all_equipments = fixture_all_equipments();
    store.systems = fixture_systems();
    store.all_systems = fixture_all_systems();
    Json(json!({"status": "ok", "imported": "all"}))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}
