//! Domain DTOs and filter enumerations for the War Track Dashboard API.
//!
//! # Design
//! These types mirror the upstream API's JSON schema but are defined
//! independently of the mock-server crate. Filter dimensions (`Country`,
//! `EquipmentType`, `Status`) are closed Rust enums whose serde
//! representation is the lowercase wire token, so an out-of-vocabulary
//! filter value is unrepresentable at the call site. Integration tests
//! catch any schema drift between the two crates.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A country tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Ukraine,
    Russia,
}

impl Country {
    /// Canonical lowercase query-string token.
    pub fn as_str(self) -> &'static str {
        match self {
            Country::Ukraine => "ukraine",
            Country::Russia => "russia",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ukraine" => Ok(Country::Ukraine),
            "russia" => Ok(Country::Russia),
            other => Err(UnknownToken::new("country", other)),
        }
    }
}

/// Equipment category recognized by the dashboard's loss tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentType {
    Tanks,
    Afvs,
    Ifvs,
    Apcs,
    Artillery,
    Mlrs,
    Aircraft,
    Helicopters,
    Drones,
    Naval,
    Vehicles,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 11] = [
        EquipmentType::Tanks,
        EquipmentType::Afvs,
        EquipmentType::Ifvs,
        EquipmentType::Apcs,
        EquipmentType::Artillery,
        EquipmentType::Mlrs,
        EquipmentType::Aircraft,
        EquipmentType::Helicopters,
        EquipmentType::Drones,
        EquipmentType::Naval,
        EquipmentType::Vehicles,
    ];

    /// Canonical lowercase query-string token.
    pub fn as_str(self) -> &'static str {
        match self {
            EquipmentType::Tanks => "tanks",
            EquipmentType::Afvs => "afvs",
            EquipmentType::Ifvs => "ifvs",
            EquipmentType::Apcs => "apcs",
            EquipmentType::Artillery => "artillery",
            EquipmentType::Mlrs => "mlrs",
            EquipmentType::Aircraft => "aircraft",
            EquipmentType::Helicopters => "helicopters",
            EquipmentType::Drones => "drones",
            EquipmentType::Naval => "naval",
            EquipmentType::Vehicles => "vehicles",
        }
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownToken::new("type", s))
    }
}

/// Outcome recorded for a single weapon-system observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Destroyed,
    Abandoned,
    Captured,
    Damaged,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Destroyed,
        Status::Abandoned,
        Status::Captured,
        Status::Damaged,
    ];

    /// Canonical lowercase query-string token.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Destroyed => "destroyed",
            Status::Abandoned => "abandoned",
            Status::Captured => "captured",
            Status::Damaged => "damaged",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownToken::new("status", s))
    }
}

/// Error for a string that is not a member of one of the closed enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownToken {
    pub field: &'static str,
    pub token: String,
}

impl UnknownToken {
    fn new(field: &'static str, token: &str) -> Self {
        Self {
            field,
            token: token.to_string(),
        }
    }
}

impl fmt::Display for UnknownToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} token: {:?}", self.field, self.token)
    }
}

impl std::error::Error for UnknownToken {}

/// One dated observation of equipment losses for a country/type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: u64,
    pub country: Country,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    pub destroyed: u64,
    pub abandoned: u64,
    pub captured: u64,
    pub damaged: u64,
    pub total: u64,
    pub date: NaiveDate,
}

/// Aggregate (non-dated) equipment-loss totals per country/type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllEquipment {
    pub id: u64,
    pub country: Country,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    pub destroyed: u64,
    pub abandoned: u64,
    pub captured: u64,
    pub damaged: u64,
    pub total: u64,
}

/// One dated observation of a named weapon system's status.
///
/// Unlike [`Equipment`] this is a single-status fact, not a multi-count
/// aggregate: one system, one outcome, one source link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct System {
    pub id: u64,
    pub country: Country,
    pub system: String,
    pub status: Status,
    pub url: String,
    pub date: NaiveDate,
}

/// Aggregate per-status totals for a named weapon system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllSystem {
    pub id: u64,
    pub country: Country,
    pub system: String,
    pub destroyed: u64,
    pub abandoned: u64,
    pub captured: u64,
    pub damaged: u64,
    pub total: u64,
}

/// A `{key, value}` pair from the type-listing endpoints: the wire token and
/// its human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub key: String,
    pub value: String,
}

/// Raw response mapping of import/health operations, returned unchanged.
pub type StatusMap = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_tokens_roundtrip() {
        for c in [Country::Ukraine, Country::Russia] {
            assert_eq!(c.as_str().parse::<Country>().unwrap(), c);
        }
    }

    #[test]
    fn equipment_type_tokens_are_unique_and_lowercase() {
        let mut seen = std::collections::HashSet::new();
        for t in EquipmentType::ALL {
            let token = t.as_str();
            assert_eq!(token, token.to_lowercase());
            assert!(seen.insert(token), "duplicate token {token}");
            assert_eq!(token.parse::<EquipmentType>().unwrap(), t);
        }
    }

    #[test]
    fn status_tokens_are_unique_and_lowercase() {
        let mut seen = std::collections::HashSet::new();
        for s in Status::ALL {
            let token = s.as_str();
            assert_eq!(token, token.to_lowercase());
            assert!(seen.insert(token), "duplicate token {token}");
            assert_eq!(token.parse::<Status>().unwrap(), s);
        }
    }

    #[test]
    fn serde_token_matches_as_str() {
        let json = serde_json::to_value(EquipmentType::Helicopters).unwrap();
        assert_eq!(json, "helicopters");
        let json = serde_json::to_value(Country::Russia).unwrap();
        assert_eq!(json, "russia");
        let json = serde_json::to_value(Status::Captured).unwrap();
        assert_eq!(json, "captured");
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = "bicycles".parse::<EquipmentType>().unwrap_err();
        assert_eq!(err.field, "type");
        assert_eq!(err.token, "bicycles");
    }

    #[test]
    fn equipment_deserializes_from_wire_shape() {
        let body = r#"{"id":1,"country":"ukraine","type":"tanks","destroyed":5,
            "abandoned":1,"captured":0,"damaged":2,"total":8,"date":"2024-01-01"}"#;
        let eq: Equipment = serde_json::from_str(body).unwrap();
        assert_eq!(eq.country, Country::Ukraine);
        assert_eq!(eq.equipment_type, EquipmentType::Tanks);
        assert_eq!(eq.total, 8);
        assert_eq!(eq.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn system_deserializes_from_wire_shape() {
        let body = r#"{"id":7,"country":"russia","system":"T-90M","status":"destroyed",
            "url":"https://example.com/evidence/7","date":"2024-03-15"}"#;
        let sys: System = serde_json::from_str(body).unwrap();
        assert_eq!(sys.system, "T-90M");
        assert_eq!(sys.status, Status::Destroyed);
    }

    #[test]
    fn equipment_roundtrips_through_json() {
        let eq = Equipment {
            id: 3,
            country: Country::Russia,
            equipment_type: EquipmentType::Artillery,
            destroyed: 10,
            abandoned: 2,
            captured: 1,
            damaged: 0,
            total: 13,
            date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        };
        let json = serde_json::to_string(&eq).unwrap();
        assert!(json.contains(r#""type":"artillery""#));
        let back: Equipment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, eq);
    }
}
