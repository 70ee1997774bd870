//! Query-parameter assembly: date normalization and filter structs.
//!
//! # Design
//! Everything here is pure data manipulation so it can be tested without a
//! server. Filters collect into `Vec<(String, String)>` pairs in a fixed
//! order; repeated dimensions (`type`, `system`, `status`) emit one pair per
//! value. Date inputs are validated before any request is built: a string
//! must already be strict zero-padded `YYYY-MM-DD`, and a structured date is
//! formatted to that shape.

use chrono::NaiveDate;

use crate::error::Error;
use crate::types::{Country, EquipmentType, Status};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date filter value: either an already-formatted `YYYY-MM-DD` string or a
/// structured [`NaiveDate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Date(NaiveDate),
    Text(String),
}

impl From<NaiveDate> for DateInput {
    fn from(d: NaiveDate) -> Self {
        DateInput::Date(d)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Text(s)
    }
}

impl DateInput {
    /// Normalize to the `YYYY-MM-DD` wire form.
    ///
    /// Text input must round-trip through parsing unchanged, so shapes like
    /// `2024-1-1` or `01-01-2024` are rejected here rather than by the
    /// server.
    pub(crate) fn normalize(
        &self,
        operation: &'static str,
        field: &'static str,
    ) -> Result<String, Error> {
        match self {
            DateInput::Date(d) => Ok(d.format(DATE_FORMAT).to_string()),
            DateInput::Text(s) => {
                let parsed = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
                    Error::Validation {
                        operation,
                        field,
                        message: format!("{s:?} is not a YYYY-MM-DD date: {e}"),
                    }
                })?;
                let canonical = parsed.format(DATE_FORMAT).to_string();
                if canonical != *s {
                    return Err(Error::Validation {
                        operation,
                        field,
                        message: format!("{s:?} is not zero-padded YYYY-MM-DD"),
                    });
                }
                Ok(canonical)
            }
        }
    }
}

/// Optional filters for [`crate::Client::equipments`].
#[derive(Debug, Clone, Default)]
pub struct EquipmentFilter {
    pub types: Vec<EquipmentType>,
    pub date_start: Option<DateInput>,
    pub date_end: Option<DateInput>,
}

/// Optional filters for [`crate::Client::systems`].
#[derive(Debug, Clone, Default)]
pub struct SystemFilter {
    pub systems: Vec<String>,
    pub statuses: Vec<Status>,
    pub date_start: Option<DateInput>,
    pub date_end: Option<DateInput>,
}

/// Ordered accumulator for query-string pairs; unset values are omitted.
#[derive(Debug, Default)]
pub(crate) struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: &str, value: &str) {
        self.0.push((key.to_string(), value.to_string()));
    }

    pub(crate) fn push_country(&mut self, country: Option<Country>) {
        if let Some(c) = country {
            self.push("country", c.as_str());
        }
    }

    pub(crate) fn push_types(&mut self, types: &[EquipmentType]) {
        for t in types {
            self.push("type", t.as_str());
        }
    }

    pub(crate) fn push_systems(&mut self, systems: &[String]) {
        for s in systems {
            self.push("system", s);
        }
    }

    pub(crate) fn push_statuses(&mut self, statuses: &[Status]) {
        for s in statuses {
            self.push("status", s.as_str());
        }
    }

    pub(crate) fn push_date(
        &mut self,
        operation: &'static str,
        key: &'static str,
        value: Option<&DateInput>,
    ) -> Result<(), Error> {
        if let Some(input) = value {
            let normalized = input.normalize(operation, key)?;
            self.push(key, &normalized);
        }
        Ok(())
    }

    pub(crate) fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}
