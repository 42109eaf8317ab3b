use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::serde_helpers::{null_as_default, string_or_number};

/// Vehicle available for assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "_id", alias = "id", with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Vehicle {
    /// Display name, falling back to the id.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
    }
}

/// Role tag carried by crew records on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrewRole {
    Driver,
    Conductor,
    #[serde(other)]
    Other,
}

/// Crew record as served by `GET /crew`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewRecord {
    #[serde(rename = "_id", alias = "id", with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default::deserialize", default)]
    pub name: String,
    pub role: CrewRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conductor {
    pub id: String,
    pub name: String,
}

/// Crew list split by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrewRoster {
    pub drivers: Vec<Driver>,
    pub conductors: Vec<Conductor>,
}

impl CrewRoster {
    /// Splits flat crew records into drivers and conductors, keeping server
    /// order. Records with any other role are dropped.
    pub fn from_records(records: impl IntoIterator<Item = CrewRecord>) -> Self {
        let mut roster = Self::default();
        for record in records {
            match record.role {
                CrewRole::Driver => roster.drivers.push(Driver {
                    id: record.id,
                    name: record.name,
                }),
                CrewRole::Conductor => roster.conductors.push(Conductor {
                    id: record.id,
                    name: record.name,
                }),
                CrewRole::Other => debug!(id = %record.id, "Skipping crew member with unknown role"),
            }
        }
        roster
    }
}
