//! Domain model structs persisted in the local database.
//!
//! Every struct derives `Serialize` and `Deserialize`; the JSON field names
//! are camelCase so stored records stay readable by the web build.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use destiny_shared::{BirthDate, ConstellationId};

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Organizational identity supplied by an upstream sign-in, when there is one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Enrichment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Department path, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organization_units: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Enrichment {
    /// Build an enrichment, dropping blank fields.
    pub fn new(
        name: Option<String>,
        organization_units: Vec<String>,
        role: Option<String>,
    ) -> Self {
        Self {
            name: non_blank(name),
            organization_units: organization_units
                .into_iter()
                .filter_map(|u| non_blank(Some(u)))
                .collect(),
            role: non_blank(role),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.organization_units.is_empty() && self.role.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// UserRecord
// ---------------------------------------------------------------------------

/// The visitor's last resolved mansion. One live instance per device; each
/// new submission replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub birth_date: BirthDate,
    pub constellation_id: ConstellationId,
    /// Creation instant, epoch milliseconds.
    pub timestamp: i64,
    #[serde(flatten)]
    pub enrichment: Enrichment,
}

impl UserRecord {
    /// New record stamped with the current time.
    pub fn new(
        birth_date: BirthDate,
        constellation_id: ConstellationId,
        enrichment: Option<Enrichment>,
    ) -> Self {
        Self {
            birth_date,
            constellation_id,
            timestamp: Utc::now().timestamp_millis(),
            enrichment: enrichment.unwrap_or_default(),
        }
    }

    /// Name to report downstream, if the visitor is known.
    pub fn display_name(&self) -> Option<&str> {
        self.enrichment.name.as_deref()
    }
}
