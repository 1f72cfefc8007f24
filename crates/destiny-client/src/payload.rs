//! The flat JSON object posted to both collection webhooks.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use destiny_shared::constants::UNSPECIFIED_NAME;
use destiny_shared::DeviceToken;
use destiny_store::UserRecord;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    /// Local wall-clock time of the submission, `YYYY/M/D HH:MM:SS`.
    pub timestamp: String,
    pub birth_date: String,
    /// Full name of the resolved mansion.
    pub constellation: String,
    /// `[ID:<device token>] <client metadata>`
    pub device: String,
    pub user_name: String,
}

impl Payload {
    pub fn build(
        record: &UserRecord,
        constellation: &str,
        device: &DeviceToken,
        client: &ClientMetadata,
    ) -> Self {
        Self {
            timestamp: human_timestamp(record.timestamp),
            birth_date: record.birth_date.to_string(),
            constellation: constellation.to_string(),
            device: format!("[ID:{device}] {}", client.describe()),
            user_name: record
                .display_name()
                .unwrap_or(UNSPECIFIED_NAME)
                .to_string(),
        }
    }
}

/// What the client can say about itself, standing in for a browser UA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMetadata {
    pub product: String,
    pub version: String,
    pub os: String,
    pub arch: String,
}

impl ClientMetadata {
    pub fn detect() -> Self {
        Self {
            product: "destiny-client".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    pub fn describe(&self) -> String {
        format!("{}/{} ({}; {})", self.product, self.version, self.os, self.arch)
    }
}

fn human_timestamp(epoch_millis: i64) -> String {
    match Local.timestamp_millis_opt(epoch_millis).single() {
        Some(dt) => dt.format("%Y/%-m/%-d %H:%M:%S").to_string(),
        None => epoch_millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use destiny_shared::{BirthDate, ConstellationId};
    use destiny_store::Enrichment;

    fn client() -> ClientMetadata {
        ClientMetadata {
            product: "destiny-client".into(),
            version: "0.1.0".into(),
            os: "linux".into(),
            arch: "x86_64".into(),
        }
    }

    fn record(name: Option<&str>) -> UserRecord {
        UserRecord {
            birth_date: BirthDate::from_ymd(1992, 2, 29).unwrap(),
            constellation_id: ConstellationId(12),
            timestamp: Local
                .with_ymd_and_hms(2025, 1, 5, 9, 3, 7)
                .unwrap()
                .timestamp_millis(),
            enrichment: Enrichment::new(name.map(String::from), vec![], None),
        }
    }

    #[test]
    fn builds_flat_payload() {
        let token = DeviceToken::from_stored("dev_abc_123").unwrap();
        let payload = Payload::build(&record(Some("Wang Fang")), "室火猪", &token, &client());

        assert_eq!(payload.timestamp, "2025/1/5 09:03:07");
        assert_eq!(payload.birth_date, "1992-02-29");
        assert_eq!(payload.constellation, "室火猪");
        assert_eq!(
            payload.device,
            "[ID:dev_abc_123] destiny-client/0.1.0 (linux; x86_64)"
        );
        assert_eq!(payload.user_name, "Wang Fang");
    }

    #[test]
    fn missing_name_uses_sentinel() {
        let token = DeviceToken::from_stored("dev_x").unwrap();
        let payload = Payload::build(&record(None), "室火猪", &token, &client());
        assert_eq!(payload.user_name, "unspecified");
    }

    #[test]
    fn serializes_with_wire_names() {
        let token = DeviceToken::from_stored("dev_x").unwrap();
        let json = serde_json::to_value(Payload::build(&record(None), "室火猪", &token, &client()))
            .unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 5);
        for key in ["timestamp", "birthDate", "constellation", "device", "userName"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn detect_reports_this_build() {
        let meta = ClientMetadata::detect();
        assert_eq!(meta.os, std::env::consts::OS);
        assert!(meta.describe().starts_with("destiny-client/"));
    }
}
