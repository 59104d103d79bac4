//! Devices registered with the cloud account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A device linked to the signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub pub_id: String,
    pub name: String,
    #[serde(default)]
    pub os: String,
    #[serde(default, alias = "device_model")]
    pub hardware_model: String,
    #[serde(default)]
    pub used_storage: u64,
    #[serde(default)]
    pub storage_size: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Device {
    /// Share of storage in use, 0..=1
    pub fn storage_ratio(&self) -> f64 {
        if self.storage_size == 0 {
            return 0.0;
        }
        (self.used_storage as f64 / self.storage_size as f64).min(1.0)
    }

    pub fn storage_label(&self) -> String {
        format!(
            "{} of {}",
            human_bytes(self.used_storage),
            human_bytes(self.storage_size)
        )
    }

    pub fn last_seen_label(&self) -> String {
        match self.updated_at.or(self.created_at) {
            Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
            None => "never".to_string(),
        }
    }
}

fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_device() {
        let json = r#"{
            "pub_id": "d-1",
            "name": "Laptop",
            "os": "Linux",
            "device_model": "MacBookPro",
            "used_storage": 536870912,
            "storage_size": 1073741824,
            "created_at": "2024-01-02T03:04:05Z",
            "updated_at": null
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.hardware_model, "MacBookPro");
        assert_eq!(device.storage_ratio(), 0.5);
        assert_eq!(device.storage_label(), "512.0 MB of 1.0 GB");
        assert_eq!(device.last_seen_label(), "2024-01-02 03:04");
    }

    #[test]
    fn test_unknown_size_is_empty() {
        let device: Device =
            serde_json::from_str(r#"{"pub_id":"d","name":"n","created_at":null,"updated_at":null}"#)
                .unwrap();
        assert_eq!(device.storage_ratio(), 0.0);
        assert_eq!(device.storage_label(), "0 B of 0 B");
        assert_eq!(device.last_seen_label(), "never");
    }
}
