//! Fixed set of broadcast topics.
//!
//! Topics are known at design time, one per monitored metric or table.
//! The wire names are the event names the dashboard listens for.

use serde::{Deserialize, Serialize};

/// Named channel identifying an event's semantic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// NOC room temperature.
    NocTemperature,
    /// NOC room relative humidity.
    NocHumidity,
    /// UPS room temperature.
    UpsTemperature,
    /// UPS room relative humidity.
    UpsHumidity,
    /// Full latest electrical-metrics row.
    ElectricalData,
    /// Full latest fire/smoke-detection row.
    FireSmokeData,
    /// Five most recent door-access entries.
    AccessLogs,
}

impl Topic {
    /// Wire name of this topic.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NocTemperature => "noc_temperature",
            Self::NocHumidity => "noc_humidity",
            Self::UpsTemperature => "ups_temperature",
            Self::UpsHumidity => "ups_humidity",
            Self::ElectricalData => "electrical_data",
            Self::FireSmokeData => "fire_smoke_data",
            Self::AccessLogs => "access_logs",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_stable() {
        assert_eq!(Topic::NocTemperature.as_str(), "noc_temperature");
        assert_eq!(Topic::UpsHumidity.as_str(), "ups_humidity");
        assert_eq!(Topic::ElectricalData.as_str(), "electrical_data");
        assert_eq!(Topic::FireSmokeData.as_str(), "fire_smoke_data");
        assert_eq!(Topic::AccessLogs.as_str(), "access_logs");
    }

    #[test]
    fn serde_matches_as_str() {
        let Ok(json) = serde_json::to_string(&Topic::NocHumidity) else {
            panic!("topic should serialize");
        };
        assert_eq!(json, "\"noc_humidity\"");
    }
}
