use crate::chat::flatten_description;
use crate::protocol::server::status::ServerStatus;
use serde_json::Value;
use std::time::Duration;

pub const NO_DESCRIPTION: &str = "No description";
pub const UNKNOWN_VERSION: &str = "Unknown";

/// The parts of a status response the bot actually shows.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSummary {
    pub version: String,
    pub online: u64,
    pub max: u64,
    pub sample: Vec<String>,
    pub description: String,
    pub favicon: Option<Vec<u8>>,
}

impl StatusSummary {
    pub fn from_status(status: &ServerStatus) -> Self {
        let json = status.json();
        let players = &json["players"];

        let description = match json.get("description") {
            Some(description) => flatten_description(description).trim().to_string(),
            None => String::new(),
        };

        StatusSummary {
            version: json["version"]["name"]
                .as_str()
                .unwrap_or(UNKNOWN_VERSION)
                .to_string(),
            online: players["online"].as_u64().unwrap_or(0),
            max: players["max"].as_u64().unwrap_or(0),
            sample: player_sample(&players["sample"]),
            description: if description.is_empty() {
                NO_DESCRIPTION.to_string()
            } else {
                description
            },
            favicon: json["favicon"].as_str().and_then(decode_favicon),
        }
    }
}

fn player_sample(sample: &Value) -> Vec<String> {
    sample
        .as_array()
        .map(|players| {
            players
                .iter()
                .filter_map(|player| player["name"].as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Decodes a `data:image/png;base64,...` favicon into raw PNG bytes.
pub fn decode_favicon(favicon: &str) -> Option<Vec<u8>> {
    let (_, data) = favicon.split_once(',')?;
    base64::decode(data.trim()).ok()
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LatencyTier {
    Offline,
    Extreme,
    VeryHigh,
    High,
    Moderate,
    Fair,
    Low,
}

impl LatencyTier {
    pub fn from_latency(latency: Option<Duration>) -> Self {
        let Some(latency) = latency else {
            return LatencyTier::Offline;
        };

        let ms = latency.as_secs_f64() * 1000.0;
        if ms > 500.0 {
            LatencyTier::Extreme
        } else if ms > 400.0 {
            LatencyTier::VeryHigh
        } else if ms > 300.0 {
            LatencyTier::High
        } else if ms > 200.0 {
            LatencyTier::Moderate
        } else if ms > 100.0 {
            LatencyTier::Fair
        } else {
            LatencyTier::Low
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            LatencyTier::Offline => "⚫",
            LatencyTier::Extreme => "🟥",
            LatencyTier::VeryHigh => "🔴",
            LatencyTier::High => "🟧",
            LatencyTier::Moderate => "🟠",
            LatencyTier::Fair => "🟡",
            LatencyTier::Low => "🟢",
        }
    }
}

pub fn format_latency(latency: Option<Duration>) -> String {
    match latency {
        Some(latency) => format!("{:.0}ms", latency.as_secs_f64() * 1000.0),
        None => "Offline".to_string(),
    }
}
