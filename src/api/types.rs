//! Wire types for the analytics backend.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of the championship standings.
///
/// Created by the backend and read-only here. Views refetch the whole list
/// on every mount instead of patching individual records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub driver_id: String,
    pub name: String,
    pub team: String,
    /// Championship position, 1 = leader.
    pub position: u32,
    pub points: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    /// Permanent car number. The backend sends it as a string and uses
    /// `"N/A"` when a driver has none.
    #[serde(
        default,
        deserialize_with = "deserialize_car_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<String>,
}

impl Driver {
    /// Car number if known, else the championship position.
    pub fn display_number(&self) -> String {
        self.number
            .clone()
            .unwrap_or_else(|| self.position.to_string())
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

fn deserialize_car_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("n/a") {
                None
            } else {
                Some(s.to_string())
            }
        }
        _ => None,
    })
}

/// Request body for `POST /api/pit-wall/chat`.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
    pub session_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a str>,
}

/// Response body from `POST /api/pit-wall/chat`.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatReply {
    pub response: String,
    #[allow(dead_code)]
    pub session_id: String,
}

/// Response body from `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// A completed race from `GET /api/races/recent`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Race {
    pub season: String,
    pub round: String,
    pub race_name: String,
    pub circuit_name: String,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    /// Classification rows, passed through in the upstream results format.
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

impl Race {
    /// Name of the classified winner, if the results carry one.
    pub fn winner(&self) -> Option<String> {
        let first = self
            .results
            .iter()
            .find(|row| row.get("position").and_then(|p| p.as_str()) == Some("1"))
            .or_else(|| self.results.first())?;
        let driver = first.get("Driver")?;
        let given = driver.get("givenName")?.as_str()?;
        let family = driver.get("familyName")?.as_str()?;
        Some(format!("{given} {family}"))
    }
}
