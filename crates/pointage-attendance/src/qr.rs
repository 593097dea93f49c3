//! Location QR payloads
//!
//! A location QR code carries a small JSON object:
//!
//! ```json
//! {"locationId":"hq-1","locationName":"Siège","companyId":"acme","timestamp":1717000000000}
//! ```

use chrono::{DateTime, TimeZone, Utc};
use pointage_core::PhysicalTimeEffects;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Largest magnitude a float timestamp may have and still fit an `i64`
const MAX_FLOAT_MILLIS: f64 = 9.2e18;

/// Decoded content of a location QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    /// Stable location identifier
    pub location_id: String,
    /// Human-readable location name
    pub location_name: String,
    /// Owning company
    pub company_id: String,
    /// Generation time, milliseconds since the Unix epoch
    #[serde(deserialize_with = "millis_from_number")]
    pub timestamp: i64,
}

impl QrPayload {
    /// Payload for a location, stamped with the current time
    pub async fn for_location(
        location_id: impl Into<String>,
        location_name: impl Into<String>,
        company_id: impl Into<String>,
        clock: &dyn PhysicalTimeEffects,
    ) -> Self {
        let now = clock.physical_time().await;
        Self {
            location_id: location_id.into(),
            location_name: location_name.into(),
            company_id: company_id.into(),
            timestamp: i64::try_from(now.ts_ms).unwrap_or(i64::MAX),
        }
    }

    /// Decode scanned text. `None` unless it is a JSON object with every
    /// field present and the string fields non-empty.
    pub fn parse(raw: &str) -> Option<Self> {
        let payload: Self = match serde_json::from_str(raw) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(error = %e, "QR payload rejected");
                return None;
            }
        };
        let complete = !payload.location_id.is_empty()
            && !payload.location_name.is_empty()
            && !payload.company_id.is_empty();
        complete.then_some(payload)
    }

    /// Whether `raw` decodes as a payload
    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_some()
    }

    /// JSON text to embed in a QR code
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Generation time as a datetime
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

/// Any JSON number as whole milliseconds. Fractions are truncated.
fn millis_from_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(ms) = number.as_i64() {
        return Ok(ms);
    }
    number
        .as_f64()
        .filter(|ms| ms.is_finite() && ms.abs() < MAX_FLOAT_MILLIS)
        .map(|ms| ms.trunc() as i64)
        .ok_or_else(|| de::Error::custom(format!("timestamp {number} out of range")))
}

impl fmt::Display for QrPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
