//! Batch evaluation of time-on-air requests.
//!
//! A request pairs a payload size with a settings record. Each request is
//! evaluated on its own; a failing request yields an error outcome and does
//! not affect the others.

use crate::toa::{self, ToaError, TxSettings};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::time::Duration;

/// One time-on-air request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Payload size in bytes
    pub payload_size: usize,
    pub settings: TxSettings,
}

/// Result of evaluating one [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub payload_size: usize,
    pub result: Result<Duration, ToaError>,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// JSON form: `airtime_ns` and `airtime_ms` on success, `error` on
    /// failure.
    pub fn to_json(&self) -> serde_json::Value {
        match &self.result {
            Ok(airtime) => json!({
                "payload_size": self.payload_size,
                "airtime_ns": u64::try_from(airtime.as_nanos()).unwrap_or(u64::MAX),
                "airtime_ms": airtime.as_secs_f64() * 1000.0,
            }),
            Err(e) => json!({
                "payload_size": self.payload_size,
                "error": e.to_string(),
            }),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(airtime) => write!(f, "{} bytes: {:?}", self.payload_size, airtime),
            Err(e) => write!(f, "{} bytes: error: {}", self.payload_size, e),
        }
    }
}

/// Parse a JSON array of requests.
pub fn parse_requests(json: &str) -> Result<Vec<Request>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn evaluate(request: &Request) -> Outcome {
    Outcome {
        payload_size: request.payload_size,
        result: toa::compute(request.payload_size, &request.settings),
    }
}

/// Evaluate every request, in order.
pub fn evaluate_all(requests: &[Request]) -> Vec<Outcome> {
    requests.iter().map(evaluate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUESTS: &str = r#"[
        {
            "payload_size": 10,
            "settings": {
                "frequency": 868100000,
                "modulation": {"lora": {"spreading_factor": 7, "bandwidth": 125000}},
                "coding_rate": "4/5"
            }
        },
        {
            "payload_size": 200,
            "settings": {
                "frequency": 868300000,
                "modulation": {"fsk": {"bit_rate": 50000}}
            }
        },
        {
            "payload_size": 10,
            "settings": {
                "frequency": 868100000,
                "modulation": {"lora": {"spreading_factor": 7, "bandwidth": 125000}},
                "coding_rate": "1/9"
            }
        }
    ]"#;

    #[test]
    fn test_parse_requests() {
        let requests = parse_requests(REQUESTS).unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].payload_size, 10);
        assert_eq!(
            requests[0].settings,
            TxSettings::lora(868_100_000, 7, 125_000, "4/5")
        );
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_requests(r#"{"payload_size": 10}"#).is_err());
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let outcomes = evaluate_all(&parse_requests(REQUESTS).unwrap());
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].result, Ok(Duration::from_micros(41_216)));
        assert_eq!(outcomes[1].result, Ok(Duration::from_micros(33_760)));
        assert_eq!(
            outcomes[2].result,
            Err(ToaError::InvalidCodingRate("1/9".into()))
        );
        assert!(!outcomes.iter().all(Outcome::is_ok));
    }

    #[test]
    fn test_outcome_json() {
        let ok = Outcome {
            payload_size: 10,
            result: Ok(Duration::from_micros(41_216)),
        };
        let value = ok.to_json();
        assert_eq!(value["payload_size"], 10);
        assert_eq!(value["airtime_ns"], 41_216_000u64);
        assert!(value.get("error").is_none());

        let failed = Outcome {
            payload_size: 10,
            result: Err(ToaError::InvalidBandwidth(0)),
        };
        let value = failed.to_json();
        assert!(value.get("airtime_ns").is_none());
        assert!(value["error"].as_str().unwrap().contains("bandwidth"));
    }

    #[test]
    fn test_outcome_display() {
        let ok = Outcome {
            payload_size: 10,
            result: Ok(Duration::from_micros(41_216)),
        };
        assert_eq!(ok.to_string(), "10 bytes: 41.216ms");

        let failed = Outcome {
            payload_size: 3,
            result: Err(ToaError::UnsupportedModulation),
        };
        assert!(failed.to_string().starts_with("3 bytes: error: "));
    }
}
