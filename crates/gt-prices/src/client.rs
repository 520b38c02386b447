//! Blocking EIA v2 client.

use crate::aggregate::Observation;
use crate::request::PriceRequest;
use crate::{PricesError, PricesResult};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "EIA_API_KEY";

const BASE_URL: &str = "https://api.eia.gov/v2";

#[derive(Debug, Clone)]
pub struct EiaClient {
    api_key: String,
    base_url: String,
}

impl EiaClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Key from `EIA_API_KEY`.
    pub fn from_env() -> PricesResult<Self> {
        std::env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.is_empty())
            .map(Self::new)
            .ok_or(PricesError::MissingApiKey { var: API_KEY_VAR })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn url(&self, route: &str) -> String {
        format!(
            "{}/{}?api_key={}",
            self.base_url.trim_end_matches('/'),
            route.trim_start_matches('/'),
            self.api_key
        )
    }

    /// GET `route` with `request` in the `X-Params` header.
    pub fn fetch(&self, route: &str, request: &PriceRequest) -> PricesResult<Vec<Observation>> {
        let params = request.to_header()?;
        info!(route, start = %request.start, end = %request.end, "requesting price series");
        let body = ureq::get(&self.url(route))
            .set("X-Params", &params)
            .call()?
            .into_string()?;
        let observations = parse_observations(&body, request.value_field())?;
        debug!(route, count = observations.len(), "price observations received");
        Ok(observations)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    response: ResponseBody,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    data: Vec<serde_json::Map<String, Value>>,
}

/// Extract `(period, value)` pairs from an API response body.
///
/// Values arrive as numbers, numeric strings or null; nulls are kept as
/// missing observations.
pub fn parse_observations(body: &str, field: &str) -> PricesResult<Vec<Observation>> {
    let envelope: Envelope = serde_json::from_str(body)?;
    envelope
        .response
        .data
        .iter()
        .map(|row| -> PricesResult<Observation> {
            let period = row
                .get("period")
                .and_then(Value::as_str)
                .ok_or_else(|| PricesError::Response {
                    what: "observation without a period".to_string(),
                })?
                .to_string();
            let value = match row.get(field) {
                None | Some(Value::Null) => None,
                Some(Value::Number(n)) => n.as_f64(),
                Some(Value::String(s)) => Some(s.trim().parse::<f64>().map_err(|_| {
                    PricesError::Response {
                        what: format!("period {period}: '{s}' is not a number"),
                    }
                })?),
                Some(other) => {
                    return Err(PricesError::Response {
                        what: format!("period {period}: unexpected {field} value {other}"),
                    });
                }
            };
            Ok(Observation { period, value })
        })
        .collect()
}
