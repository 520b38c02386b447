//! Query parameters for the EIA v2 API.
//!
//! The API takes its query as JSON in the `X-Params` header, so the request is
//! a plain serde struct.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRequest {
    pub frequency: String,
    pub data: Vec<String>,
    pub facets: BTreeMap<String, Vec<String>>,
    pub start: String,
    pub end: String,
    pub sort: Vec<SortSpec>,
    pub offset: u32,
    pub length: u32,
}

impl PriceRequest {
    /// Monthly series of `field`, 2020-01 through 2023-12, oldest first.
    pub fn monthly(field: &str, facet: &str, value: &str) -> Self {
        Self {
            frequency: "monthly".to_string(),
            data: vec![field.to_string()],
            facets: BTreeMap::from([(facet.to_string(), vec![value.to_string()])]),
            start: "2020-01".to_string(),
            end: "2023-12".to_string(),
            sort: vec![SortSpec {
                column: "period".to_string(),
                direction: "asc".to_string(),
            }],
            offset: 0,
            length: 5000,
        }
    }

    /// Industrial natural gas price.
    pub fn natural_gas() -> Self {
        Self::monthly("value", "process", "PIN")
    }

    /// Retail electricity price, all sectors.
    pub fn electricity() -> Self {
        Self::monthly("price", "sectorid", "ALL")
    }

    pub fn with_range(mut self, start: &str, end: &str) -> Self {
        self.start = start.to_string();
        self.end = end.to_string();
        self
    }

    /// Field holding the observation value.
    pub fn value_field(&self) -> &str {
        self.data.first().map(String::as_str).unwrap_or("value")
    }

    pub fn to_header(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The two series used for site economics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSeries {
    NaturalGas,
    Electricity,
}

impl PriceSeries {
    pub const ALL: [PriceSeries; 2] = [PriceSeries::NaturalGas, PriceSeries::Electricity];

    pub fn route(self) -> &'static str {
        match self {
            PriceSeries::NaturalGas => "natural-gas/pri/sum/data",
            PriceSeries::Electricity => "electricity/retail-sales/data",
        }
    }

    pub fn request(self) -> PriceRequest {
        match self {
            PriceSeries::NaturalGas => PriceRequest::natural_gas(),
            PriceSeries::Electricity => PriceRequest::electricity(),
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            PriceSeries::NaturalGas => "gas_prices.csv",
            PriceSeries::Electricity => "electricity_prices.csv",
        }
    }

    /// CSV header of the value column, with units.
    pub fn value_header(self) -> &'static str {
        match self {
            PriceSeries::NaturalGas => "value $/MCF",
            PriceSeries::Electricity => "price ¢/kWh",
        }
    }
}
