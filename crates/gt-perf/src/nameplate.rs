//! Turbine nameplate ratings.

use crate::error::{PerfError, PerfResult};
use gt_core::{CoefficientIndex, ensure_finite};
use serde::{Deserialize, Serialize};

/// Rated performance of one turbine model at reference conditions.
///
/// Units follow the vendor data sheets the correction tables are published
/// against: kW, kJ/kWh (LHV), °F and kg/h.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nameplate {
    pub model: String,
    /// Net output [kW]
    pub output_kw: f64,
    /// Heat rate [kJ/kWh], LHV
    pub heat_rate_kj_per_kwh: f64,
    /// Heat consumption [kJ/h]; output × heat rate when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_consumption_kj_per_h: Option<f64>,
    /// Exhaust temperature [°F]
    pub exhaust_temperature_f: f64,
    /// Exhaust flow [kg/h]
    pub exhaust_flow_kg_per_h: f64,
}

impl Nameplate {
    /// GE 7E.03 simple cycle data sheet.
    pub fn ge_7e03() -> Self {
        Self {
            model: "GE 7E.03".to_string(),
            output_kw: 90_000.0,
            heat_rate_kj_per_kwh: 10_664.0,
            heat_consumption_kj_per_h: None,
            exhaust_temperature_f: 1_010.0,
            exhaust_flow_kg_per_h: 1_079_000.0,
        }
    }

    pub fn heat_consumption(&self) -> f64 {
        self.heat_consumption_kj_per_h
            .unwrap_or(self.output_kw * self.heat_rate_kj_per_kwh)
    }

    /// Rated value the coefficient in slot `idx` corrects.
    pub fn rating(&self, idx: CoefficientIndex) -> f64 {
        match idx {
            CoefficientIndex::A => self.output_kw,
            CoefficientIndex::B => self.heat_rate_kj_per_kwh,
            CoefficientIndex::C => self.heat_consumption(),
            CoefficientIndex::D => self.exhaust_temperature_f,
            CoefficientIndex::E => self.exhaust_flow_kg_per_h,
        }
    }

    pub fn validate(&self) -> PerfResult<()> {
        for idx in CoefficientIndex::ALL {
            let value = ensure_finite(self.rating(idx), idx.quantity_name())
                .map_err(|e| PerfError::Nameplate { what: e.to_string() })?;
            // exhaust temperature is an offset-corrected reading and may be any value
            if idx != CoefficientIndex::D && value <= 0.0 {
                return Err(PerfError::Nameplate {
                    what: format!("{} rating must be positive, got {value}", idx.quantity_name()),
                });
            }
        }
        Ok(())
    }
}

impl Default for Nameplate {
    fn default() -> Self {
        Self::ge_7e03()
    }
}
