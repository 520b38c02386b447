//! Performance records.

use crate::coeffs::Coefficients;
use crate::error::PerfResult;
use crate::nameplate::Nameplate;
use gt_core::CoefficientIndex;
use gt_core::units::{MassRate, Power, Ratio, Temperature, deg_f, heat_rate_kj_per_kwh, kgph, kw};
use gt_tables::TableError;
use serde::Serialize;

/// Corrected performance, one row per ambient row.
///
/// Columns are Output [kW], Heat Rate [kJ/kWh], Heat Consumption [kJ/h],
/// Exhaust Temperature [°F] and Exhaust Flow [kg/h].
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRecord {
    index: Vec<String>,
    columns: [Vec<f64>; 5],
}

impl PerformanceRecord {
    /// Nameplate ratings combined with `coeffs`: exhaust temperature plus D,
    /// every other rating times its coefficient.
    pub fn from_coefficients(
        nameplate: &Nameplate,
        coeffs: &Coefficients,
        index: &[String],
    ) -> PerfResult<Self> {
        if coeffs.len() != index.len() {
            return Err(TableError::Shape {
                what: "coefficient rows".to_string(),
                expected: index.len(),
                actual: coeffs.len(),
            }
            .into());
        }
        let columns: [Vec<f64>; 5] = CoefficientIndex::ALL.map(|idx| {
            let rating = nameplate.rating(idx);
            let rule = idx.combination();
            coeffs.get(idx).iter().map(|c| rule.apply(rating, *c)).collect()
        });
        Ok(Self {
            index: index.to_vec(),
            columns,
        })
    }

    /// Apply another set of coefficients on top: D adds, the rest multiply.
    pub fn apply(&mut self, coeffs: &Coefficients) -> PerfResult<()> {
        if coeffs.len() != self.len() {
            return Err(TableError::Shape {
                what: "correction rows".to_string(),
                expected: self.len(),
                actual: coeffs.len(),
            }
            .into());
        }
        for (idx, corrections) in coeffs.iter() {
            let rule = idx.combination();
            for (value, c) in self.columns[idx.position()].iter_mut().zip(corrections) {
                *value = rule.apply(*value, *c);
            }
        }
        Ok(())
    }

    /// Stack records row-wise, e.g. the results of ambient batches.
    pub fn concat(records: &[PerformanceRecord]) -> Self {
        let mut out = Self {
            index: Vec::new(),
            columns: Default::default(),
        };
        for rec in records {
            out.index.extend_from_slice(&rec.index);
            for (dst, src) in out.columns.iter_mut().zip(&rec.columns) {
                dst.extend_from_slice(src);
            }
        }
        out
    }

    /// Column headers in output order.
    pub fn headers() -> [&'static str; 5] {
        CoefficientIndex::ALL.map(CoefficientIndex::quantity_name)
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn column(&self, idx: CoefficientIndex) -> &[f64] {
        &self.columns[idx.position()]
    }

    /// Column by quantity name, e.g. `"Heat Rate"`.
    pub fn column_by_name(&self, name: &str) -> Option<&[f64]> {
        CoefficientIndex::ALL
            .into_iter()
            .find(|idx| idx.quantity_name() == name)
            .map(|idx| self.column(idx))
    }

    pub fn row(&self, i: usize) -> Option<PerformanceRow<'_>> {
        let label = self.index.get(i)?;
        Some(PerformanceRow {
            index: label,
            output: self.columns[0][i],
            heat_rate: self.columns[1][i],
            heat_consumption: self.columns[2][i],
            exhaust_temperature: self.columns[3][i],
            exhaust_flow: self.columns[4][i],
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = PerformanceRow<'_>> {
        (0..self.len()).filter_map(|i| self.row(i))
    }
}

/// One row of a [`PerformanceRecord`]; serializes with the output headers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceRow<'a> {
    #[serde(rename = "")]
    pub index: &'a str,
    #[serde(rename = "Output")]
    pub output: f64,
    #[serde(rename = "Heat Rate")]
    pub heat_rate: f64,
    #[serde(rename = "Heat Consumption")]
    pub heat_consumption: f64,
    #[serde(rename = "Exhaust Temperature")]
    pub exhaust_temperature: f64,
    #[serde(rename = "Exhaust Flow")]
    pub exhaust_flow: f64,
}

impl PerformanceRow<'_> {
    pub fn output_power(&self) -> Power {
        kw(self.output)
    }

    /// Heat rate as fuel energy per unit of electrical energy.
    pub fn heat_rate_ratio(&self) -> Ratio {
        heat_rate_kj_per_kwh(self.heat_rate)
    }

    pub fn exhaust_temperature(&self) -> Temperature {
        deg_f(self.exhaust_temperature)
    }

    pub fn exhaust_mass_rate(&self) -> MassRate {
        kgph(self.exhaust_flow)
    }
}
