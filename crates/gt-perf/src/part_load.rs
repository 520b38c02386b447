//! Part load performance.
//!
//! Part load corrections are measured relative to the ISO reference point, so
//! the calculation runs two independent aggregation passes:
//!
//! 1. base load at the reference ambient (T = 59 °F, RH = 60 %)
//! 2. load corrections at the reference temperature, indexed by the load
//!    fraction rescaled with the reference output coefficient
//!
//! and applies the second on top of the first.

use crate::base_load::base_load_with;
use crate::coeffs::compute_coeffs_with;
use crate::error::PerfResult;
use crate::nameplate::Nameplate;
use crate::record::PerformanceRecord;
use gt_core::CoefficientIndex;
use gt_tables::{AmbientConditions, Extrapolate, RELATIVE_HUMIDITY, TEMPERATURE, TableCollection};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartLoadSettings {
    /// Ambient column holding the load fraction
    pub load_column: String,
    /// ISO reference temperature [°F]
    pub reference_temperature: f64,
    /// ISO reference relative humidity [%]
    pub reference_humidity: f64,
    /// Groups whose output coefficient rescales the load fraction
    pub iso_groups: Vec<String>,
    pub extrapolate: Extrapolate,
}

impl Default for PartLoadSettings {
    fn default() -> Self {
        Self {
            load_column: "PartLoad".to_string(),
            reference_temperature: 59.0,
            reference_humidity: 60.0,
            iso_groups: vec![TEMPERATURE.to_string(), RELATIVE_HUMIDITY.to_string()],
            extrapolate: Extrapolate::Error,
        }
    }
}

/// Performance at the load fraction in `settings.load_column`.
///
/// # Errors
/// - `MissingGroup` if `tables` lacks one of `settings.iso_groups`
/// - `MissingColumn` if `ambient` lacks the load column
/// - any table error from either aggregation pass
pub fn part_load(
    tables: &TableCollection,
    part_tables: &TableCollection,
    ambient: &AmbientConditions,
    nameplate: &Nameplate,
    settings: &PartLoadSettings,
) -> PerfResult<PerformanceRecord> {
    info!(
        model = %nameplate.model,
        rows = ambient.len(),
        load_column = %settings.load_column,
        "computing part load performance"
    );

    let mut reference = ambient.clone();
    reference.set_constant(TEMPERATURE, settings.reference_temperature);
    reference.set_constant(RELATIVE_HUMIDITY, settings.reference_humidity);

    let mut record = base_load_with(tables, &reference, nameplate, settings.extrapolate)?;

    let iso_keys: Vec<&str> = settings.iso_groups.iter().map(String::as_str).collect();
    let iso_tables = tables.subset(&iso_keys)?;
    let iso = compute_coeffs_with(&iso_tables, &reference, settings.extrapolate)?;
    reference.scale_column(&settings.load_column, iso.get(CoefficientIndex::A))?;
    debug!(
        scaled = ?reference.column(&settings.load_column).ok(),
        "load fraction rescaled at reference conditions"
    );

    let load_view = reference.select(&[settings.load_column.as_str(), TEMPERATURE])?;
    let load_coeffs = compute_coeffs_with(part_tables, &load_view, settings.extrapolate)?;
    record.apply(&load_coeffs)?;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_load::base_load;
    use crate::error::PerfError;
    use gt_tables::{Table, TableError, TableGroup};

    fn grid(rows: Vec<f64>, cols: Vec<f64>, f: impl Fn(f64, f64) -> f64) -> Table {
        let values = rows
            .iter()
            .map(|r| cols.iter().map(|c| f(*r, *c)).collect())
            .collect();
        Table::two_d_numeric(rows, cols, values).unwrap()
    }

    /// T and RH groups scaling output, both exactly 1 at the ISO point.
    fn ambient_tables() -> TableCollection {
        let t = TableGroup::new()
            .with("TA", Table::one_d_numeric(vec![0.0, 120.0], vec![1.0, 1.0]).unwrap())
            .unwrap();
        let rh = TableGroup::new()
            .with(
                "RHA",
                grid(vec![0.0, 60.0, 100.0], vec![0.0, 59.0, 120.0], |rh, t| {
                    1.0 + (60.0 - rh) * 0.001 + (59.0 - t) * 0.002
                }),
            )
            .unwrap()
            .with(
                "RHD",
                grid(vec![0.0, 100.0], vec![0.0, 120.0], |_, t| t - 59.0),
            )
            .unwrap();
        TableCollection::new()
            .with_group("T", t)
            .unwrap()
            .with_group("RH", rh)
            .unwrap()
    }

    fn identity_part_tables() -> TableCollection {
        let mut g = TableGroup::new();
        for (name, v) in [
            ("PartLoadA", 1.0),
            ("PartLoadB", 1.0),
            ("PartLoadC", 1.0),
            ("PartLoadD", 0.0),
            ("PartLoadE", 1.0),
        ] {
            g.insert(name, grid(vec![0.0, 120.0], vec![0.0, 120.0], |_, _| v))
                .unwrap();
        }
        TableCollection::new().with_group("PartLoad", g).unwrap()
    }

    fn ambient(load: Vec<f64>, t: Vec<f64>, rh: Vec<f64>) -> AmbientConditions {
        AmbientConditions::from_columns([("PartLoad", load), ("T", t), ("RH", rh)]).unwrap()
    }

    #[test]
    fn iso_point_with_identity_tables_is_base_load() {
        let np = Nameplate::ge_7e03();
        let amb = ambient(vec![100.0, 80.0], vec![59.0, 59.0], vec![60.0, 60.0]);
        let part = part_load(
            &ambient_tables(),
            &identity_part_tables(),
            &amb,
            &np,
            &PartLoadSettings::default(),
        )
        .unwrap();
        let base = base_load(&ambient_tables(), &amb, &np).unwrap();
        assert_eq!(part, base);
        assert_eq!(part.column(CoefficientIndex::A), [90_000.0; 2]);
    }

    #[test]
    fn ambient_temperature_is_overridden() {
        let np = Nameplate::ge_7e03();
        let hot = ambient(vec![100.0], vec![100.0], vec![20.0]);
        let iso = ambient(vec![100.0], vec![59.0], vec![60.0]);
        let settings = PartLoadSettings::default();
        let a = part_load(&ambient_tables(), &identity_part_tables(), &hot, &np, &settings).unwrap();
        let b = part_load(&ambient_tables(), &identity_part_tables(), &iso, &np, &settings).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn load_corrections_follow_load_fraction() {
        // output proportional to load, heat rate rising at low load
        let g = TableGroup::new()
            .with(
                "PartLoadA",
                grid(vec![0.0, 100.0], vec![0.0, 120.0], |load, _| load / 100.0),
            )
            .unwrap()
            .with(
                "PartLoadB",
                grid(vec![0.0, 100.0], vec![0.0, 120.0], |load, _| 2.0 - load / 100.0),
            )
            .unwrap()
            .with(
                "PartLoadD",
                grid(vec![0.0, 100.0], vec![0.0, 120.0], |load, _| load - 100.0),
            )
            .unwrap();
        let part_tables = TableCollection::new().with_group("PartLoad", g).unwrap();
        let np = Nameplate::ge_7e03();
        let amb = ambient(vec![50.0], vec![80.0], vec![30.0]);
        let rec = part_load(&ambient_tables(), &part_tables, &amb, &np, &PartLoadSettings::default())
            .unwrap();
        assert!((rec.column(CoefficientIndex::A)[0] - 45_000.0).abs() < 1e-6);
        assert!((rec.column(CoefficientIndex::B)[0] - 1.5 * 10_664.0).abs() < 1e-6);
        assert!((rec.column(CoefficientIndex::D)[0] - 960.0).abs() < 1e-9);
        assert_eq!(rec.column(CoefficientIndex::E), [1_079_000.0]);
    }

    #[test]
    fn missing_iso_group() {
        let only_t = ambient_tables().subset(&["T"]).unwrap();
        let amb = ambient(vec![100.0], vec![59.0], vec![60.0]);
        let err = part_load(
            &only_t,
            &identity_part_tables(),
            &amb,
            &Nameplate::default(),
            &PartLoadSettings::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            PerfError::Tables(TableError::MissingGroup { group: "RH".into() })
        );
    }

    #[test]
    fn missing_load_column() {
        let amb = AmbientConditions::from_columns([("T", vec![59.0])]).unwrap();
        let err = part_load(
            &ambient_tables(),
            &identity_part_tables(),
            &amb,
            &Nameplate::default(),
            &PartLoadSettings::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.table_error(),
            Some(&TableError::MissingColumn { column: "PartLoad".into() })
        );
    }

    #[test]
    fn settings_defaults_from_partial_yaml() {
        let settings: PartLoadSettings =
            serde_json::from_str(r#"{"load_column": "Load", "extrapolate": "clamp"}"#).unwrap();
        assert_eq!(settings.load_column, "Load");
        assert_eq!(settings.reference_temperature, 59.0);
        assert_eq!(settings.iso_groups, ["T", "RH"]);
        assert_eq!(settings.extrapolate, Extrapolate::Clamp);
    }
}
