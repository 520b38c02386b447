//! Coefficient aggregation.

use crate::error::{PerfError, PerfResult};
use gt_core::CoefficientIndex;
use gt_tables::{
    AmbientConditions, Extrapolate, Query, TEMPERATURE, Table, TableCollection, TableError,
    TableName, multi_interp,
};
use tracing::{debug, trace, warn};

/// The five correction coefficients, one value per ambient row.
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    values: [Vec<f64>; 5],
}

impl Coefficients {
    /// A, B, C, E = 1 and D = 0 for every row.
    pub fn identity(rows: usize) -> Self {
        Self {
            values: CoefficientIndex::ALL.map(|idx| vec![idx.combination().identity(); rows]),
        }
    }

    /// Number of ambient rows.
    pub fn len(&self) -> usize {
        self.values[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, idx: CoefficientIndex) -> &[f64] {
        &self.values[idx.position()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (CoefficientIndex, &[f64])> {
        CoefficientIndex::ALL
            .into_iter()
            .map(|idx| (idx, self.get(idx)))
    }

    /// Fold per-row corrections into slot `idx` using its combination rule.
    pub fn combine(&mut self, idx: CoefficientIndex, corrections: &[f64]) -> PerfResult<()> {
        let slot = &mut self.values[idx.position()];
        if corrections.len() != slot.len() {
            return Err(TableError::Shape {
                what: format!("corrections for coefficient {idx}"),
                expected: slot.len(),
                actual: corrections.len(),
            }
            .into());
        }
        let rule = idx.combination();
        for (acc, c) in slot.iter_mut().zip(corrections) {
            *acc = rule.apply(*acc, *c);
        }
        Ok(())
    }
}

/// [`compute_coeffs_with`] under the strict out-of-grid policy.
pub fn compute_coeffs(
    tables: &TableCollection,
    ambient: &AmbientConditions,
) -> PerfResult<Coefficients> {
    compute_coeffs_with(tables, ambient, Extrapolate::Error)
}

/// Interpolate every table in `tables` at `ambient` and aggregate.
///
/// Each table is looked up against `(ambient[family], ambient["T"])` and its
/// values are folded into the slot named by its last letter: added for D,
/// multiplied otherwise. Tables whose names start with `T` are evaluated
/// against temperature alone and then dropped; they never change a
/// coefficient, but their lookup errors still propagate.
///
/// # Errors
/// `PerfError::Table` naming the table for missing ambient columns, shape
/// mismatches, non-numeric axes and out-of-grid points.
pub fn compute_coeffs_with(
    tables: &TableCollection,
    ambient: &AmbientConditions,
    extrapolate: Extrapolate,
) -> PerfResult<Coefficients> {
    let mut coeffs = Coefficients::identity(ambient.len());
    if tables.is_empty() {
        warn!("empty table collection, coefficients stay at identity");
        return Ok(coeffs);
    }

    for (group, name, table) in tables.tables() {
        let corrections = evaluate_table(name, table, ambient, extrapolate)
            .map_err(|source| PerfError::Table {
                group: group.to_string(),
                table: name.to_string(),
                source,
            })?;

        match corrections {
            Some(values) => {
                trace!(group, table = %name, index = %name.index(), "applying correction");
                coeffs.combine(name.index(), &values)?;
            }
            None => {
                debug!(group, table = %name, "temperature probe evaluated, not applied");
            }
        }
    }

    Ok(coeffs)
}

/// Corrections for one table, or `None` for a temperature probe.
fn evaluate_table(
    name: &TableName,
    table: &Table,
    ambient: &AmbientConditions,
    extrapolate: Extrapolate,
) -> Result<Option<Vec<f64>>, TableError> {
    let temperature = ambient.column(TEMPERATURE)?;
    if name.is_temperature_probe() {
        multi_interp(table, &Query::vector(temperature.to_vec()), extrapolate)?;
        return Ok(None);
    }
    let family = ambient.column(name.family())?;
    let query = Query::pairs(family, temperature)?;
    multi_interp(table, &query, extrapolate).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_tables::TableGroup;

    fn pressure_table() -> Table {
        Table::two_d_numeric(
            vec![0.0, 50.0, 100.0],
            vec![50.0, 100.0],
            vec![vec![0.90, 0.80], vec![1.00, 0.90], vec![1.10, 1.00]],
        )
        .unwrap()
    }

    fn ambient(p: f64, t: f64) -> AmbientConditions {
        AmbientConditions::from_columns([("P", vec![p]), ("T", vec![t])]).unwrap()
    }

    #[test]
    fn identity_layout() {
        let id = Coefficients::identity(2);
        assert_eq!(id.get(CoefficientIndex::A), [1.0, 1.0]);
        assert_eq!(id.get(CoefficientIndex::D), [0.0, 0.0]);
        assert_eq!(id.len(), 2);
        assert_eq!(id.iter().count(), 5);
    }

    #[test]
    fn combine_uses_slot_rule() {
        let mut c = Coefficients::identity(1);
        c.combine(CoefficientIndex::B, &[0.5]).unwrap();
        c.combine(CoefficientIndex::B, &[0.5]).unwrap();
        c.combine(CoefficientIndex::D, &[3.0]).unwrap();
        c.combine(CoefficientIndex::D, &[-1.0]).unwrap();
        assert_eq!(c.get(CoefficientIndex::B), [0.25]);
        assert_eq!(c.get(CoefficientIndex::D), [2.0]);
        assert!(c.combine(CoefficientIndex::A, &[1.0, 2.0]).is_err());
    }

    #[test]
    fn empty_collection_is_identity() {
        let c = compute_coeffs(&TableCollection::new(), &ambient(10.0, 60.0)).unwrap();
        assert_eq!(c, Coefficients::identity(1));
    }

    #[test]
    fn temperature_probe_is_a_no_op() {
        let probe = Table::one_d_numeric(vec![50.0, 100.0], vec![1.0, 1.0]).unwrap();
        let tables = TableCollection::new()
            .with_group("T", TableGroup::new().with("TA", probe).unwrap())
            .unwrap();
        let c = compute_coeffs(&tables, &AmbientConditions::from_columns([("T", vec![75.0])]).unwrap())
            .unwrap();
        assert_eq!(c.get(CoefficientIndex::A), [1.0]);

        // a probe that would scale heavily still changes nothing
        let probe = Table::one_d_numeric(vec![50.0, 100.0], vec![3.0, 5.0]).unwrap();
        let tables = TableCollection::new()
            .with_group("T", TableGroup::new().with("TB", probe).unwrap())
            .unwrap();
        let c = compute_coeffs(&tables, &AmbientConditions::from_columns([("T", vec![75.0])]).unwrap())
            .unwrap();
        assert_eq!(c, Coefficients::identity(1));
    }

    #[test]
    fn temperature_probe_errors_still_propagate() {
        let probe = Table::one_d_numeric(vec![50.0, 100.0], vec![1.0, 1.0]).unwrap();
        let tables = TableCollection::new()
            .with_group("T", TableGroup::new().with("TA", probe).unwrap())
            .unwrap();
        let err = compute_coeffs(&tables, &AmbientConditions::from_columns([("T", vec![120.0])]).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            PerfError::Table { ref table, source: TableError::OutOfBounds { .. }, .. } if table == "TA"
        ));
    }

    #[test]
    fn two_d_table_scales_a_bilinearly() {
        let tables = TableCollection::new()
            .with_group("P", TableGroup::new().with("PA", pressure_table()).unwrap())
            .unwrap();
        let c = compute_coeffs(&tables, &ambient(25.0, 75.0)).unwrap();
        // rows 0/50 at 25 -> 0.95 (T=50) and 0.85 (T=100); T=75 -> 0.90
        assert!((c.get(CoefficientIndex::A)[0] - 0.90).abs() < 1e-12);
        assert_eq!(c.get(CoefficientIndex::B), [1.0]);
    }

    #[test]
    fn d_tables_add() {
        let offset = Table::two_d_numeric(
            vec![0.0, 100.0],
            vec![50.0, 100.0],
            vec![vec![-10.0, -10.0], vec![10.0, 10.0]],
        )
        .unwrap();
        let tables = TableCollection::new()
            .with_group(
                "P",
                TableGroup::new()
                    .with("PD", offset.clone())
                    .unwrap(),
            )
            .unwrap()
            .with_group("P2", TableGroup::new().with("PD", offset).unwrap())
            .unwrap();
        let c = compute_coeffs(&tables, &ambient(75.0, 60.0)).unwrap();
        assert!((c.get(CoefficientIndex::D)[0] - 10.0).abs() < 1e-12);
    }

    #[test]
    fn missing_family_column_names_table() {
        let tables = TableCollection::new()
            .with_group("RH", TableGroup::new().with("RHA", pressure_table()).unwrap())
            .unwrap();
        let err = compute_coeffs(&tables, &ambient(25.0, 75.0)).unwrap_err();
        match err {
            PerfError::Table { group, table, source } => {
                assert_eq!(group, "RH");
                assert_eq!(table, "RHA");
                assert_eq!(source, TableError::MissingColumn { column: "RH".into() });
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn one_d_non_probe_table_is_invalid_input() {
        let series = Table::one_d_numeric(vec![0.0, 100.0], vec![1.0, 1.0]).unwrap();
        let tables = TableCollection::new()
            .with_group("P", TableGroup::new().with("PA", series).unwrap())
            .unwrap();
        let err = compute_coeffs(&tables, &ambient(25.0, 75.0)).unwrap_err();
        assert!(matches!(err.table_error(), Some(TableError::InvalidInput { .. })));
    }

    #[test]
    fn clamp_policy_reaches_tables() {
        let tables = TableCollection::new()
            .with_group("P", TableGroup::new().with("PA", pressure_table()).unwrap())
            .unwrap();
        assert!(compute_coeffs(&tables, &ambient(150.0, 100.0)).is_err());
        let c = compute_coeffs_with(&tables, &ambient(150.0, 100.0), Extrapolate::Clamp).unwrap();
        assert_eq!(c.get(CoefficientIndex::A), [1.0]);
    }
}
