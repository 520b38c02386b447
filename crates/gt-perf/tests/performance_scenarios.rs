//! End-to-end performance scenarios over a small multi-group table set.

use gt_core::CoefficientIndex;
use gt_perf::{
    Nameplate, PartLoadSettings, PerfError, base_load, base_load_batches, compute_coeffs,
    part_load, part_load_batches,
};
use gt_tables::{AmbientConditions, Extrapolate, Table, TableCollection, TableError, TableGroup};

fn grid(rows: &[f64], cols: &[f64], f: impl Fn(f64, f64) -> f64) -> Table {
    let values = rows
        .iter()
        .map(|r| cols.iter().map(|c| f(*r, *c)).collect())
        .collect();
    Table::two_d_numeric(rows.to_vec(), cols.to_vec(), values).unwrap()
}

const TEMPS: [f64; 3] = [0.0, 59.0, 120.0];

/// Inlet temperature, humidity and site pressure workbooks.
fn site_tables() -> TableCollection {
    let t = TableGroup::new()
        .with("TA", Table::one_d_numeric(TEMPS.to_vec(), vec![1.1, 1.0, 0.9]).unwrap())
        .unwrap();
    let rh = TableGroup::new()
        .with("RHA", grid(&[0.0, 60.0, 100.0], &TEMPS, |_, _| 1.0))
        .unwrap()
        .with("RHB", grid(&[0.0, 60.0, 100.0], &TEMPS, |rh, _| 1.0 + (rh - 60.0) * 1e-4))
        .unwrap();
    let p = TableGroup::new()
        .with("PA", grid(&[13.0, 14.7], &TEMPS, |p, _| p / 14.7))
        .unwrap()
        .with("PE", grid(&[13.0, 14.7], &TEMPS, |p, _| p / 14.7))
        .unwrap()
        .with("PD", grid(&[13.0, 14.7], &TEMPS, |_, t| (t - 59.0) * 0.5))
        .unwrap();
    TableCollection::new()
        .with_group("T", t)
        .unwrap()
        .with_group("RH", rh)
        .unwrap()
        .with_group("P", p)
        .unwrap()
}

fn site_ambient() -> AmbientConditions {
    let mut ambient = AmbientConditions::with_index(vec![
        "2023-01".into(),
        "2023-02".into(),
        "2023-03".into(),
    ]);
    ambient.insert_column("T", vec![59.0, 90.0, 30.0]).unwrap();
    ambient.insert_column("RH", vec![60.0, 80.0, 20.0]).unwrap();
    ambient.insert_column("P", vec![14.7, 13.0, 14.7]).unwrap();
    ambient.insert_column("PartLoad", vec![100.0, 75.0, 50.0]).unwrap();
    ambient
}

#[test]
fn base_load_over_several_groups() {
    let np = Nameplate::ge_7e03();
    let rec = base_load(&site_tables(), &site_ambient(), &np).unwrap();

    assert_eq!(rec.index(), ["2023-01", "2023-02", "2023-03"]);

    // ISO row: every table is neutral
    assert!((rec.column(CoefficientIndex::A)[0] - 90_000.0).abs() < 1e-6);
    assert!((rec.column(CoefficientIndex::D)[0] - 1_010.0).abs() < 1e-9);

    // low pressure row: output and flow scale with P / 14.7, exhaust offset by (T - 59) / 2
    let ratio = 13.0 / 14.7;
    assert!((rec.column(CoefficientIndex::A)[1] - 90_000.0 * ratio).abs() < 1e-6);
    assert!((rec.column(CoefficientIndex::E)[1] - 1_079_000.0 * ratio).abs() < 1e-4);
    assert!((rec.column(CoefficientIndex::D)[1] - (1_010.0 + 15.5)).abs() < 1e-9);
    assert!(rec.column(CoefficientIndex::B)[1] > 10_664.0);

    // the temperature workbook never changes a coefficient
    let without_t = site_tables().subset(&["RH", "P"]).unwrap();
    let rec_without_t = base_load(&without_t, &site_ambient(), &np).unwrap();
    assert_eq!(rec, rec_without_t);
}

#[test]
fn coefficients_match_record() {
    let coeffs = compute_coeffs(&site_tables(), &site_ambient()).unwrap();
    let rec = base_load(&site_tables(), &site_ambient(), &Nameplate::ge_7e03()).unwrap();
    for (i, c) in coeffs.get(CoefficientIndex::C).iter().enumerate() {
        let expected = 90_000.0 * 10_664.0 * c;
        assert!((rec.column(CoefficientIndex::C)[i] - expected).abs() < 1e-3);
    }
}

#[test]
fn part_load_scales_from_reference_point() {
    let part = TableGroup::new()
        .with(
            "PartLoadA",
            grid(&[0.0, 100.0], &TEMPS, |load, _| load / 100.0),
        )
        .unwrap();
    let part_tables = TableCollection::new().with_group("PartLoad", part).unwrap();
    let ambient = site_ambient().select(&["T", "RH", "P", "PartLoad"]).unwrap();

    let rec = part_load(
        &site_tables(),
        &part_tables,
        &ambient,
        &Nameplate::ge_7e03(),
        &PartLoadSettings::default(),
    )
    .unwrap();

    // reference point replaces T and RH; P still applies per row
    let ratio = 13.0 / 14.7;
    assert!((rec.column(CoefficientIndex::A)[0] - 90_000.0).abs() < 1e-6);
    assert!((rec.column(CoefficientIndex::A)[1] - 90_000.0 * ratio * 0.75).abs() < 1e-6);
    assert!((rec.column(CoefficientIndex::A)[2] - 45_000.0).abs() < 1e-6);
}

#[test]
fn out_of_grid_ambient_reports_table() {
    let mut ambient = site_ambient();
    ambient.set_column("P", vec![14.7, 15.5, 14.7]).unwrap();
    let err = base_load(&site_tables(), &ambient, &Nameplate::ge_7e03()).unwrap_err();
    match err {
        PerfError::Table { group, table, source } => {
            assert_eq!(group, "P");
            assert_eq!(table, "PA");
            assert!(matches!(source, TableError::OutOfBounds { .. }));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn batches_preserve_order() {
    let np = Nameplate::ge_7e03();
    let batches = vec![site_ambient(), site_ambient().select(&["T", "RH", "P"]).unwrap()];
    let records =
        base_load_batches(&site_tables(), &batches, &np, Extrapolate::Error, true).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], records[1]);

    let part_tables = TableCollection::new();
    let err = part_load_batches(
        &site_tables(),
        &part_tables,
        &batches,
        &np,
        &PartLoadSettings::default(),
        true,
    )
    .unwrap_err();
    // the second batch has no load column
    assert!(matches!(err, PerfError::Batch { batch: 1, .. }));
}
