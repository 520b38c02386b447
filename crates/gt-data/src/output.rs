//! Performance CSV output.

use crate::DataResult;
use gt_perf::PerformanceRecord;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write `record` as CSV: the row label, then Output, Heat Rate, Heat
/// Consumption, Exhaust Temperature and Exhaust Flow.
pub fn write_performance<W: Write>(writer: W, record: &PerformanceRecord) -> DataResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if record.is_empty() {
        let mut header = vec![""];
        header.extend(PerformanceRecord::headers());
        wtr.write_record(&header)?;
    }
    for row in record.rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_performance_csv(path: &Path, record: &PerformanceRecord) -> DataResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    write_performance(file, record)?;
    info!(path = %path.display(), rows = record.len(), "performance written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_perf::{Coefficients, Nameplate};

    fn render(rows: usize) -> String {
        let index: Vec<String> = (0..rows).map(|i| format!("r{i}")).collect();
        let rec = PerformanceRecord::from_coefficients(
            &Nameplate::ge_7e03(),
            &Coefficients::identity(rows),
            &index,
        )
        .unwrap();
        let mut buf = Vec::new();
        write_performance(&mut buf, &rec).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_and_rows() {
        let text = render(2);
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            ",Output,Heat Rate,Heat Consumption,Exhaust Temperature,Exhaust Flow"
        );
        assert_eq!(lines.next().unwrap(), "r0,90000.0,10664.0,959760000.0,1010.0,1079000.0");
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn empty_record_still_has_header() {
        let text = render(0);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with(",Output"));
    }
}
