//! Monthly averaging and CSV output.

use crate::{PricesError, PricesResult};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::debug;

/// One raw observation; several may share a period (one per region or sector).
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// `YYYY-MM`
    pub period: String,
    pub value: Option<f64>,
}

/// Mean price per month, keyed by the first day of the month.
pub type MonthlyPrices = BTreeMap<NaiveDate, f64>;

/// Group by period and average. Missing values are skipped; a month with no
/// values at all is dropped.
pub fn monthly_mean(observations: &[Observation]) -> PricesResult<MonthlyPrices> {
    let mut sums: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for obs in observations {
        let month = parse_period(&obs.period)?;
        let entry = sums.entry(month).or_insert((0.0, 0));
        if let Some(v) = obs.value {
            entry.0 += v;
            entry.1 += 1;
        }
    }
    Ok(sums
        .into_iter()
        .filter_map(|(month, (sum, n))| {
            if n == 0 {
                debug!(%month, "no values for period, dropped");
                None
            } else {
                Some((month, sum / n as f64))
            }
        })
        .collect())
}

fn parse_period(period: &str) -> PricesResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d").map_err(|source| {
        PricesError::Period {
            period: period.to_string(),
            source,
        }
    })
}

/// Write `period,<value_header>` rows, oldest first.
pub fn write_price_csv<W: Write>(
    writer: W,
    value_header: &str,
    prices: &MonthlyPrices,
) -> PricesResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["period", value_header])?;
    for (month, price) in prices {
        wtr.write_record([month.format("%Y-%m-%d").to_string(), price.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(period: &str, value: Option<f64>) -> Observation {
        Observation {
            period: period.to_string(),
            value,
        }
    }

    #[test]
    fn averages_per_month() {
        let prices = monthly_mean(&[
            obs("2020-02", Some(3.0)),
            obs("2020-01", Some(2.0)),
            obs("2020-01", Some(4.0)),
            obs("2020-01", None),
            obs("2020-03", None),
        ])
        .unwrap();
        let jan = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let feb = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[&jan], 3.0);
        assert_eq!(prices[&feb], 3.0);
        assert_eq!(prices.keys().next(), Some(&jan));
    }

    #[test]
    fn bad_period() {
        assert!(matches!(
            monthly_mean(&[obs("2020-13", Some(1.0))]),
            Err(PricesError::Period { .. })
        ));
    }

    #[test]
    fn csv_layout() {
        let prices = monthly_mean(&[obs("2023-11", Some(14.5)), obs("2023-12", Some(15.25))]).unwrap();
        let mut buf = Vec::new();
        write_price_csv(&mut buf, "price ¢/kWh", &prices).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "period,price ¢/kWh\n2023-11-01,14.5\n2023-12-01,15.25\n"
        );
    }
}
