//! Energy price download.

use std::fs;
use std::path::{Path, PathBuf};

use gt_prices::{EiaClient, PriceSeries, monthly_mean, write_price_csv};
use tracing::info;

use crate::error::AppResult;

/// Fetch every price series and write one CSV per series into `out_dir`.
///
/// Returns the written paths in series order.
pub fn download_prices(
    client: &EiaClient,
    out_dir: &Path,
    range: Option<(&str, &str)>,
) -> AppResult<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();
    for series in PriceSeries::ALL {
        let mut request = series.request();
        if let Some((start, end)) = range {
            request = request.with_range(start, end);
        }
        let observations = client.fetch(series.route(), &request)?;
        let prices = monthly_mean(&observations)?;
        let path = out_dir.join(series.file_name());
        write_price_csv(fs::File::create(&path)?, series.value_header(), &prices)?;
        info!(path = %path.display(), months = prices.len(), "prices written");
        written.push(path);
    }
    Ok(written)
}
