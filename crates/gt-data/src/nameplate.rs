use crate::{DataResult, ensure_exists};
use gt_perf::Nameplate;
use std::path::Path;

/// Load and validate a nameplate YAML file.
pub fn load_nameplate_yaml(path: &Path) -> DataResult<Nameplate> {
    ensure_exists(path)?;
    let content = std::fs::read_to_string(path)?;
    let nameplate: Nameplate = serde_yaml::from_str(&content)?;
    nameplate.validate()?;
    Ok(nameplate)
}
