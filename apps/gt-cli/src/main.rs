use clap::{Parser, Subcommand, ValueEnum};
use gt_app::{AppResult, table_service};
use gt_core::CoefficientIndex;
use gt_perf::{Nameplate, PartLoadSettings, PerformanceRecord};
use gt_tables::Extrapolate;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gt-cli")]
#[command(about = "Gas turbine performance from correction tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the correction tables in a workbook or directory of workbooks
    Inspect {
        /// Workbook (.xlsx, .yaml or directory of .csv sheets) or directory of workbooks
        tables: PathBuf,
    },
    /// Print the aggregated A-E coefficients for each ambient row
    Coeffs {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Base load performance
    BaseLoad {
        #[command(flatten)]
        inputs: Inputs,
        /// Nameplate YAML file (defaults to GE 7E.03)
        #[arg(long)]
        nameplate: Option<PathBuf>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Part load performance relative to the ISO reference point
    PartLoad {
        #[command(flatten)]
        inputs: Inputs,
        /// Part load correction tables
        #[arg(long)]
        part_tables: PathBuf,
        /// Ambient column holding the load percentage
        #[arg(long, default_value = "PartLoad")]
        load_column: String,
        /// Nameplate YAML file (defaults to GE 7E.03)
        #[arg(long)]
        nameplate: Option<PathBuf>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a study file
    Run {
        /// Path to the study YAML file
        study_path: PathBuf,
    },
    /// Download monthly gas and electricity prices (needs EIA_API_KEY)
    Prices {
        /// Directory for gas_prices.csv and electricity_prices.csv
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// First month, YYYY-MM
        #[arg(long, requires = "end")]
        start: Option<String>,
        /// Last month, YYYY-MM
        #[arg(long, requires = "start")]
        end: Option<String>,
    },
}

#[derive(clap::Args)]
struct Inputs {
    /// Correction tables: workbook or directory of workbooks
    #[arg(long)]
    tables: PathBuf,
    /// Ambient conditions CSV
    #[arg(long)]
    ambient: PathBuf,
    /// Ambient column holding the row labels
    #[arg(long)]
    index_column: Option<String>,
    /// Policy for ambient values outside a table's grid
    #[arg(long, value_enum, default_value_t = ExtrapolateArg::Error)]
    extrapolate: ExtrapolateArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExtrapolateArg {
    Error,
    Clamp,
    Linear,
}

impl From<ExtrapolateArg> for Extrapolate {
    fn from(arg: ExtrapolateArg) -> Self {
        match arg {
            ExtrapolateArg::Error => Extrapolate::Error,
            ExtrapolateArg::Clamp => Extrapolate::Clamp,
            ExtrapolateArg::Linear => Extrapolate::Linear,
        }
    }
}

fn main() -> AppResult<()> {
    // Logs go to stderr so CSV on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { tables } => cmd_inspect(&tables),
        Commands::Coeffs { inputs } => cmd_coeffs(&inputs),
        Commands::BaseLoad {
            inputs,
            nameplate,
            output,
        } => cmd_base_load(&inputs, nameplate.as_deref(), output.as_deref()),
        Commands::PartLoad {
            inputs,
            part_tables,
            load_column,
            nameplate,
            output,
        } => cmd_part_load(
            &inputs,
            &part_tables,
            load_column,
            nameplate.as_deref(),
            output.as_deref(),
        ),
        Commands::Run { study_path } => cmd_run(&study_path),
        Commands::Prices {
            out_dir,
            start,
            end,
        } => cmd_prices(&out_dir, start.as_deref().zip(end.as_deref())),
    }
}

fn cmd_inspect(tables: &Path) -> AppResult<()> {
    let collection = table_service::load_tables(tables)?;
    let summaries = table_service::summarize_tables(&collection);
    if summaries.is_empty() {
        println!("No tables found");
        return Ok(());
    }
    println!("Tables in {}:", tables.display());
    for s in summaries {
        let note = if s.probe { " (temperature probe, not applied)" } else { "" };
        println!(
            "  {}/{} - family {} -> {} ({}x{}){}",
            s.group,
            s.name,
            s.family,
            s.coefficient.quantity_name(),
            s.shape.0,
            s.shape.1,
            note
        );
    }
    println!("Ambient columns needed: {}", collection.required_columns().join(", "));
    Ok(())
}

fn cmd_coeffs(inputs: &Inputs) -> AppResult<()> {
    let ambient = table_service::load_ambient(&inputs.ambient, inputs.index_column.as_deref())?;
    let coeffs = gt_app::coefficient_table(&inputs.tables, &ambient, inputs.extrapolate.into())?;

    let mut csv = String::from(",A,B,C,D,E\n");
    for (row, label) in ambient.index().iter().enumerate() {
        let values: Vec<String> = CoefficientIndex::ALL
            .iter()
            .map(|idx| coeffs.get(*idx)[row].to_string())
            .collect();
        csv.push_str(&format!("{},{}\n", label, values.join(",")));
    }
    print!("{}", csv);
    Ok(())
}

fn load_nameplate(path: Option<&Path>) -> AppResult<Nameplate> {
    match path {
        Some(p) => Ok(gt_data::load_nameplate_yaml(p)?),
        None => Ok(Nameplate::ge_7e03()),
    }
}

fn cmd_base_load(inputs: &Inputs, nameplate: Option<&Path>, output: Option<&Path>) -> AppResult<()> {
    let tables = table_service::load_tables(&inputs.tables)?;
    let ambient = table_service::load_ambient(&inputs.ambient, inputs.index_column.as_deref())?;
    let nameplate = load_nameplate(nameplate)?;
    let record = gt_perf::base_load_with(&tables, &ambient, &nameplate, inputs.extrapolate.into())?;
    emit(&record, output)
}

fn cmd_part_load(
    inputs: &Inputs,
    part_tables: &Path,
    load_column: String,
    nameplate: Option<&Path>,
    output: Option<&Path>,
) -> AppResult<()> {
    let tables = table_service::load_tables(&inputs.tables)?;
    let part_tables = table_service::load_tables(part_tables)?;
    let ambient = table_service::load_ambient(&inputs.ambient, inputs.index_column.as_deref())?;
    let nameplate = load_nameplate(nameplate)?;
    let settings = PartLoadSettings {
        load_column,
        extrapolate: inputs.extrapolate.into(),
        ..PartLoadSettings::default()
    };
    let record = gt_perf::part_load(&tables, &part_tables, &ambient, &nameplate, &settings)?;
    emit(&record, output)
}

fn emit(record: &PerformanceRecord, output: Option<&Path>) -> AppResult<()> {
    if let Some(path) = output {
        gt_data::write_performance_csv(path, record)?;
        println!("✓ Wrote {} rows to {}", record.len(), path.display());
    } else {
        gt_data::write_performance(io::stdout().lock(), record)?;
    }
    Ok(())
}

fn cmd_run(study_path: &Path) -> AppResult<()> {
    eprintln!("Running study: {}", study_path.display());
    let response = gt_app::run_study(study_path)?;
    if response.output.is_some() {
        report_run(&response, &mut io::stdout().lock(), io::sink())
    } else {
        report_run(&response, &mut io::stderr().lock(), io::stdout().lock())
    }
}

/// Summary lines go to `status`; the CSV goes to `csv_out` unless the study
/// already wrote it to a file.
fn report_run<S: Write, C: Write>(
    response: &gt_app::RunResponse,
    status: &mut S,
    csv_out: C,
) -> AppResult<()> {
    writeln!(
        status,
        "✓ {} ({:?}): {} rows in {} batch(es), {:.3}s",
        response.study,
        response.mode,
        response.record.len(),
        response.batches,
        response.elapsed_s
    )?;
    match &response.output {
        Some(path) => writeln!(status, "  Output: {}", path.display())?,
        None => gt_data::write_performance(csv_out, &response.record)?,
    }
    Ok(())
}

fn cmd_prices(out_dir: &Path, range: Option<(&str, &str)>) -> AppResult<()> {
    let client = gt_prices::EiaClient::from_env()?;
    let written = gt_app::download_prices(&client, out_dir, range)?;
    for path in written {
        println!("✓ Wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_app::{RunResponse, StudyMode};
    use gt_perf::Coefficients;

    fn response(output: Option<PathBuf>) -> RunResponse {
        let index = vec!["2023-01".to_string(), "2023-02".to_string()];
        let record =
            PerformanceRecord::from_coefficients(&Nameplate::ge_7e03(), &Coefficients::identity(2), &index)
                .unwrap();
        RunResponse {
            study: "site".to_string(),
            mode: StudyMode::BaseLoad,
            record,
            output,
            batches: 1,
            finished_at: chrono::Utc::now(),
            elapsed_s: 0.01,
        }
    }

    #[test]
    fn run_csv_on_stdout_carries_no_status_lines() {
        let mut status = Vec::new();
        let mut csv = Vec::new();
        report_run(&response(None), &mut status, &mut csv).unwrap();

        let csv = String::from_utf8(csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(",Output"), "{csv}");
        assert!(lines[1].starts_with("2023-01,90000"), "{csv}");
        assert!(!csv.contains('✓'));

        let status = String::from_utf8(status).unwrap();
        assert!(status.starts_with("✓ site (BaseLoad): 2 rows"), "{status}");
    }

    #[test]
    fn run_with_output_file_reports_path_only() {
        let mut status = Vec::new();
        let mut csv = Vec::new();
        report_run(&response(Some(PathBuf::from("out/p.csv"))), &mut status, &mut csv).unwrap();
        assert!(csv.is_empty());
        assert!(String::from_utf8(status).unwrap().contains("Output: out/p.csv"));
    }
}
