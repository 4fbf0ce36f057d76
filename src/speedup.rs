use std::path::{Path, PathBuf};

use crate::Error;

pub mod chart;
pub mod table;

pub use chart::render_speedup_chart;
pub use table::{BenchmarkRecord, SpeedupRow, SpeedupTable};

pub const DEFAULT_BENCHMARK_PATH: &str = "results/timing_matrix_small.csv";
const CHART_FILE_PREFIX: &str = "speedup_vs_configuration_";
const CHART_FILE_EXTENSION: &str = "png";

/// Chart file name for a benchmark table, e.g. `timing_matrix_small.csv`
/// becomes `speedup_vs_configuration_small.png`.
pub fn chart_file_name(benchmark_path: &Path) -> crate::Result<String> {
    let stem = benchmark_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| Error::InvalidBenchmarkPath(benchmark_path.display().to_string()))?;
    let tag = stem.rsplit('_').next().unwrap_or(stem);
    Ok(format!(
        "{}{}.{}",
        CHART_FILE_PREFIX, tag, CHART_FILE_EXTENSION
    ))
}

/// Loads the benchmark table, computes speedups and renders the chart into
/// `output_directory`. Returns the path of the written chart.
pub fn plot_speedup(benchmark_path: &Path, output_directory: &Path) -> crate::Result<PathBuf> {
    let chart_path = output_directory.join(chart_file_name(benchmark_path)?);
    let records = table::read_benchmark_records(benchmark_path)?;
    log::info!(
        "Loaded {} benchmark rows from '{}'",
        records.len(),
        benchmark_path.display()
    );
    let table = SpeedupTable::from_records(records)?;
    render_speedup_chart(&table, &chart_path)?;
    Ok(chart_path)
}
