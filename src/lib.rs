use std::{
    path::{Path, PathBuf},
    time::Instant,
};

pub use cli::{
    ConversionCLIParser, ConversionTarget, PlotCLIParser, ThresholdCLIParser, ThresholdMode,
    USAGE_EXIT_CODE,
};
pub use error::Error;
use graymap::{read_pgm_file, write_pgm_file};
use threshold::{
    threshold_parallel, threshold_serial, ParallelLayout, ThresholdParams, ThresholdSource,
};
use timing::ThresholdReport;

mod cli;
pub mod conversion;
mod error;
pub mod graymap;
pub mod integral;
mod logger;
pub mod speedup;
pub mod threshold;
pub mod timing;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct ThresholdArguments {
    input_file: PathBuf,
    output_file: PathBuf,
    window_size: u32,
    offset: i32,
    timing_log_file: PathBuf,
    /// `(processes, threads)`, absent for the serial program
    workers: Option<(usize, usize)>,
}

pub struct ConversionArguments {
    input_file: PathBuf,
    output_file: PathBuf,
    target: ConversionTarget,
    quality: u8,
}

impl ConversionArguments {
    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }
}

pub struct PlotArguments {
    benchmark_file: PathBuf,
    output_directory: PathBuf,
}

/// Reads the input graymap, times the thresholding pass, writes the result
/// and appends the timing to the CSV log. A failing log write is only a
/// warning.
pub fn run_threshold(arguments: &ThresholdArguments) -> Result<ThresholdReport> {
    let params = ThresholdParams::new(arguments.window_size, arguments.offset)?;
    let layout = arguments
        .workers
        .map(|(processes, threads)| ParallelLayout::new(processes, threads))
        .transpose()?;
    log::info!("Reading '{}'", arguments.input_file.display());
    let source = ThresholdSource::new(read_pgm_file(&arguments.input_file)?);
    let (width, height) = (source.image().width(), source.image().height());
    log::debug!(
        "Thresholding {}x{} image with {:?} and layout {:?}",
        width,
        height,
        params,
        layout
    );

    let start = Instant::now();
    let output = match &layout {
        None => threshold_serial(&source, &params)?,
        Some(layout) => threshold_parallel(&source, &params, layout)?,
    };
    let elapsed = start.elapsed();

    log::info!("Writing '{}'", arguments.output_file.display());
    write_pgm_file(&arguments.output_file, &output)?;
    let report = ThresholdReport {
        width,
        height,
        params,
        layout,
        elapsed,
    };
    if let Err(e) = report.append_to_log(&arguments.timing_log_file) {
        log::warn!("Timing was not logged: {}", e);
    }
    Ok(report)
}

pub fn run_conversion(arguments: &ConversionArguments) -> Result<()> {
    log::info!(
        "Converting '{}' to '{}'",
        arguments.input_file.display(),
        arguments.output_file.display()
    );
    match arguments.target {
        ConversionTarget::Jpeg => conversion::convert_to_jpeg(
            &arguments.input_file,
            &arguments.output_file,
            arguments.quality,
        ),
        ConversionTarget::Graymap => {
            conversion::convert_to_pgm(&arguments.input_file, &arguments.output_file)
        }
    }
}

/// Returns the path of the written chart.
pub fn run_plot(arguments: &PlotArguments) -> Result<PathBuf> {
    speedup::plot_speedup(&arguments.benchmark_file, &arguments.output_directory)
}
