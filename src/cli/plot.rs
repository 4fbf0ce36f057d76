use clap::{arg, value_parser, Arg, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

use super::{create_base_command, exit_on_parse_error};
use crate::speedup::DEFAULT_BENCHMARK_PATH;
use crate::PlotArguments;

const PROGRAM_NAME: &str = "generate_plot";

pub struct PlotCLIParser {
    command: Command,
}

impl PlotCLIParser {
    pub fn new() -> Self {
        let command = create_base_command(PROGRAM_NAME)
            .arg(Self::create_benchmark_file_argument())
            .arg(Self::create_output_directory_argument());
        PlotCLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> PlotArguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.try_parse(itr)
            .unwrap_or_else(|e| exit_on_parse_error(e, None))
    }

    pub fn try_parse<I, T>(&mut self, itr: I) -> Result<PlotArguments, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.try_get_matches_from_mut(itr)?;
        Ok(Self::extract_arguments(&matches))
    }

    fn create_benchmark_file_argument() -> Arg {
        Arg::new("benchmark_file")
            .help("CSV timing log with mpi_processes, omp_threads and time_seconds columns")
            .value_parser(value_parser!(PathBuf))
            .default_value(DEFAULT_BENCHMARK_PATH)
    }

    fn create_output_directory_argument() -> Arg {
        arg!(output_directory: -o --output_dir <DIR> "Directory the chart is written to")
            .value_parser(value_parser!(PathBuf))
            .default_value(".")
    }

    fn extract_arguments(matches: &ArgMatches) -> PlotArguments {
        PlotArguments {
            benchmark_file: matches
                .get_one::<PathBuf>("benchmark_file")
                .expect("Benchmark file has a default value, but was unset.")
                .clone(),
            output_directory: matches
                .get_one::<PathBuf>("output_directory")
                .expect("Output directory has a default value, but was unset.")
                .clone(),
        }
    }
}

impl Default for PlotCLIParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::PlotCLIParser;

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn no_arguments_use_defaults() {
        let mut cli_parser = PlotCLIParser::default();
        let arguments = cli_parser.try_parse(vec![PROGRAM_NAME_ARGUMENT]).unwrap();
        assert_eq!(
            arguments.benchmark_file.to_str().unwrap(),
            "results/timing_matrix_small.csv"
        );
        assert_eq!(arguments.output_directory.to_str().unwrap(), ".");
    }

    #[test]
    fn explicit_file_and_directory() {
        let mut cli_parser = PlotCLIParser::default();
        let arguments = cli_parser
            .try_parse(vec![
                PROGRAM_NAME_ARGUMENT,
                "results/timing_matrix_large.csv",
                "--output_dir",
                "charts",
            ])
            .unwrap();
        assert_eq!(
            arguments.benchmark_file.file_name().unwrap(),
            "timing_matrix_large.csv"
        );
        assert_eq!(arguments.output_directory.to_str().unwrap(), "charts");
    }
}
