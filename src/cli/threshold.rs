use clap::{arg, value_parser, Arg, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

use super::{create_base_command, exit_on_parse_error, get_number_of_threads};
use crate::ThresholdArguments;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThresholdMode {
    Serial,
    Parallel,
}

impl ThresholdMode {
    fn program_name(&self) -> &'static str {
        match self {
            Self::Serial => "threshold_serial",
            Self::Parallel => "adaptive-threshold",
        }
    }
}

pub struct ThresholdCLIParser {
    command: Command,
    mode: ThresholdMode,
}

impl ThresholdCLIParser {
    pub fn new(mode: ThresholdMode) -> Self {
        let command = create_base_command(mode.program_name())
            .after_help("Example: input.pgm output.pgm 31 10 results.csv");
        let command = Self::register_arguments(command, mode);
        ThresholdCLIParser { command, mode }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> ThresholdArguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.try_parse(itr)
            .unwrap_or_else(|e| exit_on_parse_error(e, None))
    }

    pub fn try_parse<I, T>(&mut self, itr: I) -> Result<ThresholdArguments, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.try_get_matches_from_mut(itr)?;
        Ok(Self::extract_arguments(&matches, self.mode))
    }

    fn register_arguments(command: Command, mode: ThresholdMode) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_window_size_argument(command);
        let command = Self::register_offset_argument(command);
        let command = Self::register_timing_log_argument(command);
        match mode {
            ThresholdMode::Serial => command,
            ThresholdMode::Parallel => {
                let command = Self::register_processes_argument(command);
                Self::register_threads_argument(command)
            }
        }
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(
            Arg::new("input_file")
                .help("Path to PGM input file")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(
            Arg::new("output_file")
                .help("Path to PGM output file")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
    }

    fn register_window_size_argument(command: Command) -> Command {
        command.arg(
            Arg::new("window_size")
                .help("Side length of the averaging window, odd and greater than 1")
                .value_parser(value_parser!(u32))
                .required(true),
        )
    }

    fn register_offset_argument(command: Command) -> Command {
        command.arg(
            Arg::new("offset")
                .value_name("C")
                .help("Constant subtracted from the local mean")
                .value_parser(value_parser!(i32))
                .allow_negative_numbers(true)
                .required(true),
        )
    }

    fn register_timing_log_argument(command: Command) -> Command {
        command.arg(
            Arg::new("timing_log_file")
                .help("CSV file the timing row is appended to")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
    }

    fn register_processes_argument(command: Command) -> Command {
        command.arg(
            arg!(-p --processes <PROCESSES> "Number of row bands processed independently")
                .default_value("1")
                .value_parser(value_parser!(usize)),
        )
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(
            arg!(-t --threads <THREADS> "Number of threads per row band")
                .default_value(get_number_of_threads().unwrap_or(1).to_string())
                .required(false)
                .value_parser(value_parser!(usize)),
        )
    }

    fn extract_arguments(matches: &ArgMatches, mode: ThresholdMode) -> ThresholdArguments {
        let workers = match mode {
            ThresholdMode::Serial => None,
            ThresholdMode::Parallel => Some((
                Self::extract_usize_argument(matches, "processes"),
                Self::extract_usize_argument(matches, "threads"),
            )),
        };
        ThresholdArguments {
            input_file: Self::extract_path_argument(matches, "input_file"),
            output_file: Self::extract_path_argument(matches, "output_file"),
            window_size: *matches
                .get_one::<u32>("window_size")
                .expect("Required argument window_size not provided"),
            offset: *matches
                .get_one::<i32>("offset")
                .expect("Required argument C not provided"),
            timing_log_file: Self::extract_path_argument(matches, "timing_log_file"),
            workers,
        }
    }

    fn extract_path_argument(matches: &ArgMatches, id: &str) -> PathBuf {
        matches
            .get_one::<PathBuf>(id)
            .expect("Required path argument not provided")
            .clone()
    }

    fn extract_usize_argument(matches: &ArgMatches, id: &str) -> usize {
        *matches
            .get_one::<usize>(id)
            .expect("Argument with default value not provided")
    }
}
