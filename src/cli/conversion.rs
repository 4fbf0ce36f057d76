use clap::{arg, value_parser, Arg, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

use super::{create_base_command, exit_on_parse_error};
use crate::conversion::DEFAULT_JPEG_QUALITY;
use crate::ConversionArguments;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConversionTarget {
    Jpeg,
    Graymap,
}

impl ConversionTarget {
    fn program_name(&self) -> &'static str {
        match self {
            Self::Jpeg => "convert_to_jpg",
            Self::Graymap => "convert_to_pgm",
        }
    }

    fn usage(&self) -> &'static str {
        match self {
            Self::Jpeg => "Usage: convert_to_jpg input.pgm output.jpg",
            Self::Graymap => "Usage: convert_to_pgm input.jpg output.pgm",
        }
    }

    fn input_help(&self) -> &'static str {
        match self {
            Self::Jpeg => "Path to grayscale input image",
            Self::Graymap => "Path to input image of any supported format",
        }
    }

    fn output_help(&self) -> &'static str {
        match self {
            Self::Jpeg => "Path to JPEG output file",
            Self::Graymap => "Path to binary PGM output file",
        }
    }
}

pub struct ConversionCLIParser {
    command: Command,
    target: ConversionTarget,
}

impl ConversionCLIParser {
    pub fn new(target: ConversionTarget) -> Self {
        let command = create_base_command(target.program_name());
        let command = Self::register_arguments(command, target);
        ConversionCLIParser { command, target }
    }

    /// Parses the command line, printing the usage line and exiting on error.
    pub fn parse<I, T>(&mut self, itr: I) -> ConversionArguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let usage = self.target.usage();
        self.try_parse(itr)
            .unwrap_or_else(|e| exit_on_parse_error(e, Some(usage)))
    }

    pub fn try_parse<I, T>(&mut self, itr: I) -> Result<ConversionArguments, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.try_get_matches_from_mut(itr)?;
        Ok(Self::extract_arguments(&matches, self.target))
    }

    fn register_arguments(command: Command, target: ConversionTarget) -> Command {
        let command = command
            .arg(Self::create_input_file_argument(target))
            .arg(Self::create_output_file_argument(target));
        match target {
            ConversionTarget::Jpeg => command.arg(Self::create_quality_argument()),
            ConversionTarget::Graymap => command,
        }
    }

    fn create_input_file_argument(target: ConversionTarget) -> Arg {
        Arg::new("input_file")
            .help(target.input_help())
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument(target: ConversionTarget) -> Arg {
        Arg::new("output_file")
            .help(target.output_help())
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_quality_argument() -> Arg {
        arg!(-q --quality <QUALITY> "JPEG quality")
            .default_value(DEFAULT_JPEG_QUALITY.to_string())
            .value_parser(value_parser!(u8).range(1..=100))
    }

    fn extract_arguments(matches: &ArgMatches, target: ConversionTarget) -> ConversionArguments {
        ConversionArguments {
            input_file: Self::extract_path_argument(matches, "input_file"),
            output_file: Self::extract_path_argument(matches, "output_file"),
            target,
            quality: Self::extract_quality_argument(matches, target),
        }
    }

    fn extract_path_argument(matches: &ArgMatches, id: &str) -> PathBuf {
        matches
            .get_one::<PathBuf>(id)
            .expect("Required path argument not provided")
            .clone()
    }

    fn extract_quality_argument(matches: &ArgMatches, target: ConversionTarget) -> u8 {
        match target {
            ConversionTarget::Jpeg => *matches
                .get_one::<u8>("quality")
                .expect("Quality must be provided, but was unset."),
            ConversionTarget::Graymap => DEFAULT_JPEG_QUALITY,
        }
    }
}
