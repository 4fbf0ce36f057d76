use clap::{crate_authors, crate_description, crate_version, Command};
use std::{io, process, thread};

mod conversion;
mod plot;
mod threshold;

pub use conversion::{ConversionCLIParser, ConversionTarget};
pub use plot::PlotCLIParser;
pub use threshold::{ThresholdCLIParser, ThresholdMode};

/// Exit status for malformed command lines.
pub const USAGE_EXIT_CODE: i32 = 1;

fn create_base_command(program_name: &'static str) -> Command {
    Command::new(program_name)
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
}

/// Help and version requests exit normally, every other parse error exits with
/// [`USAGE_EXIT_CODE`].
fn exit_on_parse_error(error: clap::Error, usage: Option<&str>) -> ! {
    use clap::error::ErrorKind;
    if matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    ) {
        error.exit();
    }
    log::debug!("Invalid command line: {}", error);
    match usage {
        Some(usage) => println!("{}", usage),
        None => {
            let _ = error.print();
        }
    }
    process::exit(USAGE_EXIT_CODE)
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
