use std::{env::args_os, process};

use adaptive_threshold::{run_threshold, ThresholdCLIParser, ThresholdMode};

fn main() {
    let mut cli_parser = ThresholdCLIParser::new(ThresholdMode::Parallel);
    let arguments = cli_parser.parse(args_os());
    match run_threshold(&arguments) {
        Ok(report) => println!("{}", report),
        Err(e) => {
            eprintln!("Thresholding failed because of: {}", e);
            process::exit(1);
        }
    }
}
