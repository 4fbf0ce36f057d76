use std::{env::args_os, process};

use adaptive_threshold::{run_plot, PlotCLIParser};

fn main() {
    let mut cli_parser = PlotCLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match run_plot(&arguments) {
        Ok(chart_path) => println!("Saved: {}", chart_path.display()),
        Err(e) => {
            eprintln!("Plotting failed because of: {}", e);
            process::exit(1);
        }
    }
}
