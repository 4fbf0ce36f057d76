use std::{env::args_os, process};

use adaptive_threshold::{run_conversion, ConversionCLIParser, ConversionTarget};

fn main() {
    let mut cli_parser = ConversionCLIParser::new(ConversionTarget::Jpeg);
    let arguments = cli_parser.parse(args_os());
    match run_conversion(&arguments) {
        Ok(_) => println!(
            "Converted: {} -> {}",
            arguments.input_file().display(),
            arguments.output_file().display()
        ),
        Err(e) => {
            eprintln!("Conversion failed because of: {}", e);
            process::exit(1);
        }
    }
}
