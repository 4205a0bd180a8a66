use clap::Parser;
use rsreport::{Cli, logging, run};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
