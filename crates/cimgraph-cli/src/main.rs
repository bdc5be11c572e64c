use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use cimgraph::CimGraphError;
use cimgraph_cli::{Args, ErrorAdapter};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    if let Err(err) = cimgraph_cli::run(&args) {
        error!("cimgraph failed\n{}", render_report(&err));
        process::exit(1);
    }

    info!("Done");
}

/// Unknown level names fall back to `warn`.
fn init_logging(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level '{level}', falling back to 'warn'");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
    info!(level = filter.to_string(); "cimgraph starting");
}

fn render_report(err: &CimGraphError) -> String {
    let mut report = String::new();
    match miette::GraphicalReportHandler::new().render_report(&mut report, &ErrorAdapter(err)) {
        Ok(()) => report,
        Err(_) => err.to_string(),
    }
}
