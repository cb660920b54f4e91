// Retail Explorer - Main executable
// Author: Gabriel Demetrios Lafis

use std::io::{self, IsTerminal};
use std::process;

use anyhow::Context;
use clap::{App, Arg};
use log::info;

use retail_explorer::{
    data::open_source,
    processing::load_dataset,
    utils::{init_logging, Config},
    AppError, Shell,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = App::new("Retail Explorer")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Interactive explorer for retail transaction data")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file (JSON or YAML)")
                .takes_value(true),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Sets the dataset file to load")
                .takes_value(true),
        )
        .get_matches();

    // Load configuration
    let mut config = match matches.value_of("config") {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Error loading config file '{}'", path))?,
        None => Config::default(),
    };

    if let Some(input) = matches.value_of("input") {
        config.data.path = input.to_string();
    }

    // Initialize logging
    if let Err(err) = init_logging(config.log_level_filter(), config.logging.file.as_deref()) {
        eprintln!("Error initializing logger: {}", err);
    }

    // Load the dataset once; a missing file ends the program here
    let source = open_source(&config.data.path, config.data.delimiter).map_err(AppError::from)?;
    let dataset =
        load_dataset(source.as_ref(), &config.data.date_formats).map_err(AppError::from)?;

    info!("Starting shell over {} records", dataset.len());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let color = config.display.color && stdout.is_terminal();
    let mut shell = Shell::new(&dataset, stdin.lock(), stdout.lock(), config.display.top_n)?
        .with_color(color);
    shell.run()?;

    Ok(())
}
