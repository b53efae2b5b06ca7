// src/main.rs
use clap::Parser;
use crossterm::style::Stylize;
use linkshelf::cli::args::Cli;
use linkshelf::cli::display::stderr_stream;
use linkshelf::cli::error::CliError;
use linkshelf::config::{generate_default_config, load_settings};
use linkshelf::exitcode;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

#[instrument]
fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug, cli.no_color);

    // use stderr as human output in order to make stdout output passable to downstream processes
    let stderr = stderr_stream(cli.no_color);

    // printed before settings are loaded
    if cli.generate_config {
        println!("{}", generate_default_config());
        return;
    }

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", format!("Failed to load settings: {}", e).red());
            std::process::exit(exitcode::USAGE);
        }
    };
    debug!("Using service at {}", settings.api_url);

    if let Err(e) = linkshelf::cli::execute_command(stderr, cli, &settings) {
        let code = e.exit_code();
        // a refused change is reported through the exit status only
        if !matches!(e, CliError::Rejected(_)) {
            eprintln!("{}", format!("Error: {}", e).red());
        }
        std::process::exit(code);
    }
}

fn setup_logging(verbosity: u8, no_color: bool) {
    debug!("INIT: Attempting logger init from main.rs");

    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    let noisy_modules = ["reqwest", "hyper", "hyper_util", "rustls", "mio", "want", "rustyline"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}
