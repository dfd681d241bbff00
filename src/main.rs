//! axmode - vi-style modal editing for native macOS text controls
//!
//! The binary bootstraps accessibility access and watches the focused
//! element, mirroring text controls the way the keystroke dispatcher does.
//!
//! # Quick Start
//!
//! ```text
//! axmode                      # Watch focus with ~/.axmode/config.toml
//! axmode -c ./config.toml     # Use another config file
//! axmode --no-prompt          # Check access without the consent dialog
//! ```
//!
//! Logs go to `~/.axmode/axmode.log`; `RUST_LOG` overrides `log_level`.

use std::env;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use axmode::Config;

/// Command line options
#[derive(Debug, Default)]
struct Options {
    /// Config file overriding the default location
    config_path: Option<PathBuf>,
    /// Skip the consent prompt
    no_prompt: bool,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("axmode {}", VERSION);
}

fn print_help() {
    eprintln!("axmode {} - vi-style modal editing for native text controls", VERSION);
    eprintln!();
    eprintln!("Usage: axmode [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <PATH>   Config file (default: ~/.axmode/config.toml)");
    eprintln!("      --no-prompt       Do not show the accessibility consent prompt");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Log file: ~/.axmode/axmode.log (filter with RUST_LOG)");
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();
    let mut options = Options::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing config path".to_string());
                }
                options.config_path = Some(PathBuf::from(&args[i]));
            }
            "--no-prompt" => {
                options.no_prompt = true;
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(options)
}

/// Log to `~/.axmode/axmode.log`, appending
fn init_logging(config: &Config) {
    let log_path = Config::config_dir()
        .map(|dir| dir.join("axmode.log"))
        .unwrap_or_else(|| PathBuf::from("axmode.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let mut config = match &options.config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    if options.no_prompt {
        config.prompt_for_access = false;
    }

    init_logging(&config);
    info!("axmode {} starting...", VERSION);

    run(config)
}

#[cfg(not(target_os = "macos"))]
fn run(_config: Config) -> anyhow::Result<()> {
    eprintln!("axmode currently only supports macOS.");
    std::process::exit(1);
}

/// Poll the focused element and log what the sync core sees
#[cfg(target_os = "macos")]
fn run(config: Config) -> anyhow::Result<()> {
    use axmode::{Buffer, PassiveBuffer, Role, Session};
    use tracing::error;

    let interval = config.watch_interval();
    let mut session = match Session::bootstrap(PassiveBuffer::new(), config) {
        Ok(session) => session,
        Err(e) if e.is_fatal() => {
            error!("Accessibility not granted");
            eprintln!("Accessibility not granted. Exit.");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    info!("Accessibility granted, watching focus every {:?}", interval);

    let mut last = (Role::None, 0usize);
    loop {
        let operable = session.refresh();
        let current = (session.role(), session.buffer().mirror().text.len());
        if current != last {
            info!(
                "Focus: {:?} (operable: {}, {} bytes, {} text resets)",
                current.0,
                operable,
                current.1,
                session.buffer().text_resets()
            );
            last = current;
        }
        std::thread::sleep(interval);
    }
}
