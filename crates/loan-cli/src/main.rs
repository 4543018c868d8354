mod config;
mod input;
mod render;
mod session;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

use config::UiConfig;
use session::Session;

/// Interactive fixed-rate loan calculator
#[derive(Parser)]
#[command(
    name = "loan",
    version,
    about = "Interactive fixed-rate loan calculator",
    long_about = "An interactive terminal calculator for fixed-rate amortizing \
                  loans. Supply any three of principal, annual rate, term length, \
                  and monthly payment, then solve for the fourth."
)]
struct Cli {
    /// Path to a YAML file overriding the built-in prompts, formats, and messages
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep previous screens instead of wiping between prompts
    #[arg(long)]
    no_clear: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(UiConfig::load).transpose() {
        Ok(loaded) => loaded.unwrap_or_default(),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    // Only wipe the screen for a real terminal; piped output keeps every frame.
    let wipe_screen = !cli.no_clear && atty::is(atty::Stream::Stdout);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = match Session::new(&config, wipe_screen, stdin.lock(), stdout.lock()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}: invalid input pattern — {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    if let Err(e) = session.run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }
    process::exit(0);
}
