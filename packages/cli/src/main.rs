mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    check, classify, fixture, generate, init, render, CheckArgs, ClassifyArgs, FixtureArgs,
    GenerateArgs, InitArgs, RenderArgs,
};
use tracing_subscriber::EnvFilter;

/// Livepad CLI - check, classify and render preview snippets
#[derive(Parser, Debug)]
#[command(name = "livepad")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a livepad.config.json
    Init(InitArgs),

    /// Run the syntax pre-check on a script
    Check(CheckArgs),

    /// Print whether a source is previewed as html or script
    Classify(ClassifyArgs),

    /// Build the preview document for a source
    Render(RenderArgs),

    /// Print a test payload
    Fixture(FixtureArgs),

    /// Generate a snippet from a prompt
    Generate(GenerateArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Check(args) => check(args, &cwd),
        Command::Classify(args) => classify(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Fixture(args) => fixture(args, &cwd),
        Command::Generate(args) => generate(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
