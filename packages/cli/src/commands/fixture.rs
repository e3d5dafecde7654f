use anyhow::Result;
use clap::Args;
use colored::Colorize;
use livepad_document::{load_fixture, Fixture};

#[derive(Debug, Args)]
pub struct FixtureArgs {
    /// Fixture id; unknown ids print the default example
    #[arg(default_value = "default")]
    pub id: String,

    /// List available fixtures
    #[arg(short, long)]
    pub list: bool,
}

pub fn fixture(args: FixtureArgs, _cwd: &str) -> Result<()> {
    if args.list {
        for fixture in Fixture::ALL {
            println!(
                "  {:<16} {}",
                fixture.id().bright_white(),
                fixture.description().dimmed()
            );
        }
        return Ok(());
    }

    let fixture = load_fixture(&args.id);
    if fixture.id() != args.id {
        eprintln!(
            "{} Unknown fixture '{}', using '{}'",
            "⚠️".yellow(),
            args.id,
            fixture.id()
        );
    }
    println!("{}", fixture.source());
    Ok(())
}
