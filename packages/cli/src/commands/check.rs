use super::read_input;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use livepad_document::{classify, ContentKind};
use livepad_precheck::format_error;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Script file to check, or `-` for stdin
    pub input: String,
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let input = read_input(&args.input, cwd)?;

    if classify(&input.source) == ContentKind::HtmlFragment {
        println!(
            "{} {} is markup; markup is rendered without a pre-check",
            "⚠️".yellow(),
            input.name.bright_white()
        );
        return Ok(());
    }

    match livepad_precheck::precheck(&input.source) {
        Ok(()) => {
            println!("{} {} has no syntax errors", "✓".green(), input.name);
            Ok(())
        }
        Err(error) => {
            eprintln!("{}", format_error(&input.source, &input.name, &error));
            Err(anyhow!("{} failed the syntax pre-check", input.name))
        }
    }
}
