use super::read_input;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// File to classify, or `-` for stdin
    pub input: String,
}

pub fn classify(args: ClassifyArgs, cwd: &str) -> Result<()> {
    let input = read_input(&args.input, cwd)?;
    println!("{}", livepad_document::classify(&input.source));
    Ok(())
}
