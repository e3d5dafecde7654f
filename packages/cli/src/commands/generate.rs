use anyhow::Result;
use clap::Args;
use colored::Colorize;
use livepad_common::Config;
use livepad_generator::{generator_for, Generator};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Natural-language description of the snippet
    pub prompt: String,

    /// Remote generation endpoint (overrides config)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Stub latency in milliseconds (overrides config)
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

pub fn generate(args: GenerateArgs, cwd: &str) -> Result<()> {
    let mut config = Config::load(cwd)?;
    if let Some(endpoint) = args.endpoint {
        config.generate_endpoint = Some(endpoint);
    }
    if let Some(delay) = args.delay_ms {
        config.stub_delay_ms = delay;
    }

    let generator = generator_for(config.generate_endpoint.as_deref(), config.stub_delay());
    let source = match &config.generate_endpoint {
        Some(endpoint) => endpoint.as_str(),
        None => "stub",
    };
    eprintln!("{} {}", "✨ Generating with".bright_blue(), source.bright_white());

    let runtime = tokio::runtime::Runtime::new()?;
    let code = runtime.block_on(generator.generate(&args.prompt))?;
    println!("{}", code);
    Ok(())
}
