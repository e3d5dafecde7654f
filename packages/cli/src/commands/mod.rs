pub mod check;
pub mod classify;
pub mod fixture;
pub mod generate;
pub mod init;
pub mod render;

pub use check::{check, CheckArgs};
pub use classify::{classify, ClassifyArgs};
pub use fixture::{fixture, FixtureArgs};
pub use generate::{generate, GenerateArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};

use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;

/// Source text read from a file or stdin
pub struct Input {
    pub name: String,
    pub source: String,
}

/// Read `input` relative to `cwd`; `-` reads stdin
pub fn read_input(input: &str, cwd: &str) -> Result<Input> {
    if input == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(Input {
            name: "<stdin>".to_string(),
            source,
        });
    }

    let path = PathBuf::from(cwd).join(input);
    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Input {
        name: input.to_string(),
        source,
    })
}
