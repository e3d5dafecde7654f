use super::read_input;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use livepad_document::{synthesize_with, DocumentOptions, PreviewDocument};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Source file to render, or `-` for stdin
    pub input: String,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    pub out: Option<String>,

    /// Document title
    #[arg(long)]
    pub title: Option<String>,

    /// Emit the document shell without newlines and indentation
    #[arg(long)]
    pub compact: bool,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let input = read_input(&args.input, cwd)?;
    let options = DocumentOptions {
        title: args.title.clone(),
        pretty: !args.compact,
        ..Default::default()
    };
    let document = synthesize_with(&input.source, &options);

    match &args.out {
        Some(out) => {
            let path = PathBuf::from(cwd).join(out);
            write_document(&path, &document)?;
            println!(
                "  {} {} ({}) → {}",
                "✓".green(),
                input.name,
                document.kind,
                path.display()
            );
        }
        None => print!("{}", document.html),
    }

    Ok(())
}

fn write_document(path: &Path, document: &PreviewDocument) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_writes_document() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join("page.html"), "<p>hello</p>").unwrap();

        render(
            RenderArgs {
                input: "page.html".to_string(),
                out: Some("out/preview.html".to_string()),
                title: None,
                compact: false,
            },
            cwd,
        )
        .unwrap();

        let written = fs::read_to_string(dir.path().join("out/preview.html")).unwrap();
        assert!(written.starts_with("<!doctype html>"));
        assert!(written.contains("<p>hello</p>"));
    }
}
