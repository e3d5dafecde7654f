use anyhow::Result;
use clap::Args;
use colored::Colorize;
use livepad_common::{Config, DEFAULT_CONFIG_NAME};
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Port for the preview server
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Remote generation endpoint
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = Config::path_in(cwd);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let mut config = Config::default();
    if let Some(port) = args.port {
        config.port = port;
    }
    config.generate_endpoint = args.endpoint;

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Run: livepad-server");
    println!("  2. Open http://{}", config.bind_address());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().to_str().unwrap();

        init(
            InitArgs {
                port: Some(4000),
                endpoint: None,
                force: false,
            },
            cwd,
        )
        .unwrap();

        let config = Config::load(cwd).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.generate_endpoint, None);
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(Config::path_in(cwd), r#"{"port": 5000}"#).unwrap();

        init(
            InitArgs {
                port: Some(4000),
                endpoint: None,
                force: false,
            },
            cwd,
        )
        .unwrap();

        assert_eq!(Config::load(cwd).unwrap().port, 5000);
    }
}
