use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commentbox_core::CommentboxConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration (file plus flags) as TOML
    Show,
    /// Write a config file with the effective settings
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, path: &Path, config: &CommentboxConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let toml_str = config
                .to_toml()
                .context("Failed to serialize config to TOML")?;
            print!("{}", toml_str);
            Ok(())
        }
        ConfigCommands::Init(init) => run_init(init, path, config),
    }
}

fn run_init(args: InitArgs, path: &Path, config: &CommentboxConfig) -> Result<()> {
    if path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {}\n\nUse --force to overwrite",
            path.display()
        ));
    }

    config
        .save_to(path)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("✅ Created config at: {}", path.display());
    println!("   endpoint = {}", config.service.endpoint);

    Ok(())
}
