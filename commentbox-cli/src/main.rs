//! commentbox CLI - post and browse comments from the terminal
//!
//! Hosts the comment widget against a remote comment service:
//! - `list` loads the comment list and prints it
//! - `post` fills in the comment form and submits it
//! - `config` inspects or writes `~/.commentbox/config.toml`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use commentbox_core::CommentboxConfig;
use tracing::debug;

mod commands;
mod config;
mod tracing_setup;
mod ui;

#[derive(Parser, Debug)]
#[command(
    name = "commentbox",
    author,
    version,
    about = "Post and browse comments on a remote comment service"
)]
struct Cli {
    /// Comment service base URL (default: http://localhost:3000)
    #[arg(long, env = "COMMENTBOX_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Config file (default: ~/.commentbox/config.toml)
    #[arg(long, env = "COMMENTBOX_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Debug logging to stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress the loading spinner
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and print all comments
    List(commands::ListArgs),
    /// Submit a new comment
    Post(commands::PostArgs),
    /// Inspect or initialize configuration (path, show, init)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Config file, then --endpoint/--insecure on top
fn resolve_config(cli: &Cli) -> Result<(PathBuf, CommentboxConfig)> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(CommentboxConfig::config_path);

    let mut config = CommentboxConfig::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    if let Some(ref endpoint) = cli.endpoint {
        config.service.endpoint = endpoint.clone();
    }
    if cli.insecure {
        config.service.insecure = true;
    }

    debug!(
        path = %path.display(),
        endpoint = %config.service.endpoint,
        insecure = config.service.insecure,
        "resolved config"
    );
    Ok((path, config))
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    ui::init_quiet_mode(cli.quiet);

    let (config_path, config) = resolve_config(&cli)?;

    match cli.command {
        Commands::List(args) => commands::run_list(&config, args).await?,
        Commands::Post(args) => commands::run_post(&config, args).await?,
        Commands::Config(args) => config::run_config(args, &config_path, &config)?,
        Commands::Completions(args) => run_completions(args)?,
    }

    Ok(())
}
