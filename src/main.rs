use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use voxbatch::app::{CliOverrides, run_batch_command, run_ping_command};
use voxbatch::cli::{Cli, Commands};
use voxbatch::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let config = load_config(cli.config.as_deref())?;
            let overrides = CliOverrides {
                manifest: cli.manifest,
                audio_dir: cli.audio_dir,
                output: cli.output,
                endpoint: cli.endpoint,
                concurrency: cli.concurrency,
                timeout_secs: cli.timeout,
                limit: cli.limit,
            };

            match run_batch_command(config, overrides, cli.quiet, cli.verbose).await {
                // Per-row failures are reported in the summary and the
                // output manifest; they do not affect the exit code.
                Ok(_summary) => {}
                Err(e) => {
                    eprintln!("{}", format!("Error: {e}").red());
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Ping { endpoint }) => {
            let config = load_config(cli.config.as_deref())?;
            match run_ping_command(config, endpoint).await {
                Ok(()) => {
                    println!("{}", "pong".green());
                }
                Err(e) => {
                    eprintln!("{}", format!("Error: {e}").red());
                    eprintln!("Is the provider running?");
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "voxbatch",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/voxbatch/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        // Load from custom path
        Config::load(path)?
    } else {
        // Try default path, fall back to defaults
        let default_path = Config::default_path();
        Config::load_or_default(&default_path)
    };

    // Apply environment variable overrides
    Ok(config.with_env_overrides())
}
