use std::env;

use anyhow::{anyhow, Context, Result};
use nutribase::config::{
    config_file_path, ensure_workspace_structure, load_or_default, save,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    ensure_workspace_structure()?;
    let args = CliArgs::parse()?;
    let config_path = config_file_path()?;
    let mut config = load_or_default()?;
    let mut changed = !config_path.exists();

    if let Some(base_url) = args.base_url {
        if config.ai.base_url != base_url {
            config.ai.base_url = base_url;
            changed = true;
        }
    }
    if let Some(timeout) = args.timeout_secs {
        if config.ai.request_timeout_secs != timeout {
            config.ai.request_timeout_secs = timeout;
            changed = true;
        }
    }

    if changed {
        save(&config)?;
        println!("AI proxy settings recorded at {}", config_path.display());
    } else {
        println!("AI proxy settings already configured.");
    }

    Ok(())
}

struct CliArgs {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut base_url = None;
        let mut timeout_secs = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => {
                    let value = args
                        .next()
                        .context("Expected a URL after --base-url")?;
                    base_url = Some(value);
                }
                "--timeout" => {
                    let value = args
                        .next()
                        .context("Expected seconds after --timeout")?;
                    timeout_secs = Some(
                        value
                            .parse()
                            .with_context(|| format!("Invalid timeout '{value}'"))?,
                    );
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument '{other}'. Run with --help for usage instructions."
                    ));
                }
            }
        }
        Ok(Self {
            base_url,
            timeout_secs,
        })
    }
}

fn print_usage() {
    println!("NutriBase setup");
    println!("Ensures the AI proxy endpoint is recorded in config.toml.");
    println!("Usage: cargo run --bin setup -- [options]");
    println!("Options:");
    println!("  --base-url <url>    Override the AI proxy base URL");
    println!("  --timeout <secs>    Override the per-request timeout");
}
