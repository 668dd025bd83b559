//! X-Tools shell: configuration resolver entry point.
//!
//! Resolves the effective configuration for a profile (defaults plus the
//! profile's overlay), checks the settings the shell relies on, and logs a
//! summary.  With `--json` the whole resolved configuration is printed to
//! stdout.
//!
//! # Usage
//!
//! ```text
//! xtools [OPTIONS]
//!
//! Options:
//!   --config-dir <DIR>    Directory holding config.*.toml [default: config]
//!   --env <PROFILE>       Profile to resolve (local, prod, ...) [default: local]
//!   --log-level <LEVEL>   Log filter when RUST_LOG is unset [default: info]
//!   --json                Print the resolved configuration as JSON
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable            | Default  | Description                        |
//! |---------------------|----------|------------------------------------|
//! | `XTOOLS_CONFIG_DIR` | `config` | Directory holding the profiles     |
//! | `XTOOLS_ENV`        | `local`  | Profile to resolve                 |
//! | `XTOOLS_LOG_LEVEL`  | `info`   | Log filter when `RUST_LOG` is unset |
//!
//! # Architecture overview
//!
//! ```text
//! xtools  ← this process
//!   domain/          Profile, ShellSettings
//!   application/     ConfigResolver (clone defaults, merge overlay)
//!   infrastructure/
//!     storage/       FileConfigSource, TOML → Value
//!     render         Value → JSON
//!       ↕
//! xtools-core        Value graph, GraphCloner
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xtools_shell::application::resolve_config::ConfigResolver;
use xtools_shell::domain::{Profile, ShellSettings};
use xtools_shell::infrastructure::render::to_json;
use xtools_shell::infrastructure::storage::config::FileConfigSource;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// X-Tools configuration resolver.
#[derive(Debug, Parser)]
#[command(
    name = "xtools",
    about = "Resolves X-Tools configuration profiles",
    version
)]
struct Cli {
    /// Directory holding `config.default.toml` and the profile overlays.
    #[arg(long, default_value = "config", env = "XTOOLS_CONFIG_DIR")]
    config_dir: PathBuf,

    /// Profile to resolve.
    ///
    /// `dev`/`development` are aliases for `local`, `production` for `prod`.
    /// Any other name selects `config.<name>.toml`.
    #[arg(long = "env", default_value = "local", env = "XTOOLS_ENV")]
    profile: Profile,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info", env = "XTOOLS_LOG_LEVEL")]
    log_level: String,

    /// Print the resolved configuration as JSON on stdout.
    #[arg(long)]
    json: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `RUST_LOG` wins; otherwise use `--log-level`, and fall back to `info`
    // if that is not a valid filter either.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&cli.log_level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        profile = %cli.profile,
        config_dir = %cli.config_dir.display(),
        "resolving configuration"
    );

    let mut resolver = ConfigResolver::new(FileConfigSource::new(&cli.config_dir));
    let config = resolver
        .resolve(&cli.profile)
        .with_context(|| format!("failed to resolve profile '{}'", cli.profile))?;

    let settings = ShellSettings::from_value(&config).context("invalid shell settings")?;
    info!(
        title = %settings.window.title,
        width = settings.window.width,
        height = settings.window.height,
        dev_tools = settings.open_dev_tools,
        log_level = %settings.logger.level,
        "window settings"
    );
    for (name, server) in [
        ("http", &settings.http_server),
        ("socket", &settings.socket_server),
    ] {
        info!(
            server = name,
            enable = server.enable,
            addr = %format!("{}:{}", server.host, server.port),
            "embedded server"
        );
    }

    if cli.json {
        let json = to_json(&config).context("failed to render configuration")?;
        let text = serde_json::to_string_pretty(&json).context("failed to format JSON")?;
        println!("{text}");
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
