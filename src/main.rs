//! pinger: periodic HTTP/TCP health checker.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI flags ─┐
//!              ├─▶ PingerConfig ─▶ Probe (http | tcp) ─┐
//!   TOML file ─┘        │                              ▼
//!                       └──────▶ WorkerOptions ──▶  Worker ──▶ Probe::attempt
//!                                                    ▲               │
//!   SIGINT/SIGTERM ─▶ Shutdown ──────────────────────┘   error handler (warn log)
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pinger::config::{
    read_config, validate_config, ConfigError, HeaderConfig, LogFormat, PingerConfig,
    ProbeConfig, TcpProbeConfig,
};
use pinger::lifecycle::signals::spawn_signal_handler;
use pinger::observability::logging::init_logging;
use pinger::{Probe, Shutdown, Worker};

#[derive(Parser)]
#[command(name = "pinger")]
#[command(about = "Periodic HTTP/TCP health checker", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe on an interval until interrupted
    Run(ProbeArgs),
    /// Probe once and exit non-zero on failure
    Check(ProbeArgs),
}

#[derive(Args)]
struct ProbeArgs {
    /// TOML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target URL for an HTTP probe
    #[arg(short, long)]
    url: Option<String>,

    /// HTTP method (default HEAD)
    #[arg(short = 'X', long)]
    method: Option<String>,

    /// Extra request header as "Name: value"; repeatable, repeated names append
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<HeaderConfig>,

    /// Probe a TCP address (host:port) instead of a URL
    #[arg(long, conflicts_with = "url")]
    tcp: Option<String>,

    /// Milliseconds between probes
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Per-probe timeout in milliseconds
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Log level for pinger's own events
    #[arg(long)]
    log_level: Option<String>,

    #[arg(long, value_enum)]
    log_format: Option<LogFormatArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

fn parse_header(raw: &str) -> Result<HeaderConfig, String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got {raw:?}"))?;
    Ok(HeaderConfig {
        name: name.trim().to_string(),
        value: value.trim().to_string(),
    })
}

impl ProbeArgs {
    /// Layer flags over the config file (or defaults), then validate.
    fn into_config(self) -> Result<PingerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => PingerConfig::default(),
        };

        if let Some(ms) = self.interval_ms {
            config.worker.interval_ms = ms;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format.into();
        }

        if let Some(address) = self.tcp {
            let mut tcp = match config.probe {
                ProbeConfig::Tcp(tcp) => tcp,
                ProbeConfig::Http(_) => TcpProbeConfig::default(),
            };
            tcp.address = address;
            config.probe = ProbeConfig::Tcp(tcp);
        } else if self.url.is_some() && matches!(config.probe, ProbeConfig::Tcp(_)) {
            config.probe = ProbeConfig::default();
        }

        match &mut config.probe {
            ProbeConfig::Http(http) => {
                if let Some(url) = self.url {
                    http.url = url;
                }
                if let Some(method) = self.method {
                    http.method = method;
                }
                if self.timeout_ms.is_some() {
                    http.timeout_ms = self.timeout_ms;
                }
                http.headers.extend(self.headers);
            }
            ProbeConfig::Tcp(tcp) => {
                if let Some(ms) = self.timeout_ms {
                    tcp.timeout_ms = ms;
                }
            }
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let (args, once) = match cli.command {
        Commands::Run(args) => (args, false),
        Commands::Check(args) => (args, true),
    };

    let config = args.into_config()?;
    init_logging(&config.logging);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "pinger starting");

    let probe = config.probe.build()?;
    let endpoint = config.probe.target().to_string();

    let shutdown = Shutdown::new();
    spawn_signal_handler(&shutdown);

    if once {
        probe.attempt(shutdown.token()).await?;
        println!("ok {endpoint}");
        return Ok(());
    }

    tracing::info!(
        endpoint = %endpoint,
        interval_ms = config.worker.interval_ms,
        "Configuration loaded"
    );

    let failed_endpoint = endpoint.clone();
    let options = config.worker.options().with_error_handler(move |err| {
        tracing::warn!(
            endpoint = %failed_endpoint,
            kind = err.kind(),
            error = %err,
            "Probe failed"
        );
    });

    Worker::new(probe, options).run(shutdown.token()).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
