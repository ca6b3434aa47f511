//! outage-agent - raises alerts for assets that stop reporting
//!
//! This is the main entry point for the agent.
//! It wires together all the components:
//! - Configuration loading
//! - Outage monitor (asset cache + alert transitions)
//! - NDJSON event intake on stdin
//! - NDJSON alert output on stdout
//! - Periodic dead-set evaluation

mod wire;

use anyhow::{Context, Result, bail};
use clap::Parser;
use outage_config::{AgentConfig, load_config, validate_agent_config};
use outage_core::{OutageMonitor, PutOutcome};
use outage_util::{SystemClock, default_config_path, format_duration};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdout};
use tokio::signal::unix::{SignalKind, signal};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// outage-agent - alerts on UPS, ePDU and sensor assets that stop reporting
#[derive(Parser, Debug)]
#[command(name = "outage-agent")]
#[command(about = "Alerts on monitored assets that stop reporting metrics", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/outage-agent/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Default asset expiry in seconds (or set OUTAGE_DEFAULT_EXPIRY env var)
    #[arg(short, long, env = "OUTAGE_DEFAULT_EXPIRY")]
    default_expiry: Option<u64>,

    /// Log every cache update
    #[arg(short, long)]
    verbose: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// Resolve the effective configuration: file (if any), then CLI overrides
fn resolve_config(args: &Args) -> Result<AgentConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                load_config(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))?
            } else {
                info!(path = %path.display(), "No configuration file, using defaults");
                AgentConfig::default()
            }
        }
    };

    if let Some(expiry) = args.default_expiry {
        config.default_expiry_secs = expiry;
    }
    config.verbose |= args.verbose;

    let errors = validate_agent_config(&config);
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration: {}", messages.join("; "));
    }

    Ok(config)
}

/// Main agent state. Alerts are written to `output`.
struct Agent<W> {
    monitor: OutageMonitor,
    check_interval: Duration,
    output: W,
}

impl Agent<Stdout> {
    fn new(config: &AgentConfig) -> Self {
        info!(
            default_expiry = %format_duration(Duration::from_secs(config.default_expiry_secs)),
            check_interval = %format_duration(config.check_interval),
            mock_time = outage_util::is_mock_time_active(),
            "Configuration resolved"
        );

        Self::with_output(
            OutageMonitor::new(config, Arc::new(SystemClock)),
            config.check_interval,
            tokio::io::stdout(),
        )
    }
}

impl<W: AsyncWrite + Unpin> Agent<W> {
    fn with_output(monitor: OutageMonitor, check_interval: Duration, output: W) -> Self {
        Self {
            monitor,
            check_interval,
            output,
        }
    }

    async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        let mut sigterm = signal(SignalKind::terminate())
            .context("Failed to create SIGTERM handler")?;
        let mut sigint = signal(SignalKind::interrupt())
            .context("Failed to create SIGINT handler")?;
        let mut sighup = signal(SignalKind::hangup())
            .context("Failed to create SIGHUP handler")?;

        let mut tick_timer = tokio::time::interval(self.check_interval);

        info!("Agent running");

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully");
                    break;
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully");
                    break;
                }
                _ = sighup.recv() => {
                    info!("Received SIGHUP, shutting down gracefully");
                    break;
                }

                // Dead-set evaluation
                _ = tick_timer.tick() => {
                    self.check_outages().await?;
                }

                line = lines.next_line() => {
                    match line.context("Failed to read events from stdin")? {
                        Some(line) => self.handle_line(&line),
                        None => {
                            info!("Event input closed");
                            break;
                        }
                    }
                }
            }
        }

        info!(
            tracked_assets = self.monitor.cache().len(),
            active_outages = self.monitor.active_outages().len(),
            "Shutdown complete"
        );
        Ok(())
    }

    fn handle_line(&mut self, line: &str) {
        let event = match wire::decode_event(line) {
            Ok(Some(event)) => event,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "Dropping malformed event");
                return;
            }
        };

        match self.monitor.handle_event(event) {
            PutOutcome::Tracked { name } => info!(asset = %name, "Tracking asset"),
            PutOutcome::Removed { name, existed: true } => info!(asset = %name, "Stopped tracking asset"),
            outcome => debug!(?outcome, "Event processed"),
        }
    }

    async fn check_outages(&mut self) -> Result<()> {
        for event in self.monitor.tick() {
            let line = wire::encode_alert(&wire::alert_for(event))?;
            self.output
                .write_all(line.as_bytes())
                .await
                .context("Failed to write alert")?;
        }
        self.output.flush().await.context("Failed to flush alerts")?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries alerts
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "outage-agent starting");

    let config = resolve_config(&args)?;
    Agent::new(&config).run().await
}
