use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tether::command::handlers::NoopControl;
use tether::{
    AgentConfig, HttpCommandClient, LogStatusSink, PollScheduler, SchedulerFactory, Supervisor,
};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Command polling agent for remotely managed devices
#[derive(Parser, Debug)]
#[command(name = "tether")]
#[command(author, version, about)]
struct Args {
    /// Base URL of the command server
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,

    /// Device identifier registered with the server
    #[arg(long, default_value = "device-001")]
    device_id: String,

    /// Seconds between polls after a successful cycle
    #[arg(long, default_value_t = 30)]
    poll_interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();
    let config = AgentConfig {
        device_id: args.device_id,
        server_url: args.server_url,
        poll_interval: Duration::from_secs(args.poll_interval),
        ..Default::default()
    };

    info!("Polling agent starting: {}", config.device_id);
    info!("  server: {}", config.server_url);
    info!("  poll interval: {:?}", config.poll_interval);

    let client = Arc::new(HttpCommandClient::new(&config)?);
    let controls = Arc::new(NoopControl);
    let status = Arc::new(LogStatusSink);

    // The transport client outlives any one scheduler; recovery swaps its
    // innards rather than the Arc
    let factory_config = config.clone();
    let factory: SchedulerFactory = Box::new(move || {
        Arc::new(PollScheduler::new(
            &factory_config,
            client.clone(),
            controls.clone(),
            status.clone(),
        ))
    });

    let supervisor = Supervisor::new(factory, config.restart_delay);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let supervisor_task = tokio::spawn(async move { supervisor.run(shutdown_rx).await });

    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received, shutting down");
    let _ = shutdown_tx.send(true);
    let _ = supervisor_task.await;

    info!("Agent exited");
    Ok(())
}
