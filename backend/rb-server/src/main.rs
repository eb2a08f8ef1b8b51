use rb_config::Config;
use rb_core::{MapRenderer, MockRobot, Robot, SvgMapRenderer};
use rb_server::{AppState, HubSet, build_router, event_source, logger, simulator};
use rb_stream::ShutdownCoordinator;

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // RB_* overrides may come from a local .env file
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let log_dir = Config::config_dir()?.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting rb-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let mock_robot = MockRobot::new();
    let robot: Arc<dyn Robot> = Arc::new(mock_robot.clone());
    let renderer: Arc<dyn MapRenderer> = Arc::new(SvgMapRenderer::new());

    let shutdown = ShutdownCoordinator::new();
    let hubs = HubSet::from_config(&config);

    event_source::spawn(
        Arc::clone(&robot),
        Arc::clone(&renderer),
        hubs.clone(),
        &shutdown,
    );

    if config.robot.simulate_interval_ms > 0 {
        simulator::spawn(
            mock_robot,
            Duration::from_millis(config.robot.simulate_interval_ms),
            &shutdown,
        );
    }

    let app_state = AppState {
        robot,
        renderer,
        hubs: hubs.clone(),
        shutdown: shutdown.clone(),
    };
    let app = build_router(app_state, &config.server.api_prefix);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Spawn signal handler for graceful shutdown
    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    rb_server::serve(
        listener,
        app,
        hubs,
        shutdown,
        config.server.shutdown_grace(),
    )
    .await?;

    info!("Graceful shutdown complete");
    Ok(())
}
