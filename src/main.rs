//! Hook Timer - A Pomodoro focus timer service
//!
//! This is the main entry point for the hook-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use hook_timer::{
    api::create_router,
    config::{Config, NotifierKind},
    notify::{DesktopNotifier, LogNotifier, Notifier},
    state::AppState,
    tasks::focus_stats_task,
    timer::IntervalTickSource,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("hook_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting hook-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, work={}min, break={}min, notifier={:?}",
        config.host, config.port, config.work_minutes, config.break_minutes, config.notifier
    );

    let notifier: Box<dyn Notifier> = match config.notifier {
        NotifierKind::Desktop => Box::new(DesktopNotifier::new()),
        NotifierKind::Log => Box::new(LogNotifier),
    };

    // Create application state
    let ticks = IntervalTickSource::new()?;
    let state = Arc::new(AppState::new(config.app_options(), Box::new(ticks), notifier));

    // Permission is asked once; a refusal only disables notifications
    state.check_notification_permission()?;

    // Start the focus statistics background task
    let stats_state = Arc::clone(&state);
    tokio::spawn(async move {
        focus_stats_task(stats_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /timer              - Current timer snapshot");
    info!("  POST   /timer/start        - Start the countdown");
    info!("  POST   /timer/pause        - Pause the countdown");
    info!("  POST   /timer/toggle       - Toggle start/pause (tap)");
    info!("  POST   /timer/reset        - Reset to an idle work phase");
    info!("  POST   /timer/activate     - Crown press (double press pauses)");
    info!("  POST   /timer/adjust       - Set current phase length in minutes");
    info!("  GET    /notifications      - List delivered notifications");
    info!("  PATCH  /notifications      - Mark all notifications read");
    info!("  DELETE /notifications      - Clear notifications");
    info!("  PATCH  /notifications/:id  - Mark one notification read");
    info!("  DELETE /notifications/:id  - Remove one notification");
    info!("  GET    /status             - Timer, stats and server status");
    info!("  GET    /health             - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.timer.reset() {
        tracing::warn!("Failed to stop timer on shutdown: {}", e);
    }
    info!("Server shutdown complete");
    Ok(())
}
