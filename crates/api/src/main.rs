use std::net::SocketAddr;
use std::sync::Arc;

use pulsewatch_core::device_config::DeviceConfigStore;
use pulsewatch_core::memory::MemoryStore;
use pulsewatch_core::store::TelemetryStore;
use pulsewatch_events::EventBus;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulsewatch_api::config::ServerConfig;
use pulsewatch_api::dashboard::DashboardRouter;
use pulsewatch_api::ingest::IngestService;
use pulsewatch_api::router::build_app_router;
use pulsewatch_api::state::AppState;
use pulsewatch_api::ws;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulsewatch_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store backend ---
    // Postgres when DATABASE_URL is set, otherwise an ephemeral in-memory
    // store (records are lost on restart).
    let store: Arc<dyn TelemetryStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = pulsewatch_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            pulsewatch_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            pulsewatch_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(pulsewatch_db::PgStore::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    // --- WebSocket manager + heartbeat ---
    let ws_manager = Arc::new(ws::WsManager::new());
    let _heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());

    // Spawn the dashboard fan-out (forwards ingestion outcomes to viewers).
    let dashboard_router = DashboardRouter::new(Arc::clone(&ws_manager));
    let _fanout_handle = tokio::spawn(dashboard_router.run(event_bus.subscribe()));
    tracing::info!("Dashboard fan-out started");

    // --- Ingestion pipeline ---
    let ingest = Arc::new(IngestService::new(
        Arc::clone(&store),
        Arc::clone(&event_bus),
    ));

    // --- App state ---
    let state = AppState {
        store,
        ingest,
        device_config: Arc::new(DeviceConfigStore::new()),
        ws_manager: Arc::clone(&ws_manager),
        event_bus,
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(config.host.parse().expect("Invalid HOST"), config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Notify all connected dashboards before exiting.
    ws_manager.shutdown_all().await;
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl-C handler");
    tracing::info!("Shutdown signal received");
}
