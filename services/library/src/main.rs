use athenaeum_auth_types::identity::JwtSecret;
use athenaeum_core::config::Config;
use athenaeum_core::tracing::init_tracing;
use athenaeum_library_migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::info;

use athenaeum_library::config::LibraryConfig;
use athenaeum_library::router::build_router;
use athenaeum_library::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = LibraryConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("failed to apply migrations");
        info!("database migrations applied");
    }

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret),
        token_ttl_secs: config.token_ttl_secs,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.library_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("library service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
