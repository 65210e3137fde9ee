use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "evenly={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let db = open_database(&settings.server.database).await?;
    let engine = engine::Engine::builder()
        .database(db.clone())
        .participant_policy(settings.participants)
        .build()
        .await?;

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let cors_origins = settings.server.cors_origins;

    tasks.spawn(async move {
        if let Err(err) =
            server::run_with_listener(engine, listener, &cors_origins, shutdown_signal()).await
        {
            tracing::error!("server failed: {err}");
        }
    });

    while tasks.join_next().await.is_some() {
        tasks.shutdown().await;
    }

    db.close().await?;
    tracing::info!("Database closed");
    Ok(())
}

async fn open_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(config.url()).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("Database ready: {config:?}");
    Ok(database)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(err) => {
            tracing::error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    }
}
