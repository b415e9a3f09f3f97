//! Backend entry-point: wires the GraphQL endpoint and health probes.

mod server;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::Trace;
use backend::outbound::persistence::{DbPool, PoolConfig};
use server::{AppConfig, build_app_state, configure_routes, health_state, postgres_repositories};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env()?;

    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(|err| std::io::Error::other(format!("database pool init failed: {err}")))?;

    let repos = postgres_repositories(&pool, &config);
    let (schema, auth, seeder) = build_app_state(&repos);

    if config.seed_on_start {
        let users = seeder
            .reset_and_seed()
            .await
            .map_err(|err| std::io::Error::other(format!("startup seeding failed: {err}")))?;
        info!(users = users.len(), "storage seeded at startup");
    }

    let health = health_state();
    let server_health = health.clone();
    let schema_data = web::Data::new(schema);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Trace)
            .app_data(schema_data.clone())
            .app_data(auth.clone())
            .app_data(server_health.clone())
            .configure(configure_routes)
    })
    .bind(config.bind_addr)?;

    health.mark_ready();
    info!(addr = %config.bind_addr, "listening");
    server.run().await
}
