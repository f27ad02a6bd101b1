use anyhow::{Context, Result, bail};
use inventory_core::application::ports::{ClockPort, EntityLookupPort, EntityStorePort};
use inventory_core::application::services::ApplicationServices;
use inventory_core::config::AppConfig;
use inventory_core::domain::audit::AuditLogRepository;
use inventory_core::infrastructure::{
    database, inventory,
    repositories::{InventoryTables, SqliteAuditLogRepository},
    time::SystemClock,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: inventory_core [history | low-stock <threshold> | stock | products]";

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.max_connections()).await?;
    database::run_migrations(&pool).await?;
    tracing::info!(url = config.database_url(), "database ready");

    let tables = InventoryTables::new(&pool)?;
    let store: Arc<EntityStorePort> = Arc::new(tables.clone());
    let audit_log_repo: Arc<dyn AuditLogRepository> =
        Arc::new(SqliteAuditLogRepository::new(pool.clone())?);
    let user_lookup: Arc<EntityLookupPort> = Arc::new(tables.users.clone());
    let product_lookup: Arc<EntityLookupPort> = Arc::new(tables.products.clone());
    let clock: Arc<ClockPort> = Arc::new(SystemClock);

    let services = ApplicationServices::new(
        store,
        audit_log_repo,
        user_lookup,
        product_lookup,
        clock,
        config.reference_scheme(),
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = match args.first().map(String::as_str) {
        None | Some("history") => {
            serde_json::to_string_pretty(&services.audit_queries.get_history().await?)?
        }
        Some("low-stock") => {
            let threshold = args
                .get(1)
                .context(USAGE)?
                .parse::<i64>()
                .context("threshold must be an integer")?;
            serde_json::to_string_pretty(&inventory::low_stock(&tables.products, threshold).await?)?
        }
        Some("stock") => {
            serde_json::to_string_pretty(&inventory::stock_by_location(&tables.locations).await?)?
        }
        Some("products") => serde_json::to_string_pretty(
            &inventory::products_with_relations(&tables.products).await?,
        )?,
        Some(other) => bail!("unknown command {other}\n{USAGE}"),
    };
    println!("{output}");

    pool.close().await;
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
