use anyhow::Context;
use baklay_cli::console::StdConsole;
use baklay_cli::{menu, AppContext};
use baklay_core::PasswordHasher;
use baklay_store::app_config::Config;
use baklay_store::DbClient;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "baklay_cli=info,baklay_store=info";

/// `baklay` command arguments.
#[derive(Debug, Parser)]
#[command(name = "baklay", about = "Baklay Cebu trek booking console", version)]
struct CliArgs {
    /// Base config file, without extension.
    #[arg(long, value_name = "path", default_value = "config/default")]
    config: String,
    /// Database URL, overriding the config files and environment.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Skip applying migrations at startup.
    #[arg(long = "no-migrate")]
    no_migrate: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = Config::load_from(&args.config, args.database_url.clone())
        .context("Failed to load config")?;

    // Logs go to stderr so they never interleave with the menus on stdout
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.logging.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER))
            .context("Invalid logging.filter")?,
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let db = DbClient::new(&config.database)
        .await
        .context("Failed to open database")?;
    if config.database.run_migrations && !args.no_migrate {
        db.migrate().await.context("Failed to run migrations")?;
    }

    let hasher = PasswordHasher::new(&config.password).context("Invalid password settings")?;
    let ctx = AppContext::new(&db, hasher, config.business_rules.clone());

    let mut console = StdConsole::new();
    menu::run(&ctx, &mut console).await?;

    db.pool.close().await;
    Ok(())
}
