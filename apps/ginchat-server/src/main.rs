use anyhow::{anyhow, Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use db::{ConnectOpts, DbHandle};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use user_accounts::{config::UserAccountsConfig, UserAccounts};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// In-memory DSNs are returned unchanged.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> Result<String> {
    if db::is_in_memory_sqlite(dsn) {
        return Ok(dsn.to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// ginchat server - user account backend
#[derive(Parser)]
#[command(name = "ginchat-server")]
#[command(about = "ginchat server - user account backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("ginchat server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Everything the server needs, resolved from the loaded configuration.
struct Resolved {
    dsn: String,
    connect_opts: ConnectOpts,
    ingress: ApiIngressConfig,
    accounts: UserAccountsConfig,
}

fn resolve(config: &AppConfig) -> Result<Resolved> {
    let db_config = match config.database.clone() {
        Some(db) => db,
        None => {
            tracing::warn!("No database configuration found, using the default SQLite file");
            DatabaseConfig::default()
        }
    };

    let mut dsn = db_config.dsn().context("Invalid database configuration")?;
    DbHandle::detect(&dsn).with_context(|| {
        format!(
            "Unsupported database DSN {}",
            db::redact_credentials_in_dsn(Some(&dsn))
        )
    })?;
    // Absolutize sqlite DSNs to avoid cwd issues
    if dsn.starts_with("sqlite://") {
        dsn = absolutize_sqlite_dsn(&dsn, Path::new(&config.server.home_dir))?;
    }

    let connect_opts = ConnectOpts {
        max_conns: db_config.max_conns,
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db_config
            .busy_timeout_ms
            .map(|ms| Duration::from_millis(ms as u64)),
        create_sqlite_dirs: true,
        ..Default::default()
    };

    let mut ingress: ApiIngressConfig = config.module_config("api_ingress")?;
    if ingress.bind_addr.is_none() {
        ingress.bind_addr = Some(format!("{}:{}", config.server.host, config.server.port));
    }
    if config.server.timeout_sec > 0 {
        ingress.request_timeout_secs = config.server.timeout_sec;
    }

    let accounts: UserAccountsConfig = config.module_config("user_accounts")?;

    Ok(Resolved {
        dsn,
        connect_opts,
        ingress,
        accounts,
    })
}

async fn run_server(config: AppConfig) -> Result<()> {
    let resolved = resolve(&config)?;

    tracing::info!(
        "Connecting to database: {}",
        db::redact_credentials_in_dsn(Some(&resolved.dsn))
    );
    let db = DbHandle::connect(&resolved.dsn, resolved.connect_opts).await?;
    tracing::info!("Connected DB backend: {:?}", db.engine());

    UserAccounts::migrate(&db).await?;
    let accounts = UserAccounts::init(resolved.accounts, &db);

    let ingress = ApiIngress::new(resolved.ingress);
    let router = ingress.build_router(accounts.register_rest(axum::Router::new()));

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
                return;
            }
            tracing::info!("Ctrl-C received");
            cancel.cancel();
        });
    }

    ingress.serve(router, cancel).await?;

    db.close().await;
    tracing::info!("ginchat server stopped");
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let resolved = resolve(&config)?;
    if let Some(addr) = resolved.ingress.bind_addr.as_deref() {
        addr.parse::<std::net::SocketAddr>()
            .with_context(|| format!("Invalid bind address '{addr}'"))?;
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!(
        "Database: {}",
        db::redact_credentials_in_dsn(Some(&resolved.dsn))
    );
    if let Some(addr) = resolved.ingress.bind_addr.as_deref() {
        println!("Listen: {addr}");
    }

    Ok(())
}
