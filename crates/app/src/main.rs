use std::fmt;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use course_core::{Catalog, LevelId};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, MockIdentityProvider, ProgressOverview, ProgressService};
use storage::repository::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const APP_NAME: &str = "Deutsch Lernen";

#[derive(Parser)]
#[command(name = "app")]
#[command(about = "German course from first words to native-like fluency", long_about = None)]
struct Cli {
    /// SQLite database URL or file path
    #[arg(
        long = "db",
        global = true,
        env = "COURSE_DB_URL",
        default_value = "sqlite://course.sqlite3"
    )]
    db_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Launch the desktop app (default)
    Ui,
    /// Print the stored progress overview
    Status,
    /// Sign out and clear all stored progress
    Reset,
}

#[derive(Debug)]
struct InvalidDbUrl {
    raw: String,
}

impl fmt::Display for InvalidDbUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid --db value: {}", self.raw)
    }
}

impl std::error::Error for InvalidDbUrl {}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn app_name(&self) -> &str {
        APP_NAME
    }

    fn catalog(&self) -> Arc<Catalog> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Turns `--db` into an absolute `sqlite://` URL, keeping any `?query`.
fn normalize_sqlite_url(raw: String) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" {
        return trimmed.to_string();
    }

    let rest = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let (path_str, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    match query {
        Some(query) => format!("sqlite://{}?{query}", absolute.display()),
        None => format!("sqlite://{}", absolute.display()),
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let invalid = || InvalidDbUrl {
        raw: db_url.to_string(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid().into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn print_status(progress: &ProgressService) -> Result<(), Box<dyn std::error::Error>> {
    let Some(session) = progress.current_session().await? else {
        println!("Not signed in. No progress stored.");
        return Ok(());
    };

    let overview = ProgressOverview::from_progress(&session.progress);
    let tier = overview.current_tier;
    println!("Signed in as {} <{}>", session.user.name, session.user.email);
    println!(
        "Current level:  {} ({} · {})",
        overview.current_level,
        tier.code(),
        tier.title()
    );
    println!(
        "Levels done:    {} / {} ({})",
        overview.completed, overview.total, overview.completion_percent
    );
    println!(
        "Study notes:    {} / {} ({})",
        overview.study_completed, overview.total, overview.study_percent
    );
    for level in LevelId::all() {
        if let Some(score) = session.progress.score_for(level) {
            println!("  {level}  {score}");
        }
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if cli.db_url.trim().is_empty() {
        return Err(InvalidDbUrl { raw: cli.db_url }.into());
    }
    let db_url = normalize_sqlite_url(cli.db_url);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&db_url)?;
    let storage = Storage::sqlite(&db_url).await?;
    let services = AppServices::from_storage(&storage, Arc::new(MockIdentityProvider))?;
    info!(%db_url, "storage ready");

    match cli.command.unwrap_or(Command::Ui) {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(APP_NAME)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Status => print_status(&services.progress()).await,
        Command::Reset => {
            services.progress().sign_out().await?;
            println!("All stored progress cleared.");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
