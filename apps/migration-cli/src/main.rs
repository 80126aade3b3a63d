use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use db_infra::config::db::{DbKind, DbLocation, RuntimeEnv};
use db_infra::orchestrate_migration;
use migration::MigrationCommand;
use tracing::info;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Solitaire score store migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Runtime environment (selects SOLITAIRE_DB or SOLITAIRE_TEST_DB)
    #[arg(short, long, value_enum, default_value = "prod")]
    env: Env,

    /// Explicit SQLite file, overriding the environment
    #[arg(long)]
    db_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,db_infra=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let env = match args.env {
        Env::Prod => RuntimeEnv::Prod,
        Env::Test => RuntimeEnv::Test,
    };

    // In-memory databases vanish when the command exits, so the CLI only targets files.
    let location = match args.db_file {
        Some(path) => DbLocation::file(path),
        None => match DbLocation::from_env(env, DbKind::SqliteFile) {
            Ok(location) => location,
            Err(e) => {
                eprintln!("❌ {e}");
                std::process::exit(2);
            }
        },
    };

    let command: MigrationCommand = args.command.into();
    if let Err(e) = orchestrate_migration(&location, env, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
    info!(?command, db = %location.conn_spec(), "migration command finished");
}
