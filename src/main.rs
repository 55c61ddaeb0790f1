use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use game_inventory::config::{self, Environment};
use game_inventory::database::{connection, seed_data};
use game_inventory::server::{self, MigrateDirection};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the inventory web server.
    Serve {
        #[clap(short, long, default_value = "3000")]
        port: u16,
        #[clap(short, long, default_value = "inventory.db")]
        database: String,
        #[clap(short, long, value_enum, default_value_t = Environment::Development)]
        env: Environment,
    },
    /// Wipe and repopulate the store with sample catalog data.
    Seed {
        /// Store connection string, e.g. `sqlite:inventory.db`, or a file path.
        database: String,
    },
    /// Apply or roll back the store schema.
    Migrate {
        #[clap(short, long, default_value = "inventory.db")]
        database: String,
        #[clap(subcommand)]
        direction: MigrateDirection,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match cli.command {
        Command::Serve {
            port,
            database,
            env,
        } => {
            config::init_environment(env);
            server::start_server(port, &database).await?;
        }
        Command::Seed { database } => {
            let db = connection::establish_connection(&database).await?;
            seed_data::populate(&db).await?;
        }
        Command::Migrate {
            database,
            direction,
        } => {
            server::migrate_database(&database, direction).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("handlebars=off,{}", log_level)))
        .init();
}
