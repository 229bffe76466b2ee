//! Command line interface for the student records service.
use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use records_api::{ApiServer, AppState, ServerConfig};
use records_data::{Database, DbConfig};

#[derive(Parser)]
#[command(name = "records")]
#[command(about = "Student records REST service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Listen host (overrides STUDENTS_API_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides STUDENTS_API_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Create the students table and indexes
    InitDb,
    /// Show database connectivity and table status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let db_config = DbConfig::from_env();

    match cli.command {
        Commands::Serve { host, port } => {
            let db = Database::connect(&db_config).await?;
            db.migrate().await?;

            let mut server_config = ServerConfig::from_env();
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }

            ApiServer::new(server_config)
                .run(AppState::new(db))
                .await?;
        }
        Commands::InitDb => {
            println!("🔄 Initializing database ({})...", db_config.redacted_url());
            let db = Database::connect(&db_config).await?;
            let version = db.ping().await?;
            println!("✅ Connected: {version}");

            db.migrate().await?;
            let info = db.info().await?;
            println!("✅ Students table ready ({} records)", info.total_students);
        }
        Commands::Status => {
            let db = Database::connect(&db_config).await?;
            let version = db.ping().await?;
            let info = db.info().await?;

            println!("📊 Database Status");
            println!("   Server:         {version}");
            println!("   URL:            {}", db_config.redacted_url());
            println!("   Table exists:   {}", info.table_exists);
            println!("   Total students: {}", info.total_students);
        }
    }

    Ok(())
}
