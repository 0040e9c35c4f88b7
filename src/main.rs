use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, Timelike};
use clap::{Parser, Subcommand};

use heat_health::api::AppState;
use heat_health::{HeatAssistant, HeatHealthConfig, logging, report, web};

#[derive(Parser)]
#[command(name = "heat-health", version, about = "Heat health assistant: weather, AI health tips and nearby places")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the JSON API and the front end
    Serve {
        /// Overrides server.port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print a heat report for one city
    Report {
        /// City name; prompted for when omitted
        #[arg(long)]
        city: Option<String>,
    },
}

fn prompt_city() -> Result<String> {
    print!("Enter city name: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .with_context(|| "Failed to read city name")?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = HeatHealthConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let assistant = HeatAssistant::from_config(&config)?;
            let state = AppState {
                assistant: Arc::new(assistant),
            };
            web::run(&config.server, state).await
        }
        Command::Report { city } => {
            let city = match city {
                Some(city) => city,
                None => prompt_city()?,
            };
            let assistant = HeatAssistant::from_config(&config)?;
            let assessment = assistant.assess(&city).await.map_err(|e| {
                anyhow::anyhow!("❌ Error: {}", e.user_message())
            })?;
            let hour = u8::try_from(Local::now().hour()).unwrap_or_default();
            print!("{}", report::render(&city, &assessment, hour));
            Ok(())
        }
    }
}
