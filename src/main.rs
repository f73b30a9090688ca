use std::path::PathBuf;

use clap::Parser;

use flight_planner::lifecycle::startup::{self, StartupOptions};

#[derive(Parser)]
#[command(name = "flight-planner")]
#[command(about = "Flight search, seat selection and booking server", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload the client route table when the config file changes
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    startup::run(StartupOptions {
        config_path: args.config,
        watch: args.watch,
    })
    .await
}
