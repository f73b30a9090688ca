use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use flight_planner::config::{default_config, load_config};
use flight_planner::routing::{AssetLoader, Params, Router};

#[derive(Parser)]
#[command(name = "planner-cli")]
#[command(about = "Command line client for the Flight Planner", long_about = None)]
struct Cli {
    /// Server base URL for API commands
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the client route table offline
    Routes {
        /// Config file holding the route table (defaults when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        action: RouteAction,
    },
    /// Search flights
    Flights {
        #[arg(long)]
        destination: Option<String>,
        /// Departure date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        max_duration_minutes: Option<i64>,
        #[arg(long)]
        max_price: Option<String>,
    },
    /// Show one flight
    Flight { id: u64 },
    /// Show the seat map and recommendation of a flight
    Seats {
        id: u64,
        #[arg(short, long, default_value_t = 1)]
        passengers: u32,
        #[arg(long)]
        window: bool,
        #[arg(long)]
        legroom: bool,
        #[arg(long)]
        exit: bool,
    },
    /// Book seats on a flight
    Book {
        id: u64,
        /// Seat numbers, e.g. 12A 12B
        #[arg(required = true)]
        seats: Vec<String>,
    },
}

#[derive(Subcommand)]
enum RouteAction {
    /// Resolve a browser URL to a route
    Resolve { url: String },
    /// Build the browser URL of a named route from key=value params
    Href { name: String, params: Vec<String> },
    /// List the route table in match order
    List,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Routes { config, action } => routes(config, action),
        Commands::Flights {
            destination,
            date,
            max_duration_minutes,
            max_price,
        } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(destination) = destination {
                query.push(("destination", destination));
            }
            if let Some(date) = date {
                query.push(("date", date));
            }
            if let Some(max) = max_duration_minutes {
                query.push(("maxDurationMinutes", max.to_string()));
            }
            if let Some(max) = max_price {
                query.push(("maxPrice", max));
            }
            let res = reqwest::Client::new()
                .get(format!("{}/api/flights", cli.url))
                .query(&query)
                .send()
                .await?;
            print_response(res).await
        }
        Commands::Flight { id } => {
            let res = reqwest::get(format!("{}/api/flights/{id}", cli.url)).await?;
            print_response(res).await
        }
        Commands::Seats {
            id,
            passengers,
            window,
            legroom,
            exit,
        } => {
            let res = reqwest::Client::new()
                .get(format!("{}/api/flights/{id}/seats", cli.url))
                .query(&[
                    ("numberOfPassengers", passengers.to_string()),
                    ("preferWindow", window.to_string()),
                    ("preferExtraLegroom", legroom.to_string()),
                    ("preferNearExit", exit.to_string()),
                ])
                .send()
                .await?;
            print_response(res).await
        }
        Commands::Book { id, seats } => {
            let body = json!({
                "flightId": id,
                "passengers": seats.len(),
                "selectedSeats": seats,
            });
            let res = reqwest::Client::new()
                .post(format!("{}/api/flights/bookings", cli.url))
                .json(&body)
                .send()
                .await?;
            print_response(res).await
        }
    }
}

fn routes(config: Option<PathBuf>, action: RouteAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => load_config(&path)?,
        None => default_config()?,
    };
    let loader = Arc::new(AssetLoader::new(&config.app.assets_dir));
    let router = Router::from_config(&config.app, loader)?;

    match action {
        RouteAction::Resolve { url } => {
            let matched = router.resolve_url(&url)?;
            let out = json!({
                "name": matched.name(),
                "path": matched.path,
                "params": matched.params,
                "query": matched.query,
                "hash": matched.hash,
                "component": matched.route.component.name(),
                "lazy": matched.route.component.is_lazy(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        RouteAction::Href { name, params } => {
            let params = parse_params(&params)?;
            let location = router.location_for(&name, &params)?;
            println!("{}", router.href(&location));
        }
        RouteAction::List => {
            for route in router.routes() {
                let kind = if route.component.is_lazy() { "lazy" } else { "eager" };
                println!(
                    "{:<16} {:<32} {} ({kind})",
                    route.name,
                    route.path(),
                    route.component.name()
                );
            }
        }
    }
    Ok(())
}

fn parse_params(raw: &[String]) -> Result<Params, String> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| format!("expected key=value, got '{pair}'"))
        })
        .collect()
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
