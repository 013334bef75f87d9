use anyhow::{Context, Result};
use clap::Parser;
use flightwx_cli::report::{format_classification, format_routes};
use flightwx_cli::FlightWxClient;
use flightwx_core::{
    enumerate_routes, parse_waypoints, permutation_count, AirportTable, Coordinate,
    CoordinateResolver,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank every waypoint ordering between two airports", long_about = None)]
struct Args {
    /// Departure airport code
    #[arg(long)]
    departure: String,

    /// Arrival airport code
    #[arg(long)]
    arrival: String,

    /// Intermediate waypoint as "lat,lon" (repeatable)
    #[arg(long = "waypoint")]
    waypoints: Vec<String>,

    /// File with one "lat,lon" waypoint per line
    #[arg(long)]
    waypoints_file: Option<String>,

    /// Number of routes to print
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Refuse to rank more waypoints than this
    #[arg(long, default_value_t = 8)]
    max_waypoints: usize,

    /// flightwx server URL; ranks locally when omitted
    #[arg(long)]
    url: Option<String>,
}

fn load_waypoints(args: &Args) -> Result<Vec<Coordinate>> {
    let mut text = args.waypoints.join("\n");
    if let Some(path) = &args.waypoints_file {
        let file = std::fs::read_to_string(path)
            .with_context(|| format!("reading waypoints from {}", path))?;
        text.push('\n');
        text.push_str(&file);
    }
    Ok(parse_waypoints(&text)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let waypoints = load_waypoints(&args)?;
    if waypoints.len() > args.max_waypoints {
        anyhow::bail!(
            "{} waypoints would produce {} routes; at most {} allowed (raise --max-waypoints)",
            waypoints.len(),
            permutation_count(waypoints.len())
                .map(|n| n.to_string())
                .unwrap_or_else(|| "too many".to_string()),
            args.max_waypoints
        );
    }

    if let Some(url) = &args.url {
        let client = FlightWxClient::new(url.clone());
        let plan = client
            .plan_route(&args.departure, &args.arrival, &waypoints)
            .await?;
        println!("{} -> {}", plan.departure, plan.arrival);
        print!("{}", format_routes(&plan.route_info, args.top));
        print!(
            "{}",
            format_classification("Departure weather", plan.weather_info_start.as_ref())
        );
        print!(
            "{}",
            format_classification("Arrival weather", plan.weather_info_end.as_ref())
        );
        return Ok(());
    }

    let airports = AirportTable::default();
    let start = airports.resolve(&args.departure)?;
    let end = airports.resolve(&args.arrival)?;
    let routes = enumerate_routes(start, end, &waypoints);

    println!(
        "{} -> {} ({} routes)",
        args.departure.trim().to_ascii_uppercase(),
        args.arrival.trim().to_ascii_uppercase(),
        routes.len()
    );
    print!("{}", format_routes(&routes, args.top));
    Ok(())
}
