use anyhow::{Context, Result};
use clap::Parser;
use flightwx_cli::report::format_assessment;
use flightwx_cli::FlightWxClient;
use flightwx_core::{assess, Coordinate, ThresholdTable, WeatherReading};

#[derive(Parser, Debug)]
#[command(author, version, about = "Classify weather readings into a risk level", long_about = None)]
struct Args {
    /// JSON file mapping parameter names to values; assessed locally
    #[arg(long, conflicts_with = "url")]
    reading: Option<String>,

    /// JSON threshold overrides layered over the defaults (local mode)
    #[arg(long, requires = "reading")]
    thresholds: Option<String>,

    /// flightwx server URL; scores the latest stored reading at --lat/--lon
    #[arg(long, requires_all = ["lat", "lon"])]
    url: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,
}

fn load_thresholds(path: Option<&str>) -> Result<ThresholdTable> {
    let Some(path) = path else {
        return Ok(ThresholdTable::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading thresholds from {}", path))?;
    Ok(ThresholdTable::default_with_overrides(&raw)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.reading {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading weather from {}", path))?;
        let reading = WeatherReading::from_json_str(&raw)?;
        let table = load_thresholds(args.thresholds.as_deref())?;
        print!("{}", format_assessment(&assess(&reading, &table)));
        return Ok(());
    }

    let (Some(url), Some(lat), Some(lon)) = (&args.url, args.lat, args.lon) else {
        anyhow::bail!("pass --reading <file>, or --url with --lat and --lon");
    };
    let coordinate = Coordinate::try_new(lat, lon).map_err(anyhow::Error::msg)?;

    let client = FlightWxClient::new(url.clone());
    let result = client.assess_risk(coordinate).await?;
    println!("Weather at {}:", coordinate);
    for (parameter, value) in result.weather_data.iter() {
        println!("  {:<22} {}", parameter, value);
    }
    println!("Risk: {} (score {})", result.risk_level, result.risk_score);
    Ok(())
}
