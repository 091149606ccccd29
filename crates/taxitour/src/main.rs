// crates/taxitour/src/main.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use polars::prelude::col;
use taxitour_core::{dataset, download, query, report, schema, weather};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Guided tour of polars over the NYC Yellow Taxi dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch trip months and weather data into the data directory
    Download(DownloadArgs),
    /// Print the dataset schema and validate it against the data dictionary
    Schema(DataArgs),
    /// Preview the first rows of the dataset
    Head(HeadArgs),
    /// Aggregate trips per pickup month
    Summary(SummaryArgs),
    /// Show hourly weather readings with their code descriptions
    Weather(DataArgs),
    /// Run the whole tour in order
    Run(DataArgs),
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Directory holding the downloaded files (TAXITOUR_DATA_DIR, default: data)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl DataArgs {
    fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(dataset::data_dir_from_env)
    }
}

#[derive(Args, Debug)]
struct DownloadArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Year to fetch; defaults to the most recent published window
    #[arg(long)]
    year: Option<i32>,
    /// Skip the weather archive and code table
    #[arg(long)]
    skip_weather: bool,
}

#[derive(Args, Debug)]
struct HeadArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Number of rows to show
    #[arg(long, default_value_t = 5)]
    rows: u32,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Include pickup months up to this one
    #[arg(long, default_value_t = 3)]
    months_through: u32,
    /// Print the optimized query plan before collecting
    #[arg(long)]
    explain: bool,
    /// Write the collected summary to a parquet file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Download(args) => handle_download(args).await,
        Command::Schema(args) => handle_schema(&args.data_dir()),
        Command::Head(args) => handle_head(&args.data.data_dir(), args.rows),
        Command::Summary(args) => handle_summary(&args),
        Command::Weather(args) => handle_weather(&args.data_dir()),
        Command::Run(args) => handle_run(&args.data_dir()),
    }
}

async fn handle_download(args: DownloadArgs) -> Result<()> {
    let data_dir = args.data.data_dir();
    let today = Utc::now().date_naive();
    let months = dataset::available_months(args.year, today)?;

    let client = reqwest::Client::new();
    let paths = download::download_trip_months(&client, &months, &data_dir).await?;
    info!(files = paths.len(), "trip data ready");

    if args.skip_weather {
        info!("skipping weather downloads at user request");
    } else {
        let request = download::WeatherRequest::for_nyc(today);
        download::download_weather(&client, &request, &data_dir).await?;
        download::download_weather_codes(&client, &data_dir).await?;
    }

    Ok(())
}

fn handle_schema(data_dir: &Path) -> Result<()> {
    let paths = dataset::downloaded_trip_paths(data_dir)?;
    let lf = query::scan_trips(&paths)?;
    let trip_schema = query::trip_schema(&lf)?;

    println!("{}", report::schema_table(&trip_schema));
    schema::validate_trip_schema(&trip_schema).context("trip schema failed validation")?;
    println!("Schema matches the TLC data dictionary.");
    Ok(())
}

fn handle_head(data_dir: &Path, rows: u32) -> Result<()> {
    let paths = dataset::downloaded_trip_paths(data_dir)?;
    let head = query::preview(query::scan_trips(&paths)?, rows)?;
    println!("{}", report::dataframe_table(&head, rows as usize)?);
    Ok(())
}

fn handle_summary(args: &SummaryArgs) -> Result<()> {
    let data_dir = args.data.data_dir();
    let paths = dataset::downloaded_trip_paths(&data_dir)?;
    let plan = query::monthly_summary(query::scan_trips(&paths)?, args.months_through);

    if args.explain {
        println!("{}", query::explain(&plan)?);
    }

    let summary = plan.collect()?;
    println!("{}", report::dataframe_table(&summary, report::DEFAULT_MAX_ROWS)?);

    if let Some(output) = &args.output {
        let bytes = query::write_parquet(&summary, output)?;
        info!(path = %output.display(), bytes, "wrote summary parquet");
    }

    Ok(())
}

fn handle_weather(data_dir: &Path) -> Result<()> {
    let archive = weather::read_archive(&data_dir.join(download::WEATHER_FILE))
        .context("weather archive not found; run the download command first")?;
    let hourly = weather::hourly_dataframe(&archive)?;
    let codes = weather::read_weather_codes(&data_dir.join(download::WEATHER_CODES_FILE))?;
    let described = weather::describe_hourly(hourly, &weather::codes_dataframe(&codes)?)?;
    println!("{}", report::dataframe_table(&described, report::DEFAULT_MAX_ROWS)?);
    Ok(())
}

fn handle_run(data_dir: &Path) -> Result<()> {
    println!("--- Schema ---");
    handle_schema(data_dir)?;

    println!("\n--- First rows ---");
    handle_head(data_dir, 5)?;

    println!("\n--- Monthly summary (first quarter) ---");
    handle_summary(&SummaryArgs {
        data: DataArgs {
            data_dir: Some(data_dir.to_path_buf()),
        },
        months_through: 3,
        explain: true,
        output: None,
    })?;

    let weather_path = data_dir.join(download::WEATHER_FILE);
    if weather_path.exists() {
        println!("\n--- Trips joined with hourly weather ---");
        let paths = dataset::downloaded_trip_paths(data_dir)?;
        let archive = weather::read_archive(&weather_path)?;
        let hourly = weather::hourly_dataframe(&archive)?;
        let joined = weather::join_hourly_weather(query::scan_trips(&paths)?, hourly)
            .select([
                col(schema::PICKUP_COLUMN),
                col("total_amount"),
                col("temperature_2m"),
                col("weather_code"),
            ])
            .limit(5)
            .collect()?;
        println!("{}", report::dataframe_table(&joined, 5)?);
    } else {
        info!("weather archive not present, skipping the weather step");
    }

    Ok(())
}
