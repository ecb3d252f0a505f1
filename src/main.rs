use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use contact_cleaner::app::ports::GeocoderPort;
use contact_cleaner::config::Config;
use contact_cleaner::constants::DEFAULT_CONFIG_PATH;
use contact_cleaner::infra::{csv_io, ArcGisGeocoder, CountryReference, OfflineGeocoder};
use contact_cleaner::pipeline::cleaners::{
    AddressCleaner, EmailCleaner, NameCleaner, NumberCleaner, UrlCleaner,
};
use contact_cleaner::pipeline::CleaningPipeline;
use contact_cleaner::report::RunReport;
use contact_cleaner::{logging, metrics};

#[derive(Parser)]
#[command(name = "contact-cleaner")]
#[command(about = "Normalize and validate contact records from a CSV file")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file (defaults apply when it does not exist)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Do not call the geocoding service; every address is marked invalid
    #[arg(long, global = true)]
    skip_geocoding: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean every record of a CSV file and write the augmented CSV
    Clean {
        #[arg(long, default_value = "data_raw.csv")]
        input: PathBuf,
        #[arg(long, default_value = "data_clean.csv")]
        output: PathBuf,
    },
    /// Clean a single value and print the result as JSON
    Check {
        #[arg(value_enum)]
        field: Field,
        value: String,
        /// Two-letter region used when checking a phone number
        #[arg(long)]
        country: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Field {
    Name,
    Email,
    Url,
    Address,
    Number,
}

fn build_geocoder(config: &Config, skip: bool) -> anyhow::Result<Arc<dyn GeocoderPort>> {
    if skip {
        info!("Geocoding disabled");
        Ok(Arc::new(OfflineGeocoder))
    } else {
        Ok(Arc::new(ArcGisGeocoder::new(&config.geocoder)?))
    }
}

async fn run_clean(
    config: &Config,
    geocoder: Arc<dyn GeocoderPort>,
    input: PathBuf,
    output: PathBuf,
) -> anyhow::Result<RunReport> {
    let started_at = chrono::Local::now();
    let started = Instant::now();

    let countries = Arc::new(CountryReference::load());
    let pipeline = CleaningPipeline::standard(&config.cleaning, geocoder, countries)?;

    let mut records = csv_io::read_records(&input)?;
    let result = pipeline.run(&mut records).await;
    csv_io::write_records(&output, &records)?;

    Ok(RunReport {
        started_at,
        output_file: output.display().to_string(),
        elapsed: started.elapsed(),
        result,
    })
}

async fn run_check(
    config: &Config,
    geocoder: Arc<dyn GeocoderPort>,
    field: Field,
    value: &str,
    country: Option<&str>,
) -> anyhow::Result<String> {
    let cleaning = &config.cleaning;
    let json = match field {
        Field::Name => serde_json::to_string_pretty(&NameCleaner::new(&cleaning.name_format).clean(value))?,
        Field::Email => serde_json::to_string_pretty(&EmailCleaner::new().clean(value))?,
        Field::Url => serde_json::to_string_pretty(&UrlCleaner::new().clean(value))?,
        Field::Address => {
            let cleaner = AddressCleaner::new(
                geocoder,
                Arc::new(CountryReference::load()),
                cleaning.confidence_threshold,
            );
            serde_json::to_string_pretty(&cleaner.clean(value).await)?
        }
        Field::Number => {
            let cleaner = NumberCleaner::new(&cleaning.default_region, cleaning.number_format);
            serde_json::to_string_pretty(&cleaner.clean(value, country))?
        }
    };
    Ok(json)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    logging::init_logging();
    metrics::init_metrics();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let geocoder = build_geocoder(&config, cli.skip_geocoding)?;

    match cli.command {
        Commands::Clean { input, output } => {
            println!("🧹 Cleaning {}...", input.display());
            let report = run_clean(&config, geocoder, input, output).await?;
            print!("{}", report.render());
        }
        Commands::Check {
            field,
            value,
            country,
        } => {
            let json = run_check(&config, geocoder, field, &value, country.as_deref()).await?;
            println!("{}", json);
        }
    }

    Ok(())
}
