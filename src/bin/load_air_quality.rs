//! Runs the air-quality load step once and prints the first rows.

use air_quality_loader::{run, validate, write_parquet, AirQualityError, PipelineConfig};
use argh::FromArgs;
use std::path::PathBuf;

#[derive(FromArgs)]
/// Load hourly air-quality data for the configured cities into one table
struct Args {
    /// path to a JSON config file; falls back to AIR_QUALITY_CONFIG, then to
    /// the built-in defaults
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// write the table as Parquet to this path; falls back to
    /// AIR_QUALITY_OUTPUT
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AirQualityError> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args: Args = argh::from_env();

    let config_path = args
        .config
        .or_else(|| std::env::var_os("AIR_QUALITY_CONFIG").map(PathBuf::from));
    let config = match config_path {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            PipelineConfig::from_json_file(&path).await?
        }
        None => {
            log::info!("No config file specified, using defaults");
            PipelineConfig::default()
        }
    };

    let table = run(config).await?;
    if !validate(&table) {
        log::error!("The output is undefined or does not match the schema");
        std::process::exit(1);
    }
    println!("{}", table.head(Some(5)));

    let output = args
        .output
        .or_else(|| std::env::var_os("AIR_QUALITY_OUTPUT").map(PathBuf::from));
    if let Some(output) = output {
        write_parquet(table, &output).await?;
    }
    Ok(())
}
