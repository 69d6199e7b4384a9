use clap::Parser;
use log::{debug, info};
use std::error::Error;
use ulimit_flags::config::{Config, OutputFormat};
use ulimit_flags::loader::{read_sources, Loader};
use ulimit_flags::{text, utils, value};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Config::parse();
    utils::initialize_logger(args.log_level);
    debug!("{:?}", args);

    let sources = read_sources(&args.files)?;
    let loader = Loader::new(sources.iter().map(String::as_str).collect());
    let from_files = loader.fetch_ulimits()?;
    info!("Loaded {} ulimit(s) from {} file(s)", from_files.len(), sources.len());

    let from_flags = text::parse_ulimits(&args.ulimits)?;
    let ulimits = from_files.merge(&from_flags);

    match args.format {
        OutputFormat::Text => println!("{}", text::render(&ulimits)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&value::encode_ulimits(&ulimits))?
        ),
        OutputFormat::Runtime => println!(
            "{}",
            serde_json::to_string_pretty(&ulimits.to_ulimit_opt())?
        ),
    }

    Ok(())
}
