mod args;

use args::Args;
use clap::Parser;
use log::LevelFilter;
use segment::{replay, LossHistory};
use simplelog::{Config, SimpleLogger};
use std::{error::Error, fs::File, io::BufReader};
use stopping::EarlyStopping;

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    let mut monitor = EarlyStopping::new(args.tolerance, args.min_delta)?;

    let file = File::open(&args.history)?;
    let history = LossHistory::read(BufReader::new(file))?;
    log::info!("Loaded {} epochs from {}", history.len(), args.history);

    match replay(&history, &mut monitor) {
        Some(epoch) => log::info!(
            "Training would stop after epoch {} of {} (tolerance {}, min delta {})",
            epoch,
            history.len(),
            monitor.tolerance(),
            monitor.min_delta()
        ),
        None => log::info!(
            "Training would run all {} epochs ({} of {} diverging epochs used)",
            history.len(),
            monitor.counter(),
            monitor.tolerance()
        ),
    }

    Ok(())
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::init(level, Config::default())?;

    Ok(args)
}
