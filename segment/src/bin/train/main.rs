mod args;
mod training;

use args::Args;
use chrono::Local;
use clap::Parser;
use log::LevelFilter;
use segment::history::LossHistory;
use segment::samples::Samples;
use simplelog::{Config, SimpleLogger};
use std::{
    error::Error,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use training::trainer::Trainer;
use utils::unique_path;

fn main() -> Result<(), Box<dyn Error>> {
    let args = init()?;

    // Finish the running epoch on SIGINT instead of aborting mid-batch
    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_handler = Arc::clone(&stop_flag);

    ctrlc::set_handler(move || {
        log::info!("Received SIGINT, stopping after the current epoch...");
        stop_flag_handler.store(true, Ordering::Relaxed);
    })?;

    log::info!(
        "Generating {} images of {}x{} pixels",
        args.samples,
        args.image_size,
        args.image_size
    );
    let samples = Samples::generate(args.samples, args.image_size, args.seed);
    let (mut train, val, test) = samples.split(args.val_ratio, args.test_ratio, args.seed);
    log::info!(
        "Split into {} train, {} validation and {} test images",
        train.len(),
        val.len(),
        test.len()
    );

    if train.is_empty() {
        return Err("Training set is empty, lower --val-ratio or --test-ratio".into());
    }
    if val.is_empty() {
        log::warn!("Validation set is empty, early stopping will never trigger");
    }

    let mut trainer = Trainer::new(&args, train.pixels())?;
    let history = trainer.train(&mut train, &val, &test, &stop_flag)?;

    let path = write_history(&history, Path::new(&args.out_dir))?;
    log::info!("Loss history written to {}", path.display());

    Ok(())
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();
    SimpleLogger::init(LevelFilter::Info, Config::default())?;

    Ok(args)
}

fn write_history(history: &LossHistory, out_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(out_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d-%H%M");
    let path = unique_path(out_dir, &format!("history-{}", timestamp), "csv");

    let mut writer = BufWriter::new(File::create(&path)?);
    history.write(&mut writer)?;
    writer.flush()?;

    Ok(path)
}
