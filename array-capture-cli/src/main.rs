mod config;

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;

use array_capture_core::{CaptureProvider, DeviceRecorder, SaveError};
use array_capture_cpal::CpalCapture;

#[derive(Debug, clap::Parser)]
#[command(version, about, long_about = None)]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// List input devices visible to the capture backend
    ListDevices,
    /// Record a labeled batch of samples
    Record(RecordArgs),
}

#[derive(Debug, clap::Args)]
struct RecordArgs {
    /// Path to the run configuration file
    #[clap(short, long)]
    config: PathBuf,

    /// Hardware profile to use, overriding `selected_hardware`
    #[clap(long)]
    hardware: Option<String>,

    /// Seconds to wait between samples
    #[clap(long, default_value_t = 1.0)]
    delay: f64,

    /// Stop the run on the first failed capture instead of skipping it
    #[clap(long)]
    abort_on_error: bool,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    match App::parse().command {
        Commands::ListDevices => list_devices(),
        Commands::Record(args) => record(args),
    }
}

fn list_devices() -> Result<(), anyhow::Error> {
    let backend = CpalCapture::new();
    for device in backend.list_devices()? {
        println!(
            "{} [{} ch]{}",
            device.name,
            device.max_channels,
            if device.is_default { " (default)" } else { "" }
        );
    }
    Ok(())
}

fn record(args: RecordArgs) -> Result<(), anyhow::Error> {
    let run = config::RunConfig::read(&args.config)?;
    let profile_name = args
        .hardware
        .unwrap_or_else(|| run.selected_hardware.clone());
    let hardware = run.profile(&profile_name)?;
    log::info!("using hardware profile {:?}: {:?}", profile_name, hardware);

    let sample_count = run.experiment.sample_count;
    let mut recorder = DeviceRecorder::new(
        CpalCapture::new(),
        hardware,
        &run.recorder,
        run.experiment.clone(),
    )?;
    log::info!("starting experiment {}", run.experiment.experiment_id);

    let mut failed = 0u32;
    for index in 1..=sample_count {
        log::info!("recording sample {}/{}", index, sample_count);

        match recorder.capture() {
            Ok(buffer) => match recorder.save(&buffer, index) {
                Ok(saved) => {
                    log::info!("sample {} saved ({} files)", index, saved.wav_paths.len());
                }
                // Audio for this sample is on disk; the sidecar is behind by
                // one entry until the run is reconciled.
                Err(SaveError::Label(e)) => {
                    failed += 1;
                    log::error!("sample {}: audio saved but label append failed: {}", index, e);
                }
                Err(e) => return Err(e.into()),
            },
            Err(e) => {
                failed += 1;
                log::error!("sample {} failed: {}", index, e);
                if args.abort_on_error {
                    return Err(e.into());
                }
            }
        }

        if index < sample_count {
            thread::sleep(Duration::from_secs_f64(args.delay));
        }
    }

    if failed > 0 {
        log::warn!("{} of {} samples failed", failed, sample_count);
    }
    Ok(())
}
