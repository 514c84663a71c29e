use anyhow::Context;
use bridge::model::DigitizeModel;
use bridge::server::Bridge;
use clap::Parser;
use curvecore::extract::ImageFrame;
use curvecore::prelude::{Dataset, MemoryStore, RecordStore};
use generator::profile::{build_chart_frame, corner_calibration, SyntheticChartConfig};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::JobConfig;
use workflow::runner::{JobResult, Runner};

mod bridge;
mod exchange;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Chart curve digitizer workflow driver")]
struct Args {
    /// Run a single extraction pass and print a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a job config from YAML
    #[arg(long)]
    job: Option<PathBuf>,
    /// Source chart image; a synthetic chart is generated when omitted
    #[arg(long)]
    image: Option<PathBuf>,
    /// Target curve color as #RRGGBB
    #[arg(long, default_value = "#0000ff")]
    color: String,
    #[arg(long, default_value_t = 30.0)]
    tolerance: f64,
    #[arg(long, default_value_t = 1)]
    sample_step: usize,
    /// Write the final point sequence to this CSV path
    #[arg(long)]
    export: Option<PathBuf>,
    /// Keep the HTTP bridge alive for incoming frames
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let job_config = if let Some(path) = &args.job {
        JobConfig::load(path)?
    } else {
        JobConfig::from_args(&args.color, args.tolerance, args.sample_step)
    };

    let runner = Runner::new(job_config.clone());
    let bridge = Bridge::new(Arc::new(runner.clone()));

    if args.offline {
        let image_path = args
            .image
            .clone()
            .or_else(|| job_config.image.clone().map(PathBuf::from));

        let result = match image_path {
            Some(path) => {
                let frame = load_frame(&path)?;
                runner.execute(&frame)?
            }
            None => {
                let synth = SyntheticChartConfig {
                    curve_color: job_config.color.clone(),
                    ..SyntheticChartConfig::default()
                };
                let frame = build_chart_frame(&synth)?;
                let calibration = corner_calibration(&synth)?;
                runner.execute_calibrated(&frame, &calibration)?
            }
        };

        println!(
            "Offline run -> raw {}, kept {}, notes {:?}",
            result.raw_count, result.kept_count, result.notes
        );

        let mut store: MemoryStore<Dataset> = MemoryStore::new();
        let dataset =
            result.to_dataset("offline-1", "offline pass", &job_config.color, epoch_millis());
        store.put("offline-1", dataset);

        bridge.publish(&model_from(&result));
        bridge.publish_status("Offline extraction results ready.");

        if let Some(path) = &args.export {
            let stored = store
                .get("offline-1")
                .context("offline dataset missing from store")?;
            exchange::export_csv(&stored.points, path)?;
            println!("Exported {} points to {}", stored.points.len(), path.display());
        }

        let (extractions, kept, dropped, errors) = runner.metrics_snapshot();
        info!(
            "metrics after offline pass: extractions {} kept {} dropped {} errors {}",
            extractions, kept, dropped, errors
        );
    }

    if args.serve {
        bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn model_from(result: &JobResult) -> DigitizeModel {
    DigitizeModel {
        points: result.points.clone(),
        raw_count: result.raw_count,
        kept_count: result.kept_count,
        notes: result.notes.clone(),
    }
}

fn load_frame(path: &Path) -> anyhow::Result<ImageFrame> {
    let decoded = image::ImageReader::open(path)
        .with_context(|| format!("opening image {}", path.display()))?
        .decode()
        .with_context(|| format!("decoding image {}", path.display()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    ImageFrame::from_rgba(width as usize, height as usize, rgba.into_raw())
        .context("wrapping decoded frame")
}
