//! camtext - run one recognition task end to end
//!
//! Replays a recorded recognizer answer for a frame, pushes it through the
//! bridge exactly as a host app would, and prints the delivered tree.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use camera_text_bridge::config::{self, AppConfig};
use camera_text_bridge::shared::{LocalActivity, LocalContext};
use camera_text_bridge::vision::ReplayProvider;
use camera_text_bridge::{
    CameraFacing, CaptureParams, ImageDimensions, RecognitionTask, SerializedRegion, TaskOptions,
    TextRecognizerDelegate, UiLoop,
};

/// camtext - camera text recognition bridge harness
#[derive(Parser, Debug)]
#[command(name = "camtext")]
#[command(about = "Map a recorded text recognition onto a camera preview view")]
struct Args {
    /// JSON recording of the recognizer's answer (array of blocks)
    #[arg(short, long)]
    recording: PathBuf,

    /// Image file to take frame bytes and dimensions from
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Frame width, when no image is given
    #[arg(long)]
    width: Option<u32>,

    /// Frame height, when no image is given
    #[arg(long)]
    height: Option<u32>,

    /// Sensor rotation in degrees
    #[arg(long, default_value = "0")]
    rotation: u32,

    /// Device pixel density
    #[arg(long, default_value = "1.0")]
    density: f32,

    /// Camera that took the frame
    #[arg(long, value_enum, default_value = "back")]
    facing: Facing,

    /// Preview view width (defaults to the oriented frame width)
    #[arg(long)]
    view_width: Option<i32>,

    /// Preview view height (defaults to the oriented frame height)
    #[arg(long)]
    view_height: Option<i32>,

    /// Preview view left padding
    #[arg(long, default_value = "0")]
    padding_left: i32,

    /// Preview view top padding
    #[arg(long, default_value = "0")]
    padding_top: i32,

    /// Simulated recognizer latency in milliseconds
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Recognizer timeout in milliseconds (overrides the config file)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Facing {
    Back,
    Front,
}

impl From<Facing> for CameraFacing {
    fn from(facing: Facing) -> Self {
        match facing {
            Facing::Back => CameraFacing::Back,
            Facing::Front => CameraFacing::Front,
        }
    }
}

/// Prints the delivered tree to stdout
struct PrintingDelegate {
    pretty: bool,
    completed: AtomicBool,
}

impl PrintingDelegate {
    fn is_completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }
}

impl TextRecognizerDelegate for PrintingDelegate {
    fn on_text_recognized(&self, blocks: Vec<SerializedRegion>) {
        let json = if self.pretty {
            serde_json::to_string_pretty(&blocks)
        } else {
            serde_json::to_string(&blocks)
        };
        match json {
            Ok(json) => println!("{}", json),
            Err(e) => warn!("Failed to encode recognized text: {}", e),
        }
    }

    fn on_task_completed(&self) {
        self.completed.store(true, Ordering::SeqCst);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, config_source) = config::load_or_create_config(args.config.as_deref())?;
    init_logging(&config)?;
    match &config_source {
        Some(path) => info!("Loaded configuration from {:?}", path),
        None => info!("Using default configuration"),
    }

    let (image_data, width, height) = load_frame(&args)?;
    let facing = CameraFacing::from(args.facing);
    let dims = ImageDimensions::new(width, height, args.rotation, facing);

    let params = CaptureParams {
        width,
        height,
        rotation: args.rotation,
        density: args.density,
        facing,
        view_width: args
            .view_width
            .unwrap_or((dims.width() as f32 * args.density) as i32),
        view_height: args
            .view_height
            .unwrap_or((dims.height() as f32 * args.density) as i32),
        view_padding_left: args.padding_left,
        view_padding_top: args.padding_top,
    };

    let mut options = TaskOptions::from(&config.recognizer);
    if let Some(timeout_ms) = args.timeout_ms {
        options.recognizer_timeout = Some(Duration::from_millis(timeout_ms));
    }

    let mut provider = ReplayProvider::from_path(&args.recording)?;
    if let Some(latency_ms) = args.latency_ms {
        provider = provider.with_latency(Duration::from_millis(latency_ms));
    }

    let ui = UiLoop::new();
    let activity = Arc::new(LocalActivity::new(ui.handle()));
    let context = Arc::new(LocalContext::new(activity.clone()));
    let delegate = Arc::new(PrintingDelegate {
        pretty: args.pretty || config.output.pretty_json,
        completed: AtomicBool::new(false),
    });

    let task = RecognitionTask::new(
        delegate.clone(),
        &context,
        Arc::new(provider),
        image_data,
        params,
        options,
    )?;
    info!("Starting recognition task {}", task.id());
    task.start()?;

    // Act as the UI thread until the task has delivered or given up
    while !delegate.is_completed() {
        if ui.run_next(Duration::from_millis(50)) {
            continue;
        }
        if task.state().is_terminal() && ui.pending() == 0 {
            break;
        }
    }
    task.join();

    info!("Recognition task finished: {:?}", task.state());
    Ok(())
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.general.log_level))
        .context("Invalid log level")?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Frame bytes and size, from an image file or from explicit dimensions
fn load_frame(args: &Args) -> Result<(Vec<u8>, u32, u32)> {
    if let Some(path) = &args.image {
        let img = image::open(path)
            .with_context(|| format!("Failed to load frame image: {:?}", path))?;
        let gray = img.to_luma8();
        let (width, height) = gray.dimensions();
        return Ok((gray.into_raw(), width, height));
    }

    match (args.width, args.height) {
        (Some(width), Some(height)) => Ok((Vec::new(), width, height)),
        _ => bail!("Either --image or both --width and --height are required"),
    }
}
