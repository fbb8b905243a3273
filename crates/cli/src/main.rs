use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use smilescope_core::capture::infrastructure::image_sequence_source::ImageSequenceSource;
use smilescope_core::detection::domain::region_detector::RegionDetector;
use smilescope_core::detection::infrastructure::model_resolver;
use smilescope_core::detection::infrastructure::onnx_region_detector::OnnxRegionDetector;
use smilescope_core::display::infrastructure::image_sequence_surface::ImageSequenceSurface;
use smilescope_core::pipeline::detect_smiles_use_case::DetectSmilesUseCase;
use smilescope_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use smilescope_core::shared::constants::{
    FACE_MODEL_NAME, FACE_MODEL_URL, SMILE_MODEL_NAME, SMILE_MODEL_URL,
};
use smilescope_core::shared::options::PipelineOptions;

/// Live face and smile detection over an image sequence.
#[derive(Parser)]
#[command(name = "smilescope")]
struct Cli {
    /// Input image file or directory of frames.
    input: PathBuf,

    /// Directory where annotated frames are written.
    #[arg(long, default_value = "annotated")]
    out_dir: PathBuf,

    /// Face model file (resolved from cache or downloaded if omitted).
    #[arg(long)]
    face_model: Option<PathBuf>,

    /// Smile model file (resolved from cache or downloaded if omitted).
    #[arg(long)]
    smile_model: Option<PathBuf>,

    /// Downscale factor applied before detection (values below 1 are
    /// treated as 1).
    #[arg(long, default_value = "1.0")]
    scale: f64,

    /// Also run face detection on the mirror image.
    #[arg(long)]
    try_flip: bool,

    /// Detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    confidence: f64,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let face_detector = build_detector(
        cli.face_model.as_deref(),
        FACE_MODEL_NAME,
        FACE_MODEL_URL,
        cli.confidence,
    )?;
    let smile_detector = build_detector(
        cli.smile_model.as_deref(),
        SMILE_MODEL_NAME,
        SMILE_MODEL_URL,
        cli.confidence,
    )?;

    let source = ImageSequenceSource::open(&cli.input)?;
    let surface = ImageSequenceSurface::new(&cli.out_dir)?;
    let options = PipelineOptions::new(cli.scale, cli.try_flip);

    let mut use_case = DetectSmilesUseCase::new(
        Box::new(source),
        face_detector,
        smile_detector,
        Box::new(surface),
        options,
        Box::new(StdoutPipelineLogger::default()),
    );

    let stats = use_case.execute()?;
    log::info!(
        "Wrote {} annotated frames to {} ({} discarded on shutdown)",
        stats.rendered,
        cli.out_dir.display(),
        stats.drained
    );
    Ok(())
}

fn build_detector(
    explicit_path: Option<&Path>,
    model_name: &str,
    model_url: &str,
    confidence: f64,
) -> Result<Box<dyn RegionDetector>, Box<dyn std::error::Error>> {
    let model_path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => {
            log::info!("Resolving model: {model_name}");
            let path = model_resolver::resolve(
                model_name,
                model_url,
                None,
                Some(Box::new(download_progress)),
            )?;
            eprintln!();
            path
        }
    };
    Ok(Box::new(OnnxRegionDetector::new(&model_path, confidence)?))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input not found: {}", cli.input.display()).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if let Some(path) = &cli.face_model {
        if !path.exists() {
            return Err(format!("Face model not found: {}", path.display()).into());
        }
    }
    if let Some(path) = &cli.smile_model {
        if !path.exists() {
            return Err(format!("Smile model not found: {}", path.display()).into());
        }
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading model... {pct}%");
    } else {
        eprint!("\rDownloading model... {downloaded} bytes");
    }
}
