use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use agegender_core::annotation::infrastructure::raster_annotator::RasterAnnotator;
use agegender_core::classification::infrastructure::onnx_attribute_classifier::{
    OnnxAgeClassifier, OnnxGenderClassifier,
};
use agegender_core::detection::infrastructure::onnx_ssd_detector::OnnxSsdDetector;
use agegender_core::error::PipelineError;
use agegender_core::pipeline::pipeline_config::PipelineConfig;
use agegender_core::pipeline::pipeline_driver::PipelineDriver;
use agegender_core::pipeline::pipeline_logger::{PipelineLogger, StdoutPipelineLogger};
use agegender_core::shared::constants::{
    DEFAULT_CONFIDENCE, DEFAULT_PADDING, IMAGE_EXTENSIONS, WINDOW_TITLE,
};
use agegender_core::shared::model_paths::ModelPaths;
use agegender_core::video::domain::frame_sink::{FrameSink, HeadlessSink};
use agegender_core::video::domain::frame_source::FrameSource;
use agegender_core::video::domain::image_writer::ImageWriter;
use agegender_core::video::infrastructure::camera_source::CameraSource;
use agegender_core::video::infrastructure::image_file_source::ImageFileSource;
use agegender_core::video::infrastructure::image_file_writer::ImageFileWriter;
use agegender_core::video::infrastructure::video_file_source::VideoFileSource;
use agegender_core::video::infrastructure::window_sink::WindowSink;

/// Real-time face detection with age and gender estimation.
#[derive(Parser)]
#[command(name = "agegender")]
struct Cli {
    /// Input image or video file. Reads from the camera when omitted.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Camera device index used when no --image is given.
    #[arg(long, default_value_t = 0)]
    camera: u32,

    /// Directory containing the face, age and gender models.
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Face detection confidence threshold, exclusive (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f32,

    /// Pixels added around each face before classification.
    #[arg(long, default_value_t = DEFAULT_PADDING)]
    padding: u32,

    /// Also save the last annotated frame to this image file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Process without opening a window.
    #[arg(long)]
    no_display: bool,

    /// Run the age and gender networks concurrently for each face.
    #[arg(long)]
    parallel_classify: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

type Networks = (OnnxSsdDetector, OnnxGenderClassifier, OnnxAgeClassifier);

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mut logger = StdoutPipelineLogger::default();
    let ((detector, gender, age), mut source) = prepare(&cli, &mut logger)?;
    let mut sink: Box<dyn FrameSink> = if cli.no_display {
        Box::new(HeadlessSink)
    } else {
        Box::new(WindowSink::new(WINDOW_TITLE))
    };

    let config = PipelineConfig {
        confidence: cli.confidence,
        padding: cli.padding,
        parallel_classify: cli.parallel_classify,
    };
    let mut driver = PipelineDriver::new(
        Box::new(detector),
        Box::new(gender),
        Box::new(age),
        Box::new(RasterAnnotator::new()),
        Box::new(logger),
        config,
    );

    let summary = driver.run(source.as_mut(), sink.as_mut())?;
    log::info!(
        "Processed {} frames: {} faces classified, {} skipped",
        summary.frames_processed,
        summary.faces_classified,
        summary.faces_skipped
    );

    if let Some(output) = &cli.output {
        match &summary.last_frame {
            Some(frame) => {
                ImageFileWriter::new().write(output, frame)?;
                log::info!("Output written to {}", output.display());
            }
            None => log::warn!("No frame was processed; {} not written", output.display()),
        }
    }

    driver.logger().summary();
    Ok(())
}

/// Loads the networks, then opens the input. A missing model is reported
/// before the source is touched.
fn prepare(
    cli: &Cli,
    logger: &mut dyn PipelineLogger,
) -> Result<(Networks, Box<dyn FrameSource>), PipelineError> {
    logger.info("Loading networks...");
    let paths = match &cli.models_dir {
        Some(dir) => ModelPaths::in_dir(dir),
        None => ModelPaths::from_install_root(),
    };
    let networks = load_networks(&paths)?;
    logger.info("Networks loaded successfully.");

    let source = open_source(cli)?;
    Ok((networks, source))
}

/// Verifies all model files up front, then loads them in age, gender, face
/// order so a missing file fails before any source is opened.
fn load_networks(paths: &ModelPaths) -> Result<Networks, PipelineError> {
    paths.verify()?;
    log::info!("Loading models from {}", paths.models_dir().display());
    let age = OnnxAgeClassifier::load(paths)?;
    let gender = OnnxGenderClassifier::load(paths)?;
    let detector = OnnxSsdDetector::load(paths)?;
    Ok((detector, gender, age))
}

fn open_source(cli: &Cli) -> Result<Box<dyn FrameSource>, PipelineError> {
    match &cli.image {
        Some(path) if is_image(path) => Ok(Box::new(ImageFileSource::open(path)?)),
        Some(path) => Ok(Box::new(VideoFileSource::open(path)?)),
        None => Ok(Box::new(CameraSource::open(cli.camera)?)),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !(cli.confidence > 0.0 && cli.confidence < 1.0) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0 (exclusive), got {}",
            cli.confidence
        )
        .into());
    }
    if let Some(output) = &cli.output {
        if !is_image(output) {
            return Err(format!(
                "Output must be an image file ({}), got {}",
                IMAGE_EXTENSIONS.join(", "),
                output.display()
            )
            .into());
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
