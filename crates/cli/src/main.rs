use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use passport_crop_core::cropping::domain::crop_rectangle_calculator::CropRectangleCalculator;
use passport_crop_core::cropping::domain::scaling_factor::{
    ScalingFactor, DEFAULT_BIAS, DEFAULT_MAGNITUDE,
};
use passport_crop_core::detection::domain::landmark_detector::LandmarkDetector;
use passport_crop_core::detection::infrastructure::onnx_face_box_detector::DEFAULT_CONFIDENCE;
use passport_crop_core::detection::infrastructure::two_stage_landmark_detector::TwoStageLandmarkDetector;
use passport_crop_core::photo::infrastructure::image_file_reader::ImageFileReader;
use passport_crop_core::photo::infrastructure::image_file_writer::{
    jfif_density, ImageFileWriter,
};
use passport_crop_core::pipeline::crop_passport_photo_use_case::CropPassportPhotoUseCase;
use passport_crop_core::pipeline::passport_photo_error::PassportPhotoError;
use passport_crop_core::shared::constants::{
    DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT_FILENAME, FACE_MODEL_NAME, FACE_MODEL_URL,
    IMAGE_EXTENSIONS, LANDMARK_MODEL_NAME,
};
use passport_crop_core::shared::model_resolver::{self, model_cache_dir};

/// Crop a portrait photo to passport proportions around the detected face.
#[derive(Parser)]
#[command(name = "passport-crop")]
struct Cli {
    /// Input image (JPEG, PNG or TIFF).
    image: PathBuf,

    /// Output file.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILENAME)]
    output: PathBuf,

    /// Crop aspect ratio as width/height, e.g. 35/45 or 0.8.
    #[arg(long, default_value = "35/45", value_parser = parse_ratio)]
    aspect_ratio: f64,

    /// Crop height as a multiple of the face height.
    #[arg(long, default_value_t = DEFAULT_MAGNITUDE)]
    scale_magnitude: f64,

    /// Vertical shift of the crop, relative to the face height (1.0 = none).
    #[arg(long, default_value_t = DEFAULT_BIAS)]
    scale_bias: f64,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Extra directory searched for model files before the cache.
    #[arg(long)]
    models_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        if let Some(PassportPhotoError::DependencyMissing { model, .. }) =
            e.downcast_ref::<PassportPhotoError>()
        {
            eprintln!("{}", install_guidance(model));
        }
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let detector = build_detector(&cli)?;
    let calculator = CropRectangleCalculator::new(
        cli.aspect_ratio,
        ScalingFactor::new(cli.scale_magnitude, cli.scale_bias),
    );
    let mut use_case = CropPassportPhotoUseCase::new(
        Box::new(ImageFileReader::new()),
        detector,
        Box::new(ImageFileWriter::new().with_quality(cli.quality)),
        calculator,
    );

    println!(
        "Crop: aspect ratio {:.4}, scale magnitude {}, scale bias {}",
        calculator.aspect_ratio(),
        calculator.scaling().magnitude,
        calculator.scaling().bias
    );
    let photo = use_case.execute(&cli.image, &cli.output)?;

    let features: Vec<&str> = photo.features.iter().map(|f| f.as_str()).collect();
    println!(
        "Original: {}x{} px at {:.2}x{:.2} DPI",
        photo.original.width, photo.original.height, photo.original.dpi_x, photo.original.dpi_y
    );
    println!("Detected features: {}", features.join(", "));
    println!("Saved passport photo to {}", cli.output.display());
    println!(
        "Cropped: {}x{} px at {}",
        photo.cropped.width,
        photo.cropped.height,
        dpi_summary(photo.cropped.dpi(), &cli.output)
    );
    Ok(())
}

fn build_detector(cli: &Cli) -> Result<Box<dyn LandmarkDetector>, Box<dyn std::error::Error>> {
    let bundled = bundled_models_dir();
    let search_dirs: Vec<&Path> = cli
        .models_dir
        .as_deref()
        .into_iter()
        .chain(bundled.as_deref())
        .collect();

    log::info!("Resolving model: {FACE_MODEL_NAME}");
    let face_model = model_resolver::resolve(
        FACE_MODEL_NAME,
        Some(FACE_MODEL_URL),
        &search_dirs,
        Some(Box::new(download_progress)),
    )
    .map_err(|e| PassportPhotoError::dependency_missing(FACE_MODEL_NAME, e))?;
    eprintln!();

    log::info!("Resolving model: {LANDMARK_MODEL_NAME}");
    let landmark_model = model_resolver::resolve(LANDMARK_MODEL_NAME, None, &search_dirs, None)
        .map_err(|e| PassportPhotoError::dependency_missing(LANDMARK_MODEL_NAME, e))?;

    Ok(Box::new(TwoStageLandmarkDetector::from_models(
        &face_model,
        &landmark_model,
        cli.confidence,
    )?))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.image.exists() {
        return Err(format!("Input file not found: {}", cli.image.display()).into());
    }
    if !has_extension(&cli.image, IMAGE_EXTENSIONS) {
        return Err(format!(
            "Unsupported input format: {} (expected one of: {})",
            cli.image.display(),
            IMAGE_EXTENSIONS.join(", ")
        )
        .into());
    }
    if !(cli.aspect_ratio.is_finite() && cli.aspect_ratio > 0.0) {
        return Err(format!("Aspect ratio must be positive, got {}", cli.aspect_ratio).into());
    }
    if !(cli.scale_magnitude.is_finite() && cli.scale_magnitude > 0.0) {
        return Err(format!(
            "Scale magnitude must be positive, got {}",
            cli.scale_magnitude
        )
        .into());
    }
    if !cli.scale_bias.is_finite() {
        return Err(format!("Scale bias must be finite, got {}", cli.scale_bias).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if !(1..=100).contains(&cli.quality) {
        return Err(format!("Quality must be between 1 and 100, got {}", cli.quality).into());
    }
    Ok(())
}

/// Accepts `w/h` or a plain decimal.
fn parse_ratio(s: &str) -> Result<f64, String> {
    let value = match s.split_once('/') {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().map_err(|_| format!("invalid width in '{s}'"))?;
            let h: f64 = h.trim().parse().map_err(|_| format!("invalid height in '{s}'"))?;
            if h == 0.0 {
                return Err(format!("zero height in '{s}'"));
            }
            w / h
        }
        None => s.trim().parse().map_err(|_| format!("invalid ratio '{s}'"))?,
    };
    Ok(value)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// `models/` next to the executable, for packaged installs.
fn bundled_models_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join("models"))
}

/// JPEG outputs carry the rounded density, so both values are shown.
fn dpi_summary((dpi_x, dpi_y): (f64, f64), output: &Path) -> String {
    let exact = format!("{dpi_x:.2}x{dpi_y:.2} DPI");
    if has_extension(output, &["jpg", "jpeg"]) {
        format!(
            "{exact} (stored in the JPEG header as {}x{} DPI)",
            jfif_density(dpi_x),
            jfif_density(dpi_y)
        )
    } else {
        exact
    }
}

fn install_guidance(model: &str) -> String {
    let cache = model_cache_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "the user cache directory".to_string());
    let mut guidance = format!(
        "Place {model} in {cache}, or pass --models-dir <DIR> pointing at the directory \
         that contains it."
    );
    if model == LANDMARK_MODEL_NAME {
        guidance.push_str(
            "\nThe landmark model must be an ONNX 68-point (iBUG layout) regressor: \
             input [1, 3, S, S] RGB scaled to [0, 1], showing a square crop around one face; \
             output 136 values x0, y0, ..., x67, y67 normalised to that crop.",
        );
    }
    guidance
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}
