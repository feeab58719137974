use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use rayon::prelude::*;

use aura_image::ImageSize;
use aura_imgproc::aura::{apply_aura, AuraError, AuraParams};
use aura_io::{functional, jpeg, IoError};

/// Suffix appended to the file stem of every processed image.
pub const OUTPUT_SUFFIX: &str = "_processed";

/// JPEG quality used for the processed images.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// An error type for the batch driver.
#[derive(thiserror::Error, Debug)]
pub enum BatchError {
    /// A folder could not be created or listed.
    #[error("Failed to access the folder {0}. {1}")]
    Folder(PathBuf, #[source] std::io::Error),

    /// The input path has no file name to derive the output from.
    #[error("Path has no file name: {0}")]
    InvalidFileName(PathBuf),

    /// Error reading or writing an image.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error from the filter.
    #[error(transparent)]
    Aura(#[from] AuraError),

    /// Error creating the worker pool.
    #[error("Failed to build the thread pool. {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Folder scanned for images, not recursively.
    pub input_dir: PathBuf,
    /// Folder receiving the processed JPEG files.
    pub output_dir: PathBuf,
    /// Parameters of the filter, shared by every file.
    pub params: AuraParams,
    /// JPEG quality, from 1 to 100.
    pub jpeg_quality: u8,
    /// Number of worker threads, 0 lets rayon decide.
    pub num_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            params: AuraParams::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            num_threads: 0,
        }
    }
}

impl BatchConfig {
    /// Set the input folder.
    pub fn with_input_dir(mut self, input_dir: impl Into<PathBuf>) -> Self {
        self.input_dir = input_dir.into();
        self
    }

    /// Set the output folder.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the filter parameters.
    pub fn with_params(mut self, params: AuraParams) -> Self {
        self.params = params;
        self
    }

    /// Set the JPEG quality.
    pub fn with_jpeg_quality(mut self, jpeg_quality: u8) -> Self {
        self.jpeg_quality = jpeg_quality;
        self
    }

    /// Set the number of worker threads.
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }
}

/// A successfully processed image.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedFile {
    /// The source image.
    pub input: PathBuf,
    /// The written JPEG file.
    pub output: PathBuf,
    /// Size of the written image, after the downscale guard.
    pub size: ImageSize,
    /// Number of bright pixels found by the filter.
    pub bright_pixel_count: usize,
}

/// Outcome of one file of a batch.
#[derive(Debug)]
pub struct FileReport {
    /// The source image.
    pub input: PathBuf,
    /// The processed file or the reason it failed.
    pub result: Result<ProcessedFile, BatchError>,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Number of images found.
    pub total: usize,
    /// Number of images written.
    pub succeeded: usize,
    /// Number of images that failed.
    pub failed: usize,
    /// Per-file outcomes, in the order the files were listed.
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    fn from_reports(reports: Vec<FileReport>) -> Self {
        let succeeded = reports.iter().filter(|r| r.result.is_ok()).count();
        Self {
            total: reports.len(),
            succeeded,
            failed: reports.len() - succeeded,
            reports,
        }
    }

    /// Whether images were found and none of them could be processed.
    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.succeeded == 0
    }
}

/// List the supported images of a folder, sorted by path.
///
/// Sub-folders are not visited.
pub fn collect_images(input_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, BatchError> {
    let input_dir = input_dir.as_ref();
    let entries =
        std::fs::read_dir(input_dir).map_err(|e| BatchError::Folder(input_dir.to_path_buf(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| BatchError::Folder(input_dir.to_path_buf(), e))?
            .path();
        if path.is_file() && functional::is_supported_image(&path) {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Path of the processed image: `<output_dir>/<stem>_processed.jpg`.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use aura_cli::batch::output_path_for;
///
/// let out = output_path_for("input/cat.png", "output").unwrap();
/// assert_eq!(out, Path::new("output/cat_processed.jpg"));
/// ```
pub fn output_path_for(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<PathBuf, BatchError> {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .ok_or_else(|| BatchError::InvalidFileName(input.to_path_buf()))?;

    let mut file_name = stem.to_os_string();
    file_name.push(OUTPUT_SUFFIX);
    file_name.push(".jpg");

    Ok(output_dir.as_ref().join(file_name))
}

/// Decode an image, apply the filter and write the result as JPEG.
///
/// # Arguments
///
/// * `input` - The image to process.
/// * `output_dir` - The folder receiving the JPEG, it must exist.
/// * `params` - The filter parameters.
/// * `jpeg_quality` - The JPEG quality, from 1 to 100.
pub fn process_file(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    params: &AuraParams,
    jpeg_quality: u8,
) -> Result<ProcessedFile, BatchError> {
    let input = input.as_ref();
    let output = output_path_for(input, output_dir)?;

    let image = functional::read_image_any_rgb8(input)?;
    let filtered = apply_aura(&image, params)?;
    jpeg::write_image_jpeg_rgb8(&output, &filtered.image, jpeg_quality)?;

    Ok(ProcessedFile {
        input: input.to_path_buf(),
        output,
        size: filtered.image.size(),
        bright_pixel_count: filtered.bright_pixel_count,
    })
}

fn file_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
}

/// Process every supported image of the input folder.
///
/// The output folder is created when needed. A missing input folder is
/// created and reported as an empty batch. Files are processed in parallel
/// and a failing file never stops the others.
///
/// # Errors
///
/// Only folder-level failures are returned. Per-file failures are logged and
/// recorded in the [`BatchSummary`].
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary, BatchError> {
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| BatchError::Folder(config.output_dir.clone(), e))?;

    if !config.input_dir.exists() {
        std::fs::create_dir_all(&config.input_dir)
            .map_err(|e| BatchError::Folder(config.input_dir.clone(), e))?;
        log::warn!(
            "Input folder {} did not exist, created it",
            config.input_dir.display()
        );
        return Ok(BatchSummary::default());
    }

    let files = collect_images(&config.input_dir)?;
    if files.is_empty() {
        log::info!("No images found in {}", config.input_dir.display());
        return Ok(BatchSummary::default());
    }

    let num_files = files.len();
    log::info!(
        "Processing {} images from {}",
        num_files,
        config.input_dir.display()
    );
    log::info!(
        "Settings: aura={}, threshold={}",
        config.params.aura_size,
        config.params.white_threshold
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build()?;

    let reports = pool.install(|| {
        files
            .into_par_iter()
            .enumerate()
            .map(|(i, input)| {
                let result = process_file(
                    &input,
                    &config.output_dir,
                    &config.params,
                    config.jpeg_quality,
                );

                match &result {
                    Ok(processed) => log::info!(
                        "[{}/{}] {} -> {} ({} luminance points)",
                        i + 1,
                        num_files,
                        file_name(&input),
                        file_name(&processed.output),
                        processed.bright_pixel_count
                    ),
                    Err(e) => log::warn!(
                        "[{}/{}] {} - Error: {}",
                        i + 1,
                        num_files,
                        file_name(&input),
                        e
                    ),
                }

                FileReport { input, result }
            })
            .collect::<Vec<_>>()
    });

    let summary = BatchSummary::from_reports(reports);
    log::info!(
        "Batch processing complete: {}/{} images written to {}",
        summary.succeeded,
        summary.total,
        config.output_dir.display()
    );

    Ok(summary)
}
