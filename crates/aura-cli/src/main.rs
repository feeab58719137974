use std::path::PathBuf;

use argh::FromArgs;
use aura_cli::{
    batch::{run_batch, BatchConfig},
    AuraParams,
};

/// Invert the images of a folder to greyscale and add a glow around the bright regions
#[derive(Debug, FromArgs)]
struct Args {
    /// aura size, 0 disables the glow
    #[argh(option, default = "15.0")]
    aura: f64,

    /// luminance above which an inverted pixel counts as bright
    #[argh(option, default = "200")]
    threshold: i32,

    /// folder with the images to process
    #[argh(option, default = "PathBuf::from(\"input\")")]
    input: PathBuf,

    /// folder receiving the processed images
    #[argh(option, default = "PathBuf::from(\"output\")")]
    output: PathBuf,

    /// jpeg quality, from 1 to 100
    #[argh(option, default = "95", from_str_fn(parse_quality))]
    quality: u8,

    /// number of worker threads, 0 uses all cores
    #[argh(option, short = 'j', default = "0")]
    threads: usize,
}

fn parse_quality(value: &str) -> Result<u8, String> {
    match value.parse::<u8>() {
        Ok(quality) if (1..=100).contains(&quality) => Ok(quality),
        _ => Err(format!("quality must be between 1 and 100, got {value}")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let config = BatchConfig::default()
        .with_input_dir(args.input)
        .with_output_dir(args.output)
        .with_params(AuraParams::new(args.aura, args.threshold))
        .with_jpeg_quality(args.quality)
        .with_num_threads(args.threads);

    let summary = run_batch(&config)?;

    if summary.all_failed() {
        return Err(format!("none of the {} images could be processed", summary.total).into());
    }

    Ok(())
}
