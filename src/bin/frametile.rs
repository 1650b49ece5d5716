use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use frametile::{
    BrightnessMode, FfmpegLogLevel, Pipeline, PipelineOptions, ProgressCallback, ProgressInfo,
    VideoFrames,
};
use indicatif::{ProgressBar, ProgressStyle};

const CLI_AFTER_HELP: &str = "Examples:
  frametile input.mp4
  frametile input.mp4 1.2 0 0 3
  frametile input.mp4 --brightness-range 0.5:1.5 --out tiles --prefix cam0_ --progress";

const USAGE: &str = "usage: frametile video_name [brightness_scale paddingx paddingy numsplit]";

#[derive(Debug, Parser)]
#[command(
    name = "frametile",
    version,
    about = "Split video frames into randomly rotated, brightness-adjusted square tiles",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input video path.
    video: PathBuf,

    /// Fixed brightness scale (> 0). Without it a random scale is drawn per frame.
    #[arg(allow_negative_numbers = true)]
    brightness_scale: Option<f32>,

    /// Pixels excluded from the left edge of each frame.
    padding_x: Option<u32>,

    /// Pixels excluded from the top edge of each frame.
    padding_y: Option<u32>,

    /// Split count: how finely the long axis is divided into strides.
    numsplit: Option<u32>,

    /// Random brightness range as START:END, used when no fixed scale is given.
    #[arg(long, conflicts_with = "brightness_scale")]
    brightness_range: Option<String>,

    /// Output directory for tile images.
    #[arg(long, default_value = frametile::configuration::DEFAULT_OUTPUT_DIRECTORY)]
    out: PathBuf,

    /// Prefix prepended to every tile file name.
    #[arg(long, default_value = "")]
    prefix: String,

    /// FFmpeg log level (quiet, fatal, error, warning, info, debug).
    #[arg(long)]
    log_level: Option<String>,

    /// Show additional logging output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar.
    #[arg(long)]
    progress: bool,
}

fn parse_brightness_range(value: &str) -> Result<BrightnessMode, Box<dyn std::error::Error>> {
    let (start, end) = value
        .split_once(':')
        .ok_or_else(|| format!("invalid --brightness-range (expected START:END): {value}"))?;
    Ok(BrightnessMode::Uniform {
        start: start.trim().parse()?,
        end: end.trim().parse()?,
    })
}

fn pipeline_options(cli: &Cli) -> Result<PipelineOptions, Box<dyn std::error::Error>> {
    let options = PipelineOptions::new()
        .with_output_directory(&cli.out)
        .with_prefix(cli.prefix.as_str());

    let options = match (
        cli.brightness_scale,
        cli.padding_x,
        cli.padding_y,
        cli.numsplit,
    ) {
        (Some(scale), Some(padding_x), Some(padding_y), Some(split_count)) => options
            .with_brightness(BrightnessMode::Fixed(scale))
            .with_padding(padding_x, padding_y)
            .with_split_count(split_count),
        (None, None, None, None) => match &cli.brightness_range {
            Some(range) => options.with_brightness(parse_brightness_range(range)?),
            None => options,
        },
        _ => return Err(USAGE.into()),
    };

    options.validate()?;
    Ok(options)
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(0);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total_frames {
            self.bar.set_length(total.max(info.frames_processed));
        }
        self.bar.set_position(info.frames_processed);
        self.bar.set_message(format!("{} tile(s)", info.tiles_saved));
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "frametile=debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if let Some(level) = &cli.log_level {
        frametile::set_ffmpeg_log_level(level.parse::<FfmpegLogLevel>()?);
    }

    // Options are checked before the video or the output directory is touched.
    let mut options = pipeline_options(&cli)?;

    let progress = if cli.progress {
        let progress = Arc::new(TerminalProgress::new()?);
        options = options.with_progress(progress.clone());
        Some(progress)
    } else {
        None
    };

    let video = VideoFrames::open(&cli.video)?;
    let mut pipeline = Pipeline::new(options)?;
    let summary = pipeline.run_video(video)?;

    if let Some(progress) = progress {
        progress.bar.finish_with_message("done");
    }

    if cli.verbose {
        eprintln!(
            "{} {}",
            "success:".green().bold(),
            format!(
                "Saved {} tile(s) from {} frame(s) to {}",
                summary.tiles,
                summary.frames,
                cli.out.display()
            )
            .green()
        );
    }

    println!("ok");
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use frametile::BrightnessMode;

    use super::{Cli, parse_brightness_range, pipeline_options};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn single_argument_uses_random_defaults() {
        let options = pipeline_options(&parse(&["frametile", "input.mp4"])).unwrap();
        assert_eq!(
            options.brightness(),
            BrightnessMode::Uniform {
                start: 0.7,
                end: 1.3
            }
        );
        assert_eq!(options.split().split_count, 3);
        assert_eq!(options.split().padding_x, 0);
        assert_eq!(options.output().directory.to_str(), Some("out"));
    }

    #[test]
    fn five_arguments_use_fixed_scale() {
        let options =
            pipeline_options(&parse(&["frametile", "input.mp4", "1.5", "10", "20", "4"])).unwrap();
        assert_eq!(options.brightness(), BrightnessMode::Fixed(1.5));
        assert_eq!(options.split().padding_x, 10);
        assert_eq!(options.split().padding_y, 20);
        assert_eq!(options.split().split_count, 4);
    }

    #[test]
    fn partial_arguments_are_a_usage_error() {
        let error = pipeline_options(&parse(&["frametile", "input.mp4", "1.5", "10"])).unwrap_err();
        assert!(error.to_string().starts_with("usage:"));
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        for scale in ["0", "-1"] {
            let cli = parse(&["frametile", "input.mp4", scale, "0", "0", "3"]);
            assert!(pipeline_options(&cli).is_err(), "scale {scale} should be rejected");
        }
    }

    #[test]
    fn brightness_range_formats() {
        assert_eq!(
            parse_brightness_range("0.5:1.5").unwrap(),
            BrightnessMode::Uniform {
                start: 0.5,
                end: 1.5
            }
        );
        assert!(parse_brightness_range("0.5-1.5").is_err());
        assert!(parse_brightness_range("a:b").is_err());
    }

    #[test]
    fn brightness_range_conflicts_with_fixed_scale() {
        let result = Cli::try_parse_from([
            "frametile",
            "input.mp4",
            "1.0",
            "0",
            "0",
            "3",
            "--brightness-range",
            "0.5:1.5",
        ]);
        assert!(result.is_err());
    }
}
