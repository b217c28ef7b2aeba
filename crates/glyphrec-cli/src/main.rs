//! glyphrec - train and run a nearest-neighbor character recognizer
//!
//! ```text
//! glyphrec train <training-images-dir> <output-data-path> [options]
//! glyphrec recognize <image> <data-path> [options]
//! ```

mod labeler;
mod report;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glyphrec_recog::accuracy::evaluate_for_image;
use glyphrec_recog::{
    BorderOptions, DedupOptions, KnowledgeBase, RecognizeOptions, Recognizer, SegmentOptions,
    SegmentOrder, ShapeMatchMethod, TrainOptions, TrainingOutcome,
};
use labeler::TerminalLabeler;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "glyphrec", version)]
#[command(about = "Segment, label and recognize characters in scanned images", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Label the glyphs of a directory of images and save a knowledge base
    Train {
        /// Directory with the training images
        training_images_dir: PathBuf,

        /// Existing directory the knowledge base is written to
        output_data_path: PathBuf,

        /// Shape distance below which a glyph reuses the previous label;
        /// lower values prompt more often
        #[arg(long, default_value_t = 0.25)]
        contour_matching_threshold: f64,

        /// Hu-moment formula used to compare shapes
        #[arg(long, value_enum, default_value = "i1")]
        match_method: MatchMethod,

        /// Image file extension to use (repeatable)
        #[arg(long = "extension", default_values_t = vec!["jpg".to_string()])]
        extensions: Vec<String>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Recognize the glyphs of one image with a saved knowledge base
    Recognize {
        /// Image to recognize
        image: PathBuf,

        /// Directory holding the knowledge base
        data_path: PathBuf,

        /// Compare counts with `<image-stem>.accuracy.json` next to the image
        #[arg(long)]
        compute_accuracy: bool,

        /// Write the recognized string to this file instead of stdout
        #[arg(long)]
        save_to_file: Option<PathBuf>,

        /// Write a copy of the image with every glyph outlined
        #[arg(long)]
        annotated: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

/// Options shared by both commands
#[derive(Debug, Args)]
struct PipelineArgs {
    /// Erase shapes near the image edges (default)
    #[arg(long, overrides_with = "no_clear_borders")]
    clear_borders: bool,

    /// Keep shapes near the image edges
    #[arg(long, overrides_with = "clear_borders")]
    no_clear_borders: bool,

    /// Width of the edge band in pixels
    #[arg(long, default_value_t = 50)]
    border_distance: u32,

    /// Order glyphs by text line instead of by discovery
    #[arg(long)]
    reading_order: bool,
}

impl PipelineArgs {
    fn border(&self) -> BorderOptions {
        BorderOptions::default()
            .with_enabled(!self.no_clear_borders)
            .with_radius(self.border_distance)
    }

    fn segment(&self) -> SegmentOptions {
        let order = if self.reading_order {
            SegmentOrder::Reading
        } else {
            SegmentOrder::Discovery
        };
        SegmentOptions::default().with_order(order)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MatchMethod {
    I1,
    I2,
    I3,
}

impl From<MatchMethod> for ShapeMatchMethod {
    fn from(method: MatchMethod) -> Self {
        match method {
            MatchMethod::I1 => ShapeMatchMethod::I1,
            MatchMethod::I2 => ShapeMatchMethod::I2,
            MatchMethod::I3 => ShapeMatchMethod::I3,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Train {
            training_images_dir,
            output_data_path,
            contour_matching_threshold,
            match_method,
            extensions,
            pipeline,
        } => {
            let options = TrainOptions::default()
                .with_extensions(extensions)
                .with_border(pipeline.border())
                .with_segment(pipeline.segment())
                .with_dedup(
                    DedupOptions::default()
                        .with_threshold(contour_matching_threshold)
                        .with_method(match_method.into()),
                );

            eprintln!("Type the character shown for each glyph; type esc to cancel.");
            let mut labeler = TerminalLabeler::new(io::stdin().lock(), io::stderr());
            let outcome = glyphrec_recog::train(
                &training_images_dir,
                &output_data_path,
                options,
                &mut labeler,
            )
            .with_context(|| format!("training on {}", training_images_dir.display()))?;

            match outcome {
                TrainingOutcome::Completed(kb) => {
                    println!("Training complete: {} samples saved", kb.len());
                }
                TrainingOutcome::Cancelled { accepted } => {
                    println!("Training cancelled; {} labeled samples discarded", accepted);
                }
            }
            Ok(())
        }

        Command::Recognize {
            image,
            data_path,
            compute_accuracy,
            save_to_file,
            annotated,
            pipeline,
        } => {
            let kb = KnowledgeBase::load_dir(&data_path)
                .with_context(|| format!("loading knowledge base from {}", data_path.display()))?;
            let options = RecognizeOptions::default()
                .with_border(pipeline.border())
                .with_segment(pipeline.segment());
            let recognizer = Recognizer::from_knowledge_base(&kb, options)?;

            let pix = glyphrec_io::read_image(&image)
                .with_context(|| format!("reading {}", image.display()))?;
            let result = recognizer
                .recognize(&pix)
                .with_context(|| format!("recognizing {}", image.display()))?;
            let histogram = result.histogram();

            print!("{}", report::format_histogram(&histogram));
            match &save_to_file {
                Some(path) => std::fs::write(path, &result.text)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", result.text),
            }

            if let Some(path) = &annotated {
                glyphrec_io::write_image(&result.annotated, path)
                    .with_context(|| format!("writing {}", path.display()))?;
            }

            if compute_accuracy {
                if let Some(report) = evaluate_for_image(&image, &histogram) {
                    print!("{}", report::format_accuracy(&report));
                } else {
                    eprintln!("No usable ground truth for {}, accuracy skipped", image.display());
                }
            }
            Ok(())
        }
    }
}
