#![deny(unsafe_code)]
//! CLI binary for gradient-png.
//!
//! Subcommands:
//! - `render`: encode one image and write it atomically
//! - `batch`: encode many seeds in parallel into a directory
//! - `list`: print available sources, directions and interpolations

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use gradient_png_core::{CompressionLevel, Encoder};
use gradient_png_gradient::{Direction, Interpolation};
use gradient_png_render::batch::plan_batch;
use gradient_png_render::{render_batch, write_png, ImageSeed, SourceKind};
use log::debug;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "gradient-png", about = "Hash-derived gradient PNG generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode one image and write it as a PNG.
    Render {
        #[command(flatten)]
        image: ImageArgs,

        /// Numeric seed; the gradient hash is derived from it unless --hash is given.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Read the whole image description from a JSON seed file instead of flags.
        #[arg(
            long,
            conflicts_with_all = [
                "seed", "source", "width", "height", "hash",
                "direction", "interpolation", "level", "params",
            ]
        )]
        seed_file: Option<PathBuf>,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// Encode a run of consecutive seeds in parallel.
    Batch {
        #[command(flatten)]
        image: ImageArgs,

        /// Number of images.
        #[arg(short = 'n', long, default_value_t = 8)]
        count: usize,

        /// Seed of the first image; each following image uses the next seed.
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Directory to write into. Must exist.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// File name prefix.
        #[arg(long, default_value = "gradient")]
        prefix: String,
    },
    /// List available sources, directions and interpolations.
    List,
}

#[derive(Args)]
struct ImageArgs {
    /// Pixel source name (gradient, solid, checker).
    #[arg(long, default_value = "gradient")]
    source: String,

    /// Image width in pixels.
    #[arg(short = 'W', long, default_value_t = 256)]
    width: u32,

    /// Image height in pixels.
    #[arg(short = 'H', long, default_value_t = 256)]
    height: u32,

    /// Hex hash whose first 12 digits pick the gradient colors.
    #[arg(long)]
    hash: Option<String>,

    /// Gradient direction (horizontal, vertical, diagonal).
    #[arg(long)]
    direction: Option<String>,

    /// Gradient interpolation (srgb, oklab).
    #[arg(long)]
    interpolation: Option<String>,

    /// zlib compression level, 0-9.
    #[arg(short, long, default_value_t = 6)]
    level: u32,

    /// Source parameters as a JSON object.
    #[arg(long, default_value = "{}")]
    params: String,
}

impl ImageArgs {
    /// Folds the flags into a seed record, validating names up front.
    fn to_seed(&self, seed: u64) -> Result<ImageSeed, CliError> {
        let mut params: Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let obj = params
            .as_object_mut()
            .ok_or_else(|| CliError::Input("--params must be a JSON object".into()))?;

        if let Some(hash) = &self.hash {
            obj.insert("hash".into(), json!(hash));
        }
        if let Some(d) = &self.direction {
            let d: Direction = d.parse().map_err(|e| CliError::Input(format!("{e}")))?;
            obj.insert("direction".into(), json!(d.name()));
        }
        if let Some(i) = &self.interpolation {
            let i: Interpolation = i.parse().map_err(|e| CliError::Input(format!("{e}")))?;
            obj.insert("interpolation".into(), json!(i.name()));
        }

        let mut image = ImageSeed::new(&self.source, self.width, self.height, seed);
        image.params = params;
        image.encoder.compression =
            CompressionLevel::new(self.level).map_err(|e| CliError::Input(e.to_string()))?;
        Ok(image)
    }
}

fn read_seed_file(path: &Path) -> Result<ImageSeed, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid seed file {}: {e}", path.display())))
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let sources = SourceKind::list_sources();
            let directions: Vec<_> = Direction::ALL.iter().map(|d| d.name()).collect();
            let interpolations: Vec<_> = Interpolation::ALL.iter().map(|i| i.name()).collect();
            if cli.json {
                let info = json!({
                    "sources": sources,
                    "directions": directions,
                    "interpolations": interpolations,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Sources:");
                for name in sources {
                    println!("  {name}");
                }
                println!("Directions:");
                println!("  {}", directions.join(", "));
                println!("Interpolations:");
                println!("  {}", interpolations.join(", "));
            }
        }
        Command::Render {
            image,
            seed,
            seed_file,
            output,
        } => {
            let image = match seed_file {
                Some(path) => read_seed_file(&path)?,
                None => image.to_seed(seed)?,
            };
            debug!("render seed: {}", serde_json::to_string(&image)?);

            let source = image.build_source()?;
            let bytes = write_png(
                &Encoder::new(image.encoder),
                image.width,
                image.height,
                &source,
                &output,
            )?;

            if cli.json {
                let info = json!({
                    "seed": image,
                    "resolved": source.params(),
                    "bytes": bytes,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, seed {}) -> {} ({bytes} bytes)",
                    image.source,
                    image.width,
                    image.height,
                    image.seed,
                    output.display()
                );
            }
        }
        Command::Batch {
            image,
            count,
            seed,
            out_dir,
            prefix,
        } => {
            let template = image.to_seed(seed)?;
            // Surface bad source names once instead of once per image.
            template.build_source()?;

            let jobs = plan_batch(&template, count, seed, &out_dir, &prefix);
            let outcomes = render_batch(&jobs);
            let failed = outcomes.iter().filter(|o| !o.is_ok()).count();

            if cli.json {
                let results: Vec<Value> = outcomes
                    .iter()
                    .map(|o| match &o.result {
                        Ok(bytes) => json!({
                            "seed": o.seed,
                            "output": o.path.display().to_string(),
                            "bytes": bytes,
                        }),
                        Err(e) => json!({
                            "seed": o.seed,
                            "output": o.path.display().to_string(),
                            "error": e.to_string(),
                        }),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json!({ "images": results }))?);
            } else {
                for o in &outcomes {
                    match &o.result {
                        Ok(bytes) => eprintln!("{} ({bytes} bytes)", o.path.display()),
                        Err(e) => eprintln!("{}: {e}", o.path.display()),
                    }
                }
            }

            if failed > 0 {
                return Err(CliError::Batch {
                    failed,
                    total: outcomes.len(),
                });
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
