//! landmass CLI - drop dirt balls on a grid and classify the terrain.

mod gui;
mod prompt;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use landmass_core::random::time_seed;
use landmass_core::render::{format_heights, format_symbols, symbols_to_image};
use landmass_core::{Landmass, RandomSource, TerrainError, TerrainParams, generate};
use landmass_storage::{StorageError, TextStore};
use log::{info, warn};
use thiserror::Error;

use crate::prompt::Prompter;

const WELCOME: &str = "Welcome to terraformer assignment!";

// Pixels per cell in the PNG preview
const PNG_SCALE: u32 = 8;
const PNG_NAME: &str = "final_landmass.png";

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("input ended before {0} was given")]
    InputClosed(&'static str),
    #[error("viewer error: {0}")]
    Gui(#[from] eframe::Error),
}

/// Impact-deposit terrain generator.
#[derive(Parser)]
#[command(name = "landmass")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a landmass, print it and save the text maps.
    Generate(GenerateArgs),

    /// Open the interactive viewer.
    Gui {
        /// Initial seed (defaults to the clock).
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Random seed for reproducible generation (defaults to the clock).
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid width in cells. Asked for when omitted.
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells. Asked for when omitted.
    #[arg(long)]
    height: Option<usize>,

    /// Water level on the 0-255 scale (40-200).
    #[arg(long)]
    water_level: Option<i32>,

    /// Dirt ball radius in cells (minimum 2).
    #[arg(long)]
    radius: Option<u32>,

    /// Dirt ball power rating (minimum = radius).
    #[arg(long)]
    power: Option<u32>,

    /// Number of dirt balls to drop.
    #[arg(long)]
    deposits: Option<usize>,

    /// Output directory for the text maps.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Do not print the grids to the console.
    #[arg(short, long)]
    quiet: bool,

    /// Also write a colour preview PNG of the terrain bands.
    #[arg(long)]
    png: bool,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            seed: None,
            width: None,
            height: None,
            water_level: None,
            radius: None,
            power: None,
            deposits: None,
            output: PathBuf::from("."),
            quiet: false,
            png: false,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Generate(args)) => run_generate(args),
        Some(Commands::Gui { seed }) => gui::run_gui(seed.unwrap_or_else(time_seed)),
        None => run_generate(GenerateArgs::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let params = read_params(&args, &mut prompter)?;

    let mut source = args.seed.map_or_else(RandomSource::from_time, RandomSource::new);
    info!("using seed {}", source.seed());
    println!("Seed: {}", source.seed());

    let landmass = generate(&params, &mut source)?;

    if !args.quiet {
        let mut out = io::stdout().lock();
        print_landmass(&mut out, &landmass)?;
    }

    save_outputs(&args, &landmass);
    Ok(())
}

// Command-line values win; anything missing is asked for in the classic order
fn read_params<R: BufRead, W: Write>(
    args: &GenerateArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<TerrainParams, AppError> {
    prompter.say(WELCOME)?;
    let params = TerrainParams {
        width: prompter.or_ask(args.width, "Enter grid width: ")?,
        height: prompter.or_ask(args.height, "Enter grid height: ")?,
        water_level: prompter.or_ask(args.water_level, "Enter value for water level (40-200): ")?,
        radius: prompter.or_ask(args.radius, "Enter dirt ball radius (minimum 2): ")?,
        power: prompter.or_ask(args.power, "Enter dirt ball power rating (minimum = radius): ")?,
        deposits: prompter.or_ask(args.deposits, "Enter number of dirt balls to drop: ")?,
    };
    params.validate()?;
    Ok(params)
}

fn print_landmass(out: &mut impl Write, landmass: &Landmass) -> io::Result<()> {
    writeln!(out, "Raw 2D array:")?;
    writeln!(out, "{}", format_heights(&landmass.raw))?;
    writeln!(out, "Normalized 2D array:")?;
    writeln!(out, "{}", format_heights(landmass.normalized.heights()))?;
    writeln!(out, "Polished ASCII character array:")?;
    writeln!(out, "{}", format_symbols(&landmass.symbols))?;
    out.flush()
}

// Save failures are reported and skipped; they never fail the run
fn save_outputs(args: &GenerateArgs, landmass: &Landmass) {
    let store = match TextStore::init(&args.output) {
        Ok(store) => store,
        Err(e) => {
            warn!("output directory unavailable: {e}");
            println!("Failed to save the maps to {}: {e}", args.output.display());
            return;
        }
    };

    let report = store.save_landmass(landmass);
    for path in &report.saved {
        println!("Map saved to {}", path.display());
    }
    for (path, e) in &report.failed {
        println!("Failed to save the map to {} ({e})", path.display());
    }

    if args.png {
        let path = store.dir().join(PNG_NAME);
        match symbols_to_image(&landmass.symbols, PNG_SCALE).save(&path) {
            Ok(()) => println!("Preview saved to {}", path.display()),
            Err(e) => {
                warn!("png export failed: {e}");
                println!("Failed to save the preview to {} ({e})", path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompts_only_for_missing_values() {
        let args = GenerateArgs {
            width: Some(10),
            height: Some(10),
            radius: Some(3),
            ..GenerateArgs::default()
        };
        let mut prompter = Prompter::new(Cursor::new("100\n5\n1\n"), Vec::new());
        let params = read_params(&args, &mut prompter).unwrap();
        assert_eq!(
            params,
            TerrainParams {
                width: 10,
                height: 10,
                water_level: 100,
                radius: 3,
                power: 5,
                deposits: 1,
            }
        );
        let asked = String::from_utf8(prompter.into_output()).unwrap();
        assert!(!asked.contains("grid width"));
        assert!(asked.contains("Enter value for water level (40-200): "));
    }

    #[test]
    fn welcome_comes_before_first_question() {
        let mut prompter = Prompter::new(Cursor::new("10\n10\n100\n3\n5\n1\n"), Vec::new());
        read_params(&GenerateArgs::default(), &mut prompter).unwrap();
        let asked = String::from_utf8(prompter.into_output()).unwrap();
        assert!(asked.starts_with("Welcome to terraformer assignment!\n"));
        assert!(asked.find("Welcome").unwrap() < asked.find("Enter grid width: ").unwrap());
    }

    #[test]
    fn out_of_range_answers_are_rejected() {
        let args = GenerateArgs::default();
        let mut prompter = Prompter::new(Cursor::new("10\n10\n250\n3\n5\n1\n"), Vec::new());
        let err = read_params(&args, &mut prompter).unwrap_err();
        assert!(matches!(
            err,
            AppError::Terrain(TerrainError::InvalidParameter {
                name: "water level",
                ..
            })
        ));
    }

    #[test]
    fn printed_sections_in_order() {
        let params = TerrainParams {
            width: 4,
            height: 2,
            water_level: 100,
            radius: 2,
            power: 2,
            deposits: 1,
        };
        let landmass = generate(&params, &mut RandomSource::new(1)).unwrap();
        let mut out = Vec::new();
        print_landmass(&mut out, &landmass).unwrap();
        let text = String::from_utf8(out).unwrap();

        let raw = text.find("Raw 2D array:").unwrap();
        let norm = text.find("Normalized 2D array:").unwrap();
        let polished = text.find("Polished ASCII character array:").unwrap();
        assert!(raw < norm && norm < polished);
        assert!(text.contains(" 255"));
    }
}
