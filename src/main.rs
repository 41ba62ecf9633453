use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planeconv::models::{ConverterConfig, IndexedImage, VideoStandard};
use planeconv::rendering::AsmSource;
use planeconv::services::{
    Converter, PlayfieldConverter, PointerConverter, RowConverter, SheetConverter,
};

#[derive(Parser)]
#[command(name = "planeconv")]
#[command(about = "Convert palette-based PNG images into Amiga bitplane and sprite data")]
struct Cli {
    /// YAML configuration file (falls back to PLANECONV_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Adaptive-palette image with one color register write per row
    Rows {
        /// Input PNG file
        #[arg(default_value = "cpubltro.png")]
        input: PathBuf,

        /// Output assembler file
        #[arg(short, long, default_value = "cpubltro.i")]
        output: PathBuf,
    },
    /// Fixed four-color playfield image
    Playfield {
        /// Input PNG file
        #[arg(default_value = "cpubltro_img.png")]
        input: PathBuf,

        /// Output assembler file
        #[arg(short, long, default_value = "cpubltro_img.i")]
        output: PathBuf,
    },
    /// Mouse pointer sprite
    Pointer {
        /// Input PNG file
        #[arg(default_value = "pointer.png")]
        input: PathBuf,

        /// Output assembler file
        #[arg(short, long, default_value = "ptrdata.i")]
        output: PathBuf,
    },
    /// Ball animation sprite sheet
    Sheet {
        /// Directory holding the frame directories
        #[arg(default_value = ".")]
        base: PathBuf,

        /// 60Hz frames instead of 50Hz
        #[arg(long)]
        ntsc: bool,

        /// Output assembler file (default: <prefix>data.i)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planeconv=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = cli
        .config
        .or_else(|| std::env::var("PLANECONV_CONFIG").ok().map(PathBuf::from));

    let Some(command) = cli.command else {
        run_status_command(config_path.as_deref());
        return Ok(());
    };

    let config = ConverterConfig::load(config_path.as_deref()).with_context(|| {
        format!(
            "Failed to load configuration{}",
            config_path
                .as_deref()
                .map(|p| format!(" from {}", p.display()))
                .unwrap_or_default()
        )
    })?;

    match command {
        Commands::Rows { input, output } => {
            let converter = RowConverter::new(config.rows)?;
            run_convert(&converter, &input, &output)
        }
        Commands::Playfield { input, output } => {
            let converter = PlayfieldConverter::new(config.playfield)?;
            run_convert(&converter, &input, &output)
        }
        Commands::Pointer { input, output } => {
            let converter = PointerConverter::new(config.pointer)?;
            run_convert(&converter, &input, &output)
        }
        Commands::Sheet { base, ntsc, output } => {
            let standard = if ntsc {
                VideoStandard::Ntsc
            } else {
                VideoStandard::Pal
            };
            let output = output.unwrap_or_else(|| {
                PathBuf::from(format!("{}data.i", config.sheet.standard(standard).prefix))
            });
            let converter = SheetConverter::new(config.sheet, standard)?;
            let sheet = converter.convert_all(&base)?;
            write_output(&output, &sheet.to_asm())
        }
    }
}

/// Convert a single image and write the assembler source.
///
/// Nothing is written unless the whole image converts.
fn run_convert<C: Converter>(converter: &C, input: &Path, output: &Path) -> anyhow::Result<()> {
    let image = IndexedImage::open(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let converted = converter
        .convert(&image)
        .with_context(|| format!("{}", input.display()))?;
    write_output(output, &converted.to_asm())
}

fn write_output(output: &Path, code: &str) -> anyhow::Result<()> {
    std::fs::write(output, code)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("{}", output.display());
    Ok(())
}

/// Display configuration sources and available commands
fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("planeconv v{VERSION}");
    println!("Amiga bitplane and sprite data converter\n");

    println!("Environment Variables:");
    println!(
        "  PLANECONV_CONFIG = {}",
        std::env::var("PLANECONV_CONFIG")
            .as_deref()
            .unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG         = {}",
        std::env::var("RUST_LOG")
            .as_deref()
            .unwrap_or("planeconv=info (default)")
    );

    let config_source = match config_path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(path) => format!("{} (file not found)", path.display()),
        None => "built-in defaults".to_string(),
    };
    println!("\nConfig: {config_source}");

    println!("\nCommands:");
    println!("  planeconv rows       Adaptive-palette image (per-row register writes)");
    println!("  planeconv playfield  Fixed four-color playfield");
    println!("  planeconv pointer    Mouse pointer sprite");
    println!("  planeconv sheet      Ball animation sprite sheet (--ntsc for 60Hz)");
    println!("\nRun 'planeconv --help' for more details.");
}
