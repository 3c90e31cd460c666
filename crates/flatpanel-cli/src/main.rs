//! flatpanel CLI - development drawing generator
//!
//! Writes the flat pattern of a sheet-metal panel to DXF, either from the
//! built-in reference parameters or from a TOML parameter file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flatpanel::{compute_view, generate, PanelParams, Side, DEFAULT_OUTPUT};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "flatpanel")]
#[command(about = "Sheet-metal panel development drawing generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the development view to a DXF file
    Generate {
        /// TOML parameter file (default: built-in reference panel)
        #[arg(short, long)]
        params: Option<PathBuf>,
        /// Output DXF file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },
    /// Print the built-in parameters as TOML
    Params,
    /// Show key points and hole centres without writing a file
    Info {
        /// TOML parameter file (default: built-in reference panel)
        #[arg(short, long)]
        params: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flatpanel=info,flatpanel_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate { params, output }) => {
            generate_file(params.as_deref(), &output)?;
        }
        Some(Commands::Params) => {
            print!("{}", PanelParams::default().to_toml_string()?);
        }
        Some(Commands::Info { params }) => {
            show_info(params.as_deref())?;
        }
        None => {
            // Default to the reference panel
            generate_file(None, Path::new(DEFAULT_OUTPUT))?;
        }
    }

    Ok(())
}

fn load_params(path: Option<&Path>) -> Result<PanelParams> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading parameters");
            PanelParams::load(path)
                .with_context(|| format!("loading parameters from {}", path.display()))
        }
        None => Ok(PanelParams::default()),
    }
}

fn generate_file(params: Option<&Path>, output: &Path) -> Result<()> {
    let params = load_params(params)?;
    generate(&params, output).context("generating development view")?;

    let shown = output
        .canonicalize()
        .unwrap_or_else(|_| output.to_path_buf());
    println!("DXF written: {}", shown.display());
    Ok(())
}

fn show_info(params: Option<&Path>) -> Result<()> {
    let params = load_params(params)?;
    params.validate()?;
    let view = compute_view(&params)?;
    let outline = &view.outline;

    println!("Overall length: {} {}", params.overall_len, params.units);
    println!("Key points:");
    for (name, p) in [
        ("left top", outline.left_top),
        ("left bottom", outline.left_bottom),
        ("top left inner", outline.top_left_inner),
        ("top right", outline.top_right),
        ("bottom left return", outline.bottom_left_return),
        ("bottom right", outline.bottom_right),
    ] {
        println!("  {:<20} ({:.3}, {:.3})", name, p.x, p.y);
    }

    println!("Holes (diameter {}):", params.hole_dia);
    for side in [Side::Left, Side::Right] {
        for hole in view.holes_on(side) {
            println!(
                "  {:<6} station {:>8.1}  ({:.3}, {:.3})",
                format!("{side:?}"),
                hole.station,
                hole.center.x,
                hole.center.y
            );
        }
    }

    println!(
        "Bend line: y = {} ({} dashes)",
        params.bending_line_y,
        view.bend_line.len()
    );
    Ok(())
}
