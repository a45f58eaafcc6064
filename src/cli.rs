use crate::config::{Config, load_config};
use crate::controller::TreemapController;
use crate::dataset::DatasetPreset;
use crate::hierarchy::RawNode;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_legend_svg, render_svg, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tmr", version, about = "Squarified treemap renderer")]
pub struct Args {
    /// Input dataset (.json) or '-' for stdin
    #[arg(short = 'i', long = "input", conflicts_with = "dataset")]
    pub input: Option<PathBuf>,

    /// Preset dataset to fetch instead of reading a file
    #[arg(short = 'd', long = "dataset", value_enum)]
    pub dataset: Option<DatasetPreset>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, treemap, labels, tooltip, legend)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Gap between neighbouring tiles
    #[arg(short = 'p', long = "padding")]
    pub padding: Option<f64>,

    /// Also write the category legend (SVG) to this path
    #[arg(long = "legend")]
    pub legend: Option<PathBuf>,

    /// Write the computed tiles as JSON to this path
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let mut controller = TreemapController::new(config);
    match args.dataset {
        Some(preset) => render_preset(&mut controller, preset)?,
        None => {
            let input = read_input(args.input.as_deref())?;
            let raw = RawNode::from_json(&input)?;
            controller.render(&raw)?;
        }
    }

    let rendered = controller
        .current()
        .ok_or_else(|| anyhow::anyhow!("Nothing was rendered"))?;
    let config = controller.config();
    let svg = render_svg(&rendered.scene, &config.theme);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
    }

    if let Some(path) = args.legend.as_deref() {
        let legend = render_legend_svg(&rendered.colors, &config.theme, &config.legend);
        write_output_svg(&legend, Some(path))?;
    }
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, rendered)?;
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(width) = args.width {
        config.layout.width = width;
        config.render.width = width as f32;
    }
    if let Some(height) = args.height {
        config.layout.height = height;
        config.render.height = height as f32;
    }
    if let Some(padding) = args.padding {
        config.layout.padding = padding;
    }
}

#[cfg(feature = "fetch")]
fn render_preset(controller: &mut TreemapController, preset: DatasetPreset) -> Result<()> {
    use crate::controller::RenderOutcome;

    let source = crate::dataset::HttpSource::new()?;
    match controller.load(&source, preset.info())? {
        RenderOutcome::Rendered { .. } => Ok(()),
        RenderOutcome::Stale => Err(anyhow::anyhow!("Dataset response was superseded")),
    }
}

#[cfg(not(feature = "fetch"))]
fn render_preset(_controller: &mut TreemapController, preset: DatasetPreset) -> Result<()> {
    Err(anyhow::anyhow!(
        "Fetching '{}' requires the `fetch` feature",
        preset.info().title
    ))
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("treemap_rs_renderer={level}")));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
