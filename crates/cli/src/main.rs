#![deny(unsafe_code)]
//! Headless driver for glyphswarm.
//!
//! Subcommands:
//! - `render [TEXT]`: run the swarm N frames, draw trails, write PNG
//! - `replay <SEED>`: re-render a run from a saved seed file
//! - `list`: print available engines
//! - `schema <engine>`: print an engine's parameter schema

mod error;

use clap::{ArgAction, Parser, Subcommand};
use error::CliError;
use glyphswarm_core::{DVec2, Engine, Frame, Seed};
use glyphswarm_engines::pixel::TrailCanvas;
use glyphswarm_engines::EngineKind;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "glyphswarm", about = "Particle swarm that assembles into text")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log more (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the swarm for N frames and write a PNG of the particle trails.
    Render {
        /// Text to assemble (overrides "text" in --params).
        text: Option<String>,

        /// Engine name.
        #[arg(short, long, default_value = "glyph-swarm")]
        engine: String,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 2400)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 800)]
        height: usize,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 600)]
        steps: usize,

        /// Simulated frame rate; frame `i` is at `i / fps` seconds.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Engine parameters as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,

        /// TrueType/OpenType font file (default: built-in bitmap font).
        #[arg(long)]
        font: Option<PathBuf>,

        /// Fixed pointer position as `x,y` in canvas pixels.
        #[arg(long, value_parser = parse_pointer)]
        pointer: Option<[f64; 2]>,

        /// Output file path.
        #[arg(short, long, default_value = "glyphswarm.png")]
        output: PathBuf,

        /// Also write the reproducible seed of this run as JSON.
        #[arg(long)]
        seed_out: Option<PathBuf>,
    },
    /// Re-render a run from a seed file written by `render --seed-out`.
    Replay {
        /// Seed JSON file.
        seed_file: PathBuf,

        /// TrueType/OpenType font file (default: built-in bitmap font).
        #[arg(long)]
        font: Option<PathBuf>,

        /// Output file path.
        #[arg(short, long, default_value = "glyphswarm.png")]
        output: PathBuf,
    },
    /// List available engines.
    List,
    /// Print an engine's parameter schema as JSON.
    Schema {
        /// Engine name.
        #[arg(default_value = "glyph-swarm")]
        engine: String,
    },
}

/// Parses `x,y` into a pointer position.
fn parse_pointer(s: &str) -> Result<[f64; 2], String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|c| c.is_finite())
            .ok_or_else(|| format!("invalid coordinate {v:?}"))
    };
    Ok([coord(x)?, coord(y)?])
}

/// Merges the positional text into the `--params` object.
fn build_params(params: &str, text: Option<String>) -> Result<Value, CliError> {
    let mut params: Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let Some(obj) = params.as_object_mut() else {
        return Err(CliError::Input("--params must be a JSON object".into()));
    };
    if let Some(text) = text {
        obj.insert("text".into(), Value::String(text));
    }
    Ok(params)
}

/// What a finished render produced.
#[derive(Debug)]
struct RenderSummary {
    particles: usize,
    targets: usize,
}

/// Runs `seed` headlessly and writes the trail canvas to `output`.
fn render_seed(seed: &Seed, font: Option<&Path>, output: &Path) -> Result<RenderSummary, CliError> {
    seed.validate()?;
    let mut engine =
        EngineKind::from_name(&seed.engine, seed.width, seed.height, seed.seed, &seed.params, font)?;
    let mut canvas = TrailCanvas::new(seed.width, seed.height)?;
    let pointer = seed.pointer.map(|[x, y]| DVec2::new(x, y));

    info!(
        "rendering {} ({}x{}, {} frames at {} fps, seed {})",
        seed.engine, seed.width, seed.height, seed.steps, seed.fps, seed.seed
    );
    for i in 0..seed.steps {
        let frame = Frame {
            elapsed: seed.elapsed_at(i),
            pointer,
        };
        canvas.draw_frame(&engine.step(&frame));
    }
    debug!("finished {} frames", seed.steps);

    glyphswarm_engines::snapshot::write_png(canvas.raster(), output)?;
    Ok(RenderSummary {
        particles: engine.positions().len(),
        targets: engine.targets().len(),
    })
}

fn report(json: bool, seed: &Seed, summary: &RenderSummary, output: &Path) -> Result<(), CliError> {
    if json {
        let info = serde_json::json!({
            "engine": seed.engine,
            "width": seed.width,
            "height": seed.height,
            "steps": seed.steps,
            "seed": seed.seed,
            "particles": summary.particles,
            "targets": summary.targets,
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {} ({}x{}, {} steps, seed {}, {} particles on {} targets) -> {}",
            seed.engine,
            seed.width,
            seed.height,
            seed.steps,
            seed.seed,
            summary.particles,
            summary.targets,
            output.display()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let engines = EngineKind::list_engines();
            if cli.json {
                let info = serde_json::json!({ "engines": engines });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Engines:");
                for name in engines {
                    println!("  {name}");
                }
            }
        }
        Command::Schema { engine } => {
            let schema = EngineKind::param_schema_for(&engine)?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Render {
            text,
            engine,
            width,
            height,
            steps,
            fps,
            seed,
            params,
            font,
            pointer,
            output,
            seed_out,
        } => {
            let run_seed = Seed {
                params: build_params(&params, text)?,
                steps,
                fps,
                pointer,
                ..Seed::new(&engine, width, height, seed)
            };
            let summary = render_seed(&run_seed, font.as_deref(), &output)?;
            if let Some(path) = seed_out {
                let body = serde_json::to_string_pretty(&run_seed)?;
                std::fs::write(&path, body)
                    .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
                info!("wrote seed to {}", path.display());
            }
            report(cli.json, &run_seed, &summary, &output)?;
        }
        Command::Replay {
            seed_file,
            font,
            output,
        } => {
            let body = std::fs::read_to_string(&seed_file)
                .map_err(|e| CliError::Io(format!("{}: {e}", seed_file.display())))?;
            let run_seed: Seed = serde_json::from_str(&body)
                .map_err(|e| CliError::Input(format!("invalid seed file: {e}")))?;
            let summary = render_seed(&run_seed, font.as_deref(), &output)?;
            report(cli.json, &run_seed, &summary, &output)?;
        }
    }

    Ok(())
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
