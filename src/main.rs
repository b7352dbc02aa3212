//! Swarm Arena entry point
//!
//! Builds an arena from a preset or JSON config and steps it, optionally
//! printing ASCII frames to the terminal.

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;

use swarm_arena::renderer::{AsciiCanvas, DrawSink, NullSink};
use swarm_arena::sim::{Arena, Role, SimEvent};
use swarm_arena::{ArenaConfig, Scenario, SimError};

/// Creatures chasing and fleeing roaming lights
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Preset layout (swarm or crowd)
    #[arg(short, long, default_value = "swarm", value_parser = parse_scenario)]
    scenario: Scenario,

    /// JSON config file; overrides the preset
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Steps to run; runs until interrupted when omitted
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Elapsed time per step
    #[arg(long)]
    dt: Option<f32>,

    /// Print an ASCII frame every N steps (0 = never)
    #[arg(short, long, default_value_t = 0)]
    render_every: u64,

    /// ASCII frame width in characters
    #[arg(long, default_value_t = 81)]
    width: usize,

    /// ASCII frame height in characters
    #[arg(long, default_value_t = 27)]
    height: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_scenario(s: &str) -> Result<Scenario, String> {
    Scenario::from_str(s).ok_or_else(|| format!("unknown scenario '{s}' (expected swarm or crowd)"))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn load_config(args: &Args) -> Result<ArenaConfig, SimError> {
    let mut config = match &args.config {
        Some(path) => ArenaConfig::load(path)?,
        None => args.scenario.config(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(dt) = args.dt {
        config.dt = dt;
    }
    config.validate()?;
    Ok(config)
}

/// Where the layout came from, for the startup log
fn source_label(args: &Args) -> String {
    match &args.config {
        Some(path) => format!("config {}", path.display()),
        None => format!("scenario {}", args.scenario.as_str()),
    }
}

/// Totals gathered while driving the arena
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RunSummary {
    ticks: u64,
    wall_bounces: u64,
    collisions: u64,
}

/// Set `stop` once Ctrl-C arrives; the loop checks it between ticks
fn install_interrupt_flag(stop: Arc<AtomicBool>) -> Result<(), SimError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    std::thread::spawn(move || {
        runtime.block_on(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    log::info!("Shutdown signal received");
                    stop.store(true, Ordering::SeqCst);
                }
                Err(e) => log::warn!("Ctrl+C handler unavailable: {e}"),
            }
        });
    });
    Ok(())
}

fn run(args: &Args) -> Result<(), SimError> {
    let config = load_config(args)?;
    log::info!(
        "Swarm Arena starting ({}, seed {})",
        source_label(args),
        config.seed
    );

    let stop = Arc::new(AtomicBool::new(false));
    install_interrupt_flag(stop.clone())?;

    let mut arena = Arena::new(&config)?;
    let mut canvas = AsciiCanvas::new(args.width, args.height, arena.bounds().max);
    if args.render_every > 0 {
        arena.initialize_graphics(&mut canvas);
        println!("tick 0\n{}", canvas.render());
    }

    let summary = drive(&mut arena, config.dt, args, &mut canvas, &stop);

    log::info!(
        "{} ticks: {} wall bounces, {} collisions ({} seeking, {} avoiding, {} beacons)",
        summary.ticks,
        summary.wall_bounces,
        summary.collisions,
        arena.role_count(Role::Seeking),
        arena.role_count(Role::Avoiding),
        arena.beacons().len()
    );
    log::info!("Done swarming.");
    Ok(())
}

/// Step until the tick budget runs out or `stop` is raised
fn drive(
    arena: &mut Arena,
    dt: f32,
    args: &Args,
    canvas: &mut AsciiCanvas,
    stop: &AtomicBool,
) -> RunSummary {
    let mut headless = NullSink;
    let mut summary = RunSummary::default();

    loop {
        if stop.load(Ordering::SeqCst) {
            break;
        }
        if args.ticks.is_some_and(|ticks| arena.tick_count() >= ticks) {
            break;
        }

        let show = args.render_every > 0 && arena.tick_count() % args.render_every == 0;
        let sink: &mut dyn DrawSink = if show {
            canvas.clear();
            &mut *canvas
        } else {
            &mut headless
        };
        arena.step(dt, sink);
        summary.ticks += 1;

        for event in arena.events() {
            match event {
                SimEvent::WallBounce { .. } => summary.wall_bounces += 1,
                SimEvent::Collision { .. } => summary.collisions += 1,
                _ => {}
            }
        }

        if show {
            println!("tick {}\n{}", arena.tick_count(), canvas.render());
        }
    }

    summary
}
