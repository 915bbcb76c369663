#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that loads, runs, and saves Life simulations.

mod presets;
mod scheduler;
mod seeding;
mod settings;
mod storage;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use life_core::{Command, GeometryKind, GridSize, LifeState, Speed};
use life_world::{self as world, query, Simulation};

use self::{
    scheduler::{Scheduler, ThreadSleep, Unpaced},
    settings::Settings,
};

/// Conway's Game of Life on flat or toroidal grids.
#[derive(Debug, Parser)]
#[command(
    name = "life",
    version,
    about = "Conway's Game of Life on flat or toroidal grids",
    long_about = None
)]
struct Cli {
    /// TOML settings file; defaults to `life.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Load a state and advance it through a number of generations.
    Run(RunArgs),
    /// Create an empty or randomly filled state.
    New(NewArgs),
    /// List the built-in starting patterns.
    Presets,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["pattern", "preset"])))]
struct RunArgs {
    /// State file in `*`/`-` notation.
    #[arg(short, long)]
    pattern: Option<PathBuf>,

    /// Name of a built-in pattern (see `life presets`).
    #[arg(long)]
    preset: Option<String>,

    /// Neighbor rule: `flat` or `toroidal`.
    #[arg(short, long)]
    geometry: Option<GeometryKind>,

    /// Number of generations to compute.
    #[arg(short = 'n', long, default_value_t = 100)]
    generations: u64,

    /// Generations per ten seconds while watching.
    #[arg(short, long)]
    speed: Option<u32>,

    /// Print every generation, paced by the speed setting.
    #[arg(short, long)]
    watch: bool,

    /// Stop early once a generation leaves the state unchanged.
    #[arg(long)]
    stop_when_stable: bool,

    /// Write the final state to this file instead of printing it.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct NewArgs {
    /// Grid width in cells.
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u32>,

    /// Probability that each cell starts alive.
    #[arg(short, long)]
    density: Option<f64>,

    /// Seed for the random fill.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write the state to this file instead of printing it.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Entry point for the Life command-line interface.
fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        CliCommand::Run(args) => run(&settings, args),
        CliCommand::New(args) => create(&settings, args),
        CliCommand::Presets => {
            for preset in &presets::PRESETS {
                println!("{:<20} {}", preset.name, preset.description);
            }
            Ok(())
        }
    }
}

fn run(settings: &Settings, args: RunArgs) -> Result<()> {
    let state = if let Some(path) = &args.pattern {
        storage::load_state(path)?
    } else if let Some(name) = &args.preset {
        presets::find(name)
            .with_context(|| format!("unknown preset `{name}`; try `life presets`"))?
            .state()?
    } else {
        bail!("either --pattern or --preset is required");
    };

    let geometry = match args.geometry {
        Some(geometry) => geometry,
        None => settings.geometry()?,
    };
    let speed = match args.speed {
        Some(speed) => Speed::new(speed)?,
        None => settings.speed()?,
    };

    let mut simulation = Simulation::new(state.size());
    let mut events = Vec::new();
    for command in [
        Command::SetGeometry { geometry },
        Command::SetSpeed { speed },
        Command::LoadState { state },
    ] {
        world::apply(&mut simulation, command, &mut events)?;
    }
    log::debug!("prepared simulation: {events:?}");

    let outcome = if args.watch {
        println!("{}", render_frame(&simulation, settings));
        Scheduler::new(ThreadSleep)
            .stop_when_settled(args.stop_when_stable)
            .run(&mut simulation, args.generations, |simulation, _| {
                println!();
                println!("{}", render_frame(simulation, settings));
                Ok(())
            })?
    } else {
        Scheduler::new(Unpaced)
            .stop_when_settled(args.stop_when_stable)
            .run(&mut simulation, args.generations, |_, _| Ok(()))?
    };
    log::info!(
        "computed {} generations under {geometry} geometry{}",
        outcome.generations,
        if outcome.settled { " (settled)" } else { "" }
    );

    finish(query::current_state(&simulation), settings, args.output, !args.watch)
}

fn create(settings: &Settings, args: NewArgs) -> Result<()> {
    let size = GridSize::new(
        args.width.unwrap_or(settings.width),
        args.height.unwrap_or(settings.height),
    )?;
    let state = match args.density {
        Some(density) => seeding::random_state(size, density, args.seed)?,
        None => LifeState::new(size),
    };
    finish(&state, settings, args.output, true)
}

fn finish(
    state: &LifeState,
    settings: &Settings,
    output: Option<PathBuf>,
    print: bool,
) -> Result<()> {
    match output {
        Some(path) => storage::save_state(&path, state),
        None => {
            if print {
                println!("{}", state.render(settings.alive, settings.dead));
            }
            Ok(())
        }
    }
}

fn render_frame(simulation: &Simulation, settings: &Settings) -> String {
    format!(
        "Iteration: {}\n{}",
        query::iteration(simulation),
        query::current_state(simulation).render(settings.alive, settings.dead)
    )
}
