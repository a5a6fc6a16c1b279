mod script;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use creature_sim_core::{CreatureSnapshot, GameStatus, SimConfig, TurnOutcome, World, WorldSnapshot};
use script::Step;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "creature-sim")]
#[command(about = "Creature Life-Simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scripted sequence of player intents
    Play {
        /// Path to config file (JSON); defaults are used when absent
        #[arg(long)]
        config: Option<PathBuf>,

        /// Comma-separated steps: eat, pair, eat@<id>, select:<id>, target:<id>
        #[arg(long)]
        script: String,

        /// Write a JSON run summary to this path
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the initial world
    Inspect {
        /// Path to config file (JSON); defaults are used when absent
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let config = match path {
        Some(path) => {
            let file = File::open(path).context("failed to open config file")?;
            serde_json::from_reader(BufReader::new(file)).context("failed to parse config")?
        }
        None => SimConfig::default(),
    };
    config.validate().context("Config validation error")?;
    Ok(config)
}

fn creature_line(c: &CreatureSnapshot) -> String {
    let marks = format!(
        "{}{}",
        if c.selected { "*" } else { " " },
        if c.action_target { ">" } else { " " }
    );
    let [heat, cold, light, max_energy] = c.trait_means;
    format!(
        "{marks} {:>5} gen {:<2} energy {:>3}/{:<3} cost {:<2} heat {heat:>3} cold {cold:>3} light {light:>3} max {max_energy:>3}{}",
        c.id.to_string(),
        c.generation,
        c.energy,
        c.energy_ceiling,
        c.action_cost,
        if c.dead { "  (dead)" } else { "" }
    )
}

fn print_snapshot(snapshot: &WorldSnapshot) {
    let readings: Vec<String> = snapshot
        .environment
        .readings()
        .iter()
        .map(|(name, value)| format!("{name} {value}"))
        .collect();
    println!(
        "turn {}  {}  status {:?}",
        snapshot.turn,
        readings.join("  "),
        snapshot.status
    );
    println!("player:");
    println!("  {}", creature_line(&snapshot.player));
    println!(
        "world ({} of {} alive):",
        snapshot.alive_world_creatures(),
        snapshot.world_creatures.len()
    );
    for c in &snapshot.world_creatures {
        println!("  {}", creature_line(c));
    }
    if !snapshot.offspring.is_empty() {
        println!("offspring:");
        for c in &snapshot.offspring {
            println!("  {}", creature_line(c));
        }
    }
}

fn play(config: SimConfig, steps: &[Step], out: Option<&Path>) -> Result<()> {
    let mut world = World::new(config).context("failed to initialize world")?;
    world.set_update_callback(|w| {
        let player = w.player();
        println!(
            "  -> turn {} player energy {} status {:?}",
            w.turn_index(),
            player.energy(),
            w.status()
        );
    });

    let mut refused = 0usize;
    for step in steps {
        match *step {
            Step::Select(id) => world.select_creature(id),
            Step::Target(id) => world.select_action_creature(id),
            Step::Run { action, actor } => {
                println!("{action} by {actor}");
                match world.execute(action, actor)? {
                    TurnOutcome::Refused { cost, energy } => {
                        refused += 1;
                        println!("  -> not enough energy ({energy} < {cost})");
                    }
                    TurnOutcome::Attempted { .. } => {}
                }
            }
        }
        if world.status() != GameStatus::InProgress {
            break;
        }
    }

    match world.status() {
        GameStatus::Won => info!("all other creatures died"),
        GameStatus::Lost => warn!("the player ran out of energy"),
        GameStatus::InProgress => {}
    }

    let summary = world.summary(refused);
    println!();
    print_snapshot(&summary.final_snapshot);

    if let Some(path) = out {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).context("failed to create output directory")?;
        }
        let file = File::create(path).context("failed to create summary file")?;
        serde_json::to_writer_pretty(file, &summary).context("failed to write summary")?;
        println!("Run complete. Summary saved to {:?}", path);
    } else {
        println!("Run complete. Status: {:?}", summary.status);
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Inspect { config } => {
            let config = load_config(config.as_deref())?;
            let world = World::new(config).context("failed to initialize world")?;
            print_snapshot(&world.snapshot());
        }
        Commands::Play {
            config,
            script,
            out,
        } => {
            let config = load_config(config.as_deref())?;
            let steps = script::parse(&script).context("failed to parse script")?;
            play(config, &steps, out.as_deref())?;
        }
    }
    Ok(())
}
