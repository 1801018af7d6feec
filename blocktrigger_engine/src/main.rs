#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** blocktrigger **
//! Command-line front end for inspecting, editing and dry-running trigger files.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use blocktrigger_engine::admin::{self, AdminCaller, AdminCommand};
use blocktrigger_engine::clock::SystemClock;
use blocktrigger_engine::host::FixedSelection;
use blocktrigger_engine::region::highlight_offset;
use blocktrigger_engine::{
    BlockPos, BlockTrigger, ClickAction, EngineConfig, Hand, Host, Interaction, PlayerRef, Region, Vec3i,
};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(author, version, about = "Region triggers for game servers.")]
struct Cli {
    /// Trigger file to use instead of the discovered default.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the trigger file, then list its triggers.
    Check,
    /// Show which trigger, if any, covers a block.
    Lookup {
        world: String,
        #[arg(allow_hyphen_values = true)]
        x: i32,
        #[arg(allow_hyphen_values = true)]
        y: i32,
        #[arg(allow_hyphen_values = true)]
        z: i32,
    },
    /// Print the outline points of a trigger's region.
    Outline {
        name: String,
        /// Tick to animate the outline for.
        #[arg(long, default_value_t = 0)]
        tick: u64,
        #[arg(long, default_value_t = 1)]
        interval: u64,
        #[arg(long, default_value_t = 1)]
        scale: u64,
    },
    /// Write a new move trigger covering a selection.
    Create(EditArgs),
    /// Move an existing trigger to a selection and reload.
    Update(EditArgs),
    /// Complete a partial admin command line.
    Complete { args: Vec<String> },
    /// Dry-run a player walking through a list of blocks.
    Walk {
        #[command(flatten)]
        player: PlayerArgs,
        world: String,
        /// Blocks visited in order, each as x,y,z.
        #[arg(value_parser = parse_coords, required = true, allow_hyphen_values = true)]
        path: Vec<Vec3i>,
    },
    /// Dry-run a player clicking a block.
    Click {
        #[command(flatten)]
        player: PlayerArgs,
        world: String,
        #[arg(value_parser = parse_coords, allow_hyphen_values = true)]
        block: Vec3i,
        /// Left click instead of right click.
        #[arg(long)]
        left: bool,
    },
}

#[derive(Args)]
struct EditArgs {
    name: String,
    #[arg(long)]
    world: String,
    /// First selection corner, x,y,z.
    #[arg(long, value_parser = parse_coords, allow_hyphen_values = true)]
    from: Option<Vec3i>,
    /// Second selection corner, x,y,z.
    #[arg(long, value_parser = parse_coords, allow_hyphen_values = true)]
    to: Option<Vec3i>,
    #[command(flatten)]
    player: PlayerArgs,
}

#[derive(Args)]
struct PlayerArgs {
    #[arg(long, default_value = "Console")]
    player: String,
    #[arg(long)]
    uuid: Option<Uuid>,
    /// Permissions the simulated player holds.
    #[arg(long = "grant")]
    grants: Vec<String>,
}

impl PlayerArgs {
    fn player_ref(&self) -> PlayerRef {
        PlayerRef::new(self.uuid.unwrap_or_else(Uuid::new_v4), self.player.clone())
    }
}

fn parse_coords(text: &str) -> Result<Vec3i, String> {
    let parts: Vec<_> = text.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z but got '{text}'"));
    };
    let num = |s: &str| s.parse::<i32>().map_err(|e| format!("'{s}': {e}"));
    Ok(Vec3i::new(num(*x)?, num(*y)?, num(*z)?))
}

/// Host that prints every request instead of executing it.
struct PrintingHost {
    grants: HashSet<String>,
}

impl Host for PrintingHost {
    fn has_permission(&self, _player: &PlayerRef, permission: &str) -> bool {
        self.grants.contains(permission)
    }

    fn perform_command(&self, player: &PlayerRef, command: &str) {
        println!("[{}] /{command}", player.name);
    }

    fn dispatch_console_command(&self, command: &str) {
        println!("[console] /{command}");
    }

    fn send_plugin_message(&self, player: &PlayerRef, channel: &str, payload: Vec<u8>) {
        println!("[{}] {channel} message, {} bytes", player.name, payload.len());
    }

    fn teleport_to_spawn(&self, player: &PlayerRef, world: &str) {
        println!("[{}] teleported to spawn of {world}", player.name);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.config.map_or_else(EngineConfig::default, EngineConfig::with_path);
    let grants = match &cli.command {
        Commands::Walk { player, .. } | Commands::Click { player, .. } => player.grants.iter().cloned().collect(),
        _ => HashSet::new(),
    };
    let engine = BlockTrigger::new(config, Arc::new(PrintingHost { grants }), Arc::new(SystemClock));
    info!("using trigger file {}", engine.config().config_path.display());

    match cli.command {
        Commands::Check => check(&engine),
        Commands::Lookup { world, x, y, z } => {
            load(&engine)?;
            match engine.registry().lookup(&world, x, y, z) {
                Some(trigger) => println!("{trigger}"),
                None => println!("no trigger at {world}:{x},{y},{z}"),
            }
            Ok(())
        },
        Commands::Outline {
            name,
            tick,
            interval,
            scale,
        } => outline(&engine, &name, tick, interval, scale),
        Commands::Create(args) => edit(&engine, AdminCommand::Create(args.name.clone()), &args),
        Commands::Update(args) => edit(&engine, AdminCommand::Update(args.name.clone()), &args),
        Commands::Complete { args } => {
            // a missing file just means there is nothing to complete yet
            if let Err(e) = engine.reload_if_present() {
                warn!("completing without triggers: {e}");
            }
            for option in admin::complete(&engine, &args) {
                println!("{option}");
            }
            Ok(())
        },
        Commands::Walk { player, world, path } => walk(&engine, &player.player_ref(), &world, &path),
        Commands::Click {
            player,
            world,
            block,
            left,
        } => {
            load(&engine)?;
            let action = if left {
                ClickAction::LeftClickBlock
            } else {
                ClickAction::RightClickBlock
            };
            let pos = BlockPos {
                world,
                pos: block,
            };
            match engine
                .events()
                .on_interact(&player.player_ref(), action, Hand::Main, &pos)
            {
                Interaction::Deny => println!("trigger fired, block use suppressed"),
                Interaction::Allow => println!("no trigger fired"),
            }
            Ok(())
        },
    }
}

fn load(engine: &BlockTrigger) -> Result<()> {
    engine.reload().with_context(|| {
        format!(
            "while loading triggers from {}",
            engine.config().config_path.display()
        )
    })?;
    Ok(())
}

fn check(engine: &BlockTrigger) -> Result<()> {
    load(engine)?;
    let set = engine.registry().snapshot();
    println!("{} triggers OK", set.len());
    for trigger in set.iter() {
        println!(
            "  {trigger} volume={} effects={} cooldown={}s{}",
            trigger.region.volume(),
            trigger.effects.len(),
            trigger.cooldown_secs,
            if trigger.requires_permission() {
                format!(" permission={}", trigger.permission)
            } else {
                String::new()
            }
        );
    }
    Ok(())
}

fn outline(engine: &BlockTrigger, name: &str, tick: u64, interval: u64, scale: u64) -> Result<()> {
    load(engine)?;
    let set = engine.registry().snapshot();
    let Some(trigger) = set.get(name) else {
        bail!("no trigger named '{name}'");
    };
    let Some(offset) = highlight_offset(tick, interval, scale) else {
        println!("tick {tick} is between outline intervals");
        return Ok(());
    };
    for [x, y, z] in trigger.region.surface_points(offset) {
        println!("{x:.2} {y:.2} {z:.2}");
    }
    Ok(())
}

fn edit(engine: &BlockTrigger, command: AdminCommand, args: &EditArgs) -> Result<()> {
    let selection = match (args.from, args.to) {
        (Some(a), Some(b)) => FixedSelection(Some(Region::from_corners(a, b))),
        _ => FixedSelection(None),
    };
    let caller = AdminCaller {
        player: args.player.player_ref(),
        world: args.world.clone(),
    };
    let message = admin::run(engine, Some(&caller), &command, &selection)?;
    println!("{message}");
    Ok(())
}

fn walk(engine: &BlockTrigger, player: &PlayerRef, world: &str, path: &[Vec3i]) -> Result<()> {
    load(engine)?;
    let events = engine.events();
    let mut previous: Option<BlockPos> = None;
    for step in path {
        let here = BlockPos {
            world: world.to_string(),
            pos: *step,
        };
        let fired = match &previous {
            Some(from) => events.on_move(player, from, &here),
            None => events.on_position(player, &here),
        };
        println!("{here}{}", if fired { "  <- fired" } else { "" });
        previous = Some(here);
    }
    events.on_disconnect(player, previous.as_ref());
    Ok(())
}
