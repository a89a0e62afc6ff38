#![deny(clippy::all)]
#![forbid(unsafe_code)]

use colony_grid::{ColonyWorld, Command, CommandOutcome};
use log::{info, warn};
use std::env;
use world_grid::{GridSize, Loc, Random};

const GRID_WIDTH: u32 = 100;
const GRID_HEIGHT: u32 = 80;
const NUM_COLONIES: usize = 4;
const SEEDS_PER_COLONY: usize = 3;
const NUM_GENERATIONS: u64 = 200;
const SEED_ENV_VAR: &str = "COLONY_SEED";

fn main() {
    env_logger::init();

    let (rand, mut placement_rand) = match rng_seed() {
        Some(seed) => {
            info!("Using RNG seed {seed}");
            (Random::from_seed(seed), Random::from_seed(seed.wrapping_add(1)))
        }
        None => (Random::new(), Random::new()),
    };
    let mut world = ColonyWorld::new(GridSize::new(GRID_WIDTH, GRID_HEIGHT), rand);

    for command in script(&mut world, &mut placement_rand) {
        match world.apply(command) {
            CommandOutcome::Advanced(Some(report)) => print!("{report}"),
            CommandOutcome::SeedPlaced(false) => warn!("Seed rejected: {command:?}"),
            CommandOutcome::Terminated => break,
            _ => (),
        }
    }

    info!(
        "Finished after {} generations with {} occupied slots",
        world.generation(),
        world.grid().num_occupied()
    );
}

fn rng_seed() -> Option<u64> {
    let arg = env::args().nth(1).or_else(|| env::var(SEED_ENV_VAR).ok())?;
    match arg.parse() {
        Ok(seed) => Some(seed),
        Err(err) => {
            warn!("Ignoring unparsable seed {arg:?}: {err}");
            None
        }
    }
}

fn script(world: &mut ColonyWorld, rand: &mut Random) -> Vec<Command> {
    let mut commands = Vec::new();
    for _ in 0..NUM_COLONIES {
        let CommandOutcome::ColonyCreated(colony) = world.apply(Command::CreateColony) else {
            continue;
        };
        for _ in 0..SEEDS_PER_COLONY {
            let loc = Loc::new(
                rand.next_in_range(0..GRID_HEIGHT),
                rand.next_in_range(0..GRID_WIDTH),
            );
            commands.push(Command::PlaceSeed { colony, loc });
        }
    }
    commands.push(Command::ToggleDynamics);
    commands.extend((0..NUM_GENERATIONS).map(|_| Command::Advance));
    commands.push(Command::Terminate);
    commands
}
