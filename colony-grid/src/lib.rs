#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Competing colonies of cells on a bounded grid. Each generation every occupied slot is
//! visited in row-major order: the cell is counted toward its colony's statistics, dies if it
//! has reached its age limit, may reproduce (with mutation) into a neighboring or its own slot,
//! and then moves one step, fighting cells of rival colonies for the slot it moves into.

pub mod cell;
pub mod colony;
pub mod combat;
pub mod report;
pub mod step;
pub mod world;

pub use cell::{AGE_LIMIT, BIG_MUTATION_AGE_LIMIT, Cell, Gene, Mutation, Traits};
pub use colony::{Census, Colony, ColonyId, ColonyRegistry};
pub use combat::{CombatOutcome, resolve};
pub use report::{ColonyAverages, GenerationReport};
pub use world::{ColonyWorld, Command, CommandOutcome, EMPTY_SLOT_COLOR};
